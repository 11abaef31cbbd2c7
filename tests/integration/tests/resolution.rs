//! End-to-end resolution behavior
//!
//! Run with: cargo test -p integration-tests --test resolution

use std::sync::atomic::Ordering;
use std::sync::Arc;

use cord_core::{Channel, ChannelKind, EntityKind, ResolveError, Snowflake};
use cord_service::{Resolver, ServiceContext};
use integration_tests::fixtures::{
    two_server_context, two_server_world, ALICE, ALPHA, ALPHA_GENERAL, ALPHA_RANDOM, BETA_GENERAL,
};

#[tokio::test]
async fn test_raw_id_wins_over_decoration() {
    let (ctx, fake) = two_server_context();
    let resolver = Resolver::new(&ctx);

    for target in [
        "200000000000000001",
        "#200000000000000001",
        "@200000000000000001",
    ] {
        let resolved = resolver
            .resolve_target(EntityKind::Channel, target)
            .await
            .unwrap();
        assert_eq!(resolved.id, ALPHA_GENERAL, "target {target}");
    }
    // Direct lookups never scan the server list
    assert_eq!(fake.list_guild_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_scoped_and_unscoped_agree_on_unique_names() {
    let (ctx, _fake) = two_server_context();
    let resolver = Resolver::new(&ctx);

    let scoped = resolver
        .resolve_target(EntityKind::Channel, "Alpha/random")
        .await
        .unwrap();
    let unscoped = resolver
        .resolve_target(EntityKind::Channel, "random")
        .await
        .unwrap();
    assert_eq!(scoped.id, ALPHA_RANDOM);
    assert_eq!(unscoped.id, ALPHA_RANDOM);
}

#[tokio::test]
async fn test_colliding_name_is_ambiguous_until_scoped() {
    let (ctx, _fake) = two_server_context();
    let resolver = Resolver::new(&ctx);

    let err = resolver
        .resolve_target(EntityKind::Channel, "general")
        .await
        .unwrap_err();
    let ResolveError::Ambiguous { candidates, .. } = err else {
        panic!("expected ambiguity");
    };
    assert_eq!(candidates.len(), 2);
    assert!(candidates[0].guild_name <= candidates[1].guild_name);

    let resolved = resolver
        .resolve_target(EntityKind::Channel, "Beta/general")
        .await
        .unwrap();
    assert_eq!(resolved.id, BETA_GENERAL);
}

#[tokio::test]
async fn test_repeat_unscoped_queries_hit_cache() {
    let (ctx, fake) = two_server_context();
    let resolver = Resolver::new(&ctx);

    let first = resolver
        .resolve_target(EntityKind::User, "@alice")
        .await
        .unwrap();
    let scans = fake.list_guild_calls.load(Ordering::SeqCst);
    assert!(scans >= 1);

    // Same name, different casing and whitespace: served from cache
    for target in ["@alice", "alice", "  ALICE  "] {
        let again = resolver
            .resolve_target(EntityKind::User, target)
            .await
            .unwrap();
        assert_eq!(again.id, first.id);
    }
    assert_eq!(fake.list_guild_calls.load(Ordering::SeqCst), scans);
}

#[tokio::test]
async fn test_user_in_two_guilds_resolves_once() {
    let (ctx, _fake) = two_server_context();
    let resolver = Resolver::new(&ctx);
    let resolved = resolver
        .resolve_target(EntityKind::User, "Alice A.")
        .await
        .unwrap();
    assert_eq!(resolved.id, ALICE);
}

#[tokio::test]
async fn test_malformed_scope_syntax() {
    let (ctx, _fake) = two_server_context();
    let resolver = Resolver::new(&ctx);

    for target in ["/general", "Alpha/", "/", ""] {
        let err = resolver
            .resolve_target(EntityKind::Channel, target)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ResolveError::InvalidFormat(_)),
            "target {target:?} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_voice_channels_do_not_resolve_by_name() {
    let mut world = two_server_world();
    world.channels.get_mut(&ALPHA).unwrap().push(Channel {
        id: Snowflake::new(200_000_000_000_000_003),
        guild_id: Some(ALPHA),
        name: Some("voice-chat".into()),
        kind: ChannelKind::Voice,
        topic: None,
    });
    let ctx = ServiceContext::new(Arc::new(world));

    let resolver = Resolver::new(&ctx);
    let err = resolver
        .resolve_target(EntityKind::Channel, "voice-chat")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unknown_id_reports_not_found_with_token() {
    let (ctx, _fake) = two_server_context();
    let resolver = Resolver::new(&ctx);
    let err = resolver
        .resolve_target(EntityKind::User, "999999999999999999")
        .await
        .unwrap_err();
    let ResolveError::NotFound { kind, token } = err else {
        panic!("expected not-found");
    };
    assert_eq!(kind, EntityKind::User);
    assert_eq!(token, "999999999999999999");
}

#[tokio::test]
async fn test_cached_entry_survives_upstream_rename() {
    let (ctx, _fake) = two_server_context();
    let resolver = Resolver::new(&ctx);
    resolver
        .resolve_target(EntityKind::Channel, "random")
        .await
        .unwrap();

    // No invalidation: the cache keeps answering with the recorded id
    let again = resolver
        .resolve_target(EntityKind::Channel, "random")
        .await
        .unwrap();
    assert_eq!(again.id, Snowflake::new(200_000_000_000_000_002));
}
