//! End-to-end mention processing
//!
//! Run with: cargo test -p integration-tests --test mentions

use std::sync::atomic::Ordering;

use cord_service::MentionProcessor;
use integration_tests::fixtures::two_server_context;

#[tokio::test]
async fn test_outbound_mixed_tokens() {
    let (ctx, _fake) = two_server_context();
    let processor = MentionProcessor::new(&ctx);
    let out = processor
        .to_markup("ping @alice and @nobody, cc 300000000000000002")
        .await;
    assert_eq!(
        out,
        "ping <@300000000000000001> and @nobody, cc <@300000000000000002>"
    );
}

#[tokio::test]
async fn test_outbound_leaves_markup_and_glued_digits() {
    let (ctx, _fake) = two_server_context();
    let processor = MentionProcessor::new(&ctx);
    let text = "<@300000000000000001> ref300000000000000002x";
    assert_eq!(processor.to_markup(text).await, text);
}

#[tokio::test]
async fn test_inbound_total_with_fallback() {
    let (ctx, _fake) = two_server_context();
    let processor = MentionProcessor::new(&ctx);
    let out = processor
        .to_human("<@300000000000000001> met <@999999999999999999>")
        .await;
    assert_eq!(out, "@alice met @[999999999999999999]");
}

#[tokio::test]
async fn test_round_trip_preserves_handle() {
    let (ctx, _fake) = two_server_context();
    let processor = MentionProcessor::new(&ctx);
    let markup = processor.to_markup("deploy ready @bob").await;
    assert_eq!(markup, "deploy ready <@300000000000000002>");
    assert_eq!(processor.to_human(&markup).await, "deploy ready @bob");
}

#[tokio::test]
async fn test_resolution_primes_inbound_memo() {
    let (ctx, fake) = two_server_context();
    let processor = MentionProcessor::new(&ctx);

    // Outbound resolution memoizes the username, so the inbound pass
    // needs no per-user fetch
    processor.to_markup("@alice").await;
    let fetches = fake.fetch_user_calls.load(Ordering::SeqCst);
    let out = processor.to_human("<@300000000000000001>").await;
    assert_eq!(out, "@alice");
    assert_eq!(fake.fetch_user_calls.load(Ordering::SeqCst), fetches);
}

#[tokio::test]
async fn test_nickname_mention_renders_username() {
    let (ctx, _fake) = two_server_context();
    let processor = MentionProcessor::new(&ctx);
    // Outbound accepts the nick; inbound always renders the stable handle
    let markup = processor.to_markup("@Bobby").await;
    assert_eq!(markup, "<@300000000000000002>");
    assert_eq!(processor.to_human(&markup).await, "@bob");
}
