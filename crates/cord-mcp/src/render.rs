//! Text rendering of tool outcomes
//!
//! Every tool answers with plain text aimed at a language model: successes
//! carry the ids needed for follow-up calls, failures start with `ERROR:`
//! and say what to try instead. Domain failures are tool output, not
//! JSON-RPC errors, so the model can read and react to them.

use std::fmt::Write as _;

use cord_core::{Candidate, Channel, EntityKind, Guild, ResolveError, ResolvedEntity};
use cord_service::services::message::{
    ChannelHistory, Destination, EditOutcome, ReactionReceipt, SearchResults, SendReceipt,
};
use cord_service::ServiceError;

pub fn render_send(receipt: &SendReceipt) -> String {
    match &receipt.destination {
        Destination::Channel {
            name,
            guild_name: Some(guild),
        } => format!(
            "Message sent to #{name} in {guild} (Message ID: {})",
            receipt.message_id
        ),
        Destination::Channel {
            name,
            guild_name: None,
        } => format!("Message sent to #{name} (Message ID: {})", receipt.message_id),
        Destination::Dm { username } => {
            format!("DM sent to {username} (Message ID: {})", receipt.message_id)
        }
    }
}

pub fn render_edit(outcome: &EditOutcome) -> String {
    match outcome {
        EditOutcome::Edited {
            message_id,
            channel_name,
        } => format!("Message {message_id} edited successfully in #{channel_name}"),
        EditOutcome::Deleted {
            message_id,
            channel_name,
        } => format!("Message {message_id} deleted successfully from #{channel_name}"),
    }
}

pub fn render_history(history: &ChannelHistory) -> String {
    let header = &history.header;
    let mut out = String::new();
    let _ = writeln!(out, "Channel: #{}", header.name);
    let _ = writeln!(out, "ID: {}", header.id);
    let _ = writeln!(out, "Type: {}", header.kind_label);
    if let Some(topic) = &header.topic {
        let _ = writeln!(out, "Topic: {topic}");
    }
    if let Some(guild) = &header.guild_name {
        let _ = writeln!(out, "Server: {guild}");
    }
    let _ = writeln!(out, "{}", "=".repeat(50));

    if history.messages.is_empty() {
        out.push_str("No messages in this channel yet.");
        return out;
    }
    for message in &history.messages {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.author,
            message.content
        );
        let _ = writeln!(out, "  (ID: {})", message.id);
    }
    out.trim_end().to_string()
}

pub fn render_search(results: &SearchResults) -> String {
    if results.matches.is_empty() {
        return format!(
            "No messages matching '{}' found in the last {} messages of #{}.",
            results.query, results.scanned, results.channel_name
        );
    }
    let mut out = format!(
        "Found {} messages matching '{}' in #{}:\n\n",
        results.matches.len(),
        results.query,
        results.channel_name
    );
    for message in &results.matches {
        let _ = writeln!(
            out,
            "[{}] {}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M:%S"),
            message.author,
            message.content
        );
        let _ = writeln!(out, "  (ID: {})", message.id);
    }
    out.trim_end().to_string()
}

pub fn render_reaction(receipt: &ReactionReceipt) -> String {
    format!(
        "Added reaction {} to message {} in #{}",
        receipt.emoji, receipt.message_id, receipt.channel_name
    )
}

pub fn render_servers(guilds: &[Guild]) -> String {
    if guilds.is_empty() {
        return "Not connected to any servers.".to_string();
    }
    let mut out = format!("Connected to {} servers:\n", guilds.len());
    for guild in guilds {
        let _ = write!(out, "\n• {}\n  ID: {}", guild.name, guild.id);
        match guild.member_count {
            Some(count) => {
                let _ = write!(out, "\n  Members: {count}");
            }
            None => {
                let _ = write!(out, "\n  Members: unknown");
            }
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub fn render_channels(server: &ResolvedEntity, channels: &[Channel]) -> String {
    let mut out = format!("Channels in {}:\n", server.display_name);
    let mut listed = 0;
    for channel in channels {
        if channel.name.is_none() {
            continue;
        }
        let _ = write!(
            out,
            "\n  • #{} ({}) - ID: {}",
            channel.display_name(),
            channel.kind.label(),
            channel.id
        );
        listed += 1;
    }
    if listed == 0 {
        out.push_str("\n  (no channels visible)");
    }
    out
}

pub fn render_service_error(err: &ServiceError) -> String {
    match err {
        ServiceError::Resolve(resolve) => render_resolve_error(resolve),
        ServiceError::TargetNotFound {
            target,
            channel_error,
            user_error,
        } => format!(
            "ERROR: Could not find channel or user '{target}'.\n\n\
             Channel lookup failed: {}\n\n\
             User lookup failed: {}",
            render_resolve_error(channel_error),
            render_resolve_error(user_error)
        ),
        ServiceError::MessageNotFound(id) => format!(
            "ERROR: Could not find message with ID {id} in any channel I can read."
        ),
        ServiceError::Validation(msg) => format!("ERROR: {msg}"),
        ServiceError::Gateway(gateway) => format!("ERROR: Discord request failed: {gateway}"),
    }
}

pub fn render_resolve_error(err: &ResolveError) -> String {
    match err {
        ResolveError::InvalidFormat(detail) => {
            format!("ERROR: Invalid target format: {detail}. Use 'Name', 'ServerName/Name', or an ID.")
        }
        ResolveError::NotFound { kind, token } => {
            format!(
                "ERROR: Could not find {kind} '{token}'. {}",
                not_found_hint(*kind)
            )
        }
        ResolveError::Ambiguous {
            kind,
            token,
            candidates,
        } => render_ambiguous(*kind, token, candidates),
        ResolveError::Gateway(gateway) => format!("ERROR: Discord request failed: {gateway}"),
    }
}

fn not_found_hint(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Server => "Check the server name or use the server ID.",
        EntityKind::Channel => {
            "Check the channel name, try 'ServerName/channel-name', or use the channel ID."
        }
        EntityKind::User => {
            "Check the username, display name, or nickname, or use the user ID."
        }
    }
}

fn render_ambiguous(kind: EntityKind, token: &str, candidates: &[Candidate]) -> String {
    let mut out = format!("ERROR: Multiple {kind}s named '{token}' found in different servers:\n");
    for candidate in candidates {
        let shown = match kind {
            EntityKind::Channel => format!("#{}", candidate.display_name),
            _ => candidate.display_name.clone(),
        };
        let _ = writeln!(out, "  • {} → {shown}", candidate.guild_name);
    }
    let _ = write!(
        out,
        "\nYou MUST specify which server using format 'ServerName/{token}' or use the {kind} ID."
    );
    out
}
