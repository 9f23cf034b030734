//! Bot API wire layer — pure functions, fully host-tested.
//!
//! Parsing is deliberately lenient: every field defaults, so a malformed
//! update degrades to an empty-text message with id 0 (which the cursor
//! then ignores as stale) instead of rejecting the whole batch.

use serde::Deserialize;

use crate::app::ports::{ChatId, InboundMessage};
use crate::error::CommsError;

pub const API_BASE: &str = "https://api.telegram.org";

// ───────────────────────────────────────────────────────────────
// Wire types
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct UpdatesResponse {
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Default, Deserialize)]
struct Update {
    #[serde(default)]
    message: WireMessage,
}

#[derive(Debug, Default, Deserialize)]
struct WireMessage {
    #[serde(default)]
    message_id: i64,
    #[serde(default)]
    from: WireSender,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireSender {
    #[serde(default)]
    id: ChatId,
}

// ───────────────────────────────────────────────────────────────
// Parsing
// ───────────────────────────────────────────────────────────────

/// Deserialize a `getUpdates` response body into inbound messages, in the
/// order delivered by the backend.
pub fn parse_updates(body: &str) -> Result<Vec<InboundMessage>, CommsError> {
    let parsed: UpdatesResponse =
        serde_json::from_str(body).map_err(|_| CommsError::MalformedResponse)?;
    Ok(parsed
        .result
        .into_iter()
        .map(|u| InboundMessage {
            id: u.message.message_id,
            sender: u.message.from.id,
            text: u.message.text,
        })
        .collect())
}

// ───────────────────────────────────────────────────────────────
// URL building
// ───────────────────────────────────────────────────────────────

pub fn updates_url(api_key: &str) -> String {
    format!("{API_BASE}/bot{api_key}/getUpdates")
}

pub fn send_url(api_key: &str, chat: ChatId, text: &str) -> String {
    format!(
        "{API_BASE}/bot{api_key}/sendMessage?chat_id={chat}&text={}",
        encode_query(text)
    )
}

/// Percent-encode a query value. Unreserved characters pass through,
/// everything else becomes `%XX`.
fn encode_query(value: &str) -> String {
    use core::fmt::Write;

    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            // Writing into a String cannot fail.
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}
