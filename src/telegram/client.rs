//! Telegram HTTP transport.
//!
//! Implements [`MessagingPort`]: one `getUpdates` GET per fetch, one
//! `sendMessage` request per outbound message. Sends are best effort with
//! no structured response consumed and no retry.
//!
//! ## Dual-target design
//!
//! - **`target_os = "espidf"`**: `esp-idf-svc` HTTP client over TLS with
//!   the bundled CA store.
//! - **all other targets**: a scripted simulation — tests inject inbound
//!   batches (or errors) and inspect recorded outbound messages.

use log::warn;

use crate::app::ports::{ChatId, InboundMessage, MessagingPort};
use crate::error::CommsError;
#[cfg(target_os = "espidf")]
use crate::telegram::api;

pub struct TelegramClient {
    api_key: String,
    #[cfg(not(target_os = "espidf"))]
    sim: SimState,
}

impl TelegramClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            #[cfg(not(target_os = "espidf"))]
            sim: SimState::default(),
        }
    }

    // ── ESP-IDF transport ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn http_get(&self, url: &str) -> Result<String, CommsError> {
        use embedded_svc::http::client::Client;
        use embedded_svc::io::Read;
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        let conn = EspHttpConnection::new(&Configuration {
            use_global_ca_store: true,
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        })
        .map_err(|_| CommsError::Transport)?;
        let mut client = Client::wrap(conn);

        let request = client.get(url).map_err(|_| CommsError::Transport)?;
        let mut response = request.submit().map_err(|_| CommsError::Transport)?;
        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(CommsError::HttpStatus(status));
        }

        let mut body = Vec::new();
        let mut buf = [0u8; 512];
        loop {
            let n = response.read(&mut buf).map_err(|_| CommsError::Transport)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&buf[..n]);
        }
        String::from_utf8(body).map_err(|_| CommsError::MalformedResponse)
    }
}

// ───────────────────────────────────────────────────────────────
// MessagingPort
// ───────────────────────────────────────────────────────────────

impl MessagingPort for TelegramClient {
    #[cfg(target_os = "espidf")]
    fn fetch_inbound(&mut self) -> Result<Vec<InboundMessage>, CommsError> {
        let body = self.http_get(&api::updates_url(&self.api_key))?;
        api::parse_updates(&body)
    }

    #[cfg(not(target_os = "espidf"))]
    fn fetch_inbound(&mut self) -> Result<Vec<InboundMessage>, CommsError> {
        self.sim.inbound.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn send(&mut self, chat: ChatId, text: &str) {
        if let Err(e) = self.try_send(chat, text) {
            warn!("send to {chat} failed ({e}), dropping message");
        }
    }

    #[cfg(target_os = "espidf")]
    fn try_send(&mut self, chat: ChatId, text: &str) -> Result<(), CommsError> {
        // Response body is not consumed — fire and forget.
        self.http_get(&api::send_url(&self.api_key, chat, text))?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn try_send(&mut self, chat: ChatId, text: &str) -> Result<(), CommsError> {
        if self.sim.fail_sends {
            return Err(CommsError::Transport);
        }
        self.sim.sent.push((chat, text.to_string()));
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
struct SimState {
    inbound: std::collections::VecDeque<Result<Vec<InboundMessage>, CommsError>>,
    sent: Vec<(ChatId, String)>,
    fail_sends: bool,
}

#[cfg(not(target_os = "espidf"))]
impl TelegramClient {
    /// Queue a batch for the next `fetch_inbound` call.
    pub fn sim_push_batch(&mut self, batch: Vec<InboundMessage>) {
        self.sim.inbound.push_back(Ok(batch));
    }

    /// Queue a fetch failure for the next `fetch_inbound` call.
    pub fn sim_push_error(&mut self, error: CommsError) {
        self.sim.inbound.push_back(Err(error));
    }

    /// Make every send fail (exercises fire-and-forget suppression).
    pub fn sim_fail_sends(&mut self, fail: bool) {
        self.sim.fail_sends = fail;
    }

    /// Outbound messages recorded so far, in send order.
    pub fn sim_sent(&self) -> &[(ChatId, String)] {
        &self.sim.sent
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn fetch_with_empty_script_yields_empty_batch() {
        let mut c = TelegramClient::new("KEY");
        assert_eq!(c.fetch_inbound().unwrap(), Vec::new());
    }

    #[test]
    fn scripted_batches_come_back_in_order() {
        let mut c = TelegramClient::new("KEY");
        c.sim_push_batch(vec![InboundMessage {
            id: 1,
            sender: 9,
            text: "/temp".into(),
        }]);
        c.sim_push_error(CommsError::Transport);
        assert_eq!(c.fetch_inbound().unwrap()[0].id, 1);
        assert_eq!(c.fetch_inbound(), Err(CommsError::Transport));
        assert!(c.fetch_inbound().unwrap().is_empty());
    }

    #[test]
    fn send_is_recorded() {
        let mut c = TelegramClient::new("KEY");
        c.send(42, "hello");
        assert_eq!(c.sim_sent(), &[(42, "hello".to_string())]);
    }

    #[test]
    fn failed_send_is_swallowed_but_try_send_surfaces() {
        let mut c = TelegramClient::new("KEY");
        c.sim_fail_sends(true);
        c.send(42, "dropped");
        assert!(c.sim_sent().is_empty());
        assert_eq!(c.try_send(42, "x"), Err(CommsError::Transport));
    }
}
