//! Property tests for the command/cursor state machine.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use homesentry::app::ports::{
    ChatId, CursorStore, IndicatorPort, InboundMessage, MessagingPort,
};
use homesentry::app::service::MonitorService;
use homesentry::cursor::ProcessingCursor;
use homesentry::error::{CommsError, StorageError};

// ── Minimal mock ports ────────────────────────────────────────

#[derive(Default)]
struct Messenger {
    next_batch: Vec<InboundMessage>,
    sent: Vec<(ChatId, String)>,
}

impl MessagingPort for Messenger {
    fn fetch_inbound(&mut self) -> Result<Vec<InboundMessage>, CommsError> {
        Ok(std::mem::take(&mut self.next_batch))
    }
    fn send(&mut self, chat: ChatId, text: &str) {
        self.sent.push((chat, text.to_string()));
    }
    fn try_send(&mut self, chat: ChatId, text: &str) -> Result<(), CommsError> {
        self.send(chat, text);
        Ok(())
    }
}

#[derive(Default)]
struct Indicators {
    armed: bool,
    disarmed: bool,
}

impl IndicatorPort for Indicators {
    fn set_activity(&mut self, _on: bool) {}
    fn set_alarm_armed(&mut self, armed: bool) {
        self.armed = armed;
        self.disarmed = !armed;
    }
}

#[derive(Default)]
struct Store {
    saved: Vec<i64>,
}

impl CursorStore for Store {
    fn load(&self) -> ProcessingCursor {
        ProcessingCursor::default()
    }
    fn save(&mut self, cursor: &ProcessingCursor) -> Result<(), StorageError> {
        self.saved.push(cursor.last_message_processed);
        Ok(())
    }
}

// ── Strategies ────────────────────────────────────────────────

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/alarmon".to_string()),
        Just("/alarmoff".to_string()),
        Just("/temp".to_string()),
        Just("/humidity".to_string()),
        Just(String::new()),
        "[a-z]{0,8}",
    ]
}

fn arb_message() -> impl Strategy<Value = InboundMessage> {
    (0i64..20, 1i64..5, arb_text()).prop_map(|(id, sender, text)| InboundMessage {
        id,
        sender,
        text,
    })
}

fn run_batch(
    svc: &mut MonitorService,
    messenger: &mut Messenger,
    indicators: &mut Indicators,
    store: &mut Store,
    batch: &[InboundMessage],
) {
    messenger.next_batch = batch.to_vec();
    svc.process_inbound(messenger, indicators, store).unwrap();
}

// ── Properties ────────────────────────────────────────────────

proptest! {
    /// The persisted cursor is always max(initial, processed ids) and every
    /// persisted value is non-decreasing.
    #[test]
    fn cursor_is_monotone_max(
        initial in 0i64..10,
        msgs in proptest::collection::vec(arb_message(), 0..30),
    ) {
        let mut svc = MonitorService::new(vec![1], ProcessingCursor::new(initial));
        let mut messenger = Messenger::default();
        let mut indicators = Indicators::default();
        let mut store = Store::default();

        run_batch(&mut svc, &mut messenger, &mut indicators, &mut store, &msgs);

        let expected = msgs
            .iter()
            .map(|m| m.id)
            .fold(initial, i64::max);
        prop_assert_eq!(svc.cursor_id(), expected);
        prop_assert!(store.saved.windows(2).all(|w| w[0] <= w[1]));
    }

    /// After any message sequence exactly one alarm indicator is lit.
    #[test]
    fn alarm_indicators_stay_exclusive(
        msgs in proptest::collection::vec(arb_message(), 1..30),
    ) {
        let mut svc = MonitorService::new(vec![1], ProcessingCursor::default());
        let mut messenger = Messenger::default();
        let mut indicators = Indicators::default();
        let mut store = Store::default();
        svc.start(&mut indicators);

        for m in &msgs {
            run_batch(&mut svc, &mut messenger, &mut indicators, &mut store,
                      std::slice::from_ref(m));
            prop_assert!(indicators.armed ^ indicators.disarmed);
            prop_assert_eq!(indicators.armed, svc.is_armed());
        }
    }

    /// Redelivering an already-processed batch changes nothing and sends
    /// nothing (duplicate rejection).
    #[test]
    fn redelivery_is_a_no_op(
        msgs in proptest::collection::vec(arb_message(), 0..20),
    ) {
        let mut svc = MonitorService::new(vec![1, 2], ProcessingCursor::default());
        let mut messenger = Messenger::default();
        let mut indicators = Indicators::default();
        let mut store = Store::default();

        run_batch(&mut svc, &mut messenger, &mut indicators, &mut store, &msgs);
        let armed = svc.is_armed();
        let cursor = svc.cursor_id();
        let sends = messenger.sent.len();

        run_batch(&mut svc, &mut messenger, &mut indicators, &mut store, &msgs);
        prop_assert_eq!(svc.is_armed(), armed);
        prop_assert_eq!(svc.cursor_id(), cursor);
        prop_assert_eq!(messenger.sent.len(), sends);
    }

    /// Messages with ids at or below the cursor never mutate any state.
    #[test]
    fn stale_ids_never_mutate_state(
        cursor in 20i64..40,
        msgs in proptest::collection::vec(arb_message(), 0..20),
    ) {
        // arb_message ids are < 20, so all are stale against this cursor.
        let mut svc = MonitorService::new(vec![1], ProcessingCursor::new(cursor));
        let mut messenger = Messenger::default();
        let mut indicators = Indicators::default();
        let mut store = Store::default();

        run_batch(&mut svc, &mut messenger, &mut indicators, &mut store, &msgs);

        prop_assert!(!svc.is_armed());
        prop_assert_eq!(svc.cursor_id(), cursor);
        prop_assert!(messenger.sent.is_empty());
        prop_assert!(store.saved.is_empty());
    }
}
