//! Processing cursor: the highest message id already acted upon.
//!
//! Persisted after every processed message so a restart never reprocesses
//! old commands. The serialized form matches the on-flash document:
//! `{"last_message_processed": N}`.

use serde::{Deserialize, Serialize};

/// Monotonically non-decreasing message-id watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingCursor {
    pub last_message_processed: i64,
}

impl ProcessingCursor {
    pub fn new(last_message_processed: i64) -> Self {
        Self {
            last_message_processed,
        }
    }

    /// Whether a message with `id` is new (strictly greater than the
    /// watermark). Equal or smaller ids are stale or duplicate deliveries.
    pub fn is_new(self, id: i64) -> bool {
        id > self.last_message_processed
    }

    /// Advance the watermark to `id`, never moving backwards.
    pub fn advance_to(&mut self, id: i64) {
        self.last_message_processed = self.last_message_processed.max(id);
    }

    /// Parse the persisted document; absent or corrupt content defaults
    /// to zero rather than failing.
    pub fn from_document(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero() {
        assert_eq!(ProcessingCursor::default().last_message_processed, 0);
    }

    #[test]
    fn advance_takes_the_max() {
        let mut c = ProcessingCursor::new(5);
        c.advance_to(3);
        assert_eq!(c.last_message_processed, 5);
        c.advance_to(9);
        assert_eq!(c.last_message_processed, 9);
    }

    #[test]
    fn equal_id_is_not_new() {
        let c = ProcessingCursor::new(7);
        assert!(!c.is_new(7));
        assert!(!c.is_new(6));
        assert!(c.is_new(8));
    }

    #[test]
    fn corrupt_document_defaults_to_zero() {
        assert_eq!(
            ProcessingCursor::from_document("not json").last_message_processed,
            0
        );
        assert_eq!(ProcessingCursor::from_document("").last_message_processed, 0);
    }

    #[test]
    fn document_roundtrip() {
        let c = ProcessingCursor::new(41);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"last_message_processed":41}"#);
        assert_eq!(ProcessingCursor::from_document(&json), c);
    }
}
