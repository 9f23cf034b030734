//! Cursor-file storage.
//!
//! Implements [`CursorStore`] over a JSON file (SPIFFS on target, any
//! filesystem on host — ESP-IDF exposes std fs for the mounted partition).
//! Load is lenient: an absent or corrupt file yields the zero cursor.
//! Save is synchronous and write-through, one write per processed message.

use std::path::PathBuf;

use log::info;

use crate::app::ports::CursorStore;
use crate::cursor::ProcessingCursor;
use crate::error::StorageError;

pub struct FileCursorStore {
    path: PathBuf,
}

impl FileCursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CursorStore for FileCursorStore {
    fn load(&self) -> ProcessingCursor {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => ProcessingCursor::from_document(&raw),
            Err(_) => {
                info!("no valid cursor file at {:?}, starting from 0", self.path);
                ProcessingCursor::default()
            }
        }
    }

    fn save(&mut self, cursor: &ProcessingCursor) -> Result<(), StorageError> {
        let doc = serde_json::to_string(cursor).map_err(|_| StorageError::Serialize)?;
        std::fs::write(&self.path, doc).map_err(|_| StorageError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("homesentry-cursor-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn absent_file_loads_as_zero() {
        let store = FileCursorStore::new(temp_path("absent"));
        assert_eq!(store.load().last_message_processed, 0);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let path = temp_path("roundtrip");
        let mut store = FileCursorStore::new(&path);
        store.save(&ProcessingCursor::new(17)).unwrap();
        assert_eq!(store.load().last_message_processed, 17);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_loads_as_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{{{{").unwrap();
        let store = FileCursorStore::new(&path);
        assert_eq!(store.load().last_message_processed, 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn save_into_missing_directory_is_an_io_error() {
        let mut store = FileCursorStore::new("/nonexistent-dir/cursor.json");
        assert_eq!(
            store.save(&ProcessingCursor::new(1)),
            Err(StorageError::Io)
        );
    }
}
