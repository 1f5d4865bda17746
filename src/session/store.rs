//! Session Store - load, save and clear the persisted quiz record
//!
//! Loading fails closed: a record that cannot be parsed, or whose item
//! order no longer matches the live question bank, is discarded so the
//! caller starts a fresh session instead of silently skipping new items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{KeyValueStorage, SessionError, SessionState};
use crate::bank::QuestionBank;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedRecord {
    #[serde(flatten)]
    state: SessionState,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedRecordRef<'a> {
    #[serde(flatten)]
    state: &'a SessionState,
    saved_at: DateTime<Utc>,
}

pub struct SessionStore<S: KeyValueStorage> {
    backend: S,
    key: String,
    bank: Arc<QuestionBank>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(backend: S, key: impl Into<String>, bank: Arc<QuestionBank>) -> Self {
        Self {
            backend,
            key: key.into(),
            bank,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Saved state, or `None` when nothing usable is stored.
    pub fn load(&self) -> Option<SessionState> {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!("Discarding saved session '{}': {}", self.key, e);
                None
            }
        }
    }

    /// Like [`load`](Self::load) but reports why a record was rejected.
    pub fn try_load(&self) -> Result<Option<SessionState>, SessionError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            debug!("No saved session under '{}'", self.key);
            return Ok(None);
        };

        let record: SavedRecord = serde_json::from_str(&raw)
            .map_err(|e| SessionError::CorruptState(format!("unparsable record: {}", e)))?;

        if let Some(saved_at) = record.saved_at {
            debug!("Session '{}' was last saved at {}", self.key, saved_at);
        }

        let state = self.reconcile(record.state)?;
        info!(
            "Restored session '{}' ({} answers, step {})",
            self.key,
            state.responses.len(),
            state.current_step
        );
        Ok(Some(state))
    }

    /// Resolve the saved order against the live bank and drop answers for
    /// items that no longer exist.
    fn reconcile(&self, mut state: SessionState) -> Result<SessionState, SessionError> {
        let mut seen = HashSet::with_capacity(state.item_order.len());
        let mut order = Vec::with_capacity(self.bank.len());

        for id in state.item_order.drain(..) {
            if !self.bank.contains(&id) {
                debug!("Saved order references unknown item '{}'", id);
                continue;
            }
            if !seen.insert(id.clone()) {
                return Err(SessionError::CorruptState(format!(
                    "item '{}' appears twice in saved order",
                    id
                )));
            }
            order.push(id);
        }

        if order.len() != self.bank.len() {
            return Err(SessionError::CorruptState(format!(
                "saved order resolves to {} items, bank has {}",
                order.len(),
                self.bank.len()
            )));
        }

        let before = state.responses.len();
        state.responses.retain(|id, _| self.bank.contains(id));
        if state.responses.len() != before {
            debug!("Dropped {} answers for retired items", before - state.responses.len());
        }

        state.item_order = order;
        Ok(state)
    }

    /// Overwrite the record. Failures are logged, never returned.
    pub fn save(&self, state: &SessionState) {
        if let Err(e) = self.try_save(state) {
            warn!("Failed to save session '{}': {}", self.key, e);
        }
    }

    pub fn try_save(&self, state: &SessionState) -> Result<(), SessionError> {
        let record = SavedRecordRef {
            state,
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string(&record)?;
        self.backend.set(&self.key, &json)?;
        Ok(())
    }

    /// Delete the record. In-memory state must be regenerated by the caller.
    pub fn clear(&self) {
        match self.backend.remove(&self.key) {
            Ok(()) => info!("Cleared saved session '{}'", self.key),
            Err(e) => warn!("Failed to clear session '{}': {}", self.key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Axis, Item, Pole};
    use crate::session::{MemoryStorage, StorageError};

    const KEY: &str = "test_session";

    fn bank() -> Arc<QuestionBank> {
        Arc::new(
            QuestionBank::new(vec![
                Item::new("1", Axis::MP, Pole::R),
                Item::new("2", Axis::MP, Pole::L),
                Item::new("3", Axis::AS, Pole::R),
            ])
            .unwrap(),
        )
    }

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new(), KEY, bank())
    }

    fn sample_state() -> SessionState {
        let mut state = SessionState::with_order(vec!["3".into(), "1".into(), "2".into()]);
        state.responses.insert("1".into(), 6);
        state.responses.insert("3".into(), 2);
        state.current_step = 1;
        state.has_started = true;
        state
    }

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("quota exceeded").into())
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("read only").into())
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = store();
        let state = sample_state();

        store.save(&state);
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn test_load_missing_is_none() {
        assert_eq!(store().try_load().unwrap(), None);
    }

    #[test]
    fn test_unparsable_record_is_corrupt() {
        let store = store();
        store.backend().set(KEY, "{not json").unwrap();

        assert!(matches!(store.try_load(), Err(SessionError::CorruptState(_))));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_missing_order_or_answers_is_corrupt() {
        let store = store();
        store.backend().set(KEY, r#"{ "answers": {} }"#).unwrap();
        assert!(matches!(store.try_load(), Err(SessionError::CorruptState(_))));

        store.backend().set(KEY, r#"{ "order": ["1", "2", "3"] }"#).unwrap();
        assert!(matches!(store.try_load(), Err(SessionError::CorruptState(_))));
    }

    #[test]
    fn test_stale_order_from_smaller_bank_is_rejected() {
        let store = store();
        store
            .backend()
            .set(KEY, r#"{ "order": ["1", "2"], "answers": { "1": 4 } }"#)
            .unwrap();

        let err = store.try_load().unwrap_err();
        assert!(err.to_string().contains("2 items, bank has 3"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let store = store();
        store
            .backend()
            .set(KEY, r#"{ "order": ["1", "1", "2"], "answers": {} }"#)
            .unwrap();
        assert!(matches!(store.try_load(), Err(SessionError::CorruptState(_))));
    }

    #[test]
    fn test_unknown_ids_are_resolved_away() {
        let store = store();
        store
            .backend()
            .set(
                KEY,
                r#"{ "order": ["old", "2", "3", "1"], "answers": { "old": 1, "2": 0 } }"#,
            )
            .unwrap();

        let state = store.load().unwrap();
        assert_eq!(state.item_order, vec!["2", "3", "1"]);
        assert_eq!(state.responses.len(), 1);
        assert_eq!(state.responses.get("2"), Some(&0));
    }

    #[test]
    fn test_clear_removes_record() {
        let store = store();
        store.save(&sample_state());
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_backend_failures_are_swallowed() {
        let store = SessionStore::new(FailingStorage, KEY, bank());

        store.save(&sample_state());
        store.clear();
        assert_eq!(store.load(), None);
        assert!(matches!(store.try_save(&sample_state()), Err(SessionError::Storage(_))));
    }
}
