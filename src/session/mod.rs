//! Session Persistence
//!
//! Keeps an in-progress or finished quiz alive across reloads. The
//! record holds the shuffled item order, the answers so far, the current
//! step and the start/completion flags.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::SessionStore;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bank::QuestionBank;
use crate::scoring::Responses;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The stored record cannot be trusted. Callers of `load` only ever
    /// see this as "no saved state".
    #[error("corrupt session state: {0}")]
    CorruptState(String),
    #[error("failed to serialize session state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("session storage failure: {0}")]
    Storage(#[from] StorageError),
}

/// Persisted snapshot of one user's quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Permutation of the bank's item ids, fixed for the session
    #[serde(rename = "order")]
    pub item_order: Vec<String>,
    #[serde(rename = "answers")]
    pub responses: Responses,
    #[serde(default, rename = "currentStep")]
    pub current_step: usize,
    #[serde(default, rename = "hasStarted")]
    pub has_started: bool,
    #[serde(default, rename = "showResult")]
    pub is_complete: bool,
}

impl SessionState {
    /// A new session with a uniformly shuffled item order.
    pub fn fresh<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Self {
        let mut order = bank.ids();
        order.shuffle(rng);
        Self::with_order(order)
    }

    pub fn with_order(item_order: Vec<String>) -> Self {
        Self {
            item_order,
            responses: Responses::new(),
            current_step: 0,
            has_started: false,
            is_complete: false,
        }
    }

    pub fn is_answered(&self, id: &str) -> bool {
        self.responses.contains_key(id)
    }
}
