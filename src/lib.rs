//! UniType Quiz Core
//!
//! The scoring and resume engine behind a 16-type personality quiz:
//! - Static question bank tagged by axis and polarity
//! - Pure axis scoring and sign-based type classification
//! - Fail-closed session persistence over a pluggable key-value backend
//! - Step flow helpers for the presentation layer
//! - Type catalog lookups and share links

pub mod bank;
pub mod scoring;
pub mod catalog;
pub mod share;
pub mod session;
pub mod quiz;
pub mod config;
pub mod utils;

// Re-exports for convenience
pub use bank::{Axis, Item, Pole, QuestionBank};
pub use scoring::{assess, classify, score, Assessment, AxisScores, Responses, TypeCode};
pub use session::{FileStorage, KeyValueStorage, MemoryStorage, SessionState, SessionStore};
pub use quiz::Quiz;
pub use config::QuizConfig;
