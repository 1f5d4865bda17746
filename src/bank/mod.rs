//! Question Bank Module
//!
//! The ordered, immutable list of Likert statements the quiz asks.
//! Each item belongs to exactly one axis and declares which pole
//! agreeing with it points towards.

pub mod axis;
mod builtin;

pub use axis::{Axis, Pole};

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// A single assessment statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub axis: Axis,
    /// Pole that agreeing with the statement points towards
    pub agree_side: Pole,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, axis: Axis, agree_side: Pole) -> Self {
        Self {
            id: id.into(),
            axis,
            agree_side,
            text: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum BankError {
    #[error("question bank must contain at least one item")]
    Empty,
    #[error("duplicate item id '{0}'")]
    DuplicateId(String),
}

/// On-disk layout of a bank file
#[derive(Debug, Deserialize)]
struct BankFile {
    items: Vec<Item>,
}

lazy_static! {
    static ref BUILTIN: Arc<QuestionBank> = Arc::new(QuestionBank {
        index: index_of(&builtin::items()),
        items: builtin::items(),
    });
}

fn index_of(items: &[Item]) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.clone(), i))
        .collect()
}

/// Fixed, ordered set of items with unique ids
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    pub fn new(items: Vec<Item>) -> Result<Self, BankError> {
        if items.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(BankError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self {
            index: index_of(&items),
            items,
        })
    }

    /// The bank shipped with the crate, built once per process.
    pub fn builtin() -> Arc<QuestionBank> {
        BUILTIN.clone()
    }

    /// Parse a bank from `{ "items": [...] }` JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: BankFile = serde_json::from_str(json)
            .context("Failed to deserialize question bank")?;
        Ok(Self::new(file.items)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Item ids in bank order
    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn items_for(&self, axis: Axis) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.axis == axis)
    }

    /// Number of pages when showing `page_size` items per step.
    pub fn step_count(&self, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        self.items.len().div_ceil(page_size)
    }
}
