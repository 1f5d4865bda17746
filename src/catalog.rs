//! Type Catalog
//!
//! Typed access to the sixteen type descriptors and their compatibility
//! tables. The descriptor copy itself is reference data maintained outside
//! this crate and loaded from JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::scoring::TypeCode;

const AVERAGE_POINTS: &str =
    "Neither a great nor a poor match. Respecting each other's differences goes a long way.";
const AVERAGE_TIPS: &str = "A shared goal makes it easier to cooperate.";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("'{0}' is not a valid type code")]
    InvalidKey(String),
}

/// A pairing note inside a descriptor's compatibility table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityNote {
    #[serde(rename = "type")]
    pub type_code: TypeCode,
    pub level: String,
    pub points: String,
    pub tips: String,
}

/// Display record for one of the sixteen types
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub stereotype: String,
    pub tagline: String,
    pub image: String,
    pub color: String,
    pub compatible: Vec<CompatibilityNote>,
    pub incompatible: Vec<CompatibilityNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Same,
    Good,
    Bad,
    Average,
}

/// Outcome of checking one type against another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    pub verdict: Verdict,
    pub level: String,
    pub points: String,
    pub tips: String,
}

impl Compatibility {
    fn from_note(verdict: Verdict, note: &CompatibilityNote) -> Self {
        Self {
            verdict,
            level: note.level.clone(),
            points: note.points.clone(),
            tips: note.tips.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<TypeCode, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, TypeDescriptor> = serde_json::from_str(json)
            .context("Failed to deserialize type catalog")?;

        let mut types = HashMap::with_capacity(raw.len());
        for (key, descriptor) in raw {
            let code: TypeCode = key
                .parse()
                .map_err(|_| CatalogError::InvalidKey(key.clone()))?;
            types.insert(code, descriptor);
        }
        Ok(Self { types })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read type catalog {}", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, code: &TypeCode) -> Option<&TypeDescriptor> {
        self.types.get(code)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// How `a` sees a pairing with `b`. `None` when `a` has no descriptor.
    pub fn compatibility(&self, a: &TypeCode, b: &TypeCode) -> Option<Compatibility> {
        if a == b {
            return Some(Compatibility {
                verdict: Verdict::Same,
                level: "Self".to_string(),
                points: "Self-understanding".to_string(),
                tips: "You always need to keep a dialogue going with yourself.".to_string(),
            });
        }

        let descriptor = self.types.get(a)?;
        if let Some(note) = descriptor.compatible.iter().find(|n| n.type_code == *b) {
            return Some(Compatibility::from_note(Verdict::Good, note));
        }
        if let Some(note) = descriptor.incompatible.iter().find(|n| n.type_code == *b) {
            return Some(Compatibility::from_note(Verdict::Bad, note));
        }

        Some(Compatibility {
            verdict: Verdict::Average,
            level: "Average".to_string(),
            points: AVERAGE_POINTS.to_string(),
            tips: AVERAGE_TIPS.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "MACI": {
            "name": "The Scholar",
            "desc": "Quiet depth",
            "stereotype": "Lives in the library.",
            "compatible": [
                { "type": "MSCI", "level": "Great", "points": "Shared focus", "tips": "Study together" }
            ],
            "incompatible": [
                { "type": "PSUN", "level": "Rough", "points": "Different pace", "tips": "Agree on a schedule" }
            ]
        },
        "MSCI": { "name": "The Strategist" }
    }"#;

    fn code(s: &str) -> TypeCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_load_and_get() {
        let catalog = TypeCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&code("MACI")).unwrap().name, "The Scholar");
        assert_eq!(catalog.get(&code("MSCI")).unwrap().description, "");
        assert!(catalog.get(&code("PSUN")).is_none());
    }

    #[test]
    fn test_rejects_invalid_keys() {
        let err = TypeCatalog::from_json_str(r#"{ "ABCD": { "name": "x" } }"#).unwrap_err();
        assert!(err.to_string().contains("ABCD"));
    }

    #[test]
    fn test_compatibility_verdicts() {
        let catalog = TypeCatalog::from_json_str(CATALOG).unwrap();

        let same = catalog.compatibility(&code("PSUN"), &code("PSUN")).unwrap();
        assert_eq!(same.verdict, Verdict::Same);

        let good = catalog.compatibility(&code("MACI"), &code("MSCI")).unwrap();
        assert_eq!(good.verdict, Verdict::Good);
        assert_eq!(good.level, "Great");

        let bad = catalog.compatibility(&code("MACI"), &code("PSUN")).unwrap();
        assert_eq!(bad.verdict, Verdict::Bad);

        let average = catalog.compatibility(&code("MACI"), &code("PACN")).unwrap();
        assert_eq!(average.verdict, Verdict::Average);

        assert!(catalog.compatibility(&code("PACN"), &code("MACI")).is_none());
    }
}
