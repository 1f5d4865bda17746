//! Runtime configuration
//!
//! Values come from the environment (after loading a `.env` file when one
//! is present). Empty variables count as unset.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::bank::QuestionBank;
use crate::catalog::TypeCatalog;
use crate::session::{FileStorage, SessionStore};

pub const DEFAULT_STORAGE_KEY: &str = "unitype16_mvp_storage_v1";
pub const DEFAULT_PAGE_SIZE: usize = 4;
pub const DEFAULT_DATA_DIR: &str = ".unitype";

pub const ENV_STORAGE_KEY: &str = "UNITYPE_STORAGE_KEY";
pub const ENV_PAGE_SIZE: &str = "UNITYPE_PAGE_SIZE";
pub const ENV_DATA_DIR: &str = "UNITYPE_DATA_DIR";
pub const ENV_BANK_PATH: &str = "UNITYPE_BANK_PATH";
pub const ENV_CATALOG_PATH: &str = "UNITYPE_CATALOG_PATH";

#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Name of the persisted session slot
    pub storage_key: String,
    /// Items shown per step
    pub page_size: usize,
    /// Directory backing the file storage
    pub data_dir: PathBuf,
    /// Question bank JSON; the built-in bank is used when unset
    pub bank_path: Option<PathBuf>,
    /// Type descriptor JSON
    pub catalog_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bank_path: None,
            catalog_path: None,
        }
    }
}

impl QuizConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let page_size = match var(ENV_PAGE_SIZE) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{} must be a positive integer, got '{}'", ENV_PAGE_SIZE, raw))?,
            None => defaults.page_size,
        };
        if page_size == 0 {
            bail!("{} must be at least 1", ENV_PAGE_SIZE);
        }

        Ok(Self {
            storage_key: var(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            page_size,
            data_dir: var(ENV_DATA_DIR).map(PathBuf::from).unwrap_or(defaults.data_dir),
            bank_path: var(ENV_BANK_PATH).map(PathBuf::from),
            catalog_path: var(ENV_CATALOG_PATH).map(PathBuf::from),
        })
    }

    pub fn load_bank(&self) -> Result<Arc<QuestionBank>> {
        match &self.bank_path {
            Some(path) => Ok(Arc::new(QuestionBank::from_path(path)?)),
            None => Ok(QuestionBank::builtin()),
        }
    }

    pub fn load_catalog(&self) -> Result<Option<TypeCatalog>> {
        self.catalog_path
            .as_ref()
            .map(TypeCatalog::from_path)
            .transpose()
    }

    pub fn open_store(&self, bank: Arc<QuestionBank>) -> SessionStore<FileStorage> {
        SessionStore::new(FileStorage::new(&self.data_dir), &self.storage_key, bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = QuizConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.storage_key, "unitype16_mvp_storage_v1");
    }

    #[test]
    fn test_overrides() {
        let config = QuizConfig::from_lookup(lookup(&[
            (ENV_STORAGE_KEY, "custom_key"),
            (ENV_PAGE_SIZE, " 6 "),
            (ENV_DATA_DIR, "/tmp/quiz"),
            (ENV_CATALOG_PATH, "types.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "custom_key");
        assert_eq!(config.page_size, 6);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quiz"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("types.json")));
        assert_eq!(config.bank_path, None);
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = QuizConfig::from_lookup(lookup(&[(ENV_STORAGE_KEY, "")])).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_page_size() {
        assert!(QuizConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "0")])).is_err());
        assert!(QuizConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "four")])).is_err());
    }

    #[test]
    fn test_builtin_bank_without_path() {
        let bank = QuizConfig::default().load_bank().unwrap();
        assert_eq!(bank.len(), QuestionBank::builtin().len());
        assert!(QuizConfig::default().load_catalog().unwrap().is_none());
    }
}
