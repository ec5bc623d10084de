//! Настройки подготовки датасета

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PrepareError, Result};

pub const DEFAULT_DATA_PATH: &str = "data/nepal-earthquake-severity-index-latest.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparerConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default = "default_test_size")]
    pub test_size: f64, // доля тестовой выборки
    #[serde(default = "default_random_state")]
    pub random_state: u32,
}

fn default_data_path() -> PathBuf { PathBuf::from(DEFAULT_DATA_PATH) }
fn default_test_size() -> f64 { 0.3 }
fn default_random_state() -> u32 { 42 }

impl PreparerConfig {
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PrepareError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PrepareError::Config(format!(
                "test_size must lie in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }
}

impl Default for PreparerConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            test_size: default_test_size(),
            random_state: default_random_state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_pipeline() {
        let config = PreparerConfig::default();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.random_state, 42);
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = PreparerConfig::from_json(r#"{ "data_path": "/tmp/quake.csv" }"#).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/quake.csv"));
        assert_eq!(config.random_state, 42);
    }

    #[test]
    fn rejects_out_of_range_test_size() {
        assert!(matches!(
            PreparerConfig::from_json(r#"{ "test_size": 1.0 }"#),
            Err(PrepareError::Config(_))
        ));
        assert!(matches!(
            PreparerConfig::from_json("not json"),
            Err(PrepareError::Config(_))
        ));
    }
}
