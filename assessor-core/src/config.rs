use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cost::EstimatorConfig;
use crate::error::{AssessorError, Result};

pub const DEFAULT_REFERENCE_PATH: &str = "model_reference.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Warnings and errors are also appended here when set.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    pub reference_path: PathBuf,
    pub estimator: EstimatorConfig,
    pub logging: LoggingConfig,
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            estimator: EstimatorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AssessorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Defaults when no file is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_path.as_os_str().is_empty() {
            return Err(AssessorError::InvalidConfig(
                "reference_path must not be empty".to_string(),
            ));
        }
        self.estimator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AssessorConfig::from_toml("").unwrap();
        assert_eq!(config, AssessorConfig::default());
        assert_eq!(config.estimator.default_video_rate, 0.05);
        assert_eq!(config.estimator.image_output_tokens, 512);
    }

    #[test]
    fn test_partial_override() {
        let config = AssessorConfig::from_toml(
            r#"
            reference_path = "data/models.csv"

            [estimator]
            default_video_rate = 0.2

            [logging]
            level = "debug"
            log_file = "amm_error_log.txt"
            "#,
        )
        .unwrap();
        assert_eq!(config.reference_path, PathBuf::from("data/models.csv"));
        assert_eq!(config.estimator.default_video_rate, 0.2);
        assert_eq!(config.estimator.bytes_per_token, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_file, Some(PathBuf::from("amm_error_log.txt")));
        assert!(!config.logging.json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            AssessorConfig::from_toml("[estimator]\nbytes_per_token = 0\n"),
            Err(AssessorError::InvalidConfig(_))
        ));
        assert!(matches!(
            AssessorConfig::from_toml("reference_path = \"\"\n"),
            Err(AssessorError::InvalidConfig(_))
        ));
        assert!(matches!(
            AssessorConfig::from_toml("[estimator]\nbytes_per_token = \"four\"\n"),
            Err(AssessorError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("amm.toml");
        std::fs::write(&path, "[estimator]\noutput_ratio = 0.25\n").unwrap();
        let config = AssessorConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.estimator.output_ratio, 0.25);
        assert_eq!(AssessorConfig::load_or_default(None).unwrap(), AssessorConfig::default());
        assert!(matches!(
            AssessorConfig::load(&dir.path().join("missing.toml")),
            Err(AssessorError::Io(_))
        ));
    }
}
