//! Configuration for the model diff engine.
//!
//! `DiffConfig` centralizes the behavioral knobs of the expression differ and
//! the report assembler so that callers (CLI, tests, embedding hosts) can tune
//! them without touching the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error_codes;

/// Line differ used when comparing expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<LineDiffAlgorithm> for similar::Algorithm {
    fn from(value: LineDiffAlgorithm) -> Self {
        match value {
            LineDiffAlgorithm::Myers => similar::Algorithm::Myers,
            LineDiffAlgorithm::Patience => similar::Algorithm::Patience,
            LineDiffAlgorithm::Lcs => similar::Algorithm::Lcs,
        }
    }
}

/// Ordering of added/deleted/changed names inside a table or relationship block.
///
/// Table iteration itself always follows document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOrder {
    /// Order of first appearance in the source document.
    #[default]
    Document,
    /// Byte-wise lexicographic order.
    Sorted,
}

pub const DEFAULT_MISSING_EXPRESSION_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub line_diff_algorithm: LineDiffAlgorithm,
    /// Drop inserted/deleted expression lines that are empty or whitespace-only.
    pub ignore_blank_lines: bool,
    /// Single line substituted for an absent `expression` key.
    pub missing_expression_placeholder: String,
    pub name_order: NameOrder,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            line_diff_algorithm: LineDiffAlgorithm::Myers,
            ignore_blank_lines: true,
            missing_expression_placeholder: DEFAULT_MISSING_EXPRESSION_PLACEHOLDER.to_string(),
            name_order: NameOrder::Document,
        }
    }
}

impl DiffConfig {
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder {
            inner: DiffConfig::default(),
        }
    }

    /// Parse a JSON config document; absent fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: DiffConfig = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.missing_expression_placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("[MDIFF_CONFIG_001] missing_expression_placeholder must not be empty")]
    EmptyPlaceholder,
    #[error("[MDIFF_CONFIG_002] invalid config: {message}")]
    Parse { message: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::EmptyPlaceholder => error_codes::CONFIG_EMPTY_PLACEHOLDER,
            ConfigError::Parse { .. } => error_codes::CONFIG_PARSE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffConfigBuilder {
    inner: DiffConfig,
}

impl Default for DiffConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffConfigBuilder {
    pub fn new() -> Self {
        DiffConfig::builder()
    }

    pub fn line_diff_algorithm(mut self, value: LineDiffAlgorithm) -> Self {
        self.inner.line_diff_algorithm = value;
        self
    }

    pub fn ignore_blank_lines(mut self, value: bool) -> Self {
        self.inner.ignore_blank_lines = value;
        self
    }

    pub fn missing_expression_placeholder(mut self, value: impl Into<String>) -> Self {
        self.inner.missing_expression_placeholder = value.into();
        self
    }

    pub fn name_order(mut self, value: NameOrder) -> Self {
        self.inner.name_order = value;
        self
    }

    pub fn build(self) -> Result<DiffConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_na_placeholder_and_document_order() {
        let cfg = DiffConfig::default();
        assert_eq!(cfg.missing_expression_placeholder, "N/A");
        assert_eq!(cfg.name_order, NameOrder::Document);
        assert_eq!(cfg.line_diff_algorithm, LineDiffAlgorithm::Myers);
        assert!(cfg.ignore_blank_lines);
    }

    #[test]
    fn serde_roundtrip_preserves_defaults() {
        let cfg = DiffConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize default config");
        let parsed: DiffConfig = serde_json::from_str(&json).expect("deserialize default config");
        assert_eq!(cfg, parsed);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let text = r#"{ "name_order": "sorted", "line_diff_algorithm": "patience" }"#;
        let cfg = DiffConfig::from_json_str(text).expect("partial config");
        assert_eq!(cfg.name_order, NameOrder::Sorted);
        assert_eq!(cfg.line_diff_algorithm, LineDiffAlgorithm::Patience);
        assert!(cfg.ignore_blank_lines);
        assert_eq!(cfg.missing_expression_placeholder, "N/A");
    }

    #[test]
    fn builder_rejects_empty_placeholder() {
        let err = DiffConfig::builder()
            .missing_expression_placeholder("")
            .build()
            .expect_err("empty placeholder must be rejected");
        assert_eq!(err, ConfigError::EmptyPlaceholder);
        assert_eq!(err.code(), error_codes::CONFIG_EMPTY_PLACEHOLDER);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DiffConfig::from_json_str("{ not json").expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
