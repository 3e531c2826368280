//! Encoder and logging configuration.
//!
//! The encoding rules themselves are compiled in. Configuration only opts in
//! to behaviour that differs from the default:
//!
//! - a [`CountPolicy`] for malformed count cells
//! - fixed one-hot vocabularies, for callers that need the same output schema
//!   across batches
//!
//! `EncoderConfig::default()` reproduces the fixed behaviour exactly.

use crate::encoding::columns::{CATEGORICAL_COLUMNS, UNKNOWN_LABEL};
use crate::error::{EncodeError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What the orchestrator does with a count cell that does not parse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Abort the whole call with [`EncodeError::InvalidCount`].
    #[default]
    Fail,
    /// Encode the cell as missing (`-1`) and record it in the report.
    TreatAsMissing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EncoderConfig {
    pub count_policy: CountPolicy,

    /// Fixed category list per categorical column. Columns without an entry
    /// use the categories observed in the batch.
    pub vocabularies: BTreeMap<String, Vec<String>>,
}

impl EncoderConfig {
    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read encoder config {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).context("Failed to write encoder config")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialise encoder config")
    }

    #[must_use]
    pub fn with_count_policy(mut self, policy: CountPolicy) -> Self {
        self.count_policy = policy;
        self
    }

    /// Pins the one-hot categories of `column`.
    #[must_use]
    pub fn with_vocabulary<I, S>(mut self, column: &str, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabularies.insert(
            column.to_owned(),
            categories.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.vocabularies.get(column).map(Vec::as_slice)
    }

    /// Checks that every vocabulary targets a categorical column, is not
    /// empty, and lists each category once.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for (column, categories) in &self.vocabularies {
            if !CATEGORICAL_COLUMNS.contains(&column.as_str()) {
                return Err(EncodeError::Config(format!(
                    "'{column}' is not a categorical column"
                )));
            }
            if categories.is_empty() {
                return Err(EncodeError::Config(format!(
                    "Vocabulary for '{column}' is empty"
                )));
            }
            let mut seen = std::collections::BTreeSet::new();
            if let Some(dup) = categories.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(EncodeError::Config(format!(
                    "Vocabulary for '{column}' lists '{dup}' more than once"
                )));
            }
        }
        Ok(())
    }

    /// Output categories for `column` under its fixed vocabulary: the
    /// vocabulary in order, then the unknown label if it was not listed.
    pub(crate) fn fixed_categories(&self, column: &str) -> Option<Vec<String>> {
        self.vocabulary(column).map(|vocab| {
            let mut categories = vocab.to_vec();
            if !categories.iter().any(|c| c == UNKNOWN_LABEL) {
                categories.push(UNKNOWN_LABEL.to_owned());
            }
            categories
        })
    }
}

/// Logging setup used by [`crate::logging::init`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for rotating log files. `None` logs to the console only.
    pub log_dir: Option<PathBuf>,
    /// Number of rotated files kept per log.
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            log_dir: None,
            max_log_files: 10,
        }
    }
}
