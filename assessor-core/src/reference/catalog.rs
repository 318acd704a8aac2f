use std::cmp::Ordering;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{loader, ModelRecord};
use crate::error::AssessorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Company,
    Model,
    /// Largest context first; records without a limit go last.
    MaxTokens,
}

impl FromStr for SortKey {
    type Err = AssessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "company" => Ok(SortKey::Company),
            "model" => Ok(SortKey::Model),
            "max-tokens" => Ok(SortKey::MaxTokens),
            other => Err(AssessorError::InvalidInput(format!("unknown sort key: {}", other))),
        }
    }
}

/// The loaded reference records in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ModelRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::new(loader::load(path))
    }

    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Company => self
                .records
                .sort_by_cached_key(|r| r.company.to_lowercase()),
            SortKey::Model => self.records.sort_by_cached_key(|r| r.model.to_lowercase()),
            SortKey::MaxTokens => self.records.sort_by(|a, b| match (a.max_tokens, b.max_tokens) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
        }
    }

    pub fn select_all(&self) -> Vec<&ModelRecord> {
        self.records.iter().collect()
    }

    /// Records matching any of `patterns`, in catalog order. A pattern is a
    /// case-insensitive substring of the company, the model, or the
    /// "company/model" and "company - model" labels.
    pub fn select(&self, patterns: &[String]) -> Vec<&ModelRecord> {
        let patterns: Vec<String> = patterns
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        self.records
            .iter()
            .filter(|record| patterns.iter().any(|p| matches_pattern(record, p)))
            .collect()
    }
}

fn matches_pattern(record: &ModelRecord, pattern: &str) -> bool {
    let company = record.company.to_lowercase();
    let model = record.model.to_lowercase();
    company.contains(pattern)
        || model.contains(pattern)
        || format!("{}/{}", company, model).contains(pattern)
        || format!("{} - {}", company, model).contains(pattern)
}
