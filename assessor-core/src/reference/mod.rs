pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, SortKey};
pub use loader::{load, load_report, LoadReport, SkippedRow};

use serde::{Deserialize, Serialize};

use crate::cost::ModelPricing;

/// Placeholder used when a record has no company or model name.
pub const PLACEHOLDER: &str = "N/A";

/// Capability keys understood by the estimator.
pub mod tags {
    pub const TEXT: &str = "text";
    pub const CODE: &str = "code";
    pub const IMAGE: &str = "image";
    pub const AUDIO: &str = "audio";
    pub const VIDEO: &str = "video";
    pub const MULTIMODAL: &[&str] = &["multimodal", "multi-modal"];
}

/// One entry of the "API Types" column. `label` keeps the source casing for
/// display, `key` is the lower-cased form used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiType {
    pub label: String,
    pub key: String,
}

impl ApiType {
    pub fn new(label: &str) -> Self {
        let label = label.trim().to_string();
        let key = label.to_lowercase();
        Self { label, key }
    }
}

/// Split a comma separated "API Types" cell, dropping blanks. Repeated tags
/// are kept as written.
pub fn parse_api_types(raw: &str) -> Vec<ApiType> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(ApiType::new)
        .collect()
}

/// A priced, capability-tagged model/version entry. Built once by the loader
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub company: String,
    pub model: String,
    pub version: String,
    pub api_types: Vec<ApiType>,
    pub max_tokens: Option<u64>,
    pub pricing: ModelPricing,
    pub notes: String,
}

impl ModelRecord {
    pub fn supports(&self, tag: &str) -> bool {
        self.api_types.iter().any(|t| t.key == tag)
    }

    pub fn supports_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.supports(tag))
    }

    pub fn is_multimodal(&self) -> bool {
        self.supports_any(tags::MULTIMODAL)
    }

    /// Tags in their source casing, joined for display, e.g. "Text, Image".
    pub fn api_types_display(&self) -> String {
        self.api_types
            .iter()
            .map(|t| t.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// "Company - Model", the label used in unsupported listings.
    pub fn label(&self) -> String {
        format!("{} - {}", self.company, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(types: &str) -> ModelRecord {
        ModelRecord {
            company: "Acme".to_string(),
            model: "Writer".to_string(),
            version: "1".to_string(),
            api_types: parse_api_types(types),
            max_tokens: Some(8192),
            pricing: ModelPricing::default(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_parse_api_types_trims_and_drops_empty() {
        let types = parse_api_types(" Text, ,Image ,, Multi-Modal ");
        let labels: Vec<&str> = types.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Text", "Image", "Multi-Modal"]);
        assert_eq!(types[2].key, "multi-modal");
    }

    #[test]
    fn test_parse_api_types_keeps_repeats() {
        let r = record("Text, text, TEXT");
        let labels: Vec<&str> = r.api_types.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Text", "text", "TEXT"]);
        assert_eq!(r.api_types_display(), "Text, text, TEXT");
        assert!(r.supports(tags::TEXT));
        assert!(!r.supports(tags::IMAGE));
    }

    #[test]
    fn test_empty_api_types_supports_nothing() {
        let r = record("");
        assert!(r.api_types.is_empty());
        assert!(!r.supports(tags::TEXT));
        assert!(!r.is_multimodal());
    }

    #[test]
    fn test_capability_matching() {
        let r = record("Text, Multimodal");
        assert!(r.supports("text"));
        assert!(r.supports_any(&[tags::CODE, tags::TEXT]));
        assert!(!r.supports(tags::CODE));
        assert!(r.is_multimodal());
        assert_eq!(r.api_types_display(), "Text, Multimodal");
        assert_eq!(r.label(), "Acme - Writer");
    }
}
