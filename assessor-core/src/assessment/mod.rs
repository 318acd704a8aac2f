use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::{ContentDescriptor, ContentKind};
use crate::cost::{Cost, Estimate, Estimator, TokenCount, TokenEstimate};
use crate::reference::ModelRecord;

/// One model's outcome for one piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub company: String,
    pub model: String,
    pub version: String,
    pub content_kind: ContentKind,
    pub api_types: String,
    pub max_tokens: Option<u64>,
    pub estimate: Estimate,
}

impl AssessmentResult {
    pub fn new(record: &ModelRecord, content_kind: ContentKind, estimate: Estimate) -> Self {
        Self {
            company: record.company.clone(),
            model: record.model.clone(),
            version: record.version.clone(),
            content_kind,
            api_types: record.api_types_display(),
            max_tokens: record.max_tokens,
            estimate,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.estimate.is_supported()
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.company, self.model)
    }

    pub fn cost(&self) -> Option<Cost> {
        self.estimate.cost()
    }

    pub fn send_tokens(&self) -> TokenCount {
        self.token_field(|t| t.send)
    }

    pub fn receive_tokens(&self) -> TokenCount {
        self.token_field(|t| t.receive)
    }

    pub fn total_tokens(&self) -> TokenCount {
        self.token_field(|t| t.total)
    }

    /// "Not Supported" when the value is absent, as in the results table.
    pub fn max_tokens_display(&self) -> String {
        match self.max_tokens {
            Some(n) => n.to_string(),
            None => TokenCount::NotApplicable.to_string(),
        }
    }

    pub fn cost_display(&self) -> String {
        match self.cost() {
            Some(cost) => cost.to_string(),
            None => "Not Supported".to_string(),
        }
    }

    fn token_field(&self, pick: impl Fn(&TokenEstimate) -> TokenCount) -> TokenCount {
        match &self.estimate {
            Estimate::Supported { tokens, .. } => pick(tokens),
            Estimate::NotSupported => TokenCount::NotApplicable,
        }
    }
}

/// Outcome of running one piece of content against the selected models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub content: ContentDescriptor,
    pub results: Vec<AssessmentResult>,
    /// "Company - Model" labels of models that cannot price the content.
    pub unsupported: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Assessment {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.unsupported.is_empty()
    }
}

/// Estimate `content` against every record in order. Supported outcomes go
/// to `results`; the rest are listed by label in `unsupported`.
pub fn assess<'a, I>(records: I, content: &ContentDescriptor, estimator: &Estimator) -> Assessment
where
    I: IntoIterator<Item = &'a ModelRecord>,
{
    let mut results = Vec::new();
    let mut unsupported = Vec::new();

    for record in records {
        let result = estimator.estimate(record, content);
        if result.is_supported() {
            results.push(result);
        } else {
            unsupported.push(result.label());
        }
    }

    info!(
        kind = %content.kind,
        size = content.size_bytes,
        supported = results.len(),
        unsupported = unsupported.len(),
        "Assessment complete"
    );

    Assessment {
        content: content.clone(),
        results,
        unsupported,
        generated_at: Utc::now(),
    }
}
