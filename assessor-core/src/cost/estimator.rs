use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assessment::AssessmentResult;
use crate::content::{ContentDescriptor, ContentKind};
use crate::error::{AssessorError, Result};
use crate::reference::{tags, ModelRecord};

/// Tunables of the estimate. Passed explicitly to [`Estimator::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Bytes of content per input token.
    pub bytes_per_token: u64,
    /// Expected output tokens as a fraction of input tokens.
    pub output_ratio: f64,
    /// Output tokens assumed for describing one image.
    pub image_output_tokens: u64,
    /// Per-minute price used for video when a model has none configured.
    pub default_video_rate: f64,
    /// Bytes decoded when deciding whether a file is binary.
    pub sniff_bytes: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            bytes_per_token: 4,
            output_ratio: 0.5,
            image_output_tokens: 512,
            default_video_rate: 0.05,
            sniff_bytes: 1024,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bytes_per_token == 0 {
            return Err(AssessorError::InvalidConfig(
                "bytes_per_token must be greater than zero".to_string(),
            ));
        }
        if self.sniff_bytes == 0 {
            return Err(AssessorError::InvalidConfig(
                "sniff_bytes must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("output_ratio", self.output_ratio),
            ("default_video_rate", self.default_video_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AssessorError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// A resolved cost in USD. `DefaultRate` marks a cost computed from the
/// fallback video rate rather than the model's own price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    Priced(f64),
    DefaultRate(f64),
}

impl Cost {
    pub fn amount(&self) -> f64 {
        match self {
            Cost::Priced(amount) | Cost::DefaultRate(amount) => *amount,
        }
    }

    pub fn is_default_rate(&self) -> bool {
        matches!(self, Cost::DefaultRate(_))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Priced(amount) => write!(f, "${:.6}", amount),
            Cost::DefaultRate(amount) => write!(f, "${:.6} (default rate)", amount),
        }
    }
}

/// A token figure, or `NotApplicable` for modalities not billed by token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenCount {
    Count(u64),
    NotApplicable,
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCount::Count(n) => write!(f, "{}", n),
            TokenCount::NotApplicable => f.write_str("Not Supported"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEstimate {
    pub send: TokenCount,
    pub receive: TokenCount,
    pub total: TokenCount,
}

impl TokenEstimate {
    pub fn not_applicable() -> Self {
        Self {
            send: TokenCount::NotApplicable,
            receive: TokenCount::NotApplicable,
            total: TokenCount::NotApplicable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Estimate {
    Supported { cost: Cost, tokens: TokenEstimate },
    NotSupported,
}

impl Estimate {
    pub fn is_supported(&self) -> bool {
        matches!(self, Estimate::Supported { .. })
    }

    pub fn cost(&self) -> Option<Cost> {
        match self {
            Estimate::Supported { cost, .. } => Some(*cost),
            Estimate::NotSupported => None,
        }
    }
}

/// Prices content against reference records. Pure: the same record and
/// content always give the same answer.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    /// Rejects a config that fails [`EstimatorConfig::validate`].
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate `content` against `record`, keeping the record's display
    /// fields alongside the outcome.
    pub fn estimate(&self, record: &ModelRecord, content: &ContentDescriptor) -> AssessmentResult {
        AssessmentResult::new(record, content.kind, self.price(record, content))
    }

    /// Apply the first matching rule. Code is checked before plain text so a
    /// text-only model still prices source files.
    pub fn price(&self, record: &ModelRecord, content: &ContentDescriptor) -> Estimate {
        let media = |tag: &str| record.supports(tag) || record.is_multimodal();

        let estimate = match content.kind {
            ContentKind::Code if record.supports_any(&[tags::CODE, tags::TEXT]) => {
                self.text_estimate(record, content)
            }
            ContentKind::Text if record.supports(tags::TEXT) => self.text_estimate(record, content),
            ContentKind::Video if media(tags::VIDEO) => self.video_estimate(record, content),
            ContentKind::Audio if media(tags::AUDIO) => self.audio_estimate(record, content),
            ContentKind::Image if media(tags::IMAGE) => self.image_estimate(record),
            _ => Estimate::NotSupported,
        };

        debug!(
            company = %record.company,
            model = %record.model,
            kind = %content.kind,
            supported = estimate.is_supported(),
            "Estimated content cost"
        );
        estimate
    }

    pub fn input_tokens(&self, size_bytes: u64) -> u64 {
        (size_bytes / self.config.bytes_per_token).max(1)
    }

    pub fn output_tokens(&self, input_tokens: u64) -> u64 {
        (input_tokens as f64 * self.config.output_ratio).floor() as u64
    }

    fn text_estimate(&self, record: &ModelRecord, content: &ContentDescriptor) -> Estimate {
        if record.max_tokens.is_none() {
            return Estimate::NotSupported;
        }
        let send = self.input_tokens(content.size_bytes);
        let receive = self.output_tokens(send);
        match record.pricing.token_cost(send, receive) {
            Some(cost) => Estimate::Supported {
                cost: Cost::Priced(cost),
                tokens: TokenEstimate {
                    send: TokenCount::Count(send),
                    receive: TokenCount::Count(receive),
                    total: TokenCount::Count(send + receive),
                },
            },
            None => Estimate::NotSupported,
        }
    }

    // Duration is approximated as one minute per megabyte.
    fn video_estimate(&self, record: &ModelRecord, content: &ContentDescriptor) -> Estimate {
        let minutes = content.size_megabytes();
        let cost = match record.pricing.video_price_per_minute {
            Some(rate) => Cost::Priced(minutes * rate),
            None => Cost::DefaultRate(minutes * self.config.default_video_rate),
        };
        Estimate::Supported {
            cost,
            tokens: TokenEstimate::not_applicable(),
        }
    }

    fn audio_estimate(&self, record: &ModelRecord, content: &ContentDescriptor) -> Estimate {
        match record.pricing.audio_price_per_minute {
            Some(rate) => Estimate::Supported {
                cost: Cost::Priced(content.size_megabytes() * rate),
                tokens: TokenEstimate::not_applicable(),
            },
            None => Estimate::NotSupported,
        }
    }

    fn image_estimate(&self, record: &ModelRecord) -> Estimate {
        let receive = self.config.image_output_tokens;
        match record.pricing.image_cost(receive) {
            Some(cost) => Estimate::Supported {
                cost: Cost::Priced(cost),
                tokens: TokenEstimate {
                    send: TokenCount::NotApplicable,
                    receive: TokenCount::Count(receive),
                    total: TokenCount::NotApplicable,
                },
            },
            None => Estimate::NotSupported,
        }
    }
}
