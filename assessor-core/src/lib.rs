pub mod assessment;
pub mod config;
pub mod content;
pub mod cost;
pub mod error;
pub mod export;
pub mod observability;
pub mod reference;

pub use assessment::{assess, Assessment, AssessmentResult};
pub use config::{AssessorConfig, LoggingConfig};
pub use content::{ContentDescriptor, ContentKind, TextStats};
pub use cost::{Cost, Estimate, Estimator, EstimatorConfig, ModelPricing, TokenCount};
pub use error::{AssessorError, Result};
pub use reference::{Catalog, ModelRecord, SortKey};
