pub mod estimator;
pub mod pricing;

pub use estimator::{Cost, Estimate, Estimator, EstimatorConfig, TokenCount, TokenEstimate};
pub use pricing::ModelPricing;
