use serde::{Deserialize, Serialize};

const TOKENS_PER_UNIT: f64 = 1_000_000.0;

/// Prices attached to a reference record. `None` means the table gave no
/// usable value, which is not the same as a price of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_price_per_1m: Option<f64>,
    pub output_price_per_1m: Option<f64>,
    pub video_price_per_minute: Option<f64>,
    pub audio_price_per_minute: Option<f64>,
    pub image_price: Option<f64>,
    pub flat_file_price: Option<f64>,
}

impl ModelPricing {
    /// Cost of `input_tokens` sent and `output_tokens` received. Needs both
    /// token prices.
    pub fn token_cost(&self, input_tokens: u64, output_tokens: u64) -> Option<f64> {
        let input_price = self.input_price_per_1m?;
        let output_price = self.output_price_per_1m?;
        Some(tokens_cost(input_tokens, input_price) + tokens_cost(output_tokens, output_price))
    }

    /// Flat per-image price plus the cost of the expected response tokens.
    pub fn image_cost(&self, output_tokens: u64) -> Option<f64> {
        let per_image = self.image_price?;
        let output_price = self.output_price_per_1m?;
        Some(per_image + tokens_cost(output_tokens, output_price))
    }
}

fn tokens_cost(tokens: u64, price_per_1m: f64) -> f64 {
    (tokens as f64 / TOKENS_PER_UNIT) * price_per_1m
}
