use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Pricing configuration injected into the engine and orchestrator.
///
/// The delivery fee is regional and must come from config, never a
/// literal inside the computation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PricingConfig {
    /// Flat delivery fee added to every booking
    pub delivery_fee: Decimal,
    /// ISO currency code passed to the payment gateway
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(500, 2), // 5.00
            currency: "USD".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", config_path, e))?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
