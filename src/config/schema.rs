use crate::pricing::PricingConfig;
use serde::{Deserialize, Serialize};

/// Symbol printed in front of prices unless the config says otherwise
pub const DEFAULT_CURRENCY: &str = "$";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Currency symbol for displayed prices (default: "$")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Overrides for the built-in pricing tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingConfig>,
}

impl Config {
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}
