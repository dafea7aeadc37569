use super::tables::{BrandPrices, PricingTables};
use crate::vehicle::{BodyType, Brand, Condition};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Key inside a brand's price list that sets the brand-wide default
pub const DEFAULT_MODEL_KEY: &str = "default";

/// Overrides for the built-in pricing tables.
///
/// Every field is optional; anything left out keeps its built-in value.
/// Keys are the lowercase vocabulary keys (`toyota`, `suv`, `excellent`);
/// model names are matched exactly as written.
///
/// Example YAML:
/// ```yaml
/// pricing:
///   fallback_base_price: 25000
///   base_prices:
///     toyota:
///       Corolla: 26000
///       default: 28000
///   depreciation_rates:
///     bmw: 0.08
///   type_modifiers:
///     suv: 0.85
///   condition_multipliers:
///     excellent: 1.25
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Start from the built-in brand price lists and rates (default: true).
    /// When false, only brands listed here have prices; every other brand
    /// uses the global fallbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit_brands: Option<bool>,

    /// Base price for brands without a price list (built-in: 25000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_base_price: Option<f64>,

    /// Annual rate for brands without a rate (built-in: 0.06)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_depreciation_rate: Option<f64>,

    /// brand -> model -> price, merged into the brand's list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_prices: Option<BTreeMap<String, BTreeMap<String, f64>>>,

    /// brand -> annual depreciation rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_rates: Option<BTreeMap<String, f64>>,

    /// body type -> multiplier on the brand rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_modifiers: Option<BTreeMap<String, f64>>,

    /// condition -> price multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_multipliers: Option<BTreeMap<String, f64>>,
}

impl PricingConfig {
    /// Build the tables this config describes on top of the built-in ones.
    ///
    /// Run `validate_pricing` first; this only reports the first bad key.
    pub fn build_tables(&self) -> Result<PricingTables> {
        let mut tables = if self.inherit_brands.unwrap_or(true) {
            PricingTables::builtin().clone()
        } else {
            PricingTables::without_brands()
        };

        if let Some(price) = self.fallback_base_price {
            tables.fallback_base_price = price;
        }
        if let Some(rate) = self.default_depreciation_rate {
            tables.default_depreciation_rate = rate;
        }

        if let Some(ref base_prices) = self.base_prices {
            for (brand_key, models) in base_prices {
                let brand: Brand = brand_key
                    .parse()
                    .with_context(|| format!("pricing.base_prices.{}", brand_key))?;
                let fallback = tables.fallback_base_price;
                let entry = tables.base_prices.entry(brand).or_insert_with(|| BrandPrices {
                    models: HashMap::new(),
                    default: fallback,
                });
                for (model, price) in models {
                    if model == DEFAULT_MODEL_KEY {
                        entry.default = *price;
                    } else {
                        entry.models.insert(model.clone(), *price);
                    }
                }
            }
        }

        if let Some(ref rates) = self.depreciation_rates {
            for (key, rate) in rates {
                let brand: Brand = key
                    .parse()
                    .with_context(|| format!("pricing.depreciation_rates.{}", key))?;
                tables.depreciation_rates.insert(brand, *rate);
            }
        }

        if let Some(ref modifiers) = self.type_modifiers {
            for (key, modifier) in modifiers {
                let body: BodyType = key
                    .parse()
                    .with_context(|| format!("pricing.type_modifiers.{}", key))?;
                tables.type_modifiers.insert(body, *modifier);
            }
        }

        if let Some(ref multipliers) = self.condition_multipliers {
            for (key, multiplier) in multipliers {
                let condition: Condition = key
                    .parse()
                    .with_context(|| format!("pricing.condition_multipliers.{}", key))?;
                tables.condition_multipliers.insert(condition, *multiplier);
            }
        }

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::tables::PriceSource;

    #[test]
    fn test_default_config_builds_builtin_tables() {
        let tables = PricingConfig::default().build_tables().unwrap();
        assert_eq!(&tables, PricingTables::builtin());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: PricingConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<PricingConfig, _> = serde_saphyr::from_str("base_score: 100\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_full_config_parse_and_build() {
        let yaml = r#"
fallback_base_price: 30000
default_depreciation_rate: 0.05
base_prices:
  toyota:
    Corolla: 26000
    GR86: 45000
    default: 29000
depreciation_rates:
  bmw: 0.08
type_modifiers:
  suv: 0.85
condition_multipliers:
  excellent: 1.25
"#;
        let config: PricingConfig = serde_saphyr::from_str(yaml).unwrap();
        let tables = config.build_tables().unwrap();

        assert_eq!(tables.fallback_base_price, 30_000.0);
        assert_eq!(tables.default_depreciation_rate, 0.05);
        assert_eq!(tables.base_price(Brand::Toyota, "Corolla"), 26_000.0);
        assert_eq!(tables.base_price(Brand::Toyota, "GR86"), 45_000.0);
        assert_eq!(tables.base_price(Brand::Toyota, "Unknown"), 29_000.0);
        // Untouched entries keep built-in values
        assert_eq!(tables.base_price(Brand::Toyota, "Camry"), 32_000.0);
        assert_eq!(tables.brand_rate(Brand::Bmw), 0.08);
        assert_eq!(tables.brand_rate(Brand::Audi), 0.07);
        assert_eq!(tables.type_modifier(BodyType::Suv), 0.85);
        assert_eq!(tables.condition_multiplier(Condition::Excellent), 1.25);
        assert_eq!(tables.condition_multiplier(Condition::Poor), 0.7);
    }

    #[test]
    fn test_without_inherited_brands() {
        let yaml = r#"
inherit_brands: false
base_prices:
  ford:
    Ranger: 52000
"#;
        let config: PricingConfig = serde_saphyr::from_str(yaml).unwrap();
        let tables = config.build_tables().unwrap();

        assert_eq!(
            tables.resolve_base_price(Brand::Ford, "Ranger"),
            (52_000.0, PriceSource::Model)
        );
        // New brand list without a default entry falls back to the global price
        assert_eq!(
            tables.resolve_base_price(Brand::Ford, "Focus"),
            (25_000.0, PriceSource::BrandDefault)
        );
        assert_eq!(
            tables.resolve_base_price(Brand::Toyota, "Corolla"),
            (25_000.0, PriceSource::Fallback)
        );
        assert_eq!(tables.brand_rate(Brand::Ford), 0.06);
    }

    #[test]
    fn test_build_rejects_unknown_brand() {
        let mut rates = BTreeMap::new();
        rates.insert("lada".to_string(), 0.1);
        let config = PricingConfig {
            depreciation_rates: Some(rates),
            ..Default::default()
        };
        let err = config.build_tables().unwrap_err();
        assert!(format!("{:#}", err).contains("pricing.depreciation_rates.lada"));
    }
}
