//! Reference tables the engine prices against.
//!
//! The built-in tables are AUD figures. They are built once on first use and
//! never mutated; config overrides produce a new `PricingTables` value.

use crate::vehicle::{BodyType, Brand, Condition};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Base price when the brand has no price list at all
pub const FALLBACK_BASE_PRICE: f64 = 25_000.0;

/// Annual depreciation rate when the brand has no rate of its own
pub const DEFAULT_DEPRECIATION_RATE: f64 = 0.06;

/// Prices for one brand: per-model entries plus the brand-wide default used
/// for any model not listed.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandPrices {
    pub models: HashMap<String, f64>,
    pub default: f64,
}

/// Where a base price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Model,
    BrandDefault,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingTables {
    pub base_prices: HashMap<Brand, BrandPrices>,
    pub depreciation_rates: HashMap<Brand, f64>,
    pub type_modifiers: HashMap<BodyType, f64>,
    pub condition_multipliers: HashMap<Condition, f64>,
    pub fallback_base_price: f64,
    pub default_depreciation_rate: f64,
}

static BUILTIN: LazyLock<PricingTables> = LazyLock::new(build_builtin);

impl PricingTables {
    /// The built-in tables
    pub fn builtin() -> &'static PricingTables {
        &BUILTIN
    }

    /// Built-in body-type and condition tables with no brand data: every
    /// vehicle prices from the global fallbacks.
    pub fn without_brands() -> Self {
        Self {
            base_prices: HashMap::new(),
            depreciation_rates: HashMap::new(),
            ..PricingTables::builtin().clone()
        }
    }

    /// Base price for a brand and model, and which table level supplied it.
    pub fn resolve_base_price(&self, brand: Brand, model: &str) -> (f64, PriceSource) {
        match self.base_prices.get(&brand) {
            Some(prices) => match prices.models.get(model) {
                Some(price) => (*price, PriceSource::Model),
                None => (prices.default, PriceSource::BrandDefault),
            },
            None => (self.fallback_base_price, PriceSource::Fallback),
        }
    }

    pub fn base_price(&self, brand: Brand, model: &str) -> f64 {
        self.resolve_base_price(brand, model).0
    }

    pub fn brand_rate(&self, brand: Brand) -> f64 {
        self.depreciation_rates
            .get(&brand)
            .copied()
            .unwrap_or(self.default_depreciation_rate)
    }

    pub fn type_modifier(&self, body_type: BodyType) -> f64 {
        self.type_modifiers.get(&body_type).copied().unwrap_or(1.0)
    }

    pub fn condition_multiplier(&self, condition: Condition) -> f64 {
        self.condition_multipliers
            .get(&condition)
            .copied()
            .unwrap_or(1.0)
    }

    /// Effective annual depreciation rate: brand rate scaled by body type
    pub fn depreciation_rate(&self, brand: Brand, body_type: BodyType) -> f64 {
        self.brand_rate(brand) * self.type_modifier(body_type)
    }
}

fn brand(default: f64, models: &[(&str, f64)]) -> BrandPrices {
    BrandPrices {
        models: models
            .iter()
            .map(|(name, price)| (name.to_string(), *price))
            .collect(),
        default,
    }
}

fn build_builtin() -> PricingTables {
    let mut base_prices = HashMap::new();

    base_prices.insert(
        Brand::Toyota,
        brand(
            28_000.0,
            &[
                ("Corolla", 25_000.0),
                ("Camry", 32_000.0),
                ("RAV4", 38_000.0),
                ("Hilux", 45_000.0),
                ("Yaris", 20_000.0),
                ("Prado", 65_000.0),
                ("Kluger", 50_000.0),
                ("Land Cruiser", 80_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Mazda,
        brand(
            25_000.0,
            &[
                ("Mazda3", 25_000.0),
                ("Mazda6", 35_000.0),
                ("CX-5", 38_000.0),
                ("CX-3", 28_000.0),
                ("CX-9", 55_000.0),
                ("BT-50", 45_000.0),
                ("MX-5", 38_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Hyundai,
        brand(
            22_000.0,
            &[
                ("i30", 23_000.0),
                ("Tucson", 35_000.0),
                ("Santa Fe", 45_000.0),
                ("Kona", 28_000.0),
                ("Venue", 25_000.0),
                ("iLoad", 35_000.0),
                ("Accent", 18_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Ford,
        brand(
            24_000.0,
            &[
                ("Ranger", 50_000.0),
                ("Focus", 25_000.0),
                ("Everest", 55_000.0),
                ("Escape", 32_000.0),
                ("Mustang", 65_000.0),
                ("Transit", 40_000.0),
                ("Endura", 45_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Holden,
        brand(
            20_000.0,
            &[
                ("Commodore", 30_000.0),
                ("Astra", 22_000.0),
                ("Colorado", 42_000.0),
                ("Trax", 25_000.0),
                ("Equinox", 30_000.0),
                ("Acadia", 45_000.0),
                ("Trailblazer", 42_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Volkswagen,
        brand(
            32_000.0,
            &[
                ("Golf", 32_000.0),
                ("Polo", 25_000.0),
                ("Tiguan", 42_000.0),
                ("Passat", 38_000.0),
                ("T-Cross", 30_000.0),
                ("Amarok", 55_000.0),
                ("Touareg", 75_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Subaru,
        brand(
            26_000.0,
            &[
                ("Forester", 35_000.0),
                ("Outback", 40_000.0),
                ("XV", 30_000.0),
                ("Impreza", 25_000.0),
                ("WRX", 45_000.0),
                ("Liberty", 35_000.0),
                ("BRZ", 38_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Mitsubishi,
        brand(
            23_000.0,
            &[
                ("Triton", 42_000.0),
                ("ASX", 25_000.0),
                ("Outlander", 35_000.0),
                ("Pajero", 50_000.0),
                ("Eclipse Cross", 30_000.0),
                ("Mirage", 18_000.0),
                ("Pajero Sport", 45_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Kia,
        brand(
            21_500.0,
            &[
                ("Cerato", 25_000.0),
                ("Sportage", 35_000.0),
                ("Sorento", 45_000.0),
                ("Picanto", 18_000.0),
                ("Stinger", 55_000.0),
                ("Carnival", 45_000.0),
                ("Seltos", 28_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Nissan,
        brand(
            23_500.0,
            &[
                ("X-Trail", 35_000.0),
                ("Navara", 45_000.0),
                ("Qashqai", 30_000.0),
                ("Patrol", 75_000.0),
                ("Juke", 25_000.0),
                ("Pathfinder", 50_000.0),
                ("370Z", 60_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Honda,
        brand(
            26_000.0,
            &[
                ("Civic", 28_000.0),
                ("CR-V", 35_000.0),
                ("HR-V", 28_000.0),
                ("Accord", 35_000.0),
                ("Jazz", 20_000.0),
                ("Odyssey", 45_000.0),
                ("City", 22_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Bmw,
        brand(
            58_000.0,
            &[
                ("3 Series", 65_000.0),
                ("5 Series", 85_000.0),
                ("X3", 70_000.0),
                ("X5", 95_000.0),
                ("1 Series", 50_000.0),
                ("X1", 55_000.0),
                ("7 Series", 120_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Mercedes,
        brand(
            65_000.0,
            &[
                ("C-Class", 65_000.0),
                ("E-Class", 90_000.0),
                ("GLC", 75_000.0),
                ("A-Class", 50_000.0),
                ("GLA", 55_000.0),
                ("GLE", 105_000.0),
                ("S-Class", 150_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Audi,
        brand(
            55_000.0,
            &[
                ("A3", 50_000.0),
                ("A4", 65_000.0),
                ("Q5", 75_000.0),
                ("Q3", 60_000.0),
                ("A1", 40_000.0),
                ("Q7", 100_000.0),
                ("A5", 75_000.0),
            ],
        ),
    );
    base_prices.insert(
        Brand::Other,
        brand(20_000.0, &[("Model S", 120_000.0), ("Model 3", 75_000.0)]),
    );

    // Luxury makes and the discontinued Holden lose value fastest
    let depreciation_rates = HashMap::from([
        (Brand::Toyota, 0.045),
        (Brand::Mazda, 0.05),
        (Brand::Hyundai, 0.06),
        (Brand::Ford, 0.055),
        (Brand::Holden, 0.07),
        (Brand::Volkswagen, 0.055),
        (Brand::Subaru, 0.05),
        (Brand::Mitsubishi, 0.06),
        (Brand::Kia, 0.055),
        (Brand::Nissan, 0.055),
        (Brand::Honda, 0.05),
        (Brand::Bmw, 0.07),
        (Brand::Mercedes, 0.065),
        (Brand::Audi, 0.07),
        (Brand::Other, 0.06),
    ]);

    let type_modifiers = HashMap::from([
        (BodyType::Sedan, 1.0),
        (BodyType::Hatchback, 0.95),
        (BodyType::Suv, 0.9),
        (BodyType::Wagon, 1.05),
        (BodyType::Ute, 0.85),
        (BodyType::Van, 1.0),
        (BodyType::Convertible, 1.1),
        (BodyType::Coupe, 1.05),
    ]);

    let condition_multipliers = HashMap::from([
        (Condition::Excellent, 1.2),
        (Condition::Good, 1.0),
        (Condition::Fair, 0.85),
        (Condition::Poor, 0.7),
    ]);

    PricingTables {
        base_prices,
        depreciation_rates,
        type_modifiers,
        condition_multipliers,
        fallback_base_price: FALLBACK_BASE_PRICE,
        default_depreciation_rate: DEFAULT_DEPRECIATION_RATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::catalog;

    #[test]
    fn test_builtin_covers_every_vocabulary_value() {
        let tables = PricingTables::builtin();
        for b in Brand::ALL {
            assert!(tables.base_prices.contains_key(b), "no prices for {}", b);
            assert!(tables.depreciation_rates.contains_key(b), "no rate for {}", b);
        }
        for t in BodyType::ALL {
            assert!(tables.type_modifiers.contains_key(t));
        }
        for c in Condition::ALL {
            assert!(tables.condition_multipliers.contains_key(c));
        }
    }

    #[test]
    fn test_model_price_lookup() {
        let tables = PricingTables::builtin();
        assert_eq!(
            tables.resolve_base_price(Brand::Toyota, "Land Cruiser"),
            (80_000.0, PriceSource::Model)
        );
        assert_eq!(tables.base_price(Brand::Bmw, "X5"), 95_000.0);
    }

    #[test]
    fn test_unknown_model_uses_brand_default() {
        let tables = PricingTables::builtin();
        assert_eq!(
            tables.resolve_base_price(Brand::Kia, "EV6"),
            (21_500.0, PriceSource::BrandDefault)
        );
        // Listed on the form but not priced individually
        assert_eq!(
            tables.resolve_base_price(Brand::Other, "Prius"),
            (20_000.0, PriceSource::BrandDefault)
        );
    }

    #[test]
    fn test_missing_brand_uses_global_fallback() {
        let tables = PricingTables::without_brands();
        assert_eq!(
            tables.resolve_base_price(Brand::Toyota, "Corolla"),
            (25_000.0, PriceSource::Fallback)
        );
        assert_eq!(tables.brand_rate(Brand::Toyota), 0.06);
        assert_eq!(tables.type_modifier(BodyType::Suv), 0.9);
    }

    #[test]
    fn test_model_lookup_is_case_sensitive() {
        let tables = PricingTables::builtin();
        assert_eq!(
            tables.resolve_base_price(Brand::Toyota, "corolla").1,
            PriceSource::BrandDefault
        );
    }

    #[test]
    fn test_depreciation_rate_combines_brand_and_type() {
        let tables = PricingTables::builtin();
        let rate = tables.depreciation_rate(Brand::Holden, BodyType::Ute);
        assert!((rate - 0.0595).abs() < 1e-12);
    }

    #[test]
    fn test_priced_models_are_listed_on_form() {
        let tables = PricingTables::builtin();
        for (b, prices) in &tables.base_prices {
            for model in prices.models.keys() {
                assert!(
                    catalog::is_listed_model(*b, model),
                    "{} {} is priced but not listed",
                    b,
                    model
                );
            }
        }
    }
}
