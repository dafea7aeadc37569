use super::config::PricingConfig;
use crate::vehicle::{BodyType, Brand, Condition};
use std::str::FromStr;

/// Largest base price a config may set. Together with `MAX_MULTIPLIER` this
/// keeps every estimate well inside `i64`.
pub const MAX_BASE_PRICE: f64 = 1_000_000_000.0;

/// Largest body-type modifier or condition multiplier a config may set
pub const MAX_MULTIPLIER: f64 = 10.0;

/// Validate pricing overrides at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_pricing(config: &PricingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(price) = config.fallback_base_price {
        check_price(price, "pricing.fallback_base_price", &mut errors);
    }

    if let Some(rate) = config.default_depreciation_rate {
        check_rate(rate, "pricing.default_depreciation_rate", &mut errors);
    }

    if let Some(ref base_prices) = config.base_prices {
        for (brand, models) in base_prices {
            check_key::<Brand>(brand, "pricing.base_prices", &mut errors);
            for (model, price) in models {
                check_price(
                    *price,
                    &format!("pricing.base_prices.{}.{}", brand, model),
                    &mut errors,
                );
            }
        }
    }

    if let Some(ref rates) = config.depreciation_rates {
        for (brand, rate) in rates {
            check_key::<Brand>(brand, "pricing.depreciation_rates", &mut errors);
            check_rate(
                *rate,
                &format!("pricing.depreciation_rates.{}", brand),
                &mut errors,
            );
        }
    }

    if let Some(ref modifiers) = config.type_modifiers {
        for (body, modifier) in modifiers {
            check_key::<BodyType>(body, "pricing.type_modifiers", &mut errors);
            check_positive(
                *modifier,
                &format!("pricing.type_modifiers.{}", body),
                &mut errors,
            );
        }
    }

    if let Some(ref multipliers) = config.condition_multipliers {
        for (condition, multiplier) in multipliers {
            check_key::<Condition>(condition, "pricing.condition_multipliers", &mut errors);
            check_positive(
                *multiplier,
                &format!("pricing.condition_multipliers.{}", condition),
                &mut errors,
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_key<T: FromStr>(key: &str, path: &str, errors: &mut Vec<String>)
where
    T::Err: std::fmt::Display,
{
    if let Err(e) = key.parse::<T>() {
        errors.push(format!("{}.{}: unknown key - {}", path, key, e));
    }
}

fn check_price(value: f64, path: &str, errors: &mut Vec<String>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{}: price must be positive, got {}", path, value));
    } else if value > MAX_BASE_PRICE {
        errors.push(format!(
            "{}: price must be at most {}, got {}",
            path, MAX_BASE_PRICE, value
        ));
    }
}

fn check_rate(value: f64, path: &str, errors: &mut Vec<String>) {
    if !(0.0..1.0).contains(&value) {
        errors.push(format!("{}: rate must be in [0, 1), got {}", path, value));
    }
}

fn check_positive(value: f64, path: &str, errors: &mut Vec<String>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{}: must be positive, got {}", path, value));
    } else if value > MAX_MULTIPLIER {
        errors.push(format!(
            "{}: must be at most {}, got {}",
            path, MAX_MULTIPLIER, value
        ));
    }
}
