use super::factors::{assess_confidence, assess_factors, Confidence, ValuationFactor};
use super::tables::{PriceSource, PricingTables};
use crate::vehicle::VehicleInput;
use serde::Serialize;

/// Kilometres a car is expected to cover per year
pub const EXPECTED_ANNUAL_KM: f64 = 15_000.0;

/// Age alone never takes a car below this share of its base price
pub const MIN_YEAR_FACTOR: f64 = 0.3;

pub const MIN_MILEAGE_FACTOR: f64 = 0.7;
pub const MAX_MILEAGE_FACTOR: f64 = 1.15;

/// Each feature adds this share of value...
pub const FEATURE_BONUS_EACH: f64 = 0.02;
/// ...up to this total
pub const FEATURE_BONUS_CAP: f64 = 0.15;

/// Half-width of the quoted price range
pub const RANGE_SPREAD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

/// Every intermediate figure behind an estimate, for explaining it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub base_price_source: PriceSource,
    pub depreciation_rate: f64,
    pub age: i32,
    pub year_factor: f64,
    pub mileage_ratio: f64,
    pub mileage_factor: f64,
    pub condition_multiplier: f64,
    pub feature_multiplier: f64,
    /// Price before rounding
    pub unrounded: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    pub estimated_price: i64,
    pub price_range: PriceRange,
    pub confidence: Confidence,
    pub factors: Vec<ValuationFactor>,
    pub breakdown: PriceBreakdown,
}

/// Value a vehicle against the built-in tables.
///
/// `current_year` is the calendar year ages are measured from; the engine
/// never reads the clock.
pub fn estimate(input: &VehicleInput, current_year: i32) -> ValuationResult {
    estimate_with(input, PricingTables::builtin(), current_year)
}

/// Value a vehicle against explicit tables.
///
/// Total over any `VehicleInput`: unknown models and brands fall back to
/// table defaults, and the age and mileage clamps bound out-of-range
/// odometer or year values.
pub fn estimate_with(
    input: &VehicleInput,
    tables: &PricingTables,
    current_year: i32,
) -> ValuationResult {
    let (base_price, base_price_source) = tables.resolve_base_price(input.brand, &input.model);
    let rate = tables.depreciation_rate(input.brand, input.body_type);

    // A model year in the future is a new car, not an appreciating one
    let age = current_year.saturating_sub(input.year).max(0);
    let year_factor = year_factor(age, rate);
    let (mileage_ratio, mileage_factor) = mileage_factor(input.odometer, age);

    let condition_multiplier = tables.condition_multiplier(input.condition);
    let feature_multiplier = feature_multiplier(input.feature_count());

    let unrounded = base_price
        * year_factor.max(MIN_YEAR_FACTOR)
        * mileage_factor.max(MIN_MILEAGE_FACTOR)
        * condition_multiplier
        * feature_multiplier;

    // `as` saturates; validated tables keep prices far below i64::MAX
    ValuationResult {
        estimated_price: unrounded.round() as i64,
        price_range: PriceRange {
            min: (unrounded * (1.0 - RANGE_SPREAD)).round() as i64,
            max: (unrounded * (1.0 + RANGE_SPREAD)).round() as i64,
        },
        confidence: assess_confidence(input),
        factors: assess_factors(input, current_year),
        breakdown: PriceBreakdown {
            base_price,
            base_price_source,
            depreciation_rate: rate,
            age,
            year_factor,
            mileage_ratio,
            mileage_factor,
            condition_multiplier,
            feature_multiplier,
            unrounded,
        },
    }
}

/// First year loses double the annual rate, every later year the flat rate.
fn year_factor(age: i32, rate: f64) -> f64 {
    if age <= 0 {
        return 1.0;
    }
    let first_year = rate * 2.0;
    let later_years = f64::from(age - 1) * rate;
    (1.0 - (first_year + later_years)).max(MIN_YEAR_FACTOR)
}

/// Reward mileage well under the expected total, penalize mileage well over it.
/// Returns `(ratio, factor)`.
fn mileage_factor(odometer: u32, age: i32) -> (f64, f64) {
    let expected_km = EXPECTED_ANNUAL_KM * f64::from(age.max(1));
    let ratio = f64::from(odometer) / expected_km;

    let factor = if ratio < 0.7 {
        1.0 + (0.7 - ratio) * 0.1
    } else if ratio > 1.2 {
        1.0 - (ratio - 1.2) * 0.15
    } else {
        1.0
    };

    (ratio, factor.clamp(MIN_MILEAGE_FACTOR, MAX_MILEAGE_FACTOR))
}

fn feature_multiplier(count: usize) -> f64 {
    1.0 + (count as f64 * FEATURE_BONUS_EACH).min(FEATURE_BONUS_CAP)
}
