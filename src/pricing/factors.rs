use crate::vehicle::{Condition, VehicleInput};
use serde::Serialize;
use std::fmt;

/// Direction an input attribute pushed the valuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Positive => write!(f, "positive"),
            Impact::Neutral => write!(f, "neutral"),
            Impact::Negative => write!(f, "negative"),
        }
    }
}

/// How complete and favourable the input is. Not a statistical interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationFactor {
    pub factor: String,
    pub impact: Impact,
    pub description: String,
}

impl ValuationFactor {
    fn new(factor: &str, impact: Impact, description: String) -> Self {
        Self {
            factor: factor.to_string(),
            impact,
            description,
        }
    }
}

/// Explain the valuation: Vehicle Age, Mileage, Condition, Features, always
/// in that order. Judged from the raw input, not from the computed price.
pub fn assess_factors(input: &VehicleInput, current_year: i32) -> Vec<ValuationFactor> {
    let age = current_year.saturating_sub(input.year).max(0);
    let features = input.feature_count();

    let age_impact = if input.year > current_year.saturating_sub(5) {
        Impact::Positive
    } else if input.year > current_year.saturating_sub(10) {
        Impact::Neutral
    } else {
        Impact::Negative
    };

    let mileage_impact = if input.odometer < 50_000 {
        Impact::Positive
    } else if input.odometer < 100_000 {
        Impact::Neutral
    } else {
        Impact::Negative
    };

    let condition_impact = match input.condition {
        Condition::Excellent | Condition::Good => Impact::Positive,
        Condition::Fair | Condition::Poor => Impact::Negative,
    };

    let features_impact = if features > 5 {
        Impact::Positive
    } else if features > 2 {
        Impact::Neutral
    } else {
        Impact::Negative
    };

    let features_description = if features > 0 {
        format!("Vehicle has {} premium features.", features)
    } else {
        "No premium features selected.".to_string()
    };

    vec![
        ValuationFactor::new(
            "Vehicle Age",
            age_impact,
            format!("Your {} vehicle is {} years old.", input.year, age),
        ),
        ValuationFactor::new(
            "Mileage",
            mileage_impact,
            format!(
                "Odometer reading of {} km.",
                group_thousands(i64::from(input.odometer))
            ),
        ),
        ValuationFactor::new(
            "Condition",
            condition_impact,
            format!("Vehicle in {} condition.", input.condition),
        ),
        ValuationFactor::new("Features", features_impact, features_description),
    ]
}

pub fn assess_confidence(input: &VehicleInput) -> Confidence {
    if input.condition == Condition::Excellent
        && input.odometer < 100_000
        && input.feature_count() > 3
    {
        Confidence::High
    } else if input.condition == Condition::Poor || input.odometer > 200_000 {
        Confidence::Low
    } else {
        Confidence::Medium
    }
}

/// Format an integer with comma thousands separators (e.g. 125000 -> "125,000")
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{BodyType, Brand, FuelType, Transmission};

    fn sample_input(year: i32, odometer: u32, condition: Condition, features: usize) -> VehicleInput {
        VehicleInput {
            brand: Brand::Honda,
            model: "Civic".to_string(),
            year,
            body_type: BodyType::Hatchback,
            transmission: Transmission::Cvt,
            fuel_type: FuelType::Petrol,
            odometer,
            condition,
            features: (1..=features).map(|i| format!("f{}", i)).collect(),
        }
    }

    fn impact_of(factors: &[ValuationFactor], name: &str) -> Impact {
        factors
            .iter()
            .find(|f| f.factor == name)
            .map(|f| f.impact)
            .unwrap()
    }

    #[test]
    fn test_factor_order_is_fixed() {
        let factors = assess_factors(&sample_input(2020, 60_000, Condition::Good, 0), 2025);
        let names: Vec<&str> = factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(names, vec!["Vehicle Age", "Mileage", "Condition", "Features"]);
    }

    #[test]
    fn test_age_impact_thresholds() {
        let at = |year| impact_of(&assess_factors(&sample_input(year, 0, Condition::Good, 0), 2025), "Vehicle Age");
        assert_eq!(at(2021), Impact::Positive); // 4 years
        assert_eq!(at(2020), Impact::Neutral); // 5 years
        assert_eq!(at(2016), Impact::Neutral); // 9 years
        assert_eq!(at(2015), Impact::Negative); // 10 years
        assert_eq!(at(2026), Impact::Positive); // next year's model
    }

    #[test]
    fn test_mileage_impact_thresholds() {
        let at = |km| impact_of(&assess_factors(&sample_input(2020, km, Condition::Good, 0), 2025), "Mileage");
        assert_eq!(at(49_999), Impact::Positive);
        assert_eq!(at(50_000), Impact::Neutral);
        assert_eq!(at(99_999), Impact::Neutral);
        assert_eq!(at(100_000), Impact::Negative);
    }

    #[test]
    fn test_condition_impact() {
        let at = |c| impact_of(&assess_factors(&sample_input(2020, 0, c, 0), 2025), "Condition");
        assert_eq!(at(Condition::Excellent), Impact::Positive);
        assert_eq!(at(Condition::Good), Impact::Positive);
        assert_eq!(at(Condition::Fair), Impact::Negative);
        assert_eq!(at(Condition::Poor), Impact::Negative);
    }

    #[test]
    fn test_features_impact_thresholds() {
        let at = |n| impact_of(&assess_factors(&sample_input(2020, 0, Condition::Good, n), 2025), "Features");
        assert_eq!(at(2), Impact::Negative);
        assert_eq!(at(3), Impact::Neutral);
        assert_eq!(at(5), Impact::Neutral);
        assert_eq!(at(6), Impact::Positive);
    }

    #[test]
    fn test_descriptions() {
        let factors = assess_factors(&sample_input(2019, 125_000, Condition::Fair, 0), 2025);
        assert_eq!(factors[0].description, "Your 2019 vehicle is 6 years old.");
        assert_eq!(factors[1].description, "Odometer reading of 125,000 km.");
        assert_eq!(factors[2].description, "Vehicle in fair condition.");
        assert_eq!(factors[3].description, "No premium features selected.");

        let factors = assess_factors(&sample_input(2019, 0, Condition::Fair, 4), 2025);
        assert_eq!(factors[3].description, "Vehicle has 4 premium features.");
    }

    #[test]
    fn test_future_year_described_as_new() {
        let factors = assess_factors(&sample_input(2026, 0, Condition::Good, 0), 2025);
        assert_eq!(factors[0].description, "Your 2026 vehicle is 0 years old.");
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let factors = assess_factors(&sample_input(i32::MIN, 0, Condition::Good, 0), 2025);
        assert_eq!(factors[0].impact, Impact::Negative);
        assert!(factors[0].description.ends_with(&format!("is {} years old.", i32::MAX)));

        let factors = assess_factors(&sample_input(i32::MAX, 0, Condition::Good, 0), i32::MIN);
        assert_eq!(factors[0].impact, Impact::Positive);
        assert!(factors[0].description.ends_with("is 0 years old."));
    }

    #[test]
    fn test_confidence_high_needs_all_three() {
        let input = sample_input(2022, 80_000, Condition::Excellent, 4);
        assert_eq!(assess_confidence(&input), Confidence::High);

        let input = sample_input(2022, 80_000, Condition::Excellent, 3);
        assert_eq!(assess_confidence(&input), Confidence::Medium);

        let input = sample_input(2022, 100_000, Condition::Excellent, 4);
        assert_eq!(assess_confidence(&input), Confidence::Medium);

        let input = sample_input(2022, 80_000, Condition::Good, 10);
        assert_eq!(assess_confidence(&input), Confidence::Medium);
    }

    #[test]
    fn test_confidence_low() {
        assert_eq!(
            assess_confidence(&sample_input(2022, 10_000, Condition::Poor, 8)),
            Confidence::Low
        );
        assert_eq!(
            assess_confidence(&sample_input(2022, 200_001, Condition::Good, 0)),
            Confidence::Low
        );
        assert_eq!(
            assess_confidence(&sample_input(2022, 200_000, Condition::Good, 0)),
            Confidence::Medium
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(500_000), "500,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-32_100), "-32,100");
    }
}
