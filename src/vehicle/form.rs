use super::catalog::{model_years, DEFAULT_YEARS_BACK};
use super::types::{BodyType, Brand, Condition, FuelType, Transmission, VehicleInput};
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Highest odometer reading the form accepts (km)
pub const MAX_ODOMETER: i64 = 500_000;

/// Raw vehicle fields as a form or a YAML document delivers them.
///
/// Nothing here is trusted; `validate` turns it into a `VehicleInput`.
///
/// Example YAML:
/// ```yaml
/// brand: toyota
/// model: Corolla
/// year: 2019
/// type: sedan
/// transmission: automatic
/// fuel_type: petrol
/// odometer: 62000
/// condition: good
/// features: ["Bluetooth", "Backup Camera"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleForm {
    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub year: Option<i64>,

    #[serde(default, rename = "type")]
    pub body_type: Option<String>,

    #[serde(default)]
    pub transmission: Option<String>,

    #[serde(default, alias = "fuelType")]
    pub fuel_type: Option<String>,

    #[serde(default)]
    pub odometer: Option<i64>,

    #[serde(default)]
    pub condition: Option<String>,

    #[serde(default)]
    pub features: Vec<String>,
}

impl VehicleForm {
    /// The values the form starts out with. Model is left blank on purpose:
    /// the user must pick one.
    pub fn prefilled() -> Self {
        Self {
            brand: Some("toyota".to_string()),
            model: None,
            year: Some(2018),
            body_type: Some("sedan".to_string()),
            transmission: Some("automatic".to_string()),
            fuel_type: Some("petrol".to_string()),
            odometer: Some(50_000),
            condition: Some("good".to_string()),
            features: Vec::new(),
        }
    }

    /// Validate every field and build a `VehicleInput`.
    /// Returns all validation errors at once (not just the first).
    pub fn validate(&self, current_year: i32) -> Result<VehicleInput, Vec<InputError>> {
        let mut errors = Vec::new();

        let brand = choice::<Brand>(&self.brand, "brand", &mut errors);
        let body_type = choice::<BodyType>(&self.body_type, "type", &mut errors);
        let transmission = choice::<Transmission>(&self.transmission, "transmission", &mut errors);
        let fuel_type = choice::<FuelType>(&self.fuel_type, "fuel_type", &mut errors);
        let condition = choice::<Condition>(&self.condition, "condition", &mut errors);

        let model = match self.model.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => Some(m.to_string()),
            _ => {
                errors.push(InputError::Missing { field: "model" });
                None
            }
        };

        let years = model_years(current_year, DEFAULT_YEARS_BACK);
        let newest = i64::from(years.first().copied().unwrap_or(current_year));
        let oldest = i64::from(years.last().copied().unwrap_or(current_year));
        let year = bounded(self.year, "year", oldest, newest, &mut errors);
        let odometer = bounded(self.odometer, "odometer", 0, MAX_ODOMETER, &mut errors);

        let features = self
            .features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        match (brand, model, year, body_type, transmission, fuel_type, odometer, condition) {
            (
                Some(brand),
                Some(model),
                Some(year),
                Some(body_type),
                Some(transmission),
                Some(fuel_type),
                Some(odometer),
                Some(condition),
            ) if errors.is_empty() => Ok(VehicleInput {
                brand,
                model,
                // Both are inside ranges that fit the narrower types
                year: year as i32,
                body_type,
                transmission,
                fuel_type,
                odometer: odometer as u32,
                condition,
                features,
            }),
            _ => Err(errors),
        }
    }
}

fn choice<T>(raw: &Option<String>, field: &'static str, errors: &mut Vec<InputError>) -> Option<T>
where
    T: FromStr<Err = InputError>,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(InputError::Missing { field });
            None
        }
        Some(value) => match value.parse::<T>() {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(e);
                None
            }
        },
    }
}

fn bounded(
    raw: Option<i64>,
    field: &'static str,
    min: i64,
    max: i64,
    errors: &mut Vec<InputError>,
) -> Option<i64> {
    match raw {
        None => {
            errors.push(InputError::Missing { field });
            None
        }
        Some(value) if value < min || value > max => {
            errors.push(InputError::OutOfRange {
                field,
                value,
                min,
                max,
            });
            None
        }
        Some(value) => Some(value),
    }
}
