use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::pricing::{estimate_with, PricingTables, ValuationResult};
use crate::vehicle::{catalog, VehicleForm, VehicleInput};

/// A file of vehicles to value in one go.
///
/// Example YAML:
/// ```yaml
/// vehicles:
///   - brand: toyota
///     model: Corolla
///     year: 2019
///     type: sedan
///     transmission: automatic
///     fuel_type: petrol
///     odometer: 62000
///     condition: good
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleBatch {
    pub vehicles: Vec<VehicleForm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValuedVehicle {
    /// 1-based position in the input file
    pub index: usize,
    pub vehicle: VehicleInput,
    pub valuation: ValuationResult,
}

#[derive(Debug, Clone)]
pub struct RejectedVehicle {
    /// 1-based position in the input file
    pub index: usize,
    pub errors: Vec<InputError>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub valued: Vec<ValuedVehicle>,
    pub rejected: Vec<RejectedVehicle>,
}

/// Load a batch file from YAML
pub fn load_batch(path: &Path) -> Result<VehicleBatch> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read vehicle file at {}", path.display()))?;

    let batch: VehicleBatch = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse vehicles: invalid YAML in {}", path.display()))?;

    Ok(batch)
}

/// Validate and value every vehicle, keeping input order.
///
/// Invalid entries are reported and skipped. Fails only when there were
/// entries and none of them could be valued.
pub fn value_batch(
    forms: &[VehicleForm],
    tables: &PricingTables,
    current_year: i32,
    verbose: bool,
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for (i, form) in forms.iter().enumerate() {
        let index = i + 1;
        match form.validate(current_year) {
            Ok(vehicle) => {
                if !catalog::is_listed_model(vehicle.brand, &vehicle.model) {
                    crate::buffered_eprintln!(
                        "Vehicle {}: '{}' is not a listed {} model, using the brand default price",
                        index,
                        vehicle.model,
                        catalog::brand_label(vehicle.brand)
                    );
                }
                let valuation = estimate_with(&vehicle, tables, current_year);
                if verbose {
                    eprintln!(
                        "  Vehicle {}: {} -> {}",
                        index,
                        vehicle.label(),
                        valuation.estimated_price
                    );
                }
                outcome.valued.push(ValuedVehicle {
                    index,
                    vehicle,
                    valuation,
                });
            }
            Err(errors) => {
                crate::buffered_eprintln!(
                    "Vehicle {} skipped: {}",
                    index,
                    errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>()
                        .join("; ")
                );
                outcome.rejected.push(RejectedVehicle { index, errors });
            }
        }
    }

    if outcome.valued.is_empty() && !forms.is_empty() {
        anyhow::bail!(
            "None of the {} vehicles could be valued. Check the fields listed above.",
            forms.len()
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn form(brand: &str, model: &str, odometer: i64) -> VehicleForm {
        VehicleForm {
            brand: Some(brand.to_string()),
            model: Some(model.to_string()),
            odometer: Some(odometer),
            ..VehicleForm::prefilled()
        }
    }

    #[test]
    fn test_values_in_input_order() {
        let forms = vec![
            form("toyota", "Corolla", 60_000),
            form("bmw", "X5", 60_000),
            form("kia", "Picanto", 60_000),
        ];
        let outcome = value_batch(&forms, PricingTables::builtin(), 2025, false).unwrap();
        assert_eq!(outcome.valued.len(), 3);
        assert!(outcome.rejected.is_empty());
        let indices: Vec<usize> = outcome.valued.iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(outcome.valued[1].vehicle.model, "X5");
    }

    #[test]
    fn test_partial_failure_skips_invalid() {
        let forms = vec![
            form("toyota", "Corolla", 60_000),
            form("toyota", "Camry", 900_000),
            form("lada", "Niva", 60_000),
        ];
        let outcome = value_batch(&forms, PricingTables::builtin(), 2025, false).unwrap();
        assert_eq!(outcome.valued.len(), 1);
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[0].index, 2);
        assert_eq!(outcome.rejected[0].errors[0].field(), "odometer");
        assert_eq!(outcome.rejected[1].errors[0].field(), "brand");
    }

    #[test]
    fn test_all_invalid_fails() {
        let forms = vec![form("lada", "Niva", 60_000)];
        assert!(value_batch(&forms, PricingTables::builtin(), 2025, false).is_err());
    }

    #[test]
    fn test_empty_batch_is_ok() {
        let outcome = value_batch(&[], PricingTables::builtin(), 2025, false).unwrap();
        assert!(outcome.valued.is_empty());
    }

    #[test]
    fn test_load_batch_file() {
        let temp_path = env::temp_dir().join("carval_test_batch.yaml");
        let yaml = r#"
vehicles:
  - brand: subaru
    model: Outback
    year: 2020
    type: wagon
    transmission: cvt
    fuel_type: petrol
    odometer: 70000
    condition: good
    features: ["Bluetooth", "Heated Seats"]
  - brand: ford
    model: Ranger
"#;
        fs::write(&temp_path, yaml).unwrap();

        let batch = load_batch(&temp_path).unwrap();
        assert_eq!(batch.vehicles.len(), 2);
        assert_eq!(batch.vehicles[0].features.len(), 2);
        assert!(batch.vehicles[1].year.is_none());

        let outcome = value_batch(&batch.vehicles, PricingTables::builtin(), 2025, false).unwrap();
        assert_eq!(outcome.valued.len(), 1);
        assert_eq!(outcome.rejected[0].index, 2);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_path = env::temp_dir().join("carval_test_no_such_batch.yaml");
        let _ = fs::remove_file(&temp_path);
        let err = load_batch(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Failed to read vehicle file"));
    }
}
