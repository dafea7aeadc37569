use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Declares a closed vocabulary: a fieldless enum with a lowercase key per
/// variant, `ALL`, `Display`, and a case-insensitive `FromStr` that rejects
/// anything outside the vocabulary with `InputError::InvalidChoice`.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lowercase key used in config files and on the command line
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            fn expected() -> String {
                Self::ALL.iter().map(|v| v.key()).collect::<Vec<_>>().join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| InputError::InvalidChoice {
                        field: $field,
                        value: wanted.to_string(),
                        expected: Self::expected(),
                    })
            }
        }
    };
}

vocabulary! {
    /// Manufacturer. `Other` covers every make without its own price list.
    Brand, "brand" {
        Toyota => "toyota",
        Mazda => "mazda",
        Hyundai => "hyundai",
        Ford => "ford",
        Holden => "holden",
        Volkswagen => "volkswagen",
        Subaru => "subaru",
        Mitsubishi => "mitsubishi",
        Kia => "kia",
        Nissan => "nissan",
        Honda => "honda",
        Bmw => "bmw",
        Mercedes => "mercedes",
        Audi => "audi",
        Other => "other",
    }
}

vocabulary! {
    /// Body style; modifies the brand's depreciation rate.
    BodyType, "type" {
        Sedan => "sedan",
        Hatchback => "hatchback",
        Suv => "suv",
        Wagon => "wagon",
        Ute => "ute",
        Van => "van",
        Convertible => "convertible",
        Coupe => "coupe",
    }
}

vocabulary! {
    Transmission, "transmission" {
        Automatic => "automatic",
        Manual => "manual",
        Cvt => "cvt",
    }
}

vocabulary! {
    FuelType, "fuel_type" {
        Petrol => "petrol",
        Diesel => "diesel",
        Hybrid => "hybrid",
        Electric => "electric",
        Lpg => "lpg",
    }
}

vocabulary! {
    Condition, "condition" {
        Excellent => "excellent",
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

/// A fully validated vehicle, ready to be valued.
///
/// Odometer and year are not range-checked here; `VehicleForm::validate`
/// enforces the form's ranges before one of these is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInput {
    pub brand: Brand,
    pub model: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub body_type: BodyType,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    /// Kilometres
    pub odometer: u32,
    pub condition: Condition,
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl VehicleInput {
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Short human label, e.g. "2019 Toyota Corolla"
    pub fn label(&self) -> String {
        format!(
            "{} {} {}",
            self.year,
            crate::vehicle::catalog::brand_label(self.brand),
            self.model
        )
    }
}
