//! Reference data offered by the valuation form: brand names, the models
//! listed for each brand, the selectable features and the model-year window.

use super::types::Brand;

/// Features a user can tick on the form. Free text is accepted too; each
/// feature counts the same towards the valuation.
pub const FEATURES: &[&str] = &[
    "Leather Seats",
    "Sunroof",
    "Navigation System",
    "Bluetooth",
    "Backup Camera",
    "Apple CarPlay/Android Auto",
    "Heated Seats",
    "Keyless Entry",
    "Premium Audio",
    "Alloy Wheels",
];

/// How many years back the model-year list reaches
pub const DEFAULT_YEARS_BACK: i32 = 30;

pub fn brand_label(brand: Brand) -> &'static str {
    match brand {
        Brand::Toyota => "Toyota",
        Brand::Mazda => "Mazda",
        Brand::Hyundai => "Hyundai",
        Brand::Ford => "Ford",
        Brand::Holden => "Holden",
        Brand::Volkswagen => "Volkswagen",
        Brand::Subaru => "Subaru",
        Brand::Mitsubishi => "Mitsubishi",
        Brand::Kia => "Kia",
        Brand::Nissan => "Nissan",
        Brand::Honda => "Honda",
        Brand::Bmw => "BMW",
        Brand::Mercedes => "Mercedes-Benz",
        Brand::Audi => "Audi",
        Brand::Other => "Other",
    }
}

/// Models listed on the form for a brand
pub fn models(brand: Brand) -> &'static [&'static str] {
    match brand {
        Brand::Toyota => &[
            "Corolla",
            "Camry",
            "RAV4",
            "Hilux",
            "Yaris",
            "Prado",
            "Kluger",
            "Land Cruiser",
        ],
        Brand::Mazda => &["Mazda3", "Mazda6", "CX-5", "CX-3", "CX-9", "BT-50", "MX-5"],
        Brand::Hyundai => &["i30", "Tucson", "Santa Fe", "Kona", "Venue", "iLoad", "Accent"],
        Brand::Ford => &[
            "Ranger", "Focus", "Everest", "Escape", "Mustang", "Transit", "Endura",
        ],
        Brand::Holden => &[
            "Commodore",
            "Astra",
            "Colorado",
            "Trax",
            "Equinox",
            "Acadia",
            "Trailblazer",
        ],
        Brand::Volkswagen => &[
            "Golf", "Polo", "Tiguan", "Passat", "T-Cross", "Amarok", "Touareg",
        ],
        Brand::Subaru => &["Forester", "Outback", "XV", "Impreza", "WRX", "Liberty", "BRZ"],
        Brand::Mitsubishi => &[
            "Triton",
            "ASX",
            "Outlander",
            "Pajero",
            "Eclipse Cross",
            "Mirage",
            "Pajero Sport",
        ],
        Brand::Kia => &[
            "Cerato", "Sportage", "Sorento", "Picanto", "Stinger", "Carnival", "Seltos",
        ],
        Brand::Nissan => &[
            "X-Trail",
            "Navara",
            "Qashqai",
            "Patrol",
            "Juke",
            "Pathfinder",
            "370Z",
        ],
        Brand::Honda => &["Civic", "CR-V", "HR-V", "Accord", "Jazz", "Odyssey", "City"],
        Brand::Bmw => &["3 Series", "5 Series", "X3", "X5", "1 Series", "X1", "7 Series"],
        Brand::Mercedes => &["C-Class", "E-Class", "GLC", "A-Class", "GLA", "GLE", "S-Class"],
        Brand::Audi => &["A3", "A4", "Q5", "Q3", "A1", "Q7", "A5"],
        Brand::Other => &["Model S", "Model 3", "Prius", "Sonata", "Accent", "i20", "Elantra"],
    }
}

/// Whether the form lists `model` for `brand` (exact match, as the form
/// submits the listed spelling)
pub fn is_listed_model(brand: Brand, model: &str) -> bool {
    models(brand).contains(&model)
}

/// Selectable model years, newest first: next year's models (often released
/// early) down to `current_year - years_back`.
pub fn model_years(current_year: i32, years_back: i32) -> Vec<i32> {
    let newest = current_year.saturating_add(1);
    let oldest = current_year.saturating_sub(years_back.max(0));
    (oldest..=newest).rev().collect()
}
