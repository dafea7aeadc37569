pub mod config;
pub mod engine;
pub mod factors;
pub mod tables;
pub mod validation;

pub use config::PricingConfig;
pub use engine::{estimate, estimate_with, PriceBreakdown, PriceRange, ValuationResult};
pub use factors::{Confidence, Impact, ValuationFactor};
pub use tables::{PriceSource, PricingTables};
pub use validation::validate_pricing;
