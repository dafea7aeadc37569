pub mod catalog;
pub mod form;
pub mod types;

pub use form::{VehicleForm, MAX_ODOMETER};
pub use types::{BodyType, Brand, Condition, FuelType, Transmission, VehicleInput};
