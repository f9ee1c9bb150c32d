pub mod calculations;
pub mod models;
pub mod validation;

pub use calculations::{CostingError, CostingResult, aggregate, calculate, calculate_raw};
pub use models::*;
pub use validation::RawCostingInput;
