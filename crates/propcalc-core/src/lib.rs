pub mod display;
pub mod error;
pub mod loan;
pub mod parse;
pub mod time_value;
pub mod types;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

pub use error::PropCalcError;
pub use types::*;

/// Standard result type for all propcalc operations
pub type PropCalcResult<T> = Result<T, PropCalcError>;
