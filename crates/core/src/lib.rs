pub mod domain;
pub mod validation;

pub use validation::{ValidationEngine, ValidationError, ValidationMode};
