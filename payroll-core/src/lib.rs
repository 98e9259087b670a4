pub mod calculations;
pub mod forms;
pub mod models;
pub mod policy;
pub mod validation;

pub use calculations::common::Dong;
pub use models::*;
pub use policy::{PayrollPolicy, PolicyError};
pub use validation::{Validate, ValidationResult};
