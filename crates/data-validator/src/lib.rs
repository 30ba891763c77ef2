//! Override Value Validation
//!
//! Parses externally supplied override text and checks it against the
//! physical range known for each Mode 01 PID.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{parse_value, BoundsCheck, ValidationConfig, Validator};
