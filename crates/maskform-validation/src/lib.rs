#![forbid(unsafe_code)]

//! Field validation for maskform.
//!
//! - [`FieldRule`]: the built-in checks (presence, length, e-mail shape,
//!   national ID check digits), each failing with a stable error code
//! - [`Validator`]: the seam for caller-supplied checks
//! - [`checksum`]: the pure check-digit and shape functions behind the rules
//!
//! # Example
//!
//! ```rust
//! use maskform_validation::{FieldRule, NationalIdFormat};
//!
//! assert!(FieldRule::Required.check("hello").is_valid());
//! assert!(FieldRule::Required.check("   ").is_invalid());
//!
//! let tax_id = [
//!     FieldRule::Required,
//!     FieldRule::ExactLength(14),
//!     FieldRule::NationalId(NationalIdFormat::Short),
//! ];
//! assert!(tax_id.iter().all(|rule| rule.check("100.202.149-95").is_valid()));
//! ```

pub mod checksum;
mod validators;

pub use validators::{
    ERROR_CODE_EMAIL, ERROR_CODE_EXACT_LENGTH, ERROR_CODE_MIN_LENGTH, ERROR_CODE_NATIONAL_ID,
    ERROR_CODE_REQUIRED, FieldRule, NationalIdFormat, ValidationError, ValidationResult, Validator,
};
