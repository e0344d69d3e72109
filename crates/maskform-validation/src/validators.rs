#![forbid(unsafe_code)]

//! Field rules and the validator seam.
//!
//! [`FieldRule`] covers every check a built-in field kind needs. Callers add
//! their own checks through [`Validator`], which closures implement too.

use std::fmt;

use crate::checksum;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// A required field is blank.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Shorter than the minimum length.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Shorter than a fixed length.
pub const ERROR_CODE_EXACT_LENGTH: &str = "length";
/// Not shaped like an e-mail address.
pub const ERROR_CODE_EMAIL: &str = "email";
/// Wrong national ID check digits.
pub const ERROR_CODE_NATIONAL_ID: &str = "national_id";

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A failed check: a stable code for message lookup, a default message and
/// the parameters a message layer interpolates.
///
/// `{key}` in the message is replaced by the parameter of that name when the
/// error is displayed.
///
/// ```rust
/// use maskform_validation::ValidationError;
///
/// let err = ValidationError::new("length", "{name} needs {len} characters")
///     .with_param("name", "Tax ID")
///     .with_param("len", 14);
///
/// assert_eq!(err.param("len"), Some("14"));
/// assert_eq!(err.to_string(), "Tax ID needs 14 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable identifier for message lookup.
    pub code: &'static str,
    /// Default message template.
    pub message: String,
    params: Vec<(String, String)>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Set a parameter, replacing an earlier value under the same key.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.message.as_str();
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            f.write_str(&rest[..open])?;
            let key = &rest[open + 1..close];
            match self.param(key) {
                Some(value) => f.write_str(value)?,
                None => f.write_str(&rest[open..=close])?,
            }
            rest = &rest[close + 1..];
        }
        f.write_str(rest)
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[must_use]
    pub fn into_error(self) -> Option<ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<Option<ValidationError>> for ValidationResult {
    fn from(error: Option<ValidationError>) -> Self {
        error.map_or(Self::Valid, Self::Invalid)
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// A caller-supplied check on the field text.
///
/// Runs after the field kind's own type check. Closures taking `&str` and
/// returning a [`ValidationResult`] implement it.
///
/// ```rust
/// use maskform_validation::{ValidationError, ValidationResult, Validator};
///
/// let no_spaces = |value: &str| {
///     if value.contains(' ') {
///         ValidationResult::Invalid(ValidationError::new("no_spaces", "No spaces"))
///     } else {
///         ValidationResult::Valid
///     }
/// };
///
/// assert!(no_spaces.validate("abc").is_valid());
/// assert!(no_spaces.validate("a b").is_invalid());
/// ```
pub trait Validator: Send + Sync {
    fn validate(&self, value: &str) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationResult {
        self(value)
    }
}

// ---------------------------------------------------------------------------
// FieldRule
// ---------------------------------------------------------------------------

/// Which national ID layout a [`FieldRule::NationalId`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NationalIdFormat {
    /// 11 digits, two mod-11 check digits.
    Short,
    /// 14 digits, two cycling-weight check digits.
    Long,
}

impl NationalIdFormat {
    /// Digits the ID carries.
    pub const fn digits(self) -> usize {
        match self {
            Self::Short => checksum::NATIONAL_ID_SHORT_DIGITS,
            Self::Long => checksum::NATIONAL_ID_LONG_DIGITS,
        }
    }

    fn is_valid(self, value: &str) -> bool {
        match self {
            Self::Short => checksum::is_valid_national_id_short(value),
            Self::Long => checksum::is_valid_national_id_long(value),
        }
    }
}

/// One built-in check on the field text.
///
/// Lengths count chars of the masked text, delimiters included. The type
/// rules ([`FieldRule::Email`], [`FieldRule::NationalId`]) accept empty input
/// so that a blank optional field never fails them.
///
/// ```rust
/// use maskform_validation::{ERROR_CODE_NATIONAL_ID, FieldRule, NationalIdFormat};
///
/// let rule = FieldRule::NationalId(NationalIdFormat::Short);
/// assert!(rule.check("100.202.149-95").is_valid());
///
/// let err = rule.check("123.456.789-01").into_error().unwrap();
/// assert_eq!(err.code, ERROR_CODE_NATIONAL_ID);
/// assert_eq!(err.to_string(), "Invalid 11-digit ID number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Not blank after trimming whitespace.
    Required,
    /// At least this many chars.
    MinLength(usize),
    /// Exactly this many chars. Input is clipped at the mask, so only the
    /// short side is checked.
    ExactLength(usize),
    /// The minimal shape of [`checksum::is_valid_email_shape`].
    Email,
    /// National ID check digits; non-digits are ignored.
    NationalId(NationalIdFormat),
}

impl FieldRule {
    /// Error code reported when the rule fails.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => ERROR_CODE_REQUIRED,
            Self::MinLength(_) => ERROR_CODE_MIN_LENGTH,
            Self::ExactLength(_) => ERROR_CODE_EXACT_LENGTH,
            Self::Email => ERROR_CODE_EMAIL,
            Self::NationalId(_) => ERROR_CODE_NATIONAL_ID,
        }
    }

    /// Run the rule against `value`.
    pub fn check(self, value: &str) -> ValidationResult {
        let code = self.code();
        let error = match self {
            Self::Required => value
                .trim()
                .is_empty()
                .then(|| ValidationError::new(code, "{name} is required")),
            Self::MinLength(min) => {
                let actual = value.chars().count();
                (actual < min).then(|| {
                    ValidationError::new(code, "{name} needs at least {min} characters")
                        .with_param("min", min)
                        .with_param("actual", actual)
                })
            }
            Self::ExactLength(len) => {
                let actual = value.chars().count();
                (actual < len).then(|| {
                    ValidationError::new(code, "{name} needs {len} characters")
                        .with_param("len", len)
                        .with_param("actual", actual)
                })
            }
            Self::Email => (!value.is_empty() && !checksum::is_valid_email_shape(value))
                .then(|| ValidationError::new(code, "Invalid e-mail address")),
            Self::NationalId(format) => (!value.is_empty() && !format.is_valid(value)).then(|| {
                ValidationError::new(code, "Invalid {digits}-digit ID number")
                    .with_param("digits", format.digits())
            }),
        };
        error.into()
    }
}

impl Validator for FieldRule {
    fn validate(&self, value: &str) -> ValidationResult {
        self.check(value)
    }
}
