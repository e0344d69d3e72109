#![forbid(unsafe_code)]

//! The per-field validity rule.
//!
//! Rules run in order and stop at the first failure:
//!
//! 1. A required field must not be blank.
//! 2. A required field with a minimum length must reach it. When the minimum
//!    equals the maximum the failure is reported as an exact-length mismatch.
//! 3. The type check of the field kind, then any extra validators. A failure
//!    always fails a required field. On an optional field it is reported but
//!    only fails the field under [`ValidationPolicy::strict_optional_type_check`].
//!
//! Blank optional fields are valid and never reach the type check.

use maskform_validation::{FieldRule, ValidationError, ValidationResult};

use crate::policy::ValidationPolicy;
use crate::spec::FieldSpec;

/// Why a field is not valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is blank.
    EmptyRequired,
    /// Shorter than the minimum length.
    MinLengthNotMet,
    /// Shorter than a fixed length (minimum equals maximum).
    ExactLengthMismatch,
    /// Failed the type check or a custom validator.
    TypeInvalid,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyRequired => "empty_required",
            Self::MinLengthNotMet => "min_length_not_met",
            Self::ExactLengthMismatch => "exact_length_mismatch",
            Self::TypeInvalid => "type_invalid",
        }
    }
}

impl From<FieldRule> for ErrorKind {
    fn from(rule: FieldRule) -> Self {
        match rule {
            FieldRule::Required => Self::EmptyRequired,
            FieldRule::MinLength(_) => Self::MinLengthNotMet,
            FieldRule::ExactLength(_) => Self::ExactLengthMismatch,
            FieldRule::Email | FieldRule::NationalId(_) => Self::TypeInvalid,
        }
    }
}

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the field counts as valid for submission.
    pub ok: bool,
    /// The failed rule, if any. May be set while `ok` is true (lenient
    /// optional type check).
    pub error: Option<ErrorKind>,
    /// Code and message parameters of the failure for a message layer.
    pub detail: Option<ValidationError>,
}

impl Evaluation {
    /// A passing evaluation.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            ok: true,
            error: None,
            detail: None,
        }
    }

    fn failed(ok: bool, error: ErrorKind, detail: ValidationError) -> Self {
        Self {
            ok,
            error: Some(error),
            detail: Some(detail),
        }
    }
}

/// Evaluate `text` against the rules of `spec`.
///
/// ```rust
/// use maskform::{ErrorKind, FieldKind, FieldSpec, ValidationPolicy, evaluate};
///
/// let spec = FieldSpec::new(FieldKind::Email).unwrap();
/// let eval = evaluate(&spec, "aaaaaaa", &ValidationPolicy::default());
/// assert!(!eval.ok);
/// assert_eq!(eval.error, Some(ErrorKind::TypeInvalid));
/// ```
pub fn evaluate(spec: &FieldSpec, text: &str, policy: &ValidationPolicy) -> Evaluation {
    if let Some(detail) = FieldRule::Required.check(text).into_error() {
        if !spec.is_required() {
            return Evaluation::valid();
        }
        let detail = detail.with_param("name", spec.name());
        return Evaluation::failed(false, ErrorKind::EmptyRequired, detail);
    }

    if spec.is_required()
        && let Some(rule) = spec.length_rule()
        && let Some(detail) = rule.check(text).into_error()
    {
        let mut detail = detail.with_param("name", spec.name());
        if let Some(min) = spec.min_length() {
            detail = detail.with_param("content_min", spec.content_length(min));
        }
        return Evaluation::failed(false, ErrorKind::from(rule), detail);
    }

    if let Some(detail) = type_check(spec, text).into_error() {
        let ok = !spec.is_required() && !policy.strict_optional_type_check;
        return Evaluation::failed(
            ok,
            ErrorKind::TypeInvalid,
            detail.with_param("name", spec.name()),
        );
    }

    Evaluation::valid()
}

fn type_check(spec: &FieldSpec, text: &str) -> ValidationResult {
    spec.type_rule()
        .map(|rule| rule.check(text))
        .into_iter()
        .chain(spec.validators().iter().map(|v| v.validate(text)))
        .find(ValidationResult::is_invalid)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldKind;
    use maskform_validation::{
        ERROR_CODE_EMAIL, ERROR_CODE_EXACT_LENGTH, ERROR_CODE_NATIONAL_ID, ERROR_CODE_REQUIRED,
    };

    fn lenient() -> ValidationPolicy {
        ValidationPolicy::lenient()
    }

    fn spec(kind: FieldKind) -> FieldSpec {
        FieldSpec::new(kind).unwrap()
    }

    fn optional(kind: FieldKind) -> FieldSpec {
        FieldSpec::builder(kind).optional().build().unwrap()
    }

    #[test]
    fn blank_required_fails() {
        for text in ["", "   "] {
            let eval = evaluate(&spec(FieldKind::PlainText), text, &lenient());
            assert!(!eval.ok);
            assert_eq!(eval.error, Some(ErrorKind::EmptyRequired));
            let detail = eval.detail.unwrap();
            assert_eq!(detail.code, ERROR_CODE_REQUIRED);
            assert_eq!(detail.to_string(), "Field is required");
        }
    }

    #[test]
    fn blank_optional_passes() {
        let eval = evaluate(&optional(FieldKind::NationalIdShort), "", &lenient());
        assert_eq!(eval, Evaluation::valid());
    }

    #[test]
    fn exact_length_when_bounds_match() {
        let eval = evaluate(&spec(FieldKind::NationalIdShort), "100.202", &lenient());
        assert!(!eval.ok);
        assert_eq!(eval.error, Some(ErrorKind::ExactLengthMismatch));
        let detail = eval.detail.unwrap();
        assert_eq!(detail.code, ERROR_CODE_EXACT_LENGTH);
        assert_eq!(detail.param("content_min"), Some("11"));
    }

    #[test]
    fn min_length_when_bounds_differ() {
        let eval = evaluate(&spec(FieldKind::Email), "a@b.c", &lenient());
        assert!(!eval.ok);
        assert_eq!(eval.error, Some(ErrorKind::MinLengthNotMet));

        // Cellphone accepts the 14-char layout.
        let eval = evaluate(&spec(FieldKind::Cellphone), "(11) 8765-4321", &lenient());
        assert!(eval.ok);
    }

    #[test]
    fn national_id_short_checked_unmasked() {
        let ok = evaluate(&spec(FieldKind::NationalIdShort), "100.202.149-95", &lenient());
        assert_eq!(ok, Evaluation::valid());

        let bad = evaluate(&spec(FieldKind::NationalIdShort), "123.456.789-01", &lenient());
        assert!(!bad.ok);
        assert_eq!(bad.error, Some(ErrorKind::TypeInvalid));
        assert_eq!(bad.detail.unwrap().code, ERROR_CODE_NATIONAL_ID);
    }

    #[test]
    fn national_id_long_and_repeated_digits() {
        assert!(evaluate(&spec(FieldKind::NationalIdLong), "41.705.727/0001-51", &lenient()).ok);
        let eval = evaluate(&spec(FieldKind::NationalIdLong), "00.000.000/0000-00", &lenient());
        assert_eq!(eval.error, Some(ErrorKind::TypeInvalid));
    }

    #[test]
    fn email_type_check() {
        let eval = evaluate(&spec(FieldKind::Email), "aaaaaaa", &lenient());
        assert!(!eval.ok);
        assert_eq!(eval.error, Some(ErrorKind::TypeInvalid));
        assert_eq!(eval.detail.unwrap().code, ERROR_CODE_EMAIL);

        assert!(evaluate(&spec(FieldKind::Email), "aaa@gmail.com", &lenient()).ok);
    }

    #[test]
    fn optional_type_failure_is_reported_but_lenient() {
        let eval = evaluate(&optional(FieldKind::Email), "aaaaaaa", &lenient());
        assert!(eval.ok);
        assert_eq!(eval.error, Some(ErrorKind::TypeInvalid));
    }

    #[test]
    fn optional_type_failure_strict() {
        let eval = evaluate(
            &optional(FieldKind::Email),
            "aaaaaaa",
            &ValidationPolicy::strict(),
        );
        assert!(!eval.ok);
        assert_eq!(eval.error, Some(ErrorKind::TypeInvalid));
    }

    #[test]
    fn optional_skips_length_rule() {
        let eval = evaluate(&optional(FieldKind::Date), "12/", &lenient());
        assert_eq!(eval, Evaluation::valid());
    }

    #[test]
    fn custom_validator_runs_as_type_check() {
        let no_spaces = |value: &str| {
            ValidationResult::from(
                value
                    .contains(' ')
                    .then(|| ValidationError::new("no_spaces", "No spaces")),
            )
        };

        let spec = FieldSpec::builder(FieldKind::Custom)
            .validator(no_spaces)
            .build()
            .unwrap();
        assert!(evaluate(&spec, "abc", &lenient()).ok);

        let eval = evaluate(&spec, "a b", &lenient());
        assert!(!eval.ok);
        assert_eq!(eval.error, Some(ErrorKind::TypeInvalid));
        assert_eq!(eval.detail.unwrap().code, "no_spaces");
    }
}
