#![forbid(unsafe_code)]

//! Validation policy knobs.
//!
//! Decisions are deterministic given the environment, and tests inject their
//! own lookup through [`ValidationPolicy::from_env_with`].

/// Environment variable making optional fields fail on type errors (`1/0/true/false`).
const ENV_STRICT_OPTIONAL: &str = "MASKFORM_STRICT_OPTIONAL";

/// Form-wide validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationPolicy {
    /// When set, a type-check failure on an optional, non-empty field turns its
    /// validity off. By default the failure is only reported.
    pub strict_optional_type_check: bool,
}

impl ValidationPolicy {
    /// Lenient policy: optional fields report type errors without failing.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            strict_optional_type_check: false,
        }
    }

    /// Strict policy: any type error fails the field.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_optional_type_check: true,
        }
    }

    /// Detect policy from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Detect policy using a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();
        if let Some(value) = env_override_bool(&get_env, ENV_STRICT_OPTIONAL) {
            policy.strict_optional_type_check = value;
        }
        policy
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_override_bool<F>(get_env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).and_then(|value| parse_bool(&value))
}
