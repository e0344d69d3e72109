#![forbid(unsafe_code)]

//! Field kinds and their built-in type properties.

use maskform_core::{AllowedChars, DEFAULT_PLACEHOLDER};
use maskform_validation::{FieldRule, NationalIdFormat};

/// The built-in field types.
///
/// Every kind except [`FieldKind::Custom`] comes with a display name, an input
/// class, an allowed character set, an optional mask and default length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text: letters, digits and whitespace.
    PlainText,
    /// Letters and whitespace only.
    PlainTextLetters,
    /// E-mail address, checked with the minimal shape rule.
    Email,
    /// `##/##/####`.
    Date,
    /// Landline, `(##) ####-####`.
    Phone,
    /// Mobile, `(##) #####-####`, with the 8-digit layout as an alternate.
    Cellphone,
    /// 11-digit individual tax ID, `###.###.###-##`, check digits verified.
    NationalIdShort,
    /// 14-digit company tax ID, `##.###.###/####-##`, check digits verified.
    NationalIdLong,
    /// `#####-###`.
    PostalCode,
    /// Everything comes from the caller.
    Custom,
}

/// Keyboard class hint for the widget layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputClass {
    #[default]
    Text,
    Email,
    Number,
}

impl FieldKind {
    /// Every kind, in declaration order.
    pub const ALL: [FieldKind; 10] = [
        Self::PlainText,
        Self::PlainTextLetters,
        Self::Email,
        Self::Date,
        Self::Phone,
        Self::Cellphone,
        Self::NationalIdShort,
        Self::NationalIdLong,
        Self::PostalCode,
        Self::Custom,
    ];

    /// Name used in error message parameters.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PlainText | Self::PlainTextLetters | Self::Custom => "Field",
            Self::Email => "E-mail",
            Self::Date => "Date",
            Self::Phone => "Phone",
            Self::Cellphone => "Cellphone",
            Self::NationalIdShort => "Tax ID",
            Self::NationalIdLong => "Company tax ID",
            Self::PostalCode => "Postal code",
        }
    }

    pub const fn input_class(self) -> InputClass {
        match self {
            Self::PlainText | Self::PlainTextLetters | Self::Custom => InputClass::Text,
            Self::Email => InputClass::Email,
            _ => InputClass::Number,
        }
    }

    pub fn allowed_chars(self) -> AllowedChars {
        match self {
            Self::PlainText => AllowedChars::Alphanumeric,
            Self::PlainTextLetters => AllowedChars::Letters,
            Self::Email => AllowedChars::EmailSafe,
            Self::Custom => AllowedChars::Any,
            _ => AllowedChars::Digits,
        }
    }

    /// Built-in masks; the first one is the declared layout.
    pub const fn mask_patterns(self) -> &'static [&'static str] {
        match self {
            Self::Date => &["##/##/####"],
            Self::Phone => &["(##) ####-####"],
            Self::Cellphone => &["(##) #####-####", "(##) ####-####"],
            Self::NationalIdShort => &["###.###.###-##"],
            Self::NationalIdLong => &["##.###.###/####-##"],
            Self::PostalCode => &["#####-###"],
            _ => &[],
        }
    }

    pub const fn default_min_length(self) -> Option<usize> {
        match self {
            Self::Email => Some(6),
            Self::Date => Some(8),
            Self::Phone | Self::Cellphone | Self::NationalIdShort => Some(14),
            Self::NationalIdLong => Some(18),
            Self::PostalCode => Some(9),
            _ => None,
        }
    }

    pub const fn default_max_length(self) -> Option<usize> {
        match self {
            Self::Email => Some(255),
            Self::Date => Some(10),
            Self::Phone | Self::NationalIdShort => Some(14),
            Self::Cellphone => Some(15),
            Self::NationalIdLong => Some(18),
            Self::PostalCode => Some(9),
            _ => None,
        }
    }

    /// The check a non-blank value of this kind must pass.
    pub const fn type_rule(self) -> Option<FieldRule> {
        match self {
            Self::Email => Some(FieldRule::Email),
            Self::NationalIdShort => Some(FieldRule::NationalId(NationalIdFormat::Short)),
            Self::NationalIdLong => Some(FieldRule::NationalId(NationalIdFormat::Long)),
            _ => None,
        }
    }

    /// Whether the kind ships with a mask.
    pub const fn is_masked(self) -> bool {
        !self.mask_patterns().is_empty()
    }
}

/// Type-derived properties of a field, resolved once at declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeProperties {
    /// Name used in error message parameters.
    pub name: String,
    pub input_class: InputClass,
    pub allowed_chars: AllowedChars,
    /// Declared mask.
    pub mask_pattern: Option<String>,
    /// Other layouts sharing the declared mask's delimiters.
    pub alternate_patterns: Vec<String>,
    pub mask_placeholder: char,
    /// Distinct literal chars of every mask; filled in at build time.
    pub delimiters: Vec<char>,
}

impl TypeProperties {
    /// The built-in properties of `kind`.
    pub fn for_kind(kind: FieldKind) -> Self {
        let mut patterns = kind.mask_patterns().iter().map(|p| (*p).to_string());
        Self {
            name: kind.display_name().to_string(),
            input_class: kind.input_class(),
            allowed_chars: kind.allowed_chars(),
            mask_pattern: patterns.next(),
            alternate_patterns: patterns.collect(),
            mask_placeholder: DEFAULT_PLACEHOLDER,
            delimiters: Vec::new(),
        }
    }
}
