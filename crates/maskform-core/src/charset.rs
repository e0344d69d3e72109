#![forbid(unsafe_code)]

//! Allowed-character filters for keystroke input.

/// The set of characters a field accepts from the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedChars {
    /// Anything goes.
    #[default]
    Any,
    /// ASCII digits.
    Digits,
    /// Letters (accented included) and whitespace.
    Letters,
    /// Letters, digits and whitespace.
    Alphanumeric,
    /// ASCII letters, digits and `@._-+`.
    EmailSafe,
    /// Exactly the chars of the given string.
    Set(String),
}

impl AllowedChars {
    /// Build a filter from an explicit character list.
    pub fn set(chars: impl Into<String>) -> Self {
        Self::Set(chars.into())
    }

    /// Whether `c` may be typed.
    pub fn accepts(&self, c: char) -> bool {
        match self {
            Self::Any => true,
            Self::Digits => c.is_ascii_digit(),
            Self::Letters => c.is_alphabetic() || c.is_whitespace(),
            Self::Alphanumeric => c.is_alphanumeric() || c.is_whitespace(),
            Self::EmailSafe => c.is_ascii_alphanumeric() || "@._-+".contains(c),
            Self::Set(chars) => chars.contains(c),
        }
    }

    /// `text` with every rejected char removed.
    pub fn filter(&self, text: &str) -> String {
        text.chars().filter(|c| self.accepts(*c)).collect()
    }
}
