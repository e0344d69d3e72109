#![forbid(unsafe_code)]

//! Immutable field declarations.
//!
//! A [`FieldSpec`] is built once, when the field is declared, and never
//! changes afterwards. Mask patterns are compiled at build time so a bad
//! pattern fails at declaration instead of at the first keystroke.

use std::fmt;
use std::sync::Arc;

use maskform_core::{AllowedChars, MaskEngine, PatternConfigError, PatternSet};
use maskform_validation::{FieldRule, Validator};

use crate::kind::{FieldKind, InputClass, TypeProperties};

/// When a field re-evaluates its validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// On every text change.
    #[default]
    OnChange,
    /// When the field loses focus.
    OnBlur,
}

// ---------------------------------------------------------------------------
// FieldSpec
// ---------------------------------------------------------------------------

/// Declaration of one form field.
#[derive(Clone)]
pub struct FieldSpec {
    kind: FieldKind,
    properties: TypeProperties,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    validation_mode: ValidationMode,
    patterns: Option<PatternSet>,
    validators: Vec<Arc<dyn Validator>>,
}

impl FieldSpec {
    /// Start a declaration with the built-in defaults of `kind`.
    #[must_use]
    pub fn builder(kind: FieldKind) -> FieldSpecBuilder {
        FieldSpecBuilder::new(kind)
    }

    /// A required field with the built-in defaults of `kind`.
    pub fn new(kind: FieldKind) -> Result<Self, PatternConfigError> {
        Self::builder(kind).build()
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn properties(&self) -> &TypeProperties {
        &self.properties
    }

    /// Name used in error message parameters.
    pub fn name(&self) -> &str {
        &self.properties.name
    }

    pub fn input_class(&self) -> InputClass {
        self.properties.input_class
    }

    pub fn allowed_chars(&self) -> &AllowedChars {
        &self.properties.allowed_chars
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation_mode
    }

    /// Compiled masks, if the field is masked.
    pub fn patterns(&self) -> Option<&PatternSet> {
        self.patterns.as_ref()
    }

    pub fn is_masked(&self) -> bool {
        self.patterns.is_some()
    }

    /// Distinct literal chars of every mask.
    pub fn delimiters(&self) -> &[char] {
        &self.properties.delimiters
    }

    pub fn is_delimiter(&self, c: char) -> bool {
        self.properties.delimiters.contains(&c)
    }

    /// The length check of a required field: an exact length when the
    /// bounds coincide, else a minimum.
    pub fn length_rule(&self) -> Option<FieldRule> {
        let min = self.min_length?;
        Some(if self.max_length == Some(min) {
            FieldRule::ExactLength(min)
        } else {
            FieldRule::MinLength(min)
        })
    }

    /// The built-in type check of the field kind.
    pub fn type_rule(&self) -> Option<FieldRule> {
        self.kind.type_rule()
    }

    /// Extra validators run as part of the type check.
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// `text` with every delimiter removed.
    pub fn unmask(&self, text: &str) -> String {
        text.chars().filter(|c| !self.is_delimiter(*c)).collect()
    }

    /// Editable chars among the first `len` positions of the declared mask.
    ///
    /// Unmasked fields count every char.
    pub fn content_length(&self, len: usize) -> usize {
        match &self.patterns {
            Some(set) => set.declared().capacity_within(len),
            None => len,
        }
    }

    /// A fresh masking engine for this field.
    pub fn mask_engine(&self) -> Option<MaskEngine> {
        self.patterns
            .as_ref()
            .map(|set| MaskEngine::new(set.clone()).with_max_length(self.max_length))
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kind", &self.kind)
            .field("properties", &self.properties)
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("validation_mode", &self.validation_mode)
            .field("patterns", &self.patterns)
            .field("validator_count", &self.validators.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// FieldSpecBuilder
// ---------------------------------------------------------------------------

/// Builder for [`FieldSpec`].
///
/// Starts from the kind's defaults: required, its mask, its allowed chars and
/// its length bounds.
///
/// # Example
///
/// ```rust
/// use maskform::{FieldKind, FieldSpec, ValidationMode};
///
/// let spec = FieldSpec::builder(FieldKind::Cellphone)
///     .optional()
///     .validation_mode(ValidationMode::OnBlur)
///     .build()
///     .unwrap();
///
/// assert!(!spec.is_required());
/// assert_eq!(spec.patterns().map(|p| p.len()), Some(2));
/// ```
#[derive(Clone)]
pub struct FieldSpecBuilder {
    kind: FieldKind,
    properties: TypeProperties,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    validation_mode: ValidationMode,
    validators: Vec<Arc<dyn Validator>>,
}

impl FieldSpecBuilder {
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            properties: TypeProperties::for_kind(kind),
            required: true,
            min_length: kind.default_min_length(),
            max_length: kind.default_max_length(),
            validation_mode: ValidationMode::default(),
            validators: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = name.into();
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn optional(self) -> Self {
        self.required(false)
    }

    #[must_use]
    pub fn min_length(mut self, min: Option<usize>) -> Self {
        self.min_length = min;
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: Option<usize>) -> Self {
        self.max_length = max;
        self
    }

    /// Replace the mask, dropping any alternate layouts.
    #[must_use]
    pub fn mask(mut self, pattern: impl Into<String>) -> Self {
        self.properties.mask_pattern = Some(pattern.into());
        self.properties.alternate_patterns.clear();
        self
    }

    /// Add a layout of a different length next to the declared mask.
    #[must_use]
    pub fn alternate_mask(mut self, pattern: impl Into<String>) -> Self {
        self.properties.alternate_patterns.push(pattern.into());
        self
    }

    /// Remove every mask.
    #[must_use]
    pub fn unmasked(mut self) -> Self {
        self.properties.mask_pattern = None;
        self.properties.alternate_patterns.clear();
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: char) -> Self {
        self.properties.mask_placeholder = placeholder;
        self
    }

    #[must_use]
    pub fn allowed_chars(mut self, allowed: AllowedChars) -> Self {
        self.properties.allowed_chars = allowed;
        self
    }

    #[must_use]
    pub fn input_class(mut self, class: InputClass) -> Self {
        self.properties.input_class = class;
        self
    }

    #[must_use]
    pub fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Run `validator` after the built-in type check.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Compile the masks and check them against the length bounds.
    pub fn build(self) -> Result<FieldSpec, PatternConfigError> {
        let mut properties = self.properties;

        let patterns = match &properties.mask_pattern {
            Some(declared) => {
                let all = std::iter::once(declared.as_str())
                    .chain(properties.alternate_patterns.iter().map(String::as_str));
                Some(PatternSet::new(
                    all,
                    properties.mask_placeholder,
                    declared.chars().count(),
                )?)
            }
            None => None,
        };

        if let Some(set) = &patterns {
            let pattern_len = set.declared().len();
            if self.kind != FieldKind::Custom
                && let Some(max_length) = self.max_length
                && max_length != pattern_len
            {
                return Err(PatternConfigError::MaxLengthMismatch {
                    max_length,
                    pattern_len,
                });
            }
            properties.delimiters = set.delimiters().to_vec();
        }

        Ok(FieldSpec {
            kind: self.kind,
            properties,
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            validation_mode: self.validation_mode,
            patterns,
            validators: self.validators,
        })
    }
}

impl fmt::Debug for FieldSpecBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpecBuilder")
            .field("kind", &self.kind)
            .field("properties", &self.properties)
            .field("required", &self.required)
            .field("validator_count", &self.validators.len())
            .finish_non_exhaustive()
    }
}
