#![forbid(unsafe_code)]

//! Form state and the submit aggregator.
//!
//! A [`Form`] owns every field's [`FieldSpec`], its mutable [`FieldState`] and
//! its masking engine. Each event is processed to completion in one call:
//! keystroke filter, mask rewrite, field evaluation, then a full re-scan of
//! every field to derive the [`SubmitState`].
//!
//! # Invariants
//!
//! 1. `submit_state()` is `Enabled` iff every field is ok and the external
//!    condition holds, after every call that mutates the form.
//! 2. Only the addressed field's state changes during an event.
//! 3. A self-triggered echo of a mask rewrite never re-runs validation.

use std::borrow::Cow;
use std::fmt;

use maskform_core::{EditDelta, MaskEngine, MaskOutcome, PatternConfigError};
use maskform_validation::ValidationError;

use crate::evaluate::{ErrorKind, Evaluation, evaluate};
use crate::policy::ValidationPolicy;
use crate::spec::{FieldSpec, FieldSpecBuilder, ValidationMode};

// ---------------------------------------------------------------------------
// Identifiers and errors
// ---------------------------------------------------------------------------

/// Index of a field within its [`Form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by [`Form`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No field has this id.
    UnknownField(FieldId),
    /// A field declaration failed to compile.
    Config(PatternConfigError),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(id) => write!(f, "unknown field {id}"),
            Self::Config(err) => write!(f, "invalid field declaration: {err}"),
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::UnknownField(_) => None,
        }
    }
}

impl From<PatternConfigError> for FormError {
    fn from(err: PatternConfigError) -> Self {
        Self::Config(err)
    }
}

// ---------------------------------------------------------------------------
// FieldState / SubmitState
// ---------------------------------------------------------------------------

/// Mutable runtime data of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    text: String,
    ok: bool,
    error: Option<ErrorKind>,
    detail: Option<ValidationError>,
    touched: bool,
}

impl FieldState {
    fn initial(spec: &FieldSpec) -> Self {
        Self {
            ok: !spec.is_required(),
            ..Self::default()
        }
    }

    /// Current buffer, delimiters included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Code and message parameters of the last failure.
    pub fn error_detail(&self) -> Option<&ValidationError> {
        self.detail.as_ref()
    }

    /// Whether the field has lost focus at least once.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    fn apply(&mut self, eval: Evaluation) {
        self.ok = eval.ok;
        self.error = eval.error;
        self.detail = eval.detail;
    }
}

/// Observable state of the submit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Disabled,
    Enabled,
}

impl SubmitState {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for SubmitState {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Field {
    spec: FieldSpec,
    state: FieldState,
    engine: Option<MaskEngine>,
}

impl Field {
    fn new(spec: FieldSpec) -> Self {
        Self {
            state: FieldState::initial(&spec),
            engine: spec.mask_engine(),
            spec,
        }
    }

    /// Drop inserted chars the field does not accept. Delimiters always pass.
    fn filter_keystrokes<'a>(&self, delta: &'a EditDelta) -> Cow<'a, EditDelta> {
        let allowed = self.spec.allowed_chars();
        let accepts = |c: char| allowed.accepts(c) || self.spec.is_delimiter(c);
        if delta.inserted_chars().all(accepts) {
            return Cow::Borrowed(delta);
        }

        let kept: String = delta.inserted_chars().filter(|c| accepts(*c)).collect();
        let after: String = delta
            .after
            .chars()
            .take(delta.start)
            .chain(kept.chars())
            .chain(delta.after.chars().skip(delta.start + delta.inserted))
            .collect();
        #[cfg(feature = "tracing")]
        tracing::trace!(rejected = delta.inserted - kept.chars().count(), "filtered keystrokes");
        Cow::Owned(EditDelta::new(
            delta.before.clone(),
            after,
            delta.start,
            delta.removed,
            kept.chars().count(),
        ))
    }

    fn rewrite(&mut self, delta: &EditDelta) -> MaskOutcome {
        if let Some(engine) = self.engine.as_mut() {
            return engine.apply(delta);
        }

        // Unmasked: only the length cap applies.
        let mut text = delta.after.clone();
        let mut cursor = delta.caret();
        if let Some(max) = self.spec.max_length()
            && text.chars().count() > max
        {
            text = text.chars().take(max).collect();
            cursor = cursor.min(max);
        }
        MaskOutcome {
            rewritten: text != delta.after,
            text,
            cursor,
            suppressed: false,
        }
    }

    fn format(&self, raw: &str) -> String {
        match &self.engine {
            Some(engine) => engine.format(&self.spec.allowed_chars().filter(raw)),
            None => {
                let filtered = self.spec.allowed_chars().filter(raw);
                match self.spec.max_length() {
                    Some(max) => filtered.chars().take(max).collect(),
                    None => filtered,
                }
            }
        }
    }

    fn validate(&mut self, policy: &ValidationPolicy) {
        let eval = evaluate(&self.spec, &self.state.text, policy);
        #[cfg(feature = "tracing")]
        tracing::trace!(ok = eval.ok, error = ?eval.error, "field evaluated");
        self.state.apply(eval);
    }
}

/// A set of fields plus one external condition, driving a submit action.
///
/// # Example
///
/// ```rust
/// use maskform::{FieldKind, FieldSpec, Form};
///
/// let mut form = Form::new();
/// let tax_id = form.declare(FieldSpec::builder(FieldKind::NationalIdShort)).unwrap();
///
/// form.type_text(tax_id, "10020214995").unwrap();
/// assert_eq!(form.raw_value(tax_id).unwrap(), "100.202.149-95");
/// assert_eq!(form.unmasked_value(tax_id).unwrap(), "10020214995");
/// assert!(form.is_submit_enabled());
/// ```
#[derive(Debug)]
pub struct Form {
    fields: Vec<Field>,
    policy: ValidationPolicy,
    external_condition: bool,
    submit: SubmitState,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// An empty form with the default policy and the external condition met.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(ValidationPolicy::default())
    }

    #[must_use]
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            fields: Vec::new(),
            policy,
            external_condition: true,
            submit: SubmitState::Enabled,
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Add a declared field. Required fields start not ok, optional ones ok.
    pub fn add_field(&mut self, spec: FieldSpec) -> FieldId {
        let id = FieldId(self.fields.len());
        #[cfg(feature = "tracing")]
        tracing::debug!(field = %id, kind = ?spec.kind(), required = spec.is_required(), "field added");
        self.fields.push(Field::new(spec));
        self.recompute();
        id
    }

    /// Build and add a field in one step.
    pub fn declare(&mut self, builder: FieldSpecBuilder) -> Result<FieldId, FormError> {
        let spec = builder.build()?;
        Ok(self.add_field(spec))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Ids of every field, in declaration order.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        (0..self.fields.len()).map(FieldId)
    }

    pub fn spec(&self, id: FieldId) -> Result<&FieldSpec, FormError> {
        self.field(id).map(|f| &f.spec)
    }

    pub fn state(&self, id: FieldId) -> Result<&FieldState, FormError> {
        self.field(id).map(|f| &f.state)
    }

    /// Process one raw text-change event and return the buffer to display.
    pub fn on_field_changed(
        &mut self,
        id: FieldId,
        delta: &EditDelta,
    ) -> Result<MaskOutcome, FormError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("form.field_changed", field = %id).entered();
        let policy = self.policy;
        let field = self.field_mut(id)?;

        let delta = field.filter_keystrokes(delta);
        let outcome = field.rewrite(&delta);
        field.state.text.clone_from(&outcome.text);
        if outcome.suppressed {
            return Ok(outcome);
        }

        if field.spec.validation_mode() == ValidationMode::OnChange {
            field.validate(&policy);
        }
        self.recompute();
        Ok(outcome)
    }

    /// Process a focus-loss event.
    pub fn on_field_blurred(&mut self, id: FieldId) -> Result<(), FormError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("form.field_blurred", field = %id).entered();
        let policy = self.policy;
        let field = self.field_mut(id)?;

        field.state.touched = true;
        if field.spec.validation_mode() == ValidationMode::OnBlur {
            field.validate(&policy);
        }
        self.recompute();
        Ok(())
    }

    /// Replace the buffer with `raw`, laid into the mask.
    pub fn set_value(&mut self, id: FieldId, raw: &str) -> Result<(), FormError> {
        let policy = self.policy;
        let field = self.field_mut(id)?;

        field.state.text = field.format(raw);
        if let Some(engine) = field.engine.as_mut() {
            engine.reset();
        }
        if field.spec.validation_mode() == ValidationMode::OnChange {
            field.validate(&policy);
        }
        self.recompute();
        Ok(())
    }

    /// Type `text` at the end of the buffer, one keystroke per char.
    pub fn type_text(&mut self, id: FieldId, text: &str) -> Result<MaskOutcome, FormError> {
        let current = self.state(id)?.text.clone();
        let mut outcome = MaskOutcome {
            cursor: current.chars().count(),
            text: current,
            rewritten: false,
            suppressed: false,
        };
        let mut key = [0u8; 4];
        for c in text.chars() {
            let before = &outcome.text;
            let delta = EditDelta::insert(before, before.chars().count(), c.encode_utf8(&mut key));
            outcome = self.on_field_changed(id, &delta)?;
        }
        Ok(outcome)
    }

    /// Delete the last char of the buffer.
    pub fn backspace(&mut self, id: FieldId) -> Result<MaskOutcome, FormError> {
        let delta = EditDelta::backspace(&self.state(id)?.text);
        self.on_field_changed(id, &delta)
    }

    /// Field text with every delimiter removed.
    pub fn unmasked_value(&self, id: FieldId) -> Result<String, FormError> {
        let field = self.field(id)?;
        Ok(field.spec.unmask(&field.state.text))
    }

    /// Field text verbatim.
    pub fn raw_value(&self, id: FieldId) -> Result<&str, FormError> {
        Ok(&self.field(id)?.state.text)
    }

    pub fn external_condition(&self) -> bool {
        self.external_condition
    }

    /// Set the condition that is ANDed with every field, then re-aggregate.
    pub fn set_external_condition(&mut self, valid: bool) -> SubmitState {
        self.external_condition = valid;
        self.recompute()
    }

    /// Re-aggregate without touching any field.
    pub fn revalidate(&mut self) -> SubmitState {
        self.recompute()
    }

    /// Re-evaluate every field against its current text, then re-aggregate.
    pub fn validate_all(&mut self) -> SubmitState {
        let policy = self.policy;
        for field in &mut self.fields {
            field.validate(&policy);
        }
        self.recompute()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit.is_enabled()
    }

    /// Fields carrying an error, in declaration order.
    pub fn errors(&self) -> Vec<(FieldId, ErrorKind)> {
        self.fields
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.state.error.map(|e| (FieldId(i), e)))
            .collect()
    }

    // --- internal ---

    fn field(&self, id: FieldId) -> Result<&Field, FormError> {
        self.fields.get(id.0).ok_or(FormError::UnknownField(id))
    }

    fn field_mut(&mut self, id: FieldId) -> Result<&mut Field, FormError> {
        self.fields.get_mut(id.0).ok_or(FormError::UnknownField(id))
    }

    fn recompute(&mut self) -> SubmitState {
        let enabled = self.external_condition && self.fields.iter().all(|f| f.state.ok);
        let next = SubmitState::from(enabled);
        if next != self.submit {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = ?self.submit, to = ?next, "submit state changed");
            self.submit = next;
        }
        self.submit
    }
}
