#![forbid(unsafe_code)]

//! Masked form fields with live validation.
//!
//! This crate is the public facade. It declares fields ([`FieldSpec`]),
//! evaluates them ([`evaluate`]) and aggregates their validity into a submit
//! state ([`Form`]). The masking engine and the validators live in
//! `maskform-core` and `maskform-validation` and are re-exported here.

pub mod evaluate;
pub mod form;
pub mod kind;
pub mod policy;
pub mod spec;

// --- Core re-exports -------------------------------------------------------

pub use maskform_core::{
    AllowedChars, CompiledPattern, DEFAULT_PLACEHOLDER, EditDelta, MaskEngine, MaskOutcome,
    PatternConfigError, PatternSet,
};

// --- Validation re-exports -------------------------------------------------

pub use maskform_validation::checksum;
pub use maskform_validation::{
    FieldRule, NationalIdFormat, ValidationError, ValidationResult, Validator,
};

// --- Form ------------------------------------------------------------------

pub use evaluate::{ErrorKind, Evaluation, evaluate};
pub use form::{FieldId, FieldState, Form, FormError, SubmitState};
pub use kind::{FieldKind, InputClass, TypeProperties};
pub use policy::ValidationPolicy;
pub use spec::{FieldSpec, FieldSpecBuilder, ValidationMode};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        EditDelta, ErrorKind, FieldId, FieldKind, FieldSpec, Form, FormError, MaskOutcome,
        SubmitState, ValidationMode, ValidationPolicy, Validator,
    };
}
