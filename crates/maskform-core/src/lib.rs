#![forbid(unsafe_code)]

//! Core masking primitives for maskform.
//!
//! - [`pattern`]: mask compilation and the length-keyed [`PatternSet`].
//! - [`edit`]: the [`EditDelta`] describing one text change.
//! - [`engine`]: the [`MaskEngine`] state machine that rewrites each change.
//! - [`charset`]: keystroke filters.
//!
//! # Example
//!
//! ```rust
//! use maskform_core::{EditDelta, MaskEngine, PatternSet};
//!
//! let patterns = PatternSet::single("##/##/####", '#').unwrap();
//! let mut engine = MaskEngine::new(patterns);
//!
//! let out = engine.apply(&EditDelta::insert("1", 1, "2"));
//! assert_eq!(out.text, "12/");
//! assert_eq!(out.cursor, 3);
//! ```

pub mod charset;
pub mod edit;
pub mod engine;
pub mod pattern;

pub use charset::AllowedChars;
pub use edit::EditDelta;
pub use engine::{MaskEngine, MaskOutcome};
pub use pattern::{
    CompiledPattern, DEFAULT_PLACEHOLDER, Layout, PatternConfigError, PatternSet, Slot,
};
