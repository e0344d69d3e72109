#![forbid(unsafe_code)]

//! Incremental masking engine.
//!
//! [`MaskEngine`] sits between the widget's raw text-change events and the
//! displayed buffer. Each [`EditDelta`] is rewritten so that the buffer always
//! agrees with the compiled mask: every literal position either holds its
//! literal or lies past the end of the buffer.
//!
//! # Rules
//!
//! - **Insertion**: delimiters are stripped, the content is clipped to the
//!   mask capacity and laid back into the mask. A run of literals right after
//!   the last typed char is appended, and a caret at the end moves past it.
//! - **Backspace at the end**: trailing delimiters are stripped. When the
//!   backspace only removed delimiters, the content char in front of them goes
//!   too, so an auto-inserted literal never swallows a keystroke. A buffer left
//!   with nothing but delimiters is cleared.
//!   The result is re-laid when the shorter content selects a shorter pattern.
//! - **Other deletions**: the remaining content is re-laid without trailing
//!   literals. Removing a delimiter sends the caret to end-of-text.
//! - **Echo suppression**: writing the corrected buffer back into the widget
//!   fires another change event. The engine recognises that echo and returns
//!   it untouched, so a keystroke is processed exactly once.

use crate::edit::EditDelta;
use crate::pattern::PatternSet;

/// The corrected buffer produced for one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskOutcome {
    /// Buffer the widget should display.
    pub text: String,
    /// Caret position in chars.
    pub cursor: usize,
    /// Whether `text` differs from the delta's `after` buffer.
    pub rewritten: bool,
    /// Whether the event was the echo of a previous rewrite.
    pub suppressed: bool,
}

impl MaskOutcome {
    fn unchanged(text: String, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            rewritten: false,
            suppressed: false,
        }
    }
}

/// Per-field masking state machine.
#[derive(Debug, Clone)]
pub struct MaskEngine {
    patterns: PatternSet,
    /// Hard cap on the masked length, in chars.
    limit: usize,
    last_deleted: Option<char>,
    backspace: bool,
    /// Buffer written by the last rewrite, awaiting its echo.
    echo: Option<String>,
}

impl MaskEngine {
    /// Create an engine capped at the longest pattern of `patterns`.
    pub fn new(patterns: PatternSet) -> Self {
        let limit = patterns.iter().map(|p| p.len()).max().unwrap_or(0);
        Self {
            patterns,
            limit,
            last_deleted: None,
            backspace: false,
            echo: None,
        }
    }

    /// Lower the cap to `max_length` when it is shorter than the mask.
    #[must_use]
    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        if let Some(max) = max_length {
            self.limit = self.limit.min(max);
        }
        self
    }

    /// The compiled patterns.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Maximum masked length.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Last char removed by the current deletion, if the event was one.
    pub fn last_deleted_char(&self) -> Option<char> {
        self.last_deleted
    }

    /// Whether the current event removed more than it inserted.
    pub fn is_backspace(&self) -> bool {
        self.backspace
    }

    /// Forget per-event state, including a pending echo.
    pub fn reset(&mut self) {
        self.last_deleted = None;
        self.backspace = false;
        self.echo = None;
    }

    /// Rewrite one edit so the buffer matches the mask.
    pub fn apply(&mut self, delta: &EditDelta) -> MaskOutcome {
        if delta.is_noop() {
            self.reset();
            return MaskOutcome::unchanged(delta.after.clone(), delta.start);
        }

        if let Some(echo) = self.echo.take()
            && echo == delta.after
        {
            #[cfg(feature = "tracing")]
            tracing::trace!(text = %delta.after, "suppressed self-triggered rewrite");
            return MaskOutcome {
                cursor: delta.after.chars().count(),
                text: delta.after.clone(),
                rewritten: false,
                suppressed: true,
            };
        }

        self.backspace = delta.is_deletion();
        self.last_deleted = if self.backspace {
            delta.removed_chars().last()
        } else {
            None
        };

        let (text, cursor) = if self.backspace && delta.inserted == 0 && delta.touches_end() {
            self.trim_tail(delta)
        } else {
            self.reflow(delta, !self.backspace)
        };

        let rewritten = text != delta.after;
        if rewritten {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                before = %delta.before,
                after = %delta.after,
                result = %text,
                cursor,
                "mask rewrite"
            );
            self.echo = Some(text.clone());
        }

        MaskOutcome {
            text,
            cursor,
            rewritten,
            suppressed: false,
        }
    }

    /// Lay an arbitrary raw value into the mask.
    pub fn format(&self, raw: &str) -> String {
        let mut content: Vec<char> = raw.chars().filter(|c| !self.is_delimiter(*c)).collect();
        let pattern = self.patterns.select(content.len());
        content.truncate(pattern.capacity_within(self.limit));
        pattern.layout(&content, false, self.limit).text()
    }

    /// `text` with every delimiter removed.
    pub fn unmask(&self, text: &str) -> String {
        self.patterns.strip(text)
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.patterns.is_delimiter(c)
    }

    fn strip_trailing(&self, chars: &mut Vec<char>) {
        while chars.last().is_some_and(|c| self.is_delimiter(*c)) {
            chars.pop();
        }
    }

    fn trim_tail(&self, delta: &EditDelta) -> (String, usize) {
        let mut chars: Vec<char> = delta.after.chars().take(self.limit).collect();

        if delta.removed_chars().any(|c| self.is_delimiter(c)) {
            self.strip_trailing(&mut chars);
            if delta.removed_chars().all(|c| self.is_delimiter(c)) {
                chars.pop();
                self.strip_trailing(&mut chars);
            }
        }
        if chars.iter().all(|c| self.is_delimiter(*c)) {
            chars.clear();
        }

        // A shorter buffer may fall back to a shorter layout.
        let content: Vec<char> = chars
            .iter()
            .copied()
            .filter(|c| !self.is_delimiter(*c))
            .collect();
        let pattern = self.patterns.select(content.len());
        let text: String = chars.into_iter().collect();
        if pattern.is_consistent(&text) {
            let cursor = text.chars().count();
            return (text, cursor);
        }
        let layout = pattern.layout(&content, false, self.limit);
        (layout.text(), layout.len())
    }

    fn reflow(&self, delta: &EditDelta, inserting: bool) -> (String, usize) {
        let caret = delta.caret();
        let mut content = Vec::new();
        let mut before_caret = 0;
        for (i, c) in delta.after.chars().enumerate() {
            if self.is_delimiter(c) {
                continue;
            }
            if i < caret {
                before_caret += 1;
            }
            content.push(c);
        }

        let pattern = self.patterns.select(content.len());
        content.truncate(pattern.capacity_within(self.limit));
        let layout = pattern.layout(&content, inserting, self.limit);

        // Removing a delimiter sends the caret to the end.
        let cursor = if !inserting && delta.removed_chars().any(|c| self.is_delimiter(c)) {
            layout.len()
        } else {
            layout.cursor_after(before_caret, inserting)
        };
        (layout.text(), cursor)
    }
}
