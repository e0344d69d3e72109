#![forbid(unsafe_code)]

//! Mask pattern compilation.
//!
//! A mask pattern is a literal template such as `"(##) #####-####"`: the
//! placeholder character (`#` by default) marks user-editable slots and every
//! other character is a fixed literal. Compiling a pattern extracts the literal
//! positions and the distinct delimiter set once, so the masking engine never
//! re-scans the template.
//!
//! Several patterns can serve one field (an 8-digit and a 9-digit phone
//! number, for instance). [`PatternSet`] keys them by length and resolves the
//! declared length eagerly, so a misconfigured field fails when it is declared
//! instead of on its first keystroke.

use std::fmt;

/// Placeholder used when a field does not declare its own.
pub const DEFAULT_PLACEHOLDER: char = '#';

// ---------------------------------------------------------------------------
// PatternConfigError
// ---------------------------------------------------------------------------

/// A mask configuration that cannot be compiled.
///
/// Raised while a field is declared, never while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternConfigError {
    /// No pattern was supplied for a masked field.
    NoPatterns,
    /// The pattern has no placeholder slot, so nothing could ever be typed.
    NoInputSlots { pattern: String },
    /// Two patterns share the same length key.
    DuplicateLength { len: usize },
    /// The declared length has no compiled pattern.
    UnknownLength { requested: usize, available: Vec<usize> },
    /// A built-in masked kind declared a maximum length that differs from its mask.
    MaxLengthMismatch { max_length: usize, pattern_len: usize },
}

impl fmt::Display for PatternConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPatterns => write!(f, "no mask pattern supplied"),
            Self::NoInputSlots { pattern } => {
                write!(f, "mask pattern {pattern:?} has no placeholder slots")
            }
            Self::DuplicateLength { len } => {
                write!(f, "more than one mask pattern of length {len}")
            }
            Self::UnknownLength {
                requested,
                available,
            } => write!(
                f,
                "no mask pattern of length {requested} (available: {available:?})"
            ),
            Self::MaxLengthMismatch {
                max_length,
                pattern_len,
            } => write!(
                f,
                "max length {max_length} does not match mask length {pattern_len}"
            ),
        }
    }
}

impl std::error::Error for PatternConfigError {}

// ---------------------------------------------------------------------------
// CompiledPattern
// ---------------------------------------------------------------------------

/// One position of a compiled mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A user-editable position.
    Input,
    /// A fixed separator character.
    Literal(char),
}

/// A mask pattern compiled into slots, literal positions and delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    placeholder: char,
    slots: Vec<Slot>,
    literals: Vec<(usize, char)>,
    delimiters: Vec<char>,
    capacity: usize,
}

impl CompiledPattern {
    /// Compile `pattern`, treating every character other than `placeholder`
    /// as a literal.
    ///
    /// A pattern made only of placeholders compiles to a mask with no
    /// literals, which the engine treats as a no-op.
    #[must_use]
    pub fn compile(pattern: &str, placeholder: char) -> Self {
        let slots: Vec<Slot> = pattern
            .chars()
            .map(|c| {
                if c == placeholder {
                    Slot::Input
                } else {
                    Slot::Literal(c)
                }
            })
            .collect();

        let literals: Vec<(usize, char)> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Slot::Literal(c) => Some((i, *c)),
                Slot::Input => None,
            })
            .collect();

        let mut delimiters = Vec::new();
        for &(_, c) in &literals {
            if !delimiters.contains(&c) {
                delimiters.push(c);
            }
        }

        let capacity = slots.len() - literals.len();

        Self {
            source: pattern.to_string(),
            placeholder,
            slots,
            literals,
            delimiters,
            capacity,
        }
    }

    /// The template this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The placeholder character.
    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Length of a fully-masked buffer, in chars.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the template was empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of user-editable slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of user-editable slots among the first `len` positions.
    pub fn capacity_within(&self, len: usize) -> usize {
        self.slots
            .iter()
            .take(len)
            .filter(|slot| matches!(slot, Slot::Input))
            .count()
    }

    /// All positions as slots.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Ordered `(position, literal)` pairs.
    pub fn literals(&self) -> &[(usize, char)] {
        &self.literals
    }

    /// Distinct literal characters, in order of first appearance.
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// The literal required at `pos`, if any.
    pub fn literal_at(&self, pos: usize) -> Option<char> {
        match self.slots.get(pos) {
            Some(Slot::Literal(c)) => Some(*c),
            _ => None,
        }
    }

    /// Whether `text` is consistent with this pattern: no longer than the
    /// mask and every literal position it reaches holds the right literal.
    pub fn is_consistent(&self, text: &str) -> bool {
        let mut len = 0;
        for (i, c) in text.chars().enumerate() {
            len += 1;
            match self.slots.get(i) {
                None => return false,
                Some(Slot::Literal(lit)) if *lit != c => return false,
                Some(_) => {}
            }
        }
        len <= self.slots.len()
    }

    /// Lay `content` into the mask.
    ///
    /// Only the first `limit` positions are used. Literals are emitted while
    /// content remains; with `trailing` set, the run of literals directly
    /// after the last content char is emitted too.
    pub fn layout(&self, content: &[char], trailing: bool, limit: usize) -> Layout {
        let mut text = Vec::with_capacity(self.slots.len());
        let mut positions = Vec::with_capacity(content.len());
        let mut placed = 0;

        for slot in self.slots.iter().take(limit) {
            match slot {
                Slot::Input => {
                    let Some(&c) = content.get(placed) else {
                        break;
                    };
                    positions.push(text.len());
                    text.push(c);
                    placed += 1;
                }
                Slot::Literal(c) => {
                    if placed < content.len() || (trailing && placed > 0) {
                        text.push(*c);
                    } else {
                        break;
                    }
                }
            }
        }

        Layout { text, positions }
    }
}

/// The result of laying content into a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    text: Vec<char>,
    /// Output index of each placed content char.
    positions: Vec<usize>,
}

impl Layout {
    /// The masked text.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Masked length in chars.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of content chars that made it into the output.
    pub fn placed(&self) -> usize {
        self.positions.len()
    }

    /// Cursor position after the first `count` content chars.
    ///
    /// With `skip_literals` the cursor lands in front of the next content
    /// char (past any literals in between); otherwise it sits right after the
    /// last counted content char. Past the end it is always end-of-text.
    pub fn cursor_after(&self, count: usize, skip_literals: bool) -> usize {
        if count >= self.positions.len() {
            return self.text.len();
        }
        if skip_literals {
            return self.positions[count];
        }
        match count.checked_sub(1) {
            Some(prev) => self.positions[prev] + 1,
            None => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// PatternSet
// ---------------------------------------------------------------------------

/// Compiled patterns for one field, keyed by length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    /// Sorted by length, ascending.
    patterns: Vec<CompiledPattern>,
    declared: usize,
    delimiters: Vec<char>,
    placeholder: char,
}

impl PatternSet {
    /// Compile every pattern and resolve the one of `declared_len`.
    pub fn new<I, S>(
        patterns: I,
        placeholder: char,
        declared_len: usize,
    ) -> Result<Self, PatternConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled: Vec<CompiledPattern> = Vec::new();
        for pattern in patterns {
            let pattern = CompiledPattern::compile(pattern.as_ref(), placeholder);
            if pattern.capacity() == 0 {
                return Err(PatternConfigError::NoInputSlots {
                    pattern: pattern.source,
                });
            }
            if compiled.iter().any(|p| p.len() == pattern.len()) {
                return Err(PatternConfigError::DuplicateLength { len: pattern.len() });
            }
            compiled.push(pattern);
        }
        if compiled.is_empty() {
            return Err(PatternConfigError::NoPatterns);
        }
        compiled.sort_by_key(CompiledPattern::len);

        let declared = compiled
            .iter()
            .position(|p| p.len() == declared_len)
            .ok_or_else(|| PatternConfigError::UnknownLength {
                requested: declared_len,
                available: compiled.iter().map(CompiledPattern::len).collect(),
            })?;

        let mut delimiters = Vec::new();
        for pattern in &compiled {
            for &c in pattern.delimiters() {
                if !delimiters.contains(&c) {
                    delimiters.push(c);
                }
            }
        }

        Ok(Self {
            patterns: compiled,
            declared,
            delimiters,
            placeholder,
        })
    }

    /// A set holding a single pattern, declared at its own length.
    pub fn single(pattern: &str, placeholder: char) -> Result<Self, PatternConfigError> {
        Self::new([pattern], placeholder, pattern.chars().count())
    }

    /// The pattern resolved from the declared length.
    pub fn declared(&self) -> &CompiledPattern {
        &self.patterns[self.declared]
    }

    /// The pattern of exactly `len` chars.
    pub fn get(&self, len: usize) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|p| p.len() == len)
    }

    /// Shortest pattern able to hold `content_len` editable chars, falling
    /// back to the longest one.
    pub fn select(&self, content_len: usize) -> &CompiledPattern {
        self.patterns
            .iter()
            .find(|p| p.capacity() >= content_len)
            .unwrap_or_else(|| &self.patterns[self.patterns.len() - 1])
    }

    /// All patterns, shortest first.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always `false`; a set is never built empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Placeholder shared by every pattern.
    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Union of every pattern's delimiters.
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Whether `c` is a delimiter of any pattern in the set.
    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    /// `text` with every delimiter removed.
    pub fn strip(&self, text: &str) -> String {
        text.chars().filter(|c| !self.is_delimiter(*c)).collect()
    }
}
