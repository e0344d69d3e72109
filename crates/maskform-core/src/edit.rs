#![forbid(unsafe_code)]

//! Edit deltas.
//!
//! An [`EditDelta`] describes one text-change event: the buffer before and
//! after, where the change started, and how many chars were removed and
//! inserted there. All offsets are char offsets.

/// One text change, as reported by the widget layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDelta {
    /// Buffer contents before the change.
    pub before: String,
    /// Buffer contents after the change.
    pub after: String,
    /// Char offset where the change starts.
    pub start: usize,
    /// Chars removed at `start`.
    pub removed: usize,
    /// Chars inserted at `start`.
    pub inserted: usize,
}

impl EditDelta {
    /// Build a delta from explicit parts.
    pub fn new(
        before: impl Into<String>,
        after: impl Into<String>,
        start: usize,
        removed: usize,
        inserted: usize,
    ) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            start,
            removed,
            inserted,
        }
    }

    /// Derive the delta between two buffers from their common prefix and
    /// suffix.
    pub fn diff(before: &str, after: &str) -> Self {
        let b: Vec<char> = before.chars().collect();
        let a: Vec<char> = after.chars().collect();

        let prefix = b.iter().zip(&a).take_while(|(x, y)| x == y).count();
        let max_suffix = b.len().min(a.len()) - prefix;
        let suffix = b
            .iter()
            .rev()
            .zip(a.iter().rev())
            .take(max_suffix)
            .take_while(|(x, y)| x == y)
            .count();

        Self {
            before: before.to_string(),
            after: after.to_string(),
            start: prefix,
            removed: b.len() - prefix - suffix,
            inserted: a.len() - prefix - suffix,
        }
    }

    /// Insert `text` at char offset `at` (clamped to the buffer end).
    pub fn insert(before: &str, at: usize, text: &str) -> Self {
        let at = at.min(before.chars().count());
        let after: String = before
            .chars()
            .take(at)
            .chain(text.chars())
            .chain(before.chars().skip(at))
            .collect();
        Self::new(before, after, at, 0, text.chars().count())
    }

    /// Remove `count` chars starting at `start` (clamped to the buffer).
    pub fn delete(before: &str, start: usize, count: usize) -> Self {
        let len = before.chars().count();
        let start = start.min(len);
        let count = count.min(len - start);
        let after: String = before
            .chars()
            .take(start)
            .chain(before.chars().skip(start + count))
            .collect();
        Self::new(before, after, start, count, 0)
    }

    /// A single backspace at the end of the buffer.
    pub fn backspace(before: &str) -> Self {
        let len = before.chars().count();
        Self::delete(before, len.saturating_sub(1), 1)
    }

    /// Whether nothing was removed or inserted.
    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.inserted == 0
    }

    /// Whether more chars were removed than inserted.
    pub fn is_deletion(&self) -> bool {
        self.removed > self.inserted
    }

    /// Whether the removed range reaches the end of the old buffer.
    pub fn touches_end(&self) -> bool {
        self.start + self.removed >= self.before.chars().count()
    }

    /// Caret position right after the change.
    pub fn caret(&self) -> usize {
        self.start + self.inserted
    }

    /// The chars that were removed.
    pub fn removed_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.before.chars().skip(self.start).take(self.removed)
    }

    /// The chars that were inserted.
    pub fn inserted_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.after.chars().skip(self.start).take(self.inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_insertion_at_end() {
        let d = EditDelta::diff("100", "1002");
        assert_eq!((d.start, d.removed, d.inserted), (3, 0, 1));
        assert!(!d.is_deletion());
    }

    #[test]
    fn diff_backspace() {
        let d = EditDelta::diff("100.", "100");
        assert_eq!((d.start, d.removed, d.inserted), (3, 1, 0));
        assert!(d.is_deletion());
        assert!(d.touches_end());
        assert_eq!(d.removed_chars().collect::<String>(), ".");
    }

    #[test]
    fn diff_repeated_chars_prefer_prefix() {
        let d = EditDelta::diff("1000", "100");
        assert_eq!((d.start, d.removed, d.inserted), (3, 1, 0));
    }

    #[test]
    fn diff_replacement_in_middle() {
        let d = EditDelta::diff("abcdef", "abXYef");
        assert_eq!((d.start, d.removed, d.inserted), (2, 2, 2));
        assert_eq!(d.inserted_chars().collect::<String>(), "XY");
    }

    #[test]
    fn diff_identical_is_noop() {
        assert!(EditDelta::diff("12/03", "12/03").is_noop());
    }

    #[test]
    fn insert_and_delete_helpers() {
        let d = EditDelta::insert("1234", 2, "x");
        assert_eq!(d.after, "12x34");
        assert_eq!(d.caret(), 3);

        let d = EditDelta::delete("12x34", 2, 1);
        assert_eq!(d.after, "1234");
        assert!(!d.touches_end());

        let d = EditDelta::insert("12", 99, "3");
        assert_eq!((d.after.as_str(), d.start), ("123", 2));
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let d = EditDelta::backspace("");
        assert!(d.is_noop());
        assert_eq!(d.after, "");
    }

    #[test]
    fn multibyte_offsets_are_chars() {
        let d = EditDelta::diff("añb", "añxb");
        assert_eq!((d.start, d.removed, d.inserted), (2, 0, 1));
    }
}
