use thiserror::Error;

use crate::span::TextSpan;

/// Programmer-error and integrity-failure conditions for span/change
/// operations. These fail fast with a parameter identifying the fault,
/// per the error-handling design in spec.md §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChangeError {
    #[error("invalid span: end ({end}) is before start ({start})")]
    InvalidSpan { start: usize, end: usize },

    #[error("span [{start}, {end}) exceeds source of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("change at {start} with old_length {old_length} exceeds source of length {len}")]
    OutOfRange { start: usize, old_length: usize, len: usize },

    #[error("change regions overlap in the original text: [{a_start}, {a_end}) and [{b_start}, {b_end})")]
    OverlappingChanges { a_start: usize, a_end: usize, b_start: usize, b_end: usize },
}

/// Converts a code-point offset into a byte offset for `s`, clamped to
/// `s`'s length when the offset is beyond the last character.
fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(b, _)| b).unwrap_or(s.len())
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// How a [`TextChange`] relates the old text to the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insertion,
    Deletion,
    Replacement,
}

/// A single edit: replace `old_length` code points starting at `start`
/// with `new_text`.
///
/// `new_length` and `delta` are derived, not stored, so two changes with
/// the same `(start, old_length, new_text)` always compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    start: usize,
    old_length: usize,
    new_text: String,
}

impl TextChange {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self { start: at, old_length: 0, new_text: text.into() }
    }

    pub fn delete(at: usize, count: usize) -> Self {
        Self { start: at, old_length: count, new_text: String::new() }
    }

    /// `new_text: None` is treated as an empty string (a deletion).
    pub fn replace(at: usize, count: usize, new_text: Option<impl Into<String>>) -> Self {
        Self { start: at, old_length: count, new_text: new_text.map(Into::into).unwrap_or_default() }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn old_length(&self) -> usize {
        self.old_length
    }

    #[inline]
    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    #[inline]
    pub fn new_length(&self) -> usize {
        char_count(&self.new_text)
    }

    #[inline]
    pub fn delta(&self) -> i64 {
        self.new_length() as i64 - self.old_length as i64
    }

    pub fn kind(&self) -> ChangeKind {
        if self.old_length == 0 {
            ChangeKind::Insertion
        } else if self.new_text.is_empty() {
            ChangeKind::Deletion
        } else {
            ChangeKind::Replacement
        }
    }

    /// The region of the *original* text this change replaces.
    pub fn original_span(&self) -> TextSpan {
        TextSpan::new(self.start, self.old_length)
    }

    /// Applies this change to `original`, returning the resulting text.
    ///
    /// Fails when `start` or `start + old_length` exceed `original`'s
    /// length in code points.
    pub fn apply(&self, original: &str) -> Result<String, ChangeError> {
        let len = char_count(original);
        let end = self.start + self.old_length;
        if self.start > len || end > len {
            return Err(ChangeError::OutOfRange { start: self.start, old_length: self.old_length, len });
        }
        let start_byte = char_to_byte(original, self.start);
        let end_byte = char_to_byte(original, end);
        let mut result = String::with_capacity(original.len() + self.new_text.len());
        result.push_str(&original[..start_byte]);
        result.push_str(&self.new_text);
        result.push_str(&original[end_byte..]);
        Ok(result)
    }

    /// Returns the change that, applied to `self.apply(original)`, yields
    /// `original` back.
    pub fn create_inverse(&self, original: &str) -> Result<TextChange, ChangeError> {
        let len = char_count(original);
        let end = self.start + self.old_length;
        if self.start > len || end > len {
            return Err(ChangeError::OutOfRange { start: self.start, old_length: self.old_length, len });
        }
        let start_byte = char_to_byte(original, self.start);
        let end_byte = char_to_byte(original, end);
        let old_text = original[start_byte..end_byte].to_string();
        Ok(TextChange { start: self.start, old_length: self.new_length(), new_text: old_text })
    }

    /// Maps a position in the original text to its position after this
    /// change is applied.
    pub fn adjust_position(&self, p: usize) -> usize {
        let end = self.start + self.old_length;
        if p < self.start {
            p
        } else if p < end {
            self.start + self.new_length()
        } else {
            (p as i64 + self.delta()) as usize
        }
    }

    /// Applies [`Self::adjust_position`] to both endpoints of a span.
    ///
    /// A span fully inside the replaced region collapses to a zero-length
    /// span at the change's new position.
    pub fn adjust_span(&self, span: TextSpan) -> TextSpan {
        let end = self.start + self.old_length;
        if span.start() >= self.start && span.end() <= end {
            return TextSpan::empty_at(self.start + self.new_length());
        }
        let new_start = self.adjust_position(span.start());
        let new_end = self.adjust_position(span.end());
        TextSpan::from_bounds(new_start.min(new_end), new_start.max(new_end)).unwrap_or(TextSpan::empty_at(new_start))
    }
}

/// Applies an ordered list of changes to `original`, left to right.
///
/// Each change's `start` is expressed in `original`'s coordinate system;
/// the applier tracks the cumulative offset from earlier changes in the
/// same batch. Rejects the batch when any two changes' original regions
/// overlap.
pub fn apply_changes(original: &str, changes: &[TextChange]) -> Result<String, ChangeError> {
    let mut ordered: Vec<&TextChange> = changes.iter().collect();
    ordered.sort_by_key(|c| c.start());
    for window in ordered.windows(2) {
        let (a, b) = (window[0], window[1]);
        let a_end = a.start() + a.old_length();
        if a_end > b.start() {
            return Err(ChangeError::OverlappingChanges {
                a_start: a.start(),
                a_end,
                b_start: b.start(),
                b_end: b.start() + b.old_length(),
            });
        }
    }

    let mut result = original.to_string();
    let mut cumulative_delta: i64 = 0;
    for change in ordered {
        let shifted_start = (change.start() as i64 + cumulative_delta) as usize;
        let shifted = TextChange {
            start: shifted_start,
            old_length: change.old_length(),
            new_text: change.new_text().to_string(),
        };
        result = shifted.apply(&result)?;
        cumulative_delta += change.delta();
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_delete_replace_classification() {
        assert_eq!(TextChange::insert(0, "x").kind(), ChangeKind::Insertion);
        assert_eq!(TextChange::delete(0, 3).kind(), ChangeKind::Deletion);
        assert_eq!(TextChange::replace(0, 3, Some("xy")).kind(), ChangeKind::Replacement);
    }

    #[test]
    fn apply_insertion() {
        let change = TextChange::insert(5, "XYZ");
        assert_eq!(change.apply("hello world").unwrap(), "helloXYZ world");
    }

    #[test]
    fn apply_deletion() {
        let change = TextChange::delete(0, 6);
        assert_eq!(change.apply("hello world").unwrap(), "world");
    }

    #[test]
    fn apply_replacement() {
        let change = TextChange::replace(6, 5, Some("there"));
        assert_eq!(change.apply("hello world").unwrap(), "hello there");
    }

    #[test]
    fn apply_rejects_out_of_range() {
        let change = TextChange::delete(5, 100);
        assert!(matches!(change.apply("short"), Err(ChangeError::OutOfRange { .. })));
    }

    #[test]
    fn inverse_round_trips() {
        let original = "var x = 1\nvar y = 2\n";
        let change = TextChange::replace(8, 1, Some("100"));
        let changed = change.apply(original).unwrap();
        assert_eq!(changed, "var x = 100\nvar y = 2\n");

        let inverse = change.create_inverse(original).unwrap();
        let restored = inverse.apply(&changed).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn adjust_position_monotonic_and_shifts() {
        let change = TextChange::replace(5, 2, Some("XXXX")); // delta = +2
        assert_eq!(change.adjust_position(0), 0); // before
        assert_eq!(change.adjust_position(5), 9); // inside -> start + new_length
        assert_eq!(change.adjust_position(6), 9); // inside
        assert_eq!(change.adjust_position(7), 9); // after -> shifted by delta
        assert_eq!(change.adjust_position(10), 12);

        // monotonicity: adjust_position(p) <= adjust_position(p + 1)
        for p in 0..10 {
            assert!(change.adjust_position(p) <= change.adjust_position(p + 1));
        }
    }

    #[test]
    fn adjust_span_collapses_inside_deletion() {
        let change = TextChange::delete(5, 5); // deletes [5, 10)
        let inside = TextSpan::new(6, 2); // [6, 8), fully inside
        assert_eq!(change.adjust_span(inside), TextSpan::empty_at(5));
    }

    #[test]
    fn batch_application_tracks_cumulative_offset() {
        let original = "var a = 1\nvar b = 2\n";
        let changes = vec![
            TextChange::replace(8, 1, Some("100")),
            TextChange::replace(18, 1, Some("200")),
        ];
        let result = apply_changes(original, &changes).unwrap();
        assert_eq!(result, "var a = 100\nvar b = 200\n");
    }

    #[test]
    fn batch_application_rejects_overlap() {
        let original = "0123456789";
        let changes = vec![TextChange::replace(0, 5, Some("x")), TextChange::replace(3, 5, Some("y"))];
        assert!(matches!(apply_changes(original, &changes), Err(ChangeError::OverlappingChanges { .. })));
    }
}
