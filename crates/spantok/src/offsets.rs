//! # Character Offsets
//!
//! Offsets count Unicode scalar values (``char``s), not bytes.

use core::iter::once;
use core::ops::Range;

/// Half-open ``[start, end)`` character range into an original input.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Offset {
    /// First character.
    pub start: usize,

    /// One past the last character.
    pub end: usize,
}

impl From<(usize, usize)> for Offset {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Range<usize>> for Offset {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Offset> for (usize, usize) {
    fn from(offset: Offset) -> Self {
        (offset.start, offset.end)
    }
}

impl Offset {
    /// Create a new offset.
    pub const fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self { start, end }
    }

    /// An empty offset positioned at `pos`.
    pub const fn empty_at(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// The number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the offset covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The offset as a [`Range`].
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The smallest offset covering both `self` and `other`.
    pub fn union(
        self,
        other: Offset,
    ) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Slice the characters covered by this offset out of `text`.
    ///
    /// Out-of-range bounds are clamped to the end of `text`.
    pub fn slice<'a>(
        &self,
        text: &'a str,
    ) -> &'a str {
        char_slice(text, self.start, self.end)
    }
}

/// Slice `text` by character positions ``[start, end)``.
pub fn char_slice(
    text: &str,
    start: usize,
    end: usize,
) -> &str {
    let mut boundaries = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(once(text.len()));

    let lo = boundaries.nth(start).unwrap_or(text.len());
    let hi = if end > start {
        boundaries.nth(end - start - 1).unwrap_or(text.len())
    } else {
        lo
    };
    &text[lo..hi]
}

/// The smallest offset covering every non-empty span of `spans`.
///
/// Falls back to the first span when all are empty; `None` for no spans.
pub fn covering_offset(spans: &[Offset]) -> Option<Offset> {
    spans
        .iter()
        .copied()
        .filter(|s| !s.is_empty())
        .reduce(Offset::union)
        .or_else(|| spans.first().copied())
}

/// Map byte positions of `text` to character positions.
///
/// The returned table has ``text.len() + 1`` entries; non-boundary
/// bytes map to the character containing them.
pub fn byte_to_char_table(text: &str) -> Vec<usize> {
    let mut table = Vec::with_capacity(text.len() + 1);
    for (ci, ch) in text.chars().enumerate() {
        table.extend(core::iter::repeat_n(ci, ch.len_utf8()));
    }
    table.push(text.chars().count());
    table
}

/// Check the offset invariants against an input of `char_len` characters.
///
/// * every offset satisfies ``start <= end <= char_len``;
/// * starts are non-decreasing.
pub fn offsets_are_well_formed(
    offsets: &[Offset],
    char_len: usize,
) -> bool {
    offsets
        .iter()
        .all(|o| o.start <= o.end && o.end <= char_len)
        && offsets.windows(2).all(|w| w[0].start <= w[1].start)
}
