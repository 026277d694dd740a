//! # Aligned Text
//!
//! A rewritable character buffer where every character remembers the span of
//! the original input it was derived from.

use crate::offsets::{Offset, byte_to_char_table};
use core::ops::Range;

/// One normalized character and its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedChar {
    /// The normalized character.
    pub ch: char,

    /// The original characters it derives from.
    ///
    /// Empty for inserted separators.
    pub span: Offset,

    /// Protected characters are skipped by rewriting rules.
    pub protected: bool,
}

/// Normalized text with per-character alignment to the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedText {
    original_len: usize,
    chars: Vec<AlignedChar>,
}

impl AlignedText {
    /// Wrap `text`; each character is aligned to itself.
    pub fn new(text: &str) -> Self {
        let chars: Vec<AlignedChar> = text
            .chars()
            .enumerate()
            .map(|(i, ch)| AlignedChar {
                ch,
                span: Offset::new(i, i + 1),
                protected: false,
            })
            .collect();
        Self {
            original_len: chars.len(),
            chars,
        }
    }

    /// An empty buffer over an original input of `original_len` characters.
    pub fn with_original_len(
        original_len: usize,
        capacity: usize,
    ) -> Self {
        Self {
            original_len,
            chars: Vec::with_capacity(capacity),
        }
    }

    /// Length of the original input, in characters.
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Length of the normalized text, in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the normalized text is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The aligned characters.
    pub fn chars(&self) -> &[AlignedChar] {
        &self.chars
    }

    /// The normalized text.
    pub fn normalized(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }

    /// Append a character derived from `span`.
    pub fn push(
        &mut self,
        ch: char,
        span: Offset,
        protected: bool,
    ) {
        self.chars.push(AlignedChar {
            ch,
            span,
            protected,
        });
    }

    /// Append a space separator, unless the buffer is empty or already ends in whitespace.
    ///
    /// The separator is aligned to an empty span at the end of the previous character.
    pub fn push_separator(&mut self) {
        if let Some(last) = self.chars.last()
            && !last.ch.is_whitespace()
        {
            let at = last.span.end;
            self.push(' ', Offset::empty_at(at), false);
        }
    }

    /// Rewrite each unprotected character into zero or more characters.
    ///
    /// Output characters inherit the span of their source character.
    pub fn flat_map_chars<F, I>(
        &mut self,
        mut f: F,
    ) where
        F: FnMut(char) -> I,
        I: IntoIterator<Item = char>,
    {
        let mut out = Vec::with_capacity(self.chars.len());
        for ac in self.chars.drain(..) {
            if ac.protected {
                out.push(ac);
                continue;
            }
            out.extend(f(ac.ch).into_iter().map(|ch| AlignedChar { ch, ..ac }));
        }
        self.chars = out;
    }

    /// Drop unprotected characters failing `keep`.
    pub fn retain_chars<F: FnMut(char) -> bool>(
        &mut self,
        mut keep: F,
    ) {
        self.chars.retain(|ac| ac.protected || keep(ac.ch));
    }

    /// Mark the characters under each normalized-text *byte* range as protected.
    pub fn protect_byte_ranges(
        &mut self,
        ranges: &[Range<usize>],
    ) {
        if ranges.is_empty() {
            return;
        }
        let table = byte_to_char_table(&self.normalized());
        for range in ranges {
            for idx in table[range.start]..table[range.end] {
                self.chars[idx].protected = true;
            }
        }
    }

    /// Split on whitespace into ``(token, original span)`` pairs.
    ///
    /// A token's span runs from its first character's start to its last
    /// character's end.
    pub fn split_whitespace(&self) -> Vec<(String, Offset)> {
        self.split_whitespace_with_char_spans()
            .into_iter()
            .map(|(word, span, _)| (word, span))
            .collect()
    }

    /// [`Self::split_whitespace`], also returning the span of each token character.
    pub fn split_whitespace_with_char_spans(&self) -> Vec<(String, Offset, Vec<Offset>)> {
        let mut words = Vec::new();
        let mut current = String::new();
        let mut char_spans: Vec<Offset> = Vec::new();
        let mut span: Option<Offset> = None;

        for ac in &self.chars {
            if ac.ch.is_whitespace() && !ac.protected {
                if let Some(s) = span.take() {
                    words.push((
                        std::mem::take(&mut current),
                        s,
                        std::mem::take(&mut char_spans),
                    ));
                }
                continue;
            }
            current.push(ac.ch);
            char_spans.push(ac.span);
            span = Some(match span {
                Some(s) => Offset::new(s.start, s.end.max(ac.span.end)),
                None => ac.span,
            });
        }
        if let Some(s) = span {
            words.push((current, s, char_spans));
        }
        words
    }
}
