//! # Subword Tokenizer
//!
//! Greedy longest-match word pieces layered over a base word tokenizer.
//!
//! Each base token is split left to right, always taking the longest piece
//! present in the piece table; every piece after the first carries the
//! continuation prefix. If any position has no match, or the base token is
//! longer than `max_input_chars_per_word`, the whole base token becomes the
//! piece table's unknown token.
//!
//! A piece's offset covers the original spans of the characters it consumed,
//! as reported by [`Tokenizer::tokenize_with_char_spans`] of the base.

use crate::errors::TokenizerResult;
use crate::offsets::{Offset, covering_offset};
use crate::tokenizers::kind::TokenizerKind;
use crate::tokenizers::tokenizer::{Tokenizer, token_capacity_hint};
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use crate::{DEFAULT_CONTINUATION_PREFIX, DEFAULT_MAX_INPUT_CHARS_PER_WORD};
use alloc::sync::Arc;
use core::iter::repeat_n;

/// WordPiece-style tokenizer wrapping a base tokenizer.
#[derive(Debug, Clone)]
pub struct SubwordTokenizer<T: TokenType> {
    base: Box<TokenizerKind<T>>,
    pieces: Arc<Vocabulary<T>>,
    continuation_prefix: String,
    max_input_chars_per_word: usize,
    vocab: Option<Arc<Vocabulary<T>>>,
}

impl<T: TokenType> SubwordTokenizer<T> {
    /// Create a subword tokenizer over `base`.
    ///
    /// The piece table is also bound as the id vocabulary.
    pub fn new<B>(
        base: B,
        pieces: Arc<Vocabulary<T>>,
    ) -> Self
    where
        B: Into<TokenizerKind<T>>,
    {
        let base = base.into();
        log::debug!(
            "subword tokenizer over {} base; {} pieces",
            base.name(),
            pieces.size()
        );
        Self {
            base: Box::new(base),
            vocab: Some(pieces.clone()),
            pieces,
            continuation_prefix: DEFAULT_CONTINUATION_PREFIX.to_string(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
        }
    }

    /// Set the continuation prefix.
    pub fn with_continuation_prefix<S: AsRef<str>>(
        self,
        prefix: S,
    ) -> Self {
        Self {
            continuation_prefix: prefix.as_ref().to_string(),
            ..self
        }
    }

    /// Set the per-word length limit, in chars.
    pub fn with_max_input_chars_per_word(
        self,
        max_input_chars_per_word: usize,
    ) -> Self {
        Self {
            max_input_chars_per_word,
            ..self
        }
    }

    /// Bind a vocabulary other than the piece table.
    pub fn with_vocab(
        self,
        vocab: Arc<Vocabulary<T>>,
    ) -> Self {
        Self {
            vocab: Some(vocab),
            ..self
        }
    }

    /// The base tokenizer.
    pub fn base(&self) -> &TokenizerKind<T> {
        &self.base
    }

    /// The piece table.
    pub fn pieces(&self) -> &Arc<Vocabulary<T>> {
        &self.pieces
    }

    /// The continuation prefix.
    pub fn continuation_prefix(&self) -> &str {
        &self.continuation_prefix
    }

    /// The per-word length limit, in chars.
    pub fn max_input_chars_per_word(&self) -> usize {
        self.max_input_chars_per_word
    }

    /// Split one word into ``(piece, [start, end))`` char ranges of `word`.
    ///
    /// Returns `None` when the word cannot be fully covered.
    fn split_word(
        &self,
        word: &str,
    ) -> Option<Vec<(String, usize, usize)>> {
        // byte position of every char boundary, including the end.
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(b, _)| b)
            .chain(core::iter::once(word.len()))
            .collect();
        let char_len = bounds.len() - 1;
        if char_len > self.max_input_chars_per_word {
            return None;
        }

        let mut pieces = Vec::new();
        let mut candidate = String::with_capacity(word.len() + self.continuation_prefix.len());
        let mut start = 0;
        while start < char_len {
            let mut found = None;
            for end in (start + 1..=char_len).rev() {
                candidate.clear();
                if start > 0 {
                    candidate.push_str(&self.continuation_prefix);
                }
                candidate.push_str(&word[bounds[start]..bounds[end]]);
                if self.pieces.contains(&candidate) {
                    found = Some(end);
                    break;
                }
            }
            let end = found?;
            pieces.push((candidate.clone(), start, end));
            start = end;
        }
        Some(pieces)
    }
}

impl<T: TokenType> Tokenizer<T> for SubwordTokenizer<T> {
    fn tokenize_with_offsets(
        &self,
        text: &str,
    ) -> Vec<(String, Offset)> {
        self.tokenize_with_char_spans(text)
            .into_iter()
            .map(|(piece, offset, _)| (piece, offset))
            .collect()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn tokenize_with_char_spans(
        &self,
        text: &str,
    ) -> Vec<(String, Offset, Vec<Offset>)> {
        let mut out = Vec::with_capacity(token_capacity_hint(text));

        for (word, offset, char_spans) in self.base.tokenize_with_char_spans(text) {
            let Some(pieces) = self.split_word(&word) else {
                let unknown = self.pieces.unknown_token().to_string();
                let spans = vec![offset; unknown.chars().count()];
                out.push((unknown, offset, spans));
                continue;
            };

            for (piece, start, end) in pieces {
                let consumed: &[Offset] = char_spans.get(start..end).unwrap_or_default();
                let piece_offset = covering_offset(consumed).unwrap_or(offset);

                let piece_len = piece.chars().count();
                let piece_spans: Vec<Offset> = if consumed.is_empty() {
                    vec![piece_offset; piece_len]
                } else {
                    // The continuation prefix has no source characters.
                    repeat_n(
                        Offset::empty_at(piece_offset.start),
                        piece_len.saturating_sub(consumed.len()),
                    )
                    .chain(consumed.iter().copied())
                    .collect()
                };
                out.push((piece, piece_offset, piece_spans));
            }
        }

        out
    }

    /// Glue continuation pieces onto their word, then decode through the base.
    ///
    /// A continuation piece with no word before it is kept as written.
    fn decode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> TokenizerResult<String> {
        let prefix = self.continuation_prefix.as_str();
        let mut words: Vec<String> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let token = token.as_ref();
            match (token.strip_prefix(prefix), words.last_mut()) {
                (Some(rest), Some(word)) if !prefix.is_empty() => word.push_str(rest),
                _ => words.push(token.to_string()),
            }
        }

        self.base.decode(&words)
    }

    fn vocab(&self) -> Option<&Arc<Vocabulary<T>>> {
        self.vocab.as_ref()
    }

    fn set_vocab(
        &mut self,
        vocab: Arc<Vocabulary<T>>,
    ) {
        self.vocab = Some(vocab);
    }

    fn clear_vocab(&mut self) {
        self.vocab = None;
    }
}
