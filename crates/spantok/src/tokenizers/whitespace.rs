//! # Whitespace Tokenizer

use crate::errors::TokenizerResult;
use crate::offsets::Offset;
use crate::tokenizers::tokenizer::{Tokenizer, token_capacity_hint};
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use alloc::sync::Arc;

/// Splits on runs of whitespace; offsets are exact substrings of the input.
#[derive(Debug, Clone)]
pub struct WhitespaceTokenizer<T: TokenType> {
    vocab: Option<Arc<Vocabulary<T>>>,
}

impl<T: TokenType> Default for WhitespaceTokenizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TokenType> WhitespaceTokenizer<T> {
    /// Create an unbound tokenizer.
    pub fn new() -> Self {
        Self { vocab: None }
    }

    /// Bind a vocabulary.
    pub fn with_vocab(
        self,
        vocab: Arc<Vocabulary<T>>,
    ) -> Self {
        Self { vocab: Some(vocab) }
    }
}

impl<T: TokenType> Tokenizer<T> for WhitespaceTokenizer<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn tokenize_with_offsets(
        &self,
        text: &str,
    ) -> Vec<(String, Offset)> {
        let mut words = Vec::with_capacity(token_capacity_hint(text));

        // (char index, byte index) of the open word.
        let mut open: Option<(usize, usize)> = None;
        let mut char_len = 0;

        for (ci, (bi, ch)) in text.char_indices().enumerate() {
            char_len = ci + 1;
            if ch.is_whitespace() {
                if let Some((cs, bs)) = open.take() {
                    words.push((text[bs..bi].to_string(), Offset::new(cs, ci)));
                }
            } else if open.is_none() {
                open = Some((ci, bi));
            }
        }
        if let Some((cs, bs)) = open {
            words.push((text[bs..].to_string(), Offset::new(cs, char_len)));
        }

        words
    }

    fn tokenize_with_char_spans(
        &self,
        text: &str,
    ) -> Vec<(String, Offset, Vec<Offset>)> {
        self.tokenize_with_offsets(text)
            .into_iter()
            .map(|(word, offset)| {
                let char_spans = offset.as_range().map(|i| Offset::new(i, i + 1)).collect();
                (word, offset, char_spans)
            })
            .collect()
    }

    fn decode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> TokenizerResult<String> {
        Ok(tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<&str>>()
            .join(" "))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::offsets_are_well_formed;
    use crate::tokenizers::{Encoded, OutputKind};
    use crate::types::{check_is_send, check_is_sync};
    use crate::vocab::SpecialRole;

    #[test]
    fn test_offsets_slice_exactly() {
        type T = u32;
        let tokenizer = WhitespaceTokenizer::<T>::new();
        check_is_send(&tokenizer);
        check_is_sync(&tokenizer);

        let text = "  Grüße,\tworld \n\u{3000}ok ";
        let words = tokenizer.tokenize_with_offsets(text);
        assert_eq!(
            words.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
            vec!["Grüße,", "world", "ok"]
        );
        for (token, offset) in &words {
            assert_eq!(offset.slice(text), token);
        }
        let offsets: Vec<Offset> = words.iter().map(|(_, o)| *o).collect();
        assert!(offsets_are_well_formed(&offsets, text.chars().count()));
    }

    #[test]
    fn test_char_spans_are_identity() {
        let tokenizer = WhitespaceTokenizer::<u32>::new();
        assert_eq!(
            tokenizer.tokenize_with_char_spans(" né x"),
            vec![
                (
                    "né".to_string(),
                    Offset::new(1, 3),
                    vec![Offset::new(1, 2), Offset::new(2, 3)]
                ),
                ("x".to_string(), Offset::new(4, 5), vec![Offset::new(4, 5)]),
            ]
        );
    }

    #[test]
    fn test_empty_and_blank() {
        let tokenizer = WhitespaceTokenizer::<u32>::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" \t\n").is_empty());
        assert_eq!(
            tokenizer.tokenize_with_offsets("x"),
            vec![("x".to_string(), Offset::new(0, 1))]
        );
    }

    #[test]
    fn test_int_output_requires_vocab() {
        type T = u32;
        let mut tokenizer = WhitespaceTokenizer::<T>::new();

        let err = tokenizer.encode("a b", OutputKind::Int).unwrap_err();
        assert!(err.is_configuration());

        let vocab: Arc<Vocabulary<T>> =
            Vocabulary::build(["a", "b"], [(SpecialRole::Unknown, "<unk>")])
                .unwrap()
                .into();
        tokenizer.set_vocab(vocab);
        assert_eq!(
            tokenizer.encode("a b c", OutputKind::Int).unwrap(),
            Encoded::Ids(vec![0, 1, 2])
        );
        assert_eq!(tokenizer.decode_ids(&[1, 0]).unwrap(), "b a");
        assert!(tokenizer.decode_ids(&[7]).unwrap_err().is_index());

        tokenizer.clear_vocab();
        assert!(tokenizer.vocab().is_none());
        assert!(tokenizer.decode_ids(&[0]).unwrap_err().is_configuration());
    }

    #[test]
    fn test_decode_joins() {
        let tokenizer = WhitespaceTokenizer::<u32>::new();
        assert_eq!(tokenizer.decode(&["a", "b,", "c"]).unwrap(), "a b, c");
        assert_eq!(tokenizer.decode::<&str>(&[]).unwrap(), "");
    }
}
