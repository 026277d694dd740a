//! # Tokenizer Trait

use crate::CHARS_PER_TOKEN_HINT;
use crate::errors::{TokenizerError, TokenizerResult};
use crate::offsets::Offset;
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use alloc::sync::Arc;
use std::str::FromStr;

/// Requested encoding output.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Token strings.
    #[default]
    Str,

    /// Token ids, via the bound vocabulary.
    Int,
}

impl FromStr for OutputKind {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" => Ok(OutputKind::Str),
            "int" => Ok(OutputKind::Int),
            _ => Err(TokenizerError::configuration(format!(
                "unknown output kind {s:?}; expected \"str\" or \"int\""
            ))),
        }
    }
}

/// The result of an encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded<T: TokenType> {
    /// Token strings.
    Tokens(Vec<String>),

    /// Token ids.
    Ids(Vec<T>),
}

impl<T: TokenType> Encoded<T> {
    /// Number of tokens.
    pub fn len(&self) -> usize {
        match self {
            Encoded::Tokens(tokens) => tokens.len(),
            Encoded::Ids(ids) => ids.len(),
        }
    }

    /// Returns `true` if nothing was encoded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The token strings, for [`OutputKind::Str`] results.
    pub fn tokens(&self) -> Option<&[String]> {
        match self {
            Encoded::Tokens(tokens) => Some(tokens),
            Encoded::Ids(_) => None,
        }
    }

    /// The ids, for [`OutputKind::Int`] results.
    pub fn ids(&self) -> Option<&[T]> {
        match self {
            Encoded::Ids(ids) => Some(ids),
            Encoded::Tokens(_) => None,
        }
    }

    /// Unwrap into token strings.
    pub fn into_tokens(self) -> Option<Vec<String>> {
        match self {
            Encoded::Tokens(tokens) => Some(tokens),
            Encoded::Ids(_) => None,
        }
    }

    /// Unwrap into ids.
    pub fn into_ids(self) -> Option<Vec<T>> {
        match self {
            Encoded::Ids(ids) => Some(ids),
            Encoded::Tokens(_) => None,
        }
    }
}

/// Common interface of all tokenizer strategies.
///
/// Implementors provide segmentation ([`Tokenizer::tokenize_with_offsets`]),
/// decoding, and vocabulary binding; encoding is derived from those, so
/// [`Tokenizer::encode`] and [`Tokenizer::encode_with_offsets`] always agree
/// on token boundaries.
pub trait Tokenizer<T: TokenType>: Send + Sync {
    /// Segment `text` into ``(token, offset)`` pairs.
    ///
    /// Offsets are character ranges into `text`, non-decreasing, and each
    /// covers the input the token was derived from.
    fn tokenize_with_offsets(
        &self,
        text: &str,
    ) -> Vec<(String, Offset)>;

    /// Best-effort reconstruction of readable text from tokens.
    ///
    /// Not a guaranteed inverse of encoding.
    fn decode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> TokenizerResult<String>;

    /// The bound vocabulary, if any.
    fn vocab(&self) -> Option<&Arc<Vocabulary<T>>>;

    /// Bind a vocabulary; affects only later [`OutputKind::Int`] calls.
    fn set_vocab(
        &mut self,
        vocab: Arc<Vocabulary<T>>,
    );

    /// Remove the vocabulary binding.
    fn clear_vocab(&mut self);

    /// Segment `text` into ``(token, offset, char spans)`` triples.
    ///
    /// `char spans` holds one original span per character of the token. The
    /// default aligns every character to the whole token offset; strategies
    /// that track finer alignment override it.
    fn tokenize_with_char_spans(
        &self,
        text: &str,
    ) -> Vec<(String, Offset, Vec<Offset>)> {
        self.tokenize_with_offsets(text)
            .into_iter()
            .map(|(token, offset)| {
                let char_spans = vec![offset; token.chars().count()];
                (token, offset, char_spans)
            })
            .collect()
    }

    /// Segment `text` into tokens.
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        self.tokenize_with_offsets(text)
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    /// The bound vocabulary.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] if none is bound.
    fn require_vocab(&self) -> TokenizerResult<&Arc<Vocabulary<T>>> {
        self.vocab().ok_or_else(|| {
            TokenizerError::configuration("integer output requested, but no vocabulary is bound")
        })
    }

    /// Encode `text`, also returning one [`Offset`] per token.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] for [`OutputKind::Int`] with no bound vocabulary.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn encode_with_offsets(
        &self,
        text: &str,
        output: OutputKind,
    ) -> TokenizerResult<(Encoded<T>, Vec<Offset>)> {
        let vocab = match output {
            OutputKind::Int => Some(self.require_vocab()?),
            OutputKind::Str => None,
        };

        let (tokens, offsets): (Vec<String>, Vec<Offset>) =
            self.tokenize_with_offsets(text).into_iter().unzip();

        let encoded = match vocab {
            Some(vocab) => Encoded::Ids(vocab.convert_tokens_to_ids(&tokens)),
            None => Encoded::Tokens(tokens),
        };
        Ok((encoded, offsets))
    }

    /// Encode `text`.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] for [`OutputKind::Int`] with no bound vocabulary.
    fn encode(
        &self,
        text: &str,
        output: OutputKind,
    ) -> TokenizerResult<Encoded<T>> {
        self.encode_with_offsets(text, output)
            .map(|(encoded, _)| encoded)
    }

    /// Decode ids through the bound vocabulary.
    ///
    /// # Errors
    /// * [`TokenizerError::Configuration`] if no vocabulary is bound;
    /// * [`TokenizerError::Index`] for ids outside the vocabulary.
    fn decode_ids(
        &self,
        ids: &[T],
    ) -> TokenizerResult<String> {
        let tokens = self.require_vocab()?.convert_ids_to_tokens(ids)?;
        self.decode(&tokens)
    }

    /// Encode a batch of texts.
    fn encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        output: OutputKind,
    ) -> TokenizerResult<Vec<Encoded<T>>> {
        batch
            .iter()
            .map(|text| self.encode(text.as_ref(), output))
            .collect()
    }
}

/// Capacity guess for the token buffer of `text`.
pub(crate) fn token_capacity_hint(text: &str) -> usize {
    (text.len() as f64 / CHARS_PER_TOKEN_HINT) as usize + 1
}
