//! # Tokenizer Selection
//!
//! [`Tokenizer`] has generic methods, so it is not object-safe; the closed
//! set of strategies is selected through an enum instead.

use crate::errors::TokenizerResult;
use crate::offsets::Offset;
use crate::tokenizers::rule_based::RuleTokenizer;
use crate::tokenizers::subword::SubwordTokenizer;
use crate::tokenizers::tokenizer::Tokenizer;
use crate::tokenizers::whitespace::WhitespaceTokenizer;
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use alloc::sync::Arc;

/// One of the tokenizer strategies.
#[derive(Debug, Clone)]
pub enum TokenizerKind<T: TokenType> {
    /// See [`WhitespaceTokenizer`].
    Whitespace(WhitespaceTokenizer<T>),

    /// See [`RuleTokenizer`].
    Rule(RuleTokenizer<T>),

    /// See [`SubwordTokenizer`].
    Subword(SubwordTokenizer<T>),
}

macro_rules! dispatch {
    ($self:expr, $tok:ident => $body:expr) => {
        match $self {
            TokenizerKind::Whitespace($tok) => $body,
            TokenizerKind::Rule($tok) => $body,
            TokenizerKind::Subword($tok) => $body,
        }
    };
}

impl<T: TokenType> TokenizerKind<T> {
    /// Short name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            TokenizerKind::Whitespace(_) => "whitespace",
            TokenizerKind::Rule(_) => "rule",
            TokenizerKind::Subword(_) => "subword",
        }
    }
}

impl<T: TokenType> From<WhitespaceTokenizer<T>> for TokenizerKind<T> {
    fn from(tokenizer: WhitespaceTokenizer<T>) -> Self {
        TokenizerKind::Whitespace(tokenizer)
    }
}

impl<T: TokenType> From<RuleTokenizer<T>> for TokenizerKind<T> {
    fn from(tokenizer: RuleTokenizer<T>) -> Self {
        TokenizerKind::Rule(tokenizer)
    }
}

impl<T: TokenType> From<SubwordTokenizer<T>> for TokenizerKind<T> {
    fn from(tokenizer: SubwordTokenizer<T>) -> Self {
        TokenizerKind::Subword(tokenizer)
    }
}

impl<T: TokenType> Tokenizer<T> for TokenizerKind<T> {
    fn tokenize_with_offsets(
        &self,
        text: &str,
    ) -> Vec<(String, Offset)> {
        dispatch!(self, tok => tok.tokenize_with_offsets(text))
    }

    fn tokenize_with_char_spans(
        &self,
        text: &str,
    ) -> Vec<(String, Offset, Vec<Offset>)> {
        dispatch!(self, tok => tok.tokenize_with_char_spans(text))
    }

    fn decode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> TokenizerResult<String> {
        dispatch!(self, tok => tok.decode(tokens))
    }

    fn vocab(&self) -> Option<&Arc<Vocabulary<T>>> {
        dispatch!(self, tok => tok.vocab())
    }

    fn set_vocab(
        &mut self,
        vocab: Arc<Vocabulary<T>>,
    ) {
        dispatch!(self, tok => tok.set_vocab(vocab))
    }

    fn clear_vocab(&mut self) {
        dispatch!(self, tok => tok.clear_vocab())
    }
}
