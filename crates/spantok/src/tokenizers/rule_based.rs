//! # Rule-Based Word Tokenizer
//!
//! A Moses-style pipeline: control cleanup, protected patterns, optional
//! casing and accent folding, punctuation splitting, optional XML escaping;
//! then a whitespace split over the aligned result.

use crate::errors::TokenizerResult;
use crate::normalization::chars::{is_closing_punctuation, is_opening_punctuation};
use crate::normalization::escape::unescape_xml;
use crate::normalization::{RulePipeline, TextRule};
use crate::offsets::Offset;
use crate::tokenizers::tokenizer::Tokenizer;
use crate::types::TokenType;
use crate::util::regex::{RegexWrapperPattern, exact_match_union_regex_wrapper};
use crate::vocab::Vocabulary;
use alloc::sync::Arc;
use std::borrow::Cow;

/// Options for [`RuleTokenizer`].
///
/// Persisted through [`crate::TokenizerConfig`]; see
/// [`crate::TokenizerConfig::rule_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTokenizerOptions {
    /// Lowercase the input.
    pub lowercase: bool,

    /// Fold accents (NFD, then drop combining marks).
    pub strip_accents: bool,

    /// Escape `& | < > ' " [ ]` as XML entities.
    pub escape: bool,

    /// Patterns whose matches are never split or rewritten.
    pub protected_patterns: Vec<RegexWrapperPattern>,

    /// Literal strings which are never split or rewritten; e.g. special tokens.
    pub never_split: Vec<String>,
}

impl RuleTokenizerOptions {
    /// Set lowercasing.
    pub fn with_lowercase(
        self,
        lowercase: bool,
    ) -> Self {
        Self { lowercase, ..self }
    }

    /// Set accent folding.
    pub fn with_strip_accents(
        self,
        strip_accents: bool,
    ) -> Self {
        Self {
            strip_accents,
            ..self
        }
    }

    /// Set XML escaping.
    pub fn with_escape(
        self,
        escape: bool,
    ) -> Self {
        Self { escape, ..self }
    }

    /// Add a protected pattern.
    pub fn with_protected_pattern<P>(
        self,
        pattern: P,
    ) -> Self
    where
        P: Into<RegexWrapperPattern>,
    {
        let mut options = self;
        options.protected_patterns.push(pattern.into());
        options
    }

    /// Add never-split literals.
    pub fn with_never_split<I, S>(
        self,
        literals: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = self;
        options
            .never_split
            .extend(literals.into_iter().map(|s| s.as_ref().to_string()));
        options
    }

    /// Compile the options into a [`RulePipeline`].
    ///
    /// # Errors
    /// [`crate::TokenizerError::Regex`] if a protected pattern does not compile.
    pub fn pipeline(&self) -> TokenizerResult<RulePipeline> {
        let mut rules = vec![TextRule::CleanControl];

        let literals: Vec<&str> = self
            .never_split
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if !literals.is_empty() {
            rules.push(TextRule::Protect(exact_match_union_regex_wrapper(&literals)?));
        }
        for pattern in &self.protected_patterns {
            rules.push(TextRule::Protect(pattern.compile()?));
        }

        if self.lowercase {
            rules.push(TextRule::Lowercase);
        }
        if self.strip_accents {
            rules.push(TextRule::StripAccents);
        }
        rules.push(TextRule::SeparatePunctuation);
        if self.escape {
            rules.push(TextRule::EscapeXml);
        }

        Ok(RulePipeline::new(rules))
    }

    /// Build a [`RuleTokenizer`].
    pub fn init<T: TokenType>(self) -> TokenizerResult<RuleTokenizer<T>> {
        RuleTokenizer::new(self)
    }
}

/// Rule-based word tokenizer with alignment-tracked offsets.
#[derive(Debug, Clone)]
pub struct RuleTokenizer<T: TokenType> {
    options: RuleTokenizerOptions,
    pipeline: RulePipeline,
    vocab: Option<Arc<Vocabulary<T>>>,
}

impl<T: TokenType> RuleTokenizer<T> {
    /// Create an unbound tokenizer.
    pub fn new(options: RuleTokenizerOptions) -> TokenizerResult<Self> {
        let pipeline = options.pipeline()?;
        log::debug!("rule tokenizer pipeline: {} rules", pipeline.rules().len());
        Ok(Self {
            options,
            pipeline,
            vocab: None,
        })
    }

    /// Bind a vocabulary.
    pub fn with_vocab(
        self,
        vocab: Arc<Vocabulary<T>>,
    ) -> Self {
        Self {
            vocab: Some(vocab),
            ..self
        }
    }

    /// The construction options.
    pub fn options(&self) -> &RuleTokenizerOptions {
        &self.options
    }

    /// The compiled pipeline.
    pub fn pipeline(&self) -> &RulePipeline {
        &self.pipeline
    }
}

impl<T: TokenType> Tokenizer<T> for RuleTokenizer<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    fn tokenize_with_offsets(
        &self,
        text: &str,
    ) -> Vec<(String, Offset)> {
        self.pipeline.apply(text).split_whitespace()
    }

    fn tokenize_with_char_spans(
        &self,
        text: &str,
    ) -> Vec<(String, Offset, Vec<Offset>)> {
        self.pipeline
            .apply(text)
            .split_whitespace_with_char_spans()
    }

    /// Readable approximation: entities are unescaped, and punctuation is
    /// re-attached to its neighbours. Casing, accents and the original
    /// spacing are not restored.
    fn decode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> TokenizerResult<String> {
        let mut out = String::new();
        let mut attach_next = false;
        let mut open_quote = false;

        for token in tokens {
            let token: Cow<str> = if self.options.escape {
                unescape_xml(token.as_ref())
            } else {
                Cow::Borrowed(token.as_ref())
            };
            let token = token.as_ref();

            let is_quote = token == "\"";
            let is_apostrophe = token == "'";

            let attach_prev =
                is_closing_punctuation(token) || is_apostrophe || (is_quote && open_quote);
            if !out.is_empty() && !attach_prev && !attach_next {
                out.push(' ');
            }
            out.push_str(token);

            attach_next =
                is_opening_punctuation(token) || is_apostrophe || (is_quote && !open_quote);
            if is_quote {
                open_quote = !open_quote;
            }
        }

        Ok(out)
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
