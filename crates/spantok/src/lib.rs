//! # Span-Tracking Tokenizers
//!
//! Tokenizers which remember where every token came from.
//!
//! Three segmentation strategies share the [`Tokenizer`] trait:
//! * [`WhitespaceTokenizer`] - split on whitespace runs.
//! * [`RuleTokenizer`] - a Moses-style rule pipeline (casing, accents,
//!   protected patterns, punctuation splitting, XML escaping).
//! * [`SubwordTokenizer`] - greedy longest-match word pieces over any base tokenizer.
//!
//! Every emitted token carries an [`Offset`], a half-open character range
//! into the *original* input; offsets survive normalization because the
//! rule pipeline rewrites an [`normalization::AlignedText`] buffer rather than a plain string.
//!
//! Tokenizers may be bound to a [`Vocabulary`] to emit ids.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spantok::{
//!     OutputKind, RuleTokenizerOptions, SpecialRole, SubwordTokenizer, Tokenizer, Vocabulary,
//! };
//!
//! let pieces: Arc<Vocabulary<u32>> = Vocabulary::build(
//!     ["CO", "##VI", "##D", "##19", "cases", "#"],
//!     [(SpecialRole::Unknown, "[UNK]")],
//! )
//! .unwrap()
//! .into();
//!
//! let base = RuleTokenizerOptions::default().init::<u32>().unwrap();
//! let tokenizer = SubwordTokenizer::new(base, pieces);
//!
//! let (tokens, offsets) = tokenizer
//!     .encode_with_offsets("#COVID19 cases", OutputKind::Str)
//!     .unwrap();
//! assert_eq!(
//!     tokens.tokens().unwrap(),
//!     &["#", "CO", "##VI", "##D", "##19", "cases"]
//! );
//! assert_eq!(offsets[1].slice("#COVID19 cases"), "CO");
//! ```
#![warn(missing_docs, unused)]

extern crate alloc;

pub mod config;
pub mod errors;
pub mod normalization;
pub mod offsets;
pub mod provider;
#[cfg(feature = "rayon")]
pub mod rayon;
pub mod tokenizers;
pub mod types;
pub mod util;
pub mod vocab;

pub use config::{TokenizerConfig, TokenizerType};
pub use errors::{TokenizerError, TokenizerResult};
pub use offsets::Offset;
pub use tokenizers::{
    Encoded, OutputKind, RuleTokenizer, RuleTokenizerOptions, SequenceTemplate, SubwordTokenizer,
    Tokenizer, TokenizerKind, WhitespaceTokenizer,
};
pub use vocab::{SpecialRole, SpecialTokens, Vocabulary, VocabularyBuilder};

/// Default marker prefixed to non-initial word pieces.
pub const DEFAULT_CONTINUATION_PREFIX: &str = "##";

/// Default limit on base-token length before the subword tokenizer gives up.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// Constant guess for the expected chars/token ratio.
pub const CHARS_PER_TOKEN_HINT: f64 = 4.0;
