//! # Tokenizers
//!
//! The [`Tokenizer`] trait and its strategies.

pub mod kind;
pub mod rule_based;
pub mod subword;
pub mod template;
pub mod tokenizer;
pub mod whitespace;

pub use kind::TokenizerKind;
pub use rule_based::{RuleTokenizer, RuleTokenizerOptions};
pub use subword::SubwordTokenizer;
pub use template::SequenceTemplate;
pub use tokenizer::{Encoded, OutputKind, Tokenizer};
pub use whitespace::WhitespaceTokenizer;
