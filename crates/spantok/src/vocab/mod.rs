//! # Vocabulary

pub mod io;
pub mod special;
pub mod vocabulary;

pub use special::{SpecialRole, SpecialTokens, bert_special_tokens};
pub use vocabulary::{Vocabulary, VocabularyBuilder};
