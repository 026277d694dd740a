//! # Text Normalization
//!
//! Rule-based rewriting which keeps every normalized character aligned to the
//! original input. Token offsets are read off the alignment after splitting;
//! they are never recovered by searching the original text.

pub mod aligned;
pub mod chars;
pub mod escape;
pub mod rules;

pub use aligned::{AlignedChar, AlignedText};
pub use rules::{RulePipeline, TextRule};
