//! # Parallel Tokenizer

use crate::errors::TokenizerResult;
use crate::offsets::Offset;
use crate::tokenizers::{Encoded, OutputKind, Tokenizer};
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use alloc::sync::Arc;

/// Batch-Level Parallel Tokenizer Wrapper.
///
/// Enables ``rayon`` encoding of batches; single texts are encoded by the inner tokenizer.
#[derive(Debug, Clone)]
pub struct ParallelTokenizer<T: TokenType, D: Tokenizer<T>> {
    /// Inner tokenizer.
    pub inner: D,

    _marker: std::marker::PhantomData<T>,
}

impl<T, D> ParallelTokenizer<T, D>
where
    T: TokenType,
    D: Tokenizer<T>,
{
    /// Create a new parallel tokenizer.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, D> Tokenizer<T> for ParallelTokenizer<T, D>
where
    T: TokenType,
    D: Tokenizer<T>,
{
    fn tokenize_with_offsets(
        &self,
        text: &str,
    ) -> Vec<(String, Offset)> {
        self.inner.tokenize_with_offsets(text)
    }

    fn tokenize_with_char_spans(
        &self,
        text: &str,
    ) -> Vec<(String, Offset, Vec<Offset>)> {
        self.inner.tokenize_with_char_spans(text)
    }

    fn decode<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> TokenizerResult<String> {
        self.inner.decode(tokens)
    }

    fn vocab(&self) -> Option<&Arc<Vocabulary<T>>> {
        self.inner.vocab()
    }

    fn set_vocab(
        &mut self,
        vocab: Arc<Vocabulary<T>>,
    ) {
        self.inner.set_vocab(vocab)
    }

    fn clear_vocab(&mut self) {
        self.inner.clear_vocab()
    }

    fn encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        output: OutputKind,
    ) -> TokenizerResult<Vec<Encoded<T>>> {
        use rayon::prelude::*;
        if output == OutputKind::Int {
            // Fail once, up front, rather than per text.
            self.require_vocab()?;
        }
        batch
            .par_iter()
            .map(|text| self.encode(text.as_ref(), output))
            .collect()
    }
}
