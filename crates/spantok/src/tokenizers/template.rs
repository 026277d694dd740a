//! # Sequence Templates
//!
//! BERT-style framing of encoded ids with classification and separator tokens.

use crate::errors::{TokenizerError, TokenizerResult};
use crate::offsets::Offset;
use crate::types::TokenType;
use crate::vocab::{SpecialRole, Vocabulary};

/// Frames id sequences as ``[CLS] a [SEP]`` or ``[CLS] a [SEP] b [SEP]``.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTemplate<T: TokenType> {
    cls: T,
    sep: T,
}

impl<T: TokenType> SequenceTemplate<T> {
    /// Create a template from explicit ids.
    pub fn new(
        cls: T,
        sep: T,
    ) -> Self {
        Self { cls, sep }
    }

    /// Create a template from the vocabulary's role assignments.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] if either role is unassigned.
    pub fn from_vocab(vocab: &Vocabulary<T>) -> TokenizerResult<Self> {
        let role_id = |role: SpecialRole| {
            vocab.special_id(role).ok_or_else(|| {
                TokenizerError::configuration(format!("vocabulary has no {role} token"))
            })
        };
        Ok(Self::new(
            role_id(SpecialRole::Classification)?,
            role_id(SpecialRole::Separator)?,
        ))
    }

    /// The classification id.
    pub fn cls(&self) -> T {
        self.cls
    }

    /// The separator id.
    pub fn sep(&self) -> T {
        self.sep
    }

    /// ``[CLS] a [SEP]``.
    pub fn single(
        &self,
        a: &[T],
    ) -> Vec<T> {
        let mut ids = Vec::with_capacity(a.len() + 2);
        ids.push(self.cls);
        ids.extend_from_slice(a);
        ids.push(self.sep);
        ids
    }

    /// ``[CLS] a [SEP] b [SEP]``.
    pub fn pair(
        &self,
        a: &[T],
        b: &[T],
    ) -> Vec<T> {
        let mut ids = self.single(a);
        ids.reserve(b.len() + 1);
        ids.extend_from_slice(b);
        ids.push(self.sep);
        ids
    }

    /// [`Self::single`], with offsets.
    ///
    /// The framing tokens get empty offsets at the start and end of the text.
    pub fn single_with_offsets(
        &self,
        a: &[T],
        offsets: &[Offset],
    ) -> (Vec<T>, Vec<Offset>) {
        let end = offsets.last().map_or(0, |o| o.end);

        let mut framed = Vec::with_capacity(offsets.len() + 2);
        framed.push(Offset::empty_at(0));
        framed.extend_from_slice(offsets);
        framed.push(Offset::empty_at(end));

        (self.single(a), framed)
    }

    /// Segment ids matching [`Self::single`] (`b_len == None`) or [`Self::pair`].
    pub fn type_ids(
        &self,
        a_len: usize,
        b_len: Option<usize>,
    ) -> Vec<u8> {
        let mut type_ids = vec![0; a_len + 2];
        if let Some(b_len) = b_len {
            type_ids.resize(type_ids.len() + b_len + 1, 1);
        }
        type_ids
    }
}
