//! # Vocabulary
//!
//! An immutable ``{ String <-> T }`` bijection over ``[0, size)``,
//! with reserved special tokens.

use crate::errors::{TokenizerError, TokenizerResult};
use crate::types::{StringToTokenMap, TokenType, token_index};
use crate::vocab::special::{SpecialRole, SpecialTokens};
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Builder for [`Vocabulary`].
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuilder {
    tokens: Vec<String>,
    specials: SpecialTokens,
    allow_shared_roles: bool,
}

impl VocabularyBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tokens; list order is id order.
    pub fn with_tokens<I, S>(
        self,
        tokens: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = self;
        builder
            .tokens
            .extend(tokens.into_iter().map(|t| t.as_ref().to_string()));
        builder
    }

    /// Assign a special role; replaces any earlier assignment of the role.
    pub fn with_special<S: AsRef<str>>(
        self,
        role: SpecialRole,
        token: S,
    ) -> Self {
        let mut builder = self;
        builder.specials.insert(role, token.as_ref().to_string());
        builder
    }

    /// Assign several special roles.
    pub fn with_specials<W, S>(
        self,
        specials: W,
    ) -> Self
    where
        W: IntoIterator<Item = (SpecialRole, S)>,
        S: AsRef<str>,
    {
        specials
            .into_iter()
            .fold(self, |b, (role, token)| b.with_special(role, token))
    }

    /// Permit two roles to name the same token string.
    pub fn allow_shared_roles(
        self,
        allow: bool,
    ) -> Self {
        Self {
            allow_shared_roles: allow,
            ..self
        }
    }

    /// Validate and build the vocabulary.
    ///
    /// Special strings absent from the token list are appended, in role order.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] when:
    /// * there is no [`SpecialRole::Unknown`] assignment;
    /// * a token, or a special string, is empty;
    /// * a token appears more than once;
    /// * two roles share a string, and shared roles are not allowed;
    /// * the vocabulary does not fit in `T`.
    pub fn build<T: TokenType>(self) -> TokenizerResult<Vocabulary<T>> {
        let VocabularyBuilder {
            mut tokens,
            specials,
            allow_shared_roles,
        } = self;

        if !specials.contains_key(&SpecialRole::Unknown) {
            return Err(TokenizerError::configuration(
                "vocabulary requires an `unknown` special token",
            ));
        }

        let mut claimed: BTreeMap<&str, SpecialRole> = BTreeMap::new();
        for (&role, token) in &specials {
            if token.is_empty() {
                return Err(TokenizerError::configuration(format!(
                    "special token for role `{role}` is empty"
                )));
            }
            if let Some(prior) = claimed.insert(token.as_str(), role)
                && !allow_shared_roles
            {
                return Err(TokenizerError::configuration(format!(
                    "roles `{prior}` and `{role}` both name {token:?}"
                )));
            }
        }

        let mut index: AHashMap<&str, usize> = AHashMap::with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                return Err(TokenizerError::configuration(format!(
                    "empty token at id {idx}"
                )));
            }
            if let Some(first) = index.insert(token.as_str(), idx) {
                return Err(TokenizerError::configuration(format!(
                    "duplicate token {token:?} at ids {first} and {idx}"
                )));
            }
        }

        let missing: Vec<String> = specials
            .values()
            .filter(|s| !index.contains_key(s.as_str()))
            .fold(Vec::new(), |mut acc, s| {
                if !acc.contains(s) {
                    acc.push(s.clone());
                }
                acc
            });
        drop(index);
        tokens.extend(missing);

        Vocabulary::from_parts(tokens, specials)
    }
}

/// Token vocabulary: ordered unique strings, index = id.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary<T: TokenType> {
    /// ``id -> token``.
    tokens: Vec<String>,

    /// ``token -> id``.
    token_map: StringToTokenMap<T>,

    /// ``role -> token``.
    specials: SpecialTokens,

    /// ``role -> id``.
    special_ids: BTreeMap<SpecialRole, T>,

    unknown_id: T,
}

impl<T: TokenType> Vocabulary<T> {
    /// Build a vocabulary from a token list and role assignments.
    ///
    /// See [`VocabularyBuilder::build`].
    pub fn build<I, S, W, R>(
        tokens: I,
        specials: W,
    ) -> TokenizerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: IntoIterator<Item = (SpecialRole, R)>,
        R: AsRef<str>,
    {
        VocabularyBuilder::new()
            .with_tokens(tokens)
            .with_specials(specials)
            .build()
    }

    /// Assemble from an already validated token list.
    fn from_parts(
        tokens: Vec<String>,
        specials: SpecialTokens,
    ) -> TokenizerResult<Self> {
        let mut token_map: StringToTokenMap<T> = AHashMap::with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            let id = T::from_usize(idx).ok_or_else(|| {
                TokenizerError::configuration(format!(
                    "vocabulary of {} tokens overflows the id type at {token:?}",
                    tokens.len()
                ))
            })?;
            token_map.insert(token.clone(), id);
        }

        let special_ids: BTreeMap<SpecialRole, T> = specials
            .iter()
            .map(|(&role, token)| (role, token_map[token.as_str()]))
            .collect();
        let unknown_id = special_ids[&SpecialRole::Unknown];

        log::debug!(
            "built vocabulary: {} tokens, {} special roles",
            tokens.len(),
            specials.len()
        );

        Ok(Self {
            tokens,
            token_map,
            specials,
            special_ids,
            unknown_id,
        })
    }

    /// Count of all tokens, specials included.
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    /// Alias of [`Self::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns `true` if the vocabulary has no tokens.
    ///
    /// A built vocabulary always holds its unknown token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up the id of `token`; unknown strings map to [`Self::unknown_id`].
    pub fn id_of(
        &self,
        token: &str,
    ) -> T {
        self.lookup_id(token).unwrap_or(self.unknown_id)
    }

    /// Look up the id of `token`, if present.
    pub fn lookup_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_map.get(token).copied()
    }

    /// Returns `true` if `token` is in the vocabulary.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.token_map.contains_key(token)
    }

    /// Look up the token for `id`.
    ///
    /// # Errors
    /// [`TokenizerError::Index`] if `id` is outside ``[0, size)``.
    pub fn token_of(
        &self,
        id: T,
    ) -> TokenizerResult<&str> {
        token_index(id)
            .and_then(|idx| self.tokens.get(idx))
            .map(String::as_str)
            .ok_or_else(|| TokenizerError::Index {
                id: token_index(id).unwrap_or(usize::MAX),
                size: self.size(),
            })
    }

    /// Map tokens to ids; never fails.
    pub fn convert_tokens_to_ids<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Vec<T> {
        tokens.iter().map(|t| self.id_of(t.as_ref())).collect()
    }

    /// Map ids to tokens.
    pub fn convert_ids_to_tokens(
        &self,
        ids: &[T],
    ) -> TokenizerResult<Vec<String>> {
        ids.iter()
            .map(|&id| self.token_of(id).map(str::to_string))
            .collect()
    }

    /// Iterate ``(id, token)`` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &str)> + '_ {
        self.tokens
            .iter()
            .map(|token| (self.token_map[token.as_str()], token.as_str()))
    }

    /// The tokens, in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The ``role -> token`` assignments.
    pub fn specials(&self) -> &SpecialTokens {
        &self.specials
    }

    /// The token assigned to `role`, if any.
    pub fn special_token(
        &self,
        role: SpecialRole,
    ) -> Option<&str> {
        self.specials.get(&role).map(String::as_str)
    }

    /// The id assigned to `role`, if any.
    pub fn special_id(
        &self,
        role: SpecialRole,
    ) -> Option<T> {
        self.special_ids.get(&role).copied()
    }

    /// Returns `true` if `id` carries any special role.
    pub fn is_special_id(
        &self,
        id: T,
    ) -> bool {
        self.special_ids.values().any(|&s| s == id)
    }

    /// The unknown-token id.
    pub fn unknown_id(&self) -> T {
        self.unknown_id
    }

    /// The unknown-token string.
    pub fn unknown_token(&self) -> &str {
        &self.specials[&SpecialRole::Unknown]
    }

    /// The classification id, if assigned.
    pub fn cls_id(&self) -> Option<T> {
        self.special_id(SpecialRole::Classification)
    }

    /// The separator id, if assigned.
    pub fn sep_id(&self) -> Option<T> {
        self.special_id(SpecialRole::Separator)
    }

    /// The padding id, if assigned.
    pub fn pad_id(&self) -> Option<T> {
        self.special_id(SpecialRole::Padding)
    }

    /// The mask id, if assigned.
    pub fn mask_id(&self) -> Option<T> {
        self.special_id(SpecialRole::Mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{check_is_send, check_is_sync};
    use crate::vocab::special::bert_special_tokens;

    fn unk() -> [(SpecialRole, &'static str); 1] {
        [(SpecialRole::Unknown, "[UNK]")]
    }

    #[test]
    fn test_round_trip() {
        type T = u32;
        let vocab: Vocabulary<T> =
            Vocabulary::build(["[UNK]", "the", "cat", "##s"], unk()).unwrap();
        check_is_send(&vocab);
        check_is_sync(&vocab);

        assert_eq!(vocab.size(), 4);
        for token in vocab.tokens() {
            assert_eq!(vocab.token_of(vocab.id_of(token)).unwrap(), token);
        }
        assert_eq!(vocab.id_of("cat"), 2);
        assert_eq!(vocab.id_of("dog"), vocab.unknown_id());
        assert_eq!(vocab.unknown_id(), 0);
        assert_eq!(vocab.lookup_id("dog"), None);
        assert!(vocab.contains("##s"));
    }

    #[test]
    fn test_specials_appended_in_role_order() {
        type T = u16;
        let vocab: Vocabulary<T> = Vocabulary::build(["a", "b"], bert_special_tokens()).unwrap();

        assert_eq!(
            vocab.tokens(),
            &["a", "b", "[UNK]", "[PAD]", "[CLS]", "[SEP]", "[MASK]"]
        );
        assert_eq!(vocab.unknown_id(), 2);
        assert_eq!(vocab.pad_id(), Some(3));
        assert_eq!(vocab.cls_id(), Some(4));
        assert_eq!(vocab.sep_id(), Some(5));
        assert_eq!(vocab.mask_id(), Some(6));
        assert!(vocab.is_special_id(5));
        assert!(!vocab.is_special_id(0));
        assert_eq!(vocab.special_token(SpecialRole::Mask), Some("[MASK]"));
    }

    #[test]
    fn test_present_specials_keep_their_ids() {
        type T = u32;
        let vocab: Vocabulary<T> =
            Vocabulary::build(["[PAD]", "x", "[UNK]"], bert_special_tokens()).unwrap();
        assert_eq!(vocab.pad_id(), Some(0));
        assert_eq!(vocab.unknown_id(), 2);
        assert_eq!(vocab.cls_id(), Some(3));
        assert_eq!(vocab.size(), 6);
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = Vocabulary::<u32>::build(["a", "b", "a"], unk()).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("duplicate token \"a\" at ids 0 and 2"));
    }

    #[test]
    fn test_missing_unknown_rejected() {
        let err =
            Vocabulary::<u32>::build(["a"], [(SpecialRole::Padding, "[PAD]")]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_tokens_rejected() {
        assert!(
            Vocabulary::<u32>::build(["a", ""], unk())
                .unwrap_err()
                .is_configuration()
        );
        assert!(
            Vocabulary::<u32>::build(["a"], [(SpecialRole::Unknown, "")])
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn test_shared_roles() {
        let specials = [
            (SpecialRole::Unknown, "<unk>"),
            (SpecialRole::Padding, "<unk>"),
        ];

        let err = Vocabulary::<u32>::build(["a"], specials).unwrap_err();
        assert!(err.is_configuration());

        let vocab: Vocabulary<u32> = VocabularyBuilder::new()
            .with_tokens(["a"])
            .with_specials(specials)
            .allow_shared_roles(true)
            .build()
            .unwrap();
        assert_eq!(vocab.size(), 2);
        assert_eq!(vocab.pad_id(), Some(vocab.unknown_id()));
    }

    #[test]
    fn test_id_overflow() {
        let tokens: Vec<String> = (0..256).map(|i| format!("t{i}")).collect();
        let err = Vocabulary::<u8>::build(&tokens, unk()).unwrap_err();
        assert!(err.is_configuration());

        let vocab = Vocabulary::<u16>::build(&tokens, unk()).unwrap();
        assert_eq!(vocab.size(), 257);
    }

    #[test]
    fn test_token_of_out_of_range() {
        type T = u32;
        let vocab: Vocabulary<T> = Vocabulary::build(["a", "b"], unk()).unwrap();

        let err = vocab.token_of(3).unwrap_err();
        assert!(err.is_index());
        assert!(matches!(err, TokenizerError::Index { id: 3, size: 3 }));
        assert_eq!(vocab.token_of(2).unwrap(), "[UNK]");
    }

    #[test]
    fn test_convert_batches() {
        type T = u32;
        let vocab: Vocabulary<T> = Vocabulary::build(["a", "b"], unk()).unwrap();

        assert_eq!(vocab.convert_tokens_to_ids(&["b", "zz", "a"]), vec![1, 2, 0]);
        assert_eq!(
            vocab.convert_ids_to_tokens(&[1, 0]).unwrap(),
            vec!["b".to_string(), "a".to_string()]
        );
        assert!(vocab.convert_ids_to_tokens(&[9]).is_err());
        assert_eq!(
            vocab.iter().collect::<Vec<_>>(),
            vec![(0, "a"), (1, "b"), (2, "[UNK]")]
        );
    }
}
