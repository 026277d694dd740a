//! # Tokenizer Configuration
//!
//! Serializable description of a tokenizer, as stored in ``tokenizer.json``.
//!
//! ```json
//! {
//!   "tokenizer_type": "subword",
//!   "base_type": "rule",
//!   "lowercase": true,
//!   "strip_accents": true,
//!   "specials": {"unknown": "[UNK]", "classification": "[CLS]"}
//! }
//! ```

use crate::errors::{TokenizerError, TokenizerResult};
use crate::tokenizers::{
    RuleTokenizerOptions, SubwordTokenizer, Tokenizer, TokenizerKind, WhitespaceTokenizer,
};
use crate::types::TokenType;
use crate::util::regex::RegexWrapperPattern;
use crate::vocab::{SpecialTokens, Vocabulary, bert_special_tokens};
use crate::{DEFAULT_CONTINUATION_PREFIX, DEFAULT_MAX_INPUT_CHARS_PER_WORD};
use alloc::sync::Arc;

/// Tokenizer strategy selector.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerType {
    /// [`WhitespaceTokenizer`].
    Whitespace,

    /// [`crate::RuleTokenizer`].
    #[default]
    Rule,

    /// [`SubwordTokenizer`] over `base_type`.
    Subword,
}

/// Tokenizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// The strategy.
    pub tokenizer_type: TokenizerType,

    /// The base strategy of a subword tokenizer; must not be `subword`.
    pub base_type: TokenizerType,

    /// Lowercase (rule tokenizers).
    pub lowercase: bool,

    /// Fold accents (rule tokenizers).
    pub strip_accents: bool,

    /// XML-escape (rule tokenizers).
    pub escape: bool,

    /// Protected patterns (rule tokenizers).
    pub protected_patterns: Vec<RegexWrapperPattern>,

    /// Continuation prefix (subword tokenizers).
    pub continuation_prefix: String,

    /// Per-word length limit (subword tokenizers).
    pub max_input_chars_per_word: usize,

    /// Role assignments for the vocabulary; empty means BERT defaults.
    pub specials: SpecialTokens,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            tokenizer_type: TokenizerType::default(),
            base_type: TokenizerType::default(),
            lowercase: false,
            strip_accents: false,
            escape: false,
            protected_patterns: Vec::new(),
            continuation_prefix: DEFAULT_CONTINUATION_PREFIX.to_string(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
            specials: SpecialTokens::new(),
        }
    }
}

impl TokenizerConfig {
    /// Create a config for the given strategy.
    pub fn new(tokenizer_type: TokenizerType) -> Self {
        Self {
            tokenizer_type,
            ..Default::default()
        }
    }

    /// Parse from JSON.
    pub fn from_json_str(json: &str) -> TokenizerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> TokenizerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the subword base strategy.
    pub fn with_base_type(
        self,
        base_type: TokenizerType,
    ) -> Self {
        Self { base_type, ..self }
    }

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
        let mut config = self;
        config.protected_patterns.push(pattern.into());
        config
    }

    /// Set the continuation prefix.
    pub fn with_continuation_prefix<S: AsRef<str>>(
        self,
        prefix: S,
    ) -> Self {
        Self {
            continuation_prefix: prefix.as_ref().to_string(),
            ..self
        }
    }

    /// Set the per-word length limit.
    pub fn with_max_input_chars_per_word(
        self,
        max_input_chars_per_word: usize,
    ) -> Self {
        Self {
            max_input_chars_per_word,
            ..self
        }
    }

    /// Replace the role assignments.
    pub fn with_specials(
        self,
        specials: SpecialTokens,
    ) -> Self {
        Self { specials, ..self }
    }

    /// The role assignments to build a vocabulary with.
    pub fn effective_specials(&self) -> SpecialTokens {
        if self.specials.is_empty() {
            bert_special_tokens()
        } else {
            self.specials.clone()
        }
    }

    /// Rule options; special strings of `vocab` are never split.
    pub fn rule_options<T: TokenType>(
        &self,
        vocab: Option<&Vocabulary<T>>,
    ) -> RuleTokenizerOptions {
        let mut options = RuleTokenizerOptions::default()
            .with_lowercase(self.lowercase)
            .with_strip_accents(self.strip_accents)
            .with_escape(self.escape)
            .with_never_split(self.specials.values());
        if let Some(vocab) = vocab {
            options = options.with_never_split(vocab.specials().values());
        }
        options
            .protected_patterns
            .extend(self.protected_patterns.iter().cloned());
        options
    }

    fn build_word_tokenizer<T: TokenType>(
        &self,
        tokenizer_type: TokenizerType,
        vocab: Option<&Arc<Vocabulary<T>>>,
    ) -> TokenizerResult<TokenizerKind<T>> {
        let mut tokenizer: TokenizerKind<T> = match tokenizer_type {
            TokenizerType::Whitespace => WhitespaceTokenizer::<T>::new().into(),
            TokenizerType::Rule => self
                .rule_options(vocab.map(Arc::as_ref))
                .init::<T>()?
                .into(),
            TokenizerType::Subword => {
                return Err(TokenizerError::configuration(
                    "a subword tokenizer cannot be the base of another subword tokenizer",
                ));
            }
        };
        if let Some(vocab) = vocab {
            tokenizer.set_vocab(vocab.clone());
        }
        Ok(tokenizer)
    }

    /// Build the configured tokenizer, bound to `vocab` if given.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] if a subword tokenizer has no piece
    /// vocabulary, or its base is itself subword;
    /// [`TokenizerError::Regex`] for bad protected patterns.
    pub fn build<T: TokenType>(
        &self,
        vocab: Option<Arc<Vocabulary<T>>>,
    ) -> TokenizerResult<TokenizerKind<T>> {
        log::debug!("building {:?} tokenizer", self.tokenizer_type);

        match self.tokenizer_type {
            TokenizerType::Subword => {
                let pieces = vocab.ok_or_else(|| {
                    TokenizerError::configuration("a subword tokenizer requires a vocabulary")
                })?;
                let base = self.build_word_tokenizer(self.base_type, Some(&pieces))?;
                Ok(SubwordTokenizer::new(base, pieces)
                    .with_continuation_prefix(&self.continuation_prefix)
                    .with_max_input_chars_per_word(self.max_input_chars_per_word)
                    .into())
            }
            word_type => self.build_word_tokenizer(word_type, vocab.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizers::OutputKind;
    use crate::vocab::SpecialRole;

    #[test]
    fn test_json() {
        let config = TokenizerConfig::from_json_str(
            r#"{
                "tokenizer_type": "subword",
                "lowercase": true,
                "protected_patterns": [{"engine": "basic", "pattern": "\\d+"}],
                "specials": {"unknown": "<unk>"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.tokenizer_type, TokenizerType::Subword);
        assert_eq!(config.base_type, TokenizerType::Rule);
        assert!(config.lowercase);
        assert!(!config.escape);
        assert_eq!(config.continuation_prefix, "##");
        assert_eq!(config.max_input_chars_per_word, 100);
        assert_eq!(
            config.protected_patterns,
            vec![RegexWrapperPattern::Basic(r"\d+".to_string())]
        );
        assert_eq!(
            config.specials.get(&SpecialRole::Unknown).map(String::as_str),
            Some("<unk>")
        );

        let json = config.to_json_string().unwrap();
        assert_eq!(TokenizerConfig::from_json_str(&json).unwrap(), config);

        assert!(TokenizerConfig::from_json_str("{\"tokenizer_type\": \"bpe\"}").is_err());
    }

    #[test]
    fn test_rule_options_from_json() {
        let config = TokenizerConfig::from_json_str(
            r#"{
                "strip_accents": true,
                "escape": true,
                "protected_patterns": [{"engine": "basic", "pattern": "\\d+"}],
                "specials": {"unknown": "<unk>"}
            }"#,
        )
        .unwrap();

        let vocab: Vocabulary<u32> =
            Vocabulary::build(["a"], [(SpecialRole::Unknown, "[UNK]")]).unwrap();
        let options = config.rule_options(Some(&vocab));
        assert_eq!(
            options,
            RuleTokenizerOptions::default()
                .with_strip_accents(true)
                .with_escape(true)
                .with_never_split(["<unk>", "[UNK]"])
                .with_protected_pattern(RegexWrapperPattern::Basic(r"\d+".to_string()))
        );
    }

    #[test]
    fn test_effective_specials() {
        assert_eq!(
            TokenizerConfig::default().effective_specials(),
            bert_special_tokens()
        );
        let mut specials = SpecialTokens::new();
        specials.insert(SpecialRole::Unknown, "<unk>".to_string());
        let config = TokenizerConfig::default().with_specials(specials.clone());
        assert_eq!(config.effective_specials(), specials);
    }

    #[test]
    fn test_build_word_tokenizers() {
        type T = u32;
        let tokenizer = TokenizerConfig::new(TokenizerType::Whitespace)
            .build::<T>(None)
            .unwrap();
        assert_eq!(tokenizer.name(), "whitespace");
        assert!(tokenizer.vocab().is_none());

        let vocab: Arc<Vocabulary<T>> =
            Vocabulary::build(["hello"], bert_special_tokens())
                .unwrap()
                .into();
        let tokenizer = TokenizerConfig::new(TokenizerType::Rule)
            .with_lowercase(true)
            .build(Some(vocab))
            .unwrap();
        assert_eq!(tokenizer.name(), "rule");
        // Special strings of the vocabulary survive lowercasing and splitting.
        assert_eq!(
            tokenizer.tokenize("[CLS] Hello[SEP]"),
            vec!["[CLS]", "hello", "[SEP]"]
        );
        assert_eq!(
            tokenizer.encode("hello", OutputKind::Int).unwrap().into_ids(),
            Some(vec![0])
        );
    }

    #[test]
    fn test_build_subword() {
        type T = u32;
        let config = TokenizerConfig::new(TokenizerType::Subword)
            .with_lowercase(true)
            .with_max_input_chars_per_word(9);

        assert!(config.build::<T>(None).unwrap_err().is_configuration());

        let vocab: Arc<Vocabulary<T>> =
            Vocabulary::build(["un", "##aff", "##able"], bert_special_tokens())
                .unwrap()
                .into();
        let tokenizer = config.build(Some(vocab.clone())).unwrap();
        assert_eq!(
            tokenizer.tokenize("UNAFFABLE [MASK]"),
            vec!["un", "##aff", "##able", "[MASK]"]
        );

        let nested =
            TokenizerConfig::new(TokenizerType::Subword).with_base_type(TokenizerType::Subword);
        assert!(nested.build(Some(vocab)).unwrap_err().is_configuration());
    }
}
