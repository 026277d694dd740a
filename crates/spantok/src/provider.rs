//! # Tokenizer Providers
//!
//! Resolve a model identifier to a ready tokenizer and its vocabulary.
//!
//! There is no global registry; callers hold provider instances.

use crate::config::TokenizerConfig;
use crate::tokenizers::TokenizerKind;
use crate::types::TokenType;
use crate::vocab::Vocabulary;
use crate::vocab::io::load_vocab_from_txt_path;
use ahash::AHashMap;
use alloc::sync::Arc;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Vocabulary file name inside a model directory.
pub const VOCAB_FILE_NAME: &str = "vocab.txt";

/// Config file name inside a model directory.
pub const CONFIG_FILE_NAME: &str = "tokenizer.json";

/// A tokenizer together with its vocabulary.
#[derive(Debug, Clone)]
pub struct TokenizerBundle<T: TokenType> {
    /// The tokenizer, bound to `vocab`.
    pub tokenizer: TokenizerKind<T>,

    /// The vocabulary.
    pub vocab: Arc<Vocabulary<T>>,
}

/// Maps model identifiers to tokenizer bundles.
pub trait TokenizerProvider<T: TokenType> {
    /// Load the bundle for `model_id`.
    fn load(
        &self,
        model_id: &str,
    ) -> anyhow::Result<TokenizerBundle<T>>;
}

/// Provider over bundles registered up front.
#[derive(Debug, Clone)]
pub struct InMemoryProvider<T: TokenType> {
    bundles: AHashMap<String, TokenizerBundle<T>>,
}

impl<T: TokenType> Default for InMemoryProvider<T> {
    fn default() -> Self {
        Self {
            bundles: AHashMap::new(),
        }
    }
}

impl<T: TokenType> InMemoryProvider<T> {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle; replaces any earlier bundle for `model_id`.
    pub fn register<S: AsRef<str>>(
        &mut self,
        model_id: S,
        bundle: TokenizerBundle<T>,
    ) {
        self.bundles.insert(model_id.as_ref().to_string(), bundle);
    }

    /// Builder form of [`Self::register`].
    pub fn with_bundle<S: AsRef<str>>(
        self,
        model_id: S,
        bundle: TokenizerBundle<T>,
    ) -> Self {
        let mut provider = self;
        provider.register(model_id, bundle);
        provider
    }

    /// The registered model ids, sorted.
    pub fn model_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<T: TokenType> TokenizerProvider<T> for InMemoryProvider<T> {
    fn load(
        &self,
        model_id: &str,
    ) -> anyhow::Result<TokenizerBundle<T>> {
        self.bundles
            .get(model_id)
            .cloned()
            .with_context(|| format!("unknown model {model_id:?}"))
    }
}

/// Provider over ``<root>/<model_id>/{vocab.txt, tokenizer.json}``.
///
/// ``tokenizer.json`` is optional; without it the default
/// [`TokenizerConfig`] is used.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory of `model_id`.
    pub fn model_dir(
        &self,
        model_id: &str,
    ) -> anyhow::Result<PathBuf> {
        let valid = !model_id.is_empty()
            && model_id != "."
            && !model_id.contains("..")
            && !model_id.contains(['/', '\\']);
        anyhow::ensure!(valid, "invalid model id {model_id:?}");
        Ok(self.root.join(model_id))
    }

    /// Load the config of `model_id`, if it has one.
    pub fn load_config(
        &self,
        model_id: &str,
    ) -> anyhow::Result<TokenizerConfig> {
        let path = self.model_dir(model_id)?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("no {CONFIG_FILE_NAME} for {model_id:?}; using defaults");
            return Ok(TokenizerConfig::default());
        }

        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = TokenizerConfig::from_json_str(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

impl<T: TokenType> TokenizerProvider<T> for DirectoryProvider {
    fn load(
        &self,
        model_id: &str,
    ) -> anyhow::Result<TokenizerBundle<T>> {
        let dir = self.model_dir(model_id)?;
        anyhow::ensure!(
            dir.is_dir(),
            "unknown model {model_id:?}: no directory {}",
            dir.display()
        );

        let config = self.load_config(model_id)?;
        let vocab: Arc<Vocabulary<T>> =
            load_vocab_from_txt_path(dir.join(VOCAB_FILE_NAME), &config.effective_specials())?
                .into();
        let tokenizer = config
            .build(Some(vocab.clone()))
            .with_context(|| format!("building tokenizer for {model_id:?}"))?;

        log::info!(
            "loaded {} tokenizer for {model_id:?} ({} tokens)",
            tokenizer.name(),
            vocab.size()
        );
        Ok(TokenizerBundle { tokenizer, vocab })
    }
}
