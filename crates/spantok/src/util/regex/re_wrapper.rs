//! # Regex Wrapper

use crate::errors::{TokenizerError, TokenizerResult};
use core::ops::Range;

/// A labeled regex pattern, prior to compilation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "engine", content = "pattern", rename_all = "snake_case")]
pub enum RegexWrapperPattern {
    /// A pattern written for [`regex`].
    Basic(String),

    /// A pattern written for [`fancy_regex`].
    Fancy(String),

    /// Unknown target; try [`regex`], then fall-up to [`fancy_regex`].
    Adaptive(String),
}

impl From<&str> for RegexWrapperPattern {
    fn from(pattern: &str) -> Self {
        Self::Adaptive(pattern.to_string())
    }
}

impl From<String> for RegexWrapperPattern {
    fn from(pattern: String) -> Self {
        Self::Adaptive(pattern)
    }
}

impl RegexWrapperPattern {
    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(p) | Self::Fancy(p) | Self::Adaptive(p) => p,
        }
    }

    /// Compile the pattern.
    ///
    /// # Errors
    /// [`TokenizerError::Regex`] if no applicable engine accepts the pattern.
    pub fn compile(&self) -> TokenizerResult<RegexWrapper> {
        match self {
            Self::Basic(p) => regex::Regex::new(p)
                .map(RegexWrapper::Basic)
                .map_err(|e| TokenizerError::Regex(e.to_string())),
            Self::Fancy(p) => fancy_regex::Regex::new(p)
                .map(RegexWrapper::Fancy)
                .map_err(|e| TokenizerError::Regex(e.to_string())),
            Self::Adaptive(p) => match regex::Regex::new(p) {
                Ok(re) => Ok(RegexWrapper::Basic(re)),
                Err(_) => {
                    log::debug!("pattern {p:?} needs fancy_regex");
                    Self::Fancy(p.clone()).compile()
                }
            },
        }
    }
}

/// A compiled regex from either engine.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// A [`regex`] regex.
    Basic(regex::Regex),

    /// A [`fancy_regex`] regex.
    Fancy(fancy_regex::Regex),
}

impl RegexWrapper {
    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(re) => re.as_str(),
            Self::Fancy(re) => re.as_str(),
        }
    }

    /// Byte ranges of all non-overlapping, non-empty matches in `text`.
    ///
    /// [`fancy_regex`] runtime failures (backtrack limits) end the scan early.
    pub fn find_ranges(
        &self,
        text: &str,
    ) -> Vec<Range<usize>> {
        match self {
            Self::Basic(re) => re
                .find_iter(text)
                .map(|m| m.range())
                .filter(|r| !r.is_empty())
                .collect(),
            Self::Fancy(re) => re
                .find_iter(text)
                .map_while(|m| m.ok())
                .map(|m| m.range())
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }
}
