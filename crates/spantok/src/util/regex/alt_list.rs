//! # Exact Match Union Patterns

use crate::errors::TokenizerResult;
use crate::util::regex::re_wrapper::{RegexWrapper, RegexWrapperPattern};

/// Create a union pattern of exact matches.
///
/// Longer alternatives are tried first, so that a special token never
/// loses to one of its own prefixes.
///
/// This will always be a [`RegexWrapperPattern::Basic`] variant.
pub fn exact_match_union_regex_pattern<S: AsRef<str>>(alts: &[S]) -> RegexWrapperPattern {
    let mut alts: Vec<&str> = alts.iter().map(|s| s.as_ref()).collect();
    alts.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    alts.dedup();

    let parts = alts
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>();
    RegexWrapperPattern::Basic(format!("({})", parts.join("|")))
}

/// Create a union pattern of exact matches, compiled into a [`RegexWrapper`].
///
/// See: [`exact_match_union_regex_pattern`]
pub fn exact_match_union_regex_wrapper<S: AsRef<str>>(alts: &[S]) -> TokenizerResult<RegexWrapper> {
    exact_match_union_regex_pattern(alts).compile()
}
