//! # Regex Utilities
//!
//! A number of useful protection patterns (URLs, emoticons, look-around
//! heavy rules) require extended regex machinery provided by the [`fancy_regex`]
//! crate; but naturally, this has performance costs. We'd prefer to avoid using
//! the [`fancy_regex`] crate when possible, falling back on the standard
//! [`regex`] crate when patterns permit this.
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]

mod alt_list;
mod re_wrapper;

pub use alt_list::{exact_match_union_regex_pattern, exact_match_union_regex_wrapper};
pub use re_wrapper::{RegexWrapper, RegexWrapperPattern};
