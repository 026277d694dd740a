//! # Normalization Rules
//!
//! Ordered rewriting passes over an [`AlignedText`].

use crate::normalization::aligned::{AlignedChar, AlignedText};
use crate::normalization::chars::{is_dropped_control, is_punctuation};
use crate::normalization::escape::xml_entity;
use crate::util::regex::RegexWrapper;
use core::iter::once;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A single rewriting pass.
#[derive(Debug, Clone)]
pub enum TextRule {
    /// Drop control characters; map all whitespace to `' '`.
    CleanControl,

    /// Protect every match of the pattern from later rules.
    Protect(RegexWrapper),

    /// Lowercase.
    Lowercase,

    /// NFD decompose, then drop combining marks.
    StripAccents,

    /// Surround punctuation with separators.
    ///
    /// Runs of `.` stay together, and `.`/`,` between two digits are kept.
    SeparatePunctuation,

    /// Replace markup-significant characters with XML entities.
    EscapeXml,
}

impl TextRule {
    /// Apply the rule in place.
    pub fn apply(
        &self,
        text: &mut AlignedText,
    ) {
        match self {
            TextRule::CleanControl => {
                text.retain_chars(|c| !is_dropped_control(c));
                text.flat_map_chars(|c| once(if c.is_whitespace() { ' ' } else { c }));
            }
            TextRule::Protect(re) => {
                let ranges = re.find_ranges(&text.normalized());
                text.protect_byte_ranges(&ranges);
            }
            TextRule::Lowercase => text.flat_map_chars(char::to_lowercase),
            TextRule::StripAccents => {
                text.flat_map_chars(|c| once(c).nfd().filter(|m| !is_combining_mark(*m)))
            }
            TextRule::SeparatePunctuation => separate_punctuation(text),
            TextRule::EscapeXml => escape_xml(text),
        }
    }
}

/// Is `chars[idx]` a decimal/thousands mark inside a number?
fn is_numeric_joiner(
    chars: &[AlignedChar],
    idx: usize,
) -> bool {
    matches!(chars[idx].ch, '.' | ',')
        && idx > 0
        && idx + 1 < chars.len()
        && chars[idx - 1].ch.is_ascii_digit()
        && chars[idx + 1].ch.is_ascii_digit()
}

fn separate_punctuation(text: &mut AlignedText) {
    let chars = text.chars();
    let mut out = AlignedText::with_original_len(text.original_len(), chars.len() * 3 / 2);

    let mut i = 0;
    while i < chars.len() {
        let ac = chars[i];

        let isolated = if ac.protected {
            chars[i..].iter().take_while(|c| c.protected).count()
        } else if is_punctuation(ac.ch) && !is_numeric_joiner(chars, i) {
            if ac.ch == '.' {
                chars[i..]
                    .iter()
                    .take_while(|c| c.ch == '.' && !c.protected)
                    .count()
            } else {
                1
            }
        } else {
            0
        };

        if isolated == 0 {
            out.push(ac.ch, ac.span, ac.protected);
            i += 1;
            continue;
        }

        out.push_separator();
        for c in &chars[i..i + isolated] {
            out.push(c.ch, c.span, c.protected);
        }
        out.push_separator();
        i += isolated;
    }

    *text = out;
}

fn escape_xml(text: &mut AlignedText) {
    let chars = text.chars();
    let mut out = AlignedText::with_original_len(text.original_len(), chars.len());
    for ac in chars {
        match xml_entity(ac.ch) {
            Some(entity) if !ac.protected => {
                entity.chars().for_each(|ch| out.push(ch, ac.span, false));
            }
            _ => out.push(ac.ch, ac.span, ac.protected),
        }
    }
    *text = out;
}

/// An ordered list of [`TextRule`]s.
#[derive(Debug, Clone, Default)]
pub struct RulePipeline {
    rules: Vec<TextRule>,
}

impl From<Vec<TextRule>> for RulePipeline {
    fn from(rules: Vec<TextRule>) -> Self {
        Self::new(rules)
    }
}

impl RulePipeline {
    /// Create a pipeline from rules, applied in order.
    pub fn new(rules: Vec<TextRule>) -> Self {
        Self { rules }
    }

    /// Append a rule.
    pub fn with_rule(
        self,
        rule: TextRule,
    ) -> Self {
        let mut rules = self.rules;
        rules.push(rule);
        Self { rules }
    }

    /// The rules, in application order.
    pub fn rules(&self) -> &[TextRule] {
        &self.rules
    }

    /// Run every rule over `text`.
    pub fn apply(
        &self,
        text: &str,
    ) -> AlignedText {
        let mut aligned = AlignedText::new(text);
        for rule in &self.rules {
            rule.apply(&mut aligned);
        }
        aligned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::Offset;
    use crate::util::regex::RegexWrapperPattern;

    fn words(
        pipeline: &RulePipeline,
        text: &str,
    ) -> Vec<(String, Offset)> {
        pipeline.apply(text).split_whitespace()
    }

    fn w(
        s: &str,
        start: usize,
        end: usize,
    ) -> (String, Offset) {
        (s.to_string(), Offset::new(start, end))
    }

    #[test]
    fn test_separate_punctuation() {
        let pipeline = RulePipeline::new(vec![TextRule::SeparatePunctuation]);
        assert_eq!(
            words(&pipeline, "Hello, world... (3.14)!"),
            vec![
                w("Hello", 0, 5),
                w(",", 5, 6),
                w("world", 7, 12),
                w("...", 12, 15),
                w("(", 16, 17),
                w("3.14", 17, 21),
                w(")", 21, 22),
                w("!", 22, 23),
            ]
        );
    }

    #[test]
    fn test_lowercase_and_accents() {
        let pipeline = RulePipeline::new(vec![TextRule::Lowercase, TextRule::StripAccents]);
        assert_eq!(
            words(&pipeline, "Café NAÏVE"),
            vec![w("cafe", 0, 4), w("naive", 5, 10)]
        );
    }

    #[test]
    fn test_escape_keeps_original_spans() {
        let pipeline = RulePipeline::new(vec![TextRule::SeparatePunctuation, TextRule::EscapeXml]);
        assert_eq!(
            words(&pipeline, r#"a "b" a"#),
            vec![
                w("a", 0, 1),
                w("&quot;", 2, 3),
                w("b", 3, 4),
                w("&quot;", 4, 5),
                w("a", 6, 7),
            ]
        );
    }

    #[test]
    fn test_clean_control() {
        let pipeline = RulePipeline::new(vec![TextRule::CleanControl]);
        assert_eq!(
            words(&pipeline, "a\u{0}b\u{A0}c"),
            vec![w("ab", 0, 3), w("c", 4, 5)]
        );
    }

    #[test]
    fn test_protect() {
        let url = RegexWrapperPattern::from(r"https?://\S+").compile().unwrap();
        let pipeline = RulePipeline::default()
            .with_rule(TextRule::Protect(url))
            .with_rule(TextRule::Lowercase)
            .with_rule(TextRule::SeparatePunctuation)
            .with_rule(TextRule::EscapeXml);
        assert_eq!(pipeline.rules().len(), 4);

        assert_eq!(
            words(&pipeline, "See http://X.io/a?b=1&c, OK"),
            vec![
                w("see", 0, 3),
                w("http://X.io/a?b=1&c,", 4, 24),
                w("ok", 25, 27),
            ]
        );
    }
}
