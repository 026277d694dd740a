//! # Special Token Roles

use crate::errors::TokenizerError;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Structural role of a reserved vocabulary entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRole {
    /// Stand-in for out-of-vocabulary input.
    Unknown,

    /// Sequence padding.
    Padding,

    /// Sequence-level classification marker.
    Classification,

    /// Segment separator.
    Separator,

    /// Masked-position marker.
    Mask,
}

/// Role => token string map.
pub type SpecialTokens = BTreeMap<SpecialRole, String>;

impl SpecialRole {
    /// All roles, in canonical order.
    pub const ALL: [SpecialRole; 5] = [
        SpecialRole::Unknown,
        SpecialRole::Padding,
        SpecialRole::Classification,
        SpecialRole::Separator,
        SpecialRole::Mask,
    ];

    /// The config/serde name of the role.
    pub fn name(&self) -> &'static str {
        match self {
            SpecialRole::Unknown => "unknown",
            SpecialRole::Padding => "padding",
            SpecialRole::Classification => "classification",
            SpecialRole::Separator => "separator",
            SpecialRole::Mask => "mask",
        }
    }

    /// The conventional BERT-style token for the role.
    pub fn bert_token(&self) -> &'static str {
        match self {
            SpecialRole::Unknown => "[UNK]",
            SpecialRole::Padding => "[PAD]",
            SpecialRole::Classification => "[CLS]",
            SpecialRole::Separator => "[SEP]",
            SpecialRole::Mask => "[MASK]",
        }
    }
}

impl Display for SpecialRole {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpecialRole {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecialRole::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| TokenizerError::configuration(format!("unknown special role: {s:?}")))
    }
}

/// The full BERT-style special token set.
pub fn bert_special_tokens() -> SpecialTokens {
    SpecialRole::ALL
        .into_iter()
        .map(|role| (role, role.bert_token().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        for role in SpecialRole::ALL {
            assert_eq!(role.name().parse::<SpecialRole>().unwrap(), role);
            assert_eq!(role.to_string(), role.name());
        }
        assert!(
            "cls".parse::<SpecialRole>()
                .unwrap_err()
                .is_configuration()
        );
    }

    #[test]
    fn test_bert_special_tokens() {
        let specials = bert_special_tokens();
        assert_eq!(specials.len(), 5);
        assert_eq!(specials[&SpecialRole::Unknown], "[UNK]");
        assert_eq!(specials[&SpecialRole::Classification], "[CLS]");
    }

    #[test]
    fn test_serde_names() {
        let specials = bert_special_tokens();
        let json = serde_json::to_string(&specials).unwrap();
        assert!(json.contains("\"separator\":\"[SEP]\""));

        let parsed: SpecialTokens = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, specials);
    }
}
