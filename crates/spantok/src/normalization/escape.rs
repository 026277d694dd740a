//! # XML Entity Escaping

use std::borrow::Cow;

/// ``(char, entity)`` pairs, as escaped by Moses.
pub const XML_ENTITIES: [(char, &str); 8] = [
    ('&', "&amp;"),
    ('|', "&#124;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('\'', "&apos;"),
    ('"', "&quot;"),
    ('[', "&#91;"),
    (']', "&#93;"),
];

/// The entity for `c`, if it is escaped.
pub fn xml_entity(c: char) -> Option<&'static str> {
    XML_ENTITIES
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, entity)| *entity)
}

/// Undo [`xml_entity`] escaping.
///
/// Unrecognized ``&...;`` sequences are left as-is.
pub fn unescape_xml(token: &str) -> Cow<'_, str> {
    if !token.contains('&') {
        return Cow::Borrowed(token);
    }

    let mut out = String::with_capacity(token.len());
    let mut rest = token;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match XML_ENTITIES
            .iter()
            .find(|(_, entity)| rest.starts_with(entity))
        {
            Some((ch, entity)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
