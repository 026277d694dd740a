//! # Character Classes

/// Punctuation for splitting purposes.
///
/// All non-alphanumeric printable ASCII counts as punctuation (so `$`, `+`,
/// `^`, `|` and friends split off), plus the common Unicode punctuation blocks.
pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    matches!(
        c as u32,
        0x00A1 | 0x00A7 | 0x00AB | 0x00B6 | 0x00B7 | 0x00BB | 0x00BF
            | 0x2010..=0x2027
            | 0x2030..=0x205E
            | 0x3001..=0x3003
            | 0x3008..=0x3011
            | 0x3014..=0x301F
            | 0xFE50..=0xFE6B
            | 0xFF01..=0xFF0F
            | 0xFF1A..=0xFF20
            | 0xFF3B..=0xFF40
            | 0xFF5B..=0xFF65
    )
}

/// Control characters to drop; whitespace controls are kept.
pub fn is_dropped_control(c: char) -> bool {
    c == '\u{FFFD}' || (c.is_control() && !c.is_whitespace())
}

/// Punctuation which attaches to the preceding token when detokenizing.
pub fn is_closing_punctuation(token: &str) -> bool {
    matches!(
        token,
        "." | "," | "!" | "?" | ";" | ":" | ")" | "]" | "}" | "%" | "…" | "»" | "”" | "’"
    ) || (token.len() > 1 && token.chars().all(|c| c == '.'))
}

/// Punctuation which attaches to the following token when detokenizing.
pub fn is_opening_punctuation(token: &str) -> bool {
    matches!(
        token,
        "(" | "[" | "{" | "#" | "@" | "$" | "¿" | "¡" | "«" | "“" | "‘"
    )
}
