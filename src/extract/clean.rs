//! Text normalization applied to every extracted field
//!
//! The site decorates player names with footnote daggers and pads cells
//! with non-breaking spaces and directional marks; all of that is stripped
//! before a value is compared, stored, or checked for emptiness.

/// Normalizes raw cell text: removes footnote and directional marks,
/// converts non-breaking spaces to plain spaces, and trims.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{00a0}' => Some(' '),
            '\u{2020}' | '\u{2021}' | '\u{200e}' | '\u{200f}' => None,
            other => Some(other),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses a cleaned cell as an integer stat; placeholder cells ("-", "")
/// become None rather than dropping the row.
pub fn parse_u32(text: &str) -> Option<u32> {
    clean_text(text).parse().ok()
}

/// Parses a cleaned cell as a floating-point stat (strike rate, economy, overs).
pub fn parse_f64(text: &str) -> Option<f64> {
    clean_text(text).parse().ok()
}
