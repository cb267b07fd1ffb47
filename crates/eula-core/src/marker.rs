//! List marker classification and rendering
//!
//! Enumerated sub-clauses in legal prose carry a literal marker such as
//! `(a)`, `(iv)` or `(3)`. Markers are classified into a scheme once per
//! list, and the printed marker is regenerated from the scheme and the
//! item's position so numbering stays consistent even when the source
//! text skips or repeats a label.

use serde::{Deserialize, Serialize};

/// Numbering scheme of an enumerated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListScheme {
    /// `(a)`, `(b)`, ... Lists past 26 items are unsupported.
    Alpha,
    /// Lower-case roman numerals: `(i)`, `(ii)`, ...
    Roman,
    /// `1.`, `2.`, ...
    Decimal,
}

/// Canonical lower-case roman tokens for values 1..=10.
const ROMAN_TOKENS: [&str; 10] = ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

/// Classify a literal marker captured from source text.
///
/// Roman wins over alpha for the ambiguous single letters (`i`, `v`,
/// `x`); run grouping in the extractor resolves those against the
/// surrounding items.
pub fn classify_marker(marker: &str) -> ListScheme {
    let m = marker.to_lowercase();
    if ROMAN_TOKENS.contains(&m.as_str()) {
        ListScheme::Roman
    } else if !m.is_empty() && m.chars().all(|c| c.is_ascii_lowercase()) {
        ListScheme::Alpha
    } else {
        ListScheme::Decimal
    }
}

/// Render the canonical marker for a zero-based item index.
pub fn render_marker(scheme: ListScheme, index: usize) -> String {
    match scheme {
        ListScheme::Alpha => {
            let letter = (b'a' + (index % 26) as u8) as char;
            format!("({})", letter)
        }
        ListScheme::Roman => format!("({})", to_roman(index + 1)),
        ListScheme::Decimal => format!("{}.", index + 1),
    }
}

/// Lower-case roman numeral via standard subtractive notation.
fn to_roman(mut value: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for &(step, token) in TABLE.iter() {
        while value >= step {
            out.push_str(token);
            value -= step;
        }
    }
    out
}

/// Whether `next` is the letter immediately after `prev` (`h` -> `i`).
///
/// Used by the extractor to keep an alpha run alive when a single letter
/// would otherwise classify as roman.
pub fn is_alpha_successor(prev: &str, next: &str) -> bool {
    let (p, n) = (prev.as_bytes(), next.as_bytes());
    p.len() == 1
        && n.len() == 1
        && p[0].is_ascii_lowercase()
        && n[0].is_ascii_lowercase()
        && n[0] == p[0] + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_markers_cover_alphabet() {
        let rendered: Vec<String> = (0..26).map(|i| render_marker(ListScheme::Alpha, i)).collect();
        assert_eq!(rendered[0], "(a)");
        assert_eq!(rendered[7], "(h)");
        assert_eq!(rendered[25], "(z)");
    }

    #[test]
    fn test_roman_markers_first_ten() {
        let expected = ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];
        for (i, token) in expected.iter().enumerate() {
            assert_eq!(render_marker(ListScheme::Roman, i), format!("({})", token));
        }
    }

    #[test]
    fn test_roman_subtractive_pairs() {
        assert_eq!(to_roman(4), "iv");
        assert_eq!(to_roman(9), "ix");
        assert_eq!(to_roman(14), "xiv");
        assert_eq!(to_roman(40), "xl");
        assert_eq!(to_roman(90), "xc");
        assert_eq!(to_roman(400), "cd");
        assert_eq!(to_roman(900), "cm");
        assert_eq!(to_roman(1987), "mcmlxxxvii");
    }

    #[test]
    fn test_decimal_markers_use_trailing_period() {
        assert_eq!(render_marker(ListScheme::Decimal, 0), "1.");
        assert_eq!(render_marker(ListScheme::Decimal, 9), "10.");
    }

    #[test]
    fn test_classify_roman_before_alpha() {
        assert_eq!(classify_marker("i"), ListScheme::Roman);
        assert_eq!(classify_marker("iv"), ListScheme::Roman);
        assert_eq!(classify_marker("x"), ListScheme::Roman);
        assert_eq!(classify_marker("a"), ListScheme::Alpha);
        assert_eq!(classify_marker("j"), ListScheme::Alpha);
        assert_eq!(classify_marker("aa"), ListScheme::Alpha);
    }

    #[test]
    fn test_classify_digits_as_decimal() {
        assert_eq!(classify_marker("1"), ListScheme::Decimal);
        assert_eq!(classify_marker("10"), ListScheme::Decimal);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify_marker("A"), ListScheme::Alpha);
        assert_eq!(classify_marker("IV"), ListScheme::Roman);
    }

    #[test]
    fn test_alpha_successor() {
        assert!(is_alpha_successor("h", "i"));
        assert!(is_alpha_successor("u", "v"));
        assert!(!is_alpha_successor("a", "c"));
        assert!(!is_alpha_successor("viii", "ix"));
    }
}
