//! Font metrics for the base-14 Helvetica faces
//!
//! Layout needs to know how wide a string renders before anything is
//! drawn. The standard AFM advance widths (1000 units per em) for the
//! printable ASCII range cover legal prose; anything outside the table
//! falls back to a typical glyph width rather than failing.

/// The two faces the document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Regular,
    Bold,
}

impl FontKind {
    pub fn metrics(self) -> &'static FontMetrics {
        match self {
            FontKind::Regular => &HELVETICA,
            FontKind::Bold => &HELVETICA_BOLD,
        }
    }

    /// PDF resource name of the font.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontKind::Regular => "F1",
            FontKind::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontKind::Regular => "Helvetica",
            FontKind::Bold => "Helvetica-Bold",
        }
    }
}

/// Advance widths for ASCII 32..=126, in 1/1000 em.
pub struct FontMetrics {
    widths: [u16; 95],
    fallback: u16,
}

impl FontMetrics {
    /// Width of `text` rendered at `size` points. The empty string (and
    /// any other zero-glyph input) measures zero.
    pub fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u64 = text.chars().map(|c| self.char_units(c) as u64).sum();
        units as f64 * size / 1000.0
    }

    fn char_units(&self, c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            self.widths[(code - 32) as usize]
        } else {
            self.fallback
        }
    }
}

/// Helvetica AFM widths.
pub static HELVETICA: FontMetrics = FontMetrics {
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
        278, 278, 584, 584, 584, 556, 1015, // :..@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611, // A..Z
        278, 278, 278, 469, 556, 333, // [..`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
        500, 278, 556, 500, 722, 500, 500, 500, // a..z
        334, 260, 334, 584, // {..~
    ],
    fallback: 556,
};

/// Helvetica-Bold AFM widths.
pub static HELVETICA_BOLD: FontMetrics = FontMetrics {
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
        333, 333, 584, 584, 584, 611, 975, // :..@
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611, // A..Z
        333, 278, 333, 584, 556, 333, // [..`
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389,
        556, 333, 611, 556, 778, 556, 556, 500, // a..z
        389, 280, 389, 584, // {..~
    ],
    fallback: 556,
};
