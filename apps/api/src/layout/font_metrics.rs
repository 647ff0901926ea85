//! Static font-metric tables for the editor's rendering fonts.
//!
//! Character widths are in em units (relative to font size). This is an
//! approximation of real glyph shaping, good enough to place a caret within a
//! fraction of a glyph. Tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Humanist sans-serif, the editor default.
    #[default]
    Inter,
    /// Old-style serif.
    EbGaramond,
    /// Fixed-pitch, every glyph 0.6em.
    Monospace,
}

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters and control characters.
    pub average_char_width: f32,
    /// Width of `\t`.
    pub tab_width: f32,
}

impl FontMetricTable {
    /// Width of a single char in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '\t' {
            self.tab_width
        } else {
            self.average_char_width
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static INTER_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    tab_width: 1.0,
};

static EB_GARAMOND_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.21, 0.26, 0.32, 0.48, 0.48, 0.76, 0.57, 0.19, 0.28, 0.28, 0.33, 0.50, 0.24, 0.28, 0.24, 0.26,
        // 0     1     2     3     4     5     6     7     8     9
        0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48,
        // :     ;     <     =     >     ?     @
        0.24, 0.24, 0.50, 0.50, 0.50, 0.43, 0.87,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.57, 0.52, 0.52, 0.57, 0.48, 0.43, 0.57, 0.57, 0.21, 0.33, 0.52, 0.45, 0.66,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.57, 0.61, 0.48, 0.61, 0.52, 0.43, 0.48, 0.57, 0.57, 0.76, 0.52, 0.52, 0.48,
        // [     \     ]     ^     _     `
        0.24, 0.26, 0.24, 0.40, 0.48, 0.29,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.48, 0.48, 0.43, 0.48, 0.48, 0.26, 0.48, 0.48, 0.19, 0.19, 0.45, 0.19, 0.71,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.48, 0.48, 0.48, 0.48, 0.28, 0.37, 0.33, 0.48, 0.43, 0.61, 0.43, 0.43, 0.37,
        // {     |     }     ~
        0.28, 0.22, 0.28, 0.50,
    ],
    average_char_width: 0.44,
    tab_width: 0.84,
};

static MONOSPACE_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.60; 95],
    average_char_width: 0.60,
    tab_width: 2.40,
};

pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::EbGaramond => &EB_GARAMOND_TABLE,
        FontFamily::Monospace => &MONOSPACE_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(font: &FontFamily, s: &str) -> f32 {
        let metrics = get_metrics(font);
        s.chars().map(|c| metrics.char_width(c)).sum()
    }

    #[test]
    fn test_measure_empty_returns_zero() {
        assert_eq!(measure(&FontFamily::Inter, ""), 0.0);
    }

    #[test]
    fn test_measure_ascii_characters() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = measure(&FontFamily::Inter, "Rust");
        assert!((width - 2.00).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_non_ascii_and_tab_fall_back() {
        let metrics = get_metrics(&FontFamily::Inter);
        assert!((metrics.char_width('é') - metrics.average_char_width).abs() < 1e-4);
        assert!((metrics.char_width('\t') - metrics.tab_width).abs() < 1e-4);
    }

    #[test]
    fn test_monospace_is_uniform() {
        assert_eq!(
            measure(&FontFamily::Monospace, "iiii"),
            measure(&FontFamily::Monospace, "WWWW")
        );
    }

    #[test]
    fn test_serif_narrower_than_sans() {
        let text = "Dear Hiring Manager";
        assert!(
            measure(&FontFamily::EbGaramond, text) < measure(&FontFamily::Inter, text)
        );
    }

    #[test]
    fn test_every_width_is_positive() {
        for font in [FontFamily::Inter, FontFamily::EbGaramond, FontFamily::Monospace] {
            let metrics = get_metrics(&font);
            assert!((32u8..=126).all(|b| metrics.char_width(b as char) > 0.0));
        }
    }
}
