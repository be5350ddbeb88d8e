// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph metrics: horizontal advance widths of text runs.
//
// The layout engine only needs `width(text, font, size)`. The built-in
// provider carries the advance-width tables of the standard PDF base fonts,
// which is what the assembler embeds by name, so measured lines match what
// ends up on the page.

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::types::FontId;

/// Measures the horizontal extent of a text run in page units (points).
///
/// Implementations must be pure and deterministic: identical inputs always
/// give bit-identical widths.
pub trait GlyphMetrics {
    fn width(&self, text: &str, font: &FontId, size: f32) -> Result<f32>;
}

impl<F> GlyphMetrics for F
where
    F: Fn(&str, &FontId, f32) -> Result<f32>,
{
    fn width(&self, text: &str, font: &FontId, size: f32) -> Result<f32> {
        self(text, font, size)
    }
}

// Advance widths in 1/1000 em for the printable ASCII range U+0020..=U+007E.

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

/// Advance widths of one face.
enum Face {
    /// Proportional face with a table for printable ASCII and a fallback for
    /// everything else.
    Table { widths: &'static [u16; 95], fallback: u16 },
    /// Fixed-pitch face.
    Fixed(u16),
}

impl Face {
    fn units(&self, ch: char) -> u32 {
        match self {
            Face::Table { widths, fallback } => {
                let code = ch as u32;
                if (0x20..=0x7e).contains(&code) {
                    widths[(code - 0x20) as usize] as u32
                } else {
                    *fallback as u32
                }
            }
            Face::Fixed(advance) => *advance as u32,
        }
    }
}

/// Metrics for the standard PDF base fonts the assembler writes.
///
/// Recognised identities: `Helvetica`, `Helvetica-Bold`, `Times-Roman`,
/// `Courier` and `Courier-Bold`. Anything else is `MetricsUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl BuiltinMetrics {
    fn face(font: &FontId) -> Result<Face> {
        match font.as_str() {
            FontId::HELVETICA => Ok(Face::Table {
                widths: &HELVETICA,
                fallback: 556,
            }),
            FontId::HELVETICA_BOLD => Ok(Face::Table {
                widths: &HELVETICA_BOLD,
                fallback: 611,
            }),
            FontId::TIMES_ROMAN => Ok(Face::Table {
                widths: &TIMES_ROMAN,
                fallback: 500,
            }),
            FontId::COURIER | FontId::COURIER_BOLD => Ok(Face::Fixed(600)),
            other => Err(PagewerkError::MetricsUnavailable(format!(
                "no metrics for font {other:?}"
            ))),
        }
    }

    /// Whether this provider can measure `font`.
    pub fn supports(font: &FontId) -> bool {
        Self::face(font).is_ok()
    }
}

impl GlyphMetrics for BuiltinMetrics {
    fn width(&self, text: &str, font: &FontId, size: f32) -> Result<f32> {
        let face = Self::face(font)?;
        // Sum in integer font units so the result does not depend on
        // floating-point summation order.
        let units: u32 = text.chars().map(|ch| face.units(ch)).sum();
        Ok(units as f32 * size / 1000.0)
    }
}

/// Every character advances by the same fraction of the font size,
/// regardless of font identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance_em: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn width(&self, text: &str, _font: &FontId, size: f32) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.advance_em * size)
    }
}
