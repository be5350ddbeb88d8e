// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line breaker: greedy word wrap against measured glyph widths.

use serde::Serialize;

use pagewerk_core::error::Result;
use pagewerk_core::types::PageGeometry;

use crate::metrics::GlyphMetrics;

/// One wrapped row of text: words joined by single spaces, with the width it
/// measured at when it was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    text: String,
    width: f32,
}

impl Line {
    pub(crate) fn new(text: String, width: f32) -> Self {
        Self { text, width }
    }

    /// An empty spacer line, used between paragraphs.
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            width: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ').filter(|word| !word.is_empty())
    }
}

/// Wrap a paragraph into lines no wider than the geometry's usable width.
///
/// Words are packed greedily; a candidate whose width equals the usable width
/// still fits. A word that is wider than the usable width on its own becomes
/// a line by itself and overflows rather than being dropped. Runs of
/// whitespace collapse to single spaces. An empty or whitespace-only
/// paragraph yields no lines.
pub fn break_paragraph<M>(text: &str, geometry: &PageGeometry, metrics: &M) -> Result<Vec<Line>>
where
    M: GlyphMetrics + ?Sized,
{
    geometry.validate()?;

    let max_width = geometry.usable_width();
    let font = &geometry.font_id;
    let size = geometry.font_size;

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let candidate_width = metrics.width(&candidate, font, size)?;

        if candidate_width <= max_width {
            current = candidate;
            current_width = candidate_width;
        } else if current.is_empty() {
            // oversized single word
            lines.push(Line::new(candidate, candidate_width));
        } else {
            lines.push(Line::new(std::mem::take(&mut current), current_width));
            current_width = metrics.width(word, font, size)?;
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(Line::new(current, current_width));
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BuiltinMetrics, MonospaceMetrics};
    use pagewerk_core::error::PagewerkError;
    use pagewerk_core::types::FontId;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Every word is 40 wide and every space 10 wide.
    fn word_metrics(text: &str, _: &FontId, _: f32) -> Result<f32> {
        let words = text.split(' ').filter(|w| !w.is_empty()).count() as f32;
        let spaces = text.matches(' ').count() as f32;
        Ok(words * 40.0 + spaces * 10.0)
    }

    /// A geometry whose usable width is exactly `usable_width`.
    fn geometry(usable_width: f32) -> PageGeometry {
        PageGeometry::new(
            usable_width + 20.0,
            400.0,
            10.0,
            FontId::helvetica(),
            10.0,
            1.2,
        )
        .unwrap()
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn packs_words_greedily() {
        let lines = break_paragraph("The quick brown fox", &geometry(100.0), &word_metrics).unwrap();
        // "The quick" = 90, "The quick brown" = 140
        assert_eq!(texts(&lines), vec!["The quick", "brown fox"]);
        assert_eq!(lines[0].width(), 90.0);
        assert_eq!(lines[1].width(), 90.0);
    }

    #[test]
    fn width_equal_to_usable_width_is_accepted() {
        let lines = break_paragraph("The quick brown fox", &geometry(140.0), &word_metrics).unwrap();
        assert_eq!(texts(&lines), vec!["The quick brown", "fox"]);
        assert_eq!(lines[0].width(), 140.0);
    }

    #[test]
    fn whole_paragraph_fits_on_one_line() {
        let lines = break_paragraph("The quick brown fox", &geometry(200.0), &word_metrics).unwrap();
        assert_eq!(texts(&lines), vec!["The quick brown fox"]);
        assert_eq!(lines[0].width(), 190.0);
    }

    #[test]
    fn empty_paragraph_yields_no_lines() {
        let lines = break_paragraph("", &geometry(200.0), &word_metrics).unwrap();
        assert!(lines.is_empty());

        let lines = break_paragraph(" \t \n ", &geometry(200.0), &word_metrics).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let metrics = MonospaceMetrics { advance_em: 1.0 };
        // font size 10 → 10pt per char, usable width 50 → five chars
        let lines = break_paragraph("ab supercalifragilistic cd", &geometry(50.0), &metrics).unwrap();
        assert_eq!(texts(&lines), vec!["ab", "supercalifragilistic", "cd"]);
        assert!(lines[1].width() > 50.0);
    }

    #[test]
    fn oversized_first_word_is_kept() {
        let metrics = MonospaceMetrics { advance_em: 1.0 };
        let lines = break_paragraph("abcdefgh ij", &geometry(50.0), &metrics).unwrap();
        assert_eq!(texts(&lines), vec!["abcdefgh", "ij"]);
    }

    #[test]
    fn consecutive_whitespace_collapses() {
        let lines = break_paragraph("a   b\t\tc\nd", &geometry(200.0), &word_metrics).unwrap();
        assert_eq!(texts(&lines), vec!["a b c d"]);
    }

    #[test]
    fn metrics_failure_aborts_layout() {
        let mut geometry = geometry(200.0);
        geometry.font_id = FontId::new("Wingdings");
        let err = break_paragraph("hello", &geometry, &BuiltinMetrics).unwrap_err();
        assert!(matches!(err, PagewerkError::MetricsUnavailable(_)));
    }

    #[test]
    fn impossible_geometry_fails_before_measuring() {
        let mut geometry = geometry(200.0);
        geometry.margin = geometry.width;
        let err = break_paragraph("hello", &geometry, &word_metrics).unwrap_err();
        assert!(matches!(err, PagewerkError::LayoutImpossible(_)));
    }

    #[test]
    fn output_is_deterministic() {
        let text = "Pack my box with five dozen liquor jugs. How vexingly quick daft zebras jump!";
        let geometry = geometry(120.0);
        let first = break_paragraph(text, &geometry, &BuiltinMetrics).unwrap();
        let second = break_paragraph(text, &geometry, &BuiltinMetrics).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn lines_fit_or_hold_a_single_word(
            words in prop::collection::vec("[a-zA-Z]{1,18}", 0..60),
            usable in 30.0f32..300.0,
        ) {
            let text = words.join(" ");
            let geometry = geometry(usable);
            let lines = break_paragraph(&text, &geometry, &BuiltinMetrics).unwrap();
            for line in &lines {
                let measured = BuiltinMetrics
                    .width(line.text(), &geometry.font_id, geometry.font_size)
                    .unwrap();
                prop_assert_eq!(measured, line.width());
                prop_assert!(measured <= geometry.usable_width() || line.words().count() == 1);
            }
        }

        #[test]
        fn words_are_preserved_in_order(
            text in "[a-z ]{0,200}",
            usable in 20.0f32..200.0,
        ) {
            let lines = break_paragraph(&text, &geometry(usable), &BuiltinMetrics).unwrap();
            let rebuilt: Vec<&str> = lines.iter().flat_map(Line::words).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            prop_assert_eq!(rebuilt, original);
        }
    }
}
