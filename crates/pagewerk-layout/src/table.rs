// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tabular layout: renders records into single-line rows and paginates them
// through the same paginator as text.

use serde::{Deserialize, Serialize};

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::types::PageGeometry;

use crate::paginator::{Page, paginate_units};

/// One pre-rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    text: String,
    header: bool,
}

impl TableRow {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            header: false,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            header: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_header(&self) -> bool {
        self.header
    }
}

/// Cap on the number of rows taken from a tabular input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLimit {
    #[default]
    Unlimited,
    AtMost(usize),
}

impl RowLimit {
    pub fn from_option(limit: Option<usize>) -> Self {
        limit.map_or(Self::Unlimited, Self::AtMost)
    }

    fn allows(self, taken: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::AtMost(max) => taken < max,
        }
    }
}

/// Caller policy for turning records into rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Counted over all rows, the header included.
    pub row_limit: RowLimit,
    /// Rows longer than this many characters are cut.
    pub max_row_chars: Option<usize>,
    /// Treat the first record as a header row.
    pub header: bool,
    pub separator: String,
    /// Vertical space per row; the geometry's line height when unset.
    pub row_height: Option<f32>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            row_limit: RowLimit::Unlimited,
            max_row_chars: None,
            header: true,
            separator: " | ".to_string(),
            row_height: None,
        }
    }
}

impl TableLayout {
    /// Render records into rows, applying the row and character caps.
    ///
    /// Whitespace inside each cell collapses to single spaces so a row always
    /// fits on one line of output.
    pub fn render_rows<R, C>(&self, records: R) -> Vec<TableRow>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let mut rows = Vec::new();
        for record in records {
            if !self.row_limit.allows(rows.len()) {
                break;
            }
            let cells: Vec<String> = record
                .into_iter()
                .map(|cell| normalise_cell(cell.as_ref()))
                .collect();
            let mut text = cells.join(&self.separator);
            if let Some(max) = self.max_row_chars {
                truncate_chars(&mut text, max);
            }
            if rows.is_empty() && self.header {
                rows.push(TableRow::header(text));
            } else {
                rows.push(TableRow::new(text));
            }
        }
        rows
    }

    /// Render and paginate records in one step.
    pub fn paginate<R, C>(&self, records: R, geometry: &PageGeometry) -> Result<Vec<Page>>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        geometry.validate()?;
        let row_height = self.row_height.unwrap_or_else(|| geometry.line_height());
        if row_height >= geometry.usable_height() {
            return Err(PagewerkError::LayoutImpossible(format!(
                "row height {row_height} leaves no room on a page with usable height {}",
                geometry.usable_height()
            )));
        }
        paginate_units(self.render_rows(records), geometry, row_height)
    }
}

fn normalise_cell(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((byte_index, _)) = text.char_indices().nth(max) {
        text.truncate(byte_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewerk_core::types::FontId;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<Vec<&'static str>> {
        vec![
            vec!["name", "city"],
            vec!["Ada", "London"],
            vec!["Grace", "New\nYork"],
            vec!["Linus", "Helsinki"],
        ]
    }

    fn geometry() -> PageGeometry {
        PageGeometry::new(200.0, 100.0, 10.0, FontId::helvetica(), 10.0, 1.0).unwrap()
    }

    #[test]
    fn first_record_becomes_the_header() {
        let rows = TableLayout::default().render_rows(records());
        assert_eq!(rows.len(), 4);
        assert!(rows[0].is_header());
        assert!(!rows[1].is_header());
        assert_eq!(rows[0].text(), "name | city");
        assert_eq!(rows[2].text(), "Grace | New York");
    }

    #[test]
    fn header_flag_can_be_disabled() {
        let layout = TableLayout {
            header: false,
            ..TableLayout::default()
        };
        let rows = layout.render_rows(records());
        assert!(rows.iter().all(|row| !row.is_header()));
    }

    #[test]
    fn row_limit_counts_the_header() {
        let layout = TableLayout {
            row_limit: RowLimit::AtMost(2),
            ..TableLayout::default()
        };
        let rows = layout.render_rows(records());
        let texts: Vec<&str> = rows.iter().map(TableRow::text).collect();
        assert_eq!(texts, vec!["name | city", "Ada | London"]);
    }

    #[test]
    fn row_limit_of_zero_yields_one_empty_page() {
        let layout = TableLayout {
            row_limit: RowLimit::AtMost(0),
            ..TableLayout::default()
        };
        let pages = layout.paginate(records(), &geometry()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn long_rows_are_cut_on_char_boundaries() {
        let layout = TableLayout {
            max_row_chars: Some(6),
            ..TableLayout::default()
        };
        let rows = layout.render_rows(vec![vec!["Zürich", "Genève"]]);
        assert_eq!(rows[0].text(), "Zürich");
    }

    #[test]
    fn rows_paginate_like_lines() {
        let many: Vec<Vec<String>> = (0..20).map(|i| vec![i.to_string()]).collect();
        let pages = TableLayout::default().paginate(many, &geometry()).unwrap();
        // eight rows per page at 10pt on a 100pt page with 10pt margins
        assert_eq!(
            pages.iter().map(Page::len).collect::<Vec<_>>(),
            vec![8, 8, 4]
        );
        assert!(pages[0].units()[0].unit.is_header());
        assert!(!pages[1].units()[0].unit.is_header());
    }

    #[test]
    fn custom_row_height_is_used() {
        let layout = TableLayout {
            row_height: Some(20.0),
            ..TableLayout::default()
        };
        let many: Vec<Vec<&str>> = (0..5).map(|_| vec!["x"]).collect();
        let pages = layout.paginate(many, &geometry()).unwrap();
        // y = 90, 70, 50, 30; 10 is below margin + row height
        assert_eq!(pages[0].len(), 4);
        assert_eq!(pages[1].len(), 1);
    }

    #[test]
    fn row_taller_than_the_usable_area_is_rejected() {
        let layout = TableLayout {
            row_height: Some(80.0),
            ..TableLayout::default()
        };
        let err = layout.paginate(records(), &geometry()).unwrap_err();
        assert!(matches!(err, PagewerkError::LayoutImpossible(_)));
    }

    #[test]
    fn row_limit_deserialises_from_snake_case() {
        let limit: RowLimit = serde_json::from_str(r#"{"at_most":500}"#).unwrap();
        assert_eq!(limit, RowLimit::AtMost(500));
        let limit: RowLimit = serde_json::from_str(r#""unlimited""#).unwrap();
        assert_eq!(limit, RowLimit::Unlimited);
        assert_eq!(RowLimit::from_option(None), RowLimit::Unlimited);
    }
}
