// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paginator: distributes lines or table rows over fixed-size pages.
//
// The cursor starts at the top of the usable area and moves down one unit
// height per placed unit. When there is no room left for another unit, the
// current page is closed and a fresh one opened. The last page is always
// emitted, so every call yields at least one page.

use serde::Serialize;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::types::PageGeometry;

use crate::breaker::{Line, break_paragraph};
use crate::metrics::GlyphMetrics;
use crate::table::TableRow;

/// Anything the paginator can place on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RenderableUnit {
    Line(Line),
    Row(TableRow),
}

impl RenderableUnit {
    pub fn text(&self) -> &str {
        match self {
            Self::Line(line) => line.text(),
            Self::Row(row) => row.text(),
        }
    }

    /// Header rows are drawn in a bold face by the assembler.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Row(row) if row.is_header())
    }
}

impl From<Line> for RenderableUnit {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<TableRow> for RenderableUnit {
    fn from(row: TableRow) -> Self {
        Self::Row(row)
    }
}

/// A unit together with the baseline it was placed at, in points from the
/// bottom of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedUnit {
    pub unit: RenderableUnit,
    pub y: f32,
}

/// The content assigned to one output page, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    index: usize,
    units: Vec<PlacedUnit>,
}

impl Page {
    fn new(index: usize) -> Self {
        Self {
            index,
            units: Vec::new(),
        }
    }

    /// 0-based position of this page in the output.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn units(&self) -> &[PlacedUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Text of every unit on the page, spacers included.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|placed| placed.unit.text())
    }

    pub fn into_units(self) -> impl Iterator<Item = RenderableUnit> {
        self.units.into_iter().map(|placed| placed.unit)
    }
}

/// Paginate units that each take `unit_height` points of vertical space.
pub fn paginate_units<I>(units: I, geometry: &PageGeometry, unit_height: f32) -> Result<Vec<Page>>
where
    I: IntoIterator,
    I::Item: Into<RenderableUnit>,
{
    geometry.validate()?;
    if !unit_height.is_finite() || unit_height <= 0.0 {
        return Err(PagewerkError::LayoutImpossible(format!(
            "unit height must be positive, got {unit_height}"
        )));
    }
    if geometry.usable_height() <= unit_height {
        return Err(PagewerkError::LayoutImpossible(format!(
            "usable height {} does not exceed unit height {unit_height}",
            geometry.usable_height()
        )));
    }

    let top = geometry.top();
    let floor = geometry.margin + unit_height;

    let mut pages = Vec::new();
    let mut current = Page::new(0);
    let mut y = top;

    for unit in units {
        if y < floor {
            let next = Page::new(pages.len() + 1);
            pages.push(std::mem::replace(&mut current, next));
            y = top;
        }
        current.units.push(PlacedUnit {
            unit: unit.into(),
            y,
        });
        y -= unit_height;
    }

    pages.push(current);
    Ok(pages)
}

/// Paginate wrapped lines at the geometry's line height.
pub fn paginate<I>(lines: I, geometry: &PageGeometry) -> Result<Vec<Page>>
where
    I: IntoIterator<Item = Line>,
{
    paginate_units(lines, geometry, geometry.line_height())
}

/// Break every paragraph, separate paragraphs with a blank spacer line, and
/// paginate the result.
///
/// All paragraphs are broken before any page is produced, so a metrics
/// failure anywhere leaves no partial output.
pub fn paginate_paragraphs<S, M>(
    paragraphs: &[S],
    geometry: &PageGeometry,
    metrics: &M,
) -> Result<Vec<Page>>
where
    S: AsRef<str>,
    M: GlyphMetrics + ?Sized,
{
    geometry.validate()?;

    let mut lines = Vec::new();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        if index > 0 {
            lines.push(Line::blank());
        }
        lines.extend(break_paragraph(paragraph.as_ref(), geometry, metrics)?);
    }

    paginate(lines, geometry)
}
