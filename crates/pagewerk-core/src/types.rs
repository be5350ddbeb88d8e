// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pagewerk conversion engine.

use serde::{Deserialize, Serialize};

use crate::error::{PagewerkError, Result};

/// Points per millimetre (1 in = 72 pt = 25.4 mm).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Identity of a font face, e.g. `"Helvetica"` or `"Courier-Bold"`.
///
/// The identity is opaque to the layout engine; glyph metrics providers decide
/// which identities they can measure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(pub String);

impl FontId {
    pub const HELVETICA: &'static str = "Helvetica";
    pub const HELVETICA_BOLD: &'static str = "Helvetica-Bold";
    pub const TIMES_ROMAN: &'static str = "Times-Roman";
    pub const COURIER: &'static str = "Courier";
    pub const COURIER_BOLD: &'static str = "Courier-Bold";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn helvetica() -> Self {
        Self::new(Self::HELVETICA)
    }

    pub fn courier() -> Self {
        Self::new(Self::COURIER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FontId {
    fn default() -> Self {
        Self::helvetica()
    }
}

impl From<&str> for FontId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for FontId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supported input document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    PlainText,
    Markdown,
    Html,
    /// Word documents (Office Open XML).
    Docx,
    Csv,
    /// Spreadsheet workbooks (XLSX, XLS, ODS).
    Excel,
    Pdf,
}

impl DocumentType {
    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Markdown => "text/markdown",
            Self::Html => "text/html",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    /// Infer document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" | "log" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" | "xhtml" => Some(Self::Html),
            "docx" => Some(Self::Docx),
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Some(Self::Excel),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Whether the content is laid out as table rows rather than paragraphs.
    pub fn is_tabular(&self) -> bool {
        matches!(self, Self::Csv | Self::Excel)
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Dimensions in points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (w as f32 * PT_PER_MM, h as f32 * PT_PER_MM)
    }

    /// Parse a paper size name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(Self::A4),
            "a3" => Some(Self::A3),
            "a5" => Some(Self::A5),
            "letter" => Some(Self::Letter),
            "legal" => Some(Self::Legal),
            "tabloid" => Some(Self::Tabloid),
            _ => None,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// The fixed measurements of one page's writing area, in points.
///
/// `usable_width = width - 2·margin`, `usable_height = height - 2·margin`, and
/// `line_height = font_size · line_height_multiplier`. A geometry is only
/// usable for layout when [`PageGeometry::validate`] succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub line_height_multiplier: f32,
    pub font_size: f32,
    pub font_id: FontId,
}

impl PageGeometry {
    /// Build and validate a geometry.
    pub fn new(
        width: f32,
        height: f32,
        margin: f32,
        font_id: FontId,
        font_size: f32,
        line_height_multiplier: f32,
    ) -> Result<Self> {
        let geometry = Self {
            width,
            height,
            margin,
            line_height_multiplier,
            font_size,
            font_id,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Build a geometry for a standard paper size.
    pub fn for_paper(
        paper: PaperSize,
        orientation: Orientation,
        margin: f32,
        font_id: FontId,
        font_size: f32,
        line_height_multiplier: f32,
    ) -> Result<Self> {
        let (w, h) = paper.dimensions_pt();
        let (width, height) = match orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        };
        Self::new(
            width,
            height,
            margin,
            font_id,
            font_size,
            line_height_multiplier,
        )
    }

    /// Vertical advance between consecutive lines.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_height_multiplier
    }

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn usable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Baseline of the first line on a page (top of the usable area).
    pub fn top(&self) -> f32 {
        self.height - self.margin
    }

    /// Reject geometries that leave no room to place a single line.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("font size", self.font_size),
            ("line height multiplier", self.line_height_multiplier),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PagewerkError::LayoutImpossible(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(PagewerkError::LayoutImpossible(format!(
                "margin must not be negative, got {}",
                self.margin
            )));
        }
        if self.usable_width() <= 0.0 {
            return Err(PagewerkError::LayoutImpossible(format!(
                "usable width is {} (page width {}, margin {})",
                self.usable_width(),
                self.width,
                self.margin
            )));
        }
        if self.usable_height() <= self.line_height() {
            return Err(PagewerkError::LayoutImpossible(format!(
                "usable height {} does not exceed line height {}",
                self.usable_height(),
                self.line_height()
            )));
        }
        Ok(())
    }
}
