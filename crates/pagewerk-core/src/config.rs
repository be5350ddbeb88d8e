// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PagewerkError, Result};
use crate::types::{FontId, Orientation, PageGeometry, PaperSize};

/// Default layout settings applied to every conversion unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Paper size for generated documents.
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Page margin in points, applied on all four sides.
    pub margin_pt: f32,
    pub font: FontId,
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f32,
    /// Maximum table rows laid out; `None` lays out every row.
    pub max_table_rows: Option<usize>,
    /// Maximum characters per rendered table row; `None` keeps full rows.
    pub max_row_chars: Option<usize>,
    /// Whether the first table row is a header.
    pub table_header: bool,
    /// Title embedded in generated PDFs.
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            // 20 mm
            margin_pt: 56.7,
            font: FontId::helvetica(),
            font_size: 11.0,
            line_height_multiplier: 1.3,
            max_table_rows: None,
            max_row_chars: None,
            table_header: true,
            title: "Pagewerk Document".into(),
        }
    }
}

impl AppConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        config.geometry().map_err(|err| {
            PagewerkError::Config(format!("{}: {}", path.display(), err))
        })?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The validated page geometry described by this configuration.
    pub fn geometry(&self) -> Result<PageGeometry> {
        PageGeometry::for_paper(
            self.paper_size,
            self.orientation,
            self.margin_pt,
            self.font.clone(),
            self.font_size,
            self.line_height_multiplier,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_geometry_is_valid() {
        assert!(AppConfig::default().geometry().is_ok());
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagewerk.json");

        let config = AppConfig {
            paper_size: PaperSize::Letter,
            max_table_rows: Some(50),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "font_size": 9.0, "font": "Courier" }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.font, FontId::courier());
        assert_eq!(config.font_size, 9.0);
        assert_eq!(config.paper_size, PaperSize::A4);
    }

    #[test]
    fn impossible_geometry_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "margin_pt": 400.0 }"#).unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, PagewerkError::Config(_)));
    }
}
