// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document conversion: dispatches raw input to the right decomposition and
// runs the layout pipeline to produce PDF.
//
// Conversion chain: bytes → paragraphs or records → lines or rows → pages →
// PDF. Each conversion is self-contained and owns all of its intermediate
// state.

use tracing::{info, instrument};

use pagewerk_core::config::AppConfig;
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::types::{DocumentType, PageGeometry};
use pagewerk_layout::{RowLimit, TableLayout};

use crate::content::{self, docx, html, markdown, tabular, text};
use crate::pdf::reader::PdfReader;
use crate::pdf::writer::PdfWriter;

/// Everything a conversion needs besides the input bytes.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub geometry: PageGeometry,
    pub title: String,
    pub table: TableLayout,
}

impl ConvertOptions {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            geometry: config.geometry()?,
            title: config.title.clone(),
            table: TableLayout {
                row_limit: RowLimit::from_option(config.max_table_rows),
                max_row_chars: config.max_row_chars,
                header: config.table_header,
                ..TableLayout::default()
            },
        })
    }
}

/// Converts supported input documents to PDF.
pub struct DocumentConverter;

impl DocumentConverter {
    /// Convert `bytes` of type `source_type` to PDF.
    ///
    /// PDF input is validated and passed through unchanged.
    #[instrument(skip(bytes, options), fields(bytes_len = bytes.len()))]
    pub fn convert(
        bytes: &[u8],
        source_type: DocumentType,
        options: &ConvertOptions,
    ) -> Result<Vec<u8>> {
        if source_type == DocumentType::Pdf {
            PdfReader::from_bytes(bytes)?;
            return Ok(bytes.to_vec());
        }

        let mut writer = PdfWriter::new(options.geometry.clone())?;
        writer.set_title(options.title.clone());

        info!(
            from = source_type.mime_type(),
            tabular = source_type.is_tabular(),
            "Converting document to PDF"
        );

        match source_type {
            DocumentType::PlainText => {
                writer.create_from_paragraphs(&text::paragraphs(content::decode_utf8(bytes)?))
            }
            DocumentType::Markdown => {
                writer.create_from_paragraphs(&markdown::paragraphs(content::decode_utf8(bytes)?))
            }
            DocumentType::Html => {
                writer.create_from_paragraphs(&html::paragraphs(content::decode_utf8(bytes)?))
            }
            DocumentType::Docx => writer.create_from_paragraphs(&docx::paragraphs(bytes)?),
            DocumentType::Csv => {
                let records = tabular::csv_records(bytes, options.table.row_limit)?;
                writer.create_from_table(&records, &options.table)
            }
            DocumentType::Excel => Self::convert_excel(&writer, bytes, &options.table),
            DocumentType::Pdf => Ok(bytes.to_vec()),
        }
    }

    #[cfg(feature = "excel")]
    fn convert_excel(writer: &PdfWriter, bytes: &[u8], table: &TableLayout) -> Result<Vec<u8>> {
        let records = tabular::excel_records(bytes, table.row_limit)?;
        writer.create_from_table(&records, table)
    }

    #[cfg(not(feature = "excel"))]
    fn convert_excel(_writer: &PdfWriter, _bytes: &[u8], _table: &TableLayout) -> Result<Vec<u8>> {
        Err(PagewerkError::UnsupportedDocument(
            "spreadsheet support was not compiled in (enable the \"excel\" feature)".into(),
        ))
    }

    /// Infer the document type from a file name's extension.
    pub fn detect(file_name: &str) -> Result<DocumentType> {
        std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentType::from_extension)
            .ok_or_else(|| {
                PagewerkError::UnsupportedDocument(format!(
                    "cannot tell the document type of {file_name:?}"
                ))
            })
    }
}
