// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewerk-document: Document assembly for the Pagewerk conversion engine.
//
// Provides PDF operations (render laid-out pages, split by page range, merge,
// compress) and content decomposition (plain text, Markdown, HTML, DOCX, CSV
// and, behind the "excel" feature, spreadsheets).

pub mod content;
pub mod convert;
pub mod pdf;

// Re-export the primary structs so callers can use `pagewerk_document::PdfReader` etc.
pub use convert::{ConvertOptions, DocumentConverter};
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
