// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: render paginated layout output to PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Every page produced by the paginator becomes exactly
// one PDF page, and every placed unit is written at the baseline the
// paginator chose for it.

use pagewerk_core::config::AppConfig;
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::types::{FontId, PT_PER_MM, PageGeometry};
use pagewerk_layout::{BuiltinMetrics, Page, TableLayout, paginate_paragraphs};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::{debug, info, instrument};

use crate::content;

/// Default title embedded when none is set.
const DEFAULT_TITLE: &str = "Pagewerk Document";

/// Lays out text and tables with the built-in font metrics and writes them as
/// PDF.
///
/// The writer owns the page geometry; every document it produces uses that
/// geometry's paper size, margins and font.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    geometry: PageGeometry,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a writer for `geometry`.
    ///
    /// Fails if the geometry leaves no usable area or names a font that is not
    /// one of the standard base fonts.
    pub fn new(geometry: PageGeometry) -> Result<Self> {
        geometry.validate()?;
        builtin_font(&geometry.font_id)?;
        Ok(Self {
            geometry,
            title: None,
        })
    }

    /// Build a writer from the application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut writer = Self::new(config.geometry()?)?;
        writer.set_title(config.title.clone());
        Ok(writer)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    // -- Layout entry points --------------------------------------------------

    /// Lay out plain text and render it.
    ///
    /// Blank lines separate paragraphs; single newlines inside a paragraph are
    /// soft breaks.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn create_from_text(&self, text: &str) -> Result<Vec<u8>> {
        self.create_from_paragraphs(&content::text::paragraphs(text))
    }

    /// Lay out pre-split paragraphs and render them.
    #[instrument(skip_all, fields(paragraphs = paragraphs.len()))]
    pub fn create_from_paragraphs<S: AsRef<str>>(&self, paragraphs: &[S]) -> Result<Vec<u8>> {
        let pages = paginate_paragraphs(paragraphs, &self.geometry, &BuiltinMetrics)?;
        self.render_pages(&pages)
    }

    /// Lay out table records as one row per line and render them.
    #[instrument(skip_all, fields(records = records.len(), row_limit = ?layout.row_limit))]
    pub fn create_from_table(&self, records: &[Vec<String>], layout: &TableLayout) -> Result<Vec<u8>> {
        let pages = layout.paginate(records, &self.geometry)?;
        self.render_pages(&pages)
    }

    // -- Rendering ------------------------------------------------------------

    /// Render already paginated pages, one PDF page per layout page.
    #[instrument(skip_all, fields(pages = pages.len()))]
    pub fn render_pages(&self, pages: &[Page]) -> Result<Vec<u8>> {
        let geometry = &self.geometry;
        let regular = builtin_font(&geometry.font_id)?;
        let bold = bold_variant(regular);
        let page_w = Mm(geometry.width / PT_PER_MM);
        let page_h = Mm(geometry.height / PT_PER_MM);
        let title = self.title();

        info!(
            title,
            width_pt = geometry.width,
            height_pt = geometry.height,
            font = %geometry.font_id,
            "Rendering PDF"
        );

        let mut doc = PdfDocument::new(title);
        let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(pages.len().max(1));

        for page in pages {
            let mut ops: Vec<Op> = Vec::new();
            for placed in page.units() {
                let text = placed.unit.text();
                if text.is_empty() {
                    continue;
                }
                let font = if placed.unit.is_header() { bold } else { regular };
                push_text(&mut ops, text, geometry.margin, placed.y, geometry.font_size, font);
            }
            pdf_pages.push(PdfPage::new(page_w, page_h, ops));
        }

        // The paginator never yields zero pages, but a caller-built slice may.
        if pdf_pages.is_empty() {
            pdf_pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        debug!(
            pages = doc.pages.len(),
            output_bytes = output.len(),
            "PDF rendered"
        );
        Ok(output)
    }
}

/// Emit one text run at `(x, y)` in points.
fn push_text(ops: &mut Vec<Op>, text: &str, x: f32, y: f32, size: f32, font: BuiltinFont) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Map a font identity onto one of the PDF base fonts.
fn builtin_font(font: &FontId) -> Result<BuiltinFont> {
    match font.as_str() {
        FontId::HELVETICA => Ok(BuiltinFont::Helvetica),
        FontId::HELVETICA_BOLD => Ok(BuiltinFont::HelveticaBold),
        FontId::TIMES_ROMAN => Ok(BuiltinFont::TimesRoman),
        FontId::COURIER => Ok(BuiltinFont::Courier),
        FontId::COURIER_BOLD => Ok(BuiltinFont::CourierBold),
        other => Err(PagewerkError::MetricsUnavailable(format!(
            "font {other:?} is not a built-in PDF font"
        ))),
    }
}

fn bold_variant(font: BuiltinFont) -> BuiltinFont {
    match font {
        BuiltinFont::Helvetica => BuiltinFont::HelveticaBold,
        BuiltinFont::TimesRoman => BuiltinFont::TimesBold,
        BuiltinFont::Courier => BuiltinFont::CourierBold,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::pdf::reader::PdfReader;
    use pagewerk_core::types::{Orientation, PaperSize};
    use pagewerk_layout::RowLimit;

    fn a4_writer() -> PdfWriter {
        let geometry = PageGeometry::for_paper(
            PaperSize::A4,
            Orientation::Portrait,
            56.7,
            FontId::helvetica(),
            11.0,
            1.3,
        )
        .unwrap();
        PdfWriter::new(geometry).unwrap()
    }

    #[test]
    fn empty_text_renders_one_blank_page() {
        let bytes = a4_writer().create_from_text("").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(PdfReader::from_bytes(&bytes).unwrap().page_count(), 1);
    }

    #[test]
    fn long_text_spans_several_pages() {
        let paragraph = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let text = vec![paragraph; 12].join("\n\n");
        let bytes = a4_writer().create_from_text(&text).unwrap();
        assert!(PdfReader::from_bytes(&bytes).unwrap().page_count() > 1);
    }

    #[test]
    fn page_count_matches_the_layout() {
        let writer = a4_writer();
        let paragraphs: Vec<String> = (0..200).map(|i| format!("Paragraph number {i}")).collect();
        let pages =
            paginate_paragraphs(&paragraphs, writer.geometry(), &BuiltinMetrics).unwrap();
        let bytes = writer.render_pages(&pages).unwrap();
        assert_eq!(
            PdfReader::from_bytes(&bytes).unwrap().page_count(),
            pages.len()
        );
    }

    #[test]
    fn tables_render_with_a_row_cap() {
        let records: Vec<Vec<String>> = (0..500)
            .map(|i| vec![format!("row {i}"), format!("{}", i * 3)])
            .collect();
        let layout = TableLayout {
            row_limit: RowLimit::AtMost(10),
            ..TableLayout::default()
        };
        let bytes = a4_writer().create_from_table(&records, &layout).unwrap();
        assert_eq!(PdfReader::from_bytes(&bytes).unwrap().page_count(), 1);
    }

    #[test]
    fn unknown_font_is_rejected_up_front() {
        let geometry =
            PageGeometry::new(595.0, 842.0, 50.0, FontId::new("Papyrus"), 11.0, 1.2).unwrap();
        let err = PdfWriter::new(geometry).unwrap_err();
        assert!(matches!(err, PagewerkError::MetricsUnavailable(_)));
    }

    #[test]
    fn writer_follows_the_configuration() {
        let config = AppConfig {
            paper_size: PaperSize::Letter,
            font: FontId::courier(),
            ..AppConfig::default()
        };
        let writer = PdfWriter::from_config(&config).unwrap();
        assert_eq!(writer.geometry().font_id, FontId::courier());
        assert_eq!(writer.title(), config.title);
    }

    /// Base font names of every font dictionary in a rendered PDF.
    fn base_fonts(bytes: &[u8]) -> BTreeSet<String> {
        let document = lopdf::Document::load_mem(bytes).unwrap();
        document
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| {
                dict.get(b"Type")
                    .and_then(|kind| kind.as_name())
                    .is_ok_and(|kind| kind == b"Font")
            })
            .filter_map(|dict| dict.get(b"BaseFont").and_then(|name| name.as_name()).ok())
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect()
    }

    fn small_table() -> Vec<Vec<String>> {
        vec![
            vec!["name".into(), "city".into()],
            vec!["Ada".into(), "London".into()],
        ]
    }

    #[test]
    fn header_rows_are_written_in_bold() {
        let bytes = a4_writer()
            .create_from_table(&small_table(), &TableLayout::default())
            .unwrap();
        let fonts = base_fonts(&bytes);
        assert!(fonts.contains("Helvetica-Bold"), "fonts: {fonts:?}");
        assert!(fonts.contains("Helvetica"), "fonts: {fonts:?}");
    }

    #[test]
    fn headerless_tables_use_only_the_regular_face() {
        let layout = TableLayout {
            header: false,
            ..TableLayout::default()
        };
        let bytes = a4_writer().create_from_table(&small_table(), &layout).unwrap();
        let fonts = base_fonts(&bytes);
        assert!(!fonts.contains("Helvetica-Bold"), "fonts: {fonts:?}");
        assert!(fonts.contains("Helvetica"), "fonts: {fonts:?}");
    }

    #[test]
    fn bold_variants_of_each_face() {
        assert!(matches!(
            bold_variant(BuiltinFont::TimesRoman),
            BuiltinFont::TimesBold
        ));
        assert!(matches!(
            bold_variant(BuiltinFont::CourierBold),
            BuiltinFont::CourierBold
        ));
    }
}
