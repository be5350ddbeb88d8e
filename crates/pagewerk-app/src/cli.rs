// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pagewerk_core::config::AppConfig;
use pagewerk_core::types::{FontId, Orientation, PaperSize};
use pagewerk_layout::RangeSpec;

/// Convert documents to paginated PDF, and split, merge or compress PDFs.
#[derive(Parser, Debug)]
#[command(name = "pagewerk", version, about)]
pub struct Cli {
    /// JSON configuration file with layout defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert any supported file, choosing the format from its extension.
    Convert(TableArgs),

    /// Lay out a plain-text file as PDF.
    TextToPdf(TextArgs),

    /// Lay out a Markdown file as PDF.
    MarkdownToPdf(TextArgs),

    /// Lay out an HTML file as PDF.
    HtmlToPdf(TextArgs),

    /// Lay out the paragraphs of a Word document as PDF.
    DocxToPdf(TextArgs),

    /// Lay out a CSV file as a table, one row per line.
    CsvToPdf(TableArgs),

    /// Lay out the first worksheet of a spreadsheet as a table.
    #[cfg(feature = "excel")]
    ExcelToPdf(TableArgs),

    /// Concatenate PDFs page-wise, in argument order.
    Merge {
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a PDF into one document per page range or chunk.
    Split {
        input: PathBuf,

        /// Directory that receives the parts.
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        mode: SplitMode,
    },

    /// Drop unused objects and compress streams.
    Compress {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the number of pages in a PDF.
    PageCount { input: PathBuf },
}

/// Input, output and layout options for paragraph documents.
#[derive(Args, Debug)]
pub struct TextArgs {
    pub input: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

/// Input, output, layout and row options for tabular documents.
#[derive(Args, Debug)]
pub struct TableArgs {
    pub input: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Lay out at most this many rows, the header included.
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,

    /// Cut rows longer than this many characters.
    #[arg(long, value_name = "N")]
    pub max_row_chars: Option<usize>,

    /// Treat the first row as data rather than a header.
    #[arg(long)]
    pub no_header: bool,
}

/// Layout overrides; anything left unset keeps its configured value.
#[derive(Args, Debug, Default)]
pub struct LayoutArgs {
    /// Paper size: A3, A4, A5, Letter, Legal or Tabloid.
    #[arg(long, value_parser = parse_paper)]
    pub paper: Option<PaperSize>,

    #[arg(long)]
    pub landscape: bool,

    /// Base font, e.g. Helvetica, Times-Roman or Courier.
    #[arg(long)]
    pub font: Option<String>,

    /// Font size in points.
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Margin in points on every side.
    #[arg(long)]
    pub margin: Option<f32>,

    /// Line height as a multiple of the font size.
    #[arg(long)]
    pub line_height: Option<f32>,

    /// Title stored in the PDF metadata.
    #[arg(long)]
    pub title: Option<String>,
}

impl LayoutArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(paper) = self.paper {
            config.paper_size = paper;
        }
        if self.landscape {
            config.orientation = Orientation::Landscape;
        }
        if let Some(font) = &self.font {
            config.font = FontId::new(font.as_str());
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(margin) = self.margin {
            config.margin_pt = margin;
        }
        if let Some(multiplier) = self.line_height {
            config.line_height_multiplier = multiplier;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
    }
}

impl TableArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        self.layout.apply(config);
        if self.max_rows.is_some() {
            config.max_table_rows = self.max_rows;
        }
        if self.max_row_chars.is_some() {
            config.max_row_chars = self.max_row_chars;
        }
        if self.no_header {
            config.table_header = false;
        }
    }
}

/// Exactly one of `--ranges` or `--chunk`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SplitMode {
    /// Comma-separated 1-based pages or ranges, e.g. "1-3,5".
    #[arg(long)]
    pub ranges: Option<String>,

    /// Split into parts of this many pages.
    #[arg(long, allow_negative_numbers = true)]
    pub chunk: Option<i64>,
}

impl SplitMode {
    pub fn spec(&self) -> RangeSpec {
        match (&self.ranges, self.chunk) {
            (Some(ranges), _) => RangeSpec::Ranges(ranges.clone()),
            (None, Some(size)) => RangeSpec::Chunks(size),
            // clap's group rule makes this unreachable; an empty spec is
            // rejected by the resolver
            (None, None) => RangeSpec::Ranges(String::new()),
        }
    }
}

fn parse_paper(name: &str) -> Result<PaperSize, String> {
    PaperSize::from_name(name).ok_or_else(|| format!("unknown paper size {name:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn layout_flags_override_the_config() {
        let cli = Cli::try_parse_from([
            "pagewerk",
            "text-to-pdf",
            "in.txt",
            "-o",
            "out.pdf",
            "--paper",
            "letter",
            "--landscape",
            "--font",
            "Courier",
            "--font-size",
            "9",
        ])
        .unwrap();
        let Command::TextToPdf(args) = cli.command else {
            panic!("expected text-to-pdf");
        };

        let mut config = AppConfig::default();
        args.layout.apply(&mut config);
        assert_eq!(config.paper_size, PaperSize::Letter);
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.font, FontId::courier());
        assert_eq!(config.font_size, 9.0);
        assert_eq!(config.margin_pt, AppConfig::default().margin_pt);
    }

    #[test]
    fn table_flags_override_the_config() {
        let cli = Cli::try_parse_from([
            "pagewerk",
            "csv-to-pdf",
            "in.csv",
            "-o",
            "out.pdf",
            "--max-rows",
            "100",
            "--no-header",
        ])
        .unwrap();
        let Command::CsvToPdf(args) = cli.command else {
            panic!("expected csv-to-pdf");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.max_table_rows, Some(100));
        assert!(!config.table_header);
        assert_eq!(config.max_row_chars, None);
    }

    #[test]
    fn unknown_paper_is_rejected() {
        let result = Cli::try_parse_from([
            "pagewerk", "text-to-pdf", "in.txt", "-o", "out.pdf", "--paper", "B9",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn split_needs_exactly_one_mode() {
        let neither = Cli::try_parse_from(["pagewerk", "split", "in.pdf", "--out-dir", "parts"]);
        assert!(neither.is_err());

        let both = Cli::try_parse_from([
            "pagewerk", "split", "in.pdf", "--out-dir", "parts", "--ranges", "1", "--chunk", "2",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn split_modes_map_to_range_specs() {
        let cli = Cli::try_parse_from([
            "pagewerk", "split", "in.pdf", "--out-dir", "parts", "--chunk", "-3",
        ])
        .unwrap();
        let Command::Split { mode, .. } = cli.command else {
            panic!("expected split");
        };
        assert_eq!(mode.spec(), RangeSpec::Chunks(-3));
    }

    #[test]
    fn convert_takes_table_options() {
        let cli = Cli::try_parse_from([
            "pagewerk", "convert", "data.csv", "-o", "out.pdf", "--max-row-chars", "80",
        ])
        .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.max_row_chars, Some(80));
    }

    #[test]
    fn docx_to_pdf_takes_layout_options() {
        let cli = Cli::try_parse_from([
            "pagewerk", "docx-to-pdf", "report.docx", "-o", "report.pdf", "--margin", "36",
        ])
        .unwrap();
        let Command::DocxToPdf(args) = cli.command else {
            panic!("expected docx-to-pdf");
        };
        assert_eq!(args.input, PathBuf::from("report.docx"));
        assert_eq!(args.layout.margin, Some(36.0));
    }

    #[test]
    fn merge_needs_two_inputs() {
        assert!(Cli::try_parse_from(["pagewerk", "merge", "a.pdf", "-o", "out.pdf"]).is_err());
        assert!(
            Cli::try_parse_from(["pagewerk", "merge", "a.pdf", "b.pdf", "-o", "out.pdf"]).is_ok()
        );
    }

    #[test]
    fn config_flag_is_global() {
        let cli =
            Cli::try_parse_from(["pagewerk", "page-count", "in.pdf", "--config", "pw.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("pw.json")));
    }
}
