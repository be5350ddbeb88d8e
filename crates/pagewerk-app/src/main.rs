// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagewerk: paginated document conversion and PDF page-range tools.
//
// Entry point. Initialises logging, resolves configuration and dispatches the
// selected subcommand.

mod cli;
mod services;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use pagewerk_core::config::AppConfig;
use pagewerk_core::error::PagewerkError;
use pagewerk_core::human_errors::humanize_error;
use pagewerk_core::types::DocumentType;
use pagewerk_document::DocumentConverter;

use cli::{Cli, Command, TableArgs, TextArgs};
use services::{commands, config};

fn main() -> ExitCode {
    // Logs go to stderr so command output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Convert(args) => {
            let file_name = args.input.to_string_lossy();
            let source_type = DocumentConverter::detect(&file_name)?;
            convert_table(&args, source_type, &mut config)
        }
        Command::TextToPdf(args) => convert_text(&args, DocumentType::PlainText, &mut config),
        Command::MarkdownToPdf(args) => convert_text(&args, DocumentType::Markdown, &mut config),
        Command::HtmlToPdf(args) => convert_text(&args, DocumentType::Html, &mut config),
        Command::DocxToPdf(args) => convert_text(&args, DocumentType::Docx, &mut config),
        Command::CsvToPdf(args) => convert_table(&args, DocumentType::Csv, &mut config),
        #[cfg(feature = "excel")]
        Command::ExcelToPdf(args) => convert_table(&args, DocumentType::Excel, &mut config),
        Command::Merge { inputs, output } => commands::merge(&inputs, &output)
            .with_context(|| format!("failed to merge into {}", output.display())),
        Command::Split {
            input,
            out_dir,
            mode,
        } => {
            let written = commands::split(&input, &out_dir, &mode.spec())
                .with_context(|| format!("failed to split {}", input.display()))?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Compress { input, output } => commands::compress(&input, &output)
            .with_context(|| format!("failed to compress {}", input.display())),
        Command::PageCount { input } => {
            let pages = commands::page_count(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            println!("{pages}");
            Ok(())
        }
    }
}

fn convert_text(
    args: &TextArgs,
    source_type: DocumentType,
    config: &mut AppConfig,
) -> anyhow::Result<()> {
    args.layout.apply(config);
    convert(&args.input, &args.output, source_type, config)
}

fn convert_table(
    args: &TableArgs,
    source_type: DocumentType,
    config: &mut AppConfig,
) -> anyhow::Result<()> {
    args.apply(config);
    convert(&args.input, &args.output, source_type, config)
}

fn convert(
    input: &Path,
    output: &Path,
    source_type: DocumentType,
    config: &AppConfig,
) -> anyhow::Result<()> {
    commands::convert(input, output, source_type, config)
        .with_context(|| format!("failed to convert {}", input.display()))
}

/// Print an error for a person: the plain message and suggestion when the
/// cause is a known engine error, the full context chain otherwise.
fn report(err: &anyhow::Error) {
    tracing::debug!("Command failed: {err:#}");
    match err.downcast_ref::<PagewerkError>() {
        Some(cause) => {
            let human = humanize_error(cause);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            eprintln!("  ({err:#})");
        }
        None => eprintln!("error: {err:#}"),
    }
}
