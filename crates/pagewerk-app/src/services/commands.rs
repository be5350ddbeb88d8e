// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations. Every command reads its inputs, does all of its
// work in memory, and only then stages and commits its outputs.

use std::path::{Path, PathBuf};

use pagewerk_core::config::AppConfig;
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::types::DocumentType;
use pagewerk_document::{ConvertOptions, DocumentConverter, PdfReader};
use pagewerk_layout::{RangeSpec, resolve};
use tracing::{info, instrument};

use super::output::{OutputBatch, write_output};

/// Convert `input` of the given type to a PDF at `output`.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn convert(
    input: &Path,
    output: &Path,
    source_type: DocumentType,
    config: &AppConfig,
) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let options = ConvertOptions::from_config(config)?;
    let pdf = DocumentConverter::convert(&bytes, source_type, &options)?;
    write_output(output, &pdf)
}

/// Merge `inputs` page-wise into `output`.
#[instrument(skip_all, fields(inputs = inputs.len(), output = %output.display()))]
pub fn merge(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let Some((first, rest)) = inputs.split_first() else {
        return Err(PagewerkError::MissingInput(
            "merge needs at least one input PDF".into(),
        ));
    };
    let base = PdfReader::open(first)?;
    let others = rest
        .iter()
        .map(std::fs::read)
        .collect::<std::io::Result<Vec<_>>>()?;
    let others: Vec<&[u8]> = others.iter().map(Vec::as_slice).collect();

    let merged = base.merge(&others)?;
    write_output(output, &merged)
}

/// Split `input` into one PDF per resolved group inside `out_dir`.
///
/// Parts are named `<stem>_part<N>_p<pages>.pdf`, numbered in group order.
#[instrument(skip_all, fields(input = %input.display(), out_dir = %out_dir.display()))]
pub fn split(input: &Path, out_dir: &Path, spec: &RangeSpec) -> Result<Vec<PathBuf>> {
    let reader = PdfReader::open(input)?;
    let groups = resolve(spec, reader.page_count())?;

    let parts = groups
        .iter()
        .map(|group| reader.extract_group(group))
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(out_dir)?;
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let mut batch = OutputBatch::new();
    for (index, (group, bytes)) in groups.iter().zip(&parts).enumerate() {
        let name = format!("{stem}_part{}_p{}.pdf", index + 1, group.label());
        batch.stage(out_dir.join(name), bytes)?;
    }
    info!(parts = batch.len(), "Split complete");
    batch.commit()
}

/// Compress `input` into `output`.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn compress(input: &Path, output: &Path) -> Result<()> {
    let reader = PdfReader::open(input)?;
    let compressed = reader.compress()?;
    write_output(output, &compressed)
}

pub fn page_count(input: &Path) -> Result<usize> {
    Ok(PdfReader::open(input)?.page_count())
}
