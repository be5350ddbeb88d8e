// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-range resolver: turns a split request into groups of 0-based source
// page indices, one group per output document.

use std::fmt;

use serde::{Deserialize, Serialize};

use pagewerk_core::error::{PagewerkError, Result};

/// How a document should be split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSpec {
    /// Comma-separated 1-based tokens such as `"1-3,5,8-10"`.
    Ranges(String),
    /// Fixed-size chunks of this many pages.
    Chunks(i64),
}

/// Ordered 0-based source page indices for one output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeGroup {
    indices: Vec<usize>,
}

impl RangeGroup {
    fn span(start: usize, end_inclusive: usize) -> Self {
        Self {
            indices: (start..=end_inclusive).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// 1-based page numbers, as a user would write them.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().map(|index| index + 1)
    }

    /// Short 1-based label such as `"3"` or `"4-6"`, used for output file names.
    pub fn label(&self) -> String {
        match (self.indices.first(), self.indices.last()) {
            (Some(first), Some(last)) if first == last => format!("{}", first + 1),
            (Some(first), Some(last)) => format!("{}-{}", first + 1, last + 1),
            _ => String::new(),
        }
    }
}

impl fmt::Display for RangeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Resolve a split request against a document of `total_pages` pages.
///
/// Either every group is returned or the whole request fails with
/// `InvalidRange`; nothing is resolved partially.
pub fn resolve(spec: &RangeSpec, total_pages: usize) -> Result<Vec<RangeGroup>> {
    match spec {
        RangeSpec::Ranges(expr) => resolve_ranges(expr, total_pages),
        RangeSpec::Chunks(size) => resolve_chunks(*size, total_pages),
    }
}

fn resolve_ranges(expr: &str, total_pages: usize) -> Result<Vec<RangeGroup>> {
    let mut groups = Vec::new();

    for token in expr.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let group = match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page(start, token)?;
                let end = parse_page(end, token)?;
                if start > end {
                    return Err(PagewerkError::InvalidRange(format!(
                        "range {token:?} starts after it ends"
                    )));
                }
                if start > total_pages {
                    return Err(PagewerkError::InvalidRange(format!(
                        "range {token:?} starts past the last page ({total_pages})"
                    )));
                }
                RangeGroup::span(start - 1, end.min(total_pages) - 1)
            }
            None => {
                let page = parse_page(token, token)?;
                if page > total_pages {
                    return Err(PagewerkError::InvalidRange(format!(
                        "page {page} is out of bounds (document has {total_pages} pages)"
                    )));
                }
                RangeGroup::span(page - 1, page - 1)
            }
        };
        groups.push(group);
    }

    if groups.is_empty() {
        return Err(PagewerkError::InvalidRange(format!(
            "no page ranges in {expr:?}"
        )));
    }
    Ok(groups)
}

/// Parse a 1-based page number.
fn parse_page(raw: &str, token: &str) -> Result<usize> {
    let raw = raw.trim();
    match raw.parse::<usize>() {
        Ok(0) => Err(PagewerkError::InvalidRange(format!(
            "page numbers start at 1, got 0 in {token:?}"
        ))),
        Ok(page) => Ok(page),
        Err(_) => Err(PagewerkError::InvalidRange(format!(
            "invalid page number {raw:?} in {token:?}"
        ))),
    }
}

fn resolve_chunks(size: i64, total_pages: usize) -> Result<Vec<RangeGroup>> {
    if size <= 0 {
        return Err(PagewerkError::InvalidRange(format!(
            "chunk size must be positive, got {size}"
        )));
    }
    let size = usize::try_from(size).unwrap_or(usize::MAX);

    Ok((0..total_pages)
        .step_by(size)
        .map(|start| RangeGroup::span(start, start.saturating_add(size - 1).min(total_pages - 1)))
        .collect())
}

// -- Wire form --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
    Ranges,
    Chunks,
}

/// `spec` arrives either as a range expression or as a chunk size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    Int(i64),
    Text(String),
}

/// A split request as received from a caller:
/// `{ "mode": "ranges" | "chunks", "spec": ..., "total_pages": n }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRequest {
    pub mode: RangeMode,
    pub spec: RangeValue,
    #[serde(alias = "totalPages")]
    pub total_pages: usize,
}

impl RangeRequest {
    /// Interpret `spec` according to `mode`.
    pub fn range_spec(&self) -> Result<RangeSpec> {
        match (self.mode, &self.spec) {
            (RangeMode::Ranges, RangeValue::Text(expr)) => Ok(RangeSpec::Ranges(expr.clone())),
            (RangeMode::Ranges, RangeValue::Int(page)) => Ok(RangeSpec::Ranges(page.to_string())),
            (RangeMode::Chunks, RangeValue::Int(size)) => Ok(RangeSpec::Chunks(*size)),
            (RangeMode::Chunks, RangeValue::Text(raw)) => raw
                .trim()
                .parse()
                .map(RangeSpec::Chunks)
                .map_err(|_| {
                    PagewerkError::InvalidRange(format!("chunk size {raw:?} is not an integer"))
                }),
        }
    }

    pub fn resolve(&self) -> Result<Vec<RangeGroup>> {
        resolve(&self.range_spec()?, self.total_pages)
    }
}
