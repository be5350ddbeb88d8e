// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tabular sources: CSV via the `csv` crate and spreadsheets via `calamine`
// (behind the "excel" feature). Both produce plain records of cell strings;
// the header decision and row caps belong to the table layout.

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_layout::RowLimit;
use tracing::debug;

/// Read CSV records. Rows may have differing lengths; blank rows are skipped.
///
/// Reading stops once `limit` records have been collected, so a cap keeps
/// huge inputs from being decoded in full.
pub fn csv_records(bytes: &[u8], limit: RowLimit) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        if let RowLimit::AtMost(max) = limit
            && records.len() >= max
        {
            break;
        }
        let record = result.map_err(|err| {
            PagewerkError::ContentError(format!("CSV record {}: {}", index + 1, err))
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(record.iter().map(str::to_string).collect());
    }

    debug!(records = records.len(), "CSV decoded");
    Ok(records)
}

/// Read the first worksheet of an XLSX, XLS or ODS workbook.
#[cfg(feature = "excel")]
pub fn excel_records(bytes: &[u8], limit: RowLimit) -> Result<Vec<Vec<String>>> {
    use std::io::Cursor;

    use calamine::{Reader, open_workbook_auto_from_rs};

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|err| {
        PagewerkError::ContentError(format!("failed to read workbook: {}", err))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PagewerkError::ContentError("workbook has no worksheets".into()))?
        .map_err(|err| PagewerkError::ContentError(format!("failed to read worksheet: {}", err)))?;

    let mut records = Vec::new();
    for row in range.rows() {
        if let RowLimit::AtMost(max) = limit
            && records.len() >= max
        {
            break;
        }
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        records.push(cells);
    }

    debug!(records = records.len(), "Worksheet decoded");
    Ok(records)
}

#[cfg(feature = "excel")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => format_float(*n),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::Error(err) => format!("#{:?}", err),
    }
}

/// Integral floats print without a fractional part.
#[cfg(feature = "excel")]
fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
