// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content decomposition: turns raw input documents into the paragraphs or
// table records the layout engine consumes.

pub mod docx;
pub mod html;
pub mod markdown;
pub mod tabular;
pub mod text;

use pagewerk_core::error::{PagewerkError, Result};

/// Decode input bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|err| {
        PagewerkError::ContentError(format!(
            "input is not valid UTF-8 (byte {}): {}",
            err.valid_up_to(),
            err
        ))
    })
}
