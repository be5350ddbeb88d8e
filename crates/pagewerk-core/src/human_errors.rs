// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whoever requested the conversion.
//
// Every technical error is mapped to a plain sentence with a clear suggestion.
// The core engine never logs or retries; this mapping is for the outer layer.

use crate::error::PagewerkError;

/// Severity of an error from the requester's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup or similar, retrying may help.
    Transient,
    /// The request must be changed (different page range, margins, font).
    ActionRequired,
    /// The input cannot be converted at all.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    /// Whether repeating the identical request could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `PagewerkError` into a `HumanError`.
pub fn humanize_error(err: &PagewerkError) -> HumanError {
    match err {
        // -- Layout errors --
        PagewerkError::LayoutImpossible(detail) => HumanError {
            message: "The page settings leave no room for text.".into(),
            suggestion: format!("Use smaller margins, a smaller font or a larger paper size. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::InvalidRange(detail) => HumanError {
            message: "That page selection doesn't match the document.".into(),
            suggestion: format!(
                "Use page numbers like \"1-3,5\" that exist in the document, or a positive number of pages per file. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::MetricsUnavailable(detail) => HumanError {
            message: "The requested font isn't available.".into(),
            suggestion: format!("Choose Helvetica, Times-Roman or Courier instead. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Document errors --
        PagewerkError::UnsupportedDocument(detail) => HumanError {
            message: "This type of document isn't supported.".into(),
            suggestion: format!("Try saving the file as plain text, CSV or PDF first. (File type: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        PagewerkError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged. Try opening it in a PDF viewer first to check it works, or try a different file.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        PagewerkError::ContentError(_) => HumanError {
            message: "The file's contents couldn't be read.".into(),
            suggestion: "Check that the file is not damaged and that text files are saved as UTF-8.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        PagewerkError::MissingInput(detail) => HumanError {
            message: "Nothing was given to work on.".into(),
            suggestion: format!("Name at least one input file. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Configuration / persistence --
        PagewerkError::Config(detail) => HumanError {
            message: "The configuration file has a problem.".into(),
            suggestion: format!("Fix or remove the configuration file. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "There is no permission to read or write that file.".into(),
                    suggestion: "Check the file permissions, or choose a different output location.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        PagewerkError::Serialization(_) => HumanError {
            message: "A settings file couldn't be understood.".into(),
            suggestion: "Check that the file is valid JSON.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
