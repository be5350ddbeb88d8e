// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX: reduce a WordprocessingML document to plain paragraphs.
//
// Only the main document part is read. Each `w:p` becomes one paragraph built
// from its `w:t` runs; breaks and tabs become spaces. Styles, numbering,
// tables and drawings are not interpreted.

use std::io::{BufRead, BufReader, Cursor};

use pagewerk_core::error::{PagewerkError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the paragraphs of a DOCX archive, in document order.
///
/// Paragraphs without any text are dropped.
pub fn paragraphs(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|err| {
        PagewerkError::ContentError(format!("not a DOCX archive: {err}"))
    })?;

    let part = archive.by_name(DOCUMENT_PART).map_err(|err| match err {
        ZipError::FileNotFound => {
            PagewerkError::ContentError(format!("archive has no {DOCUMENT_PART}"))
        }
        other => PagewerkError::ContentError(format!("failed to read {DOCUMENT_PART}: {other}")),
    })?;

    let paragraphs = read_paragraphs(BufReader::new(part))?;
    debug!(paragraphs = paragraphs.len(), "DOCX decoded");
    Ok(paragraphs)
}

fn read_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    // Text boxes nest paragraphs inside runs of an outer paragraph.
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text = !open.is_empty(),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"br" | b"cr" | b"tab" => {
                    if let Some(paragraph) = open.last_mut() {
                        paragraph.push(' ');
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(paragraph) = open.pop() {
                        let text = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
                        if !text.is_empty() {
                            paragraphs.push(text);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| {
                    PagewerkError::ContentError(format!("bad text in {DOCUMENT_PART}: {err}"))
                })?;
                if let Some(paragraph) = open.last_mut() {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(PagewerkError::ContentError(format!(
                    "malformed {DOCUMENT_PART}: {err}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Build a minimal DOCX archive whose body holds one paragraph per entry.
#[cfg(test)]
pub(crate) fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
        .collect();
    archive_with_document(&body)
}

#[cfg(test)]
fn archive_with_document(body: &str) -> Vec<u8> {
    use std::io::Write;

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{body}</w:body>
</w:document>"#
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types/>"#)
        .unwrap();
    zip.start_file(DOCUMENT_PART, SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}
