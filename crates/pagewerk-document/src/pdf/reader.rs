// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open, split, merge and compress existing PDF documents using
// the `lopdf` crate.
//
// Splitting is driven by the page-range resolver: a request is resolved into
// groups of 0-based page indices first, and only then is any page copied, so
// an invalid request never produces partial output.

use std::collections::HashMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_layout::{RangeGroup, RangeSpec, resolve};
use tracing::{debug, info, instrument, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Reads and manipulates existing PDF files.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PagewerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            PagewerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Splitting ------------------------------------------------------------

    /// Resolve `spec` against this document and extract one PDF per group,
    /// in group order.
    #[instrument(skip(self), fields(total_pages = self.page_count()))]
    pub fn split(&self, spec: &RangeSpec) -> Result<Vec<Vec<u8>>> {
        let groups = resolve(spec, self.page_count())?;
        info!(groups = groups.len(), "Splitting PDF");

        groups.iter().map(|group| self.extract_group(group)).collect()
    }

    /// Copy the pages of `group`, in group order, into a new document.
    ///
    /// Indices are 0-based. Repeated indices produce repeated pages.
    #[instrument(skip(self), fields(group = %group))]
    pub fn extract_group(&self, group: &RangeGroup) -> Result<Vec<u8>> {
        let pages = self.document.get_pages();
        let page_ids: Vec<ObjectId> = group
            .indices()
            .iter()
            .map(|&index| {
                u32::try_from(index + 1)
                    .ok()
                    .and_then(|number| pages.get(&number).copied())
                    .ok_or_else(|| {
                        PagewerkError::InvalidRange(format!(
                            "page index {} out of range (document has {} pages)",
                            index,
                            pages.len()
                        ))
                    })
            })
            .collect::<Result<_>>()?;

        let mut new_doc = empty_document();
        let mut copied = HashMap::new();
        for page_id in page_ids {
            clone_page_into(&self.document, &mut new_doc, page_id, &mut copied)?;
        }

        let output = serialise(&mut new_doc, "extracted pages")?;
        debug!(pages = group.len(), output_bytes = output.len(), "Group extracted");
        Ok(output)
    }

    // -- Merging --------------------------------------------------------------

    /// Merge this document with one or more other PDF byte-slices, producing a
    /// combined PDF. Pages appear in the order: self, then each supplied
    /// document in order.
    #[instrument(skip_all, fields(additional_count = others.len()))]
    pub fn merge(&self, others: &[&[u8]]) -> Result<Vec<u8>> {
        info!(
            base_pages = self.page_count(),
            additional_documents = others.len(),
            "Merging PDFs"
        );

        let mut merged = self.document.clone();

        for (index, other_bytes) in others.iter().enumerate() {
            let other_doc = Document::load_mem(other_bytes).map_err(|err| {
                PagewerkError::PdfError(format!(
                    "failed to load additional PDF #{}: {}",
                    index + 1,
                    err
                ))
            })?;

            // get_pages() is keyed by page number, so iteration is in page order
            let mut copied = HashMap::new();
            for page_id in other_doc.get_pages().into_values() {
                clone_page_into(&other_doc, &mut merged, page_id, &mut copied)?;
            }
        }

        let output = serialise(&mut merged, "merged PDF")?;
        debug!(
            pages = merged.get_pages().len(),
            output_bytes = output.len(),
            "Merge complete"
        );
        Ok(output)
    }

    // -- Compression ----------------------------------------------------------

    /// Drop unreachable objects and compress every stream.
    #[instrument(skip(self))]
    pub fn compress(&self) -> Result<Vec<u8>> {
        let mut doc = self.document.clone();
        let pruned = doc.prune_objects();
        doc.delete_zero_length_streams();
        doc.compress();

        let output = serialise(&mut doc, "compressed PDF")?;
        info!(
            pruned_objects = pruned.len(),
            output_bytes = output.len(),
            "PDF compressed"
        );
        Ok(output)
    }
}

// -- Helpers ------------------------------------------------------------------

fn serialise(doc: &mut Document, what: &str) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|err| PagewerkError::PdfError(format!("failed to serialise {}: {}", what, err)))?;
    Ok(output)
}

/// A document with an empty page tree, ready to receive cloned pages.
fn empty_document() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Object ID of the target's root /Pages node.
fn page_tree_root(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .map_err(|err| PagewerkError::PdfError(format!("no catalog: {}", err)))?
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|err| PagewerkError::PdfError(format!("no /Pages reference: {}", err)))
}

/// Clone a single page (and everything it references) from `source` into
/// `target`, appending it as the last page.
///
/// `copied` maps source object IDs to their clones, so resources shared
/// between pages are copied once and reference cycles terminate.
fn clone_page_into(
    source: &Document,
    target: &mut Document,
    page_id: ObjectId,
    copied: &mut HashMap<ObjectId, ObjectId>,
) -> Result<()> {
    let page = source.get_dictionary(page_id).map_err(|err| {
        PagewerkError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
    })?;

    let mut page_dict = page.clone();
    for key in INHERITABLE {
        if !page_dict.has(key)
            && let Some(value) = inherited_attribute(source, page, key)
        {
            page_dict.set(key.to_vec(), value);
        }
    }

    // back-references to the page (e.g. an annotation's /P) resolve to the clone
    let cloned_id = target.new_object_id();
    copied.insert(page_id, cloned_id);
    let cloned = deep_clone_object(source, target, &Object::Dictionary(page_dict), copied)?;
    target.objects.insert(cloned_id, cloned);

    let pages_id = page_tree_root(target)?;

    // Add page reference to the /Kids array and bump /Count.
    if let Ok(pages_dict) = target.get_dictionary_mut(pages_id) {
        if let Ok(Object::Array(kids)) = pages_dict.get_mut(b"Kids") {
            kids.push(Object::Reference(cloned_id));
        }
        if let Ok(Object::Integer(count)) = pages_dict.get_mut(b"Count") {
            *count += 1;
        }
    }

    if let Ok(page_dict) = target.get_dictionary_mut(cloned_id) {
        page_dict.set("Parent", Object::Reference(pages_id));
    }

    Ok(())
}

/// Look up `key` on the ancestors of `page` in the source page tree.
fn inherited_attribute(source: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut node = page;
    // page trees are shallow; the bound only guards against malformed cycles
    for _ in 0..32 {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = source.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
    }
    None
}

/// Deep-clone a single lopdf Object, recursively resolving references (except
/// /Parent, which the caller patches).
fn deep_clone_object(
    source: &Document,
    target: &mut Document,
    object: &Object,
    copied: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match object {
        Object::Dictionary(dict) => Ok(Object::Dictionary(clone_dictionary(
            source, target, dict, copied,
        )?)),
        Object::Array(items) => {
            let mut new_items = Vec::with_capacity(items.len());
            for item in items {
                new_items.push(deep_clone_object(source, target, item, copied)?);
            }
            Ok(Object::Array(new_items))
        }
        Object::Reference(ref_id) => {
            if let Some(existing) = copied.get(ref_id) {
                return Ok(Object::Reference(*existing));
            }
            match source.get_object(*ref_id) {
                Ok(referenced) => {
                    // reserve the ID first so cycles resolve to it
                    let new_id = target.new_object_id();
                    copied.insert(*ref_id, new_id);
                    let cloned = deep_clone_object(source, target, referenced, copied)?;
                    target.objects.insert(new_id, cloned);
                    Ok(Object::Reference(new_id))
                }
                Err(err) => {
                    warn!(?ref_id, %err, "Cannot resolve reference, using Null");
                    Ok(Object::Null)
                }
            }
        }
        Object::Stream(stream) => {
            let dict = clone_dictionary(source, target, &stream.dict, copied)?;
            let mut cloned = Stream::new(dict, stream.content.clone());
            cloned.allows_compression = stream.allows_compression;
            Ok(Object::Stream(cloned))
        }
        other => Ok(other.clone()),
    }
}

fn clone_dictionary(
    source: &Document,
    target: &mut Document,
    dict: &Dictionary,
    copied: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if key == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), deep_clone_object(source, target, value, copied)?);
    }
    Ok(new_dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::writer::PdfWriter;
    use pagewerk_core::types::{FontId, PageGeometry};
    use pretty_assertions::assert_eq;

    /// A small-page PDF with `pages` pages, where page N carries the text
    /// "page N" and nothing else.
    fn numbered_pdf(pages: usize) -> Vec<u8> {
        // 100pt tall page, 10pt margins and 40pt lines fit two units per
        // page: one paragraph and the spacer after it
        let geometry =
            PageGeometry::new(200.0, 100.0, 10.0, FontId::helvetica(), 10.0, 4.0).unwrap();
        let writer = PdfWriter::new(geometry).unwrap();
        let paragraphs: Vec<String> = (1..=pages).map(|n| format!("page {n}")).collect();
        writer.create_from_paragraphs(&paragraphs).unwrap()
    }

    /// Text drawn on each page of `bytes`, in page order.
    fn page_texts(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .into_keys()
            .map(|number| doc.extract_text(&[number]).unwrap().trim().to_string())
            .collect()
    }

    #[test]
    fn counts_pages() {
        let reader = PdfReader::from_bytes(&numbered_pdf(4)).unwrap();
        assert_eq!(reader.page_count(), 4);
        assert_eq!(reader.source_path(), None);
    }

    #[test]
    fn opens_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("four.pdf");
        std::fs::write(&path, numbered_pdf(4)).unwrap();

        let reader = PdfReader::open(&path).unwrap();
        assert_eq!(reader.page_count(), 4);
        assert!(reader.source_path().is_some());
    }

    #[test]
    fn garbage_is_a_pdf_error() {
        let err = PdfReader::from_bytes(b"not a pdf").err().unwrap();
        assert!(matches!(err, PagewerkError::PdfError(_)));
    }

    #[test]
    fn chunked_split_produces_one_document_per_group() {
        let reader = PdfReader::from_bytes(&numbered_pdf(5)).unwrap();
        let parts = reader.split(&RangeSpec::Chunks(2)).unwrap();
        let counts: Vec<usize> = parts
            .iter()
            .map(|bytes| PdfReader::from_bytes(bytes).unwrap().page_count())
            .collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn extracted_pages_keep_group_order() {
        let reader = PdfReader::from_bytes(&numbered_pdf(5)).unwrap();
        let parts = reader.split(&RangeSpec::Ranges("4-5,1".into())).unwrap();
        assert_eq!(parts.len(), 2);

        let first = page_texts(&parts[0]);
        assert_eq!(first.len(), 2);
        assert!(first[0].contains("page 4"));
        assert!(first[1].contains("page 5"));

        let second = page_texts(&parts[1]);
        assert_eq!(second.len(), 1);
        assert!(second[0].contains("page 1"));
    }

    #[test]
    fn invalid_split_produces_nothing() {
        let reader = PdfReader::from_bytes(&numbered_pdf(3)).unwrap();
        let err = reader.split(&RangeSpec::Ranges("1,7".into())).unwrap_err();
        assert!(matches!(err, PagewerkError::InvalidRange(_)));
    }

    #[test]
    fn merge_appends_pages_in_order() {
        let first = numbered_pdf(2);
        let second = numbered_pdf(3);
        let reader = PdfReader::from_bytes(&first).unwrap();
        let merged = reader.merge(&[second.as_slice()]).unwrap();
        let texts = page_texts(&merged);
        let expected = ["page 1", "page 2", "page 1", "page 2", "page 3"];
        assert_eq!(texts.len(), expected.len());
        for (text, expected) in texts.iter().zip(expected) {
            assert!(text.contains(expected), "{text:?} should contain {expected:?}");
        }
    }

    #[test]
    fn merge_rejects_garbage() {
        let reader = PdfReader::from_bytes(&numbered_pdf(1)).unwrap();
        let err = reader.merge(&[b"junk".as_slice()]).unwrap_err();
        assert!(matches!(err, PagewerkError::PdfError(_)));
    }

    #[test]
    fn compress_keeps_every_page() {
        let reader = PdfReader::from_bytes(&numbered_pdf(6)).unwrap();
        let compressed = reader.compress().unwrap();
        assert_eq!(PdfReader::from_bytes(&compressed).unwrap().page_count(), 6);
    }
}
