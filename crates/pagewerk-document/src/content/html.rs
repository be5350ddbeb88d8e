// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTML: reduce an HTML document to plain paragraphs.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static INVISIBLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<(script|style|head|template|noscript)\b[^>]*>.*?</(script|style|head|template|noscript)\s*>")
        .expect("valid invisible element regex")
});

static BLOCK_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(p|div|br|hr|h[1-6]|li|ul|ol|tr|table|thead|tbody|tfoot|blockquote|pre|section|article|header|footer|nav|aside|main|figure|figcaption|dl|dt|dd|title|body|html)\b[^>]*>",
    )
    .expect("valid block tag regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex")
});

/// Split an HTML document into plain-text paragraphs.
///
/// Script, style and head content is dropped, block-level elements end a
/// paragraph, all remaining tags are removed and common character entities
/// are decoded.
pub fn paragraphs(source: &str) -> Vec<String> {
    let visible = INVISIBLE_REGEX.replace_all(source, " ");
    let blocks = BLOCK_TAG_REGEX.replace_all(&visible, "\n\n");

    blocks
        .split("\n\n")
        .map(|block| {
            let text = TAG_REGEX.replace_all(block, " ");
            let text = decode_entities(&text);
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

/// Decode named and numeric character references. Unknown names are kept
/// as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            decode_entity(entity).map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "euro" => '€',
        "pound" => '£',
        "deg" => '°',
        "middot" => '·',
        "bull" => '•',
        _ => return None,
    };
    Some(ch)
}
