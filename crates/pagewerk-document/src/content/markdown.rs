// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Markdown: reduce a Markdown document to plain paragraphs.
//
// Formatting is not rendered; markers are stripped so the text reads cleanly.
// Headings, list items and block quotes each become their own paragraph, and
// every line of a fenced code block is kept verbatim as a paragraph.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.*?)\s*#*\s*$").expect("valid heading regex"));

static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+(?:\[[ xX]\]\s+)?(.*)$").expect("valid bullet regex"));

static ORDERED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").expect("valid ordered list regex"));

static RULE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*_]\s*){3,}$").expect("valid rule regex"));

static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid image regex"));

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("valid link regex"));

static CODE_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid code span regex"));

static STRONG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*]+)\*\*|\b__([^_]+)__\b").expect("valid strong emphasis regex")
});

static EMPHASIS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s][^*]*)\*|\b_([^_\s][^_]*)_\b").expect("valid emphasis regex")
});

static STRIKE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~]+)~~").expect("valid strikethrough regex"));

/// Split a Markdown document into plain-text paragraphs.
pub fn paragraphs(source: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut fence: Option<&str> = None;

    for raw in source.lines() {
        let line = raw.trim();

        if let Some(marker) = fence {
            if line.starts_with(marker) {
                fence = None;
            } else if !line.is_empty() {
                out.push(raw.trim_end().to_string());
            }
            continue;
        }

        if line.starts_with("```") || line.starts_with("~~~") {
            flush(&mut current, &mut out);
            fence = Some(&line[..3]);
            continue;
        }

        if line.is_empty() || RULE_REGEX.is_match(line) {
            flush(&mut current, &mut out);
            continue;
        }

        let quoted = line.trim_start_matches('>').trim_start();
        if quoted.len() != line.len() && quoted.is_empty() {
            flush(&mut current, &mut out);
            continue;
        }

        if let Some(caps) = HEADING_REGEX.captures(quoted) {
            flush(&mut current, &mut out);
            push_inline(&mut out, &caps[1]);
        } else if let Some(caps) = BULLET_REGEX.captures(quoted) {
            flush(&mut current, &mut out);
            push_inline(&mut out, &format!("- {}", &caps[1]));
        } else if let Some(caps) = ORDERED_REGEX.captures(quoted) {
            flush(&mut current, &mut out);
            push_inline(&mut out, &format!("{}. {}", &caps[1], &caps[2]));
        } else {
            current.push(strip_inline(quoted));
        }
    }
    flush(&mut current, &mut out);

    out
}

fn flush(current: &mut Vec<String>, out: &mut Vec<String>) {
    if !current.is_empty() {
        out.push(current.join(" "));
        current.clear();
    }
}

fn push_inline(out: &mut Vec<String>, text: &str) {
    let text = strip_inline(text);
    if !text.is_empty() {
        out.push(text);
    }
}

/// Remove inline markup, keeping the visible text.
fn strip_inline(text: &str) -> String {
    let text = IMAGE_REGEX.replace_all(text, "$1");
    let text = LINK_REGEX.replace_all(&text, "$1");
    let text = CODE_SPAN_REGEX.replace_all(&text, "$1");
    let text = STRONG_REGEX.replace_all(&text, "$1$2");
    let text = EMPHASIS_REGEX.replace_all(&text, "$1$2");
    let text = STRIKE_REGEX.replace_all(&text, "$1");
    text.trim().to_string()
}
