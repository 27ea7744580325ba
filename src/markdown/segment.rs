// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use memchr::memmem;
use smol_str::SmolStr;

const FENCE: &str = "```";

/// One span of a response buffer, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside any fence, verbatim.
    Prose { text: String },
    Fenced(FencedBlock),
}

/// A fenced block: code sample or layout directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// The exact source slice including both fence markers. Kept so the
    /// segmentation is lossless even while the buffer is still streaming in.
    raw: String,
    /// Tag text following the opening fence on the same line, if any.
    language: Option<SmolStr>,
    /// Inner text between the opening fence line and the closing marker.
    body: String,
    /// False while the stream has opened this fence but not yet closed it.
    closed: bool,
}

impl FencedBlock {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn closed(&self) -> bool {
        self.closed
    }
}

impl Segment {
    /// The exact source text of this segment.
    pub fn source(&self) -> &str {
        match self {
            Self::Prose { text } => text,
            Self::Fenced(block) => &block.raw,
        }
    }
}

/// Splits a response buffer into alternating prose and fenced segments.
///
/// A fence opens at a line-initial ``` marker, optionally followed by a
/// language tag on the same line, and runs to the next line-initial ```
/// marker. The buffer may end mid-fence (the stream has not closed it yet);
/// that yields a best-effort open block rather than dropping the tail.
///
/// Concatenating [`Segment::source`] over the result reproduces the input
/// exactly.
pub fn segment_response(text: &str) -> Vec<Segment> {
    let bytes = text.as_bytes();
    let finder = memmem::Finder::new(FENCE);

    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(open) = next_line_initial_fence(&finder, bytes, cursor) {
        if open > cursor {
            segments.push(Segment::Prose {
                text: text[cursor..open].to_owned(),
            });
        }

        let tag_start = open + FENCE.len();
        let (tag_end, body_start) = match memchr::memchr(b'\n', &bytes[tag_start..]) {
            Some(rel) => (tag_start + rel, tag_start + rel + 1),
            // Open line runs to end of buffer: empty body, still streaming.
            None => (bytes.len(), bytes.len()),
        };

        let language = parse_language_tag(&text[tag_start..tag_end]);

        let (body_end, raw_end, closed) =
            match next_line_initial_fence(&finder, bytes, body_start) {
                Some(close) => (close, close + FENCE.len(), true),
                None => (bytes.len(), bytes.len(), false),
            };

        segments.push(Segment::Fenced(FencedBlock {
            raw: text[open..raw_end].to_owned(),
            language,
            body: text[body_start..body_end].to_owned(),
            closed,
        }));

        cursor = raw_end;
    }

    if cursor < bytes.len() {
        segments.push(Segment::Prose {
            text: text[cursor..].to_owned(),
        });
    }

    segments
}

fn next_line_initial_fence(finder: &memmem::Finder<'_>, bytes: &[u8], from: usize) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }

    for pos in finder.find_iter(&bytes[from..]) {
        let abs = from + pos;
        if abs == 0 || bytes[abs - 1] == b'\n' {
            return Some(abs);
        }
    }

    None
}

fn parse_language_tag(raw: &str) -> Option<SmolStr> {
    let tag = raw.trim_end_matches('\r').trim();
    if tag.is_empty() {
        None
    } else {
        Some(SmolStr::new(tag))
    }
}
