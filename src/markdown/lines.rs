// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use super::inline::{inline_runs, InlineRuns};

/// A classified prose line, marker stripped, inline spans resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBlock {
    Heading2(InlineRuns),
    Heading3(InlineRuns),
    Bullet(InlineRuns),
    Numbered { number: String, runs: InlineRuns },
    Blank,
    Paragraph(InlineRuns),
}

fn numbered_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.\s+").expect("valid numbered-list regex"))
}

/// Classifies every line of a prose segment.
///
/// Prefix priority: `### ` heading, `## ` heading, bullet (`- `/`* `),
/// numbered (`1. `), blank, paragraph. The longer heading marker is checked
/// first so `### ` never reads as a level-2 heading with a stray `#`.
pub fn classify_lines(text: &str) -> Vec<LineBlock> {
    text.split('\n')
        .map(|line| classify_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn classify_line(line: &str) -> LineBlock {
    if let Some(rest) = line.strip_prefix("### ") {
        return LineBlock::Heading3(inline_runs(rest));
    }

    if let Some(rest) = line.strip_prefix("## ") {
        return LineBlock::Heading2(inline_runs(rest));
    }

    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        return LineBlock::Bullet(inline_runs(rest));
    }

    if let Some(captures) = numbered_marker().captures(trimmed) {
        let number = captures[1].to_owned();
        let rest = &trimmed[captures[0].len()..];
        return LineBlock::Numbered {
            number,
            runs: inline_runs(rest),
        };
    }

    if trimmed.is_empty() {
        return LineBlock::Blank;
    }

    LineBlock::Paragraph(inline_runs(line))
}
