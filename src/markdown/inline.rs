// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

/// One run of a processed line, in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineRun {
    Plain(String),
    /// Text between a balanced `**` pair.
    Emphasis(String),
    /// Text between a balanced backtick pair.
    Code(String),
}

impl InlineRun {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Emphasis(text) | Self::Code(text) => text,
        }
    }
}

/// Most lines carry a couple of styled spans at most.
pub type InlineRuns = SmallVec<[InlineRun; 4]>;

/// Splits a single line into plain/emphasis/code runs.
///
/// Spans do not nest and do not overlap; the earliest opening delimiter wins.
/// An opening delimiter without a matching closer is literal text, asterisks
/// and all — unbalanced markup must never swallow characters.
pub fn inline_runs(line: &str) -> InlineRuns {
    let mut runs = InlineRuns::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(close) = after.find("**") {
                flush_plain(&mut runs, &mut plain);
                runs.push(InlineRun::Emphasis(after[..close].to_owned()));
                rest = &after[close + 2..];
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('`') {
            if let Some(close) = after.find('`') {
                flush_plain(&mut runs, &mut plain);
                runs.push(InlineRun::Code(after[..close].to_owned()));
                rest = &after[close + 1..];
                continue;
            }
        }

        let mut chars = rest.chars();
        // Unwrap is fine: the loop guard keeps `rest` non-empty.
        let ch = chars.next().expect("non-empty rest");
        plain.push(ch);
        rest = chars.as_str();
    }

    flush_plain(&mut runs, &mut plain);
    runs
}

fn flush_plain(runs: &mut InlineRuns, plain: &mut String) {
    if !plain.is_empty() {
        runs.push(InlineRun::Plain(std::mem::take(plain)));
    }
}
