// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parsing for the constrained markdown dialect the assistant emits.
//!
//! The pipeline is pure: every render recomputes from the authoritative
//! message buffer, so it must be cheap, idempotent, and total — malformed
//! input degrades to literal text, never to an error.

pub mod directive;
pub mod inline;
pub mod lines;
pub mod segment;

pub use directive::{parse_directive_block, DirectiveOutcome, LAYOUT_KEYWORD};
pub use inline::{inline_runs, InlineRun, InlineRuns};
pub use lines::{classify_lines, LineBlock};
pub use segment::{segment_response, FencedBlock, Segment};

use smol_str::SmolStr;

use crate::model::LayoutDirective;

/// A display-ready block of a response, produced from the raw buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock {
    /// Classified prose lines.
    Lines(Vec<LineBlock>),
    /// A generic code sample (including directive fallbacks).
    Code {
        language: Option<SmolStr>,
        body: String,
    },
    /// A parsed camera-layout directive.
    Schematic(LayoutDirective),
}

/// Runs the full parse pipeline over a (possibly still streaming) buffer.
///
/// This is a pure function of `text`; callers re-invoke it on every chunk.
pub fn parse_transcript_markup(text: &str) -> Vec<RenderedBlock> {
    segment_response(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Prose { text } => RenderedBlock::Lines(classify_lines(&text)),
            Segment::Fenced(block) => {
                match parse_directive_block(block.language(), block.body()) {
                    DirectiveOutcome::Directive(directive) => RenderedBlock::Schematic(directive),
                    DirectiveOutcome::Fallback { language, body } => RenderedBlock::Code {
                        language: language.map(SmolStr::new),
                        body: body.to_owned(),
                    },
                }
            }
        })
        .collect()
}
