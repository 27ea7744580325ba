// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;
use smol_str::SmolStr;

use crate::model::{CameraView, LayoutDirective};

/// The reserved fence tag for camera-layout directives.
pub const LAYOUT_KEYWORD: &str = "layout";

/// What a fenced block turned out to be.
///
/// Malformed directives are an expected, frequent case — the model is only
/// instructed, not guaranteed, to emit well-formed JSON — so this is a tagged
/// result, not an error path. `Fallback` borrows the original body and tag so
/// the block can be shown exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveOutcome<'a> {
    Directive(LayoutDirective),
    Fallback {
        language: Option<&'a str>,
        body: &'a str,
    },
}

/// Decides whether a fenced block is a layout directive or a code sample.
///
/// A block qualifies for directive parsing when its tag equals
/// [`LAYOUT_KEYWORD`] or its body mentions the `"view":` key (the model
/// sometimes drops the tag but keeps the payload). The body may repeat the
/// keyword before the JSON; that prefix is stripped before decoding. Anything
/// that fails to decode, or decodes to an object naming neither a view nor a
/// highlight, falls back to a plain code block.
pub fn parse_directive_block<'a>(
    language: Option<&'a str>,
    body: &'a str,
) -> DirectiveOutcome<'a> {
    let fallback = DirectiveOutcome::Fallback { language, body };

    let tagged = language == Some(LAYOUT_KEYWORD);
    if !tagged && !body.contains("\"view\":") {
        return fallback;
    }

    let cleaned = strip_keyword_prefix(body).trim();

    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(cleaned) else {
        return fallback;
    };

    let view_raw = non_empty_str(fields.get("view"));
    let highlight = non_empty_str(fields.get("highlight"));

    if view_raw.is_none() && highlight.is_none() {
        return fallback;
    }

    // An unrecognized view string still counts as "has a view"; it just draws
    // the default side schematic with nothing emphasized.
    let view = view_raw.and_then(CameraView::parse);
    let label = non_empty_str(fields.get("label")).map(str::to_owned);

    DirectiveOutcome::Directive(LayoutDirective::new(
        view,
        highlight.map(SmolStr::new),
        label,
    ))
}

fn strip_keyword_prefix(body: &str) -> &str {
    let trimmed = body.trim_start();
    match trimmed.strip_prefix(LAYOUT_KEYWORD) {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{parse_directive_block, DirectiveOutcome, LAYOUT_KEYWORD};
    use crate::model::CameraView;

    fn expect_directive(outcome: DirectiveOutcome<'_>) -> crate::model::LayoutDirective {
        match outcome {
            DirectiveOutcome::Directive(directive) => directive,
            DirectiveOutcome::Fallback { body, .. } => {
                panic!("expected directive, fell back with body {body:?}")
            }
        }
    }

    #[test]
    fn full_directive_parses() {
        let body = r#"{"view":"rear","highlight":"battery","label":"Main Battery"}"#;
        let directive = expect_directive(parse_directive_block(Some(LAYOUT_KEYWORD), body));
        assert_eq!(directive.view(), Some(CameraView::Rear));
        assert_eq!(directive.highlight(), Some("battery"));
        assert_eq!(directive.label(), Some("Main Battery"));
    }

    #[test]
    fn untagged_block_with_view_key_parses() {
        let body = r#"{"view": "side", "highlight": "dial"}"#;
        let directive = expect_directive(parse_directive_block(Some("json"), body));
        assert_eq!(directive.view(), Some(CameraView::Side));
        assert_eq!(directive.highlight(), Some("dial"));
        assert_eq!(directive.label(), None);
    }

    #[test]
    fn leading_keyword_repetition_is_stripped() {
        let body = "layout\n{\"view\":\"side\",\"highlight\":\"screen\"}";
        let directive = expect_directive(parse_directive_block(Some(LAYOUT_KEYWORD), body));
        assert_eq!(directive.view(), Some(CameraView::Side));
        assert_eq!(directive.highlight(), Some("screen"));
    }

    #[test]
    fn schema_empty_object_falls_back_with_original_body() {
        let body = r#"{"foo": 1}"#;
        let outcome = parse_directive_block(Some(LAYOUT_KEYWORD), body);
        assert_eq!(
            outcome,
            DirectiveOutcome::Fallback {
                language: Some(LAYOUT_KEYWORD),
                body,
            }
        );
    }

    #[test]
    fn undecodable_json_falls_back_unstripped() {
        let body = "layout {\"view\": \"rear\"";
        let outcome = parse_directive_block(Some(LAYOUT_KEYWORD), body);
        assert_eq!(
            outcome,
            DirectiveOutcome::Fallback {
                language: Some(LAYOUT_KEYWORD),
                body,
            }
        );
    }

    #[test]
    fn non_layout_code_is_never_inspected() {
        let body = "fn main() {}";
        let outcome = parse_directive_block(Some("rust"), body);
        assert!(matches!(outcome, DirectiveOutcome::Fallback { .. }));
    }

    #[test]
    fn highlight_alone_is_a_valid_directive() {
        let body = r#"{"highlight": "card-slot"}"#;
        let directive = expect_directive(parse_directive_block(Some(LAYOUT_KEYWORD), body));
        assert_eq!(directive.view(), None);
        assert_eq!(directive.resolved_view(), CameraView::Side);
        assert_eq!(directive.highlight(), Some("card-slot"));
    }

    #[test]
    fn unknown_view_string_still_counts_as_a_directive() {
        let body = r#"{"view": "top"}"#;
        let directive = expect_directive(parse_directive_block(Some(LAYOUT_KEYWORD), body));
        assert_eq!(directive.view(), None);
        assert_eq!(directive.resolved_view(), CameraView::Side);
    }

    #[test]
    fn empty_string_fields_do_not_qualify() {
        let body = r#"{"view": "", "highlight": ""}"#;
        let outcome = parse_directive_block(Some(LAYOUT_KEYWORD), body);
        assert!(matches!(outcome, DirectiveOutcome::Fallback { .. }));
    }

    #[test]
    fn json_array_is_not_a_directive() {
        let body = r#"["view", "rear"]"#;
        let outcome = parse_directive_block(Some(LAYOUT_KEYWORD), body);
        assert!(matches!(outcome, DirectiveOutcome::Fallback { .. }));
    }
}
