// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::Canvas;
use super::LineSpan;
use crate::layout::{self, FrameLine, ZoneGeometry};
use crate::model::LayoutDirective;

const HIGHLIGHT_FILL: char = '░';
const DOT: char = 'o';
const DOT_EMPHASIZED: char = '●';

/// Rendered schematic text plus the spans of the emphasized zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicRender {
    pub text: String,
    /// Spans covering the highlighted zone, relative to `text` lines. Empty
    /// when the directive names no zone or an unrecognized one.
    pub highlight: Vec<LineSpan>,
}

/// Draws the schematic a directive asks for.
///
/// Pure and total: a missing view falls back to the side view, an unknown
/// highlight simply emphasizes nothing, a missing label draws no caption.
pub fn render_schematic(directive: &LayoutDirective) -> SchematicRender {
    let view = directive.resolved_view();
    let schematic = layout::schematic(view);

    let mut canvas = Canvas::new(schematic.width as usize, schematic.height as usize);

    let body = schematic.body;
    canvas.draw_box(body.x0 as usize, body.y0 as usize, body.x1 as usize, body.y1 as usize);

    for line in schematic.frame {
        match *line {
            FrameLine::Horizontal { y, x0, x1 } => {
                canvas.hline(x0 as usize, x1 as usize, y as usize)
            }
            FrameLine::Vertical { x, y0, y1 } => {
                canvas.vline(x as usize, y0 as usize, y1 as usize)
            }
        }
    }

    for zone in schematic.zones {
        for rect in zone.boxes {
            canvas.draw_box(rect.x0 as usize, rect.y0 as usize, rect.x1 as usize, rect.y1 as usize);
        }
        for &(x, y) in zone.dots {
            canvas.put(x as usize, y as usize, DOT);
        }
    }

    let emphasized = directive
        .highlight()
        .and_then(|id| layout::zone(view, id));

    if let Some(zone) = emphasized {
        for rect in zone.boxes {
            canvas.fill_interior(
                rect.x0 as usize,
                rect.y0 as usize,
                rect.x1 as usize,
                rect.y1 as usize,
                HIGHLIGHT_FILL,
            );
        }
        for &(x, y) in zone.dots {
            canvas.put(x as usize, y as usize, DOT_EMPHASIZED);
        }
        if zone.id == "screen" {
            write_screen_mark(&mut canvas, zone);
        }
    }

    let mut lines = vec![format!("View: {}", view.caption())];
    // Canvas rows start on line 1; spans below use the same offset.
    let canvas_offset = lines.len();
    lines.extend(canvas.to_lines());

    if let Some(label) = directive.label() {
        lines.push(format!("▸ {label}"));
    }

    lines.push(format!(
        "Generic {} layout. Locations may vary slightly by model.",
        view.as_str()
    ));

    let highlight = emphasized
        .map(|zone| highlight_spans(zone, canvas_offset))
        .unwrap_or_default();

    SchematicRender {
        text: lines.join("\n"),
        highlight,
    }
}

fn write_screen_mark(canvas: &mut Canvas, zone: &ZoneGeometry) {
    let Some(rect) = zone.boxes.first() else {
        return;
    };
    let mid_x = (rect.x0 as usize + rect.x1 as usize) / 2;
    let mid_y = (rect.y0 as usize + rect.y1 as usize) / 2;
    canvas.put_str(mid_x.saturating_sub(1), mid_y, "LCD");
}

fn highlight_spans(zone: &ZoneGeometry, canvas_offset: usize) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    for rect in zone.boxes {
        for y in rect.y0..=rect.y1 {
            spans.push((canvas_offset + y as usize, rect.x0 as usize, rect.x1 as usize));
        }
    }
    for &(x, y) in zone.dots {
        spans.push((canvas_offset + y as usize, x as usize, x as usize));
    }
    spans
}

#[cfg(test)]
mod tests {
    use smol_str::SmolStr;

    use super::render_schematic;
    use crate::model::{CameraView, LayoutDirective};

    fn directive(
        view: Option<CameraView>,
        highlight: Option<&str>,
        label: Option<&str>,
    ) -> LayoutDirective {
        LayoutDirective::new(
            view,
            highlight.map(SmolStr::new),
            label.map(str::to_owned),
        )
    }

    #[test]
    fn rear_battery_is_emphasized_with_caption() {
        let render = render_schematic(&directive(
            Some(CameraView::Rear),
            Some("battery"),
            Some("Main Battery"),
        ));

        assert!(render.text.starts_with("View: Rear/Utility Panel\n"));
        assert!(render.text.contains("▸ Main Battery"));

        // Battery interior: rect (16,3)-(35,9) → 18x5 shaded cells.
        let shaded = render.text.chars().filter(|&c| c == '░').count();
        assert_eq!(shaded, 90);
        assert!(!render.highlight.is_empty());
    }

    #[test]
    fn unknown_zone_emphasizes_nothing() {
        let render = render_schematic(&directive(
            Some(CameraView::Rear),
            Some("flux-capacitor"),
            Some("???"),
        ));

        assert!(!render.text.contains('░'));
        assert!(render.highlight.is_empty());
        // The caption still shows; an unknown zone is not an error.
        assert!(render.text.contains("▸ ???"));
    }

    #[test]
    fn zones_from_the_other_view_do_not_leak() {
        // "ports" only exists on the rear view.
        let render = render_schematic(&directive(Some(CameraView::Side), Some("ports"), None));
        assert!(render.highlight.is_empty());
    }

    #[test]
    fn missing_view_draws_the_side_schematic() {
        let render = render_schematic(&directive(None, Some("dial"), None));
        assert!(render.text.starts_with("View: Operator/AC Side\n"));
        assert!(!render.highlight.is_empty());
    }

    #[test]
    fn missing_label_draws_no_caption_line() {
        let render = render_schematic(&directive(Some(CameraView::Rear), Some("ports"), None));
        assert!(!render.text.contains('▸'));
        assert!(render.text.ends_with("Generic rear layout. Locations may vary slightly by model."));
    }

    #[test]
    fn screen_highlight_shows_the_lcd_mark() {
        let render = render_schematic(&directive(Some(CameraView::Side), Some("screen"), None));
        assert!(render.text.contains("LCD"));

        let other = render_schematic(&directive(Some(CameraView::Side), Some("dial"), None));
        assert!(!other.text.contains("LCD"));
    }

    #[test]
    fn highlighted_port_sockets_switch_glyphs() {
        let render = render_schematic(&directive(Some(CameraView::Rear), Some("ports"), None));
        assert!(render.text.contains('●'));

        let plain = render_schematic(&directive(Some(CameraView::Rear), Some("battery"), None));
        assert!(!plain.text.contains('●'));
        assert!(plain.text.contains('o'));
    }

    #[test]
    fn rendering_is_idempotent() {
        let d = directive(Some(CameraView::Rear), Some("battery"), Some("Main Battery"));
        assert_eq!(render_schematic(&d), render_schematic(&d));
    }

    #[test]
    fn highlight_spans_land_inside_their_lines() {
        let render = render_schematic(&directive(
            Some(CameraView::Side),
            Some("top-buttons"),
            None,
        ));
        let lines: Vec<&str> = render.text.split('\n').collect();
        for &(y, x0, x1) in &render.highlight {
            assert!(x0 <= x1);
            let len = lines[y].chars().count();
            assert!(x1 < len, "span ({y},{x0},{x1}) exceeds line length {len}");
        }
    }
}
