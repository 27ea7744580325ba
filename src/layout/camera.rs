// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::CameraView;

/// A rectangle in character-cell coordinates, corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

const fn rect(x0: u16, y0: u16, x1: u16, y1: u16) -> CellRect {
    CellRect { x0, y0, x1, y1 }
}

/// A straight frame line that is part of the body outline but not a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLine {
    Horizontal { y: u16, x0: u16, x1: u16 },
    Vertical { x: u16, y0: u16, y1: u16 },
}

/// The drawable geometry of one recognized zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneGeometry {
    /// Wire identifier, exactly as the directive schema spells it.
    pub id: &'static str,
    /// Outlined areas belonging to the zone.
    pub boxes: &'static [CellRect],
    /// Single-cell features (buttons, port sockets).
    pub dots: &'static [(u16, u16)],
}

/// The complete fixed schematic for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSchematic {
    pub view: CameraView,
    pub width: u16,
    pub height: u16,
    /// The camera body outline.
    pub body: CellRect,
    /// Extra outline strokes (e.g. the top handle).
    pub frame: &'static [FrameLine],
    pub zones: &'static [ZoneGeometry],
}

// Operator/AC side: lens mount to the left, battery plate to the right,
// handle on top. Proportions follow the reference schematic, quantized to a
// 50x15 cell grid.
const SIDE_ZONES: &[ZoneGeometry] = &[
    ZoneGeometry {
        id: "screen",
        boxes: &[rect(14, 4, 26, 9)],
        dots: &[],
    },
    ZoneGeometry {
        id: "dial",
        boxes: &[rect(30, 5, 35, 8)],
        dots: &[],
    },
    ZoneGeometry {
        id: "top-buttons",
        boxes: &[rect(14, 11, 17, 13), rect(20, 11, 23, 13), rect(26, 11, 29, 13)],
        dots: &[],
    },
    ZoneGeometry {
        id: "front-buttons",
        boxes: &[],
        dots: &[(12, 4), (12, 12)],
    },
    ZoneGeometry {
        id: "lens-mount",
        boxes: &[rect(5, 3, 10, 13)],
        dots: &[],
    },
    ZoneGeometry {
        id: "battery",
        boxes: &[rect(41, 4, 46, 12)],
        dots: &[],
    },
];

const SIDE_SCHEMATIC: ViewSchematic = ViewSchematic {
    view: CameraView::Side,
    width: 50,
    height: 15,
    body: rect(10, 2, 41, 14),
    frame: &[
        FrameLine::Vertical { x: 16, y0: 0, y1: 2 },
        FrameLine::Horizontal { y: 0, x0: 16, x1: 34 },
        FrameLine::Vertical { x: 34, y0: 0, y1: 2 },
    ],
    zones: SIDE_ZONES,
};

// Rear/utility panel: battery in the center, ports along the bottom, power
// switch on the right edge, media bays on the left.
const REAR_ZONES: &[ZoneGeometry] = &[
    ZoneGeometry {
        id: "battery",
        boxes: &[rect(16, 3, 35, 9)],
        dots: &[],
    },
    ZoneGeometry {
        id: "ports",
        boxes: &[rect(15, 10, 36, 12)],
        dots: &[(18, 11), (23, 11), (28, 11), (33, 11)],
    },
    ZoneGeometry {
        id: "power",
        boxes: &[rect(38, 8, 42, 12)],
        dots: &[],
    },
    ZoneGeometry {
        id: "card-slot",
        boxes: &[rect(10, 4, 13, 9)],
        dots: &[],
    },
];

const REAR_SCHEMATIC: ViewSchematic = ViewSchematic {
    view: CameraView::Rear,
    width: 50,
    height: 15,
    body: rect(13, 1, 38, 13),
    frame: &[],
    zones: REAR_ZONES,
};

/// The fixed schematic for a view.
pub fn schematic(view: CameraView) -> &'static ViewSchematic {
    match view {
        CameraView::Side => &SIDE_SCHEMATIC,
        CameraView::Rear => &REAR_SCHEMATIC,
    }
}

/// Looks a zone up by its wire id. Unknown ids are simply absent — an
/// unrecognized highlight means "emphasize nothing", never an error.
pub fn zone(view: CameraView, id: &str) -> Option<&'static ZoneGeometry> {
    schematic(view).zones.iter().find(|zone| zone.id == id)
}

/// The zone vocabulary for a view, in drawing order.
pub fn zone_ids(view: CameraView) -> impl Iterator<Item = &'static str> {
    schematic(view).zones.iter().map(|zone| zone.id)
}
