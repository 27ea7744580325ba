// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

/// The two fixed schematic views the assistant can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraView {
    /// Operator/AC side of the body.
    Side,
    /// Utility/power panel at the rear.
    Rear,
}

impl CameraView {
    /// Maps the wire string to a view. Anything unrecognized is `None`;
    /// callers treat that like an absent view.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "side" => Some(Self::Side),
            "rear" => Some(Self::Rear),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Side => "side",
            Self::Rear => "rear",
        }
    }

    /// Human caption shown above the schematic.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Side => "Operator/AC Side",
            Self::Rear => "Rear/Utility Panel",
        }
    }
}

/// A parsed camera-layout directive from a fenced `layout` block.
///
/// Every field is individually optional; the directive parser guarantees that
/// at least one of view/highlight was present in the source JSON, otherwise
/// the block never becomes a directive in the first place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDirective {
    view: Option<CameraView>,
    highlight: Option<SmolStr>,
    label: Option<String>,
}

impl LayoutDirective {
    pub fn new(
        view: Option<CameraView>,
        highlight: Option<SmolStr>,
        label: Option<String>,
    ) -> Self {
        Self {
            view,
            highlight,
            label,
        }
    }

    pub fn view(&self) -> Option<CameraView> {
        self.view
    }

    /// The view to draw; a missing or unrecognized view falls back to side.
    pub fn resolved_view(&self) -> CameraView {
        self.view.unwrap_or(CameraView::Side)
    }

    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
