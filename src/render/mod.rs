// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Schematic rendering.
//!
//! Produces Unicode text plus highlight spans the TUI uses for cell-accurate
//! zone emphasis. The renderer is total: schematic geometry is static and
//! every drawing operation clips at the canvas edge instead of failing.

mod canvas;
pub mod schematic;

pub use canvas::Canvas;
pub use schematic::{render_schematic, SchematicRender};

/// A contiguous highlighted span within one rendered line: `(y, x0, x1)`,
/// character-cell indices, inclusive, relative to the returned text lines.
pub type LineSpan = (usize, usize, usize);
