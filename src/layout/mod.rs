// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fixed schematic geometry for the two camera views.
//!
//! Purely static data: the directive schema's zone vocabulary lives here,
//! quantized to a character grid for the renderer.

pub mod camera;

pub use camera::{schematic, zone, zone_ids, CellRect, FrameLine, ViewSchematic, ZoneGeometry};
