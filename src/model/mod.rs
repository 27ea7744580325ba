// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Transcript messages, grounding citations, the camera-layout directive, and
//! user-authored setup presets.

pub mod directive;
pub mod ids;
pub mod message;
pub mod setup;

pub use directive::{CameraView, LayoutDirective};
pub use ids::{Id, MessageId, SetupId};
pub use message::{
    ConversationMessage, InlineImage, MessageRole, SourceRef, STREAM_FAILURE_TEXT,
};
pub use setup::{CameraSetup, SetupFields};
