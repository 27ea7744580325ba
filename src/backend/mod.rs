// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The chat backend: a streaming Gemini REST client.
//!
//! All camera knowledge lives on the other side of this interface; this crate
//! only ships the system instruction and renders what comes back.

pub mod attach;
pub mod gemini;
pub mod prompt;

pub use attach::{load_inline_image, AttachError};
pub use gemini::{ChatModel, ChatSession, ChunkStream, GeminiClient, StreamChunk};

use thiserror::Error;

/// Failures raised by the transport layer.
///
/// These are the only errors allowed to surface as a user-visible failed
/// turn; everything downstream of the transport degrades instead of erroring.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed stream payload: {0}")]
    Wire(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}
