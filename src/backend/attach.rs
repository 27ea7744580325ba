// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::model::InlineImage;

#[derive(Debug, Error)]
pub enum AttachError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a supported image type (jpg, jpeg, png, webp, gif)")]
    UnsupportedType { path: String },
}

/// Reads an image file and encodes it for inline transport.
///
/// The mime type comes from the file extension; anything that is not a common
/// still-image format is rejected before reading.
pub fn load_inline_image(path: &Path) -> Result<InlineImage, AttachError> {
    let mime_type = mime_for_extension(path).ok_or_else(|| AttachError::UnsupportedType {
        path: path.display().to_string(),
    })?;

    let bytes = std::fs::read(path).map_err(|source| AttachError::Read {
        path: path.display().to_string(),
        source,
    })?;

    Ok(InlineImage {
        mime_type: mime_type.to_owned(),
        data: BASE64_STANDARD.encode(bytes),
    })
}

fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
