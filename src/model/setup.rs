// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SetupId;

/// A user-authored named camera configuration.
///
/// Setups live entirely in local storage. The assistant only ever sees them
/// as plain text, via [`CameraSetup::share_text`] or
/// [`CameraSetup::apply_prompt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSetup {
    id: SetupId,
    name: String,
    camera: String,
    fps: String,
    shutter: String,
    iso: String,
    wb: String,
    resolution: String,
    codec: String,
    #[serde(default)]
    lens: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

/// The free-text technical fields of a setup, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupFields {
    pub fps: String,
    pub shutter: String,
    pub iso: String,
    pub wb: String,
    pub resolution: String,
    pub codec: String,
    pub lens: String,
    pub notes: String,
}

impl CameraSetup {
    pub fn new(name: impl Into<String>, camera: impl Into<String>, fields: SetupFields) -> Self {
        let notes = fields.notes.trim().to_owned();
        Self {
            id: SetupId::random(),
            name: name.into(),
            camera: camera.into(),
            fps: or_default(fields.fps, "23.98"),
            shutter: or_default(fields.shutter, "180°"),
            iso: or_default(fields.iso, "800"),
            wb: or_default(fields.wb, "5600K"),
            resolution: or_default(fields.resolution, "4K"),
            codec: or_default(fields.codec, "ProRes 4444"),
            lens: fields.lens.trim().to_owned(),
            notes: if notes.is_empty() { None } else { Some(notes) },
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SetupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> &str {
        &self.camera
    }

    pub fn fps(&self) -> &str {
        &self.fps
    }

    pub fn shutter(&self) -> &str {
        &self.shutter
    }

    pub fn iso(&self) -> &str {
        &self.iso
    }

    pub fn wb(&self) -> &str {
        &self.wb
    }

    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    pub fn codec(&self) -> &str {
        &self.codec
    }

    pub fn lens(&self) -> &str {
        &self.lens
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// A copyable summary block for sharing a setup with the rest of the
    /// crew. The assistant is instructed to recognize this exact header and
    /// answer with a menu walkthrough when it is pasted back.
    pub fn share_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🎬 CAMERA SETUP: {}", self.name);
        let _ = writeln!(out, "📷 CAM: {}", self.camera);
        let _ = writeln!(out, "⏱️ FPS: {} | SHUTTER: {}", self.fps, self.shutter);
        let _ = writeln!(out, "💡 ISO: {} | WB: {}", self.iso, self.wb);
        let _ = writeln!(out, "🎞️ RES: {} | CODEC: {}", self.resolution, self.codec);
        let _ = writeln!(out, "🔍 LENS: {}", self.lens);
        let _ = writeln!(out, "📝 NOTES: {}", self.notes.as_deref().unwrap_or("N/A"));
        out.push('\n');
        out.push_str("----------------------------------------\n");
        out.push_str("🚀 APPLY THIS SETUP:\n");
        out.push_str(
            "Paste this entire text into CineAssist to get a step-by-step guide on how to configure the camera.\n",
        );
        out.push_str("----------------------------------------");
        out
    }

    /// The prompt sent when the user asks the assistant to walk them through
    /// applying this setup.
    pub fn apply_prompt(&self) -> String {
        let mut out = format!(
            "Guide me step-by-step to configure a {} with these settings:\n",
            self.camera
        );
        let _ = writeln!(out, "- FPS: {}", self.fps);
        let _ = writeln!(out, "- Shutter: {}", self.shutter);
        let _ = writeln!(out, "- ISO/EI: {}", self.iso);
        let _ = writeln!(out, "- White Balance: {}", self.wb);
        let _ = writeln!(out, "- Resolution: {}", self.resolution);
        let _ = writeln!(out, "- Codec: {}", self.codec);
        if !self.lens.is_empty() {
            let _ = writeln!(out, "- Lens: {}", self.lens);
        }
        if let Some(notes) = &self.notes {
            let _ = writeln!(out, "Note: {notes}");
        }
        out
    }
}

fn or_default(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraSetup, SetupFields};

    fn stunt_setup() -> CameraSetup {
        CameraSetup::new(
            "A-Cam Stunt",
            "Sony Venice 2",
            SetupFields {
                fps: "48".to_owned(),
                shutter: "90°".to_owned(),
                iso: "500".to_owned(),
                wb: "4300K".to_owned(),
                resolution: "6K".to_owned(),
                codec: "X-OCN ST".to_owned(),
                lens: "Master Prime 35mm".to_owned(),
                notes: "Rain cover on".to_owned(),
            },
        )
    }

    #[test]
    fn blank_fields_take_on_set_defaults() {
        let setup = CameraSetup::new("B-Cam", "ARRI Alexa 35", SetupFields::default());
        assert_eq!(setup.fps(), "23.98");
        assert_eq!(setup.shutter(), "180°");
        assert_eq!(setup.iso(), "800");
        assert_eq!(setup.wb(), "5600K");
        assert_eq!(setup.resolution(), "4K");
        assert_eq!(setup.codec(), "ProRes 4444");
        assert_eq!(setup.lens(), "");
        assert_eq!(setup.notes(), None);
    }

    #[test]
    fn share_text_carries_the_recognizable_header() {
        let text = stunt_setup().share_text();
        assert!(text.starts_with("🎬 CAMERA SETUP: A-Cam Stunt"));
        assert!(text.contains("📷 CAM: Sony Venice 2"));
        assert!(text.contains("⏱️ FPS: 48 | SHUTTER: 90°"));
        assert!(text.contains("📝 NOTES: Rain cover on"));
    }

    #[test]
    fn share_text_prints_na_for_missing_notes() {
        let setup = CameraSetup::new("B-Cam", "ARRI Alexa 35", SetupFields::default());
        assert!(setup.share_text().contains("📝 NOTES: N/A"));
    }

    #[test]
    fn apply_prompt_lists_all_core_settings() {
        let prompt = stunt_setup().apply_prompt();
        assert!(prompt.starts_with("Guide me step-by-step to configure a Sony Venice 2"));
        assert!(prompt.contains("- FPS: 48"));
        assert!(prompt.contains("- Lens: Master Prime 35mm"));
        assert!(prompt.contains("Note: Rain cover on"));
    }

    #[test]
    fn apply_prompt_omits_empty_lens_and_notes() {
        let setup = CameraSetup::new("B-Cam", "ARRI Alexa 35", SetupFields::default());
        let prompt = setup.apply_prompt();
        assert!(!prompt.contains("- Lens:"));
        assert!(!prompt.contains("Note:"));
    }

    #[test]
    fn setups_round_trip_through_json() {
        let setup = stunt_setup();
        let json = serde_json::to_string(&setup).expect("serialize setup");
        let back: CameraSetup = serde_json::from_str(&json).expect("deserialize setup");
        assert_eq!(setup, back);
    }
}
