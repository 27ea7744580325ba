// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::MessageId;

/// The fixed text shown for a turn whose stream failed.
///
/// Any partially streamed text is superseded by this string, deliberately:
/// a half answer about camera internals is worse than no answer.
pub const STREAM_FAILURE_TEXT: &str =
    "I'm sorry, I encountered an error retrieving that information. Please try again.";

/// Who authored a message in the visible transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Model,
    System,
}

/// A grounding reference attached to model output.
///
/// The backend gives no identity key for these, so the list may contain
/// duplicates across chunks; order is arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub uri: String,
    pub title: String,
}

/// An image payload carried inline with a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// e.g. `image/jpeg`.
    pub mime_type: String,
    /// Base64 of the raw bytes, without a `data:` URI prefix.
    pub data: String,
}

/// One turn in the visible transcript.
///
/// User and system messages are finalized at construction. A model message is
/// created empty when its stream opens and is owned by the stream merger until
/// the stream completes or fails; after that it is frozen by convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    message_id: MessageId,
    role: MessageRole,
    content: String,
    image: Option<InlineImage>,
    citations: Vec<SourceRef>,
    failed: bool,
    created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>, image: Option<InlineImage>) -> Self {
        Self::new(MessageRole::User, content.into(), image)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content.into(), None)
    }

    /// An empty model message, ready to receive streamed snapshots.
    pub fn model_placeholder() -> Self {
        Self::new(MessageRole::Model, String::new(), None)
    }

    fn new(role: MessageRole, content: String, image: Option<InlineImage>) -> Self {
        Self {
            message_id: MessageId::random(),
            role,
            content,
            image,
            citations: Vec::new(),
            failed: false,
            created_at: Utc::now(),
        }
    }

    pub fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image(&self) -> Option<&InlineImage> {
        self.image.as_ref()
    }

    pub fn citations(&self) -> &[SourceRef] {
        &self.citations
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces content and citations with the merger's latest snapshot.
    ///
    /// The snapshot is authoritative; the message never edits it.
    pub fn apply_snapshot(&mut self, content: String, citations: Vec<SourceRef>) {
        self.content = content;
        self.citations = citations;
    }

    /// Marks the turn failed and replaces the displayed content with
    /// [`STREAM_FAILURE_TEXT`]. Citations accumulated so far are kept.
    pub fn mark_failed(&mut self) {
        self.failed = true;
        self.content = STREAM_FAILURE_TEXT.to_owned();
    }
}
