// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The stream merger.
//!
//! Consumes a turn's chunk sequence in arrival order, concatenates text into
//! the running buffer, accumulates citations (no de-duplication — the backend
//! gives them no identity), and republishes the merged state after every
//! chunk so the renderer can redraw live.

use std::sync::{Arc, Mutex};

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::backend::{BackendError, StreamChunk};
use crate::model::{ConversationMessage, MessageId, SourceRef};

/// The merged state after some prefix of the chunk sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub citations: Vec<SourceRef>,
}

/// How a turn's stream ended.
#[derive(Debug)]
pub enum MergeOutcome {
    Completed {
        text: String,
        citations: Vec<SourceRef>,
    },
    /// The stream raised. Partial text is deliberately NOT carried here: the
    /// turn's display is replaced wholesale by the fixed failure text.
    Failed { error: BackendError },
}

impl MergeOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Merges a chunk sequence, publishing a snapshot after every chunk.
///
/// The publish callback receives the full merged state each time; the text
/// after chunk N+1 is always a prefix-extension of the text after chunk N,
/// and the citation list only ever extends.
pub async fn merge_stream<S>(mut chunks: S, mut publish: impl FnMut(Snapshot)) -> MergeOutcome
where
    S: Stream<Item = Result<StreamChunk, BackendError>> + Unpin,
{
    let mut text = String::new();
    let mut citations = Vec::new();

    while let Some(item) = chunks.next().await {
        match item {
            Ok(chunk) => {
                text.push_str(&chunk.text);
                citations.extend(chunk.sources);
                publish(Snapshot {
                    text: text.clone(),
                    citations: citations.clone(),
                });
            }
            Err(error) => {
                warn!(%error, "chat stream failed mid-turn");
                return MergeOutcome::Failed { error };
            }
        }
    }

    debug!(chars = text.len(), citations = citations.len(), "chat stream completed");
    MergeOutcome::Completed { text, citations }
}

/// The visible message store. One writer per streaming message (the merger);
/// the TUI reads it on every frame.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: ConversationMessage) -> MessageId {
        let id = *message.message_id();
        self.messages.push(message);
        id
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn message(&self, id: &MessageId) -> Option<&ConversationMessage> {
        self.messages.iter().find(|m| m.message_id() == id)
    }

    /// Applies a merged snapshot to the streaming message. Snapshots for a
    /// message that is no longer in the transcript (session was reset while
    /// the stream was in flight) are silently unobserved.
    pub fn apply_snapshot(&mut self, id: &MessageId, snapshot: Snapshot) {
        if let Some(message) = self.message_mut(id) {
            message.apply_snapshot(snapshot.text, snapshot.citations);
        }
    }

    pub fn mark_failed(&mut self, id: &MessageId) {
        if let Some(message) = self.message_mut(id) {
            message.mark_failed();
        }
    }

    fn message_mut(&mut self, id: &MessageId) -> Option<&mut ConversationMessage> {
        self.messages.iter_mut().find(|m| m.message_id() == id)
    }
}

/// Drives one model turn end to end: merges the chunk stream into the given
/// transcript message and applies the terminal state.
///
/// On success the message is left frozen as-is; on failure its content is
/// replaced by the fixed failure text and the turn is marked failed. The
/// outcome is returned so the caller can decide whether to record the reply
/// into the session context.
pub async fn drive_turn<S>(
    transcript: Arc<Mutex<Transcript>>,
    message_id: MessageId,
    chunks: S,
) -> MergeOutcome
where
    S: Stream<Item = Result<StreamChunk, BackendError>> + Unpin,
{
    let publish_to = transcript.clone();
    let outcome = merge_stream(chunks, |snapshot| {
        let mut transcript = publish_to.lock().expect("transcript lock poisoned");
        transcript.apply_snapshot(&message_id, snapshot);
    })
    .await;

    if outcome.is_failed() {
        let mut transcript = transcript.lock().expect("transcript lock poisoned");
        transcript.mark_failed(&message_id);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures_util::stream;

    use super::{drive_turn, merge_stream, MergeOutcome, Snapshot, Transcript};
    use crate::backend::{BackendError, StreamChunk};
    use crate::model::{ConversationMessage, SourceRef, STREAM_FAILURE_TEXT};

    fn text_chunk(text: &str) -> Result<StreamChunk, BackendError> {
        Ok(StreamChunk {
            text: text.to_owned(),
            sources: Vec::new(),
        })
    }

    fn cited_chunk(text: &str, uri: &str) -> Result<StreamChunk, BackendError> {
        Ok(StreamChunk {
            text: text.to_owned(),
            sources: vec![SourceRef {
                uri: uri.to_owned(),
                title: uri.to_owned(),
            }],
        })
    }

    #[tokio::test]
    async fn snapshots_extend_monotonically() {
        let chunks = stream::iter(vec![
            cited_chunk("Check ", "https://a"),
            text_chunk(""),
            cited_chunk("the fan", "https://a"),
            text_chunk(" vents."),
        ]);

        let snapshots = Arc::new(Mutex::new(Vec::<Snapshot>::new()));
        let sink = snapshots.clone();
        let outcome = merge_stream(chunks, move |snapshot| {
            sink.lock().unwrap().push(snapshot);
        })
        .await;

        let snapshots = snapshots.lock().unwrap();
        assert_eq!(snapshots.len(), 4);
        for pair in snapshots.windows(2) {
            assert!(pair[1].text.starts_with(&pair[0].text));
            assert!(pair[1].citations.len() >= pair[0].citations.len());
            assert_eq!(&pair[1].citations[..pair[0].citations.len()], &pair[0].citations[..]);
        }

        // Duplicate citations survive: no identity, no dedup.
        let MergeOutcome::Completed { text, citations } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(text, "Check the fan vents.");
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0], citations[1]);
    }

    #[tokio::test]
    async fn empty_chunks_still_publish() {
        let chunks = stream::iter(vec![text_chunk(""), text_chunk("")]);
        let mut published = 0;
        merge_stream(chunks, |_| published += 1).await;
        assert_eq!(published, 2);
    }

    #[tokio::test]
    async fn failure_discards_partial_text() {
        let chunks = stream::iter(vec![
            text_chunk("Partial ans"),
            Err(BackendError::Wire("boom".to_owned())),
        ]);

        let transcript = Arc::new(Mutex::new(Transcript::default()));
        let id = transcript
            .lock()
            .unwrap()
            .push(ConversationMessage::model_placeholder());

        let outcome = drive_turn(transcript.clone(), id, chunks).await;
        assert!(outcome.is_failed());

        let transcript = transcript.lock().unwrap();
        let message = transcript.message(&id).expect("message");
        assert_eq!(message.content(), STREAM_FAILURE_TEXT);
        assert!(message.failed());
    }

    #[tokio::test]
    async fn completed_turn_freezes_the_merged_text() {
        let chunks = stream::iter(vec![text_chunk("All "), text_chunk("good.")]);

        let transcript = Arc::new(Mutex::new(Transcript::default()));
        let id = transcript
            .lock()
            .unwrap()
            .push(ConversationMessage::model_placeholder());

        let outcome = drive_turn(transcript.clone(), id, chunks).await;
        assert!(!outcome.is_failed());

        let transcript = transcript.lock().unwrap();
        let message = transcript.message(&id).expect("message");
        assert_eq!(message.content(), "All good.");
        assert!(!message.failed());
    }

    #[tokio::test]
    async fn snapshots_for_a_cleared_transcript_are_unobserved() {
        let chunks = stream::iter(vec![text_chunk("late")]);

        let transcript = Arc::new(Mutex::new(Transcript::default()));
        let id = transcript
            .lock()
            .unwrap()
            .push(ConversationMessage::model_placeholder());

        // The user reset the session while the stream was in flight.
        transcript.lock().unwrap().clear();

        drive_turn(transcript.clone(), id, chunks).await;
        assert!(transcript.lock().unwrap().is_empty());
    }
}
