// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use memchr::memchr_iter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{prompt, BackendError};
use crate::model::{InlineImage, SourceRef};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// One incremental fragment of a streamed response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamChunk {
    pub text: String,
    pub sources: Vec<SourceRef>,
}

/// The ordered chunk sequence for one turn.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, BackendError>> + Send>>;

/// Selectable chat models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatModel {
    /// Low-latency default.
    #[default]
    Fast,
    /// Slower, for tricky multi-step troubleshooting.
    Pro,
}

impl ChatModel {
    pub fn id(self) -> &'static str {
        match self {
            Self::Fast => "gemini-2.5-flash",
            Self::Pro => "gemini-3-pro-preview",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "fast" | "flash" => Some(Self::Fast),
            "pro" | "advanced" => Some(Self::Pro),
            _ => None,
        }
    }
}

/// The backend-held conversation context for one session.
///
/// Lifecycle: [`GeminiClient::open_session`] → N turns → [`ChatSession::reset`]
/// (or open a fresh one; opening is idempotent and discards prior context).
/// The transcript shown to the user is owned elsewhere; this is only the wire
/// history replayed to the model each turn.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    history: Vec<Content>,
}

impl ChatSession {
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Number of turns (user and model) recorded so far.
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    /// Records a completed model reply so later turns see it as context.
    /// Failed turns are never recorded; their text is discarded.
    pub fn record_model_reply(&mut self, text: &str) {
        self.history.push(Content {
            role: "model".to_owned(),
            parts: vec![Part::Text {
                text: text.to_owned(),
            }],
        });
    }

    fn push_user_turn(&mut self, text: &str, image: Option<InlineImage>) {
        let mut parts = Vec::new();
        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: image.mime_type,
                    data: image.data,
                },
            });
        }
        let effective = if text.trim().is_empty() && !parts.is_empty() {
            // Image-only turns still need a textual ask.
            "Analyze this image".to_owned()
        } else {
            text.to_owned()
        };
        parts.push(Part::Text { text: effective });

        self.history.push(Content {
            role: "user".to_owned(),
            parts,
        });
    }
}

/// Streaming Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: ChatModel,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: ChatModel) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model,
        }
    }

    /// Reads the API key from `GEMINI_API_KEY`.
    pub fn from_env(model: ChatModel) -> Result<Self, BackendError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(BackendError::MissingApiKey)?;
        Ok(Self::new(api_key, model))
    }

    pub fn model(&self) -> ChatModel {
        self.model
    }

    /// Establishes a fresh conversation context.
    pub fn open_session(&self) -> ChatSession {
        ChatSession::default()
    }

    /// Issues one turn and returns the ordered chunk sequence.
    ///
    /// The user turn is appended to the session history; the caller records
    /// the model reply after the stream completes (and skips it on failure).
    pub async fn stream_turn(
        &self,
        session: &mut ChatSession,
        text: &str,
        image: Option<InlineImage>,
    ) -> Result<ChunkStream, BackendError> {
        session.push_user_turn(text, image);

        let request = GenerateContentRequest {
            contents: &session.history,
            system_instruction: Content {
                role: "system".to_owned(),
                parts: vec![Part::Text {
                    text: prompt::system_instruction().to_owned(),
                }],
            },
            // Search grounding keeps firmware/menu answers current.
            tools: vec![Tool::default()],
            generation_config: GenerationConfig { temperature: 0.4 },
        };

        let url = format!(
            "{BASE_URL}/{model}:streamGenerateContent?alt=sse&key={key}",
            model = self.model.id(),
            key = self.api_key,
        );

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "chat turn rejected");
            return Err(status_error(status.as_u16(), &body));
        }

        debug!(model = self.model.id(), "chat stream opened");
        Ok(sse_chunk_stream(response.bytes_stream()))
    }
}

fn sse_chunk_stream<B, S>(bytes: S) -> ChunkStream
where
    B: AsRef<[u8]>,
    S: Stream<Item = Result<B, reqwest::Error>> + Send + 'static,
{
    let state = (Box::pin(bytes), SseEventBuffer::default(), false);

    Box::pin(futures_util::stream::unfold(
        state,
        |(mut inner, mut events, mut finished)| async move {
            loop {
                if finished {
                    return None;
                }

                if let Some(payload) = events.next_event() {
                    return Some((parse_chunk(&payload), (inner, events, finished)));
                }

                match inner.next().await {
                    Some(Ok(bytes)) => events.push(bytes.as_ref()),
                    Some(Err(err)) => {
                        finished = true;
                        return Some((
                            Err(BackendError::Transport(err)),
                            (inner, events, finished),
                        ));
                    }
                    None => {
                        finished = true;
                        if let Some(payload) = events.flush_trailing() {
                            return Some((parse_chunk(&payload), (inner, events, finished)));
                        }
                        return None;
                    }
                }
            }
        },
    ))
}

/// Reassembles server-sent events from an arbitrarily chunked byte stream.
///
/// Events end at a blank line; `data:` lines within an event are joined with
/// newlines. Comment and keep-alive events carry no data and are skipped.
#[derive(Debug, Default)]
pub(crate) struct SseEventBuffer {
    buf: Vec<u8>,
}

impl SseEventBuffer {
    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub(crate) fn next_event(&mut self) -> Option<String> {
        loop {
            let (event_end, resume) = self.find_blank_line()?;
            let event = self.buf[..event_end].to_vec();
            self.buf.drain(..resume);

            if let Some(payload) = data_payload(&event) {
                return Some(payload);
            }
        }
    }

    /// Treats whatever is left as a final event. Lenient on purpose: some
    /// servers omit the trailing blank line before closing the stream.
    pub(crate) fn flush_trailing(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let event = std::mem::take(&mut self.buf);
        data_payload(&event)
    }

    fn find_blank_line(&self) -> Option<(usize, usize)> {
        let mut line_start = 0;
        for nl in memchr_iter(b'\n', &self.buf) {
            let mut line = &self.buf[line_start..nl];
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            if line.is_empty() {
                return Some((line_start, nl + 1));
            }
            line_start = nl + 1;
        }
        None
    }
}

fn data_payload(event: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(event).ok()?;

    let mut parts = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(rest) = line.strip_prefix("data:") {
            parts.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn parse_chunk(payload: &str) -> Result<StreamChunk, BackendError> {
    let wire: WireResponse = serde_json::from_str(payload)
        .map_err(|err| BackendError::Wire(format!("undecodable event: {err}")))?;
    Ok(chunk_from_wire(wire))
}

fn chunk_from_wire(wire: WireResponse) -> StreamChunk {
    let mut chunk = StreamChunk::default();

    let Some(candidate) = wire.candidates.and_then(|mut c| {
        if c.is_empty() {
            None
        } else {
            Some(c.remove(0))
        }
    }) else {
        return chunk;
    };

    if let Some(parts) = candidate.content.and_then(|content| content.parts) {
        for part in parts {
            if let Some(text) = part.text {
                chunk.text.push_str(&text);
            }
        }
    }

    if let Some(grounding) = candidate
        .grounding_metadata
        .and_then(|metadata| metadata.grounding_chunks)
    {
        for grounded in grounding {
            let Some(web) = grounded.web else {
                continue;
            };
            // Only fully-formed references are worth a clickable citation.
            if let (Some(uri), Some(title)) = (web.uri, web.title) {
                chunk.sources.push(SourceRef { uri, title });
            }
        }
    }

    chunk
}

fn status_error(status: u16, body: &str) -> BackendError {
    #[derive(Deserialize)]
    struct ErrorWrapper {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        status: Option<String>,
    }

    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_owned());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_owned());

    BackendError::Status { status, message }
}

// ── Request wire types ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
    system_instruction: Content,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize, Default)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: GoogleSearchConfig,
}

#[derive(Serialize, Default)]
struct GoogleSearchConfig {}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

// ── Response wire types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WireResponse {
    candidates: Option<Vec<WireCandidate>>,
}

#[derive(Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Deserialize)]
struct WireContent {
    parts: Option<Vec<WirePart>>,
}

#[derive(Deserialize)]
struct WirePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct WireGroundingMetadata {
    #[serde(rename = "groundingChunks")]
    grounding_chunks: Option<Vec<WireGroundingChunk>>,
}

#[derive(Deserialize)]
struct WireGroundingChunk {
    web: Option<WireWebSource>,
}

#[derive(Deserialize)]
struct WireWebSource {
    uri: Option<String>,
    title: Option<String>,
}
