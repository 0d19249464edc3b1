//! Test helpers for driving the intel service without network access.
//!
//! [`ScriptedModel`] replays queued replies in order and records every request
//! it receives, so tests can assert both on outcomes and on call order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::DashboardConfig;
use crate::intel::{
    Candidate, GenerateContentRequest, GenerateContentResponse, GenerativeModel, GroundingChunk,
    GroundingMetadata, IntelError, IntelService, MapsChunk, ResponseContent, ResponsePart,
};

/// One request as seen by the scripted model.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub request: GenerateContentRequest,
}

impl RecordedCall {
    pub fn prompt(&self) -> &str {
        self.request.prompt_text()
    }
}

/// Replays queued replies; an exhausted script answers with a 503 status.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<GenerateContentResponse, IntelError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<GenerateContentResponse, IntelError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: Result<GenerateContentResponse, IntelError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Model ids in the order they were requested.
    pub fn models_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.model).collect()
    }
}

impl GenerativeModel for ScriptedModel {
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, IntelError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                request: request.clone(),
            });
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(unavailable()))
    }
}

/// Service over a shared scripted model with default configuration.
pub fn scripted_service(model: Arc<ScriptedModel>) -> IntelService {
    IntelService::new(model, DashboardConfig::default())
}

/// Reply whose first candidate carries `text` only.
pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(ResponseContent {
                parts: vec![ResponsePart {
                    text: Some(text.to_string()),
                }],
            }),
            grounding_metadata: None,
        }],
    }
}

/// Reply with narrative `text` grounded on map listings given as `(title, uri)`.
pub fn grounded_response(text: &str, places: &[(&str, &str)]) -> GenerateContentResponse {
    let mut response = text_response(text);
    let chunks = places
        .iter()
        .map(|(title, uri)| GroundingChunk {
            maps: Some(MapsChunk {
                uri: Some(uri.to_string()),
                title: Some(title.to_string()),
                place_id: None,
            }),
        })
        .collect();
    if let Some(candidate) = response.candidates.first_mut() {
        candidate.grounding_metadata = Some(GroundingMetadata {
            grounding_chunks: chunks,
        });
    }
    response
}

/// Error standing in for a rate-limited upstream.
pub fn rate_limited() -> IntelError {
    IntelError::Status {
        status: 429,
        body: "RESOURCE_EXHAUSTED".to_string(),
    }
}

fn unavailable() -> IntelError {
    IntelError::Status {
        status: 503,
        body: "scripted model has no reply left".to_string(),
    }
}
