//! Clients for the hosted generative model: partner discovery, route
//! logistics and warehouse-zone suggestions.
//!
//! The HTTP transport sits behind [`GenerativeModel`] so the request shaping,
//! parsing and fallback rules in [`IntelService`] can run against a scripted
//! model in tests. Every service call settles to a renderable value; the
//! attached [`IntelStatus`] tells a live answer apart from an empty one or an
//! outage.

mod error;
mod parser;
mod prompts;
mod request;
mod response;
mod service;
mod worker;

#[cfg(feature = "gemini")]
mod client;


#[cfg(feature = "gemini")]
pub use client::GeminiClient;
pub use error::IntelError;
pub use request::{
    Content, GenerateContentRequest, GenerationConfig, LatLngBias, Part, RetrievalConfig, Tool,
    ToolConfig,
};
pub use response::{
    Candidate, GenerateContentResponse, GroundingChunk, GroundingMetadata, MapsChunk,
    ResponseContent, ResponsePart,
};
pub use service::{
    DiscoveryReport, IntelService, ScanOutcome, ScanRequest, DISCOVERY_UNAVAILABLE_NARRATIVE,
};
pub use worker::{IntelJob, IntelReply, IntelWorker};

/// Transport seam for `generateContent` calls. Implementations must be
/// `Send + Sync` so one instance can be shared by worker threads.
pub trait GenerativeModel: Send + Sync {
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, IntelError>;
}

/// How a service call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntelStatus {
    /// The model answered and the answer carried data.
    Live,
    /// The model answered with nothing usable (no places, no suggestions).
    Empty,
    /// The request or its parsing failed; the value is a fallback.
    Unavailable(String),
}

impl IntelStatus {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, IntelStatus::Unavailable(_))
    }
}

/// A value that is always safe to render, tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Intel<T> {
    pub value: T,
    pub status: IntelStatus,
}

impl<T> Intel<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            status: IntelStatus::Live,
        }
    }

    pub fn empty(value: T) -> Self {
        Self {
            value,
            status: IntelStatus::Empty,
        }
    }

    pub fn unavailable(value: T, error: &IntelError) -> Self {
        Self {
            value,
            status: IntelStatus::Unavailable(error.to_string()),
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
