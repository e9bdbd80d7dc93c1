//! AI component generation: request assembly, the outbound completion
//! seam, and stale-response correlation.
//!
//! The HTTP transport is an external collaborator behind
//! [`CompletionClient`]. The engine side is synchronous fire-and-forget:
//! no retry, no backoff, no cancellation of an in-flight request. What it
//! does guard is the double-submit race: every issued request carries a
//! monotonic sequence number and only the latest issued number's response
//! is accepted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Fixed system prompt; instructs function-declaration component style so
/// the preview shim's name sniffing has something to find.
pub const SYSTEM_PROMPT: &str = "You are an expert React developer. Generate a clean, functional React component based on the user's description. Return ONLY valid React component code without any explanations or markdown formatting. Declare the component with `function` syntax, use hooks as needed, and use inline styling for simplicity.";

pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Wire shape of a completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Wire shape of a completion response; only the first choice's message
/// content is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Outbound seam to the completion API. Implementations perform the
/// actual network call and surface transport or non-success-status
/// failures as [`Error::Generation`].
pub trait CompletionClient {
    fn complete(&mut self, api_key: &str, request: &GenerationRequest)
    -> Result<CompletionResponse>;
}

/// An issued request's correlation ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSeq(u64);

/// Drives generation against a [`CompletionClient`] and discards stale
/// responses.
#[derive(Debug)]
pub struct Generator<C> {
    client: C,
    model: String,
    issued: u64,
}

impl<C: CompletionClient> Generator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            issued: 0,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builds the request for a prompt plus optional prior-turn history.
    /// Preconditions (non-empty prompt, credential present) are checked
    /// before anything is issued, so no network call is attempted on a
    /// precondition failure.
    pub fn prepare(
        &mut self,
        prompt: &str,
        api_key: &str,
        history: &[ChatMessage],
    ) -> Result<(RequestSeq, GenerationRequest)> {
        if prompt.trim().is_empty() {
            return Err(Error::InvalidInput("prompt cannot be empty".to_string()));
        }
        if api_key.is_empty() {
            return Err(Error::MissingCredential);
        }

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        });
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(format!(
            "Create a React component that: {prompt}"
        )));

        self.issued += 1;
        let seq = RequestSeq(self.issued);
        debug!(seq = self.issued, "issued generation request");
        Ok((
            seq,
            GenerationRequest {
                model: self.model.clone(),
                messages,
            },
        ))
    }

    /// Whether a response tagged with `seq` is still the latest issued.
    /// A second submit while one is pending supersedes the first; the
    /// superseded response must be dropped, not applied.
    pub fn accepts(&self, seq: RequestSeq) -> bool {
        seq.0 == self.issued
    }

    /// Resolves a completed request. Stale responses (a newer request was
    /// issued meanwhile) are discarded as `Ok(None)`.
    pub fn resolve(
        &self,
        seq: RequestSeq,
        response: CompletionResponse,
    ) -> Result<Option<String>> {
        if !self.accepts(seq) {
            debug!(seq = seq.0, latest = self.issued, "discarded stale response");
            return Ok(None);
        }
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Generation("response contained no content".to_string()))?;
        Ok(Some(content))
    }

    /// Synchronous end-to-end path: prepare, call the client, resolve.
    pub fn generate(
        &mut self,
        prompt: &str,
        api_key: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        let (seq, request) = self.prepare(prompt, api_key, history)?;
        let response = self.client.complete(api_key, &request)?;
        match self.resolve(seq, response)? {
            Some(content) => Ok(content),
            // Unreachable on the synchronous path; kept as a typed failure
            // rather than a panic.
            None => Err(Error::Generation("request was superseded".to_string())),
        }
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }
}
