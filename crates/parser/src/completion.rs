//! Contract with the external text-completion service.
//!
//! A language model turns a natural-language request into FlowLang. The
//! service itself is a collaborator behind [`CompletionService`]; this module
//! owns what surrounds the call: the instructional prompt, the request
//! payload, validation of the reply, and stripping the Markdown code fences
//! models like to wrap their answer in.
//!
//! Upstream failures are reported as [`CompletionError`], never as
//! [`crate::FlowLangError`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Model requested when the caller does not name one.
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Errors raised by the completion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// No prompt was supplied.
    #[error("a prompt is required")]
    MissingPrompt,

    /// The service answered with a non-success status.
    #[error("completion service error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The reply did not have the expected `choices[0].message.content` shape.
    #[error("invalid response structure from completion service")]
    InvalidResponse,

    /// The request never completed (network failure, timeout).
    #[error("completion request failed: {0}")]
    Transport(String),
}

impl CompletionError {
    /// Upstream HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completion request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

impl CompletionRequest {
    /// Request asking `model` for FlowLang describing `user_prompt`.
    pub fn for_prompt(user_prompt: &str, model: Option<&str>) -> Self {
        Self {
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(user_prompt),
            }],
            temperature: 0.3,
            max_tokens: 1500,
            top_p: 1.0,
            stream: false,
        }
    }
}

/// Raw answer of the service: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReply {
    pub status: u16,
    pub body: String,
}

impl CompletionReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A text-completion backend.
///
/// Implementations own the transport, including authentication and the
/// request timeout; a timed-out request is reported as
/// [`CompletionError::Transport`].
pub trait CompletionService {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionReply, CompletionError>;
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Pull the generated text out of a chat-completion reply.
pub fn extract_content(reply: &CompletionReply) -> Result<String, CompletionError> {
    if !reply.is_success() {
        return Err(CompletionError::Status {
            status: reply.status,
            body: reply.body.clone(),
        });
    }
    let parsed: ChatResponse =
        serde_json::from_str(&reply.body).map_err(|_| CompletionError::InvalidResponse)?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(CompletionError::InvalidResponse)
}

const FENCE_PATTERN: &str = r"```(?:flowlang)?";

static FENCE: OnceLock<Regex> = OnceLock::new();

fn fence() -> Result<&'static Regex, regex::Error> {
    if let Some(fence) = FENCE.get() {
        return Ok(fence);
    }
    let compiled = Regex::new(FENCE_PATTERN)?;
    Ok(FENCE.get_or_init(|| compiled))
}

/// Remove every ```` ```flowlang ```` and ```` ``` ```` marker and trim.
pub fn strip_code_fences(text: &str) -> String {
    let stripped = match fence() {
        Ok(fence) => fence.replace_all(text, "").into_owned(),
        Err(err) => {
            tracing::warn!(error = %err, "fence pattern unavailable, stripping literally");
            text.replace("```flowlang", "").replace("```", "")
        }
    };
    stripped.trim().to_string()
}

/// Ask `service` for FlowLang describing `user_prompt`.
pub fn generate_flowlang(
    service: &dyn CompletionService,
    user_prompt: &str,
    model: Option<&str>,
) -> Result<String, CompletionError> {
    if user_prompt.trim().is_empty() {
        return Err(CompletionError::MissingPrompt);
    }
    let request = CompletionRequest::for_prompt(user_prompt, model);
    tracing::debug!(model = %request.model, "requesting FlowLang completion");

    let reply = service.complete(&request)?;
    tracing::debug!(status = reply.status, "completion service answered");

    let content = extract_content(&reply)?;
    Ok(strip_code_fences(&content))
}

/// Instructions preceding the user request. Line 1 keeps its trailing
/// space and line 6 is five spaces; both are part of the wire text.
const PROMPT_PREAMBLE: &str = concat!(
    "You are a FlowLang code generator. Generate FlowLang code based on my description. \n",
    "Follow these rules strictly:\n",
    "1. Use this structure:\n",
    "   // Pools and lanes\n",
    "   Diagram [color: <color>, layout: <layout>, title: \"<title>\"] {\n",
    "     \n",
    "     // Section comment\n",
    "     SectionName {\n",
    "        NodeName [type: <event|activity|note>, icon: <icon-name>, label: \"<description>\"]\n",
    "        ...\n",
    "     }\n",
    "   }\n",
    "2. For connections, use:\n",
    "   NodeA > NodeB          // For direct sequence flow\n",
    "   NodeA --> NodeB : Note // For conditional flows, add label after colon\n",
    "   NodeA **>** NodeB      // For emphasized connections\n",
    "3. Every node MUST have:\n",
    "   - Unique name (CamelCase, no spaces)\n",
    "   - type (event/activity/note)\n",
    "   - icon (use: file-text, filter, layers, database, flag, alert-triangle, archive, lightbulb, users, cpu, shield, etc.)\n",
    "   - label (human-readable description in quotes)\n",
    "4. Use `//` comments to explain sections.\n",
    "5. Keep naming consistent: use CamelCase for nodes and readable titles.\n",
    "6. Create 4-8 nodes with logical flow connections.\n",
    "7. Never invent new syntax. Only use nodes, attributes, and connections as specified.\n",
    "Return only FlowLang code. No explanations.\n",
    "\n",
    "User request: ",
);

/// The instructional prompt sent to the model.
pub fn build_prompt(user_prompt: &str) -> String {
    format!("{PROMPT_PREAMBLE}{user_prompt}")
}
