//! The generation collaborator contract.
//!
//! A `GenerativeAgent` takes a system instruction set and a user payload and
//! returns raw text; `generate_json` layers tolerant JSON extraction on top
//! for the call sites that expect a structured object. Failures are never
//! retried here: every error propagates as a single terminal failure for the
//! calling turn.

use async_trait::async_trait;
use atelier_core::AtelierError;
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by generation collaborator implementations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// HTTP-level failure, with retry metadata for callers that schedule
    /// their own retries (this workspace never retries internally).
    #[error("Agent process error (status: {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The agent could not execute the request at all.
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    /// The agent answered, but the payload was not usable.
    #[error("Agent returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl From<AgentError> for AtelierError {
    fn from(err: AgentError) -> Self {
        AtelierError::collaborator(err.to_string())
    }
}

/// A text-generation collaborator.
///
/// One call per invocation; suspension happens inside `generate`, so a turn
/// awaiting a collaborator does not block other turns. Cancellation is the
/// caller's: dropping the returned future aborts the underlying request.
#[async_trait]
pub trait GenerativeAgent: Send + Sync {
    async fn generate(&self, system: &str, user: &str) -> Result<String, AgentError>;
}

/// Invokes the agent and parses its reply as a JSON object.
///
/// Strips a surrounding markdown code fence if the model added one. Anything
/// that is not a JSON object afterwards is an `InvalidResponse`.
pub async fn generate_json(
    agent: &dyn GenerativeAgent,
    system: &str,
    user: &str,
) -> Result<Map<String, Value>, AgentError> {
    let raw = agent.generate(system, user).await?;
    parse_json_object(&raw)
}

/// Parses a model reply into a JSON object, tolerating markdown fences.
pub fn parse_json_object(raw: &str) -> Result<Map<String, Value>, AgentError> {
    let stripped = strip_code_fence(raw);
    let value: Value = serde_json::from_str(stripped)
        .map_err(|err| AgentError::InvalidResponse(format!("not valid JSON: {err}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AgentError::InvalidResponse(format!(
            "expected a JSON object, got: {other}"
        ))),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line ("json", "javascript", or empty)
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let map = parse_json_object(r#"{"code": "x", "rationale": "y"}"#).unwrap();
        assert_eq!(map["code"], "x");
    }

    #[test]
    fn test_parse_fenced_object() {
        let raw = "```json\n{\"reflection\": \"💬\"}\n```";
        let map = parse_json_object(raw).unwrap();
        assert_eq!(map["reflection"], "💬");
    }

    #[test]
    fn test_parse_fence_without_language_tag() {
        let raw = "```\n{\"a\": 1}\n```";
        let map = parse_json_object(raw).unwrap();
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = parse_json_object("[1, 2]").unwrap_err();
        assert!(matches!(err, AgentError::InvalidResponse(_)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let err = parse_json_object("sorry, I cannot").unwrap_err();
        assert!(matches!(err, AgentError::InvalidResponse(_)));
    }

    #[test]
    fn test_agent_error_converts_to_collaborator() {
        let err: AtelierError = AgentError::ExecutionFailed("boom".into()).into();
        assert!(err.is_collaborator());
    }
}
