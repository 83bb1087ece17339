//! Turn input and output contracts.
//!
//! A turn is one request against the orchestrator; it is ephemeral and never
//! persisted here. Wire field names follow the original client contract
//! (`type` for the mode, `code` for the current artifact).

use crate::mode::Mode;
use serde::{Deserialize, Serialize};

/// One entry of the short-term conversation log, most-recent-last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Speaker role as supplied by the caller (e.g. "user", "assistant").
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// The full input contract of one conversational turn.
///
/// The interaction count is caller-supplied per turn; the orchestrator trusts
/// it but does not own it. Monotonicity is a caller contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub session_id: String,
    pub version_id: String,
    #[serde(rename = "code")]
    pub current_code: String,
    #[serde(rename = "code_description")]
    pub current_code_description: String,
    pub short_term_history: Vec<ChatTurn>,
    #[serde(rename = "user_question")]
    pub user_utterance: String,
    #[serde(rename = "type")]
    pub mode: Mode,
    pub interaction_count: u32,
}

/// Matched deep reflection: a single canned question, no generation involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionReply {
    pub reflection: String,
}

/// Transition reply: generated code and rationale plus a deterministic,
/// mode-specific advice line appended by the composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReply {
    pub code: String,
    pub rationale: String,
    pub advice: String,
}

/// Multi-field structured reply used by ambiguous deep reflection and the
/// style-application flow. `reflection` is absent in general mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedReply {
    pub code: String,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
}

/// The single structured result of a turn.
///
/// Serialized untagged: each variant renders as its own mapping, exactly as
/// downstream clients consume it. Normal chat passes through whatever object
/// the generation collaborator produced (that schema is owned by the
/// generation contract, not by this core).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnResponse {
    Reflection(ReflectionReply),
    Transition(TransitionReply),
    Guided(GuidedReply),
    Chat(serde_json::Value),
}
