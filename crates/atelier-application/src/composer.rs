//! Response composition for each routing branch.
//!
//! The composer owns the prompt assembly and output validation of every
//! branch; it never retries, so a collaborator failure or malformed payload
//! fails the turn as a single terminal error. The matched deep-reflection
//! branch involves no generation at all.

use std::sync::Arc;

use atelier_core::error::{AtelierError, Result};
use atelier_core::turn::{GuidedReply, ReflectionReply, TransitionReply, TurnRequest, TurnResponse};
use atelier_core::{Mode, ReflectionCategory};
use atelier_interaction::{GenerativeAgent, generate_json};
use serde_json::{Map, Value};

use crate::prompts;
use crate::templates;

/// Pulls a mandatory string field out of a collaborator reply.
fn require_str(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AtelierError::missing_field(field))
}

pub struct ResponseComposer {
    agent: Arc<dyn GenerativeAgent>,
}

impl ResponseComposer {
    pub fn new(agent: Arc<dyn GenerativeAgent>) -> Self {
        Self { agent }
    }

    /// Normal chat: mode-flavored system prompt, collaborator object passed
    /// through unvalidated (its schema belongs to the generation contract).
    pub async fn normal(
        &self,
        request: &TurnRequest,
        memory: &str,
        history: &str,
    ) -> Result<TurnResponse> {
        let system = match request.mode {
            Mode::Explainable => prompts::EXPLAINABLE_SYSTEM_PROMPT,
            Mode::Explorative => prompts::EXPLORATIVE_SYSTEM_PROMPT,
            Mode::Transformative => prompts::TRANSFORMATIVE_SYSTEM_PROMPT,
            Mode::General => prompts::GENERAL_SYSTEM_PROMPT,
        };
        let user = prompts::fill(
            prompts::CHAT_USER_TEMPLATE,
            &[
                ("user_question", &request.user_utterance),
                ("retrieved_memories", memory),
                ("short_term_history", history),
                ("code_description", &request.current_code_description),
                ("current_code", &request.current_code),
            ],
        );
        let map = generate_json(self.agent.as_ref(), system, &user).await?;
        Ok(TurnResponse::Chat(Value::Object(map)))
    }

    /// Transition turn: generated summary plus the deterministic advice line
    /// naming the mode's reflection directions.
    pub async fn transition(
        &self,
        request: &TurnRequest,
        memory: &str,
        history: &str,
    ) -> Result<TurnResponse> {
        let user = prompts::fill(
            prompts::TRANSITION_USER_TEMPLATE,
            &[
                ("user_question", &request.user_utterance),
                ("memory", memory),
                ("history", history),
                ("current_code", &request.current_code),
            ],
        );
        let map = generate_json(
            self.agent.as_ref(),
            prompts::TRANSITION_SYSTEM_PROMPT,
            &user,
        )
        .await?;
        Ok(TurnResponse::Transition(TransitionReply {
            code: require_str(&map, "code")?,
            rationale: require_str(&map, "rationale")?,
            advice: prompts::transition_advice(request.mode).to_string(),
        }))
    }

    /// Matched deep reflection: the category's canned template with the topic
    /// substituted. No collaborator call.
    pub fn deep_matched(
        &self,
        mode: Mode,
        category: ReflectionCategory,
        topic: &str,
    ) -> Result<TurnResponse> {
        let reflection = templates::resolve(mode, category, topic)?;
        Ok(TurnResponse::Reflection(ReflectionReply { reflection }))
    }

    /// Ambiguous deep reflection: the mode's vague-intent prompt with the
    /// full vocabulary injected, validated as a three-field structured reply.
    pub async fn deep_ambiguous(
        &self,
        request: &TurnRequest,
        memory: &str,
        history: &str,
    ) -> Result<TurnResponse> {
        let vocabulary = templates::format_vocabulary(request.mode);
        let system = prompts::fill(
            prompts::vague_system_prompt(request.mode)?,
            &[("reflection_templates", &vocabulary)],
        );
        let user = prompts::fill(
            prompts::VAGUE_USER_TEMPLATE,
            &[
                ("user_question", &request.user_utterance),
                ("current_code", &request.current_code),
                ("memory", memory),
                ("history", history),
            ],
        );
        let map = generate_json(self.agent.as_ref(), &system, &user).await?;
        Ok(TurnResponse::Guided(GuidedReply {
            code: require_str(&map, "code")?,
            rationale: require_str(&map, "rationale")?,
            reflection: Some(require_str(&map, "reflection")?),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::turn::ChatTurn;
    use atelier_interaction::AgentError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedAgent {
        reply: &'static str,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedAgent {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerativeAgent for ScriptedAgent {
        async fn generate(
            &self,
            system: &str,
            user: &str,
        ) -> std::result::Result<String, AgentError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            Ok(self.reply.to_string())
        }
    }

    fn request(mode: Mode, count: u32) -> TurnRequest {
        TurnRequest {
            session_id: "s1".to_string(),
            version_id: "v1".to_string(),
            current_code: "function draw() {}".to_string(),
            current_code_description: "旋转的方块".to_string(),
            short_term_history: vec![ChatTurn::new("user", "你好")],
            user_utterance: "我想加一点流动感".to_string(),
            mode,
            interaction_count: count,
        }
    }

    #[tokio::test]
    async fn test_normal_passes_collaborator_object_through() {
        let agent = ScriptedAgent::new(r#"{"answer": "好的", "code": ""}"#);
        let composer = ResponseComposer::new(agent.clone());
        let response = composer
            .normal(&request(Mode::General, 1), "mem", "hist")
            .await
            .unwrap();
        match response {
            TurnResponse::Chat(value) => assert_eq!(value["answer"], "好的"),
            other => panic!("expected Chat, got {other:?}"),
        }
        let calls = agent.calls.lock().unwrap();
        assert!(calls[0].1.contains("旋转的方块"));
        assert!(calls[0].1.contains("function draw() {}"));
    }

    #[tokio::test]
    async fn test_transition_appends_mode_advice() {
        let agent = ScriptedAgent::new(r#"{"code": "c", "rationale": "r"}"#);
        let composer = ResponseComposer::new(agent);
        let response = composer
            .transition(&request(Mode::Transformative, 2), "mem", "hist")
            .await
            .unwrap();
        match response {
            TurnResponse::Transition(reply) => {
                assert_eq!(reply.code, "c");
                assert!(reply.advice.contains("**创意方法改变**"));
            }
            other => panic!("expected Transition, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transition_missing_field_is_malformed() {
        let agent = ScriptedAgent::new(r#"{"code": "c"}"#);
        let composer = ResponseComposer::new(agent);
        let err = composer
            .transition(&request(Mode::Explainable, 2), "m", "h")
            .await
            .unwrap_err();
        match err {
            AtelierError::MalformedOutput { field } => assert_eq!(field, "rationale"),
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn test_deep_matched_needs_no_agent() {
        let agent = ScriptedAgent::new("never called");
        let composer = ResponseComposer::new(agent.clone());
        let response = composer
            .deep_matched(
                Mode::Explorative,
                ReflectionCategory::ConceptConnection,
                "粒子",
            )
            .unwrap();
        match response {
            TurnResponse::Reflection(reply) => assert!(reply.reflection.contains("粒子")),
            other => panic!("expected Reflection, got {other:?}"),
        }
        assert!(agent.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deep_ambiguous_injects_vocabulary_and_validates() {
        let agent =
            ScriptedAgent::new(r#"{"code": "c", "rationale": "r", "reflection": "💬 问题"}"#);
        let composer = ResponseComposer::new(agent.clone());
        let response = composer
            .deep_ambiguous(&request(Mode::Explorative, 3), "mem", "hist")
            .await
            .unwrap();
        match response {
            TurnResponse::Guided(reply) => {
                assert_eq!(reply.reflection.as_deref(), Some("💬 问题"))
            }
            other => panic!("expected Guided, got {other:?}"),
        }
        let calls = agent.calls.lock().unwrap();
        // All three explorative directions must be offered in the system prompt.
        assert!(calls[0].0.contains("概念联系探索"));
        assert!(calls[0].0.contains("模块体验关系"));
        assert!(calls[0].0.contains("视觉情感一致性"));
    }

    #[tokio::test]
    async fn test_deep_ambiguous_missing_reflection_is_malformed() {
        let agent = ScriptedAgent::new(r#"{"code": "c", "rationale": "r"}"#);
        let composer = ResponseComposer::new(agent);
        let err = composer
            .deep_ambiguous(&request(Mode::Explainable, 3), "m", "h")
            .await
            .unwrap_err();
        match err {
            AtelierError::MalformedOutput { field } => assert_eq!(field, "reflection"),
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }
}
