//! Topic extraction for reflection templates.

use std::sync::Arc;

use atelier_core::error::Result;
use atelier_interaction::GenerativeAgent;

use crate::prompts::{TOPIC_EXTRACTION_TEMPLATE, fill};

const TOPIC_SYSTEM_PROMPT: &str = "你是一个精准的对话主题提取器。只输出被要求的短语本身。";

/// Distills the core creative topic of the latest user question into a short
/// phrase, using retrieved memory and recent history as context.
pub struct TopicExtractor {
    agent: Arc<dyn GenerativeAgent>,
}

impl TopicExtractor {
    pub fn new(agent: Arc<dyn GenerativeAgent>) -> Self {
        Self { agent }
    }

    /// Returns a 2-8 character phrase naming the topic under discussion.
    /// Surrounding whitespace and a trailing period, if the model adds one,
    /// are stripped.
    pub async fn extract(&self, memory: &str, history: &str) -> Result<String> {
        let prompt = fill(
            TOPIC_EXTRACTION_TEMPLATE,
            &[("memory", memory), ("history", history)],
        );
        let raw = self.agent.generate(TOPIC_SYSTEM_PROMPT, &prompt).await?;
        Ok(raw.trim().trim_end_matches(['。', '.']).to_string())
    }
}
