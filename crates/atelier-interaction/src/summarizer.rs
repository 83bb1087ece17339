//! Code summarizer.
//!
//! Wraps the generative agent with a fixed system prompt to produce the short
//! visual-behavior summary stored alongside each version in memory.

use crate::agent::{AgentError, GenerativeAgent};
use std::sync::Arc;

/// Fallback summary stored when summarization fails; callers decide whether
/// to degrade to it or propagate the error.
pub const FALLBACK_SUMMARY: &str = "生成 AI 摘要失败。";

const SUMMARY_SYSTEM_PROMPT: &str = "\
# 你是一个P5.js代码分析专家。

# 你的任务是分析给定的p5.js代码片段，并生成一个简洁的、40字以内的摘要。
# 重点描述代码的功能和**视觉表现**。

# 任务要求：
- **只关注代码的视觉表现，用最直观地方法描述code，避免解释具体语法或细节**。
- **绝对不要提到代码语言或代码层级的细节**。
- **摘要必须清晰、简洁，仅包含功能描述**。

# 返回要求：
- **摘要内容只能使用中文，严禁使用任何其他语言！**
- **摘要长度严格限制在40字以内！**
";

/// Generates concise Chinese summaries of p5.js sketches.
pub struct CodeSummarizer {
    agent: Arc<dyn GenerativeAgent>,
}

impl CodeSummarizer {
    pub fn new(agent: Arc<dyn GenerativeAgent>) -> Self {
        Self { agent }
    }

    /// Summarizes the given code in one generation call.
    pub async fn summarize(&self, code: &str) -> Result<String, AgentError> {
        let user = format!("请为以下代码生成摘要:\n\n```javascript\n{code}\n```");
        let summary = self.agent.generate(SUMMARY_SYSTEM_PROMPT, &user).await?;
        Ok(summary.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedAgent(&'static str);

    #[async_trait]
    impl GenerativeAgent for FixedAgent {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, AgentError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingAgent;

    #[async_trait]
    impl GenerativeAgent for FailingAgent {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, AgentError> {
            Err(AgentError::ExecutionFailed("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_summarize_trims_reply() {
        let summarizer = CodeSummarizer::new(Arc::new(FixedAgent(" 彩色粒子围绕中心旋转 \n")));
        let summary = summarizer.summarize("let x;").await.unwrap();
        assert_eq!(summary, "彩色粒子围绕中心旋转");
    }

    #[tokio::test]
    async fn test_summarize_propagates_failure() {
        let summarizer = CodeSummarizer::new(Arc::new(FailingAgent));
        let err = summarizer.summarize("let x;").await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }
}
