//! Version memory ingestion and removal.

use std::sync::Arc;

use atelier_core::error::Result;
use atelier_core::memory::MemoryStore;
use atelier_interaction::CodeSummarizer;
use atelier_interaction::summarizer::FALLBACK_SUMMARY;

/// Ingests code versions into semantic memory, one summary per version.
///
/// Summarization degrades rather than fails: a collaborator error stores the
/// fallback summary so the version is still retrievable by its source text.
pub struct VersionMemoryService {
    summarizer: CodeSummarizer,
    store: Arc<dyn MemoryStore>,
}

impl VersionMemoryService {
    pub fn new(summarizer: CodeSummarizer, store: Arc<dyn MemoryStore>) -> Self {
        Self { summarizer, store }
    }

    /// Summarizes the code, stores the version, and returns the summary.
    /// Re-adding an existing (session, version) pair overwrites it.
    pub async fn add_version(
        &self,
        session_id: &str,
        version_id: &str,
        code: &str,
    ) -> Result<String> {
        let ai_summary = match self.summarizer.summarize(code).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(
                    session_id,
                    version_id,
                    error = %err,
                    "summarization failed, storing fallback summary"
                );
                FALLBACK_SUMMARY.to_string()
            }
        };
        let content = format!("代码内容总结: {ai_summary}\n\n--- 源代码 ---\n{code}");
        self.store
            .add(session_id, version_id, &content, &ai_summary)
            .await?;
        tracing::info!(session_id, version_id, "version memory stored");
        Ok(ai_summary)
    }

    /// Removes one version from memory. Unknown ids are a no-op.
    pub async fn delete_version(&self, session_id: &str, version_id: &str) -> Result<()> {
        self.store.delete(session_id, version_id).await?;
        tracing::info!(session_id, version_id, "version memory deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_interaction::{AgentError, GenerativeAgent, InMemoryVersionIndex};
    use async_trait::async_trait;

    struct FixedAgent(&'static str);

    #[async_trait]
    impl GenerativeAgent for FixedAgent {
        async fn generate(
            &self,
            _system: &str,
            _user: &str,
        ) -> std::result::Result<String, AgentError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingAgent;

    #[async_trait]
    impl GenerativeAgent for FailingAgent {
        async fn generate(
            &self,
            _system: &str,
            _user: &str,
        ) -> std::result::Result<String, AgentError> {
            Err(AgentError::ExecutionFailed("offline".to_string()))
        }
    }

    fn service(agent: Arc<dyn GenerativeAgent>) -> (VersionMemoryService, Arc<InMemoryVersionIndex>) {
        let index = Arc::new(InMemoryVersionIndex::new());
        let service = VersionMemoryService::new(CodeSummarizer::new(agent), index.clone());
        (service, index)
    }

    #[tokio::test]
    async fn test_add_version_stores_summary_and_source() {
        let (service, index) = service(Arc::new(FixedAgent("旋转的彩色方块")));
        let summary = service.add_version("s1", "v1", "let a;").await.unwrap();
        assert_eq!(summary, "旋转的彩色方块");

        // Retrievable by the source code text, excluded only by its own id.
        let hits = index.search("let a;", "s1", "other", 3).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].version_id, "v1");
        assert_eq!(hits[0].ai_summary, "旋转的彩色方块");
    }

    #[tokio::test]
    async fn test_summarizer_failure_degrades_to_fallback() {
        let (service, index) = service(Arc::new(FailingAgent));
        let summary = service.add_version("s1", "v1", "let a;").await.unwrap();
        assert_eq!(summary, FALLBACK_SUMMARY);
        let hits = index.search("let a;", "s1", "other", 3).await.unwrap();
        assert_eq!(hits[0].ai_summary, FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn test_delete_version_removes_record() {
        let (service, index) = service(Arc::new(FixedAgent("摘要")));
        service.add_version("s1", "v1", "let a;").await.unwrap();
        service.delete_version("s1", "v1").await.unwrap();
        let hits = index.search("let a;", "s1", "other", 3).await.unwrap();
        assert!(hits.is_empty());
        // Deleting again is a no-op.
        service.delete_version("s1", "v1").await.unwrap();
    }
}
