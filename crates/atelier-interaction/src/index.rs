//! In-memory implementation of the version-memory contract.
//!
//! This is the development and test backend: relevance ranking is a naive
//! lexical overlap between the query and the stored document, which is enough
//! to exercise the orchestrator's retrieval contract (session filtering,
//! version exclusion, k-bounding, relevance order). A vector database client
//! implements the same `MemoryStore` trait for production use.

use async_trait::async_trait;
use atelier_core::Result;
use atelier_core::memory::{MemoryRecord, MemoryStore, document_id};
use tokio::sync::RwLock;

struct IndexedVersion {
    doc_id: String,
    session_id: String,
    version_id: String,
    content: String,
    ai_summary: String,
}

/// Session-scoped, upserting in-memory version index.
#[derive(Default)]
pub struct InMemoryVersionIndex {
    entries: RwLock<Vec<IndexedVersion>>,
}

impl InMemoryVersionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexical overlap score: occurrences of query tokens in the document.
    fn score(query: &str, content: &str) -> usize {
        query
            .split_whitespace()
            .filter(|token| !token.is_empty())
            .map(|token| content.matches(token).count())
            .sum()
    }
}

#[async_trait]
impl MemoryStore for InMemoryVersionIndex {
    async fn search(
        &self,
        query: &str,
        session_id: &str,
        exclude_version_id: &str,
        k: usize,
    ) -> Result<Vec<MemoryRecord>> {
        let entries = self.entries.read().await;
        let mut scored: Vec<(usize, MemoryRecord)> = entries
            .iter()
            .filter(|entry| {
                entry.session_id == session_id && entry.version_id != exclude_version_id
            })
            .map(|entry| {
                (
                    Self::score(query, &entry.content),
                    MemoryRecord {
                        version_id: entry.version_id.clone(),
                        ai_summary: entry.ai_summary.clone(),
                    },
                )
            })
            .collect();

        // Stable sort keeps insertion order for equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, record)| record)
            .collect())
    }

    async fn add(
        &self,
        session_id: &str,
        version_id: &str,
        content: &str,
        ai_summary: &str,
    ) -> Result<()> {
        let doc_id = document_id(session_id, version_id);
        let mut entries = self.entries.write().await;
        entries.retain(|entry| entry.doc_id != doc_id);
        entries.push(IndexedVersion {
            doc_id,
            session_id: session_id.to_string(),
            version_id: version_id.to_string(),
            content: content.to_string(),
            ai_summary: ai_summary.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, session_id: &str, version_id: &str) -> Result<()> {
        let doc_id = document_id(session_id, version_id);
        let mut entries = self.entries.write().await;
        entries.retain(|entry| entry.doc_id != doc_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_index() -> InMemoryVersionIndex {
        let index = InMemoryVersionIndex::new();
        index
            .add("s1", "v1", "rotating cubes with noise", "旋转立方体")
            .await
            .unwrap();
        index
            .add("s1", "v2", "noise noise noise field", "噪声场")
            .await
            .unwrap();
        index
            .add("s2", "v1", "noise in another session", "其他会话")
            .await
            .unwrap();
        index
    }

    #[tokio::test]
    async fn test_search_filters_session_and_excludes_version() {
        let index = seeded_index().await;
        let records = index.search("noise", "s1", "v1", 3).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version_id, "v2");
    }

    #[tokio::test]
    async fn test_search_ranks_by_overlap_and_bounds_k() {
        let index = seeded_index().await;
        let records = index.search("noise", "s1", "none", 3).await.unwrap();
        assert_eq!(records.len(), 2);
        // v2 contains "noise" three times, v1 once
        assert_eq!(records[0].version_id, "v2");
        assert_eq!(records[1].version_id, "v1");

        let bounded = index.search("noise", "s1", "none", 1).await.unwrap();
        assert_eq!(bounded.len(), 1);
    }

    #[tokio::test]
    async fn test_add_upserts_same_document_id() {
        let index = seeded_index().await;
        index
            .add("s1", "v1", "rewritten content", "新摘要")
            .await
            .unwrap();
        let records = index.search("rewritten", "s1", "none", 3).await.unwrap();
        let v1 = records.iter().find(|r| r.version_id == "v1").unwrap();
        assert_eq!(v1.ai_summary, "新摘要");
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let index = seeded_index().await;
        index.delete("s1", "v2").await.unwrap();
        let records = index.search("noise", "s1", "none", 3).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version_id, "v1");
    }
}
