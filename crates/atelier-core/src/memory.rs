//! The semantic version-memory contract.
//!
//! The store itself is an external collaborator; this module only fixes the
//! similarity-search contract the orchestrator depends on. Implementations
//! live outside the core (`atelier-interaction` ships an in-memory index for
//! development and tests; a vector database client slots in the same way).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A summarized historical version of the artifact, as retrieved by
/// similarity search. Read-only to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub version_id: String,
    pub ai_summary: String,
}

/// Similarity-search contract over historical version records.
///
/// `search` must filter to the given session, exclude the version currently
/// under discussion, rank by relevance (highest first) and return at most
/// `k` records. `add` upserts under the composite id `<session>_<version>`;
/// `delete` removes by the same id.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn search(
        &self,
        query: &str,
        session_id: &str,
        exclude_version_id: &str,
        k: usize,
    ) -> Result<Vec<MemoryRecord>>;

    async fn add(
        &self,
        session_id: &str,
        version_id: &str,
        content: &str,
        ai_summary: &str,
    ) -> Result<()>;

    async fn delete(&self, session_id: &str, version_id: &str) -> Result<()>;
}

/// Composes the document id used by `MemoryStore` implementations.
pub fn document_id(session_id: &str, version_id: &str) -> String {
    format!("{session_id}_{version_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id() {
        assert_eq!(document_id("s1", "v2"), "s1_v2");
    }
}
