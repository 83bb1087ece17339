//! Turn routing.
//!
//! One `handle_turn` call runs the whole pipeline for a request: retrieve
//! grounding memory, render it, classify the turn, dispatch to the matching
//! composer branch, and stage the session's current code on success. Nothing
//! conversational is persisted here; the interaction count arrives from the
//! caller each turn.

use std::sync::Arc;

use atelier_core::error::Result;
use atelier_core::memory::MemoryStore;
use atelier_core::stage::CodeStage;
use atelier_core::turn::{TurnRequest, TurnResponse};

use crate::classifier::{TurnPhase, classify};
use crate::composer::ResponseComposer;
use crate::format::{format_history, format_memories};
use crate::intent::match_category;

/// How many historical versions ground a turn.
const RETRIEVAL_K: usize = 3;

pub struct DialogueOrchestrator {
    memory: Arc<dyn MemoryStore>,
    composer: ResponseComposer,
    stage: Arc<CodeStage>,
}

impl DialogueOrchestrator {
    pub fn new(
        memory: Arc<dyn MemoryStore>,
        composer: ResponseComposer,
        stage: Arc<CodeStage>,
    ) -> Self {
        Self {
            memory,
            composer,
            stage,
        }
    }

    /// Runs one conversational turn end to end.
    ///
    /// Retrieval and composition failures abort the turn before the stage is
    /// touched, so a failed turn leaves the previously staged code in place.
    pub async fn handle_turn(&self, request: &TurnRequest) -> Result<TurnResponse> {
        let query = format!(
            "{}\n{}",
            request.current_code_description, request.user_utterance
        );
        let records = self
            .memory
            .search(&query, &request.session_id, &request.version_id, RETRIEVAL_K)
            .await?;
        let memory = format_memories(&records);
        let history = format_history(&request.short_term_history);

        let phase = classify(request.mode, request.interaction_count);
        let response = match phase {
            TurnPhase::Normal => {
                tracing::info!(
                    session_id = %request.session_id,
                    count = request.interaction_count,
                    "normal chat turn"
                );
                self.composer.normal(request, &memory, &history).await?
            }
            TurnPhase::Transition => {
                tracing::info!(
                    session_id = %request.session_id,
                    mode = %request.mode,
                    "transition turn"
                );
                self.composer.transition(request, &memory, &history).await?
            }
            TurnPhase::DeepReflection => {
                match match_category(request.mode, &request.user_utterance) {
                    Some(category) => {
                        tracing::info!(
                            session_id = %request.session_id,
                            category = category.label(),
                            "deep reflection, explicit intent"
                        );
                        self.composer.deep_matched(
                            request.mode,
                            category,
                            &request.current_code_description,
                        )?
                    }
                    None => {
                        tracing::info!(
                            session_id = %request.session_id,
                            mode = %request.mode,
                            "deep reflection, ambiguous intent"
                        );
                        self.composer
                            .deep_ambiguous(request, &memory, &history)
                            .await?
                    }
                }
            }
        };

        self.stage
            .update(&request.session_id, request.current_code.clone())
            .await;
        Ok(response)
    }

    /// Tears down a session's staged code. Conversational memory is owned by
    /// the caller and the memory store; neither is touched here.
    pub async fn end_session(&self, session_id: &str) {
        self.stage.clear(session_id).await;
        tracing::info!(session_id, "session ended");
    }
}
