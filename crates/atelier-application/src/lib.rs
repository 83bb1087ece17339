//! Application services of the Atelier workspace.
//!
//! Routes conversational turns through the classify/match/compose pipeline
//! and hosts the surrounding services: version memory ingestion, version
//! merging, and inspiration style application.

pub mod classifier;
pub mod composer;
pub mod format;
pub mod intent;
pub mod merge;
pub mod orchestrator;
pub mod prompts;
pub mod styling;
pub mod templates;
pub mod topic;
pub mod versions;

pub use classifier::{TurnPhase, classify};
pub use composer::ResponseComposer;
pub use intent::match_category;
pub use merge::{MergeRequest, MergeService};
pub use orchestrator::DialogueOrchestrator;
pub use styling::{InspirationExample, InspirationLibrary, StyleService};
pub use topic::TopicExtractor;
pub use versions::VersionMemoryService;
