pub mod agent;
pub mod azure;
pub mod index;
pub mod summarizer;

pub use agent::{AgentError, GenerativeAgent, generate_json};
pub use azure::AzureOpenAiAgent;
pub use index::InMemoryVersionIndex;
pub use summarizer::CodeSummarizer;
