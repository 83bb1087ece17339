pub mod config;
pub mod error;
pub mod memory;
pub mod mode;
pub mod stage;
pub mod turn;

// Re-export common error type
pub use error::{AtelierError, Result};
pub use mode::{Mode, ReflectionCategory};
