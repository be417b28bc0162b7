//! Error types for the orchestrator

/// Orchestrator handle failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrchestratorError {
    /// The pipeline task is no longer running
    #[error("pipeline stopped")]
    Stopped,
}
