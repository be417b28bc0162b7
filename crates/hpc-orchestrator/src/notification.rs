//! Transient failure notifications

use hpc_services::ServiceError;

/// The two external calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// Blueprint validation
    Validation,
    /// Cost estimation
    Cost,
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => f.write_str("validation"),
            Self::Cost => f.write_str("cost"),
        }
    }
}

/// Message published when a current call fails
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Which call failed
    pub kind: CallKind,
    /// Short headline
    pub title: String,
    /// User-facing description
    pub message: String,
    /// Underlying error
    pub error: ServiceError,
}

impl Notification {
    /// Notification for a failed call
    #[must_use]
    pub fn failure(kind: CallKind, error: ServiceError) -> Self {
        let (title, message) = match kind {
            CallKind::Validation => (
                "Validation Error",
                "Could not connect to the validation service.",
            ),
            CallKind::Cost => (
                "Cost Estimation Error",
                "Could not connect to the cost estimation service.",
            ),
        };
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            error,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.title, self.message, self.error)
    }
}
