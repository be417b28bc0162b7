//! Per-kind request state with epoch-based staleness
//!
//! Every dispatch and every reset bumps the epoch. A completion carries the
//! epoch it was dispatched under and is applied only if that epoch is still
//! current; anything older is stale and dropped.

use hpc_services::ServiceError;

/// Lifecycle of one call kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Nothing requested
    #[default]
    Idle,
    /// A call is in flight
    Pending,
    /// The latest call succeeded
    Succeeded,
    /// The latest call failed
    Failed,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Whether a completion was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Epoch matched; state updated
    Applied,
    /// Epoch was superseded; state untouched
    Stale,
}

/// State of one call kind
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<R> {
    status: RequestStatus,
    result: Option<R>,
    error: Option<ServiceError>,
    epoch: u64,
}

impl<R> Default for RequestState<R> {
    fn default() -> Self {
        Self {
            status: RequestStatus::Idle,
            result: None,
            error: None,
            epoch: 0,
        }
    }
}

impl<R> RequestState<R> {
    /// Idle state at epoch 0
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a call: bump epoch, go `Pending`, clear previous outcome
    ///
    /// Returns the epoch the completion must carry.
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.status = RequestStatus::Pending;
        self.result = None;
        self.error = None;
        self.epoch
    }

    /// Apply a completion dispatched under `epoch`
    pub fn apply(&mut self, epoch: u64, outcome: Result<R, ServiceError>) -> ApplyOutcome {
        if epoch != self.epoch {
            return ApplyOutcome::Stale;
        }
        match outcome {
            Ok(result) => {
                self.status = RequestStatus::Succeeded;
                self.result = Some(result);
                self.error = None;
            }
            Err(error) => {
                self.status = RequestStatus::Failed;
                self.result = None;
                self.error = Some(error);
            }
        }
        ApplyOutcome::Applied
    }

    /// Back to `Idle`; in-flight completions become stale
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.status = RequestStatus::Idle;
        self.result = None;
        self.error = None;
    }

    /// Current status
    #[inline]
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Result of the latest successful call
    #[inline]
    #[must_use]
    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    /// Error of the latest failed call
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    /// Current epoch
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a call is in flight
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
