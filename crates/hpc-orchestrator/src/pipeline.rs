//! Document pipeline actor
//!
//! One task owns the debouncer and both request states. It handles three
//! event sources one at a time:
//! - document submissions from the handle
//! - expiry of the debounce deadline
//! - completions of spawned service calls, tagged with their epoch
//!
//! State is published through a `watch` channel after every change and
//! failures of current calls go out on a `broadcast` channel.

use std::sync::Arc;

use hpc_blueprint::is_placeholder;
use hpc_services::{
    CostEstimate, CostService, ServiceError, ServiceRequest, ValidationReport, ValidationService,
};
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::config::PipelineConfig;
use crate::debounce::Debouncer;
use crate::error::OrchestratorError;
use crate::notification::{CallKind, Notification};
use crate::request_state::{ApplyOutcome, RequestState};

const NOTIFICATION_CAPACITY: usize = 16;

/// Observable pipeline state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSnapshot {
    /// Revision of the last released submission (0 before any release)
    pub revision: u64,
    /// Last released document
    pub document: Option<String>,
    /// Validation call state
    pub validation: RequestState<ValidationReport>,
    /// Cost call state
    pub cost: RequestState<CostEstimate>,
}

impl PipelineSnapshot {
    /// Whether either call is in flight
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.validation.is_pending() || self.cost.is_pending()
    }
}

#[derive(Debug)]
struct Submission {
    revision: u64,
    document: String,
}

#[derive(Debug)]
enum Completion {
    Validation(u64, Result<ValidationReport, ServiceError>),
    Cost(u64, Result<CostEstimate, ServiceError>),
}

/// Handle to a running pipeline
///
/// Dropping the handle (or calling [`shutdown`](Self::shutdown)) stops the
/// pipeline task.
#[derive(Debug)]
pub struct OrchestratorHandle {
    inputs: mpsc::UnboundedSender<Submission>,
    revision: u64,
    snapshots: watch::Receiver<PipelineSnapshot>,
    notifications: broadcast::Sender<Notification>,
    task: JoinHandle<()>,
}

impl OrchestratorHandle {
    /// Start the pipeline on the current tokio runtime
    #[must_use]
    pub fn spawn(
        config: PipelineConfig,
        validator: Arc<dyn ValidationService>,
        coster: Arc<dyn CostService>,
    ) -> Self {
        let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(PipelineSnapshot::default());
        let (notifications_tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        let pipeline = Pipeline {
            debouncer: Debouncer::new(config.debounce),
            config,
            validator,
            coster,
            state: PipelineSnapshot::default(),
            snapshots: snapshots_tx,
            notifications: notifications_tx.clone(),
            done_tx,
        };
        let task = tokio::spawn(pipeline.run(inputs_rx, done_rx));

        Self {
            inputs: inputs_tx,
            revision: 0,
            snapshots: snapshots_rx,
            notifications: notifications_tx,
            task,
        }
    }

    /// Submit the current document; returns its revision
    ///
    /// # Errors
    /// `OrchestratorError::Stopped` if the pipeline task has ended
    pub fn submit(&mut self, document: impl Into<String>) -> Result<u64, OrchestratorError> {
        let revision = self.revision + 1;
        self.inputs
            .send(Submission {
                revision,
                document: document.into(),
            })
            .map_err(|_| OrchestratorError::Stopped)?;
        self.revision = revision;
        Ok(revision)
    }

    /// Revision of the latest submission
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver for state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.snapshots.clone()
    }

    /// Receiver for failure notifications
    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Wait until `revision` has been released and no call is in flight
    ///
    /// # Errors
    /// `OrchestratorError::Stopped` if the pipeline ends first
    pub async fn wait_until_settled(
        &self,
        revision: u64,
    ) -> Result<PipelineSnapshot, OrchestratorError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx
            .wait_for(|s| s.revision >= revision && !s.is_busy())
            .await
            .map_err(|_| OrchestratorError::Stopped)?;
        Ok(snapshot.clone())
    }

    /// Stop the pipeline and wait for its task to finish
    pub async fn shutdown(self) {
        let Self { inputs, task, .. } = self;
        drop(inputs);
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "pipeline task ended abnormally");
        }
    }
}

struct Pipeline {
    config: PipelineConfig,
    validator: Arc<dyn ValidationService>,
    coster: Arc<dyn CostService>,
    debouncer: Debouncer<Submission>,
    state: PipelineSnapshot,
    snapshots: watch::Sender<PipelineSnapshot>,
    notifications: broadcast::Sender<Notification>,
    done_tx: mpsc::UnboundedSender<Completion>,
}

impl Pipeline {
    async fn run(
        mut self,
        mut inputs: mpsc::UnboundedReceiver<Submission>,
        mut done_rx: mpsc::UnboundedReceiver<Completion>,
    ) {
        tracing::debug!(debounce_ms = self.config.debounce.as_millis(), "pipeline started");

        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                input = inputs.recv() => match input {
                    Some(submission) => self.debouncer.push(submission, Instant::now()),
                    None => break,
                },
                () = until(deadline) => {
                    if let Some(submission) = self.debouncer.take_ready(Instant::now()) {
                        self.release(submission);
                    }
                }
                Some(completion) = done_rx.recv() => self.complete(completion),
            }
        }

        tracing::debug!("pipeline stopped");
    }

    fn release(&mut self, submission: Submission) {
        let Submission { revision, document } = submission;
        self.state.revision = revision;

        if self.state.document.as_deref() == Some(document.as_str()) {
            tracing::debug!(revision, "released document unchanged");
        } else if is_placeholder(&document) {
            tracing::debug!(revision, "nothing configured, resetting");
            self.state.validation.reset();
            self.state.cost.reset();
            self.state.document = Some(document);
        } else {
            self.dispatch(&document);
            self.state.document = Some(document);
        }

        self.publish();
    }

    fn dispatch(&mut self, document: &str) {
        let request = Arc::new(
            ServiceRequest::new(document).with_location(&self.config.region, &self.config.zone),
        );

        let epoch = self.state.validation.begin();
        let validator = Arc::clone(&self.validator);
        let done = self.done_tx.clone();
        let req = Arc::clone(&request);
        tokio::spawn(async move {
            let outcome = validator.validate(&req).await;
            // Receiver only disappears when the pipeline stops
            let _ = done.send(Completion::Validation(epoch, outcome));
        });

        let cost_epoch = self.state.cost.begin();
        let coster = Arc::clone(&self.coster);
        let done = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome = coster.estimate(&request).await;
            let _ = done.send(Completion::Cost(cost_epoch, outcome));
        });

        tracing::info!(
            validation_epoch = epoch,
            cost_epoch,
            bytes = document.len(),
            "dispatched blueprint"
        );
    }

    fn complete(&mut self, completion: Completion) {
        let (kind, epoch, error, outcome) = match completion {
            Completion::Validation(epoch, result) => {
                let error = result.as_ref().err().cloned();
                let outcome = self.state.validation.apply(epoch, result);
                (CallKind::Validation, epoch, error, outcome)
            }
            Completion::Cost(epoch, result) => {
                let error = result.as_ref().err().cloned();
                let outcome = self.state.cost.apply(epoch, result);
                (CallKind::Cost, epoch, error, outcome)
            }
        };

        if outcome == ApplyOutcome::Stale {
            tracing::debug!(%kind, epoch, "discarding stale response");
            return;
        }

        self.publish();

        if let Some(error) = error {
            tracing::warn!(%kind, %error, "service call failed");
            // No subscribers is fine
            let _ = self.notifications.send(Notification::failure(kind, error));
        } else {
            tracing::debug!(%kind, epoch, "service call succeeded");
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
