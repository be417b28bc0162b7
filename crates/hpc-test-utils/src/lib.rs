//! Testing utilities for the HPC blueprint workspace
//!
//! Shared fixtures and scripted fake services.

#![allow(missing_docs)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hpc_blueprint::Session;
use hpc_catalog::Catalog;
use hpc_services::{
    CostEstimate, CostService, ServiceError, ServiceRequest, ValidationReport, ValidationService,
    BREAKDOWN_LABELS,
};
use indexmap::IndexMap;
use tokio::sync::oneshot;

/// Rendered document for a session holding the given definitions
pub fn document_with(definition_ids: &[&str]) -> String {
    let mut session = Session::new(Catalog::builtin());
    for id in definition_ids {
        session.add(id).unwrap();
    }
    session.document()
}

pub fn valid_report() -> ValidationReport {
    ValidationReport::valid()
}

pub fn invalid_report(errors: &[&str]) -> ValidationReport {
    ValidationReport::invalid(errors.iter().map(|e| (*e).to_string()).collect())
}

/// Estimate with every fixed label present; `total` goes to the first label
pub fn cost_estimate(total: f64) -> CostEstimate {
    let mut breakdown = IndexMap::new();
    for (i, label) in BREAKDOWN_LABELS.iter().enumerate() {
        breakdown.insert((*label).to_string(), if i == 0 { total } else { 0.0 });
    }
    CostEstimate {
        total_cost: total,
        breakdown,
    }
}

pub fn network_error() -> ServiceError {
    ServiceError::Network("connection refused".to_string())
}

enum Step<R> {
    Reply(Result<R, ServiceError>),
    Gate(oneshot::Receiver<Result<R, ServiceError>>),
}

/// Fake service answering from a script
///
/// Each call consumes the next scripted step: either an immediate reply or a
/// gate the test resolves later through the returned sender. Once the script
/// is exhausted the fallback reply is used. Every request is recorded.
pub struct ScriptedService<R> {
    steps: Mutex<VecDeque<Step<R>>>,
    fallback: Result<R, ServiceError>,
    requests: Mutex<Vec<ServiceRequest>>,
}

impl<R: Clone + Send + 'static> ScriptedService<R> {
    pub fn new(fallback: Result<R, ServiceError>) -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: Result<R, ServiceError>) {
        self.steps.lock().unwrap().push_back(Step::Reply(reply));
    }

    /// Next call blocks until the returned sender fires
    pub fn push_gate(&self) -> oneshot::Sender<Result<R, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step::Gate(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    async fn answer(&self, request: &ServiceRequest) -> Result<R, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(reply)) => reply,
            Some(Step::Gate(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ServiceError::Backend("gate dropped".to_string()))),
            None => self.fallback.clone(),
        }
    }
}

pub type ScriptedValidator = ScriptedService<ValidationReport>;
pub type ScriptedCost = ScriptedService<CostEstimate>;

pub fn scripted_validator() -> ScriptedValidator {
    ScriptedService::new(Ok(valid_report()))
}

pub fn scripted_cost() -> ScriptedCost {
    ScriptedService::new(Ok(cost_estimate(100.0)))
}

#[async_trait]
impl ValidationService for ScriptedService<ValidationReport> {
    async fn validate(&self, request: &ServiceRequest) -> Result<ValidationReport, ServiceError> {
        self.answer(request).await
    }
}

#[async_trait]
impl CostService for ScriptedService<CostEstimate> {
    async fn estimate(&self, request: &ServiceRequest) -> Result<CostEstimate, ServiceError> {
        self.answer(request).await
    }
}
