use std::sync::Arc;
use std::time::Duration;

use hpc_blueprint::PLACEHOLDER;
use hpc_orchestrator::{
    CallKind, OrchestratorHandle, PipelineConfig, PipelineSnapshot, RequestStatus,
};
use hpc_test_utils::{
    document_with, invalid_report, network_error, scripted_cost, scripted_validator,
    valid_report, ScriptedCost, ScriptedService, ScriptedValidator,
};

struct Harness {
    handle: OrchestratorHandle,
    validator: Arc<ScriptedValidator>,
    cost: Arc<ScriptedCost>,
}

fn start_with(config: PipelineConfig, validator: ScriptedValidator, cost: ScriptedCost) -> Harness {
    let validator = Arc::new(validator);
    let cost = Arc::new(cost);
    let handle = OrchestratorHandle::spawn(config, validator.clone(), cost.clone());
    Harness {
        handle,
        validator,
        cost,
    }
}

fn start() -> Harness {
    start_with(PipelineConfig::default(), scripted_validator(), scripted_cost())
}

async fn released(handle: &OrchestratorHandle, revision: u64) -> PipelineSnapshot {
    let mut rx = handle.subscribe();
    let snapshot = rx.wait_for(|s| s.revision >= revision).await.unwrap();
    snapshot.clone()
}

/// Let spawned tasks and the pipeline drain without reaching a debounce deadline
async fn settle_tasks() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn rapid_submissions_release_only_the_last() {
    let mut h = start();
    let first = document_with(&["c2-standard-8"]);
    let second = document_with(&["c2-standard-8", "vpc-network"]);

    h.handle.submit(first).unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    let rev = h.handle.submit(second.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(h.validator.call_count(), 0, "released before quiet period");

    let snapshot = h.handle.wait_until_settled(rev).await.unwrap();

    assert_eq!(h.validator.call_count(), 1);
    assert_eq!(h.cost.call_count(), 1);
    assert_eq!(h.validator.requests()[0].document, second);
    assert_eq!(snapshot.document.as_deref(), Some(second.as_str()));
    assert_eq!(snapshot.validation.status(), RequestStatus::Succeeded);
    assert_eq!(snapshot.validation.result(), Some(&valid_report()));
    assert_eq!(snapshot.cost.status(), RequestStatus::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn placeholder_never_dispatches() {
    let mut h = start();
    let rev = h.handle.submit(PLACEHOLDER).unwrap();
    let snapshot = h.handle.wait_until_settled(rev).await.unwrap();

    assert_eq!(h.validator.call_count(), 0);
    assert_eq!(h.cost.call_count(), 0);
    assert_eq!(snapshot.validation.status(), RequestStatus::Idle);
    assert_eq!(snapshot.cost.status(), RequestStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn unchanged_release_does_not_redispatch() {
    let mut h = start();
    let doc = document_with(&["persistent-ssd"]);

    let rev = h.handle.submit(doc.clone()).unwrap();
    h.handle.wait_until_settled(rev).await.unwrap();
    let rev = h.handle.submit(doc).unwrap();
    let snapshot = h.handle.wait_until_settled(rev).await.unwrap();

    assert_eq!(snapshot.revision, rev);
    assert_eq!(h.validator.call_count(), 1);
    assert_eq!(h.cost.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn late_first_response_is_discarded() {
    let validator = ScriptedService::new(Ok(valid_report()));
    let gate_a = validator.push_gate();
    let gate_b = validator.push_gate();
    let mut h = start_with(PipelineConfig::default(), validator, scripted_cost());

    let doc_a = document_with(&["c2-standard-8"]);
    let doc_b = document_with(&["a2-highgpu-1g"]);

    let rev_a = h.handle.submit(doc_a.clone()).unwrap();
    let first = released(&h.handle, rev_a).await;
    let rev_b = h.handle.submit(doc_b.clone()).unwrap();
    let second = released(&h.handle, rev_b).await;

    assert_eq!(h.validator.call_count(), 2);
    assert_eq!(h.validator.requests()[0].document, doc_a);
    assert_eq!(h.validator.requests()[1].document, doc_b);
    assert!(second.validation.epoch() > first.validation.epoch());

    // Stale answer arrives first: ignored, still pending
    gate_a.send(Ok(invalid_report(&["stale"]))).unwrap();
    settle_tasks().await;
    let snapshot = h.handle.snapshot();
    assert_eq!(snapshot.validation.status(), RequestStatus::Pending);
    assert_eq!(snapshot.validation.result(), None);

    gate_b.send(Ok(invalid_report(&["current"]))).unwrap();
    let snapshot = h.handle.wait_until_settled(rev_b).await.unwrap();
    assert_eq!(snapshot.validation.status(), RequestStatus::Succeeded);
    assert_eq!(snapshot.validation.result(), Some(&invalid_report(&["current"])));
}

#[tokio::test(start_paused = true)]
async fn second_response_first_then_stale_is_a_no_op() {
    let validator = ScriptedService::new(Ok(valid_report()));
    let gate_a = validator.push_gate();
    let gate_b = validator.push_gate();
    let mut h = start_with(PipelineConfig::default(), validator, scripted_cost());

    let rev_a = h.handle.submit(document_with(&["c2-standard-8"])).unwrap();
    released(&h.handle, rev_a).await;
    let rev_b = h.handle.submit(document_with(&["vpc-network"])).unwrap();
    released(&h.handle, rev_b).await;

    gate_b.send(Ok(valid_report())).unwrap();
    let settled = h.handle.wait_until_settled(rev_b).await.unwrap();

    gate_a.send(Ok(invalid_report(&["stale"]))).unwrap();
    settle_tasks().await;
    assert_eq!(h.handle.snapshot(), settled);
}

#[tokio::test(start_paused = true)]
async fn placeholder_discards_in_flight_calls() {
    let validator = ScriptedService::new(Ok(valid_report()));
    let gate = validator.push_gate();
    let mut h = start_with(PipelineConfig::default(), validator, scripted_cost());

    let rev = h.handle.submit(document_with(&["hyperdisk-balanced"])).unwrap();
    released(&h.handle, rev).await;
    let rev = h.handle.submit(PLACEHOLDER).unwrap();
    let snapshot = h.handle.wait_until_settled(rev).await.unwrap();
    assert_eq!(snapshot.validation.status(), RequestStatus::Idle);

    gate.send(Ok(invalid_report(&["late"]))).unwrap();
    settle_tasks().await;
    let snapshot = h.handle.snapshot();
    assert_eq!(snapshot.validation.status(), RequestStatus::Idle);
    assert_eq!(snapshot.validation.result(), None);
    assert_eq!(snapshot.cost.status(), RequestStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn failure_sets_failed_and_notifies() {
    let mut h = start_with(
        PipelineConfig::default(),
        ScriptedService::new(Err(network_error())),
        scripted_cost(),
    );
    let mut notifications = h.handle.notifications();

    let rev = h.handle.submit(document_with(&["c2-standard-8"])).unwrap();
    let snapshot = h.handle.wait_until_settled(rev).await.unwrap();

    assert_eq!(snapshot.validation.status(), RequestStatus::Failed);
    assert_eq!(snapshot.validation.error(), Some(&network_error()));
    assert_eq!(snapshot.cost.status(), RequestStatus::Succeeded);

    let note = notifications.recv().await.unwrap();
    assert_eq!(note.kind, CallKind::Validation);
    assert_eq!(note.error, network_error());
    assert!(notifications.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn success_after_failure_clears_the_error() {
    let validator = scripted_validator();
    validator.push_reply(Err(network_error()));
    let mut h = start_with(PipelineConfig::default(), validator, scripted_cost());

    let rev = h.handle.submit(document_with(&["c2-standard-8"])).unwrap();
    let failed = h.handle.wait_until_settled(rev).await.unwrap();
    assert_eq!(failed.validation.status(), RequestStatus::Failed);

    let rev = h.handle.submit(document_with(&["a2-highgpu-1g"])).unwrap();
    let recovered = h.handle.wait_until_settled(rev).await.unwrap();
    assert_eq!(recovered.validation.status(), RequestStatus::Succeeded);
    assert_eq!(recovered.validation.error(), None);
    assert_eq!(h.validator.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn requests_carry_configured_location_and_debounce() {
    let config = PipelineConfig::default()
        .with_debounce(Duration::from_millis(250))
        .with_location("europe-west4", "europe-west4-b");
    let mut h = start_with(config, scripted_validator(), scripted_cost());

    h.handle.submit(document_with(&["vpc-network"])).unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    settle_tasks().await;

    let requests = h.cost.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].region, "europe-west4");
    assert_eq!(requests[0].zone, "europe-west4-b");
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_pipeline() {
    let h = start();
    let rx = h.handle.subscribe();
    h.handle.shutdown().await;
    assert!(rx.has_changed().is_err());
}
