use std::sync::Arc;

use hpc_blueprint::Session;
use hpc_catalog::{Catalog, OptionValue};
use hpc_cli::Shell;
use hpc_orchestrator::{OrchestratorHandle, PipelineConfig};
use hpc_test_utils::{
    network_error, scripted_cost, scripted_validator, ScriptedCost, ScriptedService,
    ScriptedValidator,
};

async fn run_script(
    script: &str,
    validator: ScriptedValidator,
    cost: ScriptedCost,
) -> (Session, String, Arc<ScriptedValidator>) {
    let validator = Arc::new(validator);
    let handle = OrchestratorHandle::spawn(
        PipelineConfig::default(),
        validator.clone(),
        Arc::new(cost),
    );
    let mut out = Vec::new();
    let session = Shell::new(Session::new(Catalog::builtin()), handle, &mut out)
        .run(script.as_bytes())
        .await
        .unwrap();
    (session, String::from_utf8(out).unwrap(), validator)
}

#[tokio::test(start_paused = true)]
async fn edits_are_rendered_and_checked_once() {
    let script = "\
add c2-standard-8
set c2-standard-8-1 cpuCount 16
show
wait
quit
";
    let (session, out, validator) = run_script(script, scripted_validator(), scripted_cost()).await;

    assert!(out.contains("added c2-standard-8-1\n"));
    assert!(out.contains("c2-standard-8-1.cpuCount = 16\n"));
    assert!(out.contains("        settings:\n          cpuCount: 16\n"));
    assert!(out.contains("Validation: valid\n"));
    assert!(out.contains("Estimated monthly cost: $100.00\n"));

    // Both edits land inside one quiet period
    assert_eq!(validator.call_count(), 1);
    assert!(validator.requests()[0].document.contains("cpuCount: 16"));
    assert_eq!(
        session.store().list()[0].value("cpuCount"),
        Some(&OptionValue::Number(16.0))
    );
}

#[tokio::test(start_paused = true)]
async fn bad_input_is_reported_not_fatal() {
    let script = "\
add tpu-v9
add vpc-network
set vpc-network-1 size 10
set missing-1 cpuCount 4
rm missing-1
frobnicate
ls
";
    let (session, out, _) = run_script(script, scripted_validator(), scripted_cost()).await;

    assert!(out.contains("error: unknown component definition: tpu-v9\n"));
    assert!(out.contains("error: component 'vpc-network' has no option 'size'\n"));
    assert!(out.contains("no such instance: missing-1\n"));
    assert!(out.contains("unknown command: frobnicate"));
    assert!(out.contains("vpc-network-1"));
    assert_eq!(session.store().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_values_warn_and_are_kept() {
    let script = "\
add c2-standard-8
set c2-standard-8-1 cpuCount 61
set c2-standard-8-1 os plan9
";
    let (session, out, _) = run_script(script, scripted_validator(), scripted_cost()).await;

    assert_eq!(out.matches("warning: c2-standard-8-1.").count(), 2);
    let instance = &session.store().list()[0];
    assert_eq!(instance.value("cpuCount"), Some(&OptionValue::Number(61.0)));
    assert_eq!(instance.value("os"), Some(&OptionValue::from("plan9")));
}

#[tokio::test(start_paused = true)]
async fn failures_surface_as_notifications() {
    let script = "\
add persistent-ssd
wait
status
";
    let (_, out, _) = run_script(
        script,
        ScriptedService::new(Err(network_error())),
        scripted_cost(),
    )
    .await;

    assert!(out.contains("Validation: failed: service unreachable: connection refused\n"));
    assert!(out.contains("! Validation Error: Could not connect to the validation service."));
}

#[tokio::test(start_paused = true)]
async fn removing_everything_returns_to_idle() {
    let script = "\
add hyperdisk-balanced
wait
rm hyperdisk-balanced-1
wait
show
";
    let (session, out, validator) = run_script(script, scripted_validator(), scripted_cost()).await;

    assert!(session.store().is_empty());
    assert_eq!(validator.call_count(), 1);
    assert!(out.ends_with(
        "Validation: idle\nCost: idle\n# Add components from the catalog to generate the YAML configuration.\n"
    ));
}

#[tokio::test(start_paused = true)]
async fn export_writes_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cluster.yaml");
    let script = format!("export {p}\nadd vpc-network\nexport {p}\n", p = path.display());

    let (session, out, _) = run_script(&script, scripted_validator(), scripted_cost()).await;

    assert!(out.contains("error: nothing configured yet\n"));
    assert!(out.contains(&format!("wrote {}", path.display())));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), session.document());
}

#[tokio::test(start_paused = true)]
async fn text_values_are_stored_as_typed() {
    let script = "\
add vpc-network
set vpc-network-1 name 1e3
set vpc-network-1 routingMode 007
add c2-standard-8
set c2-standard-8-1 os my  custom\tos
set c2-standard-8-1 cpuCount 1e1
";
    let (session, out, _) = run_script(script, scripted_validator(), scripted_cost()).await;
    let document = session.document();

    assert!(out.contains("vpc-network-1.name = 1e3\n"));
    assert!(document.contains("name: 1e3\n"));
    assert!(document.contains("routingMode: 007\n"));
    assert!(document.contains("os: my  custom\tos\n"));
    assert!(document.contains("cpuCount: 10\n"));

    let network = &session.store().list()[0];
    assert_eq!(network.value("name"), Some(&OptionValue::from("1e3")));
}
