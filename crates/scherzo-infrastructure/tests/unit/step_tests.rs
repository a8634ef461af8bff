//! Chain Step Tests

use scherzo_infrastructure::pipeline::{StepSpec, Target};
use serde_json::json;

#[test]
fn test_target_parse() {
    assert_eq!(Target::parse("$this"), Target::Host);
    assert_eq!(Target::parse("router"), Target::Service("router".to_string()));
    assert_eq!(Target::Host.to_string(), "$this");
}

#[test]
fn test_step_from_triple() {
    let step: StepSpec =
        serde_json::from_value(json!(["http", "parseRequest", "Parse request"])).unwrap();

    assert_eq!(step, StepSpec::service("http", "parseRequest", "Parse request"));
    assert!(!step.terminal);
}

#[test]
fn test_step_from_pair() {
    let step: StepSpec = serde_json::from_value(json!(["$this", "fallback"])).unwrap();

    assert_eq!(step.target, Target::Host);
    assert_eq!(step.selector, "fallback");
    assert!(step.label.is_empty());
}

#[test]
fn test_step_from_table() {
    let step: StepSpec = serde_json::from_value(json!({
        "target": "router",
        "selector": "executeRoute",
        "label": "Execute route",
        "terminal": true,
    }))
    .unwrap();

    assert_eq!(
        step,
        StepSpec::service("router", "executeRoute", "Execute route").terminal()
    );
}

#[test]
fn test_step_list() {
    let steps: Vec<StepSpec> = serde_json::from_value(json!([
        ["http", "parseRequest", "Parse request"],
        { "target": "$this", "selector": "fallback" },
    ]))
    .unwrap();

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1], StepSpec::host("fallback", ""));
}

#[test]
fn test_step_rejects_bad_shape() {
    let result: Result<StepSpec, _> = serde_json::from_value(json!(["only-target"]));
    assert!(result.is_err());
}
