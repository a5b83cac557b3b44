mod common;

use archgraph_core::analysis::ControllerReachability;
use archgraph_core::config::*;
use archgraph_core::AnalysisConfig;
use common::*;
use serde_json::{json, Value};

const CTRL: &str = "app.web.OrderController";

fn routed(name: &str, body: Vec<Value>) -> Value {
    json!({
        "name": name,
        "annotations": [ann("org.springframework.web.bind.annotation.GetMapping")],
        "body": body,
    })
}

fn controller(functions: Vec<Value>) -> Value {
    json!({"name": CTRL, "annotations": [ann(DEFAULT_CONTROLLER_ANNOTATION)], "functions": functions})
}

fn roots(reach: &ControllerReachability, method: &str) -> Vec<String> {
    reach
        .roots_for(&format!("{CTRL}::{method}"))
        .map(|r| r.iter().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn test_transitive_same_class_calls() {
    let model = model(json!({
        "classes": [controller(vec![
            routed("list", vec![call(CTRL, "load")]),
            function("load", vec![call(CTRL, "query")]),
            function("query", vec![]),
            function("unused", vec![]),
        ])],
    }));
    let reach = ControllerReachability::build(&model, &AnalysisConfig::default());

    assert_eq!(reach.entry_point_count(), 1);
    assert_eq!(roots(&reach, "query"), vec![format!("{CTRL}::list")]);
    assert_eq!(roots(&reach, "list"), vec![format!("{CTRL}::list")]);
    assert!(roots(&reach, "unused").is_empty());
}

#[test]
fn test_shared_helper_has_every_root() {
    let model = model(json!({
        "classes": [controller(vec![
            routed("a", vec![call(CTRL, "shared")]),
            routed("b", vec![call(CTRL, "shared")]),
            function("shared", vec![]),
        ])],
    }));
    let reach = ControllerReachability::build(&model, &AnalysisConfig::default());

    assert_eq!(roots(&reach, "shared"), vec![format!("{CTRL}::a"), format!("{CTRL}::b")]);
}

#[test]
fn test_recursive_calls_terminate() {
    let model = model(json!({
        "classes": [controller(vec![
            routed("entry", vec![call(CTRL, "ping")]),
            function("ping", vec![call(CTRL, "pong")]),
            function("pong", vec![call(CTRL, "ping")]),
        ])],
    }));
    let reach = ControllerReachability::build(&model, &AnalysisConfig::default());

    assert_eq!(roots(&reach, "pong"), vec![format!("{CTRL}::entry")]);
    assert_eq!(reach.reachable_method_count(), 3);
}

#[test]
fn test_calls_into_other_classes_are_not_followed() {
    let model = model(json!({
        "classes": [
            controller(vec![routed("entry", vec![call("app.OrderService", "run")])]),
            {"name": "app.OrderService", "functions": [function("run", vec![])]},
        ],
    }));
    let reach = ControllerReachability::build(&model, &AnalysisConfig::default());

    assert!(reach.roots_for("app.OrderService::run").is_none());
}

#[test]
fn test_disabled_scan_is_empty() {
    let model = model(json!({
        "classes": [controller(vec![routed("entry", vec![])])],
    }));
    let mut config = AnalysisConfig::default();
    config.scan.spring = false;
    let reach = ControllerReachability::build(&model, &config);

    assert_eq!(reach.entry_point_count(), 0);
    assert!(roots(&reach, "entry").is_empty());
}
