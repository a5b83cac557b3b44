//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use archgraph_core::config::*;
use archgraph_core::{AnalysisConfig, ArchitectureAnalyzer, ArchitectureGraph, NodeType, ProgramModel, RelationshipType};
use serde_json::{json, Value};

pub fn model(value: Value) -> ProgramModel {
    serde_json::from_value(value).expect("fixture model should deserialize")
}

pub fn analyze(value: Value) -> ArchitectureGraph {
    analyze_with(AnalysisConfig::default(), value)
}

pub fn analyze_with(config: AnalysisConfig, value: Value) -> ArchitectureGraph {
    let graph = ArchitectureAnalyzer::new(config).analyze(&model(value));
    assert!(
        graph.dangling_relationships().is_empty(),
        "dangling relationships: {:?}",
        graph.dangling_relationships()
    );
    graph
}

pub fn has_rel(graph: &ArchitectureGraph, from: &str, to: &str, rel_type: RelationshipType) -> bool {
    graph
        .relationships()
        .iter()
        .any(|r| r.from_id == from && r.to_id == to && r.rel_type == rel_type)
}

pub fn node_type(graph: &ArchitectureGraph, id: &str) -> Option<NodeType> {
    graph.node(id).map(|n| n.node_type)
}

// =============================================================================
// Types and expressions
// =============================================================================

pub fn ty(name: &str) -> Value {
    json!({"kind": "class", "name": name})
}

pub fn generic(name: &str, args: Vec<Value>) -> Value {
    json!({"kind": "class", "name": name, "args": args})
}

pub fn param(owner: &str, name: &str) -> Value {
    json!({"kind": "param", "owner": owner, "name": name})
}

pub fn value(ty: Value) -> Value {
    json!({"kind": "value", "type": ty})
}

pub fn new(class: &str) -> Value {
    json!({"kind": "new", "class": class})
}

/// A call on a receiver typed as the capability `owner`.
pub fn call_on(owner: &str, method: &str, args: Vec<Value>, result: Value) -> Value {
    json!({
        "kind": "call",
        "owner": owner,
        "method": method,
        "receiver": value(ty(owner)),
        "args": args,
        "type": result,
    })
}

/// A call to a method declared by `owner` without a typed receiver.
pub fn call(owner: &str, method: &str) -> Value {
    json!({"kind": "call", "owner": owner, "method": method})
}

pub fn send(request: &str) -> Value {
    call_on(DEFAULT_REQUEST_SUPERVISOR, "send", vec![new(request)], json!({"kind": "star"}))
}

// =============================================================================
// Declarations
// =============================================================================

pub fn ann(name: &str) -> Value {
    json!({"name": name})
}

pub fn aggregate_ann(aggregate: &str, role: &str, root: bool) -> Value {
    json!({
        "name": DEFAULT_AGGREGATE_ANNOTATION,
        "args": {"aggregate": aggregate, "type": role, "root": root},
    })
}

pub fn function(name: &str, body: Vec<Value>) -> Value {
    json!({"name": name, "body": body})
}

/// A request class implementing the request parameter capability.
pub fn request(name: &str) -> Value {
    json!({"name": name, "supertypes": [ty(DEFAULT_REQUEST_PARAM)]})
}

/// A nested request class.
pub fn nested_request(outer: &str, simple: &str) -> Value {
    json!({
        "name": format!("{outer}.{simple}"),
        "outer": outer,
        "supertypes": [ty(DEFAULT_REQUEST_PARAM)],
    })
}

/// A command handler for `command` with the given functions.
pub fn command_handler(name: &str, command: &str, functions: Vec<Value>) -> Value {
    json!({
        "name": name,
        "supertypes": [generic(DEFAULT_COMMAND_HANDLER, vec![ty(command), ty("kotlin.Unit")])],
        "functions": functions,
    })
}

pub fn root_entity(name: &str, aggregate: &str, methods: &[&str]) -> Value {
    let functions: Vec<Value> = methods.iter().map(|m| function(m, vec![])).collect();
    json!({
        "name": name,
        "annotations": [aggregate_ann(aggregate, "entity", true)],
        "functions": functions,
    })
}
