mod common;

use archgraph_core::analysis::{AggregateRole, ClassIndex};
use archgraph_core::config::*;
use archgraph_core::{NodeType, RelationshipType};
use common::*;
use serde_json::json;

fn index(value: serde_json::Value) -> ClassIndex {
    ClassIndex::build(&model(value).classes, &MarkerConfig::default())
}

#[test]
fn test_first_root_wins() {
    let index = index(json!({
        "classes": [
            root_entity("app.domain.Order", "Order", &[]),
            root_entity("app.legacy.Order", "Order", &[]),
        ],
    }));

    assert_eq!(index.root_for("Order"), Some("app.domain.Order"));
    assert_eq!(index.roots_by_name().len(), 1);
    // The shadowed root keeps its own metadata.
    assert!(index.aggregate_info("app.legacy.Order").unwrap().is_root_entity());
}

#[test]
fn test_aggregate_name_defaults_to_simple_name() {
    let index = index(json!({
        "classes": [{
            "name": "app.domain.Invoice",
            "annotations": [{"name": DEFAULT_AGGREGATE_ANNOTATION, "args": {"type": "entity", "root": true}}],
        }],
    }));

    let info = index.aggregate_info("app.domain.Invoice").unwrap();
    assert_eq!(info.aggregate_name, "Invoice");
    assert_eq!(info.role, AggregateRole::Entity);
    assert_eq!(index.root_for("Invoice"), Some("app.domain.Invoice"));
}

#[test]
fn test_payload_and_entity_methods() {
    let index = index(json!({
        "classes": [
            root_entity("app.domain.Order", "Order", &["place", "onCreate"]),
            {"name": "app.domain.OrderPayload", "annotations": [aggregate_ann("Order", "factory-payload", false)]},
            {"name": "app.domain.Money", "annotations": [aggregate_ann("Order", "value-object", false)]},
        ],
    }));

    assert_eq!(index.aggregate_for_payload("app.domain.OrderPayload"), Some("Order"));
    let methods = index.entity_methods("app.domain.Order").unwrap();
    assert!(methods.contains("place") && methods.contains("onCreate"));
    assert!(index.entity_methods("app.domain.Money").is_none());
    assert_eq!(
        index.aggregate_info("app.domain.Money").map(|i| i.role.clone()),
        Some(AggregateRole::ValueObject)
    );
    assert_eq!(index.len(), 3);
}

#[test]
fn test_event_markers() {
    let index = index(json!({
        "classes": [
            {"name": "app.domain.OrderPlaced", "annotations": [ann(DEFAULT_DOMAIN_EVENT_ANNOTATION)]},
            {"name": "app.domain.OrderShipped", "annotations": [aggregate_ann("Order", "domain-event", false)]},
            {"name": "app.events.PaymentReceived", "annotations": [ann(DEFAULT_INTEGRATION_EVENT_ANNOTATION)]},
        ],
    }));

    assert!(index.is_domain_event("app.domain.OrderPlaced"));
    assert!(index.is_domain_event("app.domain.OrderShipped"));
    assert!(index.is_integration_event("app.events.PaymentReceived"));
    assert!(!index.is_domain_event("app.events.PaymentReceived"));
}

#[test]
fn test_unknown_role_is_kept_but_not_an_entity() {
    let index = index(json!({
        "classes": [{"name": "app.domain.Thing", "annotations": [aggregate_ann("Thing", "repository", false)]}],
    }));

    let info = index.aggregate_info("app.domain.Thing").unwrap();
    assert_eq!(info.role, AggregateRole::Other("repository".into()));
    assert!(!info.is_entity());
}

#[test]
fn test_child_entity_resolves_to_first_root_in_graph() {
    let handler = "app.application.commands.RenameCmd.Handler";
    let request = "app.application.commands.RenameCmd.Request";
    let graph = analyze(json!({
        "classes": [
            {"name": "app.application.commands.RenameCmd"},
            nested_request("app.application.commands.RenameCmd", "Request"),
            root_entity("app.domain.Order", "Order", &[]),
            root_entity("app.legacy.Order", "Order", &[]),
            {
                "name": "app.domain.OrderLine",
                "annotations": [aggregate_ann("Order", "entity", false)],
                "functions": [function("rename", vec![])],
            },
            command_handler(handler, request, vec![function("exec", vec![call("app.domain.OrderLine", "rename")])]),
        ],
    }));

    assert!(has_rel(&graph, "app.domain.Order", "app.domain.OrderLine::rename", RelationshipType::AggregateToEntityMethod));
    assert!(!has_rel(&graph, "app.legacy.Order", "app.domain.OrderLine::rename", RelationshipType::AggregateToEntityMethod));
    // Both roots are still aggregates in their own right.
    assert_eq!(node_type(&graph, "app.legacy.Order"), Some(NodeType::Aggregate));
}
