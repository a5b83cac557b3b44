mod common;

use archgraph_core::analysis::TypeHierarchy;
use archgraph_core::config::*;
use archgraph_core::model::TypeRef;
use common::*;
use serde_json::json;

const BASE: &str = "app.application.BaseHandler";
const MIDDLE: &str = "app.application.AuditedHandler";
const CMD: &str = "app.application.commands.ShipCmd";

#[test]
fn test_resolve_direct_argument() {
    let model = model(json!({
        "classes": [{
            "name": "app.Handler",
            "supertypes": [generic(DEFAULT_COMMAND_HANDLER, vec![ty(CMD), ty("kotlin.Unit")])],
        }],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(
        hierarchy.resolve_type_argument("app.Handler", DEFAULT_COMMAND_HANDLER, 0),
        Some(TypeRef::class(CMD))
    );
    assert_eq!(
        hierarchy.resolve_type_argument("app.Handler", DEFAULT_COMMAND_HANDLER, 1),
        Some(TypeRef::class("kotlin.Unit"))
    );
}

#[test]
fn test_resolve_through_generic_base() {
    let model = model(json!({
        "classes": [
            {
                "name": BASE,
                "typeParams": ["T"],
                "supertypes": [generic(DEFAULT_COMMAND_HANDLER, vec![param(BASE, "T"), ty("kotlin.Unit")])],
            },
            {"name": "app.Handler", "supertypes": [generic(BASE, vec![ty(CMD)])]},
        ],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(
        hierarchy.resolve_type_argument("app.Handler", DEFAULT_COMMAND_HANDLER, 0),
        Some(TypeRef::class(CMD))
    );
}

#[test]
fn test_resolve_through_two_reparameterizations() {
    // Handler : Audited<Cmd>, Audited<R> : Base<R>, Base<T> : Command<T, Unit>
    let model = model(json!({
        "classes": [
            {
                "name": BASE,
                "typeParams": ["T"],
                "supertypes": [generic(DEFAULT_COMMAND_HANDLER, vec![param(BASE, "T"), ty("kotlin.Unit")])],
            },
            {
                "name": MIDDLE,
                "typeParams": ["R"],
                "supertypes": [generic(BASE, vec![param(MIDDLE, "R")])],
            },
            {"name": "app.Handler", "supertypes": [generic(MIDDLE, vec![ty(CMD)])]},
        ],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(
        hierarchy.resolve_type_argument("app.Handler", DEFAULT_COMMAND_HANDLER, 0),
        Some(TypeRef::class(CMD))
    );
}

#[test]
fn test_resolve_uses_library_declarations() {
    let model = model(json!({
        "classes": [{"name": "app.Handler", "supertypes": [generic(BASE, vec![ty(CMD)])]}],
        "libraries": [{
            "name": BASE,
            "typeParams": ["T"],
            "supertypes": [generic(DEFAULT_COMMAND_HANDLER, vec![param(BASE, "T"), ty("kotlin.Unit")])],
        }],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert!(hierarchy.is_or_implements("app.Handler", DEFAULT_COMMAND_HANDLER));
    assert_eq!(
        hierarchy.resolve_type_argument("app.Handler", DEFAULT_COMMAND_HANDLER, 0),
        Some(TypeRef::class(CMD))
    );
}

#[test]
fn test_unrelated_target_resolves_to_none() {
    let model = model(json!({
        "classes": [{"name": "app.Handler", "supertypes": [ty("app.Other")]}],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(hierarchy.resolve_type_argument("app.Handler", DEFAULT_COMMAND_HANDLER, 0), None);
    assert_eq!(hierarchy.resolve_type_argument("app.Missing", DEFAULT_COMMAND_HANDLER, 0), None);
}

#[test]
fn test_cyclic_supertypes_terminate() {
    let model = model(json!({
        "classes": [
            {"name": "app.A", "supertypes": [ty("app.B")]},
            {"name": "app.B", "supertypes": [ty("app.A")]},
        ],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert!(!hierarchy.is_or_implements("app.A", "app.C"));
    assert!(hierarchy.is_or_implements("app.A", "app.B"));
    assert_eq!(hierarchy.resolve_type_argument("app.A", "app.C", 0), None);
}

#[test]
fn test_is_or_implements_transitive() {
    let model = model(json!({
        "classes": [
            {"name": "app.Uow", "supertypes": [ty(DEFAULT_UNIT_OF_WORK)]},
            {"name": "app.TxUow", "supertypes": [ty("app.Uow")]},
        ],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert!(hierarchy.is_or_implements("app.TxUow", DEFAULT_UNIT_OF_WORK));
    assert!(hierarchy.is_or_implements(DEFAULT_UNIT_OF_WORK, DEFAULT_UNIT_OF_WORK));
    assert!(!hierarchy.is_or_implements("app.Uow", "app.TxUow"));
}

#[test]
fn test_find_supertype_argument_direct_only() {
    let model = model(json!({
        "classes": [{
            "name": "app.OrderPredicate",
            "supertypes": [generic(DEFAULT_AGGREGATE_PREDICATE, vec![ty("app.AggOrder"), ty("app.Order")])],
        }],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(
        hierarchy.find_supertype_argument("app.OrderPredicate", DEFAULT_AGGREGATE_PREDICATE, 1),
        Some(&TypeRef::class("app.Order"))
    );
    assert_eq!(hierarchy.find_supertype_argument("app.OrderPredicate", DEFAULT_PREDICATE, 0), None);
}

#[test]
fn test_nested_simple_name() {
    let model = model(json!({
        "classes": [
            {"name": "app.commands.CreateOrderCmd"},
            nested_request("app.commands.CreateOrderCmd", "Request"),
        ],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(hierarchy.nested_simple_name("app.commands.CreateOrderCmd.Request"), "CreateOrderCmd.Request");
    assert_eq!(hierarchy.nested_simple_name("app.commands.CreateOrderCmd"), "CreateOrderCmd");
    assert_eq!(hierarchy.nested_simple_name("lib.pkg.Outer.Inner"), "Outer.Inner");
}

#[test]
fn test_first_declaration_wins() {
    let model = model(json!({
        "classes": [
            {"name": "app.X", "supertypes": [ty("app.First")]},
            {"name": "app.X", "supertypes": [ty("app.Second")]},
        ],
        "libraries": [{"name": "app.X", "supertypes": [ty("app.Third")]}],
    }));
    let hierarchy = TypeHierarchy::new(&model);

    assert_eq!(hierarchy.len(), 1);
    assert!(hierarchy.is_or_implements("app.X", "app.First"));
    assert!(!hierarchy.is_or_implements("app.X", "app.Second"));
    assert!(!hierarchy.is_or_implements("app.X", "app.Third"));
}
