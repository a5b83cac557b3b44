//! The main pass: classify declarations and call sites into graph facts.
//!
//! Classes are visited in model order, each followed by its functions, then
//! top-level functions. Every fact that cannot be resolved is skipped.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{AnalysisConfig, SAVE_DEFAULT_METHOD};
use crate::model::{walk, ClassDecl, ConstructorCall, Expr, FunctionDecl, MethodCall, ProgramModel, TypeRef};
use crate::ontology::{ArchitectureGraph, Node, NodeType, Relationship, RelationshipType};

use super::cache::ClassificationCache;
use super::context::{
    method_id, relationship_for_dispatch, sender_node_type, type_display_name, FunctionContext,
    FunctionScope, RequestKind, TraversalState,
};
use super::hierarchy::TypeHierarchy;
use super::index::{AggregateInfo, AggregateRole, ClassIndex};
use super::reachability::ControllerReachability;

/// Accumulates the architecture graph for one model.
pub struct GraphCollector<'a> {
    config: &'a AnalysisConfig,
    index: &'a ClassIndex,
    hierarchy: &'a TypeHierarchy<'a>,
    reachability: &'a ControllerReachability,
    cache: ClassificationCache,
    /// Command handler class to the command it handles.
    handler_to_command: HashMap<String, String>,
    state: TraversalState,
    graph: ArchitectureGraph,
}

impl<'a> GraphCollector<'a> {
    pub fn new(
        config: &'a AnalysisConfig,
        index: &'a ClassIndex,
        hierarchy: &'a TypeHierarchy<'a>,
        reachability: &'a ControllerReachability,
    ) -> Self {
        Self {
            config,
            index,
            hierarchy,
            reachability,
            cache: ClassificationCache::new(index),
            handler_to_command: HashMap::new(),
            state: TraversalState::new(),
            graph: ArchitectureGraph::new(),
        }
    }

    /// Run the pass over `model` and return the collected graph.
    pub fn collect(mut self, model: &ProgramModel) -> ArchitectureGraph {
        for class in &model.classes {
            self.visit_class(class);
            for function in &class.functions {
                self.visit_function(Some(class), function);
            }
        }
        for function in &model.functions {
            self.visit_function(None, function);
        }
        self.graph
    }

    // =========================================================================
    // Graph helpers
    // =========================================================================

    fn add_node(&mut self, id: &str, name: String, node_type: NodeType) {
        self.graph.add_node(Node::new(id, name, node_type));
    }

    fn add_rel(&mut self, from: &str, to: &str, rel_type: RelationshipType) {
        self.graph.add_relationship(Relationship::new(from, to, rel_type));
    }

    fn add_aggregate(&mut self, fq: &str) {
        self.add_node(fq, type_display_name(fq), NodeType::Aggregate);
    }

    fn method_display_name(&self, class: Option<&str>, method: &str) -> String {
        match class {
            Some(class) => format!("{}::{}", self.hierarchy.nested_simple_name(class), method),
            None => method.to_string(),
        }
    }

    // =========================================================================
    // Class level
    // =========================================================================

    fn visit_class(&mut self, class: &ClassDecl) {
        let fq = class.name.as_str();
        let display = self.hierarchy.nested_simple_name(fq);

        if self.is_domain_event(fq) {
            self.add_node(fq, display.clone(), NodeType::DomainEvent);
        }
        if self.is_integration_event(fq) {
            self.add_node(fq, display.clone(), NodeType::IntegrationEvent);
        }
        if self.index.aggregate_info(fq).is_some_and(AggregateInfo::is_root_entity) {
            self.add_node(fq, display.clone(), NodeType::Aggregate);
        }
        if self.config.scan.spring && class.has_annotation(&self.config.markers.controller) {
            self.add_node(fq, display.clone(), NodeType::Controller);
        }

        let config = self.config;
        let caps = &config.capabilities;
        let handler = [
            (&caps.command_handler, RequestKind::Command),
            (&caps.query_handler, RequestKind::Query),
            (&caps.request_handler, RequestKind::Cli),
        ]
        .into_iter()
        .find(|(iface, _)| self.hierarchy.is_or_implements(fq, iface));

        if let Some((iface, kind)) = handler {
            let iface = iface.clone();
            self.visit_handler(fq, display, &iface, kind);
        }
    }

    fn visit_handler(&mut self, fq: &str, display: String, iface: &str, kind: RequestKind) {
        let (handler_type, rel_type) = match kind {
            RequestKind::Command => (NodeType::CommandHandler, RelationshipType::CommandToCommandHandler),
            RequestKind::Query => (NodeType::QueryHandler, RelationshipType::QueryToQueryHandler),
            RequestKind::Cli => (NodeType::CliHandler, RelationshipType::CliToCliHandler),
        };
        self.add_node(fq, display, handler_type);

        let request = self
            .hierarchy
            .resolve_type_argument(fq, iface, 0)
            .and_then(|ty| ty.class_name().map(str::to_string));
        let Some(request) = request else {
            debug!(handler = fq, "request type of handler not resolved");
            return;
        };

        let name = self.hierarchy.nested_simple_name(&request);
        self.add_node(&request, name, kind.node_type());
        if kind == RequestKind::Command {
            self.handler_to_command.insert(fq.to_string(), request.clone());
        }
        self.cache.request_kind.insert(request.as_str(), kind);
        self.add_rel(&request, fq, rel_type);
    }

    // =========================================================================
    // Function level
    // =========================================================================

    fn visit_function(&mut self, class: Option<&ClassDecl>, function: &FunctionDecl) {
        let config = self.config;
        let parent = class.map(|c| c.name.as_str());
        let id = method_id(parent, &function.name);
        let display = self.method_display_name(parent, &function.name);

        let is_controller_method = self.config.scan.spring
            && class.is_some_and(|c| c.has_annotation(&self.config.markers.controller))
            && function
                .annotations
                .iter()
                .any(|a| self.config.markers.is_route(&a.name));
        if is_controller_method {
            self.add_node(&id, display.clone(), NodeType::ControllerMethod);
        }

        let event = self.event_listener_class(function);
        let is_domain_handler = event.as_deref().is_some_and(|e| self.is_domain_event(e));
        let is_integration_handler =
            event.as_deref().is_some_and(|e| self.is_integration_event(e));
        if let Some(event) = event.as_deref().filter(|_| is_domain_handler || is_integration_handler) {
            let (handler_type, event_type, rel_type) = if is_domain_handler {
                (NodeType::DomainEventHandler, NodeType::DomainEvent, RelationshipType::DomainEventToHandler)
            } else {
                (
                    NodeType::IntegrationEventHandler,
                    NodeType::IntegrationEvent,
                    RelationshipType::IntegrationEventToHandler,
                )
            };
            self.add_node(&id, display.clone(), handler_type);
            let event_name = self.hierarchy.nested_simple_name(event);
            self.add_node(event, event_name, event_type);
            self.add_rel(event, &id, rel_type);
        }

        let is_validator = parent.is_some_and(|p| {
            self.config
                .capabilities
                .constraint_validators
                .iter()
                .any(|v| self.hierarchy.is_or_implements(p, v))
        });

        if parent
            .and_then(|p| self.index.aggregate_info(p))
            .is_some_and(AggregateInfo::is_entity)
        {
            self.add_node(&id, display.clone(), NodeType::EntityMethod);
        }

        let ctx = if is_controller_method {
            FunctionContext::ControllerMethod
        } else if is_domain_handler {
            FunctionContext::DomainEventHandler
        } else if is_integration_handler {
            FunctionContext::IntegrationEventHandler
        } else if is_validator {
            FunctionContext::Validator
        } else {
            FunctionContext::Other
        };

        let handler = parent
            .filter(|p| self.handler_to_command.contains_key(*p))
            .map(str::to_string);
        let pushed = self.state.enter_function(ctx, handler.clone());

        let mut scope = FunctionScope::new(id, display);
        walk(&function.body, &mut |expr| match expr {
            Expr::Call(call) => self.visit_call(call, &mut scope),
            Expr::New(ctor) => self.visit_constructor(ctor, &mut scope),
            _ => {}
        });

        if let Some(handler) = handler.as_deref().filter(|_| scope.saved) {
            let lifecycle = &config.lifecycle;
            let (on_create, on_create_fallback) =
                (lifecycle.on_create.clone(), lifecycle.on_create_fallback.clone());
            let (on_remove, on_remove_fallback) =
                (lifecycle.on_remove.clone(), lifecycle.on_remove_fallback.clone());
            for aggregate in &scope.created {
                self.synthesize_lifecycle(handler, aggregate, &on_create, &on_create_fallback);
            }
            for aggregate in &scope.removed {
                self.synthesize_lifecycle(handler, aggregate, &on_remove, &on_remove_fallback);
            }
        }

        // A function raising events outside any classified role still needs a node.
        if scope.raises_event && !self.graph.contains_node(&scope.method_id) {
            self.add_node(&scope.method_id, scope.display_name.clone(), NodeType::EntityMethod);
        }

        self.state.exit_function(pushed);
    }

    /// Event class named by the function's listener tag, else the type of
    /// its first parameter.
    fn event_listener_class(&self, function: &FunctionDecl) -> Option<String> {
        let ann = function.annotation(&self.config.markers.event_listener)?;
        ann.class_arg("value")
            .or_else(|| ann.class_arg("classes"))
            .or_else(|| function.params.first().and_then(|p| p.ty.class_name()))
            .map(str::to_string)
    }

    fn synthesize_lifecycle(&mut self, handler: &str, aggregate: &str, primary: &str, fallback: &str) {
        let method = self.pick_lifecycle_method(aggregate, primary, fallback);
        let id = method_id(Some(aggregate), &method);
        let display = format!("{}::{}", type_display_name(aggregate), method);
        self.add_node(&id, display, NodeType::EntityMethod);
        self.add_aggregate(aggregate);
        self.add_rel(handler, &id, RelationshipType::CommandHandlerToEntityMethod);
        self.add_rel(aggregate, &id, RelationshipType::AggregateToEntityMethod);
    }

    /// The primary name if declared, else the fallback if declared, else the
    /// primary name even though the aggregate does not declare it.
    fn pick_lifecycle_method(&self, aggregate: &str, primary: &str, fallback: &str) -> String {
        let declared = self.index.entity_methods(aggregate);
        let has = |name: &str| declared.is_some_and(|m| m.contains(name));
        if has(primary) {
            primary.to_string()
        } else if has(fallback) {
            fallback.to_string()
        } else {
            primary.to_string()
        }
    }

    // =========================================================================
    // Call sites
    // =========================================================================

    fn visit_call(&mut self, call: &MethodCall, scope: &mut FunctionScope) {
        let config = self.config;
        let caps = &config.capabilities;
        let method = call.method.as_str();
        let receiver = call.receiver.as_ref().map(|r| r.ty());
        let receiver_class = receiver.as_ref().and_then(TypeRef::class_name);
        let owner = call.owner.as_deref();
        let implements = |iface: &str| {
            receiver_class.is_some_and(|c| self.hierarchy.is_or_implements(c, iface))
                || owner.is_some_and(|c| self.hierarchy.is_or_implements(c, iface))
        };

        let is_request_supervisor = implements(&caps.request_supervisor);
        let is_factory_supervisor = implements(&caps.aggregate_factory_supervisor);
        let is_unit_of_work = implements(&caps.unit_of_work) || self.is_default_save(call);
        let is_repository = implements(&caps.repository_supervisor);

        let is_dispatch = caps.is_dispatch(method);
        let is_create = caps.is_create(method);
        let is_save = caps.is_save(method);
        let is_remove = caps.is_remove(method);
        let is_lookup = caps.is_lookup(method);
        let track_removal = config.scan.repo_uow;

        if is_dispatch && is_request_supervisor {
            self.on_dispatch(call, scope);
        }

        if is_create && is_factory_supervisor {
            self.on_create(call, scope);
        }

        if is_save && is_unit_of_work {
            scope.saved = true;
        }

        if track_removal && is_remove && is_unit_of_work {
            if let Some(root) = call.arg(0).and_then(|arg| self.root_from_type(&arg.ty())) {
                scope.record_removed(&root);
            }
        }

        if track_removal && is_remove && is_repository {
            let root = call.args.first().and_then(|arg| self.root_from_predicate(&arg.ty()));
            if let Some(root) = root {
                scope.record_removed(&root);
            }
        }

        if is_lookup && is_repository {
            let root = self.root_from_type(&call.ty);
            if let (Some(root), Some(handler)) = (root, self.state.current_handler().map(str::to_string)) {
                self.add_aggregate(&root);
                self.add_rel(&handler, &root, RelationshipType::CommandHandlerToAggregate);
            }
        }

        if let Some(handler) = self.state.current_handler().map(str::to_string) {
            if let Some(owner) = owner {
                self.on_entity_call(&handler, owner, method);
            }
        }
    }

    /// `save$default` carries the unit of work as its first argument.
    fn is_default_save(&self, call: &MethodCall) -> bool {
        if call.method != SAVE_DEFAULT_METHOD {
            return false;
        }
        call.args
            .first()
            .map(Expr::ty)
            .as_ref()
            .and_then(TypeRef::class_name)
            .is_some_and(|c| self.hierarchy.is_or_implements(c, &self.config.capabilities.unit_of_work))
    }

    fn on_dispatch(&mut self, call: &MethodCall, scope: &mut FunctionScope) {
        let request = call
            .arg(0)
            .map(Expr::ty)
            .and_then(|ty| ty.class_name().map(str::to_string))
            .filter(|c| {
                self.hierarchy
                    .is_or_implements(c, &self.config.capabilities.request_param)
            });
        let Some(request) = request else {
            debug!(sender = scope.method_id.as_str(), "dispatched value is not a request");
            return;
        };

        let kind = self.classify_request_kind(&request);
        let name = self.hierarchy.nested_simple_name(&request);
        self.add_node(&request, name, kind.node_type());

        let ctx = self.state.current_context();
        if ctx == FunctionContext::Other {
            let reachability = self.reachability;
            if let Some(roots) = reachability.roots_for(&scope.method_id) {
                let rel_type = relationship_for_dispatch(kind, FunctionContext::ControllerMethod);
                for root in roots {
                    self.add_rel(root, &request, rel_type);
                }
                return;
            }
        }

        let rel_type = relationship_for_dispatch(kind, ctx);
        if ctx == FunctionContext::Validator && !scope.validator_added {
            self.add_node(&scope.method_id, scope.display_name.clone(), NodeType::Validator);
            scope.validator_added = true;
        }
        if ctx == FunctionContext::Other && !scope.sender_added {
            if let Some(sender_type) = sender_node_type(rel_type) {
                self.add_node(&scope.method_id, scope.display_name.clone(), sender_type);
                scope.sender_added = true;
            }
        }
        self.add_rel(&scope.method_id, &request, rel_type);
    }

    /// Registered kind, else naming convention on the enclosing class of a
    /// nested request or on the request class itself.
    fn classify_request_kind(&mut self, request: &str) -> RequestKind {
        let hierarchy = self.hierarchy;
        self.cache.request_kind.get_or_insert_with(request, || {
            let inspected = hierarchy
                .get(request)
                .and_then(|decl| decl.outer.as_deref())
                .unwrap_or(request);
            let simple = inspected.rsplit('.').next().unwrap_or(inspected);
            RequestKind::from_naming(simple, inspected)
        })
    }

    fn on_create(&mut self, call: &MethodCall, scope: &mut FunctionScope) {
        let payload = call
            .arg(0)
            .map(Expr::ty)
            .and_then(|ty| ty.class_name().map(str::to_string));
        let root = self
            .root_from_type(&call.ty)
            .or_else(|| payload.and_then(|p| self.root_from_payload(&p)));

        let handler = self.state.current_handler().map(str::to_string);
        if let (Some(root), Some(handler)) = (root, handler) {
            self.add_aggregate(&root);
            self.add_rel(&handler, &root, RelationshipType::CommandHandlerToAggregate);
            scope.record_created(&root);
        }
    }

    fn on_entity_call(&mut self, handler: &str, owner: &str, method: &str) {
        let Some(info) = self.aggregate_info(owner).filter(AggregateInfo::is_entity) else {
            return;
        };
        let root = if info.root {
            owner.to_string()
        } else {
            Some(info.aggregate_name.as_str())
                .filter(|n| !n.is_empty())
                .and_then(|n| self.cache.root_for(n))
                .unwrap_or(owner)
                .to_string()
        };

        let callee = method_id(Some(owner), method);
        let display = self.method_display_name(Some(owner), method);
        self.add_node(&callee, display, NodeType::EntityMethod);
        self.add_rel(handler, &callee, RelationshipType::CommandHandlerToEntityMethod);
        self.add_aggregate(&root);
        self.add_rel(&root, &callee, RelationshipType::AggregateToEntityMethod);
    }

    fn visit_constructor(&mut self, ctor: &ConstructorCall, scope: &mut FunctionScope) {
        if !self.is_domain_event(&ctor.class) {
            return;
        }
        let name = self.hierarchy.nested_simple_name(&ctor.class);
        self.add_node(&ctor.class, name, NodeType::DomainEvent);
        self.add_rel(&scope.method_id, &ctor.class, RelationshipType::EntityMethodToDomainEvent);
        scope.raises_event = true;
    }

    // =========================================================================
    // Aggregate resolution
    // =========================================================================

    fn aggregate_info(&mut self, fq: &str) -> Option<AggregateInfo> {
        let index = self.index;
        let hierarchy = self.hierarchy;
        let config = self.config;
        let marker = &config.markers.aggregate;
        self.cache.aggregate_info.get_or_insert_with(fq, || {
            index
                .aggregate_info(fq)
                .cloned()
                .or_else(|| hierarchy.get(fq).and_then(|c| AggregateInfo::read(c, marker)))
        })
    }

    fn is_domain_event(&mut self, fq: &str) -> bool {
        let index = self.index;
        let hierarchy = self.hierarchy;
        let config = self.config;
        let marker = &config.markers.domain_event;
        self.cache.domain_event.get_or_insert_with(fq, || {
            index.is_domain_event(fq) || hierarchy.get(fq).is_some_and(|c| c.has_annotation(marker))
        })
    }

    fn is_integration_event(&mut self, fq: &str) -> bool {
        let index = self.index;
        let hierarchy = self.hierarchy;
        let config = self.config;
        let marker = &config.markers.integration_event;
        self.cache.integration_event.get_or_insert_with(fq, || {
            index.is_integration_event(fq)
                || hierarchy.get(fq).is_some_and(|c| c.has_annotation(marker))
        })
    }

    /// Aggregate root for a value of type `ty`: the class itself for a root
    /// entity, the registered root of its aggregate for a child entity.
    fn root_from_type(&mut self, ty: &TypeRef) -> Option<String> {
        let fq = ty.class_name()?;
        let info = self.aggregate_info(fq).filter(AggregateInfo::is_entity)?;
        if info.root {
            self.cache.register_root(&info.aggregate_name, fq);
            Some(fq.to_string())
        } else {
            Some(self.cache.root_for(&info.aggregate_name).unwrap_or(fq).to_string())
        }
    }

    fn root_from_payload(&mut self, payload: &str) -> Option<String> {
        let aggregate = match self.index.aggregate_for_payload(payload) {
            Some(name) => name.to_string(),
            None => self
                .hierarchy
                .get(payload)
                .and_then(|c| AggregateInfo::read(c, &self.config.markers.aggregate))
                .filter(|info| info.role == AggregateRole::FactoryPayload)?
                .aggregate_name,
        };
        self.cache.root_for(&aggregate).map(str::to_string)
    }

    /// Unwrap `Predicate<E>` (argument 0) and `AggregatePredicate<A, E>`
    /// (argument 1), including subclasses of either.
    fn root_from_predicate(&mut self, ty: &TypeRef) -> Option<String> {
        let fq = ty.class_name()?;
        let predicate = self.config.capabilities.predicate.clone();
        let aggregate_predicate = self.config.capabilities.aggregate_predicate.clone();

        let entity = if fq == predicate {
            ty.arg(0).cloned()
        } else if fq == aggregate_predicate {
            ty.arg(1).cloned()
        } else if self.hierarchy.is_or_implements(fq, &predicate) {
            ty.arg(0)
                .or_else(|| self.hierarchy.find_supertype_argument(fq, &predicate, 0))
                .cloned()
        } else if self.hierarchy.is_or_implements(fq, &aggregate_predicate) {
            ty.arg(1)
                .or_else(|| self.hierarchy.find_supertype_argument(fq, &aggregate_predicate, 1))
                .cloned()
        } else {
            None
        }?;
        self.root_from_type(&entity)
    }
}
