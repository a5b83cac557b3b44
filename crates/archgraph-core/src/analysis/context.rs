//! Traversal state threaded through the collector, plus naming helpers.

use crate::ontology::{NodeType, RelationshipType};

/// What kind of function a call site sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionContext {
    ControllerMethod,
    DomainEventHandler,
    IntegrationEventHandler,
    Validator,
    Other,
}

/// Classification of a dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Command,
    Query,
    Cli,
}

impl RequestKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Command => NodeType::Command,
            Self::Query => NodeType::Query,
            Self::Cli => NodeType::Cli,
        }
    }

    /// Infer the kind from a class's simple name and fully-qualified name.
    ///
    /// Query wins over client request, which wins over command. Anything
    /// unmatched is a command.
    pub fn from_naming(simple_name: &str, fq: &str) -> Self {
        if simple_name.ends_with("Qry") || fq.contains(".queries.") {
            Self::Query
        } else if simple_name.ends_with("Cli") || fq.contains(".distributed.clients.") {
            Self::Cli
        } else {
            Self::Command
        }
    }
}

/// Relationship emitted for a dispatch of `kind` from a function in `ctx`.
pub fn relationship_for_dispatch(kind: RequestKind, ctx: FunctionContext) -> RelationshipType {
    use FunctionContext as Ctx;
    use RelationshipType as Rel;

    match (kind, ctx) {
        (RequestKind::Command, Ctx::ControllerMethod) => Rel::ControllerMethodToCommand,
        (RequestKind::Command, Ctx::DomainEventHandler) => Rel::DomainEventHandlerToCommand,
        (RequestKind::Command, Ctx::IntegrationEventHandler) => {
            Rel::IntegrationEventHandlerToCommand
        }
        (RequestKind::Command, _) => Rel::CommandSenderMethodToCommand,

        (RequestKind::Query, Ctx::ControllerMethod) => Rel::ControllerMethodToQuery,
        (RequestKind::Query, Ctx::DomainEventHandler) => Rel::DomainEventHandlerToQuery,
        (RequestKind::Query, Ctx::IntegrationEventHandler) => Rel::IntegrationEventHandlerToQuery,
        (RequestKind::Query, Ctx::Validator) => Rel::ValidatorToQuery,
        (RequestKind::Query, _) => Rel::QuerySenderMethodToQuery,

        (RequestKind::Cli, Ctx::ControllerMethod) => Rel::ControllerMethodToCli,
        (RequestKind::Cli, Ctx::DomainEventHandler) => Rel::DomainEventHandlerToCli,
        (RequestKind::Cli, Ctx::IntegrationEventHandler) => Rel::IntegrationEventHandlerToCli,
        (RequestKind::Cli, _) => Rel::CliSenderMethodToCli,
    }
}

/// Node type of the sender method behind a sender-method relationship.
pub fn sender_node_type(rel: RelationshipType) -> Option<NodeType> {
    match rel {
        RelationshipType::CommandSenderMethodToCommand => Some(NodeType::CommandSenderMethod),
        RelationshipType::QuerySenderMethodToQuery => Some(NodeType::QuerySenderMethod),
        RelationshipType::CliSenderMethodToCli => Some(NodeType::CliSenderMethod),
        _ => None,
    }
}

/// Handler-in-scope and function-context stacks.
#[derive(Debug, Default)]
pub struct TraversalState {
    handlers: Vec<String>,
    contexts: Vec<FunctionContext>,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a function. Returns whether a handler was pushed, to be passed
    /// back to [`exit_function`](Self::exit_function).
    pub fn enter_function(&mut self, ctx: FunctionContext, handler: Option<String>) -> bool {
        self.contexts.push(ctx);
        match handler {
            Some(handler) => {
                self.handlers.push(handler);
                true
            }
            None => false,
        }
    }

    pub fn exit_function(&mut self, pushed_handler: bool) {
        if pushed_handler {
            self.handlers.pop();
        }
        self.contexts.pop();
    }

    /// Innermost handler in scope.
    pub fn current_handler(&self) -> Option<&str> {
        self.handlers.last().map(String::as_str)
    }

    pub fn current_context(&self) -> FunctionContext {
        self.contexts.last().copied().unwrap_or(FunctionContext::Other)
    }
}

/// Facts gathered while walking one function body.
#[derive(Debug)]
pub struct FunctionScope {
    pub method_id: String,
    pub display_name: String,
    pub created: Vec<String>,
    pub removed: Vec<String>,
    pub saved: bool,
    /// A domain event is constructed in the body.
    pub raises_event: bool,
    pub sender_added: bool,
    pub validator_added: bool,
}

impl FunctionScope {
    pub fn new(method_id: String, display_name: String) -> Self {
        Self {
            method_id,
            display_name,
            created: Vec::new(),
            removed: Vec::new(),
            saved: false,
            raises_event: false,
            sender_added: false,
            validator_added: false,
        }
    }

    pub fn record_created(&mut self, aggregate: &str) {
        if !self.created.iter().any(|a| a == aggregate) {
            self.created.push(aggregate.to_string());
        }
    }

    pub fn record_removed(&mut self, aggregate: &str) {
        if !self.removed.iter().any(|a| a == aggregate) {
            self.removed.push(aggregate.to_string());
        }
    }
}

/// `<class>::<method>`, or the bare name for top-level functions.
pub fn method_id(class: Option<&str>, method: &str) -> String {
    match class {
        Some(class) => format!("{class}::{method}"),
        None => method.to_string(),
    }
}

/// Display name of a class known only by its fully-qualified name: the
/// segments from the first capitalised one on (`a.b.Order.Item` is
/// `Order.Item`).
pub fn type_display_name(fq: &str) -> String {
    let normalized = fq.replace('$', ".");
    let parts: Vec<&str> = normalized.split('.').collect();
    match parts
        .iter()
        .position(|p| p.chars().next().is_some_and(char::is_uppercase))
    {
        Some(first) => parts[first..].join("."),
        None => parts.last().map(|p| p.to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display_name() {
        assert_eq!(type_display_name("a.b.Order"), "Order");
        assert_eq!(type_display_name("a.b.Order.Item"), "Order.Item");
        assert_eq!(type_display_name("a.b.Order$Item"), "Order.Item");
        assert_eq!(type_display_name("a.b.lower"), "lower");
    }

    #[test]
    fn test_naming_priority() {
        assert_eq!(RequestKind::from_naming("GetOrderQry", "a.GetOrderQry"), RequestKind::Query);
        assert_eq!(RequestKind::from_naming("X", "a.queries.X"), RequestKind::Query);
        assert_eq!(RequestKind::from_naming("PayCli", "a.PayCli"), RequestKind::Cli);
        assert_eq!(RequestKind::from_naming("X", "a.distributed.clients.X"), RequestKind::Cli);
        assert_eq!(RequestKind::from_naming("Anything", "a.Anything"), RequestKind::Command);
    }

    #[test]
    fn test_dispatch_relationships() {
        use FunctionContext as Ctx;
        assert_eq!(
            relationship_for_dispatch(RequestKind::Query, Ctx::Validator),
            RelationshipType::ValidatorToQuery
        );
        assert_eq!(
            relationship_for_dispatch(RequestKind::Command, Ctx::Validator),
            RelationshipType::CommandSenderMethodToCommand
        );
        assert_eq!(
            relationship_for_dispatch(RequestKind::Cli, Ctx::IntegrationEventHandler),
            RelationshipType::IntegrationEventHandlerToCli
        );
    }

    #[test]
    fn test_traversal_state_stacks() {
        let mut state = TraversalState::new();
        let pushed = state.enter_function(FunctionContext::Other, Some("a.H".into()));
        assert_eq!(state.current_handler(), Some("a.H"));
        state.exit_function(pushed);
        assert_eq!(state.current_handler(), None);
        assert_eq!(state.current_context(), FunctionContext::Other);
    }
}
