//! Node types for the architecture graph.
//!
//! Nodes represent architectural elements. They are organized by role:
//!
//! - **Entry**: controllers, controller methods, validators, sender methods
//! - **Request**: commands, queries, client requests
//! - **Handler**: request handlers and event handlers
//! - **Domain**: aggregates and entity methods
//! - **Event**: domain and integration events

use serde::{Deserialize, Serialize};

use super::NodeCategory;

/// Kind of architectural element.
///
/// Serialized as the lowercase variant name (`commandhandler`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Controller,
    ControllerMethod,
    Command,
    CommandHandler,
    Query,
    QueryHandler,
    Cli,
    CliHandler,
    DomainEvent,
    DomainEventHandler,
    IntegrationEvent,
    IntegrationEventHandler,
    Aggregate,
    EntityMethod,
    Validator,
    CommandSenderMethod,
    QuerySenderMethod,
    CliSenderMethod,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [NodeType; 18] = [
        Self::Controller,
        Self::ControllerMethod,
        Self::Command,
        Self::CommandHandler,
        Self::Query,
        Self::QueryHandler,
        Self::Cli,
        Self::CliHandler,
        Self::DomainEvent,
        Self::DomainEventHandler,
        Self::IntegrationEvent,
        Self::IntegrationEventHandler,
        Self::Aggregate,
        Self::EntityMethod,
        Self::Validator,
        Self::CommandSenderMethod,
        Self::QuerySenderMethod,
        Self::CliSenderMethod,
    ];

    /// The serialized tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::ControllerMethod => "controllermethod",
            Self::Command => "command",
            Self::CommandHandler => "commandhandler",
            Self::Query => "query",
            Self::QueryHandler => "queryhandler",
            Self::Cli => "cli",
            Self::CliHandler => "clihandler",
            Self::DomainEvent => "domainevent",
            Self::DomainEventHandler => "domaineventhandler",
            Self::IntegrationEvent => "integrationevent",
            Self::IntegrationEventHandler => "integrationeventhandler",
            Self::Aggregate => "aggregate",
            Self::EntityMethod => "entitymethod",
            Self::Validator => "validator",
            Self::CommandSenderMethod => "commandsendermethod",
            Self::QuerySenderMethod => "querysendermethod",
            Self::CliSenderMethod => "clisendermethod",
        }
    }

    /// Get the category of this node type.
    pub fn category(&self) -> NodeCategory {
        match self {
            Self::Controller
            | Self::ControllerMethod
            | Self::Validator
            | Self::CommandSenderMethod
            | Self::QuerySenderMethod
            | Self::CliSenderMethod => NodeCategory::Entry,

            Self::Command | Self::Query | Self::Cli => NodeCategory::Request,

            Self::CommandHandler
            | Self::QueryHandler
            | Self::CliHandler
            | Self::DomainEventHandler
            | Self::IntegrationEventHandler => NodeCategory::Handler,

            Self::Aggregate | Self::EntityMethod => NodeCategory::Domain,

            Self::DomainEvent | Self::IntegrationEvent => NodeCategory::Event,
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// An architectural element.
///
/// `id` is a fully-qualified class name or `<class>::<method>` for
/// method-level nodes. Identity is by `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    pub full_name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl Node {
    /// A node whose full name equals its id, which holds for every node the
    /// collector emits.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        let id = id.into();
        Self {
            full_name: id.clone(),
            id,
            name: name.into(),
            node_type,
        }
    }
}
