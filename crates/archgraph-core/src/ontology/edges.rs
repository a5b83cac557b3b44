//! Relationship types for the architecture graph.
//!
//! Relationships are grouped by the context that produces them:
//!
//! - **Dispatch**: an entry point or handler sends a request
//! - **Handling**: a request or event reaches its handler
//! - **Domain**: handlers touch aggregates, entity methods raise events

use serde::{Deserialize, Serialize};

use super::EdgeCategory;

/// Kind of relationship. Serialized as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelationshipType {
    // === Handling ===
    CommandToCommandHandler,
    QueryToQueryHandler,
    CliToCliHandler,
    DomainEventToHandler,
    IntegrationEventToHandler,

    // === Dispatch ===
    ControllerMethodToCommand,
    ControllerMethodToQuery,
    ControllerMethodToCli,
    DomainEventHandlerToCommand,
    DomainEventHandlerToQuery,
    DomainEventHandlerToCli,
    IntegrationEventHandlerToCommand,
    IntegrationEventHandlerToQuery,
    IntegrationEventHandlerToCli,
    ValidatorToQuery,
    CommandSenderMethodToCommand,
    QuerySenderMethodToQuery,
    CliSenderMethodToCli,

    // === Domain ===
    CommandHandlerToAggregate,
    CommandHandlerToEntityMethod,
    AggregateToEntityMethod,
    EntityMethodToDomainEvent,
}

impl RelationshipType {
    /// Every relationship type, in declaration order.
    pub const ALL: [RelationshipType; 22] = [
        Self::CommandToCommandHandler,
        Self::QueryToQueryHandler,
        Self::CliToCliHandler,
        Self::DomainEventToHandler,
        Self::IntegrationEventToHandler,
        Self::ControllerMethodToCommand,
        Self::ControllerMethodToQuery,
        Self::ControllerMethodToCli,
        Self::DomainEventHandlerToCommand,
        Self::DomainEventHandlerToQuery,
        Self::DomainEventHandlerToCli,
        Self::IntegrationEventHandlerToCommand,
        Self::IntegrationEventHandlerToQuery,
        Self::IntegrationEventHandlerToCli,
        Self::ValidatorToQuery,
        Self::CommandSenderMethodToCommand,
        Self::QuerySenderMethodToQuery,
        Self::CliSenderMethodToCli,
        Self::CommandHandlerToAggregate,
        Self::CommandHandlerToEntityMethod,
        Self::AggregateToEntityMethod,
        Self::EntityMethodToDomainEvent,
    ];

    /// Get the relationship name for display and serialization.
    pub fn relation_name(&self) -> &'static str {
        match self {
            Self::CommandToCommandHandler => "CommandToCommandHandler",
            Self::QueryToQueryHandler => "QueryToQueryHandler",
            Self::CliToCliHandler => "CliToCliHandler",
            Self::DomainEventToHandler => "DomainEventToHandler",
            Self::IntegrationEventToHandler => "IntegrationEventToHandler",
            Self::ControllerMethodToCommand => "ControllerMethodToCommand",
            Self::ControllerMethodToQuery => "ControllerMethodToQuery",
            Self::ControllerMethodToCli => "ControllerMethodToCli",
            Self::DomainEventHandlerToCommand => "DomainEventHandlerToCommand",
            Self::DomainEventHandlerToQuery => "DomainEventHandlerToQuery",
            Self::DomainEventHandlerToCli => "DomainEventHandlerToCli",
            Self::IntegrationEventHandlerToCommand => "IntegrationEventHandlerToCommand",
            Self::IntegrationEventHandlerToQuery => "IntegrationEventHandlerToQuery",
            Self::IntegrationEventHandlerToCli => "IntegrationEventHandlerToCli",
            Self::ValidatorToQuery => "ValidatorToQuery",
            Self::CommandSenderMethodToCommand => "CommandSenderMethodToCommand",
            Self::QuerySenderMethodToQuery => "QuerySenderMethodToQuery",
            Self::CliSenderMethodToCli => "CliSenderMethodToCli",
            Self::CommandHandlerToAggregate => "CommandHandlerToAggregate",
            Self::CommandHandlerToEntityMethod => "CommandHandlerToEntityMethod",
            Self::AggregateToEntityMethod => "AggregateToEntityMethod",
            Self::EntityMethodToDomainEvent => "EntityMethodToDomainEvent",
        }
    }

    /// Get the category of this relationship.
    pub fn category(&self) -> EdgeCategory {
        match self {
            Self::CommandToCommandHandler
            | Self::QueryToQueryHandler
            | Self::CliToCliHandler
            | Self::DomainEventToHandler
            | Self::IntegrationEventToHandler => EdgeCategory::Handling,

            Self::CommandHandlerToAggregate
            | Self::CommandHandlerToEntityMethod
            | Self::AggregateToEntityMethod
            | Self::EntityMethodToDomainEvent => EdgeCategory::Domain,

            _ => EdgeCategory::Dispatch,
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.relation_name())
    }
}

/// A directed relationship between two nodes.
///
/// Two relationships with equal fields are the same relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from_id: String,
    pub to_id: String,
    #[serde(rename = "type")]
    pub rel_type: RelationshipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Relationship {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        rel_type: RelationshipType,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            rel_type,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_name_matches_serde() {
        for ty in RelationshipType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.relation_name()));
        }
    }

    #[test]
    fn test_label_omitted_when_absent() {
        let rel = Relationship::new("a", "b", RelationshipType::CommandToCommandHandler);
        let json = serde_json::to_string(&rel).unwrap();
        assert_eq!(json, r#"{"fromId":"a","toId":"b","type":"CommandToCommandHandler"}"#);

        let labelled = rel.with_label("x");
        assert!(serde_json::to_string(&labelled).unwrap().ends_with(r#","label":"x"}"#));
    }
}
