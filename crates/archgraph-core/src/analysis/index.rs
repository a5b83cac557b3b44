//! Class index: aggregate membership and event classes, built once per run.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::config::MarkerConfig;
use crate::model::ClassDecl;

/// Role of a class inside its aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregateRole {
    Entity,
    ValueObject,
    FactoryPayload,
    DomainEvent,
    Other(String),
}

impl AggregateRole {
    pub fn parse(value: &str) -> Self {
        match value {
            "entity" => Self::Entity,
            "value-object" => Self::ValueObject,
            "factory-payload" => Self::FactoryPayload,
            "domain-event" => Self::DomainEvent,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Aggregate metadata declared on a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateInfo {
    pub aggregate_name: String,
    pub role: AggregateRole,
    pub root: bool,
}

impl AggregateInfo {
    /// Read the aggregate tag named `marker` from `class`.
    ///
    /// The aggregate name defaults to the class's simple name.
    pub fn read(class: &ClassDecl, marker: &str) -> Option<Self> {
        let ann = class.annotation(marker)?;
        let aggregate_name = match ann.text("aggregate") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => class.simple_name().to_string(),
        };
        Some(Self {
            aggregate_name,
            role: AggregateRole::parse(ann.text("type").unwrap_or_default()),
            root: ann.flag("root").unwrap_or(false),
        })
    }

    pub fn is_entity(&self) -> bool {
        self.role == AggregateRole::Entity
    }

    pub fn is_root_entity(&self) -> bool {
        self.is_entity() && self.root
    }
}

/// Immutable lookup tables keyed by fully-qualified class name.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    aggregate_info: HashMap<String, AggregateInfo>,
    roots_by_name: HashMap<String, String>,
    payload_to_aggregate: HashMap<String, String>,
    entity_methods: HashMap<String, BTreeSet<String>>,
    domain_events: HashSet<String>,
    integration_events: HashSet<String>,
}

impl ClassIndex {
    /// Index `classes` in order. Later declarations of an already indexed
    /// name and later roots of an already registered aggregate are ignored.
    pub fn build(classes: &[ClassDecl], markers: &MarkerConfig) -> Self {
        let mut index = Self::default();
        let mut seen = HashSet::new();

        for class in classes {
            let fq = class.name.as_str();
            if !seen.insert(fq) {
                debug!(class = fq, "duplicate class declaration ignored by index");
                continue;
            }

            if class.has_annotation(&markers.domain_event) {
                index.domain_events.insert(fq.to_string());
            }
            if class.has_annotation(&markers.integration_event) {
                index.integration_events.insert(fq.to_string());
            }

            let Some(info) = AggregateInfo::read(class, &markers.aggregate) else {
                continue;
            };
            match info.role {
                AggregateRole::Entity => {
                    if info.root {
                        index.register_root(&info.aggregate_name, fq);
                    }
                    index
                        .entity_methods
                        .entry(fq.to_string())
                        .or_default()
                        .extend(class.functions.iter().map(|f| f.name.clone()));
                }
                AggregateRole::FactoryPayload => {
                    index
                        .payload_to_aggregate
                        .insert(fq.to_string(), info.aggregate_name.clone());
                }
                AggregateRole::DomainEvent => {
                    index.domain_events.insert(fq.to_string());
                }
                AggregateRole::ValueObject | AggregateRole::Other(_) => {}
            }
            index.aggregate_info.insert(fq.to_string(), info);
        }

        index
    }

    fn register_root(&mut self, aggregate: &str, fq: &str) {
        if let Some(existing) = self.roots_by_name.get(aggregate) {
            debug!(
                aggregate,
                root = existing.as_str(),
                shadowed = fq,
                "aggregate root already registered"
            );
            return;
        }
        self.roots_by_name.insert(aggregate.to_string(), fq.to_string());
    }

    pub fn aggregate_info(&self, fq: &str) -> Option<&AggregateInfo> {
        self.aggregate_info.get(fq)
    }

    /// Root entity registered for aggregate `name`.
    pub fn root_for(&self, name: &str) -> Option<&str> {
        self.roots_by_name.get(name).map(String::as_str)
    }

    pub fn roots_by_name(&self) -> &HashMap<String, String> {
        &self.roots_by_name
    }

    /// Aggregate name a factory payload class belongs to.
    pub fn aggregate_for_payload(&self, fq: &str) -> Option<&str> {
        self.payload_to_aggregate.get(fq).map(String::as_str)
    }

    /// Declared method names of an entity class.
    pub fn entity_methods(&self, fq: &str) -> Option<&BTreeSet<String>> {
        self.entity_methods.get(fq)
    }

    pub fn is_domain_event(&self, fq: &str) -> bool {
        self.domain_events.contains(fq)
    }

    pub fn is_integration_event(&self, fq: &str) -> bool {
        self.integration_events.contains(fq)
    }

    pub fn len(&self) -> usize {
        self.aggregate_info.len() + self.domain_events.len() + self.integration_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
