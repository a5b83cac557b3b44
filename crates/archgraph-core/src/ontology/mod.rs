//! Architecture Graph Ontology
//!
//! Defines the output schema: architectural elements and the
//! dispatch/handling/domain relationships between them.
//!
//! ## Modules
//!
//! - `nodes` - Element types: entry points, requests, handlers, aggregates, events
//! - `edges` - Relationship types: dispatch, handling, domain
//! - `graph` - [`ArchitectureGraph`], the append-only accumulator
//!
//! Node identity is by id with first insertion winning. Relationships have set
//! semantics. Both keep insertion order so output is deterministic.

pub mod edges;
pub mod graph;
pub mod nodes;

pub use edges::*;
pub use graph::*;
pub use nodes::*;

use serde::{Deserialize, Serialize};

/// Categories of nodes for filtering and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Where requests originate (controllers, validators, sender methods)
    Entry,
    /// Commands, queries and client requests
    Request,
    /// Request and event handlers
    Handler,
    /// Aggregates and entity methods
    Domain,
    /// Domain and integration events
    Event,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 5] = [
        NodeCategory::Entry,
        NodeCategory::Request,
        NodeCategory::Handler,
        NodeCategory::Domain,
        NodeCategory::Event,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NodeCategory::Entry => "entry",
            NodeCategory::Request => "request",
            NodeCategory::Handler => "handler",
            NodeCategory::Domain => "domain",
            NodeCategory::Event => "event",
        }
    }
}

/// Categories of edges for filtering and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeCategory {
    /// Something sends a request
    Dispatch,
    /// A request or event reaches its handler
    Handling,
    /// Handlers touch aggregates, entity methods raise events
    Domain,
}

impl EdgeCategory {
    pub const ALL: [EdgeCategory; 3] = [
        EdgeCategory::Dispatch,
        EdgeCategory::Handling,
        EdgeCategory::Domain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EdgeCategory::Dispatch => "dispatch",
            EdgeCategory::Handling => "handling",
            EdgeCategory::Domain => "domain",
        }
    }
}
