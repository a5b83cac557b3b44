//! Graph output.
//!
//! A [`GraphSink`] receives the collected nodes and relationships once per
//! run. [`JsonFileSink`] writes the `nodes.json` / `rels.json` pair that
//! downstream renderers read back with [`load_graph`].

mod error;
mod json;
mod layout;

pub use error::SinkError;
pub use json::{load_graph, JsonFileSink};
pub use layout::resolve_output_dir;

use crate::ontology::{Node, Relationship};

/// Trait for graph output backends.
pub trait GraphSink {
    /// Write nodes and relationships, each in the given order.
    fn write(&self, nodes: &[Node], relationships: &[Relationship]) -> Result<(), SinkError>;
}
