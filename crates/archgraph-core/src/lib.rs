pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod ontology;
pub mod sink;

pub use analysis::ArchitectureAnalyzer;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use model::{JsonModelSource, ModelSource, ProgramModel};
pub use ontology::{ArchitectureGraph, GraphStats, Node, NodeType, Relationship, RelationshipType};
pub use sink::{load_graph, resolve_output_dir, GraphSink, JsonFileSink, SinkError};
