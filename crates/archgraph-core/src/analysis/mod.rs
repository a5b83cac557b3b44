//! Architecture analysis passes.
//!
//! One run over one module's [`ProgramModel`]:
//!
//! 1. [`ClassIndex`] - aggregate membership and event classes
//! 2. [`TypeHierarchy`] - supertype checks and generic argument resolution, on demand
//! 3. [`ControllerReachability`] - entry points reaching each controller method
//! 4. [`GraphCollector`] - the main pass producing the [`ArchitectureGraph`]
//!
//! All state is owned by the run and dropped afterwards.

mod cache;
mod collector;
mod context;
mod hierarchy;
mod index;
mod reachability;

pub use cache::{ClassificationCache, Memo};
pub use collector::GraphCollector;
pub use context::{
    method_id, relationship_for_dispatch, type_display_name, FunctionContext, FunctionScope,
    RequestKind, TraversalState,
};
pub use hierarchy::TypeHierarchy;
pub use index::{AggregateInfo, AggregateRole, ClassIndex};
pub use reachability::ControllerReachability;

use std::path::Path;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::model::{ModelSource, ProgramModel};
use crate::ontology::{ArchitectureGraph, GraphStats};
use crate::sink::GraphSink;

/// Runs the analysis passes with one configuration.
#[derive(Debug, Clone, Default)]
pub struct ArchitectureAnalyzer {
    config: AnalysisConfig,
}

impl ArchitectureAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Build an analyzer from `path`, or from the default config locations.
    pub fn load(path: Option<&Path>) -> Result<Self, AnalysisError> {
        let config = AnalysisConfig::load_or_default(path)?;
        debug!(?config, "configuration loaded");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build the architecture graph of `model`. Never fails: facts that
    /// cannot be classified are left out.
    pub fn analyze(&self, model: &ProgramModel) -> ArchitectureGraph {
        let hierarchy = TypeHierarchy::new(model);
        let index = ClassIndex::build(&model.classes, &self.config.markers);
        let reachability = ControllerReachability::build(model, &self.config);
        debug!(
            module = model.module.as_str(),
            classes = hierarchy.len(),
            indexed = index.len(),
            entry_points = reachability.entry_point_count(),
            reachable_methods = reachability.reachable_method_count(),
            "analysis inputs prepared"
        );

        let graph = GraphCollector::new(&self.config, &index, &hierarchy, &reachability).collect(model);
        info!(
            module = model.module.as_str(),
            nodes = graph.nodes().len(),
            relationships = graph.relationships().len(),
            "architecture graph collected"
        );
        graph
    }

    /// Analyze `model` and hand the result to `sink`.
    pub fn analyze_into(
        &self,
        model: &ProgramModel,
        sink: &dyn GraphSink,
    ) -> Result<GraphStats, AnalysisError> {
        let graph = self.analyze(model);
        let stats = graph.stats();
        sink.write(graph.nodes(), graph.relationships())?;
        Ok(stats)
    }

    /// Load a model from `source`, then analyze it into `sink`.
    pub fn analyze_source(
        &self,
        source: &dyn ModelSource,
        sink: &dyn GraphSink,
    ) -> Result<GraphStats, AnalysisError> {
        info!(source = source.describe().as_str(), "loading program model");
        let model = source.load()?;
        self.analyze_into(&model, sink)
    }
}
