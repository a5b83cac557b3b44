//! JSON file sink for the `nodes.json` / `rels.json` pair.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{NODES_FILE, RELS_FILE};
use crate::ontology::{ArchitectureGraph, Node, Relationship};

use super::error::SinkError;
use super::GraphSink;

/// Writes the graph as two compact JSON arrays.
///
/// ```text
/// <dir>/
///   nodes.json    # [{"id","name","fullName","type"}, ...]
///   rels.json     # [{"fromId","toId","type","label"?}, ...]
/// ```
///
/// Newlines in string values are replaced with a single space.
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.dir.join(NODES_FILE)
    }

    pub fn rels_path(&self) -> PathBuf {
        self.dir.join(RELS_FILE)
    }

    fn ensure_dir(&self) -> Result<(), SinkError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| SinkError::io(&self.dir, e))?;
        }
        Ok(())
    }
}

impl GraphSink for JsonFileSink {
    fn write(&self, nodes: &[Node], relationships: &[Relationship]) -> Result<(), SinkError> {
        self.ensure_dir()?;

        let nodes: Vec<Node> = nodes.iter().map(single_line_node).collect();
        let path = self.nodes_path();
        let json = serde_json::to_string(&nodes)?;
        fs::write(&path, json).map_err(|e| SinkError::io(&path, e))?;

        let rels: Vec<Relationship> = relationships.iter().map(single_line_rel).collect();
        let path = self.rels_path();
        let json = serde_json::to_string(&rels)?;
        fs::write(&path, json).map_err(|e| SinkError::io(&path, e))?;

        Ok(())
    }
}

/// Read a `nodes.json` / `rels.json` pair back into a graph.
pub fn load_graph(dir: impl AsRef<Path>) -> Result<ArchitectureGraph, SinkError> {
    let dir = dir.as_ref();
    let nodes: Vec<Node> = read_array(&dir.join(NODES_FILE))?;
    let rels: Vec<Relationship> = read_array(&dir.join(RELS_FILE))?;

    let mut graph = ArchitectureGraph::new();
    for node in nodes {
        graph.add_node(node);
    }
    for rel in rels {
        graph.add_relationship(rel);
    }
    Ok(graph)
}

fn read_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, SinkError> {
    if !path.exists() {
        return Err(SinkError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| SinkError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

fn single_line(s: &str) -> Cow<'_, str> {
    if s.contains('\n') {
        Cow::Owned(s.replace('\n', " "))
    } else {
        Cow::Borrowed(s)
    }
}

fn single_line_node(node: &Node) -> Node {
    Node {
        id: single_line(&node.id).into_owned(),
        name: single_line(&node.name).into_owned(),
        full_name: single_line(&node.full_name).into_owned(),
        node_type: node.node_type,
    }
}

fn single_line_rel(rel: &Relationship) -> Relationship {
    Relationship {
        from_id: single_line(&rel.from_id).into_owned(),
        to_id: single_line(&rel.to_id).into_owned(),
        rel_type: rel.rel_type,
        label: rel.label.as_deref().map(|l| single_line(l).into_owned()),
    }
}
