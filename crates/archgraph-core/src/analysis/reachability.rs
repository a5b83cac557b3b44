//! Which controller entry points can reach each method.
//!
//! Only calls between methods of the same class are followed. A dispatch
//! buried behind a call into another class is attributed to the method that
//! performs it, not to the entry point.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::config::AnalysisConfig;
use crate::model::{walk, ClassDecl, Expr, ProgramModel};

use super::context::method_id;

/// Entry points per reachable method, keyed by `<class>::<method>`.
#[derive(Debug, Clone, Default)]
pub struct ControllerReachability {
    roots_by_method: HashMap<String, BTreeSet<String>>,
    entry_points: usize,
}

impl ControllerReachability {
    /// Scan controller classes of `model`. Yields an empty result when
    /// controller scanning is disabled.
    pub fn build(model: &ProgramModel, config: &AnalysisConfig) -> Self {
        if !config.scan.spring {
            return Self::default();
        }

        let mut entry_points: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut calls: HashMap<String, BTreeSet<String>> = HashMap::new();

        let controllers = model
            .classes
            .iter()
            .filter(|c| c.has_annotation(&config.markers.controller));
        for class in controllers {
            scan_controller(class, config, &mut entry_points, &mut calls);
        }

        let roots: Vec<&String> = entry_points.values().flatten().collect();
        let mut roots_by_method: HashMap<String, BTreeSet<String>> = HashMap::new();
        for root in &roots {
            let mut stack = vec![root.as_str()];
            let mut visited = HashSet::new();
            while let Some(current) = stack.pop() {
                if !visited.insert(current) {
                    continue;
                }
                roots_by_method
                    .entry(current.to_string())
                    .or_default()
                    .insert(root.to_string());
                if let Some(callees) = calls.get(current) {
                    stack.extend(callees.iter().map(String::as_str));
                }
            }
        }

        Self {
            roots_by_method,
            entry_points: roots.len(),
        }
    }

    /// Entry points that can reach `method_id`.
    pub fn roots_for(&self, method_id: &str) -> Option<&BTreeSet<String>> {
        self.roots_by_method.get(method_id).filter(|r| !r.is_empty())
    }

    pub fn entry_point_count(&self) -> usize {
        self.entry_points
    }

    pub fn reachable_method_count(&self) -> usize {
        self.roots_by_method.len()
    }
}

fn scan_controller(
    class: &ClassDecl,
    config: &AnalysisConfig,
    entry_points: &mut BTreeMap<String, BTreeSet<String>>,
    calls: &mut HashMap<String, BTreeSet<String>>,
) {
    for function in &class.functions {
        let id = method_id(Some(&class.name), &function.name);
        if function
            .annotations
            .iter()
            .any(|a| config.markers.is_route(&a.name))
        {
            entry_points
                .entry(class.name.clone())
                .or_default()
                .insert(id.clone());
        }

        walk(&function.body, &mut |expr| {
            if let Expr::Call(call) = expr {
                if call.owner.as_deref() == Some(class.name.as_str()) {
                    calls
                        .entry(id.clone())
                        .or_default()
                        .insert(method_id(Some(&class.name), &call.method));
                }
            }
        });
    }
}
