//! Leveled dependency graph using petgraph
//!
//! Nodes are keyed by package identifier and carry their shortest known
//! distance from any root. Edges are deduplicated by (parent, child).

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;

use deplens_core::DependencySet;

/// Node in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageNode {
    /// Package identifier
    pub name: String,
    /// 0 for a root package, 1 for its direct dependencies, ...
    pub level: usize,
}

/// Directed graph of packages folded from one or more dependency sets
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Underlying directed graph
    graph: DiGraph<PackageNode, ()>,
    /// Identifier to node index, in insertion order
    node_map: IndexMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `root` and its direct `dependencies` into the graph.
    ///
    /// `root` is placed at `level` and each dependency at `level + 1`, unless
    /// a node already sits at a lower level. Each `root -> dependency` edge
    /// is stored once.
    pub fn add_package(&mut self, root: &str, dependencies: &DependencySet, level: usize) {
        let root_index = self.ensure_node(root, level);

        for dependency in dependencies {
            let child_index = self.ensure_node(dependency, level + 1);
            if self.graph.find_edge(root_index, child_index).is_none() {
                self.graph.add_edge(root_index, child_index, ());
            }
        }
    }

    /// Insert a node or lower the level of an existing one
    fn ensure_node(&mut self, name: &str, level: usize) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            let node = &mut self.graph[index];
            node.level = node.level.min(level);
            return index;
        }

        let index = self.graph.add_node(PackageNode {
            name: name.to_string(),
            level,
        });
        self.node_map.insert(name.to_string(), index);
        index
    }

    /// Get package node by identifier
    pub fn get_package(&self, name: &str) -> Option<&PackageNode> {
        let index = self.node_map.get(name)?;
        self.graph.node_weight(*index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Level of `name`, if present
    pub fn level(&self, name: &str) -> Option<usize> {
        self.get_package(name).map(|node| node.level)
    }

    /// All nodes ordered by level, then name
    pub fn packages(&self) -> Vec<&PackageNode> {
        let mut nodes: Vec<&PackageNode> = self.graph.node_weights().collect();
        nodes.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        nodes
    }

    /// Packages at level 0, sorted
    pub fn roots(&self) -> Vec<&str> {
        self.packages()
            .into_iter()
            .take_while(|node| node.level == 0)
            .map(|node| node.name.as_str())
            .collect()
    }

    /// All `(parent, child)` edges, sorted
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].name.as_str(),
                    self.graph[edge.target()].name.as_str(),
                )
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Direct children of `name`, sorted
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        let Some(&index) = self.node_map.get(name) else {
            return Vec::new();
        };
        let mut children: Vec<&str> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .map(|child| self.graph[child].name.as_str())
            .collect();
        children.sort_unstable();
        children
    }

    /// Get number of packages in the graph
    pub fn package_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get number of dependencies in the graph
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Underlying petgraph graph, for renderers
    pub fn as_petgraph(&self) -> &DiGraph<PackageNode, ()> {
        &self.graph
    }
}
