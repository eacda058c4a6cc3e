//! Dependency graph renderers: Mermaid, Graphviz DOT and an ASCII tree

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use clap::ValueEnum;
use petgraph::dot::{Config, Dot};

use deplens_resolver::DependencyGraph;

/// Supported diagram formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// Mermaid `flowchart TD` text
    Mermaid,
    /// Graphviz DOT
    Dot,
    /// Indented tree, printed to the terminal
    Tree,
}

/// Render `graph` in `format`
pub fn render(graph: &DependencyGraph, format: GraphFormat) -> String {
    match format {
        GraphFormat::Mermaid => to_mermaid(graph),
        GraphFormat::Dot => to_dot(graph),
        GraphFormat::Tree => to_ascii_tree(graph),
    }
}

/// Mermaid flowchart; node ids follow sorted package names
pub fn to_mermaid(graph: &DependencyGraph) -> String {
    let mut mermaid = String::from("flowchart TD\n");

    let mut names: Vec<&str> = graph.packages().iter().map(|node| node.name.as_str()).collect();
    names.sort_unstable();
    let ids: BTreeMap<&str, String> = names
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, format!("N{}", index)))
        .collect();

    // Writing to a String cannot fail
    for (name, id) in &ids {
        let _ = writeln!(mermaid, "    {}[\"{}\"]", id, name);
    }
    for (parent, child) in graph.edges() {
        if let (Some(source), Some(target)) = (ids.get(parent), ids.get(child)) {
            let _ = writeln!(mermaid, "    {} --> {}", source, target);
        }
    }

    mermaid
}

/// Graphviz DOT with package names as labels
pub fn to_dot(graph: &DependencyGraph) -> String {
    let labelled = graph
        .as_petgraph()
        .map(|_, node| node.name.as_str(), |_, _| "");
    format!("{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
}

/// Each root followed by its dependency tree, children sorted
pub fn to_ascii_tree(graph: &DependencyGraph) -> String {
    let mut tree = String::new();
    for root in graph.roots() {
        tree.push_str(root);
        tree.push('\n');

        let mut visited = HashSet::from([root]);
        write_children(graph, root, "", &mut visited, &mut tree);
    }
    tree
}

fn write_children<'g>(
    graph: &'g DependencyGraph,
    parent: &str,
    prefix: &str,
    visited: &mut HashSet<&'g str>,
    tree: &mut String,
) {
    let children = graph.dependencies_of(parent);
    let count = children.len();

    for (index, child) in children.into_iter().enumerate() {
        let last = index + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        let _ = writeln!(tree, "{}{}{}", prefix, branch, child);

        // A package already on this path is shown once without expanding
        if visited.insert(child) {
            let indent = if last { "    " } else { "│   " };
            write_children(graph, child, &format!("{}{}", prefix, indent), visited, tree);
            visited.remove(child);
        }
    }
}
