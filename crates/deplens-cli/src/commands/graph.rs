//! `deplens graph`: fold root packages into a graph and render it

use std::collections::BTreeSet;

use camino::Utf8Path;
use tracing::{debug, info};

use deplens_core::error::{DeplensError, DeplensResult};
use deplens_resolver::DependencyGraph;

use super::CommandContext;
use crate::output::render::{render, to_ascii_tree, GraphFormat};

pub async fn execute(format: GraphFormat, roots: Vec<String>, ctx: &CommandContext) -> DeplensResult<()> {
    let graph = build_graph(ctx, &roots).await;
    info!(
        "Graph has {} packages and {} dependencies",
        graph.package_count(),
        graph.dependency_count()
    );

    if format == GraphFormat::Tree {
        print_tree(ctx, &graph);
        return Ok(());
    }

    let path = &ctx.config.output_path;
    write_diagram(path, &render(&graph, format)).await?;
    ctx.output.success(&format!(
        "Wrote {} packages and {} dependencies to {}",
        graph.package_count(),
        graph.dependency_count(),
        path
    ));

    if ctx.config.ascii_tree {
        print_tree(ctx, &graph);
    }
    Ok(())
}

/// Fold the configured package and every extra root in at level 0.
///
/// Dependencies matching the configured substring filter are left out.
pub async fn build_graph(ctx: &CommandContext, extra_roots: &[String]) -> DependencyGraph {
    let config = &ctx.config;
    let mut graph = DependencyGraph::new();

    fold_root(ctx, &mut graph, &config.package_name, &config.package_version).await;

    let extra: BTreeSet<&str> = extra_roots
        .iter()
        .map(String::as_str)
        .filter(|root| *root != config.package_name)
        .collect();
    for root in extra {
        fold_root(ctx, &mut graph, root, "").await;
    }

    graph
}

async fn fold_root(ctx: &CommandContext, graph: &mut DependencyGraph, name: &str, version: &str) {
    let extraction = ctx.direct_dependencies(name, version).await;
    let dependencies = extraction
        .dependencies
        .without_matching(&ctx.config.substring_filter);

    debug!(
        "Folding {} with {} of {} dependencies",
        name,
        dependencies.len(),
        extraction.dependencies.len()
    );
    graph.add_package(name, &dependencies, 0);
}

/// Write a rendered diagram, creating parent directories as needed
pub async fn write_diagram(path: &Utf8Path, contents: &str) -> DeplensResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DeplensError::io(format!("Failed to create {}", parent), e))?;
    }

    tokio::fs::write(path, contents)
        .await
        .map_err(|e| DeplensError::io(format!("Failed to write {}", path), e))
}

fn print_tree(ctx: &CommandContext, graph: &DependencyGraph) {
    for line in to_ascii_tree(graph).lines() {
        ctx.output.plain_line(line);
    }
}
