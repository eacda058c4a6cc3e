//! Unit tests for CLI commands.

use super::*;
use std::fs;

use camino::Utf8Path;
use deplens_core::DependencySet;
use deplens_resolver::InstalledPackages;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::output::render::GraphFormat;

fn set(names: &[&str]) -> DependencySet {
    names.iter().copied().collect()
}

fn utf8_dir(temp_dir: &TempDir) -> &Utf8Path {
    Utf8Path::from_path(temp_dir.path()).expect("temp dir is not UTF-8")
}

/// Test-mode configuration backed by a fixture file in `temp_dir`
fn fixture_config(temp_dir: &TempDir, contents: &str) -> AnalysisConfig {
    let dir = utf8_dir(temp_dir);
    let fixture = dir.join("requests.txt");
    fs::write(&fixture, contents).unwrap();

    AnalysisConfig {
        package_name: "requests".to_string(),
        test_mode: true,
        fixture_path: Some(fixture),
        output_path: dir.join("diagrams").join("requests.mmd"),
        ..AnalysisConfig::default()
    }
}

fn registry_config(server: &MockServer, temp_dir: &TempDir) -> AnalysisConfig {
    AnalysisConfig {
        package_name: "requests".to_string(),
        repository_url: server.uri(),
        output_path: utf8_dir(temp_dir).join("graph.dot"),
        ..AnalysisConfig::default()
    }
}

fn create_test_context(config: AnalysisConfig) -> CommandContext {
    CommandContext::with_output(config, OutputHandler::plain()).unwrap()
}

async fn mount_package(server: &MockServer, name: &str, version: &str, requires_dist: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/json", name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "info": { "name": name, "version": version, "requires_dist": requires_dist },
            "releases": { (version): [] }
        })))
        .mount(server)
        .await;
}

#[test]
fn test_package_label() {
    assert_eq!(package_label("requests", ""), "requests");
    assert_eq!(package_label("requests", "2.25.1"), "requests==2.25.1");
}

#[test]
fn test_context_rejects_unusable_registry_url() {
    let config = AnalysisConfig {
        package_name: "requests".to_string(),
        repository_url: "mailto:admin@example.com".to_string(),
        ..AnalysisConfig::default()
    };

    let error = CommandContext::with_output(config, OutputHandler::plain())
        .err()
        .expect("expected a configuration error");
    assert!(matches!(
        error,
        DeplensError::ConfigValidation { ref field, .. } if field == "repository_url"
    ));
}

#[tokio::test]
async fn test_fixture_source_covers_configured_package_only() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(fixture_config(&temp_dir, "urllib3, idna, certifi"));

    let own = ctx.direct_dependencies("requests", "").await;
    assert!(own.is_known());
    assert_eq!(own.dependencies, set(&["urllib3", "idna", "certifi"]));

    let other = ctx.direct_dependencies("flask", "").await;
    assert!(other.dependencies.is_empty());
    assert!(matches!(
        other.diagnostic,
        Some(DeplensError::OutsideFixture { ref name, ref fixture_package })
            if name == "flask" && fixture_package == "requests"
    ));
}

#[tokio::test]
async fn test_missing_fixture_is_a_diagnostic() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(&temp_dir, "six");
    config.fixture_path = Some(utf8_dir(&temp_dir).join("absent.txt"));
    let ctx = create_test_context(config);

    let extraction = ctx.direct_dependencies("requests", "").await;
    assert!(extraction.dependencies.is_empty());
    assert!(matches!(extraction.diagnostic, Some(DeplensError::FixtureRead { .. })));

    // Best effort: the command still succeeds
    assert!(deps::execute(&ctx).await.is_ok());
}

#[tokio::test]
async fn test_deps_and_config_commands() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(fixture_config(&temp_dir, "urllib3 idna"));

    assert!(dispatch_command(Commands::Deps, &ctx).await.is_ok());
    assert!(dispatch_command(Commands::Config, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_build_graph_applies_substring_filter() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(&temp_dir, "urllib3, idna, pytest-cov, certifi");
    config.substring_filter = "pytest".to_string();
    let ctx = create_test_context(config);

    let graph = graph::build_graph(&ctx, &[]).await;

    assert_eq!(graph.roots(), vec!["requests"]);
    assert_eq!(
        graph.dependencies_of("requests"),
        vec!["certifi", "idna", "urllib3"]
    );
    assert!(!graph.contains("pytest-cov"));
}

#[tokio::test]
async fn test_graph_command_writes_mermaid_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(fixture_config(&temp_dir, "urllib3, idna"));

    dispatch_command(
        Commands::Graph {
            format: GraphFormat::Mermaid,
            roots: Vec::new(),
        },
        &ctx,
    )
    .await
    .unwrap();

    let written = fs::read_to_string(&ctx.config.output_path).unwrap();
    assert!(written.starts_with("flowchart TD\n"));
    assert!(written.contains("[\"requests\"]"));
    assert_eq!(written.matches("-->").count(), 2);
}

#[tokio::test]
async fn test_graph_tree_format_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(fixture_config(&temp_dir, "urllib3"));

    graph::execute(GraphFormat::Tree, Vec::new(), &ctx).await.unwrap();

    assert!(!ctx.config.output_path.exists());
}

#[tokio::test]
async fn test_graph_from_registry_with_extra_roots() {
    let server = MockServer::start().await;
    mount_package(&server, "requests", "2.25.1", &["urllib3>=1.21.1", "idna>=2.5,<3"]).await;
    mount_package(&server, "httpx", "0.27.0", &["idna", "sniffio", "python>=3.8"]).await;

    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(registry_config(&server, &temp_dir));

    let roots = vec!["httpx".to_string(), "requests".to_string(), "missing".to_string()];
    let graph = graph::build_graph(&ctx, &roots).await;

    assert_eq!(graph.roots(), vec!["httpx", "missing", "requests"]);
    assert_eq!(graph.dependencies_of("httpx"), vec!["idna", "sniffio"]);
    assert!(graph.dependencies_of("missing").is_empty());
    assert_eq!(graph.level("idna"), Some(1));
    assert_eq!(graph.dependency_count(), 4);

    graph::execute(GraphFormat::Dot, roots, &ctx).await.unwrap();
    let written = fs::read_to_string(&ctx.config.output_path).unwrap();
    assert!(written.starts_with("digraph"));
}

#[tokio::test]
async fn test_compare_without_local_installation_is_inconclusive() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(fixture_config(&temp_dir, "urllib3, idna"));
    let installed = InstalledPackages::new("deplens-no-such-python");

    let outcome = compare::compare_package(&ctx, &installed, "requests").await;
    assert_eq!(
        outcome,
        compare::PackageComparison::Inconclusive {
            registry_known: true,
            installed_known: false,
        }
    );

    assert!(compare::execute(Vec::new(), "deplens-no-such-python".to_string(), &ctx)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_compare_with_both_sources_failing_is_not_a_match() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = create_test_context(fixture_config(&temp_dir, "urllib3, idna"));
    let installed = InstalledPackages::new("deplens-no-such-python");

    // The fixture only covers `requests`, and the interpreter does not exist
    let outcome = compare::compare_package(&ctx, &installed, "flask").await;
    assert_eq!(
        outcome,
        compare::PackageComparison::Inconclusive {
            registry_known: false,
            installed_known: false,
        }
    );
}

#[tokio::test]
async fn test_write_diagram_creates_parent_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let target = utf8_dir(&temp_dir).join("a").join("b").join("graph.mmd");

    graph::write_diagram(&target, "flowchart TD\n").await.unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "flowchart TD\n");
}
