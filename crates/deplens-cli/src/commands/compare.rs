//! `deplens compare`: cross-check registry metadata against local installs

use std::collections::BTreeSet;

use tracing::info;

use deplens_core::error::DeplensResult;
use deplens_resolver::{compare, ComparisonResult, InstalledPackages};

use super::CommandContext;

/// Outcome for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageComparison {
    /// Both sources answered; the sets were compared
    Compared(ComparisonResult),
    /// At least one source could not say what the dependencies are
    Inconclusive {
        registry_known: bool,
        installed_known: bool,
    },
}

pub async fn execute(packages: Vec<String>, python: String, ctx: &CommandContext) -> DeplensResult<()> {
    let installed = InstalledPackages::new(python);
    info!("Reading installed metadata through {}", installed.python());

    let names: BTreeSet<String> = if packages.is_empty() {
        BTreeSet::from([ctx.config.package_name.clone()])
    } else {
        packages.into_iter().collect()
    };

    let mut matching = 0;
    let mut inconclusive = 0;
    for name in &names {
        let outcome = compare_package(ctx, &installed, name).await;
        match &outcome {
            PackageComparison::Compared(comparison) if comparison.is_match() => matching += 1,
            PackageComparison::Inconclusive { .. } => inconclusive += 1,
            PackageComparison::Compared(_) => {},
        }
        report(ctx, name, &outcome);
    }

    info!(
        "{} of {} packages match, {} inconclusive",
        matching,
        names.len(),
        inconclusive
    );
    Ok(())
}

/// Registry (or fixture) dependencies of `name` against its installed copy.
///
/// The configured version applies to the configured package; any other
/// package is looked up at its latest version. An empty set that comes with
/// a diagnostic is unknown, so no verdict is given for it.
pub async fn compare_package(
    ctx: &CommandContext,
    installed: &InstalledPackages,
    name: &str,
) -> PackageComparison {
    let version = if name == ctx.config.package_name {
        ctx.config.package_version.as_str()
    } else {
        ""
    };

    let registry = ctx.direct_dependencies(name, version).await;
    let local = installed.dependencies(name).await;
    if let Some(diagnostic) = &local.diagnostic {
        ctx.output.diagnostic(diagnostic);
    }

    if !registry.is_known() || !local.is_known() {
        return PackageComparison::Inconclusive {
            registry_known: registry.is_known(),
            installed_known: local.is_known(),
        };
    }

    let registry = registry.into_dependencies();
    let local = local.into_dependencies();
    PackageComparison::Compared(compare(&registry, &local))
}

fn report(ctx: &CommandContext, name: &str, outcome: &PackageComparison) {
    let comparison = match outcome {
        PackageComparison::Compared(comparison) => comparison,
        PackageComparison::Inconclusive {
            registry_known,
            installed_known,
        } => {
            let unknown = match (registry_known, installed_known) {
                (false, false) => "registry and installed",
                (false, true) => "registry",
                _ => "installed",
            };
            ctx.output.warn(&format!(
                "{}: inconclusive, {} dependencies are unknown",
                name, unknown
            ));
            return;
        },
    };

    if comparison.is_match() {
        ctx.output.success(&format!(
            "{}: registry and installed metadata agree {}",
            name, comparison.set_a
        ));
        return;
    }

    ctx.output.warn(&format!("{}: dependency sets differ", name));
    if !comparison.only_in_a.is_empty() {
        ctx.output.item(&format!("only in registry: {}", comparison.only_in_a));
    }
    if !comparison.only_in_b.is_empty() {
        ctx.output.item(&format!("only installed: {}", comparison.only_in_b));
    }
    ctx.output.info("Possible causes:");
    for cause in comparison.explanations() {
        ctx.output.item(cause);
    }
}
