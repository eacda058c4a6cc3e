//! `deplens deps`: list the direct dependencies of the configured package

use deplens_core::error::DeplensResult;

use super::{package_label, CommandContext};

pub async fn execute(ctx: &CommandContext) -> DeplensResult<()> {
    let config = &ctx.config;
    let label = package_label(&config.package_name, &config.package_version);

    let extraction = ctx
        .direct_dependencies(&config.package_name, &config.package_version)
        .await;

    if extraction.dependencies.is_empty() {
        if extraction.is_known() {
            ctx.output.success(&format!("{} has no dependencies", label));
        } else {
            ctx.output.warn(&format!("Dependencies of {} are unknown", label));
        }
        return Ok(());
    }

    ctx.output.heading(&format!(
        "{} depends on {} packages:",
        label,
        extraction.dependencies.len()
    ));
    for dependency in &extraction.dependencies {
        ctx.output.item(dependency);
    }
    Ok(())
}
