//! `deplens config`: show the effective analysis parameters

use deplens_core::error::DeplensResult;

use super::CommandContext;

pub async fn execute(ctx: &CommandContext) -> DeplensResult<()> {
    ctx.output.heading("Analysis parameters:");
    for (key, value) in ctx.config.parameters() {
        ctx.output.plain_line(&format!("{}: {}", key, value));
    }
    Ok(())
}
