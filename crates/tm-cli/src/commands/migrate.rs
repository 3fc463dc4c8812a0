//! Migrate command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::report_outcome;
use crate::context::RuntimeContext;

/// Execute the migrate command
pub(crate) async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect()?;
    let outcome = ctx.engine(&db).migrate(args.target, args.dry_run).await?;
    report_outcome(&outcome, args.dry_run);
    Ok(())
}
