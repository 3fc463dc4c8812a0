//! Rollback command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::commands::common::report_outcome;
use crate::context::RuntimeContext;

/// Execute the rollback command
pub(crate) async fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect()?;
    let outcome = ctx.engine(&db).rollback(args.target).await?;
    report_outcome(&outcome, false);
    Ok(())
}
