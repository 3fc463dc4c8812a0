//! Update command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, UpdateArgs};
use crate::commands::common::report_outcome;
use crate::context::RuntimeContext;

/// Execute the update command
pub(crate) async fn execute(args: &UpdateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect()?;
    let outcome = ctx.engine(&db).update(args.target).await?;
    report_outcome(&outcome, false);
    Ok(())
}
