//! New command implementation - writes the next migration file

use anyhow::Result;

use crate::cli::{GlobalArgs, NewArgs};
use crate::context::RuntimeContext;

/// Execute the new command
pub(crate) async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let version = ctx.migrations().scaffold(args.version)?;
    println!("Created migration {}", version);
    Ok(())
}
