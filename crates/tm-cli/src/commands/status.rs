//! Status command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::describe_version;
use crate::context::RuntimeContext;

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect()?;
    let status = ctx.engine(&db).status().await?;

    match args.output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&status).context("Failed to serialize status")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("Project:  {}", ctx.config.name);
            println!("Database: {}", status.database);
            println!("Current:  {}", describe_version(status.current));
            println!(
                "Latest:   {}",
                status
                    .latest
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            if status.pending.is_empty() {
                println!("Pending:  none");
            } else {
                let pending: Vec<String> = status.pending.iter().map(|v| v.to_string()).collect();
                println!("Pending:  {}", pending.join(", "));
            }
        }
    }
    Ok(())
}
