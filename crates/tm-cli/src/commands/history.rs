//! History command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, HistoryArgs, OutputFormat};
use crate::commands::common::print_table;
use crate::context::RuntimeContext;

/// Execute the history command
pub(crate) async fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect()?;
    let records = ctx.engine(&db).history().await?;

    match args.output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&records).context("Failed to serialize history")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|r| {
                    vec![
                        r.version.to_string(),
                        r.applied_at
                            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();
            print_table(&["VERSION", "APPLIED AT"], &rows);
        }
    }
    Ok(())
}
