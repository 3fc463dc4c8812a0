//! Validate command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::ExitCode;
use crate::context::RuntimeContext;

/// Execute the validate command
pub(crate) async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let reports = ctx.migrations().validate(args.version, args.check_sql)?;

    if reports.is_empty() {
        println!("No migration files found in {}", ctx.files.dir().display());
        return Ok(());
    }

    let mut failed = 0;
    for report in &reports {
        match &report.error {
            None => println!("  ok    {}", report.version),
            Some(error) => {
                failed += 1;
                println!("  FAIL  {}", report.version);
                for line in error.lines() {
                    println!("        {}", line);
                }
            }
        }
    }

    println!();
    if failed > 0 {
        println!("{} of {} migration(s) invalid", failed, reports.len());
        return Err(ExitCode(1).into());
    }
    println!("{} migration(s) valid", reports.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tm_core::MigrationFiles;

    #[tokio::test]
    async fn test_validate_leaves_database_untouched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tidemark.yml"), "name: shop\n").unwrap();
        let global = GlobalArgs {
            verbose: false,
            project_dir: dir.path().display().to_string(),
            config: None,
            target: None,
        };
        let ctx = RuntimeContext::new(&global).unwrap();
        ctx.migrations().scaffold(None).unwrap();
        assert!(ctx.files.file_exists(0));

        let args = ValidateArgs {
            version: None,
            check_sql: false,
        };
        execute(&args, &global).await.unwrap();
        assert!(!dir.path().join("tidemark.duckdb").exists());
    }
}
