//! Init command implementation - writes tidemark.yml and the bootstrap migration

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tm_core::config::CONFIG_FILE;
use tm_core::Config;

use crate::cli::{GlobalArgs, InitArgs};
use crate::context::RuntimeContext;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs, global: &GlobalArgs) -> Result<()> {
    let project_dir = Path::new(&global.project_dir);
    fs::create_dir_all(project_dir)
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;

    let config_path = match &global.config {
        Some(path) => Path::new(path).to_path_buf(),
        None => project_dir.join(CONFIG_FILE),
    };

    let config = if config_path.exists() {
        Config::load(&config_path).context("Failed to load configuration file")?
    } else {
        let name = match &args.name {
            Some(name) => name.clone(),
            None => default_name(project_dir)?,
        };
        let config = Config::new(&name);
        config.validate()?;
        fs::write(&config_path, render_config(&config))
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        if !args.quiet {
            println!("  Created {}", config_path.display());
        }
        config
    };

    let ctx = RuntimeContext::from_config(config, project_dir, global)?;
    ctx.files
        .ensure_dir()
        .context("Failed to create migrations directory")?;

    let db = ctx.connect()?;
    let outcome = ctx.engine(&db).init(args.quiet).await?;
    if !args.quiet {
        println!("{}", outcome);
        println!();
        println!("Next steps:");
        println!("  tm new        # Write migration 1");
        println!("  tm migrate    # Apply it");
    }
    Ok(())
}

/// Project name from the directory name
fn default_name(project_dir: &Path) -> Result<String> {
    let absolute = project_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", project_dir.display()))?;
    absolute
        .file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a project name, pass --name"))
}

fn render_config(config: &Config) -> String {
    // Escape YAML special characters in interpolated values
    let safe_name = config.name.replace('"', "\\\"");
    let safe_db_path = config.database.path.replace('"', "\\\"");
    format!(
        r#"name: "{name}"

migrations_path: "{migrations}"
dialect: {dialect}
version_table: {table}

database:
  type: {db_type}
  path: "{db_path}"

# targets:
#   prod:
#     database:
#       type: duckdb
#       path: "prod.duckdb"
"#,
        name = safe_name,
        migrations = config.migrations_path,
        dialect = config.dialect,
        table = config.version_table,
        db_type = config.database.db_type,
        db_path = safe_db_path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, render_config(&Config::new("shop \"main\""))).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.name, "shop \"main\"");
        assert_eq!(loaded.migrations_path, "migrations");
        assert_eq!(loaded.version_table, "tidemark_version");
        assert_eq!(loaded.database.path, "tidemark.duckdb");
    }
}
