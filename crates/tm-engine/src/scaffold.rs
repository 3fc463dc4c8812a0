//! Migration file templates

use crate::error::EngineResult;
use chrono::NaiveDateTime;
use minijinja::{context, Environment};
use tm_core::{Section, Version, BOOTSTRAP_VERSION};
use tm_db::Dialect;

const TEMPLATE_NAME: &str = "migration.sql";

const MIGRATION_TEMPLATE: &str = r#"{{ comment }} Migration {{ version }}
{{ comment }} Created {{ created }}
{% if bootstrap %}{{ comment }} Creates the version table. Every later migration records itself in it.
{% else %}{{ comment }} Describe the change here. Text above the first marker is ignored.
{% endif %}
{{ start_migration }}
{{ begin }}
{% if bootstrap %}{{ create_table }}
{% else %}{{ comment }} Forward statements go here.
{% endif %}{{ insert_version }}
{{ commit }}
{{ end_migration }}

{{ start_rollback }}
{{ begin }}
{% if bootstrap %}{{ drop_table }}
{% else %}{{ comment }} Reverse statements go here.
{{ delete_version }}
{% endif %}{{ commit }}
{{ end_rollback }}"#;

/// Render the scaffold for `version`.
///
/// Version 0 renders the bootstrap migration that creates and drops the
/// version table; other versions render an empty migration that records
/// and removes its own version.
pub fn render_migration(
    version: Version,
    dialect: &dyn Dialect,
    created: NaiveDateTime,
) -> EngineResult<String> {
    let grammar = dialect.grammar();
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, MIGRATION_TEMPLATE)?;
    let template = env.get_template(TEMPLATE_NAME)?;

    let mut rendered = template.render(context! {
        comment => dialect.comment(),
        version => version,
        created => created.format("%Y-%m-%d %H:%M:%S").to_string(),
        bootstrap => version == BOOTSTRAP_VERSION,
        start_migration => grammar.start_marker(Section::Migration),
        end_migration => grammar.end_marker(Section::Migration),
        start_rollback => grammar.start_marker(Section::Rollback),
        end_rollback => grammar.end_marker(Section::Rollback),
        begin => grammar.start_transaction(),
        commit => grammar.end_transaction(),
        create_table => dialect.create_version_table(),
        drop_table => dialect.drop_version_table(),
        insert_version => dialect.insert_version(version),
        delete_version => dialect.delete_version(version),
    })?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
