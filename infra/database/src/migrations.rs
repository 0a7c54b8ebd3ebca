use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashSet;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// One schema migration belonging to a feature slice.
#[derive(Debug)]
pub(crate) struct Migration {
    pub slice_key: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    const fn new(slice_key: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice_key, version, script }
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration { slice_key: self.slice_key.to_owned(), version: self.version.to_owned() }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub slice_key: String,
    pub version: String,
}

/// Built-in schema, one entry per slice.
///
/// The bookkeeping tables come first so later entries can be recorded.
fn builtin_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            "sys.database",
            "0001",
            "DEFINE TABLE IF NOT EXISTS migration SCHEMALESS;
             DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;",
        ),
        Migration::new(
            "audit",
            "0001",
            "DEFINE TABLE IF NOT EXISTS change_log SCHEMALESS;
             DEFINE INDEX IF NOT EXISTS change_log_parent ON TABLE change_log \
             COLUMNS parent_kind, parent_id;",
        ),
        Migration::new(
            "organization",
            "0001",
            "DEFINE TABLE IF NOT EXISTS org_unit SCHEMALESS;",
        ),
        Migration::new(
            "application",
            "0001",
            "DEFINE TABLE IF NOT EXISTS application SCHEMALESS;
             DEFINE INDEX IF NOT EXISTS application_asset_code ON TABLE application \
             COLUMNS asset_code;
             DEFINE INDEX IF NOT EXISTS application_org_unit ON TABLE application \
             COLUMNS org_unit_id;",
        ),
        Migration::new(
            "panels",
            "0001",
            "DEFINE TABLE IF NOT EXISTS content_panel SCHEMALESS;
             DEFINE INDEX IF NOT EXISTS content_panel_group ON TABLE content_panel \
             COLUMNS panel_group;",
        ),
    ]
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied_keys = self.load_applied_keys().await?;

        for migration in builtin_migrations() {
            if applied_keys.contains(&format!("{}:{}", migration.slice_key, migration.version)) {
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(&migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        self.db
            .query(migration.script)
            .await
            .context(format!("Schema script failed at {}:{}", migration.slice_key, migration.version))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Schema statement failed at {}:{}", migration.slice_key, migration.version))?;

        self.db
            .query("CREATE migration SET slice = $slice, version = $version, applied_at = time::now();")
            .bind(("slice", migration.slice_key))
            .bind(("version", migration.version))
            .await
            .context("Recording applied migration")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Recording applied migration")?;

        Ok(())
    }

    async fn load_applied_keys(&self) -> Result<FxHashSet<String>, DatabaseError> {
        // Selecting from a not-yet-defined table yields an empty result,
        // so a fresh engine needs no readiness probe.
        let entries = self
            .db
            .query("SELECT slice AS slice_key, version FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing applied migrations")?;

        Ok(entries
            .into_iter()
            .map(|entry| format!("{}:{}", entry.slice_key, entry.version))
            .collect())
    }
}
