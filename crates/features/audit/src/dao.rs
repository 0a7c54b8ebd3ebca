use crate::error::AuditError;
use atlas_database::{Database, DatabaseError, DatabaseErrorExt};
use atlas_domain::changelog::ChangeLogEntry;
use atlas_domain::entity::{EntityKind, EntityReference, Severity};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use surrealdb::types::SurrealValue;

pub(crate) const TABLE: &str = "change_log";

const SELECT_FIELDS: &str = "record::id(id) AS id, message, severity, username, \
                             parent_kind, parent_id, created_at";

/// Storage projection of one change-log entry.
#[derive(Debug, SurrealValue)]
pub(crate) struct ChangeLogRow {
    id: i64,
    message: String,
    severity: String,
    username: String,
    parent_kind: String,
    parent_id: i64,
    created_at: String,
}

impl TryFrom<ChangeLogRow> for ChangeLogEntry {
    type Error = AuditError;

    fn try_from(row: ChangeLogRow) -> Result<Self, Self::Error> {
        let severity = Severity::from_str(&row.severity).map_err(|_| AuditError::Corrupt {
            id: row.id,
            detail: format!("unknown severity '{}'", row.severity),
        })?;
        let kind = EntityKind::from_str(&row.parent_kind).map_err(|_| AuditError::Corrupt {
            id: row.id,
            detail: format!("unknown entity kind '{}'", row.parent_kind),
        })?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| AuditError::Corrupt {
                id: row.id,
                detail: format!("bad timestamp '{}': {e}", row.created_at),
            })?
            .with_timezone(&Utc);

        Ok(Self {
            id: Some(row.id),
            message: row.message,
            severity,
            username: row.username,
            parent: EntityReference::new(kind, row.parent_id),
            created_at: Some(created_at),
        })
    }
}

/// Data access for the `change_log` table.
#[derive(Debug, Clone)]
pub(crate) struct ChangeLogDao {
    db: Database,
}

impl ChangeLogDao {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) async fn insert(
        &self,
        id: i64,
        entry: &ChangeLogEntry,
        created_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.db
            .query(
                "CREATE type::thing('change_log', $id) SET \
                 message = $message, severity = $severity, username = $username, \
                 parent_kind = $parent_kind, parent_id = $parent_id, created_at = $created_at",
            )
            .bind(("id", id))
            .bind(("message", entry.message.clone()))
            .bind(("severity", entry.severity.to_string()))
            .bind(("username", entry.username.clone()))
            .bind(("parent_kind", entry.parent.kind.to_string()))
            .bind(("parent_id", entry.parent.id))
            .bind(("created_at", created_at.to_rfc3339()))
            .await
            .context("Inserting change log entry")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Inserting change log entry")?;

        Ok(())
    }

    /// Entries for one parent reference. Ids are allocated monotonically,
    /// so ordering by id reproduces insertion order.
    pub(crate) async fn find_by_reference(
        &self,
        reference: EntityReference,
    ) -> Result<Vec<ChangeLogRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM change_log \
                 WHERE parent_kind = $kind AND parent_id = $parent_id ORDER BY id ASC"
            ))
            .bind(("kind", reference.kind.to_string()))
            .bind(("parent_id", reference.id))
            .await
            .context("Loading change log entries")?
            .take::<Vec<ChangeLogRow>>(0)
            .context("Parsing change log entries")
    }
}
