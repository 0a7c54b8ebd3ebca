use crate::dao::{ChangeLogDao, TABLE};
use crate::error::AuditError;
use atlas_database::Database;
use atlas_domain::changelog::ChangeLogEntry;
use atlas_domain::entity::EntityReference;
use chrono::Utc;
use tracing::debug;

/// Append-only change-log service.
///
/// Entries are written one per discrete change, in request order, and are
/// never mutated or deleted by this slice.
#[derive(Debug, Clone)]
pub struct ChangeLogService {
    db: Database,
    dao: ChangeLogDao,
}

impl ChangeLogService {
    #[must_use]
    pub fn new(db: Database) -> Self {
        let dao = ChangeLogDao::new(db.clone());
        Self { db, dao }
    }

    /// Persists one entry and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    /// Returns [`AuditError::Database`] if id allocation or the write fails;
    /// nothing is persisted in that case.
    pub async fn write(&self, entry: ChangeLogEntry) -> Result<ChangeLogEntry, AuditError> {
        let id = self.db.next_id(TABLE).await?;
        let created_at = Utc::now();

        self.dao.insert(id, &entry, created_at).await?;

        debug!(
            id,
            parent = %entry.parent,
            username = %entry.username,
            "Change log entry written"
        );

        Ok(ChangeLogEntry { id: Some(id), created_at: Some(created_at), ..entry })
    }

    /// Ordered entries for one parent entity, oldest first.
    ///
    /// # Errors
    /// Returns [`AuditError::Database`] on read failure, or
    /// [`AuditError::Corrupt`] if a stored row no longer parses.
    pub async fn find_by_reference(
        &self,
        reference: EntityReference,
    ) -> Result<Vec<ChangeLogEntry>, AuditError> {
        self.dao
            .find_by_reference(reference)
            .await?
            .into_iter()
            .map(ChangeLogEntry::try_from)
            .collect()
    }
}
