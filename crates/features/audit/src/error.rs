use atlas_database::DatabaseError;
use atlas_kernel::server::ApiError;

/// Audit slice error type.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// A stored entry no longer parses into the domain model.
    #[error("change log entry {id} is corrupt: {detail}")]
    Corrupt { id: i64, detail: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::Database(inner) => Self::from(inner),
            other => Self::Internal(other.to_string()),
        }
    }
}
