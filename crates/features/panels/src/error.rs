use atlas_database::DatabaseError;
use atlas_domain::error::ValidationError;
use atlas_kernel::server::ApiError;

/// Panels slice error type.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A stored panel no longer parses into the domain model.
    #[error("content panel {id} is corrupt: {detail}")]
    Corrupt { id: i64, detail: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::Validation(inner) => Self::from(inner),
            PanelError::Database(inner) => Self::from(inner),
            other => Self::Internal(other.to_string()),
        }
    }
}
