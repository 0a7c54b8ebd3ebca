use atlas_database::DatabaseError;
use atlas_event_bus::EventBusError;
use atlas_kernel::server::ApiError;

/// Application slice error type.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    /// A mutation was requested for an entity with no resolvable id.
    /// Nothing is written, audit entries included, when this is raised.
    #[error("application change request carries no id")]
    MissingId,

    #[error("application {0} not found")]
    NotFound(i64),

    /// A stored record no longer parses into the domain model.
    #[error("application record {id} is corrupt: {detail}")]
    Corrupt { id: i64, detail: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Events(#[from] EventBusError),
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::MissingId => Self::Precondition(err.to_string()),
            ApplicationError::NotFound(id) => Self::NotFound(format!("application {id} not found")),
            ApplicationError::Database(inner) => Self::from(inner),
            other => Self::Internal(other.to_string()),
        }
    }
}
