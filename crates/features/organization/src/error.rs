use atlas_database::DatabaseError;
use atlas_kernel::server::ApiError;

/// Organization slice error type.
#[derive(Debug, thiserror::Error)]
pub enum OrganizationError {
    #[error("organisational unit {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<OrganizationError> for ApiError {
    fn from(err: OrganizationError) -> Self {
        match err {
            OrganizationError::NotFound(id) => {
                Self::NotFound(format!("organisational unit {id} not found"))
            },
            OrganizationError::Database(inner) => Self::from(inner),
        }
    }
}
