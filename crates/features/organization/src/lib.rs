//! Organization feature slice.
//!
//! Organisational units form a forest; the slice serves unit CRUD plus the
//! subtree closure used to scope application queries.
mod api;
mod dao;
mod error;
mod service;

pub use api::router;
pub use error::OrganizationError;
pub use service::OrgUnitService;

use atlas_database::Database;
use atlas_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Organization feature inner state.
#[derive(Debug, Clone)]
pub struct OrganizationInner {
    pub units: OrgUnitService,
}

/// Organization feature slice handle.
#[derive(Debug, Clone)]
pub struct Organization {
    inner: Arc<OrganizationInner>,
}

impl Organization {
    pub fn new(inner: OrganizationInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Organization {
    type Target = OrganizationInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Organization {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the organization feature.
///
/// # Errors
/// Currently infallible; the signature leaves room for startup checks.
pub fn init(database: &Database) -> Result<InitializedSlice, OrganizationError> {
    tracing::info!("Organization slice initialized");

    let inner = OrganizationInner { units: OrgUnitService::new(database.clone()) };

    let slice = Organization::new(inner);
    Ok(InitializedSlice::new(slice))
}
