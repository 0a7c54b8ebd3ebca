//! Application feature slice.
//!
//! The application registry: registration, update-with-audit, tag/alias
//! replacement, and the read-side queries (search, org-unit scoping,
//! tallies, relations).
mod api;
mod dao;
mod error;
mod service;

pub use api::router;
pub use error::ApplicationError;
pub use service::ApplicationService;

use atlas_database::Database;
use atlas_domain::registry::{FeatureSlice, InitializedSlice};
use atlas_event_bus::EventBus;
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Application feature inner state.
#[derive(Debug, Clone)]
pub struct ApplicationsInner {
    pub service: ApplicationService,
}

/// Application feature slice handle.
#[derive(Debug, Clone)]
pub struct Applications {
    inner: Arc<ApplicationsInner>,
}

impl Applications {
    pub fn new(inner: ApplicationsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Applications {
    type Target = ApplicationsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Applications {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the application feature.
///
/// # Errors
/// Currently infallible; the signature leaves room for startup checks.
pub fn init(database: &Database, events: &EventBus) -> Result<InitializedSlice, ApplicationError> {
    tracing::info!("Applications slice initialized");

    let inner =
        ApplicationsInner { service: ApplicationService::new(database.clone(), events.clone()) };

    let slice = Applications::new(inner);
    Ok(InitializedSlice::new(slice))
}
