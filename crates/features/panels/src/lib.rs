//! Panels feature slice.
//!
//! Static content panels: validated immutable values served by group for
//! the UI shell, replaced wholesale on save.
mod api;
mod dao;
mod error;
mod service;

pub use api::router;
pub use error::PanelError;
pub use service::PanelService;

use atlas_database::Database;
use atlas_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Panels feature inner state.
#[derive(Debug, Clone)]
pub struct PanelsInner {
    pub service: PanelService,
}

/// Panels feature slice handle.
#[derive(Debug, Clone)]
pub struct Panels {
    inner: Arc<PanelsInner>,
}

impl Panels {
    pub fn new(inner: PanelsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Panels {
    type Target = PanelsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Panels {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the panels feature.
///
/// # Errors
/// Currently infallible; the signature leaves room for startup checks.
pub fn init(database: &Database) -> Result<InitializedSlice, PanelError> {
    tracing::info!("Panels slice initialized");

    let inner = PanelsInner { service: PanelService::new(database.clone()) };

    let slice = Panels::new(inner);
    Ok(InitializedSlice::new(slice))
}
