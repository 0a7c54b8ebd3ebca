//! Audit feature slice.
//!
//! Owns the append-only change log: one entry per discrete field change
//! (or registration event), tagged with the acting user and a parent
//! entity reference.
mod api;
mod dao;
mod error;
mod service;

pub use crate::error::AuditError;
pub use api::router;
pub use service::ChangeLogService;

use atlas_database::Database;
use atlas_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Audit feature inner state.
#[derive(Debug, Clone)]
pub struct AuditInner {
    pub changelog: ChangeLogService,
}

/// Audit feature slice handle.
#[derive(Debug, Clone)]
pub struct Audit {
    inner: Arc<AuditInner>,
}

impl Audit {
    pub fn new(inner: AuditInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Audit {
    type Target = AuditInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Audit {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the audit feature.
///
/// # Errors
/// Currently infallible; the signature leaves room for startup checks.
pub fn init(database: &Database) -> Result<InitializedSlice, AuditError> {
    tracing::info!("Audit slice initialized");

    let inner = AuditInner { changelog: ChangeLogService::new(database.clone()) };

    let slice = Audit::new(inner);
    Ok(InitializedSlice::new(slice))
}
