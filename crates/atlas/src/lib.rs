//! Facade crate for Atlas features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to build the feature slices for a server instance.
//! - Merge [`server::router::api_router`] (and the system router) into the app.

use atlas_database::Database;
pub use atlas_domain as domain;
use atlas_domain::config::ApiConfig;
use atlas_domain::registry::InitializedSlice;
use atlas_event_bus::EventBus;
pub use atlas_kernel as kernel;

pub mod server {
    pub mod router {
        use atlas_kernel::server::ApiState;
        pub use atlas_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// All feature slice routers merged into one.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(atlas_application::router())
                .merge(atlas_audit::router())
                .merge(atlas_organization::router())
                .merge(atlas_panels::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use atlas_application as application;
    pub use atlas_audit as audit;
    pub use atlas_organization as organization;
    pub use atlas_panels as panels;

    /// Build-time enabled features.
    pub const ENABLED: &[&str] = &["application", "audit", "organization", "panels"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    _config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Audit first: the application slice writes through it.
    slices.push(features::audit::init(database)?);

    slices.push(features::organization::init(database)?);

    slices.push(features::application::init(database, events)?);

    slices.push(features::panels::init(database)?);

    Ok(slices)
}
