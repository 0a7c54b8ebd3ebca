//! Shared constant values used across slices.

/// OpenAPI tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// OpenAPI tag for application endpoints.
pub const APPLICATION_TAG: &str = "Applications";
/// OpenAPI tag for change-log endpoints.
pub const CHANGE_LOG_TAG: &str = "Change Log";
/// OpenAPI tag for organisational-unit endpoints.
pub const ORG_UNIT_TAG: &str = "Organisational Units";
/// OpenAPI tag for content-panel endpoints.
pub const PANEL_TAG: &str = "Content Panels";
