use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Hosting/ownership classification of an application.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationKind {
    InHouse,
    InternallyHosted,
    ExternallyHosted,
    ThirdParty,
    EndUserComputing,
}

/// Lifecycle phase of an application.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecyclePhase {
    Conceptual,
    Development,
    Production,
    Retired,
}

impl Default for LifecyclePhase {
    fn default() -> Self {
        Self::Development
    }
}

/// How two applications relate through their asset codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCodeRelationshipKind {
    Parent,
    Child,
    SharesParent,
}

/// A managed application. The id stays `None` until the record is persisted;
/// updates replace the whole record rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub parent_asset_code: Option<String>,
    pub org_unit_id: i64,
    pub kind: ApplicationKind,
    #[serde(default)]
    pub lifecycle_phase: LifecyclePhase,
}

/// Payload for first-time registration of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppRegistrationRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub parent_asset_code: Option<String>,
    pub org_unit_id: i64,
    pub kind: ApplicationKind,
    #[serde(default)]
    pub lifecycle_phase: LifecyclePhase,
}

/// Result of a successful registration, carrying the newly assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppRegistrationResponse {
    pub id: i64,
    pub request: AppRegistrationRequest,
}

/// One discrete, named field change carried by an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldChange {
    pub name: String,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub current: Option<String>,
}

impl FieldChange {
    /// Human-readable description used as the change-log message.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Attribute '{}' changed from '{}' to '{}'",
            self.name,
            self.original.as_deref().unwrap_or("-"),
            self.current.as_deref().unwrap_or("-"),
        )
    }
}

/// A change-action bundle: the updated entity plus the ordered list of
/// discrete changes and the full replacement tag/alias sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppChangeAction {
    pub app: Application,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_change_description_names_both_values() {
        let change = FieldChange {
            name: "title".to_owned(),
            original: Some("Ledger".to_owned()),
            current: Some("Ledger v2".to_owned()),
        };
        assert_eq!(change.description(), "Attribute 'title' changed from 'Ledger' to 'Ledger v2'");
    }

    #[test]
    fn field_change_description_tolerates_absent_values() {
        let change = FieldChange { name: "owner".to_owned(), original: None, current: None };
        assert_eq!(change.description(), "Attribute 'owner' changed from '-' to '-'");
    }

    #[test]
    fn registration_request_rejects_unknown_fields() {
        let raw = r#"{"name":"Ledger","orgUnitId":1,"kind":"IN_HOUSE","surprise":true}"#;
        assert!(serde_json::from_str::<AppRegistrationRequest>(raw).is_err());
    }

    #[test]
    fn registration_request_defaults_lifecycle_phase() {
        let raw = r#"{"name":"Ledger","orgUnitId":1,"kind":"IN_HOUSE"}"#;
        let request: AppRegistrationRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.lifecycle_phase, LifecyclePhase::Development);
    }
}
