use crate::entity::{EntityReference, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use utoipa::ToSchema;

/// A single append-only audit record describing one field-level change
/// (or a registration event) on a parent entity.
///
/// Entries are created transiently per change, persisted once, and never
/// mutated or deleted. The parent reference requires a resolved id, so an
/// entry can only ever point at a persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    /// Assigned by the audit store on write.
    #[builder(default)]
    #[serde(default)]
    pub id: Option<i64>,
    #[builder(setter(into))]
    pub message: String,
    #[builder(default = Severity::Information)]
    pub severity: Severity,
    /// Identifier of the acting user.
    #[builder(setter(into))]
    pub username: String,
    pub parent: EntityReference,
    /// Stamped by the audit store on write.
    #[builder(default)]
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    #[test]
    fn builder_defaults_severity_to_information() {
        let entry = ChangeLogEntry::builder()
            .message("Registered new application: Ledger")
            .username("jdoe")
            .parent(EntityReference::new(EntityKind::Application, 7))
            .build();

        assert_eq!(entry.severity, Severity::Information);
        assert_eq!(entry.id, None);
        assert_eq!(entry.created_at, None);
        assert_eq!(entry.parent.id, 7);
    }
}
