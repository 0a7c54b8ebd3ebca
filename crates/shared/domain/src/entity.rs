use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// The kind tag of a managed domain entity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Application,
    OrgUnit,
    ContentPanel,
}

/// Severity attached to a change-log entry.
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
pub enum Severity {
    Information,
    Warning,
    Error,
}

/// A `(kind, id)` pair uniquely identifying a domain entity for
/// cross-cutting concerns (audit, relations).
///
/// The id is not optional: a reference can only be built for an entity
/// that already has a persisted identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityReference {
    #[must_use]
    pub const fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn entity_kind_round_trips_through_its_wire_name() {
        assert_eq!(EntityKind::Application.to_string(), "APPLICATION");
        assert_eq!(EntityKind::from_str("ORG_UNIT").unwrap(), EntityKind::OrgUnit);
        assert!(EntityKind::from_str("nonsense").is_err());
    }

    #[test]
    fn reference_display_includes_kind_and_id() {
        let reference = EntityReference::new(EntityKind::Application, 42);
        assert_eq!(reference.to_string(), "APPLICATION/42");
    }
}
