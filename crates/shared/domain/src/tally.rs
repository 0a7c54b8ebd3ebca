use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate count keyed by a grouping dimension
/// (e.g. applications per organisational unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub id: String,
    pub count: i64,
}

impl Tally {
    #[must_use]
    pub fn new(id: impl Into<String>, count: i64) -> Self {
        Self { id: id.into(), count }
    }
}
