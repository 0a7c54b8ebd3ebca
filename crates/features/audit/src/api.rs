use crate::Audit;
use atlas_domain::changelog::ChangeLogEntry;
use atlas_domain::constants::CHANGE_LOG_TAG;
use atlas_domain::entity::{EntityKind, EntityReference};
use atlas_kernel::server::{ApiError, ApiState};
use axum::Json;
use axum::extract::{Path, State};
use std::str::FromStr;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[utoipa::path(
    get,
    path = "/api/change-log/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "Entity kind tag, e.g. APPLICATION"),
        ("id" = i64, Path, description = "Entity id"),
    ),
    responses((status = OK, description = "Ordered change log entries", body = Vec<ChangeLogEntry>)),
    tag = CHANGE_LOG_TAG,
)]
async fn find_by_reference(
    State(state): State<ApiState>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<Vec<ChangeLogEntry>>, ApiError> {
    let kind = EntityKind::from_str(&kind)
        .map_err(|_| ApiError::BadRequest(format!("unknown entity kind: {kind}")))?;

    let audit = state.try_get_slice::<Audit>()?;
    let entries = audit.changelog.find_by_reference(EntityReference::new(kind, id)).await?;

    Ok(Json(entries))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(find_by_reference))
}
