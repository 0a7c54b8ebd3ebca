use crate::Organization;
use atlas_domain::constants::ORG_UNIT_TAG;
use atlas_domain::orgunit::{NewOrgUnit, OrgUnit};
use atlas_kernel::server::{ApiError, ApiJson, ApiState};
use axum::Json;
use axum::extract::{Path, State};
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[utoipa::path(
    get,
    path = "/api/org-unit",
    responses((status = OK, description = "All organisational units", body = Vec<OrgUnit>)),
    tag = ORG_UNIT_TAG,
)]
async fn find_all(State(state): State<ApiState>) -> Result<Json<Vec<OrgUnit>>, ApiError> {
    let organization = state.try_get_slice::<Organization>()?;
    Ok(Json(organization.units.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/org-unit/{id}",
    params(("id" = i64, Path, description = "Org unit id")),
    responses(
        (status = OK, description = "The organisational unit", body = OrgUnit),
        (status = NOT_FOUND, description = "No unit with that id"),
    ),
    tag = ORG_UNIT_TAG,
)]
async fn get_by_id(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<OrgUnit>, ApiError> {
    let organization = state.try_get_slice::<Organization>()?;
    let unit = organization
        .units
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("organisational unit {id} not found")))?;
    Ok(Json(unit))
}

#[utoipa::path(
    get,
    path = "/api/org-unit/{id}/descendants",
    params(("id" = i64, Path, description = "Subtree root id")),
    responses((status = OK, description = "Ids of the unit and everything below it", body = Vec<i64>)),
    tag = ORG_UNIT_TAG,
)]
async fn descendants(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<i64>>, ApiError> {
    let organization = state.try_get_slice::<Organization>()?;
    Ok(Json(organization.units.descendant_ids(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/org-unit",
    request_body = NewOrgUnit,
    responses((status = OK, description = "The created unit, including its id", body = OrgUnit)),
    tag = ORG_UNIT_TAG,
)]
async fn create(
    State(state): State<ApiState>,
    ApiJson(new_unit): ApiJson<NewOrgUnit>,
) -> Result<Json<OrgUnit>, ApiError> {
    info!(name = %new_unit.name, "Creating org unit");
    let organization = state.try_get_slice::<Organization>()?;
    Ok(Json(organization.units.create(new_unit).await?))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(find_all, create))
        .routes(routes!(get_by_id))
        .routes(routes!(descendants))
}
