use crate::Applications;
use crate::error::ApplicationError;
use atlas_audit::Audit;
use atlas_domain::application::{
    AppChangeAction, AppRegistrationRequest, AppRegistrationResponse, Application,
    AssetCodeRelationshipKind,
};
use atlas_domain::changelog::ChangeLogEntry;
use atlas_domain::constants::APPLICATION_TAG;
use atlas_domain::entity::{EntityKind, EntityReference, Severity};
use atlas_domain::tally::Tally;
use atlas_kernel::server::{ActingUser, ApiError, ApiJson, ApiState};
use atlas_organization::Organization;
use axum::Json;
use axum::extract::{Path, State};
use std::collections::HashMap;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[utoipa::path(
    post,
    path = "/api/app",
    request_body = AppRegistrationRequest,
    responses((status = OK, description = "Registration result with the new id", body = AppRegistrationResponse)),
    tag = APPLICATION_TAG,
)]
async fn register_app(
    State(state): State<ApiState>,
    user: ActingUser,
    ApiJson(request): ApiJson<AppRegistrationRequest>,
) -> Result<Json<AppRegistrationResponse>, ApiError> {
    info!(name = %request.name, "Registering new application");

    let applications = state.try_get_slice::<Applications>()?;
    let audit = state.try_get_slice::<Audit>()?;

    let response = applications.service.register(request).await?;

    // Only a persisted application gets an audit entry; a failed insert
    // returns above without writing anything.
    audit
        .changelog
        .write(
            ChangeLogEntry::builder()
                .message(format!("Registered new application: {}", response.request.name))
                .severity(Severity::Information)
                .username(user.as_str())
                .parent(EntityReference::new(EntityKind::Application, response.id))
                .build(),
        )
        .await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/app/{id}",
    params(("id" = i64, Path, description = "Application id")),
    request_body = AppChangeAction,
    responses((status = OK, description = "Success indicator", body = bool)),
    tag = APPLICATION_TAG,
)]
async fn update_app(
    State(state): State<ApiState>,
    user: ActingUser,
    Path(_id): Path<i64>,
    ApiJson(action): ApiJson<AppChangeAction>,
) -> Result<Json<bool>, ApiError> {
    info!(app = %action.app.name, changes = action.changes.len(), "Updating application");

    let applications = state.try_get_slice::<Applications>()?;
    let audit = state.try_get_slice::<Audit>()?;

    // Fail fast on an unresolvable id: no audit entry may be written for
    // an unpersisted entity.
    let app_id = action.app.id.ok_or(ApplicationError::MissingId)?;

    for change in &action.changes {
        audit
            .changelog
            .write(
                ChangeLogEntry::builder()
                    .message(change.description())
                    .severity(Severity::Information)
                    .username(user.as_str())
                    .parent(EntityReference::new(EntityKind::Application, app_id))
                    .build(),
            )
            .await?;
    }

    applications.service.update(&action.app).await?;
    applications.service.update_tags(app_id, &action.tags).await?;
    applications.service.update_aliases(app_id, &action.aliases).await?;

    Ok(Json(true))
}

#[utoipa::path(
    get,
    path = "/api/app/search/{query}",
    params(("query" = String, Path, description = "Free-text query")),
    responses((status = OK, description = "Matching applications, ordered by name", body = Vec<Application>)),
    tag = APPLICATION_TAG,
)]
async fn search(
    State(state): State<ApiState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.search(&query).await?))
}

#[utoipa::path(
    get,
    path = "/api/app/org-unit/{ouId}",
    params(("ouId" = i64, Path, description = "Organisational unit id")),
    responses((status = OK, description = "Applications assigned to the unit", body = Vec<Application>)),
    tag = APPLICATION_TAG,
)]
async fn find_by_org_unit(
    State(state): State<ApiState>,
    Path(ou_id): Path<i64>,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.find_by_org_units(&[ou_id]).await?))
}

#[utoipa::path(
    get,
    path = "/api/app/org-unit-tree/{ouId}",
    params(("ouId" = i64, Path, description = "Subtree root organisational unit id")),
    responses((status = OK, description = "Applications assigned anywhere in the subtree", body = Vec<Application>)),
    tag = APPLICATION_TAG,
)]
async fn find_by_org_unit_tree(
    State(state): State<ApiState>,
    Path(ou_id): Path<i64>,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    let organization = state.try_get_slice::<Organization>()?;

    let unit_ids = organization.units.descendant_ids(ou_id).await?;
    Ok(Json(applications.service.find_by_org_units(&unit_ids).await?))
}

#[utoipa::path(
    get,
    path = "/api/app/count-by/org-unit",
    responses((status = OK, description = "Application tallies keyed by org unit", body = Vec<Tally>)),
    tag = APPLICATION_TAG,
)]
async fn tally_by_org_unit(State(state): State<ApiState>) -> Result<Json<Vec<Tally>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.count_by_org_unit().await?))
}

#[utoipa::path(
    get,
    path = "/api/app/tags",
    responses((status = OK, description = "All known tags, sorted", body = Vec<String>)),
    tag = APPLICATION_TAG,
)]
async fn find_all_tags(State(state): State<ApiState>) -> Result<Json<Vec<String>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.find_all_tags().await?))
}

// POST because a tag value may not travel well in a query parameter.
#[utoipa::path(
    post,
    path = "/api/app/tags",
    request_body = String,
    responses((status = OK, description = "Applications carrying the tag", body = Vec<Application>)),
    tag = APPLICATION_TAG,
)]
async fn find_by_tag(
    State(state): State<ApiState>,
    tag: String,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.find_by_tag(tag.trim()).await?))
}

#[utoipa::path(
    get,
    path = "/api/app/id/{id}",
    params(("id" = i64, Path, description = "Application id")),
    responses(
        (status = OK, description = "The application", body = Application),
        (status = NOT_FOUND, description = "No application with that id"),
    ),
    tag = APPLICATION_TAG,
)]
async fn get_by_id(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Application>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    let app = applications
        .service
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("application {id} not found")))?;
    Ok(Json(app))
}

#[utoipa::path(
    get,
    path = "/api/app/id/{id}/related",
    params(("id" = i64, Path, description = "Application id")),
    responses((status = OK, description = "Related applications keyed by relationship kind")),
    tag = APPLICATION_TAG,
)]
async fn find_related(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<HashMap<AssetCodeRelationshipKind, Vec<Application>>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.find_related(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/app/by-ids",
    request_body = Vec<i64>,
    responses((status = OK, description = "Applications matching the ids", body = Vec<Application>)),
    tag = APPLICATION_TAG,
)]
async fn find_by_ids(
    State(state): State<ApiState>,
    ApiJson(ids): ApiJson<Vec<i64>>,
) -> Result<Json<Vec<Application>>, ApiError> {
    let applications = state.try_get_slice::<Applications>()?;
    Ok(Json(applications.service.find_by_ids(&ids).await?))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(register_app))
        .routes(routes!(update_app))
        .routes(routes!(search))
        .routes(routes!(find_by_org_unit))
        .routes(routes!(find_by_org_unit_tree))
        .routes(routes!(tally_by_org_unit))
        .routes(routes!(find_all_tags, find_by_tag))
        .routes(routes!(get_by_id))
        .routes(routes!(find_related))
        .routes(routes!(find_by_ids))
}
