use crate::Panels;
use atlas_domain::constants::PANEL_TAG;
use atlas_domain::panel::{ContentPanel, ContentPanelDraft};
use atlas_kernel::server::{ApiError, ApiJson, ApiState};
use axum::Json;
use axum::extract::{Path, State};
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[utoipa::path(
    get,
    path = "/api/panel",
    responses((status = OK, description = "All content panels, ordered by priority", body = Vec<ContentPanel>)),
    tag = PANEL_TAG,
)]
async fn find_all(State(state): State<ApiState>) -> Result<Json<Vec<ContentPanel>>, ApiError> {
    let panels = state.try_get_slice::<Panels>()?;
    Ok(Json(panels.service.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/panel/group/{group}",
    params(("group" = String, Path, description = "Panel group label")),
    responses((status = OK, description = "Panels in the group, ordered by priority", body = Vec<ContentPanel>)),
    tag = PANEL_TAG,
)]
async fn find_by_group(
    State(state): State<ApiState>,
    Path(group): Path<String>,
) -> Result<Json<Vec<ContentPanel>>, ApiError> {
    let panels = state.try_get_slice::<Panels>()?;
    Ok(Json(panels.service.find_by_group(&group).await?))
}

#[utoipa::path(
    post,
    path = "/api/panel",
    request_body = ContentPanelDraft,
    responses(
        (status = OK, description = "The saved panel, including its id", body = ContentPanel),
        (status = UNPROCESSABLE_ENTITY, description = "A mandatory field is missing"),
    ),
    tag = PANEL_TAG,
)]
async fn save(
    State(state): State<ApiState>,
    ApiJson(draft): ApiJson<ContentPanelDraft>,
) -> Result<Json<ContentPanel>, ApiError> {
    info!(group = draft.group.as_deref().unwrap_or("-"), "Saving content panel");
    let panels = state.try_get_slice::<Panels>()?;
    Ok(Json(panels.service.save(draft).await?))
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(find_all, save)).routes(routes!(find_by_group))
}
