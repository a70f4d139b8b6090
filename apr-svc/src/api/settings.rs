//! Report setting endpoints

use apr_common::api::BusinessCode;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};

use super::context::RequestContext;
use super::IdsQuery;
use super::response::ApiResult;
use crate::models::{Setting, SettingPatch};
use crate::AppState;

/// GET /api/v1/apr/settings
pub async fn list_settings(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> ApiResult<Vec<Setting>> {
    let settings = state.settings.list().await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::SettingListSuccess, settings))
}

/// POST /api/v1/apr/settings
///
/// Body is a JSON array of settings.
pub async fn create_settings(
    ctx: RequestContext,
    State(state): State<AppState>,
    payload: Result<Json<Vec<Setting>>, JsonRejection>,
) -> ApiResult<Vec<Setting>> {
    let actor = ctx.require_actor()?;
    let Json(settings) = payload.map_err(|e| ctx.invalid(e.body_text()))?;

    let saved = state.settings.save(settings, &actor).await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::SettingCreateSuccess, saved))
}

/// GET /api/v1/apr/settings/:id
pub async fn get_setting(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Setting> {
    let Path(id) = id.map_err(|e| ctx.invalid(e.body_text()))?;

    let setting = state.settings.get(id).await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::SettingGetSuccess, setting))
}

/// PUT /api/v1/apr/settings/:id
pub async fn update_setting(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SettingPatch>, JsonRejection>,
) -> ApiResult<Setting> {
    let Path(id) = id.map_err(|e| ctx.invalid(e.body_text()))?;
    let actor = ctx.require_actor()?;
    let Json(patch) = payload.map_err(|e| ctx.invalid(e.body_text()))?;

    let setting = state
        .settings
        .update(id, patch, &actor)
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::SettingUpdateSuccess, setting))
}

/// DELETE /api/v1/apr/settings?ids=1,2
pub async fn delete_settings(
    ctx: RequestContext,
    State(state): State<AppState>,
    query: Result<Query<IdsQuery>, QueryRejection>,
) -> ApiResult<()> {
    let Query(query) = query.map_err(|e| ctx.invalid(e.body_text()))?;
    let ids = query.parse().map_err(|e| ctx.invalid(e))?;

    state
        .settings
        .delete(&ids, ctx.actor().as_ref())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::SettingDeleteSuccess, ()))
}

pub fn setting_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/apr/settings",
            get(list_settings).post(create_settings).delete(delete_settings),
        )
        .route("/api/v1/apr/settings/:id", get(get_setting).put(update_setting))
}
