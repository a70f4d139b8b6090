//! Report task endpoints

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
use crate::models::{ReportTaskGroup, SaveTasksRequest, TaskDetail, TaskDetailPatch};
use crate::AppState;

/// GET /api/v1/apr/tasks
pub async fn list_tasks(
    ctx: RequestContext,
    State(state): State<AppState>,
) -> ApiResult<Vec<ReportTaskGroup>> {
    let groups = state.tasks.list().await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskListSuccess, groups))
}

/// POST /api/v1/apr/tasks
///
/// Saves a batch of tasks under one report key and answers 201 with the
/// saved tasks grouped.
pub async fn save_tasks(
    ctx: RequestContext,
    State(state): State<AppState>,
    payload: Result<Json<SaveTasksRequest>, JsonRejection>,
) -> ApiResult<Vec<ReportTaskGroup>> {
    let actor = ctx.require_actor()?;
    let Json(request) = payload.map_err(|e| ctx.invalid(e.body_text()))?;

    let groups = state.tasks.save(request, &actor).await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskCreateSuccess, groups))
}

/// GET /api/v1/apr/tasks/:id
pub async fn get_task(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<TaskDetail> {
    let Path(id) = id.map_err(|e| ctx.invalid(e.body_text()))?;

    let task = state.tasks.get(id).await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskGetSuccess, task))
}

/// PUT /api/v1/apr/tasks/:id
pub async fn update_task(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskDetailPatch>, JsonRejection>,
) -> ApiResult<TaskDetail> {
    let Path(id) = id.map_err(|e| ctx.invalid(e.body_text()))?;
    let actor = ctx.require_actor()?;
    let Json(patch) = payload.map_err(|e| ctx.invalid(e.body_text()))?;

    let task = state.tasks.update(id, patch, &actor).await.map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskUpdateSuccess, task))
}

/// DELETE /api/v1/apr/tasks?ids=1,2
pub async fn delete_tasks(
    ctx: RequestContext,
    State(state): State<AppState>,
    query: Result<Query<IdsQuery>, QueryRejection>,
) -> ApiResult<()> {
    let Query(query) = query.map_err(|e| ctx.invalid(e.body_text()))?;
    let ids = query.parse().map_err(|e| ctx.invalid(e))?;

    state
        .tasks
        .delete(&ids, ctx.actor().as_ref())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskDeleteSuccess, ()))
}

/// GET /api/v1/apr/reports/:report_id/tasks
pub async fn report_task_groups(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> ApiResult<Vec<ReportTaskGroup>> {
    let groups = state
        .tasks
        .list_by_report(&report_id)
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskListSuccess, groups))
}

/// GET /api/v1/apr/reports/:report_id
pub async fn report_tasks(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> ApiResult<ReportTaskGroup> {
    let group = state
        .tasks
        .tasks_for_report(&report_id)
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(ctx.ok(BusinessCode::TaskGetSuccess, group))
}

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/apr/tasks",
            get(list_tasks).post(save_tasks).delete(delete_tasks),
        )
        .route("/api/v1/apr/tasks/:id", get(get_task).put(update_task))
        .route("/api/v1/apr/reports/:report_id", get(report_tasks))
        .route("/api/v1/apr/reports/:report_id/tasks", get(report_task_groups))
}
