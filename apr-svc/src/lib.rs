//! apr-svc library interface
//!
//! Annual program report tasks and settings over HTTP. Exposes the router
//! and services for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod grouping;
pub mod models;
pub mod services;

pub use crate::error::{Resource, ServiceError, ServiceResult};

use apr_common::api::MessageCatalog;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::services::{SettingService, TaskService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tasks: TaskService,
    pub settings: SettingService,
    pub messages: MessageCatalog,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, messages: MessageCatalog) -> Self {
        Self {
            tasks: TaskService::new(db.clone()),
            settings: SettingService::new(db.clone()),
            db,
            messages,
            startup_time: Utc::now(),
        }
    }
}

/// Build the application router with request-id, trace and CORS layers
pub fn build_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .merge(api::task_routes())
        .merge(api::setting_routes())
        .merge(api::health_routes())
        .layer(middleware)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
