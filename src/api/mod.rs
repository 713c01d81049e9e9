use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::SyncService;
use crate::state::SharedState;

pub mod auth;
mod error;
mod observability;
mod syncs;
mod system;
mod types;
pub mod users;
pub mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn sync_service(&self) -> &Arc<dyn SyncService> {
        &self.shared.sync_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let mut routes = Router::new()
        .route("/users/create", post(users::create_user))
        .route("/users/auth", get(users::authorize))
        .route("/syncs/progress", put(syncs::update_progress))
        .route("/syncs/progress/{document}", get(syncs::get_progress))
        .route("/healthcheck", get(system::healthcheck));

    if state.config().observability.metrics_enabled {
        routes = routes.route("/metrics", get(observability::get_metrics));
    }

    routes
        .fallback(system::not_found)
        .method_not_allowed_fallback(system::method_not_allowed)
        .with_state(state)
        .layer(middleware::from_fn(observability::track_requests))
        .layer(TraceLayer::new_for_http())
}
