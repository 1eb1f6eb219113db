// rest/mod.rs — Public REST API server.
//
// Axum HTTP server on the configured bind address/port (local only by
// default). Maps HTTP verbs and paths onto the task service.
//
// Endpoints:
//   GET    /api/v1/tasks
//   POST   /api/v1/tasks
//   GET    /api/v1/tasks/{id}
//   PUT    /api/v1/tasks/{id}
//   DELETE /api/v1/tasks/{id}
//   GET    /api/v1/health

pub mod routes;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health (no auth)
        .route("/api/v1/health", get(routes::health::health))
        // Tasks
        .route(
            "/api/v1/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/v1/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
