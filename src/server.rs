// ABOUTME: HTTP server assembly and lifecycle for the Mealwise API
// ABOUTME: Merges domain routes, applies tracing, request-id, CORS and body-limit layers, and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::middleware::{make_request_span, setup_cors, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use crate::routes::{CalorieRoutes, HealthRoutes, PlanRoutes, ProgramRoutes};
use axum::{body::Body, extract::DefaultBodyLimit, Router};
use http::{HeaderName, Request, Response};
use mealwise_core::errors::{AppError, AppResult};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Span};

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with every route and middleware layer
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let body_limit = resources
        .config
        .uploads
        .max_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let cors = setup_cors(&resources.config);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(CalorieRoutes::routes(Arc::clone(&resources)))
        .merge(PlanRoutes::routes(Arc::clone(&resources)))
        .merge(ProgramRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_request_span::<Body>)
                        .on_request(|_request: &Request<Body>, _span: &Span| {})
                        .on_response(|response: &Response<Body>, latency: Duration, span: &Span| {
                            let status = response.status().as_u16();
                            span.record("status_code", status);
                            span.record("duration_ms", latency.as_millis() as u64);
                            if status >= 500 {
                                error!(status, "Request failed with server error");
                            } else {
                                info!(status, "Request completed");
                            }
                        })
                        .on_failure(
                            |failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                                error!(
                                    error = %failure,
                                    latency_ms = latency.as_millis() as u64,
                                    "Request failed"
                                );
                            },
                        ),
                )
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors),
        )
}

/// Serve the API on `port` until Ctrl-C
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>, port: u16) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        AppError::internal(format!("Failed to bind HTTP listener on {addr}")).with_source(e)
    })?;

    info!(%addr, "Mealwise server listening");
    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal("HTTP server terminated unexpectedly").with_source(e))?;

    info!("Mealwise server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
