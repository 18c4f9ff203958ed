// Copyright 2026 Kitscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API.
//!
//! One search endpoint over the aggregator plus a health probe. Successful
//! responses carry a shared-cache hint; there is no server-side result
//! cache and no state beyond the read-only registry.

use crate::aggregate::Aggregator;
use crate::listing::Listing;
use crate::query::SearchQuery;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared-cache directive attached to successful search responses.
const CACHE_HINT: &str = "s-maxage=300, stale-while-revalidate";

/// Build the axum Router with all REST endpoints.
pub fn router(aggregator: Arc<Aggregator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/search", get(handle_search))
        .layer(cors)
        .with_state(aggregator)
}

/// Start the REST server on the given port.
pub async fn start(port: u16, aggregator: Arc<Aggregator>) -> anyhow::Result<()> {
    let app = router(aggregator);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("kitscout listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(aggregator): State<Arc<Aggregator>>) -> Json<serde_json::Value> {
    let sources: Vec<&str> = aggregator.adapters().iter().map(|a| a.name()).collect();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sources": sources,
    }))
}

/// `GET /api/v1/search?grade=MG&model=strike+freedom`
///
/// A missing or blank `model` is answered with 400 and an empty array
/// before any source is contacted. `grade` is free-form here; the closed
/// grade set is a presentation-layer concern.
pub async fn handle_search(
    State(aggregator): State<Arc<Aggregator>>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let Some(query) = params.normalize() else {
        return (StatusCode::BAD_REQUEST, Json(Vec::<Listing>::new())).into_response();
    };

    let listings = aggregator.search(&query).await;
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_HINT))],
        Json(listings),
    )
        .into_response()
}
