use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::datamodel::Catalog;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/info", get(info))
}

async fn info(
    State(catalog): State<Arc<Catalog>>,
    State(started_at): State<Instant>,
) -> Json<Value> {
    Json(json!({
        "app": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        },
        "runtime": {
            "language": "rust",
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "uptimeSeconds": started_at.elapsed().as_secs(),
        },
        "catalog": {
            "authors": catalog.authors().len(),
            "books": catalog.books().len(),
        },
    }))
}
