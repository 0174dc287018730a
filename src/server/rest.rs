use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;

use crate::datamodel::{Author, Book, Catalog};
use crate::repository::Record;

use super::{ApiError, AppState, ListParams, openapi};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rest", get(openapi::swagger_ui))
        .route("/rest/openapi.json", get(openapi::document))
        .route("/rest/authors", get(list::<Author>))
        .route("/rest/authors/{id}", get(by_id::<Author>))
        .route("/rest/books", get(list::<Book>))
        .route("/rest/books/{id}", get(by_id::<Book>))
}

/// Every record, optionally sorted and paged. Unpaged unless `size` or `page` is given.
async fn list<T: Record>(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<T>>, ApiError> {
    let request = params.into_request(None);
    let page = T::collection(&catalog).list(&request)?;
    Ok(Json(page.items.into_iter().cloned().collect()))
}

async fn by_id<T: Record>(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    let record = T::collection(&catalog).find_by_id(&id)?;
    Ok(Json(record.clone()))
}
