use std::sync::Arc;
use std::time::Instant;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::datamodel::Catalog;
use crate::error::{NotFound, QueryError};
use crate::repository::ListRequest;

mod dataloader;
mod hal;
mod info;
mod loaders;
mod openapi;
mod rest;
mod schema;

use dataloader::DataLoader;
use loaders::{LoadAuthors, LoadBooksByAuthor};
use schema::{CatalogSchema, build_schema};

pub const GRAPHQL_PATH: &str = "/graphql";

#[derive(Clone, FromRef)]
pub struct AppState {
    catalog: Arc<Catalog>,
    schema: CatalogSchema,
    started_at: Instant,
}

/// Errors surfaced by request handlers.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    BadQuery(#[from] QueryError),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(err) => {
                debug!(%err, "lookup missed");
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::BadQuery(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            ApiError::Render(err) => {
                error!(%err, "failed to render response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Sorting and paging query parameters shared by the list endpoints.
/// `sort` may repeat, so these are read with `axum_extra`'s `Query`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    sort: Vec<String>,
    page: Option<usize>,
    size: Option<usize>,
}

impl ListParams {
    fn into_request(self, default_size: Option<usize>) -> ListRequest {
        ListRequest::from_params(
            self.sort.iter().map(String::as_str),
            self.page,
            self.size,
            default_size,
        )
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[axum::debug_handler(state = AppState)]
async fn graphql_handler(
    State(catalog): State<Arc<Catalog>>,
    State(schema): State<CatalogSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let load_authors = DataLoader::new(LoadAuthors::new(catalog.clone()));
    let load_books = DataLoader::new(LoadBooksByAuthor::new(catalog));
    let req = req
        .into_inner()
        .data(load_authors.clone())
        .data(load_books.clone());

    let execute = schema.execute(req);
    load_authors.wrap(load_books.wrap(execute)).await.into()
}

pub fn make_app(catalog: Arc<Catalog>) -> Router {
    let state = AppState {
        schema: build_schema(catalog.clone()),
        catalog,
        started_at: Instant::now(),
    };

    Router::new()
        .merge(rest::routes())
        .merge(hal::routes())
        .merge(info::routes())
        .route("/graphiql", get(graphiql))
        .route(GRAPHQL_PATH, post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
