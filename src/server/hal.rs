//! A read-only HAL view of the catalog under `/data`, in the shape Spring
//! Data REST produces: record fields without `id`, `_links`, `_embedded`
//! collections and `page` metadata.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use serde_json::{Map, Value, json};

use crate::datamodel::{Author, Book, Catalog};
use crate::repository::{DEFAULT_PAGE_SIZE, Page, Record};

use super::{ApiError, AppState, ListParams};

const BASE: &str = "/data";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(BASE, get(root))
        .route("/data/authors", get(collection::<Author>))
        .route("/data/authors/{id}", get(item::<Author>))
        .route("/data/books", get(collection::<Book>))
        .route("/data/books/{id}", get(item::<Book>))
}

fn href(path: String) -> Value {
    json!({ "href": path })
}

fn collection_path<T: Record>() -> String {
    format!("{BASE}/{}", T::COLLECTION)
}

fn item_path<T: Record>(id: &str) -> String {
    format!("{BASE}/{}/{id}", T::COLLECTION)
}

/// Extra links a record carries besides `self`.
trait Related: Record {
    fn related(&self, _links: &mut Map<String, Value>) {}
}

impl Related for Author {}

impl Related for Book {
    fn related(&self, links: &mut Map<String, Value>) {
        links.insert("author".into(), href(item_path::<Author>(&self.author_id)));
    }
}

fn resource<T: Related>(record: &T) -> Result<Value, ApiError> {
    let mut value = serde_json::to_value(record)?;

    let mut links = Map::new();
    let own = item_path::<T>(record.id());
    links.insert("self".into(), href(own.clone()));
    links.insert(T::KIND.into(), href(own));
    record.related(&mut links);

    if let Value::Object(fields) = &mut value {
        fields.remove("id");
        fields.insert("_links".into(), Value::Object(links));
    }
    Ok(value)
}

fn page_metadata<T>(page: &Page<'_, T>) -> Value {
    json!({
        "size": page.size.unwrap_or(page.total_elements),
        "totalElements": page.total_elements,
        "totalPages": page.total_pages(),
        "number": page.number,
    })
}

async fn root() -> Json<Value> {
    Json(json!({
        "_links": {
            "self": href(BASE.into()),
            (Author::COLLECTION): href(collection_path::<Author>()),
            (Book::COLLECTION): href(collection_path::<Book>()),
        }
    }))
}

async fn collection<T: Related>(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let request = params.into_request(Some(DEFAULT_PAGE_SIZE));
    let page = T::collection(&catalog).list(&request)?;

    let embedded = page
        .items
        .iter()
        .map(|record| resource(*record))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(json!({
        "_embedded": { (T::COLLECTION): embedded },
        "_links": { "self": href(collection_path::<T>()) },
        "page": page_metadata(&page),
    })))
}

async fn item<T: Related>(
    State(catalog): State<Arc<Catalog>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let record = T::collection(&catalog).find_by_id(&id)?;
    Ok(Json(resource(record)?))
}
