//! Swagger UI for the `/rest` endpoints. The OpenAPI document is written out
//! by hand; the UI itself is loaded from a CDN, as GraphiQL is.

use axum::Json;
use axum::response::Html;
use serde_json::{Value, json};

use crate::datamodel::{Author, Book};
use crate::repository::{MAX_PAGE_SIZE, Record};

const SWAGGER_UI_VERSION: &str = "5.17.14";

pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Swagger UI</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui-bundle.js" crossorigin></script>
    <script>
      window.onload = () => {{
        window.ui = SwaggerUIBundle({{ url: "/rest/openapi.json", dom_id: "#swagger-ui" }});
      }};
    </script>
  </body>
</html>
"##
    ))
}

pub async fn document() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        },
        "paths": {
            "/rest/authors": list_operation::<Author>(),
            "/rest/authors/{id}": get_operation::<Author>(),
            "/rest/books": list_operation::<Book>(),
            "/rest/books/{id}": get_operation::<Book>(),
        },
        "components": {
            "schemas": {
                "Author": {
                    "type": "object",
                    "required": Author::FIELDS,
                    "properties": {
                        "id": { "type": "string" },
                        "firstName": { "type": "string" },
                        "lastName": { "type": "string" },
                    },
                },
                "Book": {
                    "type": "object",
                    "required": Book::FIELDS,
                    "properties": {
                        "id": { "type": "string" },
                        "authorId": { "type": "string" },
                        "title": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 1 },
                        "moby": { "type": "boolean" },
                    },
                },
            },
        },
    }))
}

fn schema_ref<T: Record>() -> Value {
    let mut kind = T::KIND.chars();
    let name: String = kind
        .next()
        .map(|first| first.to_ascii_uppercase())
        .into_iter()
        .chain(kind)
        .collect();
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn list_operation<T: Record>() -> Value {
    json!({
        "get": {
            "summary": format!("List all {}", T::COLLECTION),
            "parameters": [
                {
                    "name": "sort",
                    "in": "query",
                    "description": format!(
                        "`field` or `field,desc`, may repeat; one of {}",
                        T::FIELDS.join(", ")
                    ),
                    "schema": { "type": "array", "items": { "type": "string" } },
                    "explode": true,
                },
                {
                    "name": "size",
                    "in": "query",
                    "description": "0 falls back to the default page size",
                    "schema": { "type": "integer", "minimum": 0, "maximum": MAX_PAGE_SIZE },
                },
                {
                    "name": "page",
                    "in": "query",
                    "schema": { "type": "integer", "minimum": 0 },
                },
            ],
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "application/json": {
                            "schema": { "type": "array", "items": schema_ref::<T>() },
                        },
                    },
                },
                "400": { "description": "Unknown sort field or non-numeric paging" },
            },
        },
    })
}

fn get_operation<T: Record>() -> Value {
    json!({
        "get": {
            "summary": format!("Find one {} by id", T::KIND),
            "parameters": [
                { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } },
            ],
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "application/json": { "schema": schema_ref::<T>() } },
                },
                "404": { "description": "No such record" },
            },
        },
    })
}
