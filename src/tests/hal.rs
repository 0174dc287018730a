use reqwest::StatusCode;
use serde_json::{Value, json};

use super::spawn_app;

#[tokio::test]
async fn root_links_both_collections() {
    let server = spawn_app();

    let root: Value = server.get_json("/data").await;

    assert_eq!(root["_links"]["authors"]["href"], "/data/authors");
    assert_eq!(root["_links"]["books"]["href"], "/data/books");
}

#[tokio::test]
async fn author_resource_drops_the_id() {
    let server = spawn_app();

    let author: Value = server.get_json("/data/authors/author-1").await;

    assert_eq!(
        author,
        json!({
            "firstName": "Joanne",
            "lastName": "Rowling",
            "_links": {
                "self": { "href": "/data/authors/author-1" },
                "author": { "href": "/data/authors/author-1" },
            },
        })
    );
}

#[tokio::test]
async fn book_resource_links_its_author() {
    let server = spawn_app();

    let book: Value = server.get_json("/data/books/book-1").await;

    assert_eq!(book.get("id"), None);
    assert_eq!(book["title"], "Harry Potter and the Philosopher's Stone");
    assert_eq!(book["pageCount"], 223);
    assert_eq!(book["moby"], true);
    assert_eq!(book["_links"]["author"]["href"], "/data/authors/author-1");
}

#[tokio::test]
async fn collection_is_paged_by_default() {
    let server = spawn_app();

    let books: Value = server.get_json("/data/books").await;

    assert_eq!(books["_embedded"]["books"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        books["page"],
        json!({ "size": 20, "totalElements": 3, "totalPages": 1, "number": 0 })
    );
}

#[tokio::test]
async fn collection_honours_sort_and_size() {
    let server = spawn_app();

    let books: Value = server.get_json("/data/books?sort=pageCount,desc&size=1").await;

    let embedded = &books["_embedded"]["books"];
    assert_eq!(embedded.as_array().map(Vec::len), Some(1));
    assert_eq!(embedded[0]["title"], "Moby Dick");
    assert_eq!(books["page"]["totalPages"], 3);
}

#[tokio::test]
async fn zero_size_uses_the_default_page() {
    let server = spawn_app();

    let books: Value = server.get_json("/data/books?size=0&sort=").await;

    assert_eq!(books["page"]["size"], 20);
    assert_eq!(books["_embedded"]["books"][0]["title"], "Harry Potter and the Philosopher's Stone");
}

#[tokio::test]
async fn unknown_resources() {
    let server = spawn_app();

    let (status, _) = server.get("/data/books/book-99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.get("/data/publishers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
