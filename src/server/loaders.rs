use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Context;
use tracing::debug;

use crate::datamodel::Catalog;

use super::dataloader::{BatchLoader, DataLoader};
use super::schema::{Author, Book};

pub trait Loaders {
    async fn load_author(&self, id: String) -> async_graphql::Result<Option<Author>>;
    async fn load_books_by(&self, author_id: String) -> async_graphql::Result<Vec<Book>>;
}

impl Loaders for Context<'_> {
    async fn load_author(&self, id: String) -> async_graphql::Result<Option<Author>> {
        Ok(self.data::<DataLoader<LoadAuthors>>()?.load(id).await)
    }

    async fn load_books_by(&self, author_id: String) -> async_graphql::Result<Vec<Book>> {
        let books = self
            .data::<DataLoader<LoadBooksByAuthor>>()?
            .load(author_id)
            .await;
        Ok(books.unwrap_or_default())
    }
}

pub struct LoadAuthors {
    catalog: Arc<Catalog>,
}

impl LoadAuthors {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl BatchLoader for LoadAuthors {
    type K = String;
    type V = Author;

    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static {
        let catalog = Arc::clone(&self.catalog);
        async move {
            debug!(?keys, "resolving authors");

            let authors: HashMap<_, _> = keys
                .into_iter()
                .filter_map(|id| {
                    let author = catalog.authors().find_by_id(&id).ok()?;
                    Some((id, Author::from(author)))
                })
                .collect();

            debug!(found = authors.len(), "resolved authors");
            authors
        }
    }
}

pub struct LoadBooksByAuthor {
    catalog: Arc<Catalog>,
}

impl LoadBooksByAuthor {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl BatchLoader for LoadBooksByAuthor {
    type K = String;
    type V = Vec<Book>;

    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static {
        let catalog = Arc::clone(&self.catalog);
        async move {
            debug!(?keys, "resolving books by author");

            let mut books: HashMap<_, Vec<Book>> = HashMap::with_capacity(keys.len());
            for book in catalog.books().all() {
                if keys.contains(&book.author_id) {
                    books
                        .entry(book.author_id.clone())
                        .or_default()
                        .push(Book::from(book));
                }
            }

            debug!(authors = books.len(), "resolved books by author");
            books
        }
    }
}
