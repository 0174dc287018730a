use std::sync::Arc;

use async_graphql::{
    ComplexObject, Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject,
};

use crate::datamodel::{self, Catalog};

use super::loaders::Loaders;

pub type CatalogSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn build_schema(catalog: Arc<Catalog>) -> CatalogSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(catalog)
        .finish()
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Author {
    id: String,
    first_name: String,
    last_name: String,
}

#[ComplexObject]
impl Author {
    /// Books written by this author, in catalog order.
    async fn books(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Book>> {
        ctx.load_books_by(self.id.clone()).await
    }
}

impl From<&datamodel::Author> for Author {
    fn from(author: &datamodel::Author) -> Self {
        Self {
            id: author.id.clone(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Book {
    id: String,
    author_id: String,
    title: String,
    page_count: u32,
    moby: bool,
}

#[ComplexObject]
impl Book {
    /// `null` if `authorId` names no author in the catalog.
    async fn author(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Author>> {
        ctx.load_author(self.author_id.clone()).await
    }
}

impl From<&datamodel::Book> for Book {
    fn from(book: &datamodel::Book) -> Self {
        Self {
            id: book.id.clone(),
            author_id: book.author_id.clone(),
            title: book.title.clone(),
            page_count: book.page_count,
            moby: book.moby,
        }
    }
}

pub struct Query;

#[Object]
impl Query {
    async fn authors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Author>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.authors().all().iter().map(Author::from).collect())
    }

    async fn author_by_id(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Option<Author>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.authors().find_by_id(&id).ok().map(Author::from))
    }

    async fn books(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Book>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.books().all().iter().map(Book::from).collect())
    }

    async fn book_by_id(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Option<Book>> {
        let catalog = ctx.data::<Arc<Catalog>>()?;
        Ok(catalog.books().find_by_id(&id).ok().map(Book::from))
    }
}
