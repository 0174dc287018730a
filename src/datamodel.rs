use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::repository::{Collection, Record, SortKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    /// Not checked against the author list.
    pub author_id: String,
    pub title: String,
    pub page_count: u32,
    pub moby: bool,
}

impl Author {
    pub fn new(id: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Book {
    pub fn new(id: &str, author_id: &str, title: &str, page_count: u32, moby: bool) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            title: title.into(),
            page_count,
            moby,
        }
    }
}

impl Record for Author {
    const KIND: &'static str = "author";
    const COLLECTION: &'static str = "authors";
    const FIELDS: &'static [&'static str] = &["id", "firstName", "lastName"];

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self, field: &str) -> Option<SortKey<'_>> {
        match field {
            "id" => Some(SortKey::Text(&self.id)),
            "firstName" => Some(SortKey::Text(&self.first_name)),
            "lastName" => Some(SortKey::Text(&self.last_name)),
            _ => None,
        }
    }

    fn collection(catalog: &Catalog) -> &Collection<Self> {
        &catalog.authors
    }
}

impl Record for Book {
    const KIND: &'static str = "book";
    const COLLECTION: &'static str = "books";
    const FIELDS: &'static [&'static str] = &["id", "authorId", "title", "pageCount", "moby"];

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self, field: &str) -> Option<SortKey<'_>> {
        match field {
            "id" => Some(SortKey::Text(&self.id)),
            "authorId" => Some(SortKey::Text(&self.author_id)),
            "title" => Some(SortKey::Text(&self.title)),
            "pageCount" => Some(SortKey::Number(self.page_count)),
            "moby" => Some(SortKey::Flag(self.moby)),
            _ => None,
        }
    }

    fn collection(catalog: &Catalog) -> &Collection<Self> {
        &catalog.books
    }
}

/// Every author and book the process serves. Built once, then only read.
#[derive(Debug)]
pub struct Catalog {
    authors: Collection<Author>,
    books: Collection<Book>,
}

impl Catalog {
    pub fn new(authors: Vec<Author>, books: Vec<Book>) -> Result<Self, CatalogError> {
        if let Some(book) = books.iter().find(|book| book.page_count == 0) {
            return Err(CatalogError::ZeroPageCount {
                id: book.id.clone(),
            });
        }

        Ok(Self {
            authors: Collection::new(authors)?,
            books: Collection::new(books)?,
        })
    }

    /// The hard-coded catalog served in production.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(all_authors(), all_books())
    }

    pub fn authors(&self) -> &Collection<Author> {
        &self.authors
    }

    pub fn books(&self) -> &Collection<Book> {
        &self.books
    }
}

fn all_authors() -> Vec<Author> {
    vec![
        Author::new("author-1", "Joanne", "Rowling"),
        Author::new("author-2", "Herman", "Melville"),
        Author::new("author-3", "Anne", "Rice"),
    ]
}

fn all_books() -> Vec<Book> {
    vec![
        Book::new(
            "book-1",
            "author-1",
            "Harry Potter and the Philosopher's Stone",
            223,
            true,
        ),
        Book::new("book-2", "author-2", "Moby Dick", 635, false),
        Book::new("book-3", "author-3", "Interview with the vampire", 371, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_three_of_each() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.authors().len(), 3);
        assert_eq!(catalog.books().len(), 3);
    }

    #[test]
    fn builtin_books_match_fixture() {
        let catalog = Catalog::builtin().unwrap();

        let book = catalog.books().find_by_id("book-1").unwrap();
        assert_eq!(book.title, "Harry Potter and the Philosopher's Stone");
        assert_eq!(book.page_count, 223);
        assert_eq!(book.author_id, "author-1");
        assert!(book.moby);

        let book = catalog.books().find_by_id("book-2").unwrap();
        assert_eq!(book.title, "Moby Dick");
        assert_eq!(book.page_count, 635);
        assert!(!book.moby);
    }

    #[test]
    fn rejects_zero_page_count() {
        let err = Catalog::new(vec![], vec![Book::new("b", "a", "Empty", 0, false)]).unwrap_err();

        assert_eq!(err, CatalogError::ZeroPageCount { id: "b".into() });
    }

    #[test]
    fn rejects_duplicate_author_ids() {
        let authors = vec![
            Author::new("author-1", "Joanne", "Rowling"),
            Author::new("author-1", "Robert", "Galbraith"),
        ];

        let err = Catalog::new(authors, vec![]).unwrap_err();

        assert_eq!(
            err,
            CatalogError::DuplicateId {
                kind: "author",
                id: "author-1".into()
            }
        );
    }

    #[test]
    fn dangling_author_references_are_allowed() {
        let catalog = Catalog::new(vec![], vec![Book::new("b", "nobody", "Orphan", 1, false)]);

        assert!(catalog.is_ok());
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let book = Book::new("book-2", "author-2", "Moby Dick", 635, false);

        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "book-2",
                "authorId": "author-2",
                "title": "Moby Dick",
                "pageCount": 635,
                "moby": false,
            })
        );
        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }
}
