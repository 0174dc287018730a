/// The only domain error: a lookup by identifier had no match.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} `{id}` not found")]
pub struct NotFound {
    pub kind: &'static str,
    pub id: String,
}

/// Raised while building the catalog. Always fatal.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{kind} record with an empty identifier")]
    EmptyId { kind: &'static str },

    #[error("duplicate {kind} identifier `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("book `{id}` has a page count of zero")]
    ZeroPageCount { id: String },
}

/// A list request naming a field the records cannot be sorted by.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{kind} has no sortable field `{field}`")]
    UnknownSortField { kind: &'static str, field: String },
}
