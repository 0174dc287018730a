use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use crate::datamodel::Catalog;
use crate::error::{CatalogError, NotFound, QueryError};

/// Page size used when a caller asks for a page index but no size, or a size of zero.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Larger requested sizes are clamped to this.
pub const MAX_PAGE_SIZE: usize = 2000;

/// A catalog entry type that can be listed, sorted and looked up generically.
pub trait Record: Clone + Serialize + Send + Sync + 'static {
    /// Singular name, used in errors and HAL links.
    const KIND: &'static str;
    /// Plural name, used in URLs.
    const COLLECTION: &'static str;
    /// The JSON field names a list may be sorted by.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> &str;

    /// The value of `field` for sorting, or `None` if the record has no such field.
    fn sort_key(&self, field: &str) -> Option<SortKey<'_>>;

    fn collection(catalog: &Catalog) -> &Collection<Self>;
}

/// Comparable field value. Two keys of the same field always share a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(u32),
    Flag(bool),
}

/// Records of one kind in insertion order, indexed by identifier.
#[derive(Debug)]
pub struct Collection<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Record> Collection<T> {
    pub fn new(records: Vec<T>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.id().is_empty() {
                return Err(CatalogError::EmptyId { kind: T::KIND });
            }
            match index.entry(record.id().to_owned()) {
                Entry::Occupied(entry) => {
                    return Err(CatalogError::DuplicateId {
                        kind: T::KIND,
                        id: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(position);
                }
            }
        }

        Ok(Self { records, index })
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Result<&T, NotFound> {
        self.index
            .get(id)
            .map(|&position| &self.records[position])
            .ok_or_else(|| NotFound {
                kind: T::KIND,
                id: id.to_owned(),
            })
    }

    /// Sorts and pages the records. The collection itself is left untouched.
    pub fn list(&self, request: &ListRequest) -> Result<Page<'_, T>, QueryError> {
        request.sort.check::<T>()?;

        let mut items: Vec<&T> = self.records.iter().collect();
        if !request.sort.is_unsorted() {
            // stable: ties keep insertion order
            items.sort_by(|a, b| request.sort.compare(*a, *b));
        }

        let total_elements = items.len();
        let (number, size) = match request.paging {
            Some(Paging { page, size }) => {
                items = items
                    .into_iter()
                    .skip(page.saturating_mul(size))
                    .take(size)
                    .collect();
                (page, Some(size))
            }
            None => (0, None),
        };

        Ok(Page {
            items,
            number,
            size,
            total_elements,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

/// Zero or more fields to order by, most significant first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn by(field: &str, direction: Direction) -> Self {
        Self {
            orders: vec![Order {
                field: field.to_owned(),
                direction,
            }],
        }
    }

    /// Parses `field`, `field,desc` or `first,second,asc`. The direction
    /// keyword is optional, case-insensitive and applies to every field of
    /// this one parameter. A parameter naming no field leaves the result unsorted.
    pub fn parse(param: &str) -> Self {
        let mut fields: Vec<&str> = param
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        let direction = match fields.last() {
            Some(last) if last.eq_ignore_ascii_case("desc") => Some(Direction::Desc),
            Some(last) if last.eq_ignore_ascii_case("asc") => Some(Direction::Asc),
            _ => None,
        };
        if direction.is_some() {
            fields.pop();
        }
        let direction = direction.unwrap_or_default();

        let orders = fields
            .into_iter()
            .map(|field| Order {
                field: field.to_owned(),
                direction,
            })
            .collect();
        Self { orders }
    }

    /// Parses repeated `sort` parameters, most significant first. Each one
    /// carries its own direction, so `lastName,desc` then `firstName,asc` mix.
    pub fn parse_all<'a>(params: impl IntoIterator<Item = &'a str>) -> Self {
        let orders = params
            .into_iter()
            .flat_map(|param| Self::parse(param).orders)
            .collect();
        Self { orders }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    fn check<T: Record>(&self) -> Result<(), QueryError> {
        match self
            .orders
            .iter()
            .find(|order| !T::FIELDS.contains(&order.field.as_str()))
        {
            Some(order) => Err(QueryError::UnknownSortField {
                kind: T::KIND,
                field: order.field.clone(),
            }),
            None => Ok(()),
        }
    }

    fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        self.orders
            .iter()
            .map(|order| {
                let ordering = a.sort_key(&order.field).cmp(&b.sort_key(&order.field));
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// A zero-based page index and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub size: usize,
}

impl Paging {
    /// A size of zero falls back to [`DEFAULT_PAGE_SIZE`]; sizes above
    /// [`MAX_PAGE_SIZE`] are clamped.
    pub fn new(page: usize, size: usize) -> Self {
        let size = match size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };
        Self { page, size }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub sort: Sort,
    pub paging: Option<Paging>,
}

impl ListRequest {
    /// Combines raw query values. `default_size` pages the result even when
    /// the caller gave no size; a bare `page` falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn from_params<'a>(
        sort: impl IntoIterator<Item = &'a str>,
        page: Option<usize>,
        size: Option<usize>,
        default_size: Option<usize>,
    ) -> Self {
        let size = size
            .or(default_size)
            .or(page.map(|_| DEFAULT_PAGE_SIZE));

        Self {
            sort: Sort::parse_all(sort),
            paging: size.map(|size| Paging::new(page.unwrap_or(0), size)),
        }
    }
}

/// One slice of a listed collection.
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    pub number: usize,
    /// `None` when the listing was not paged.
    pub size: Option<usize>,
    pub total_elements: usize,
}

impl<T> Page<'_, T> {
    pub fn total_pages(&self) -> usize {
        match self.size {
            Some(size) => self.total_elements.div_ceil(size),
            None => usize::from(self.total_elements > 0),
        }
    }
}
