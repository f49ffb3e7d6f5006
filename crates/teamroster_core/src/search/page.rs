//! Paging vocabulary: requests, sort orders, result pages and strategies.
//!
//! # Invariants
//! - A constructed `PageRequest` always has `offset >= 0` and `limit > 0`.
//! - `Page::total_count` counts the whole filtered set, not the window.

use super::predicate::Column;
use super::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: Column,
    pub direction: Direction,
}

impl Order {
    pub fn asc(column: Column) -> Self {
        Self {
            column,
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: Column) -> Self {
        Self {
            column,
            direction: Direction::Desc,
        }
    }
}

/// Parses `column` or `column,asc|desc`.
impl FromStr for Order {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match value.split_once(',') {
            Some((column, direction)) => (column, Some(direction)),
            None => (value, None),
        };
        let column = column.parse::<Column>()?;
        match direction.map(|d| d.trim().to_ascii_lowercase()).as_deref() {
            None | Some("asc") => Ok(Self::asc(column)),
            Some("desc") => Ok(Self::desc(column)),
            Some(other) => Err(format!("unknown sort direction `{other}`; expected asc|desc")),
        }
    }
}

/// Ordered list of sort keys. Empty means "unsorted".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }

    pub fn then(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Requested keys followed by `member_id ASC` unless the member id is
    /// already a key, so every window over the same data is reproducible.
    pub(crate) fn with_tiebreaker(&self) -> Vec<Order> {
        let mut orders = self.orders.clone();
        if !orders.iter().any(|order| order.column == Column::MemberId) {
            orders.push(Order::asc(Column::MemberId));
        }
        orders
    }
}

/// Validated window over a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
    sort: Sort,
}

impl PageRequest {
    /// Builds a request from a raw offset/limit pair.
    ///
    /// # Errors
    /// - `InvalidPageRequest` when `offset < 0`, `limit <= 0` or `limit`
    ///   exceeds `u32::MAX`.
    pub fn new(offset: i64, limit: i64) -> SearchResult<Self> {
        let invalid = || SearchError::InvalidPageRequest { offset, limit };
        let offset_value = u64::try_from(offset).map_err(|_| invalid())?;
        let limit_value = u32::try_from(limit)
            .ok()
            .filter(|value| *value > 0)
            .ok_or_else(invalid)?;
        Ok(Self {
            offset: offset_value,
            limit: limit_value,
            sort: Sort::unsorted(),
        })
    }

    /// Builds a request for zero-based page `page` of `size` rows.
    pub fn of(page: i64, size: i64) -> SearchResult<Self> {
        if page < 0 || size <= 0 {
            return Err(SearchError::InvalidPageRequest {
                offset: page.saturating_mul(size),
                limit: size,
            });
        }
        let offset = page
            .checked_mul(size)
            .ok_or(SearchError::InvalidPageRequest {
                offset: i64::MAX,
                limit: size,
            })?;
        Self::new(offset, size)
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Zero-based page index the offset falls into.
    pub fn page_number(&self) -> u64 {
        self.offset / u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

/// One window of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_count: u64,
    pub offset: u64,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_count: u64) -> Self {
        Self {
            content,
            total_count,
            offset: request.offset(),
            limit: request.limit(),
        }
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn page_number(&self) -> u64 {
        self.offset / u64::from(self.limit.max(1))
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.limit.max(1)))
    }

    pub fn has_next(&self) -> bool {
        self.offset + (self.content.len() as u64) < self.total_count
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }
}

/// How a page and its total are read from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// Window and total in a single statement.
    Combined,
    /// Window and total as two independent reads; the count read is skipped
    /// when the window already proves the total.
    Split,
}

impl Display for PaginationStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Combined => f.write_str("combined"),
            Self::Split => f.write_str("split"),
        }
    }
}

impl FromStr for PaginationStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "combined" | "simple" => Ok(Self::Combined),
            "split" | "complex" => Ok(Self::Split),
            other => Err(format!(
                "unknown pagination strategy `{other}`; expected combined|split"
            )),
        }
    }
}
