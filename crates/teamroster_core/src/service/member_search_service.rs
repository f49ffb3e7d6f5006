//! Member search and pagination use-cases.
//!
//! # Responsibility
//! - Build one `Filter` per request from a `MemberSearchCondition`.
//! - Offer list search and the two pagination strategies over any
//!   `MemberTeamStore`.
//!
//! # Invariants
//! - Both strategies return the same `Page` for the same request on a static
//!   dataset.
//! - Errors from the store are returned as-is; nothing is retried here.
//! - Log lines carry fragment labels, never filter values.

use crate::search::page::{Page, PageRequest, PaginationStrategy};
use crate::search::store::{MemberTeamQuery, MemberTeamStore};
use crate::search::{MemberSearchCondition, MemberTeamDto, SearchResult};
use log::{debug, warn};
use std::time::Instant;

/// Search executor over a request-scoped store.
pub struct MemberSearchService<S: MemberTeamStore> {
    store: S,
}

impl<S: MemberTeamStore> MemberSearchService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns every member matching `condition`, left-joined with its team.
    ///
    /// Row order is whatever the store yields; callers needing an order
    /// should page with a sort.
    pub fn search(&self, condition: &MemberSearchCondition) -> SearchResult<Vec<MemberTeamDto>> {
        let started_at = Instant::now();
        let query = MemberTeamQuery::new(condition.to_filter());
        let result = self.store.fetch(&query);
        log_outcome("member_search", &query, started_at, &result, |rows| {
            format!("rows={}", rows.len())
        });
        result
    }

    /// Reads one page with the chosen strategy.
    pub fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
        strategy: PaginationStrategy,
    ) -> SearchResult<Page<MemberTeamDto>> {
        match strategy {
            PaginationStrategy::Combined => self.search_page_combined(condition, page),
            PaginationStrategy::Split => self.search_page_split(condition, page),
        }
    }

    /// Window and total in one store read.
    pub fn search_page_combined(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> SearchResult<Page<MemberTeamDto>> {
        let started_at = Instant::now();
        let query = page_query(condition, page);
        let result = self
            .store
            .fetch_with_total(&query)
            .map(|(content, total)| Page::new(content, page, total));
        log_outcome("member_page_combined", &query, started_at, &result, |found| {
            format!("rows={} total={}", found.content.len(), found.total_count)
        });
        result
    }

    /// Window and total as two independent reads.
    ///
    /// The reads are not isolated from each other; with a concurrent writer
    /// the total may disagree with the window. The count read is skipped when
    /// the window alone determines the total.
    pub fn search_page_split(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> SearchResult<Page<MemberTeamDto>> {
        let started_at = Instant::now();
        let query = page_query(condition, page);
        let result = self.store.fetch(&query).and_then(|content| {
            let total = match total_from_window(page, content.len()) {
                Some(total) => total,
                None => self.store.count(&query)?,
            };
            Ok(Page::new(content, page, total))
        });
        log_outcome("member_page_split", &query, started_at, &result, |found| {
            format!("rows={} total={}", found.content.len(), found.total_count)
        });
        result
    }
}

fn page_query(condition: &MemberSearchCondition, page: &PageRequest) -> MemberTeamQuery {
    MemberTeamQuery::new(condition.to_filter())
        .ordered_by(page.sort().clone())
        .windowed(page.offset(), page.limit())
}

/// A partially filled window ends the result set, so the total is known when
/// the window is the first one or holds at least one row.
pub(crate) fn total_from_window(page: &PageRequest, fetched: usize) -> Option<u64> {
    let fetched = fetched as u64;
    if fetched >= u64::from(page.limit()) {
        return None;
    }
    if page.offset() == 0 || fetched > 0 {
        Some(page.offset() + fetched)
    } else {
        None
    }
}

fn log_outcome<T>(
    event: &str,
    query: &MemberTeamQuery,
    started_at: Instant,
    result: &SearchResult<T>,
    summary: impl FnOnce(&T) -> String,
) {
    let fragments = query.filter().describe();
    match result {
        Ok(value) => debug!(
            "event={event} module=search status=ok fragments={fragments} duration_ms={} {}",
            started_at.elapsed().as_millis(),
            summary(value)
        ),
        Err(err) => warn!(
            "event={event} module=search status=error fragments={fragments} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::total_from_window;
    use crate::search::page::PageRequest;

    fn request(offset: i64, limit: i64) -> PageRequest {
        PageRequest::new(offset, limit).unwrap()
    }

    #[test]
    fn partial_first_page_knows_its_total() {
        assert_eq!(total_from_window(&request(0, 10), 4), Some(4));
        assert_eq!(total_from_window(&request(0, 10), 0), Some(0));
    }

    #[test]
    fn partial_later_page_adds_offset() {
        assert_eq!(total_from_window(&request(20, 10), 3), Some(23));
    }

    #[test]
    fn full_or_empty_later_page_needs_a_count() {
        assert_eq!(total_from_window(&request(0, 10), 10), None);
        assert_eq!(total_from_window(&request(30, 10), 0), None);
    }
}
