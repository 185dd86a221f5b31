//! Cursor state machine for one paginated list.
//!
//! ```text
//! Idle ──begin──▶ LoadingFirst ──ok──▶ Ready ──request_next──▶ LoadingMore
//!                      │                 ▲                         │
//!                      │                 └──────────ok(has_next)───┤
//!                      │                                           │
//!                      ├──ok(!has_next)──▶ Exhausted ◀──ok(!has_next)
//!                      └──err──▶ Errored ◀──err────────────────────┘
//! ```
//!
//! Filter changes and refreshes move any state back to `LoadingFirst` and
//! bump the generation. Every fetch is issued against a [`FetchTicket`]; a
//! result is only applied when its ticket is the one currently in flight, so
//! responses that resolve after a reset are dropped.

use crate::error::AgoraError;

use super::accumulator::merge;
use super::{Identified, ListFilters, Page};

/// Where the cursor is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing requested yet
    Idle,
    /// Page 1 is in flight; there is nothing to show yet
    LoadingFirst,
    /// Items are loaded and the backend reported more pages
    Ready,
    /// A page after the first is in flight
    LoadingMore,
    /// The backend reported no further pages
    Exhausted,
    /// The fetch for `page` failed; items keep their last good value
    Errored { page: u32, message: String },
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
}

/// What happened when a fetch result was handed to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Items were merged
    Updated,
    /// The fetch failed and the cursor is now `Errored`
    Failed,
    /// The ticket was superseded; the result was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct Cursor<F, T> {
    filters: F,
    page: u32,
    page_size: u32,
    items: Vec<T>,
    state: CursorState,
    total_count: Option<u64>,
    generation: u64,
    in_flight: Option<FetchTicket>,
}

impl<F: ListFilters, T: Identified> Cursor<F, T> {
    pub fn new(filters: F, page_size: u32) -> Self {
        Self {
            filters,
            page: 1,
            page_size: page_size.max(1),
            items: Vec::new(),
            state: CursorState::Idle,
            total_count: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn is_loading_first(&self) -> bool {
        matches!(self.state, CursorState::Idle | CursorState::LoadingFirst)
    }

    pub fn is_loading_more(&self) -> bool {
        self.state == CursorState::LoadingMore
    }

    /// Whether the backend is known (or assumed, before the first response)
    /// to have pages beyond the ones loaded.
    pub fn has_next(&self) -> bool {
        match &self.state {
            CursorState::Exhausted => false,
            CursorState::Errored { page, .. } => *page > 1,
            _ => true,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CursorState::Errored { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Start the first load after mount. Only valid from `Idle`.
    pub fn begin(&mut self) -> Option<FetchTicket> {
        if self.state != CursorState::Idle {
            return None;
        }
        Some(self.start_first_page())
    }

    /// Replace the filters. An equal value is a no-op; anything else clears
    /// the items, resets to page 1 and issues a fresh first-page fetch.
    pub fn set_filters(&mut self, filters: F) -> Option<FetchTicket> {
        if filters == self.filters {
            return None;
        }
        self.filters = filters;
        self.reset();
        Some(self.start_first_page())
    }

    /// Change one or more filter fields in place.
    pub fn update_filters(&mut self, update: impl FnOnce(&mut F)) -> Option<FetchTicket> {
        let mut next = self.filters.clone();
        update(&mut next);
        self.set_filters(next)
    }

    /// Drop everything and reload page 1 under the current filters.
    pub fn refresh(&mut self) -> FetchTicket {
        self.reset();
        self.start_first_page()
    }

    /// Advance to the next page if the cursor is ready for one.
    ///
    /// Returns `None` while any fetch is in flight, after exhaustion, after
    /// an error and before the first page has landed.
    pub fn request_next(&mut self) -> Option<FetchTicket> {
        if self.state != CursorState::Ready {
            return None;
        }
        self.page += 1;
        self.state = CursorState::LoadingMore;
        Some(self.issue())
    }

    /// Re-issue the page that failed.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let CursorState::Errored { page, .. } = self.state else {
            return None;
        };
        self.page = page;
        self.state = if page <= 1 {
            CursorState::LoadingFirst
        } else {
            CursorState::LoadingMore
        };
        Some(self.issue())
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<T>, AgoraError>,
    ) -> ApplyOutcome {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                "dropping stale page {} (generation {}, current {})",
                ticket.page,
                ticket.generation,
                self.generation
            );
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                let existing = std::mem::take(&mut self.items);
                self.items = merge(existing, page.items, ticket.page);
                if page.total_count.is_some() {
                    self.total_count = page.total_count;
                }
                self.state = if page.has_next {
                    CursorState::Ready
                } else {
                    CursorState::Exhausted
                };
                ApplyOutcome::Updated
            }
            Err(err) => {
                tracing::warn!("failed to load page {}: {}", ticket.page, err);
                self.state = CursorState::Errored {
                    page: ticket.page,
                    message: err.user_message(),
                };
                ApplyOutcome::Failed
            }
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.page = 1;
        self.items.clear();
        self.total_count = None;
        self.in_flight = None;
        self.state = CursorState::Idle;
    }

    fn start_first_page(&mut self) -> FetchTicket {
        self.page = 1;
        self.state = CursorState::LoadingFirst;
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            generation: self.generation,
            page: self.page,
        };
        self.in_flight = Some(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u32);

    impl Identified for Item {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Sort {
        newest: bool,
    }

    impl ListFilters for Sort {}

    fn items(range: std::ops::Range<u32>) -> Vec<Item> {
        range.map(Item).collect()
    }

    fn ready_cursor() -> Cursor<Sort, Item> {
        let mut cursor = Cursor::new(Sort::default(), 2);
        let ticket = cursor.begin().unwrap();
        cursor.apply(ticket, Ok(Page::new(items(0..2), true)));
        cursor
    }

    #[test]
    fn test_new_cursor_is_idle_on_page_one() {
        let cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 20);
        assert_eq!(cursor.state(), &CursorState::Idle);
        assert_eq!(cursor.page(), 1);
        assert!(cursor.items().is_empty());
        assert!(cursor.is_loading_first());
    }

    #[test]
    fn test_begin_only_once() {
        let mut cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 20);
        let ticket = cursor.begin().unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(cursor.state(), &CursorState::LoadingFirst);
        assert!(cursor.begin().is_none());
    }

    #[test]
    fn test_first_page_moves_to_ready_or_exhausted() {
        let cursor = ready_cursor();
        assert_eq!(cursor.state(), &CursorState::Ready);
        assert_eq!(cursor.items().len(), 2);

        let mut cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 20);
        let ticket = cursor.begin().unwrap();
        cursor.apply(ticket, Ok(Page::new(items(0..3), false)));
        assert!(cursor.is_exhausted());
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_request_next_blocked_while_loading() {
        let mut cursor = ready_cursor();
        let ticket = cursor.request_next().unwrap();
        assert_eq!(ticket.page, 2);
        assert!(cursor.is_loading_more());
        assert!(cursor.request_next().is_none());
        assert_eq!(cursor.page(), 2);
    }

    #[test]
    fn test_request_next_blocked_before_first_page() {
        let mut cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 20);
        assert!(cursor.request_next().is_none());
        cursor.begin();
        assert!(cursor.request_next().is_none());
    }

    #[test]
    fn test_exhausted_is_terminal_until_refresh() {
        let mut cursor = ready_cursor();
        let ticket = cursor.request_next().unwrap();
        cursor.apply(ticket, Ok(Page::new(items(2..3), false)));
        assert!(cursor.is_exhausted());
        assert!(cursor.request_next().is_none());

        let ticket = cursor.refresh();
        assert_eq!(ticket.page, 1);
        assert!(cursor.items().is_empty());
        assert_eq!(cursor.state(), &CursorState::LoadingFirst);
    }

    #[test]
    fn test_filter_change_resets_before_response() {
        let mut cursor = ready_cursor();
        cursor.request_next();
        let ticket = cursor.set_filters(Sort { newest: true }).unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(cursor.page(), 1);
        assert!(cursor.items().is_empty());
        assert_eq!(cursor.state(), &CursorState::LoadingFirst);
    }

    #[test]
    fn test_equal_filters_do_not_reset() {
        let mut cursor = ready_cursor();
        let generation = cursor.generation();
        assert!(cursor.set_filters(Sort::default()).is_none());
        assert!(cursor.update_filters(|f| f.newest = false).is_none());
        assert_eq!(cursor.generation(), generation);
        assert_eq!(cursor.items().len(), 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut cursor = ready_cursor();
        let old = cursor.request_next().unwrap();
        let fresh = cursor.update_filters(|f| f.newest = true).unwrap();

        assert_eq!(
            cursor.apply(old, Ok(Page::new(items(10..12), true))),
            ApplyOutcome::Stale
        );
        assert!(cursor.items().is_empty());
        assert_eq!(cursor.state(), &CursorState::LoadingFirst);

        assert_eq!(
            cursor.apply(fresh, Ok(Page::new(items(20..21), false))),
            ApplyOutcome::Updated
        );
        assert_eq!(cursor.items(), &[Item(20)]);
    }

    #[test]
    fn test_same_ticket_cannot_apply_twice() {
        let mut cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 2);
        let ticket = cursor.begin().unwrap();
        cursor.apply(ticket, Ok(Page::new(items(0..2), true)));
        assert_eq!(
            cursor.apply(ticket, Ok(Page::new(items(5..6), true))),
            ApplyOutcome::Stale
        );
        assert_eq!(cursor.items().len(), 2);
    }

    #[test]
    fn test_load_more_failure_keeps_items_and_retries_same_page() {
        let mut cursor = ready_cursor();
        let ticket = cursor.request_next().unwrap();
        let outcome = cursor.apply(ticket, Err(AgoraError::Api("boom".to_string())));
        assert_eq!(outcome, ApplyOutcome::Failed);
        assert_eq!(cursor.items().len(), 2);
        assert_eq!(cursor.error(), Some("boom"));
        assert!(cursor.has_next());
        assert!(cursor.request_next().is_none());

        let retry = cursor.retry().unwrap();
        assert_eq!(retry.page, 2);
        assert!(cursor.is_loading_more());
    }

    #[test]
    fn test_first_page_failure_retries_page_one() {
        let mut cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 2);
        let ticket = cursor.begin().unwrap();
        cursor.apply(ticket, Err(AgoraError::Api("down".to_string())));
        assert!(!cursor.has_next());
        let retry = cursor.retry().unwrap();
        assert_eq!(retry.page, 1);
        assert_eq!(cursor.state(), &CursorState::LoadingFirst);
    }

    #[test]
    fn test_total_count_tracks_latest_report() {
        let mut cursor: Cursor<Sort, Item> = Cursor::new(Sort::default(), 2);
        let ticket = cursor.begin().unwrap();
        cursor.apply(ticket, Ok(Page::new(items(0..2), true).with_total(5)));
        assert_eq!(cursor.total_count(), Some(5));
        let ticket = cursor.request_next().unwrap();
        cursor.apply(ticket, Ok(Page::new(items(2..4), true)));
        assert_eq!(cursor.total_count(), Some(5));
    }
}
