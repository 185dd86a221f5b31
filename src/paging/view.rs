//! A cursor bound to the source it pages through.

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;

use super::cursor::{ApplyOutcome, Cursor, FetchTicket};
use super::render::{ListViewModel, compute_list_view};
use super::trigger::{ScrollEvent, ScrollTrigger};
use super::{Page, PageSource};

/// Result of an operation that may or may not have fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No fetch was issued
    Skipped,
    /// A fetch ran and its result was applied (or dropped as stale)
    Fetched(ApplyOutcome),
}

impl LoadOutcome {
    pub fn fetched(&self) -> bool {
        matches!(self, LoadOutcome::Fetched(_))
    }
}

/// Owns one list's cursor and fetches pages for it.
///
/// The `async` methods hold `&mut self` across the fetch, so a single view
/// never has two of its own requests outstanding. Callers that need the
/// render loop to keep running while a page loads use
/// [`CollectionView::fetch`] to get a detached future and hand the result
/// back with [`CollectionView::apply`]; the cursor's ticket check then drops
/// whatever resolves after a reset.
pub struct CollectionView<S: PageSource> {
    source: Arc<S>,
    cursor: Cursor<S::Filters, S::Item>,
    trigger: ScrollTrigger,
}

impl<S: PageSource> CollectionView<S> {
    pub fn new(source: S, filters: S::Filters, page_size: u32, trigger: ScrollTrigger) -> Self {
        Self::with_shared(Arc::new(source), filters, page_size, trigger)
    }

    pub fn with_shared(
        source: Arc<S>,
        filters: S::Filters,
        page_size: u32,
        trigger: ScrollTrigger,
    ) -> Self {
        Self {
            source,
            cursor: Cursor::new(filters, page_size),
            trigger,
        }
    }

    pub fn cursor(&self) -> &Cursor<S::Filters, S::Item> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor<S::Filters, S::Item> {
        &mut self.cursor
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn items(&self) -> &[S::Item] {
        self.cursor.items()
    }

    pub fn trigger(&self) -> ScrollTrigger {
        self.trigger
    }

    pub fn view_model(&self) -> ListViewModel<'_, S::Item> {
        compute_list_view(&self.cursor)
    }

    /// Load page 1 on mount.
    pub async fn load(&mut self) -> LoadOutcome {
        match self.cursor.begin() {
            Some(ticket) => self.run(ticket).await,
            None => LoadOutcome::Skipped,
        }
    }

    pub async fn set_filters(&mut self, filters: S::Filters) -> LoadOutcome {
        match self.cursor.set_filters(filters) {
            Some(ticket) => self.run(ticket).await,
            None => LoadOutcome::Skipped,
        }
    }

    pub async fn update_filters(&mut self, update: impl FnOnce(&mut S::Filters)) -> LoadOutcome {
        match self.cursor.update_filters(update) {
            Some(ticket) => self.run(ticket).await,
            None => LoadOutcome::Skipped,
        }
    }

    /// Feed a scroll or intersection event; loads the next page when the
    /// view is near the end and the cursor is ready for one.
    pub async fn on_scroll(&mut self, event: ScrollEvent) -> LoadOutcome {
        if !self.trigger.should_load_more(&event, &self.cursor) {
            return LoadOutcome::Skipped;
        }
        self.load_more().await
    }

    pub async fn load_more(&mut self) -> LoadOutcome {
        match self.cursor.request_next() {
            Some(ticket) => self.run(ticket).await,
            None => LoadOutcome::Skipped,
        }
    }

    pub async fn refresh(&mut self) -> LoadOutcome {
        let ticket = self.cursor.refresh();
        self.run(ticket).await
    }

    pub async fn retry(&mut self) -> LoadOutcome {
        match self.cursor.retry() {
            Some(ticket) => self.run(ticket).await,
            None => LoadOutcome::Skipped,
        }
    }

    /// Detached fetch for `ticket` under the current filters.
    ///
    /// The future owns everything it needs, so it can be spawned. Pass its
    /// output to [`CollectionView::apply`].
    pub fn fetch(
        &self,
        ticket: FetchTicket,
    ) -> impl Future<Output = (FetchTicket, Result<Page<S::Item>>)> + Send + use<S> {
        let source = Arc::clone(&self.source);
        let filters = self.cursor.filters().clone();
        let page_size = self.cursor.page_size();
        async move {
            let result = source.fetch_page(&filters, ticket.page, page_size).await;
            (ticket, result)
        }
    }

    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Page<S::Item>>) -> ApplyOutcome {
        self.cursor.apply(ticket, result)
    }

    async fn run(&mut self, ticket: FetchTicket) -> LoadOutcome {
        tracing::debug!(
            "fetching page {} (generation {}) with {:?}",
            ticket.page,
            ticket.generation,
            self.cursor.filters()
        );
        let (ticket, result) = self.fetch(ticket).await;
        LoadOutcome::Fetched(self.cursor.apply(ticket, result))
    }
}
