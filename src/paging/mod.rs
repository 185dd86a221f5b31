//! Paginated collection views.
//!
//! A view fetches pages from a remote list endpoint, merges them into one
//! growing list and exposes load-more and filter-reset operations to the
//! renderer. The pieces are split so each can be tested on its own:
//!
//! - [`accumulator`] merges a fetched page into the accumulated items
//! - [`cursor`] is the explicit state machine owning filters, page and items
//! - [`trigger`] decides when a scroll event should load the next page
//! - [`render`] turns a cursor into a view model
//! - [`view`] ties a cursor to a [`PageSource`]

pub mod accumulator;
pub mod cursor;
pub mod filter;
pub mod render;
pub mod trigger;
pub mod view;

use std::future::Future;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use accumulator::merge;
pub use cursor::{ApplyOutcome, Cursor, CursorState, FetchTicket};
pub use filter::ListFilters;
pub use render::{Footer, ListBody, ListViewModel, compute_list_view};
pub use trigger::{ScrollEvent, ScrollMetrics, ScrollTrigger};
pub use view::{CollectionView, LoadOutcome};

/// An item with a stable identity, used to de-duplicate appended pages.
pub trait Identified {
    type Id: Eq + Hash + Clone;

    fn id(&self) -> &Self::Id;
}

/// One page returned by a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_next: bool) -> Self {
        Self {
            items,
            has_next,
            total_count: None,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total_count = Some(total);
        self
    }
}

/// Fetches one page of a list for a given filter value.
///
/// Implementations hold no paging state: repeating a call with the same
/// `(filters, page, page_size)` yields the same logical page. Failures are
/// returned, never retried.
pub trait PageSource: Send + Sync + 'static {
    type Filters: ListFilters;
    type Item: Identified + Clone + Send + Sync + 'static;

    fn fetch_page(
        &self,
        filters: &Self::Filters,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Page<Self::Item>>> + Send;
}
