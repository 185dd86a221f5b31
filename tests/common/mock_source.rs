//! In-memory page source for driving collection views in tests.

use std::collections::HashMap;
use std::time::Duration;

use agora::error::{AgoraError, Result};
use agora::paging::{Identified, ListFilters, Page, PageSource};
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: String,
    pub label: String,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Row {
            label: format!("row {id}"),
            id,
        }
    }
}

impl Identified for Row {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowFilters {
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ListFilters for RowFilters {}

/// One recorded `fetch_page` call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub filters: RowFilters,
    pub page: u32,
    pub page_size: u32,
}

/// A programmed response for one page
enum Reply {
    Page(Page<Row>),
    Fail(String),
}

/// Serves pages keyed by `(search, page)`. Unprogrammed pages come back
/// empty with no next page.
#[derive(Default)]
pub struct MockSource {
    replies: Mutex<HashMap<(Option<String>, u32), Vec<Reply>>>,
    delays: Mutex<HashMap<Option<String>, Duration>>,
    calls: Mutex<Vec<Call>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows `"{prefix}{n}"` for each `n` in `range`
    pub fn rows(prefix: &str, range: std::ops::Range<u32>) -> Vec<Row> {
        range.map(|n| Row::new(format!("{prefix}{n}"))).collect()
    }

    /// Queue a page for `(search, page)`; queued replies are served in order
    /// and the last one repeats.
    pub fn page(self, search: Option<&str>, page: u32, items: Vec<Row>, has_next: bool) -> Self {
        self.push(search, page, Reply::Page(Page::new(items, has_next)));
        self
    }

    pub fn page_with_total(
        self,
        search: Option<&str>,
        page: u32,
        items: Vec<Row>,
        has_next: bool,
        total: u64,
    ) -> Self {
        self.push(
            search,
            page,
            Reply::Page(Page::new(items, has_next).with_total(total)),
        );
        self
    }

    pub fn fail(self, search: Option<&str>, page: u32, message: &str) -> Self {
        self.push(search, page, Reply::Fail(message.to_string()));
        self
    }

    /// Hold every response for `search` back by `delay`
    pub fn delay(self, search: Option<&str>, delay: Duration) -> Self {
        self.delays
            .lock()
            .insert(search.map(str::to_string), delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn push(&self, search: Option<&str>, page: u32, reply: Reply) {
        self.replies
            .lock()
            .entry((search.map(str::to_string), page))
            .or_default()
            .push(reply);
    }

    fn next_reply(&self, search: &Option<String>, page: u32) -> Result<Page<Row>> {
        let mut replies = self.replies.lock();
        let Some(queue) = replies.get_mut(&(search.clone(), page)) else {
            return Ok(Page::new(Vec::new(), false));
        };
        let reply = if queue.len() > 1 {
            queue.remove(0)
        } else {
            match &queue[0] {
                Reply::Page(p) => Reply::Page(p.clone()),
                Reply::Fail(m) => Reply::Fail(m.clone()),
            }
        };
        match reply {
            Reply::Page(p) => Ok(p),
            Reply::Fail(m) => Err(AgoraError::Api(m)),
        }
    }
}

impl PageSource for MockSource {
    type Filters = RowFilters;
    type Item = Row;

    async fn fetch_page(
        &self,
        filters: &RowFilters,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Row>> {
        self.calls.lock().push(Call {
            filters: filters.clone(),
            page,
            page_size,
        });
        let delay = self.delays.lock().get(&filters.search).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply(&filters.search, page)
    }
}
