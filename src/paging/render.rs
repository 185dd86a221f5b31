//! View model for a paginated list.
//!
//! [`compute_list_view`] is a pure function of the cursor. Renderers only
//! map the result to output; they never look at cursor flags themselves.

use super::cursor::{Cursor, CursorState};
use super::{Identified, ListFilters};

/// Upper bound on placeholder rows shown while page 1 loads.
pub const MAX_SKELETON_ROWS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum ListBody<'a, T> {
    /// Placeholder rows while the first page is pending
    Skeleton { rows: usize },
    /// The accumulated items
    Rows(&'a [T]),
    /// Nothing matched the query
    Empty,
    /// The first page failed; offer a retry
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    None,
    /// A further page is loading
    LoadingMore,
    /// A further page failed; the rows above are the last good state
    RetryMore { message: String },
    /// The backend reported no more pages
    EndOfResults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel<'a, T> {
    pub body: ListBody<'a, T>,
    pub footer: Footer,
    /// Rows currently loaded
    pub loaded: usize,
    /// Total reported by the backend, when it reports one
    pub total_count: Option<u64>,
    pub filters_active: bool,
}

impl<T> ListViewModel<'_, T> {
    pub fn shows_retry(&self) -> bool {
        matches!(self.body, ListBody::Failed { .. })
            || matches!(self.footer, Footer::RetryMore { .. })
    }
}

pub fn compute_list_view<F: ListFilters, T: Identified>(
    cursor: &Cursor<F, T>,
) -> ListViewModel<'_, T> {
    let items = cursor.items();

    let (body, footer) = match cursor.state() {
        CursorState::Idle | CursorState::LoadingFirst => (
            ListBody::Skeleton {
                rows: (cursor.page_size() as usize).min(MAX_SKELETON_ROWS),
            },
            Footer::None,
        ),
        CursorState::Errored { page, message } if *page <= 1 => (
            ListBody::Failed {
                message: message.clone(),
            },
            Footer::None,
        ),
        CursorState::Errored { message, .. } => (
            ListBody::Rows(items),
            Footer::RetryMore {
                message: message.clone(),
            },
        ),
        CursorState::LoadingMore => (ListBody::Rows(items), Footer::LoadingMore),
        CursorState::Ready | CursorState::Exhausted if items.is_empty() => {
            (ListBody::Empty, Footer::None)
        }
        CursorState::Ready => (ListBody::Rows(items), Footer::None),
        CursorState::Exhausted => (ListBody::Rows(items), Footer::EndOfResults),
    };

    ListViewModel {
        body,
        footer,
        loaded: items.len(),
        total_count: cursor.total_count(),
        filters_active: cursor.filters().is_active(),
    }
}

/// Plain-text rendering, one line per row plus status lines.
pub fn render_lines<T>(view: &ListViewModel<'_, T>, row: impl Fn(&T) -> String) -> Vec<String> {
    let mut lines = Vec::new();
    match &view.body {
        ListBody::Skeleton { rows } => {
            lines.extend(std::iter::repeat_n("░░░░░░░░░░░░".to_string(), *rows));
        }
        ListBody::Rows(items) => lines.extend(items.iter().map(row)),
        ListBody::Empty => {
            if view.filters_active {
                lines.push("No results match these filters. Try clearing them.".to_string());
            } else {
                lines.push("Nothing here yet.".to_string());
            }
        }
        ListBody::Failed { message } => {
            lines.push(format!("Could not load: {message}"));
            lines.push("[Try again]".to_string());
        }
    }
    match &view.footer {
        Footer::None => {}
        Footer::LoadingMore => lines.push("Loading more…".to_string()),
        Footer::RetryMore { message } => {
            lines.push(format!("Could not load more: {message}"));
            lines.push("[Try again]".to_string());
        }
        Footer::EndOfResults => lines.push("— end of results —".to_string()),
    }
    lines
}
