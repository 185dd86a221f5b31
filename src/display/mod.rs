//! Terminal output for list views and toasts.

use owo_colors::OwoColorize;

use crate::paging::render::render_lines;
use crate::paging::{Footer, ListBody, ListViewModel};
use crate::toast::{Toast, ToastLevel};

pub mod rows;

pub use rows::{RowLine, format_price};

/// Render a list view model as terminal lines.
pub fn format_list<T: RowLine>(view: &ListViewModel<'_, T>) -> Vec<String> {
    let mut lines = render_lines(view, T::row_line);
    if let Some(summary) = format_summary(view) {
        lines.push(summary.dimmed().to_string());
    }
    lines
}

/// "Showing 25 of 40" style summary, when there is anything to count.
pub fn format_summary<T>(view: &ListViewModel<'_, T>) -> Option<String> {
    if !matches!(view.body, ListBody::Rows(_)) {
        return None;
    }
    let more = match view.footer {
        Footer::None | Footer::RetryMore { .. } => " (more available)",
        _ => "",
    };
    Some(match view.total_count {
        Some(total) => format!("Showing {} of {}{}", view.loaded, total, more),
        None => format!("Showing {}{}", view.loaded, more),
    })
}

pub fn format_toast(toast: &Toast) -> String {
    match toast.level {
        ToastLevel::Info => toast.message.cyan().to_string(),
        ToastLevel::Warning => toast.message.yellow().to_string(),
        ToastLevel::Error => toast.message.red().to_string(),
        ToastLevel::Success => toast.message.green().to_string(),
    }
}
