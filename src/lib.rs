pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod draft;
pub mod error;
pub mod macros;
pub mod paging;
pub mod state;
pub mod timeline;
pub mod toast;
pub mod views;

#[cfg(test)]
mod test_guards;
#[cfg(test)]
mod test_server;

pub use api::{ApiClient, ApiSource};
pub use config::Config;
pub use draft::{DraftStore, PollDraft};
pub use error::{AgoraError, Result};
pub use paging::{
    CollectionView, Cursor, CursorState, Identified, ListFilters, Page, PageSource, ScrollEvent,
    ScrollTrigger,
};
pub use state::AppState;
pub use views::Views;
