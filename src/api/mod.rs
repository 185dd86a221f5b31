//! Typed access to the platform REST API.
//!
//! List endpoints share one shape: `page`/`page_size` query parameters plus
//! per-endpoint filters, answered with `{ items, has_next, total_count? }`.

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod source;

pub use client::{ApiClient, NewPoll};
pub use error::ApiError;
pub use models::{
    Attachment, ChatSummary, Community, EntryKind, FeedItem, FeedItemKind, FolderEntry, Message,
    Poll, PollState, Profile, Service, Tag,
};
pub use query::{
    ChatFilters, ChatRole, CommunityFilters, FeedFilters, FeedKind, FolderFilters, ListQuery,
    PollFilters, PollSort, PollType, PollTypeFilter, ServiceFilters, StatusFilter, TagFilters,
    TimelineFilters,
};
pub use source::ApiSource;
