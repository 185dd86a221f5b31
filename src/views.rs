//! The platform's list views.
//!
//! Each view is a [`CollectionView`] over an [`ApiSource`]; this module only
//! fixes the page size and scroll threshold per view and adds setters for
//! the filter fields each view exposes.

use std::sync::Arc;

use crate::api::{
    ApiClient, ApiSource, ChatFilters, ChatRole, ChatSummary, Community, CommunityFilters,
    EntryKind, FeedFilters, FeedItem, FeedKind, FolderEntry, FolderFilters, Message, Poll,
    PollFilters, PollSort, PollTypeFilter, Service, ServiceFilters, StatusFilter, Tag, TagFilters,
    TimelineFilters,
};
use crate::config::PagingConfig;
use crate::paging::view::LoadOutcome;
use crate::paging::{CollectionView, ScrollTrigger};

pub type PollsView = CollectionView<ApiSource<PollFilters, Poll>>;
pub type ChatsView = CollectionView<ApiSource<ChatFilters, ChatSummary>>;
pub type FoldersView = CollectionView<ApiSource<FolderFilters, FolderEntry>>;
pub type FeedView = CollectionView<ApiSource<FeedFilters, FeedItem>>;
pub type ServicesView = CollectionView<ApiSource<ServiceFilters, Service>>;
pub type TagPicker = CollectionView<ApiSource<TagFilters, Tag>>;
pub type CommunityPicker = CollectionView<ApiSource<CommunityFilters, Community>>;
pub type TimelineView = CollectionView<ApiSource<TimelineFilters, Message>>;

/// Builds views that share one API client and paging settings.
#[derive(Debug, Clone)]
pub struct Views {
    client: Arc<ApiClient>,
    paging: PagingConfig,
}

impl Views {
    pub fn new(client: Arc<ApiClient>, paging: PagingConfig) -> Self {
        Self { client, paging }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn feed_trigger(&self) -> ScrollTrigger {
        ScrollTrigger::new(self.paging.scroll_threshold_px)
    }

    fn list<F, T>(
        &self,
        filters: F,
        page_size: u32,
        trigger: ScrollTrigger,
    ) -> CollectionView<ApiSource<F, T>>
    where
        ApiSource<F, T>: crate::paging::PageSource<Filters = F, Item = T>,
    {
        CollectionView::new(
            ApiSource::new(Arc::clone(&self.client)),
            filters,
            page_size,
            trigger,
        )
    }

    pub fn polls(&self, filters: PollFilters) -> PollsView {
        self.list(filters, self.paging.page_size, self.feed_trigger())
    }

    pub fn chats(&self, filters: ChatFilters) -> ChatsView {
        self.list(filters, self.paging.page_size, ScrollTrigger::compact())
    }

    pub fn folders(&self, filters: FolderFilters) -> FoldersView {
        self.list(filters, self.paging.page_size, ScrollTrigger::compact())
    }

    pub fn feed(&self, filters: FeedFilters) -> FeedView {
        self.list(filters, self.paging.page_size, self.feed_trigger())
    }

    pub fn services(&self, filters: ServiceFilters) -> ServicesView {
        self.list(filters, self.paging.page_size, ScrollTrigger::compact())
    }

    pub fn tags(&self, filters: TagFilters) -> TagPicker {
        self.list(filters, self.paging.lookup_page_size, ScrollTrigger::compact())
    }

    pub fn communities(&self, filters: CommunityFilters) -> CommunityPicker {
        self.list(filters, self.paging.lookup_page_size, ScrollTrigger::compact())
    }

    pub fn timeline(&self, chat_id: impl Into<String>) -> TimelineView {
        let filters = TimelineFilters {
            chat_id: chat_id.into(),
        };
        self.list(filters, self.paging.page_size, ScrollTrigger::compact())
    }
}

impl PollsView {
    pub async fn set_sort(&mut self, sort: PollSort) -> LoadOutcome {
        self.update_filters(|f| f.sort = sort).await
    }

    pub async fn set_status(&mut self, status: Option<StatusFilter>) -> LoadOutcome {
        self.update_filters(|f| f.status = status).await
    }

    pub async fn set_poll_type(&mut self, poll_type: Option<PollTypeFilter>) -> LoadOutcome {
        self.update_filters(|f| f.poll_type = poll_type).await
    }

    pub async fn set_voted(&mut self, voted: Option<bool>) -> LoadOutcome {
        self.update_filters(|f| f.voted = voted).await
    }

    pub async fn set_tags(&mut self, tags: Vec<String>) -> LoadOutcome {
        self.update_filters(|f| f.tags = tags).await
    }
}

impl ChatsView {
    pub async fn set_search(&mut self, search: Option<String>) -> LoadOutcome {
        let search = normalize_search(search);
        self.update_filters(|f| f.search = search).await
    }

    pub async fn set_unread_only(&mut self, unread_only: bool) -> LoadOutcome {
        self.update_filters(|f| f.unread_only = unread_only).await
    }

    pub async fn set_role(&mut self, role: ChatRole) -> LoadOutcome {
        self.update_filters(|f| f.role = role).await
    }
}

impl FoldersView {
    /// Navigate into `folder_id` (or back to the root with `None`).
    pub async fn open_folder(&mut self, folder_id: Option<String>) -> LoadOutcome {
        self.update_filters(|f| f.folder_id = folder_id).await
    }

    pub async fn set_kind(&mut self, kind: Option<EntryKind>) -> LoadOutcome {
        self.update_filters(|f| f.kind = kind).await
    }
}

impl FeedView {
    pub async fn set_kind(&mut self, kind: FeedKind) -> LoadOutcome {
        self.update_filters(|f| f.kind = kind).await
    }
}

impl ServicesView {
    pub async fn set_category(&mut self, category: Option<String>) -> LoadOutcome {
        // A subcategory belongs to its category; switching clears it.
        self.update_filters(|f| {
            if f.category != category {
                f.subcategory = None;
            }
            f.category = category;
        })
        .await
    }

    /// Ignored while no category is chosen.
    pub async fn set_subcategory(&mut self, subcategory: Option<String>) -> LoadOutcome {
        self.update_filters(|f| f.subcategory = f.category.as_ref().and(subcategory)).await
    }
}

impl TagPicker {
    pub async fn set_search(&mut self, search: Option<String>) -> LoadOutcome {
        let search = normalize_search(search);
        self.update_filters(|f| f.search = search).await
    }
}

impl CommunityPicker {
    pub async fn set_search(&mut self, search: Option<String>) -> LoadOutcome {
        let search = normalize_search(search);
        self.update_filters(|f| f.search = search).await
    }

    pub async fn set_joined_only(&mut self, joined_only: bool) -> LoadOutcome {
        self.update_filters(|f| f.joined_only = joined_only).await
    }
}

/// Blank search text is no search at all.
fn normalize_search(search: Option<String>) -> Option<String> {
    search
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
