use serde::Serialize;

use crate::api::{
    ChatFilters, ChatRole, CommunityFilters, EntryKind, FeedFilters, FeedKind, FolderFilters,
    PollFilters, PollSort, PollTypeFilter, ServiceFilters, StatusFilter, TagFilters,
};
use crate::display::{RowLine, format_list};
use crate::error::{AgoraError, Result};
use crate::paging::{CollectionView, PageSource, ScrollEvent};

use super::{Context, print_json};

#[derive(Debug, Clone, Copy)]
pub struct BrowseOptions {
    /// Number of pages to load, at least 1
    pub pages: u32,
    pub json: bool,
}

#[derive(Serialize)]
struct ListOutput<'a, T> {
    items: &'a [T],
    page: u32,
    has_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_count: Option<u64>,
}

/// Load up to `pages` pages the way a scrolling reader would, then print.
///
/// Each extra page is requested by reporting the end-of-list sentinel as
/// visible, so the same guards apply as in an interactive view.
pub(crate) async fn browse<S>(mut view: CollectionView<S>, options: BrowseOptions) -> Result<()>
where
    S: PageSource,
    S::Item: RowLine + Serialize,
{
    view.load().await;
    while view.cursor().page() < options.pages.max(1) {
        let outcome = view.on_scroll(ScrollEvent::Sentinel { visible: true }).await;
        if !outcome.fetched() {
            break;
        }
    }

    if options.json {
        if let Some(message) = view.cursor().error() {
            return Err(AgoraError::Api(message.to_string()));
        }
        let cursor = view.cursor();
        return print_json(&ListOutput {
            items: cursor.items(),
            page: cursor.page(),
            has_next: cursor.has_next(),
            total_count: cursor.total_count(),
        });
    }

    for line in format_list(&view.view_model()) {
        println!("{line}");
    }

    match view.cursor().error() {
        Some(message) => Err(AgoraError::Api(message.to_string())),
        None => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_polls(
    community: Option<String>,
    sort: PollSort,
    status: Option<StatusFilter>,
    poll_type: Option<PollTypeFilter>,
    voted: Option<bool>,
    tags: Vec<String>,
    options: BrowseOptions,
) -> Result<()> {
    let ctx = Context::load()?;
    let community_id = ctx.state.community.resolve(community)?;
    if voted.is_some() && !ctx.state.session.is_authenticated() {
        tracing::warn!("--voted needs a signed-in user; ignoring it");
    }
    let filters = PollFilters {
        community_id,
        sort,
        status,
        poll_type,
        voted,
        tags,
    };
    browse(ctx.views.polls(filters), options).await
}

pub async fn cmd_chats(
    search: Option<String>,
    unread_only: bool,
    role: ChatRole,
    options: BrowseOptions,
) -> Result<()> {
    let ctx = Context::load()?;
    if !ctx.state.session.is_authenticated() {
        return Err(AgoraError::Auth("sign in to see your chats".to_string()));
    }
    let filters = ChatFilters {
        search,
        unread_only,
        role,
    };
    browse(ctx.views.chats(filters), options).await
}

pub async fn cmd_folders(
    folder_id: Option<String>,
    kind: Option<EntryKind>,
    options: BrowseOptions,
) -> Result<()> {
    let ctx = Context::load()?;
    browse(ctx.views.folders(FolderFilters { folder_id, kind }), options).await
}

pub async fn cmd_feed(
    community: Option<String>,
    kind: FeedKind,
    options: BrowseOptions,
) -> Result<()> {
    let ctx = Context::load()?;
    let community_id = ctx.state.community.resolve(community)?;
    browse(ctx.views.feed(FeedFilters { community_id, kind }), options).await
}

pub async fn cmd_services(
    category: Option<String>,
    subcategory: Option<String>,
    options: BrowseOptions,
) -> Result<()> {
    if subcategory.is_some() && category.is_none() {
        return Err(AgoraError::Validation(
            "--subcategory needs --category".to_string(),
        ));
    }
    let ctx = Context::load()?;
    let filters = ServiceFilters {
        category,
        subcategory,
    };
    browse(ctx.views.services(filters), options).await
}

pub async fn cmd_tags(search: Option<String>, options: BrowseOptions) -> Result<()> {
    let ctx = Context::load()?;
    browse(ctx.views.tags(TagFilters { search }), options).await
}

pub async fn cmd_communities(
    search: Option<String>,
    joined_only: bool,
    options: BrowseOptions,
) -> Result<()> {
    let ctx = Context::load()?;
    if joined_only && !ctx.state.session.is_authenticated() {
        return Err(AgoraError::Auth(
            "sign in to list the communities you joined".to_string(),
        ));
    }
    let filters = CommunityFilters {
        search,
        joined_only,
    };
    browse(ctx.views.communities(filters), options).await
}
