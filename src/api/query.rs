//! Filter values for each list endpoint and their wire encoding.

use serde::{Deserialize, Serialize};

use crate::enum_str;
use crate::paging::ListFilters;

use super::models::EntryKind;

/// A filter value that maps onto a list endpoint.
pub trait ListQuery: ListFilters {
    /// Path of the list endpoint relative to the API base, as raw segments.
    fn path_segments(&self) -> Vec<String>;

    /// Query parameters other than `page` and `page_size`.
    ///
    /// `authenticated` is false when the request will carry no bearer token;
    /// personalised filters are left out in that case.
    fn params(&self, authenticated: bool) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollSort {
    #[default]
    Newest,
    Oldest,
    MostVotes,
    Trending,
}

enum_str!(PollSort, "sort", {
    Newest => "newest",
    Oldest => "oldest",
    MostVotes => "most_votes",
    Trending => "trending",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Active,
    Closed,
    All,
}

enum_str!(StatusFilter, "status", {
    Active => "active",
    Closed => "closed",
    All => "all",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollType {
    Single,
    Multiple,
    Ranking,
}

enum_str!(PollType, "poll type", {
    Single => "single",
    Multiple => "multiple",
    Ranking => "ranking",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollTypeFilter {
    All,
    Single,
    Multiple,
    Ranking,
}

enum_str!(PollTypeFilter, "poll type", {
    All => "all",
    Single => "single",
    Multiple => "multiple",
    Ranking => "ranking",
});

/// Polls of one community.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollFilters {
    pub community_id: String,
    pub sort: PollSort,
    pub status: Option<StatusFilter>,
    pub poll_type: Option<PollTypeFilter>,
    /// Only meaningful when signed in
    pub voted: Option<bool>,
    pub tags: Vec<String>,
}

impl PollFilters {
    pub fn for_community(community_id: impl Into<String>) -> Self {
        Self {
            community_id: community_id.into(),
            ..Default::default()
        }
    }
}

impl ListFilters for PollFilters {
    fn is_active(&self) -> bool {
        // The community is the scope of the list, not a filter on it.
        *self != Self::for_community(self.community_id.clone())
    }
}

impl ListQuery for PollFilters {
    fn path_segments(&self) -> Vec<String> {
        vec![
            "communities".to_string(),
            self.community_id.clone(),
            "polls".to_string(),
        ]
    }

    fn params(&self, authenticated: bool) -> Vec<(&'static str, String)> {
        let mut params = vec![("sort", self.sort.to_string())];
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(poll_type) = self.poll_type {
            params.push(("poll_type", poll_type.to_string()));
        }
        if authenticated && let Some(voted) = self.voted {
            params.push(("voted", voted.to_string()));
        }
        for tag in &self.tags {
            params.push(("tags", tag.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    #[default]
    All,
    Mentor,
    Client,
}

enum_str!(ChatRole, "chat role", {
    All => "all",
    Mentor => "mentor",
    Client => "client",
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatFilters {
    pub search: Option<String>,
    pub unread_only: bool,
    pub role: ChatRole,
}

impl ListFilters for ChatFilters {}

impl ListQuery for ChatFilters {
    fn path_segments(&self) -> Vec<String> {
        vec!["chats".to_string()]
    }

    fn params(&self, _authenticated: bool) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_search(&mut params, self.search.as_deref());
        if self.unread_only {
            params.push(("unread", "true".to_string()));
        }
        if self.role != ChatRole::All {
            params.push(("role", self.role.to_string()));
        }
        params
    }
}

/// Entries of one folder; `None` is the root folder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderFilters {
    pub folder_id: Option<String>,
    pub kind: Option<EntryKind>,
}

impl ListFilters for FolderFilters {
    fn is_active(&self) -> bool {
        self.kind.is_some()
    }
}

impl ListQuery for FolderFilters {
    fn path_segments(&self) -> Vec<String> {
        vec![
            "folders".to_string(),
            self.folder_id.clone().unwrap_or_else(|| "root".to_string()),
            "entries".to_string(),
        ]
    }

    fn params(&self, _authenticated: bool) -> Vec<(&'static str, String)> {
        match self.kind {
            Some(kind) => vec![("kind", kind.to_string())],
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    #[default]
    All,
    Polls,
    Lists,
}

enum_str!(FeedKind, "feed kind", {
    All => "all",
    Polls => "polls",
    Lists => "lists",
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedFilters {
    pub community_id: String,
    pub kind: FeedKind,
}

impl ListFilters for FeedFilters {
    fn is_active(&self) -> bool {
        self.kind != FeedKind::All
    }
}

impl ListQuery for FeedFilters {
    fn path_segments(&self) -> Vec<String> {
        vec![
            "communities".to_string(),
            self.community_id.clone(),
            "feed".to_string(),
        ]
    }

    fn params(&self, _authenticated: bool) -> Vec<(&'static str, String)> {
        if self.kind == FeedKind::All {
            Vec::new()
        } else {
            vec![("kind", self.kind.to_string())]
        }
    }
}

/// Services offered by mentors.
///
/// Both category and subcategory go to the server so that every page holds
/// a full `page_size` of matching services.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceFilters {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl ListFilters for ServiceFilters {}

impl ListQuery for ServiceFilters {
    fn path_segments(&self) -> Vec<String> {
        vec!["services".to_string()]
    }

    fn params(&self, _authenticated: bool) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
            if let Some(subcategory) = &self.subcategory {
                params.push(("subcategory", subcategory.clone()));
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagFilters {
    pub search: Option<String>,
}

impl ListFilters for TagFilters {}

impl ListQuery for TagFilters {
    fn path_segments(&self) -> Vec<String> {
        vec!["tags".to_string()]
    }

    fn params(&self, _authenticated: bool) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_search(&mut params, self.search.as_deref());
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommunityFilters {
    pub search: Option<String>,
    pub joined_only: bool,
}

impl ListFilters for CommunityFilters {}

impl ListQuery for CommunityFilters {
    fn path_segments(&self) -> Vec<String> {
        vec!["communities".to_string()]
    }

    fn params(&self, authenticated: bool) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_search(&mut params, self.search.as_deref());
        if authenticated && self.joined_only {
            params.push(("joined", "true".to_string()));
        }
        params
    }
}

/// Messages of one chat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineFilters {
    pub chat_id: String,
}

impl ListFilters for TimelineFilters {
    fn is_active(&self) -> bool {
        false
    }
}

impl ListQuery for TimelineFilters {
    fn path_segments(&self) -> Vec<String> {
        vec![
            "chats".to_string(),
            self.chat_id.clone(),
            "messages".to_string(),
        ]
    }

    fn params(&self, _authenticated: bool) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

fn push_search(params: &mut Vec<(&'static str, String)>, search: Option<&str>) {
    if let Some(text) = search.map(str::trim)
        && !text.is_empty()
    {
        params.push(("search", text.to_string()));
    }
}
