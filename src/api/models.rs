//! Resources returned by the platform API.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::paging::Identified;

use super::query::PollType;

macro_rules! identified_by_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                type Id = String;

                fn id(&self) -> &String {
                    &self.id
                }
            }
        )*
    };
}

identified_by_id!(
    Poll,
    ChatSummary,
    FolderEntry,
    FeedItem,
    Service,
    Tag,
    Community,
    Message
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollState {
    Active,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub community_id: String,
    pub poll_type: PollType,
    pub state: PollState,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    /// Only present on authenticated responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: String,
    pub counterpart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    /// Paid mentor service the chat was opened for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    List,
}

crate::enum_str!(EntryKind, "entry kind", {
    Folder => "folder",
    List => "list",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    #[serde(default)]
    pub item_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedItemKind {
    Poll,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub kind: FeedItemKind,
    pub title: String,
    pub author: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub price_cents: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub usage_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub joined: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    #[serde(default)]
    pub body: String,
    pub sent_at: Timestamp,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// The signed-in user, as returned by `GET /me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub communities: Vec<String>,
}
