use clap::{Args, Parser, Subcommand};
use jiff::Timestamp;

use crate::api::{ChatRole, EntryKind, FeedKind, PollSort, PollType, PollTypeFilter, StatusFilter};
use crate::commands::{BrowseOptions, DraftEdit};

#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "Browse polls, chats and communities from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every list command
#[derive(Args, Debug, Clone, Copy)]
pub struct PagingArgs {
    /// Number of pages to load
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<PagingArgs> for BrowseOptions {
    fn from(args: PagingArgs) -> Self {
        BrowseOptions {
            pages: args.pages,
            json: args.json,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List polls in a community
    #[command(visible_alias = "p")]
    Polls {
        /// Community ID (default: selected_community from config)
        #[arg(short, long)]
        community: Option<String>,

        /// Sort order: newest, oldest, most_votes, trending
        #[arg(long, default_value = "newest", value_parser = parse_enum::<PollSort>)]
        sort: PollSort,

        /// Status: active, closed, all
        #[arg(long, value_parser = parse_enum::<StatusFilter>)]
        status: Option<StatusFilter>,

        /// Poll type: all, single, multiple, ranking
        #[arg(short = 't', long = "type", value_parser = parse_enum::<PollTypeFilter>)]
        poll_type: Option<PollTypeFilter>,

        /// Only polls you have (true) or have not (false) voted in
        #[arg(long)]
        voted: Option<bool>,

        /// Filter by tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List your chats
    Chats {
        /// Search by title or participant
        #[arg(short, long)]
        search: Option<String>,

        /// Only chats with unread messages
        #[arg(long)]
        unread: bool,

        /// Role: all, mentor, client
        #[arg(long, default_value = "all", value_parser = parse_enum::<ChatRole>)]
        role: ChatRole,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List a folder's entries
    Folders {
        /// Folder ID (default: root)
        folder: Option<String>,

        /// Entry kind: folder, list
        #[arg(long, value_parser = parse_enum::<EntryKind>)]
        kind: Option<EntryKind>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Show a community feed
    Feed {
        /// Community ID (default: selected_community from config)
        #[arg(short, long)]
        community: Option<String>,

        /// Item kind: all, polls, lists
        #[arg(long, default_value = "all", value_parser = parse_enum::<FeedKind>)]
        kind: FeedKind,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Browse the service catalog
    Services {
        #[arg(long)]
        category: Option<String>,

        /// Requires --category
        #[arg(long)]
        subcategory: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Look up tags
    Tags {
        /// Search text
        search: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Look up communities
    Communities {
        /// Search text
        search: Option<String>,

        /// Only communities you joined
        #[arg(long)]
        joined: bool,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Read a chat's messages grouped by day
    Timeline {
        /// Chat ID
        chat: String,

        /// Number of pages to load
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Only list image attachments in the gallery
        #[arg(long)]
        images_only: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the local poll draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum DraftAction {
    /// Show the saved draft
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update fields of the saved draft
    Set {
        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Community to post in
        #[arg(short, long)]
        community: Option<String>,

        /// Poll type: single, multiple, ranking
        #[arg(short = 't', long = "type", value_parser = parse_enum::<PollType>)]
        poll_type: Option<PollType>,

        /// Answer option (repeatable, replaces all options)
        #[arg(short, long = "option")]
        options: Vec<String>,

        /// Tag (repeatable, replaces all tags)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Closing time as an RFC 3339 timestamp
        #[arg(long)]
        closes_at: Option<Timestamp>,
    },
    /// Discard the saved draft
    Clear,
    /// Create a poll from the saved draft
    Submit,
}

impl DraftAction {
    /// Convert a `set` action into the edit it describes
    pub fn into_edit(self) -> Option<DraftEdit> {
        match self {
            DraftAction::Set {
                title,
                description,
                community,
                poll_type,
                options,
                tags,
                closes_at,
            } => Some(DraftEdit {
                title,
                description,
                community,
                poll_type,
                options,
                tags,
                closes_at,
            }),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, auth.access_token, paging.page_size,
        /// paging.lookup_page_size, paging.scroll_threshold_px, selected_community)
        key: String,
        /// Value to set
        value: String,
    },
}

fn parse_enum<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    s.parse().map_err(|e: T::Err| e.to_string())
}
