use jiff::tz::TimeZone;
use owo_colors::OwoColorize;

use crate::api::{
    ChatSummary, Community, EntryKind, FeedItem, FeedItemKind, FolderEntry, Message, Poll,
    PollState, Service, Tag,
};

/// Single-line rendering of a list item.
pub trait RowLine {
    fn row_line(&self) -> String;
}

impl RowLine for Poll {
    fn row_line(&self) -> String {
        let state = match self.state {
            PollState::Active => "[active]".green().to_string(),
            PollState::Closed => "[closed]".dimmed().to_string(),
        };
        let voted = match self.voted {
            Some(true) => " ✓".green().to_string(),
            _ => String::new(),
        };
        let tags = if self.tags.is_empty() {
            String::new()
        } else {
            format!(" #{}", self.tags.join(" #")).dimmed().to_string()
        };
        format!(
            "{} {} [{}] {} ({} votes){}{}",
            format!("{:10}", self.id).cyan(),
            state,
            self.poll_type,
            self.title,
            self.vote_count,
            voted,
            tags
        )
    }
}

impl RowLine for ChatSummary {
    fn row_line(&self) -> String {
        let unread = if self.unread_count > 0 {
            format!(" ({} unread)", self.unread_count).yellow().to_string()
        } else {
            String::new()
        };
        let service = self
            .service
            .as_deref()
            .map(|s| format!(" [{s}]").magenta().to_string())
            .unwrap_or_default();
        let preview = self.last_message.as_deref().unwrap_or("");
        format!(
            "{} {}{}{} - {}",
            format!("{:10}", self.id).cyan(),
            self.counterpart.bold(),
            service,
            unread,
            preview
        )
    }
}

impl RowLine for FolderEntry {
    fn row_line(&self) -> String {
        let icon = match self.kind {
            EntryKind::Folder => "▸",
            EntryKind::List => "•",
        };
        format!(
            "{} {} {} ({} items)",
            format!("{:10}", self.id).cyan(),
            icon,
            self.name,
            self.item_count
        )
    }
}

impl RowLine for FeedItem {
    fn row_line(&self) -> String {
        let kind = match self.kind {
            FeedItemKind::Poll => "[poll]".green().to_string(),
            FeedItemKind::List => "[list]".blue().to_string(),
        };
        format!(
            "{} {} {} by {}",
            format!("{:10}", self.id).cyan(),
            kind,
            self.title,
            self.author.dimmed()
        )
    }
}

impl RowLine for Service {
    fn row_line(&self) -> String {
        let category = match &self.subcategory {
            Some(sub) => format!("{}/{}", self.category, sub),
            None => self.category.clone(),
        };
        format!(
            "{} {} [{}] {}",
            format!("{:10}", self.id).cyan(),
            self.title,
            category.dimmed(),
            format_price(self.price_cents, &self.currency).green()
        )
    }
}

impl RowLine for Tag {
    fn row_line(&self) -> String {
        format!("#{} ({})", self.name.cyan(), self.usage_count)
    }
}

impl RowLine for Community {
    fn row_line(&self) -> String {
        let joined = if self.joined {
            " [joined]".green().to_string()
        } else {
            String::new()
        };
        format!(
            "{} {} ({} members){}",
            format!("{:10}", self.id).cyan(),
            self.name,
            self.member_count,
            joined
        )
    }
}

impl RowLine for Message {
    fn row_line(&self) -> String {
        let attachments = if self.attachments.is_empty() {
            String::new()
        } else {
            format!(" [{} attachment(s)]", self.attachments.len())
                .dimmed()
                .to_string()
        };
        format!(
            "{} {}: {}{}",
            self.sent_at
                .to_zoned(TimeZone::system())
                .strftime("%H:%M")
                .to_string()
                .dimmed(),
            self.sender.bold(),
            self.body,
            attachments
        )
    }
}

/// `1250, "USD"` → `12.50 USD`
pub fn format_price(cents: u64, currency: &str) -> String {
    format!("{}.{:02} {}", cents / 100, cents % 100, currency)
}
