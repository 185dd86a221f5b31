use jiff::Timestamp;
use jiff::tz::TimeZone;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::api::Message;
use crate::display::RowLine;
use crate::error::{AgoraError, Result};
use crate::paging::ScrollEvent;
use crate::timeline::{day_label, gallery, group_by_day};

use super::{Context, print_json};

#[derive(Serialize)]
struct DayOutput<'a> {
    day: String,
    messages: Vec<&'a Message>,
}

pub async fn cmd_timeline(chat_id: &str, pages: u32, images_only: bool, json: bool) -> Result<()> {
    let ctx = Context::load()?;
    if !ctx.state.session.is_authenticated() {
        return Err(AgoraError::Auth("sign in to read chats".to_string()));
    }

    let mut view = ctx.views.timeline(chat_id);
    view.load().await;
    while view.cursor().page() < pages.max(1) {
        if !view
            .on_scroll(ScrollEvent::Sentinel { visible: true })
            .await
            .fetched()
        {
            break;
        }
    }
    if let Some(message) = view.cursor().error() {
        return Err(AgoraError::Api(message.to_string()));
    }

    let tz = TimeZone::system();
    let groups = group_by_day(view.items(), &tz);
    let attachments = gallery(view.items(), images_only);

    if json {
        let days: Vec<DayOutput> = groups
            .iter()
            .map(|g| DayOutput {
                day: g.day.to_string(),
                messages: g.messages.clone(),
            })
            .collect();
        return print_json(&days);
    }

    if groups.is_empty() {
        println!("No messages yet.");
        return Ok(());
    }

    let today = Timestamp::now().to_zoned(tz).date();
    for group in &groups {
        println!("{}", day_label(group.day, today).bold());
        for message in &group.messages {
            println!("  {}", message.row_line());
        }
    }

    if !attachments.is_empty() {
        println!();
        println!("{}", "Attachments:".bold());
        for entry in attachments {
            println!(
                "  {} {} ({})",
                entry.attachment.file_name.cyan(),
                entry.attachment.url.dimmed(),
                entry.sender
            );
        }
    }
    if view.cursor().has_next() {
        println!("{}", "(older messages not loaded; use --pages)".dimmed());
    }
    Ok(())
}
