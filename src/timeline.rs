//! Chat timeline: messages grouped by calendar day, plus the attachment
//! gallery for the conversation.

use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::api::{Attachment, Message};

#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub day: Date,
    pub messages: Vec<&'a Message>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry<'a> {
    pub message_id: &'a str,
    pub sender: &'a str,
    pub attachment: &'a Attachment,
}

/// Group `messages` by the day they were sent in `tz`.
///
/// Pages may arrive newest-first, so messages are ordered by send time
/// before grouping. Messages sent at the same instant keep their input
/// order.
pub fn group_by_day<'a>(messages: &'a [Message], tz: &TimeZone) -> Vec<DayGroup<'a>> {
    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|m| m.sent_at);

    let mut groups: Vec<DayGroup<'a>> = Vec::new();
    for message in ordered {
        let day = message.sent_at.to_zoned(tz.clone()).date();
        match groups.last_mut() {
            Some(group) if group.day == day => group.messages.push(message),
            _ => groups.push(DayGroup {
                day,
                messages: vec![message],
            }),
        }
    }
    groups
}

/// Every attachment in the conversation, oldest first.
pub fn gallery(messages: &[Message], images_only: bool) -> Vec<GalleryEntry<'_>> {
    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|m| m.sent_at);

    ordered
        .into_iter()
        .flat_map(|m| {
            m.attachments.iter().map(move |a| GalleryEntry {
                message_id: &m.id,
                sender: &m.sender,
                attachment: a,
            })
        })
        .filter(|entry| !images_only || entry.attachment.is_image())
        .collect()
}

/// Heading shown above a day group.
pub fn day_label(day: Date, today: Date) -> String {
    if day == today {
        return "Today".to_string();
    }
    if today.yesterday().ok() == Some(day) {
        return "Yesterday".to_string();
    }
    day.strftime("%a %d %b %Y").to_string()
}
