use owo_colors::OwoColorize;

use crate::api::PollType;
use crate::display::format_toast;
use crate::draft::{DraftStore, PollDraft, submit_draft};
use crate::error::Result;
use crate::toast::Toast;

use super::{Context, print_json};

/// Fields to change on the stored draft; `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct DraftEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub community: Option<String>,
    pub poll_type: Option<PollType>,
    /// Replaces all options when non-empty
    pub options: Vec<String>,
    /// Replaces all tags when non-empty
    pub tags: Vec<String>,
    pub closes_at: Option<jiff::Timestamp>,
}

impl DraftEdit {
    fn apply(self, draft: &mut PollDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = Some(description).filter(|d| !d.is_empty());
        }
        if let Some(community) = self.community {
            draft.community_id = Some(community).filter(|c| !c.is_empty());
        }
        if let Some(poll_type) = self.poll_type {
            draft.poll_type = poll_type;
        }
        if !self.options.is_empty() {
            draft.options = self.options;
        }
        if !self.tags.is_empty() {
            draft.tags = self.tags;
        }
        if self.closes_at.is_some() {
            draft.closes_at = self.closes_at;
        }
    }
}

pub fn cmd_draft_show(json: bool) -> Result<()> {
    let store = DraftStore::open_default();
    let Some(draft) = store.load()? else {
        if json {
            return print_json(&serde_json::Value::Null);
        }
        println!("No saved draft.");
        return Ok(());
    };

    if json {
        return print_json(&draft);
    }

    println!("{} {}", "Title:".bold(), draft.title);
    if let Some(description) = &draft.description {
        println!("{} {}", "Description:".bold(), description);
    }
    println!(
        "{} {}",
        "Community:".bold(),
        draft.community_id.as_deref().unwrap_or("(not set)")
    );
    println!("{} {}", "Type:".bold(), draft.poll_type);
    println!("{}", "Options:".bold());
    for option in &draft.options {
        println!("  - {option}");
    }
    if !draft.tags.is_empty() {
        println!("{} {}", "Tags:".bold(), draft.tags.join(", "));
    }
    if let Some(closes_at) = draft.closes_at {
        println!("{} {}", "Closes:".bold(), closes_at);
    }
    Ok(())
}

pub fn cmd_draft_set(edit: DraftEdit) -> Result<()> {
    let store = DraftStore::open_default();
    let mut draft = store.load()?.unwrap_or_default();
    edit.apply(&mut draft);
    store.save(&draft)?;
    println!("Draft saved to {}", store.path().display());
    Ok(())
}

pub fn cmd_draft_clear() -> Result<()> {
    let store = DraftStore::open_default();
    if store.clear()? {
        println!("Draft discarded.");
    } else {
        println!("No saved draft.");
    }
    Ok(())
}

pub async fn cmd_draft_submit() -> Result<()> {
    let ctx = Context::load()?;
    let store = DraftStore::open_default();

    if ctx.state.session.is_authenticated() {
        match ctx.client.fetch_profile().await {
            Ok(profile) => ctx.state.session.set_profile(profile),
            Err(e) => tracing::warn!("could not load profile, membership unchecked: {e}"),
        }
    }

    match submit_draft(&ctx.client, &ctx.state, &store).await {
        Ok(poll) => {
            println!(
                "{}",
                format_toast(&Toast::success(format!("Poll created: {}", poll.id)))
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_toast(&Toast::from_error(&e)));
            Err(e)
        }
    }
}
