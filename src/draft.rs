//! Poll drafts kept between sessions.
//!
//! Drafts live in a small JSON key-value file in the data directory, under
//! the fixed key [`POLL_DRAFT_KEY`]. The draft is restored on the next
//! visit and removed after a successful submit or an explicit reset. Other
//! keys in the file are left untouched.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::api::{ApiClient, NewPoll, Poll, PollType};
use crate::config::CONFIG_DIR;
use crate::error::{AgoraError, Result};
use crate::state::AppState;

pub const POLL_DRAFT_KEY: &str = "poll-draft";
const STORE_FILE: &str = "local-storage.json";

pub const MAX_TITLE_CHARS: usize = 200;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    #[serde(default = "default_poll_type")]
    pub poll_type: PollType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<Timestamp>,
}

fn default_poll_type() -> PollType {
    PollType::Single
}

impl Default for PollDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            community_id: None,
            poll_type: default_poll_type(),
            options: Vec::new(),
            tags: Vec::new(),
            closes_at: None,
        }
    }
}

impl PollDraft {
    /// Check the draft and build the request body. Nothing is sent when
    /// this fails.
    pub fn validate(&self, now: Timestamp) -> Result<(String, NewPoll)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AgoraError::Validation("title is required".to_string()));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AgoraError::Validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }

        let community_id = self
            .community_id
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AgoraError::Validation("choose a community".to_string()))?;

        let options: Vec<String> = self
            .options
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if options.len() < MIN_OPTIONS {
            return Err(AgoraError::Validation(format!(
                "add at least {MIN_OPTIONS} options"
            )));
        }
        if options.len() > MAX_OPTIONS {
            return Err(AgoraError::Validation(format!(
                "a poll can have at most {MAX_OPTIONS} options"
            )));
        }
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.to_lowercase()) {
                return Err(AgoraError::Validation(format!(
                    "option '{option}' appears more than once"
                )));
            }
        }

        if let Some(closes_at) = self.closes_at
            && closes_at <= now
        {
            return Err(AgoraError::Validation(
                "closing time must be in the future".to_string(),
            ));
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let poll = NewPoll {
            title: title.to_string(),
            description,
            poll_type: self.poll_type,
            options,
            tags: self.tags.clone(),
            closes_at: self.closes_at,
        };
        Ok((community_id.to_string(), poll))
    }
}

/// Key-value file holding persisted client state.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORE_FILE),
        }
    }

    /// `AGORA_DATA_DIR`, else the platform data directory, else `.agora/`.
    pub fn open_default() -> Self {
        if let Ok(dir) = env::var("AGORA_DATA_DIR")
            && !dir.is_empty()
        {
            return Self::new(dir);
        }
        match ProjectDirs::from("", "", "agora") {
            Some(dirs) => Self::new(dirs.data_dir()),
            None => Self::new(CONFIG_DIR),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<PollDraft>> {
        let mut entries = self.read_entries()?;
        match entries.remove(POLL_DRAFT_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn save(&self, draft: &PollDraft) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(POLL_DRAFT_KEY.to_string(), serde_json::to_value(draft)?);
        self.write_entries(&entries)
    }

    /// Remove the draft. Returns whether one was stored.
    pub fn clear(&self) -> Result<bool> {
        let mut entries = self.read_entries()?;
        if entries.remove(POLL_DRAFT_KEY).is_none() {
            return Ok(false);
        }
        self.write_entries(&entries)?;
        Ok(true)
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(AgoraError::Other(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Validate and submit the stored draft, clearing it on success.
///
/// The draft stays in the store on any failure so the user can fix it and
/// try again.
pub async fn submit_draft(
    client: &ApiClient,
    state: &AppState,
    store: &DraftStore,
) -> Result<Poll> {
    let draft = store
        .load()?
        .ok_or_else(|| AgoraError::Validation("there is no draft to submit".to_string()))?;
    let (community_id, poll) = draft.validate(Timestamp::now())?;
    state.session.require_member(&community_id)?;

    let created = client.create_poll(&community_id, &poll).await?;
    store.clear()?;
    tracing::debug!("submitted poll {} to {}", created.id, community_id);
    Ok(created)
}
