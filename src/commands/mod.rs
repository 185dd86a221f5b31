//! Command implementations for the `agora` binary.

mod browse;
mod config;
mod draft;
mod timeline;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::state::AppState;
use crate::views::Views;

pub use browse::{
    BrowseOptions, cmd_chats, cmd_communities, cmd_feed, cmd_folders, cmd_polls, cmd_services,
    cmd_tags,
};
pub use config::{cmd_config_set, cmd_config_show};
pub use draft::{DraftEdit, cmd_draft_clear, cmd_draft_set, cmd_draft_show, cmd_draft_submit};
pub use timeline::cmd_timeline;

/// Everything a network command needs, built from the loaded config.
pub struct Context {
    pub config: Config,
    pub state: AppState,
    pub client: Arc<ApiClient>,
    pub views: Views,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let state = AppState::from_config(&config);
        let client = Arc::new(ApiClient::from_config(&config, state.session.clone())?);
        let views = Views::new(Arc::clone(&client), config.paging.clone());
        Ok(Self {
            config,
            state,
            client,
            views,
        })
    }
}

/// Print a value as pretty JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
