use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use agora::cli::{Cli, Commands, ConfigAction, DraftAction};
use agora::commands::{
    cmd_chats, cmd_communities, cmd_config_set, cmd_config_show, cmd_draft_clear, cmd_draft_set,
    cmd_draft_show, cmd_draft_submit, cmd_feed, cmd_folders, cmd_polls, cmd_services, cmd_tags,
    cmd_timeline,
};

/// Log level filter, e.g. `AGORA_LOG=agora=debug`
const LOG_ENV: &str = "AGORA_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Polls {
            community,
            sort,
            status,
            poll_type,
            voted,
            tags,
            paging,
        } => cmd_polls(community, sort, status, poll_type, voted, tags, paging.into()).await,
        Commands::Chats {
            search,
            unread,
            role,
            paging,
        } => cmd_chats(search, unread, role, paging.into()).await,
        Commands::Folders {
            folder,
            kind,
            paging,
        } => cmd_folders(folder, kind, paging.into()).await,
        Commands::Feed {
            community,
            kind,
            paging,
        } => cmd_feed(community, kind, paging.into()).await,
        Commands::Services {
            category,
            subcategory,
            paging,
        } => cmd_services(category, subcategory, paging.into()).await,
        Commands::Tags { search, paging } => cmd_tags(search, paging.into()).await,
        Commands::Communities {
            search,
            joined,
            paging,
        } => cmd_communities(search, joined, paging.into()).await,
        Commands::Timeline {
            chat,
            pages,
            images_only,
            json,
        } => cmd_timeline(&chat, pages, images_only, json).await,

        Commands::Draft { action } => match action {
            DraftAction::Show { json } => cmd_draft_show(json),
            DraftAction::Clear => cmd_draft_clear(),
            DraftAction::Submit => cmd_draft_submit().await,
            set => match set.into_edit() {
                Some(edit) => cmd_draft_set(edit),
                None => Ok(()),
            },
        },

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
