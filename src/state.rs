//! Application state shared between views.
//!
//! Each container is a cheap-to-clone handle around its own lock. Views get
//! the containers they need passed in; nothing here is a global.
//!
//! | Container            | Written by                    | Read by                   |
//! |----------------------|-------------------------------|---------------------------|
//! | [`SessionStore`]     | sign-in, sign-out, `GET /me`  | API client, action guards |
//! | [`CommunitySelection`] | community picker            | polls and feed views      |
//! | [`UiFlags`]          | drawer and comment toggles    | renderers                 |

use std::sync::Arc;

use parking_lot::RwLock;
use secrecy::SecretString;

use crate::api::Profile;
use crate::config::Config;
use crate::error::{AgoraError, Result};

#[derive(Default)]
struct Session {
    token: Option<SecretString>,
    profile: Option<Profile>,
}

/// Access token and profile of the signed-in user.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Session {
                token,
                profile: None,
            })),
        }
    }

    pub fn sign_in(&self, token: SecretString) {
        let mut session = self.inner.write();
        session.token = Some(token);
        session.profile = None;
    }

    pub fn sign_out(&self) {
        let mut session = self.inner.write();
        session.token = None;
        session.profile = None;
    }

    pub fn token(&self) -> Option<SecretString> {
        self.inner.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().token.is_some()
    }

    pub fn set_profile(&self, profile: Profile) {
        self.inner.write().profile = Some(profile);
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner.read().profile.clone()
    }

    /// Block actions that need community membership before any request is
    /// sent. Without a loaded profile membership is left to the server.
    pub fn require_member(&self, community_id: &str) -> Result<()> {
        let session = self.inner.read();
        if session.token.is_none() {
            return Err(AgoraError::Auth(
                "Sign in to do that. Set AGORA_ACCESS_TOKEN or run: agora config set auth.access_token <token>"
                    .to_string(),
            ));
        }
        if let Some(profile) = &session.profile
            && !profile.communities.iter().any(|c| c == community_id)
        {
            return Err(AgoraError::NotMember(community_id.to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.read();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.token.is_some())
            .field("profile", &session.profile)
            .finish()
    }
}

/// The community the user is browsing.
#[derive(Debug, Clone, Default)]
pub struct CommunitySelection {
    inner: Arc<RwLock<Option<String>>>,
}

impl CommunitySelection {
    pub fn select(&self, community_id: impl Into<String>) {
        *self.inner.write() = Some(community_id.into());
    }

    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    pub fn selected(&self) -> Option<String> {
        self.inner.read().clone()
    }

    /// The explicit choice if given, otherwise the stored selection.
    pub fn resolve(&self, explicit: Option<String>) -> Result<String> {
        explicit.or_else(|| self.selected()).ok_or_else(|| {
            AgoraError::Validation(
                "no community given and none selected. Run: agora config set selected_community <id>"
                    .to_string(),
            )
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiFlagValues {
    pub drawer_open: bool,
    pub comments_open: bool,
}

/// Open/closed flags for drawers and comment panes.
#[derive(Debug, Clone, Default)]
pub struct UiFlags {
    inner: Arc<RwLock<UiFlagValues>>,
}

impl UiFlags {
    pub fn get(&self) -> UiFlagValues {
        *self.inner.read()
    }

    pub fn toggle_drawer(&self) -> bool {
        let mut flags = self.inner.write();
        flags.drawer_open = !flags.drawer_open;
        flags.drawer_open
    }

    pub fn toggle_comments(&self) -> bool {
        let mut flags = self.inner.write();
        flags.comments_open = !flags.comments_open;
        flags.comments_open
    }

    pub fn close_all(&self) {
        *self.inner.write() = UiFlagValues::default();
    }
}

/// All shared containers, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: SessionStore,
    pub community: CommunitySelection,
    pub ui: UiFlags,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let state = Self {
            session: SessionStore::new(config.access_token()),
            community: CommunitySelection::default(),
            ui: UiFlags::default(),
        };
        if let Some(community) = &config.selected_community {
            state.community.select(community.clone());
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(communities: &[&str]) -> Profile {
        Profile {
            username: "ada".to_string(),
            communities: communities.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_require_member_without_token() {
        let session = SessionStore::default();
        assert!(matches!(
            session.require_member("c1"),
            Err(AgoraError::Auth(_))
        ));
    }

    #[test]
    fn test_require_member_checks_loaded_profile() {
        let session = SessionStore::new(Some(SecretString::from("tok")));
        assert!(session.require_member("c1").is_ok());

        session.set_profile(profile(&["c2"]));
        assert!(matches!(
            session.require_member("c1"),
            Err(AgoraError::NotMember(ref c)) if c == "c1"
        ));
        assert!(session.require_member("c2").is_ok());
    }

    #[test]
    fn test_sign_out_drops_profile() {
        let session = SessionStore::new(Some(SecretString::from("tok")));
        session.set_profile(profile(&["c1"]));
        let reader = session.clone();
        session.sign_out();
        assert!(!reader.is_authenticated());
        assert!(reader.profile().is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let session = SessionStore::new(Some(SecretString::from("super-secret")));
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("authenticated: true"));
    }

    #[test]
    fn test_community_resolve_prefers_explicit() {
        let selection = CommunitySelection::default();
        assert!(selection.resolve(None).is_err());
        selection.select("c1");
        assert_eq!(selection.resolve(None).unwrap(), "c1");
        assert_eq!(selection.resolve(Some("c9".to_string())).unwrap(), "c9");
    }

    #[test]
    fn test_ui_flags_toggle() {
        let ui = UiFlags::default();
        assert!(ui.toggle_drawer());
        assert!(ui.toggle_comments());
        assert_eq!(
            ui.get(),
            UiFlagValues {
                drawer_open: true,
                comments_open: true
            }
        );
        ui.close_all();
        assert_eq!(ui.get(), UiFlagValues::default());
    }
}
