//! Owned view state and the navigation actions that drive it.
//!
//! `ViewState` holds everything the page shows: the profile card, one panel
//! per tab, the error overlay and the theme. It only changes through plain
//! state transitions; `Viewer` pairs it with an API client and turns user
//! actions (search, tab click, arrow keys, theme toggle) into fetches
//! followed by those transitions.

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::api::{following_endpoint, GitHubApi, Transport};
use crate::models::{Profile, Repository, UserEntry};
use crate::theme::{Theme, ThemeStore};

pub const REPO_SKELETONS: usize = 6;
pub const USER_SKELETONS: usize = 12;

pub const NO_REPOSITORIES: &str = "Doesn't have any public repositories yet.";
pub const NO_FORKS: &str = "Doesn't have any forked repositories yet.";
pub const NO_FOLLOWERS: &str = "Doesn't have any followers yet.";
pub const NO_FOLLOWING: &str = "Doesn't have any following yet.";
pub const FETCH_FAILED: &str = "Failed to fetch data. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Repositories,
    Forked,
    Followers,
    Following,
}

impl Tab {
    pub const ALL: [Self; 4] = [
        Self::Repositories,
        Self::Forked,
        Self::Followers,
        Self::Following,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Repositories => 0,
            Self::Forked => 1,
            Self::Followers => 2,
            Self::Following => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Repositories => "Repositories",
            Self::Forked => "Forked",
            Self::Followers => "Followers",
            Self::Following => "Following",
        }
    }

    /// Element id of the panel this tab controls
    #[must_use]
    pub const fn panel_id(self) -> &'static str {
        match self {
            Self::Repositories => "panel-1",
            Self::Forked => "panel-2",
            Self::Followers => "panel-3",
            Self::Following => "panel-4",
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    /// Accepts tab names (case-insensitive, `repos` for short) or positions 1-4
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "repos" | "repositories" => Ok(Self::Repositories),
            "2" | "forked" | "forks" => Ok(Self::Forked),
            "3" | "followers" => Ok(Self::Followers),
            "4" | "following" => Ok(Self::Following),
            other => anyhow::bail!(
                "Unknown tab '{other}': expected repositories, forked, followers, following or 1-4"
            ),
        }
    }
}

/// Keys that move focus along the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCard {
    Empty,
    Skeleton,
    Loaded(Box<Profile>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Blank,
    RepoSkeletons(usize),
    UserSkeletons(usize),
    Repositories(Vec<Repository>),
    Users(Vec<UserEntry>),
    Empty(&'static str),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub tab: Tab,
    pub hidden: bool,
    pub content: PanelContent,
}

/// Status and decoded body of a non-2xx profile response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub status: u16,
    pub body: Value,
}

/// Endpoints of the profile currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLinks {
    pub repos_url: String,
    pub followers_url: String,
    pub following_url: String,
}

impl From<&Profile> for ProfileLinks {
    fn from(profile: &Profile) -> Self {
        Self {
            repos_url: profile.repos_url.clone(),
            followers_url: profile.followers_url.clone(),
            following_url: following_endpoint(&profile.following_url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub theme: Theme,
    /// Mirrors `aria-pressed` on the theme button: flips on every toggle
    pub theme_pressed: bool,
    pub profile: ProfileCard,
    pub error_visible: bool,
    /// Set when the last profile request got a non-2xx answer
    pub failure: Option<FetchFailure>,
    panels: Vec<Panel>,
    active: Tab,
    focused: Tab,
    links: Option<ProfileLinks>,
    forked: Vec<Repository>,
}

impl ViewState {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        let panels = Tab::ALL
            .iter()
            .map(|&tab| Panel {
                tab,
                hidden: tab != Tab::Repositories,
                content: PanelContent::Blank,
            })
            .collect();

        Self {
            theme,
            theme_pressed: false,
            profile: ProfileCard::Empty,
            error_visible: false,
            failure: None,
            panels,
            active: Tab::Repositories,
            focused: Tab::Repositories,
            links: None,
            forked: Vec::new(),
        }
    }

    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active
    }

    /// Tab holding the roving `tabindex="0"`
    #[must_use]
    pub const fn focused_tab(&self) -> Tab {
        self.focused
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    #[must_use]
    pub fn panel(&self, tab: Tab) -> &Panel {
        &self.panels[tab.index()]
    }

    #[must_use]
    pub const fn links(&self) -> Option<&ProfileLinks> {
        self.links.as_ref()
    }

    #[must_use]
    pub fn forked(&self) -> &[Repository] {
        &self.forked
    }

    #[must_use]
    pub fn visible_panels(&self) -> Vec<Tab> {
        self.panels
            .iter()
            .filter(|panel| !panel.hidden)
            .map(|panel| panel.tab)
            .collect()
    }

    /// Hide the previously active panel and reveal the one for `tab`.
    pub fn select_tab(&mut self, tab: Tab) {
        self.panels[self.active.index()].hidden = true;
        self.panels[tab.index()].hidden = false;
        self.active = tab;
        self.focused = tab;
    }

    /// Move keyboard focus to the neighbouring tab; stops at either end.
    pub fn key_down(&mut self, key: Key) {
        let target = match key {
            Key::ArrowRight => self.focused.next(),
            Key::ArrowLeft => self.focused.previous(),
        };
        if let Some(tab) = target {
            self.focused = tab;
        }
    }

    pub fn set_content(&mut self, tab: Tab, content: PanelContent) {
        self.panels[tab.index()].content = content;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme_pressed = !self.theme_pressed;
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Placeholders shown while a profile request is in flight.
    pub fn begin_profile_load(&mut self) {
        self.error_visible = false;
        self.failure = None;
        self.profile = ProfileCard::Skeleton;
        self.select_tab(Tab::Repositories);
        self.set_content(Tab::Repositories, PanelContent::RepoSkeletons(REPO_SKELETONS));
    }

    pub fn apply_profile(&mut self, profile: Profile) {
        self.links = Some(ProfileLinks::from(&profile));
        self.forked.clear();
        self.profile = ProfileCard::Loaded(Box::new(profile));
    }

    pub fn show_error(&mut self, failure: Option<FetchFailure>) {
        self.error_visible = true;
        self.failure = failure;
    }

    /// Split a repository page into own repos (shown now) and forks (kept
    /// for the Forked tab).
    pub fn apply_repositories(&mut self, repositories: Vec<Repository>) {
        let (forked, own): (Vec<Repository>, Vec<Repository>) =
            repositories.into_iter().partition(|repo| repo.is_fork);
        self.forked = forked;

        let content = if own.is_empty() {
            PanelContent::Empty(NO_REPOSITORIES)
        } else {
            PanelContent::Repositories(own)
        };
        self.set_content(Tab::Repositories, content);
    }

    pub fn show_forked(&mut self) {
        let content = if self.links.is_none() {
            PanelContent::Blank
        } else if self.forked.is_empty() {
            PanelContent::Empty(NO_FORKS)
        } else {
            PanelContent::Repositories(self.forked.clone())
        };
        self.set_content(Tab::Forked, content);
    }

    pub fn apply_users(&mut self, tab: Tab, users: Vec<UserEntry>) {
        let content = if users.is_empty() {
            PanelContent::Empty(empty_message(tab))
        } else {
            PanelContent::Users(users)
        };
        self.set_content(tab, content);
    }

    /// Entry `index` (0-based) of the active followers/following panel.
    #[must_use]
    pub fn user_entry(&self, index: usize) -> Option<&UserEntry> {
        match &self.panel(self.active).content {
            PanelContent::Users(users) => users.get(index),
            _ => None,
        }
    }
}

const fn empty_message(tab: Tab) -> &'static str {
    match tab {
        Tab::Repositories => NO_REPOSITORIES,
        Tab::Forked => NO_FORKS,
        Tab::Followers => NO_FOLLOWERS,
        Tab::Following => NO_FOLLOWING,
    }
}

enum Fetched<T> {
    Loaded(T),
    Failed(u16, Value),
}

fn decode<T: serde::de::DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).context("Unexpected shape in GitHub API response")
}

type Listener = Box<dyn FnMut(&ViewState)>;

/// Drives a `ViewState` from user actions, fetching through `GitHubApi`.
///
/// Every action runs to completion before returning, so a response from an
/// older search can never land on top of a newer one.
pub struct Viewer<T> {
    api: GitHubApi<T>,
    state: ViewState,
    store: Option<ThemeStore>,
    listener: Option<Listener>,
}

impl<T: Transport> Viewer<T> {
    pub fn new(api: GitHubApi<T>, theme: Theme) -> Self {
        Self {
            api,
            state: ViewState::new(theme),
            store: None,
            listener: None,
        }
    }

    /// Start from the stored session theme and write toggles back to it.
    pub fn with_theme_store(api: GitHubApi<T>, store: ThemeStore) -> Self {
        let mut viewer = Self::new(api, store.initial());
        viewer.store = Some(store);
        viewer
    }

    /// Called after every state change, including the loading placeholders.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(&ViewState) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn api(&self) -> &GitHubApi<T> {
        &self.api
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.state);
        }
    }

    /// Load `username`'s profile. Blank input is ignored.
    pub fn search(&mut self, username: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(());
        }
        let url = self.api.profile_url(username);
        self.update_profile(&url)
    }

    /// Show placeholders, fetch the profile at `profile_url`, then its
    /// repositories.
    pub fn update_profile(&mut self, profile_url: &str) -> Result<()> {
        info!("loading profile {profile_url}");
        self.state.begin_profile_load();
        self.notify();

        let fetched = self
            .api
            .fetch_data(profile_url, Fetched::Loaded, Fetched::Failed);

        match fetched {
            Ok(Fetched::Loaded(data)) => {
                let profile: Profile = match decode(data) {
                    Ok(profile) => profile,
                    Err(e) => {
                        self.state.show_error(None);
                        self.notify();
                        return Err(e);
                    }
                };
                self.state.apply_profile(profile);
                self.notify();
                self.update_repositories()
            }
            Ok(Fetched::Failed(status, body)) => {
                warn!("profile request failed with status {status}: {body}");
                self.state.show_error(Some(FetchFailure { status, body }));
                self.notify();
                Ok(())
            }
            Err(e) => {
                self.state.show_error(None);
                self.notify();
                Err(e.into())
            }
        }
    }

    fn update_repositories(&mut self) -> Result<()> {
        let Some(links) = self.state.links() else {
            return Ok(());
        };
        let url = self.api.repos_page_url(&links.repos_url);

        let Some(data) = self.fetch_panel(Tab::Repositories, &url)? else {
            self.fail_panel(Tab::Repositories);
            return Ok(());
        };
        match decode::<Vec<Repository>>(data) {
            Ok(repositories) => {
                self.state.apply_repositories(repositories);
                self.notify();
                Ok(())
            }
            Err(e) => {
                self.fail_panel(Tab::Repositories);
                Err(e)
            }
        }
    }

    /// Select `tab` and load whatever its panel shows.
    pub fn click_tab(&mut self, tab: Tab) -> Result<()> {
        self.state.select_tab(tab);
        self.notify();

        match tab {
            Tab::Repositories => Ok(()),
            Tab::Forked => {
                self.state.show_forked();
                self.notify();
                Ok(())
            }
            Tab::Followers | Tab::Following => self.update_users(tab),
        }
    }

    fn update_users(&mut self, tab: Tab) -> Result<()> {
        let Some(links) = self.state.links() else {
            return Ok(());
        };
        let url = if tab == Tab::Followers {
            links.followers_url.clone()
        } else {
            links.following_url.clone()
        };

        self.state
            .set_content(tab, PanelContent::UserSkeletons(USER_SKELETONS));
        self.notify();

        let Some(data) = self.fetch_panel(tab, &url)? else {
            self.fail_panel(tab);
            return Ok(());
        };
        match decode::<Vec<UserEntry>>(data) {
            Ok(users) => {
                self.state.apply_users(tab, users);
                self.notify();
                Ok(())
            }
            Err(e) => {
                self.fail_panel(tab);
                Err(e)
            }
        }
    }

    /// `Some(json)` on success, `None` after a non-2xx. A dead network marks
    /// the panel failed and propagates.
    fn fetch_panel(&mut self, tab: Tab, url: &str) -> Result<Option<Value>> {
        match self.api.fetch_data(url, Some, |status, body| {
            warn!("{} request failed with status {status}: {body}", tab.label());
            None
        }) {
            Ok(data) => Ok(data),
            Err(e) => {
                self.fail_panel(tab);
                Err(e.into())
            }
        }
    }

    fn fail_panel(&mut self, tab: Tab) {
        self.state.set_content(tab, PanelContent::Failed);
        self.notify();
    }

    pub fn key_down(&mut self, key: Key) {
        self.state.key_down(key);
        self.notify();
    }

    /// Click the tab that currently holds keyboard focus.
    pub fn activate_focused(&mut self) -> Result<()> {
        self.click_tab(self.state.focused_tab())
    }

    /// Follow the link on entry `index` (0-based) of the active user panel.
    pub fn open_entry(&mut self, index: usize) -> Result<()> {
        let url = self
            .state
            .user_entry(index)
            .map(|entry| entry.profile_url.clone())
            .with_context(|| format!("No profile link at position {}", index + 1))?;
        self.update_profile(&url)
    }

    /// Stored first, so a failed write leaves the page on the old theme.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        if let Some(store) = &self.store {
            store.save(self.state.theme.toggled())?;
        }
        let theme = self.state.toggle_theme();
        self.notify();
        Ok(theme)
    }
}
