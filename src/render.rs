//! View-model to markup mapping.
//!
//! Every function here is pure: state in, HTML string out. The page produced
//! by [`page`] is self-contained apart from the avatar images it links to.

use crate::format::number_to_kilo;
use crate::models::{AccountType, Profile, Repository, UserEntry};
use crate::session::{Panel, PanelContent, ProfileCard, Tab, ViewState, FETCH_FAILED};

/// Escape text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Ask the avatar CDN for a `size` pixel image.
#[must_use]
pub fn sized_avatar(url: &str, size: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}s={size}")
}

fn meta_item(icon: &str, body: &str) -> String {
    format!(
        r#"<li class="meta-item"><span class="material-symbols-rounded" aria-hidden="true">{icon}</span>{body}</li>"#
    )
}

#[must_use]
pub fn profile_card(profile: &Profile) -> String {
    let avatar_class = match profile.account_type {
        AccountType::Organization => "avatar-rounded",
        AccountType::User | AccountType::Other => "avatar-circle",
    };
    let username = escape(&profile.username);

    let mut html = format!(
        r#"<figure class="{avatar_class} img-holder"><img src="{}" width="280" height="280" alt="{username}" class="cover-img"></figure>"#,
        escape(&profile.avatar_url)
    );
    if let Some(name) = &profile.name {
        html.push_str(&format!(r#"<h1 class="title-2">{}</h1>"#, escape(name)));
    }
    html.push_str(&format!(r#"<p class="username text-primary">{username}</p>"#));
    if let Some(bio) = &profile.bio {
        html.push_str(&format!(r#"<p class="bio">{}</p>"#, escape(bio)));
    }
    html.push_str(&format!(
        r#"<a href="{}" target="_blank" class="btn btn-secondary">See On GitHub</a>"#,
        escape(&profile.github_page)
    ));

    html.push_str(r#"<ul class="profile-meta">"#);
    if let Some(location) = &profile.location {
        html.push_str(&meta_item(
            "location_on",
            &format!(r#"<span class="meta-text">{}</span>"#, escape(location)),
        ));
    }
    if let Some(company) = &profile.company {
        html.push_str(&meta_item(
            "apartment",
            &format!(r#"<span class="meta-text">{}</span>"#, escape(company)),
        ));
    }
    if let Some(website) = &profile.website {
        let shown = website.strip_prefix("https://").unwrap_or(website);
        html.push_str(&meta_item(
            "captive_portal",
            &format!(
                r#"<a href="{}" target="_blank" class="meta-text">{}</a>"#,
                escape(website),
                escape(shown)
            ),
        ));
    }
    if let Some(handle) = &profile.social_handle {
        let handle = escape(handle);
        html.push_str(&format!(
            r#"<li class="meta-item social"><a href="https://x.com/{handle}" target="_blank" class="meta-text">@{handle}</a></li>"#
        ));
    }
    html.push_str("</ul>");

    html.push_str(&format!(
        r#"<ul class="profile-stats"><li class="stat-item"><span class="body">{}</span> Repos</li><li class="stat-item"><span class="body">{}</span> Followers</li><li class="stat-item"><span class="body">{}</span> Following</li></ul>"#,
        profile.public_repos,
        number_to_kilo(profile.followers),
        number_to_kilo(profile.following)
    ));
    html
}

#[must_use]
pub fn profile_skeleton() -> String {
    concat!(
        r#"<div class="profile-skeleton">"#,
        r#"<div class="skeleton avatar-skeleton"></div>"#,
        r#"<div class="skeleton title-skeleton"></div>"#,
        r#"<div class="skeleton text-skeleton text-1"></div>"#,
        r#"<div class="skeleton text-skeleton text-2"></div>"#,
        r#"<div class="skeleton text-skeleton text-3"></div>"#,
        "</div>"
    )
    .to_string()
}

#[must_use]
pub fn repo_card(repo: &Repository) -> String {
    let mut html = format!(
        r#"<article class="card repo-card"><div class="card-body"><a href="{}" target="_blank" class="card-title"><h3 class="title-3">{}</h3></a>"#,
        escape(&repo.html_url),
        escape(&repo.name)
    );
    if let Some(description) = &repo.description {
        html.push_str(&format!(r#"<p class="card-text">{}</p>"#, escape(description)));
    }
    let visibility = if repo.is_private { "Private" } else { "Public" };
    html.push_str(&format!(
        r#"<span class="badge">{visibility}</span></div><div class="card-footer">"#
    ));
    if let Some(language) = &repo.language {
        html.push_str(&footer_item("code_blocks", &escape(language)));
    }
    html.push_str(&footer_item("star_rate", &number_to_kilo(repo.stars)));
    html.push_str(&footer_item("family_history", &number_to_kilo(repo.forks)));
    html.push_str("</div></article>");
    html
}

fn footer_item(icon: &str, text: &str) -> String {
    format!(
        r#"<div class="meta-item"><span class="material-symbols-rounded" aria-hidden="true">{icon}</span><span class="span">{text}</span></div>"#
    )
}

#[must_use]
pub fn repo_skeleton() -> String {
    concat!(
        r#"<div class="card repo-skeleton"><div class="card-body">"#,
        r#"<div class="skeleton title-skeleton"></div>"#,
        r#"<div class="skeleton text-skeleton text-1"></div>"#,
        r#"<div class="skeleton text-skeleton text-2"></div>"#,
        r#"</div><div class="card-footer">"#,
        r#"<div class="skeleton text-skeleton"></div>"#,
        r#"<div class="skeleton text-skeleton"></div>"#,
        r#"<div class="skeleton text-skeleton"></div>"#,
        "</div></div>"
    )
    .to_string()
}

#[must_use]
pub fn user_card(user: &UserEntry) -> String {
    let username = escape(&user.username);
    format!(
        r#"<article class="card follower-card"><figure class="avatar-circle img-holder"><img src="{}" alt="{username}" class="cover-img" width="56" height="56" loading="lazy"></figure><h3 class="card-title">{username}</h3><button class="icon-btn" data-profile-url="{}" aria-label="Go to {username} profile"><span class="material-symbols-rounded" aria-hidden="true">link</span></button></article>"#,
        escape(&sized_avatar(&user.avatar_url, 64)),
        escape(&user.profile_url)
    )
}

#[must_use]
pub fn user_skeleton() -> String {
    r#"<div class="card follower-skeleton"><div class="skeleton avatar-skeleton"></div><div class="skeleton title-skeleton"></div></div>"#
        .to_string()
}

#[must_use]
pub fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="error-content"><p class="title-1">Oops! :(</p><p class="text">{}</p></div>"#,
        escape(message)
    )
}

/// Full-page failure notice; hidden unless `visible`.
#[must_use]
pub fn error_overlay(visible: bool) -> String {
    let display = if visible { "grid" } else { "none" };
    let body = if visible {
        format!(
            r#"<h2 class="title-1">Oops! :(</h2><p class="text">{FETCH_FAILED}</p>"#
        )
    } else {
        String::new()
    };
    format!(r#"<section class="error" data-error style="display: {display}">{body}</section>"#)
}

fn panel_content(tab: Tab, content: &PanelContent) -> String {
    match content {
        PanelContent::Blank => String::new(),
        PanelContent::RepoSkeletons(count) => repo_skeleton().repeat(*count),
        PanelContent::UserSkeletons(count) => user_skeleton().repeat(*count),
        PanelContent::Repositories(repos) => {
            let cards: String = repos.iter().map(repo_card).collect();
            format!(r#"<h2 class="sr-only">{}</h2>{cards}"#, panel_heading(tab))
        }
        PanelContent::Users(users) => {
            let cards: String = users.iter().map(user_card).collect();
            format!(r#"<h2 class="sr-only">{}</h2>{cards}"#, panel_heading(tab))
        }
        PanelContent::Empty(message) => empty_state(message),
        PanelContent::Failed => empty_state(FETCH_FAILED),
    }
}

const fn panel_heading(tab: Tab) -> &'static str {
    match tab {
        Tab::Repositories => "Repositories",
        Tab::Forked => "Forked repositories",
        Tab::Followers => "Followers",
        Tab::Following => "Following",
    }
}

#[must_use]
pub fn panel(panel: &Panel) -> String {
    let hidden = if panel.hidden { " hidden" } else { "" };
    format!(
        r#"<div class="tab-panel" id="{}" role="tabpanel" aria-labelledby="tab-{}" data-tab-panel{hidden}>{}</div>"#,
        panel.tab.panel_id(),
        panel.tab.index() + 1,
        panel_content(panel.tab, &panel.content)
    )
}

#[must_use]
pub fn tab_bar(state: &ViewState) -> String {
    let buttons: String = Tab::ALL
        .iter()
        .map(|&tab| {
            let selected = tab == state.active_tab();
            let tabindex = if tab == state.focused_tab() { 0 } else { -1 };
            format!(
                r#"<button class="tab-btn" id="tab-{}" role="tab" aria-selected="{selected}" aria-controls="{}" tabindex="{tabindex}" data-tab-btn>{}</button>"#,
                tab.index() + 1,
                tab.panel_id(),
                tab.label()
            )
        })
        .collect();
    format!(r#"<div class="tab-list" role="tablist" aria-label="Profile details">{buttons}</div>"#)
}

/// The whole document for the current state.
#[must_use]
pub fn page(state: &ViewState) -> String {
    let title = match &state.profile {
        ProfileCard::Loaded(profile) => format!("{} | GitHub profile", escape(&profile.username)),
        ProfileCard::Empty | ProfileCard::Skeleton => "GitHub profile".to_string(),
    };
    let card = match &state.profile {
        ProfileCard::Empty => String::new(),
        ProfileCard::Skeleton => profile_skeleton(),
        ProfileCard::Loaded(profile) => profile_card(profile),
    };
    let panels: String = state.panels().iter().map(panel).collect();

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en" data-theme="{theme}">"#,
            r#"<head><meta charset="UTF-8"><meta name="viewport" content="width=device-width, initial-scale=1.0"><title>{title}</title></head>"#,
            r#"<body><header class="header" data-header><button class="theme-btn" aria-pressed="{pressed}" aria-label="Toggle light and dark theme" data-theme-btn></button></header>"#,
            r#"<main><article class="container"><div class="profile-card" data-profile-card>{card}</div>"#,
            r#"<div class="repo-container">{tabs}{panels}</div></article></main>"#,
            "{error}</body></html>\n"
        ),
        theme = state.theme,
        title = title,
        pressed = state.theme_pressed,
        card = card,
        tabs = tab_bar(state),
        panels = panels,
        error = error_overlay(state.error_visible),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    fn profile() -> Profile {
        Profile {
            username: "octocat".to_string(),
            name: Some("The <Octocat>".to_string()),
            avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
            github_page: "https://github.com/octocat".to_string(),
            bio: None,
            location: Some("San Francisco".to_string()),
            company: None,
            website: Some("https://github.blog".to_string()),
            social_handle: Some("github".to_string()),
            account_type: AccountType::User,
            public_repos: 8,
            followers: 17_250,
            following: 9,
            repos_url: "https://api.github.com/users/octocat/repos".to_string(),
            followers_url: "https://api.github.com/users/octocat/followers".to_string(),
            following_url: "https://api.github.com/users/octocat/following{/other_user}"
                .to_string(),
        }
    }

    fn repository(description: Option<&str>, language: Option<&str>) -> Repository {
        Repository {
            name: "hello-world".to_string(),
            html_url: "https://github.com/octocat/hello-world".to_string(),
            description: description.map(str::to_string),
            is_private: false,
            language: language.map(str::to_string),
            stars: 1_234,
            forks: 56,
            is_fork: false,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_sized_avatar() {
        assert_eq!(sized_avatar("https://a.example/u/1?v=4", 64), "https://a.example/u/1?v=4&s=64");
        assert_eq!(sized_avatar("https://a.example/u/1", 64), "https://a.example/u/1?s=64");
    }

    #[test]
    fn test_profile_card_fields() {
        let html = profile_card(&profile());

        assert!(html.contains("avatar-circle"));
        assert!(html.contains("The &lt;Octocat&gt;"));
        assert!(!html.contains(r#"class="bio""#));
        assert!(html.contains("San Francisco"));
        assert!(!html.contains("apartment"));
        assert!(html.contains(r#">github.blog</a>"#));
        assert!(html.contains(r#"href="https://x.com/github""#));
        assert!(html.contains("@github"));
        assert!(html.contains(r#"<span class="body">8</span> Repos"#));
        assert!(html.contains(r#"<span class="body">17.2k</span> Followers"#));
    }

    #[test]
    fn test_organization_avatar_is_rounded() {
        let mut org = profile();
        org.account_type = AccountType::Organization;
        assert!(profile_card(&org).contains("avatar-rounded"));
    }

    #[test]
    fn test_repo_card_optional_parts() {
        let bare = repo_card(&repository(None, None));
        assert!(!bare.contains("card-text"));
        assert!(!bare.contains("code_blocks"));
        assert!(bare.contains(">Public<"));
        assert!(bare.contains(">1.2k<"));
        assert!(bare.contains(">56<"));

        let full = repo_card(&repository(Some("My first repo"), Some("Rust")));
        assert!(full.contains(r#"<p class="card-text">My first repo</p>"#));
        assert!(full.contains(">Rust<"));
    }

    #[test]
    fn test_private_badge() {
        let mut repo = repository(None, None);
        repo.is_private = true;
        assert!(repo_card(&repo).contains(">Private<"));
    }

    #[test]
    fn test_user_card_links_profile() {
        let html = user_card(&UserEntry {
            username: "hubot".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/480938?v=4".to_string(),
            profile_url: "https://api.github.com/users/hubot".to_string(),
        });
        assert!(html.contains("?v=4&amp;s=64"));
        assert!(html.contains(r#"data-profile-url="https://api.github.com/users/hubot""#));
        assert!(html.contains("Go to hubot profile"));
    }

    #[test]
    fn test_skeleton_counts() {
        let mut panel_state = Panel {
            tab: Tab::Repositories,
            hidden: false,
            content: PanelContent::RepoSkeletons(6),
        };
        assert_eq!(panel(&panel_state).matches("repo-skeleton").count(), 6);

        panel_state.tab = Tab::Followers;
        panel_state.content = PanelContent::UserSkeletons(12);
        assert_eq!(panel(&panel_state).matches("follower-skeleton").count(), 12);
    }

    #[test]
    fn test_hidden_panel_attribute() {
        let hidden = Panel {
            tab: Tab::Forked,
            hidden: true,
            content: PanelContent::Failed,
        };
        let html = panel(&hidden);
        assert!(html.contains(r#"id="panel-2""#));
        assert!(html.contains("data-tab-panel hidden>"));
        assert!(html.contains(FETCH_FAILED));
    }

    #[test]
    fn test_error_overlay_visibility() {
        assert!(error_overlay(false).contains("display: none"));
        let shown = error_overlay(true);
        assert!(shown.contains("display: grid"));
        assert!(shown.contains("Oops! :("));
    }

    #[test]
    fn test_page_reflects_theme_and_tabs() {
        let mut state = ViewState::new(Theme::Light);
        state.select_tab(Tab::Following);
        let html = page(&state);

        assert!(html.contains(r#"data-theme="light""#));
        assert!(html.contains(r#"aria-pressed="false""#));
        assert!(html.contains(r#"id="tab-4" role="tab" aria-selected="true""#));
        assert!(html.contains(r#"id="tab-1" role="tab" aria-selected="false""#));
    }
}
