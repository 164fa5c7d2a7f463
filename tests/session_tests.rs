use ghprofile::api::{GitHubApi, HttpResponse, Transport};
use ghprofile::error_handling::ApiError;
use ghprofile::render;
use ghprofile::session::{Key, PanelContent, Tab, Viewer};
use ghprofile::theme::Theme;
use scraper::{Html, Selector};
use serde_json::json;
use std::collections::HashMap;

const BASE: &str = "https://api.example.test";

/// In-memory stand-in for the GitHub API
struct CannedTransport {
    routes: HashMap<String, HttpResponse>,
}

impl CannedTransport {
    fn new() -> Self {
        let mut routes = HashMap::new();
        let mut add = |path: &str, status: u16, body: String| {
            routes.insert(format!("{BASE}{path}"), HttpResponse { status, body });
        };

        add(
            "/users/octocat",
            200,
            json!({
                "login": "octocat",
                "avatar_url": "https://avatars.example.test/octocat",
                "html_url": "https://github.com/octocat",
                "type": "Organization",
                "public_repos": 1,
                "followers": 2_500_000,
                "following": 1,
                "repos_url": format!("{BASE}/users/octocat/repos"),
                "followers_url": format!("{BASE}/users/octocat/followers"),
                "following_url": format!("{BASE}/users/octocat/following{{/other_user}}")
            })
            .to_string(),
        );
        add(
            "/users/octocat/repos?sort=created&per_page=12",
            200,
            json!([{
                "name": "<script>alert(1)</script>",
                "html_url": "https://github.com/octocat/x",
                "private": true,
                "stargazers_count": 999_999,
                "forks_count": 1_000_000,
                "fork": false
            }])
            .to_string(),
        );
        add("/users/octocat/followers", 200, "[]".to_string());
        add(
            "/users/octocat/following",
            502,
            "upstream unavailable".to_string(),
        );

        Self { routes }
    }
}

impl Transport for CannedTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        self.routes.get(url).cloned().ok_or_else(|| ApiError::Transport {
            url: url.to_string(),
            message: "no route".to_string(),
        })
    }
}

fn viewer() -> Viewer<CannedTransport> {
    Viewer::new(GitHubApi::new(CannedTransport::new(), BASE, 12), Theme::Dark)
}

fn unhidden_panels(html: &str) -> usize {
    let document = Html::parse_document(html);
    let panels = Selector::parse("[data-tab-panel]").unwrap();
    document
        .select(&panels)
        .filter(|panel| panel.value().attr("hidden").is_none())
        .count()
}

#[test]
fn test_rendered_page_never_shows_two_panels() {
    let mut viewer = viewer();
    assert_eq!(unhidden_panels(&render::page(viewer.state())), 1);

    viewer.search("octocat").unwrap();
    let script = [
        Tab::Followers,
        Tab::Forked,
        Tab::Following,
        Tab::Repositories,
        Tab::Following,
    ];
    for tab in script {
        viewer.click_tab(tab).unwrap();
        let html = render::page(viewer.state());
        assert_eq!(unhidden_panels(&html), 1, "after clicking {tab}");
        assert!(html.contains(&format!(
            r#"aria-controls="{}" tabindex="0""#,
            tab.panel_id()
        )));
    }
}

#[test]
fn test_page_content_after_search() {
    let mut viewer = viewer();
    viewer.search("octocat").unwrap();
    let html = render::page(viewer.state());

    assert!(html.contains("<title>octocat | GitHub profile</title>"));
    assert!(html.contains("avatar-rounded"));
    assert!(html.contains(r#"<span class="body">2M</span> Followers"#));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains(">Private<"));
    assert!(html.contains(">999k<"));
    assert!(html.contains(">1M<"));
    assert!(html.contains("display: none"));
}

#[test]
fn test_panel_states_after_each_tab() {
    let mut viewer = viewer();
    viewer.search("octocat").unwrap();

    viewer.click_tab(Tab::Followers).unwrap();
    assert_eq!(
        viewer.state().panel(Tab::Followers).content,
        PanelContent::Empty("Doesn't have any followers yet.")
    );

    viewer.click_tab(Tab::Following).unwrap();
    assert_eq!(
        viewer.state().panel(Tab::Following).content,
        PanelContent::Failed
    );

    viewer.click_tab(Tab::Forked).unwrap();
    assert_eq!(
        viewer.state().panel(Tab::Forked).content,
        PanelContent::Empty("Doesn't have any forked repositories yet.")
    );
}

#[test]
fn test_keyboard_focus_is_rendered_as_roving_tabindex() {
    let mut viewer = viewer();
    viewer.key_down(Key::ArrowRight);
    viewer.key_down(Key::ArrowRight);

    let html = render::page(viewer.state());
    let document = Html::parse_document(&html);
    let focusable = Selector::parse(r#"[role="tab"][tabindex="0"]"#).unwrap();
    let tabs: Vec<_> = document.select(&focusable).collect();

    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].value().attr("id"), Some("tab-3"));
    assert_eq!(viewer.state().active_tab(), Tab::Repositories);
}
