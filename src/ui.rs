use crate::format::number_to_kilo;
use crate::models::{Profile, Repository, UserEntry};
use crate::session::{PanelContent, ProfileCard, Tab, ViewState, FETCH_FAILED};

/// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const PURPLE: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RESET: &'static str = "\x1b[0m";
}

/// Print colored text to stdout
pub fn print_colored(text: &str, color: &str) {
    println!("{}{}{}", color, text, Colors::RESET);
}

/// Print colored text to stderr
pub fn eprint_colored(text: &str, color: &str) {
    eprintln!("{}{}{}", color, text, Colors::RESET);
}

pub fn print_success(text: &str) {
    print_colored(text, Colors::GREEN);
}

pub fn print_error(text: &str) {
    eprint_colored(text, Colors::RED);
}

pub fn print_warning(text: &str) {
    print_colored(text, Colors::YELLOW);
}

pub fn print_info(text: &str) {
    print_colored(text, Colors::BLUE);
}

pub fn print_header(text: &str) {
    print_colored(text, Colors::PURPLE);
}

/// Show a helpful error with suggestions
pub fn show_error_with_help(error: &str, suggestions: &[&str]) {
    print_error(&format!("❌ {error}"));
    eprintln!();
    if !suggestions.is_empty() {
        eprint_colored("💡 Here's how to fix it:", Colors::CYAN);
        for (i, suggestion) in suggestions.iter().enumerate() {
            eprintln!("   {}. {}", i + 1, suggestion);
        }
        eprintln!();
    }
}

/// Plain-text lines for the profile card
#[must_use]
pub fn profile_lines(profile: &Profile) -> Vec<String> {
    let mut lines = Vec::new();
    match &profile.name {
        Some(name) => lines.push(format!("{name} ({})", profile.username)),
        None => lines.push(profile.username.clone()),
    }
    if let Some(bio) = &profile.bio {
        lines.push(bio.clone());
    }
    if let Some(location) = &profile.location {
        lines.push(format!("📍 {location}"));
    }
    if let Some(company) = &profile.company {
        lines.push(format!("🏢 {company}"));
    }
    if let Some(website) = &profile.website {
        lines.push(format!("🔗 {}", website.strip_prefix("https://").unwrap_or(website)));
    }
    if let Some(handle) = &profile.social_handle {
        lines.push(format!("@{handle}"));
    }
    lines.push(format!(
        "{} Repos · {} Followers · {} Following",
        profile.public_repos,
        number_to_kilo(profile.followers),
        number_to_kilo(profile.following)
    ));
    lines.push(profile.github_page.clone());
    lines
}

fn repo_line(repo: &Repository) -> String {
    let visibility = if repo.is_private { "Private" } else { "Public" };
    let language = repo
        .language
        .as_deref()
        .map(|l| format!(" · {l}"))
        .unwrap_or_default();
    format!(
        "{} [{visibility}]{language} · ★ {} · ⑂ {}",
        repo.name,
        number_to_kilo(repo.stars),
        number_to_kilo(repo.forks)
    )
}

fn user_line(index: usize, user: &UserEntry) -> String {
    format!("{}. {}", index + 1, user.username)
}

/// Plain-text lines for the content of one panel
#[must_use]
pub fn panel_lines(content: &PanelContent) -> Vec<String> {
    match content {
        PanelContent::Blank => Vec::new(),
        PanelContent::RepoSkeletons(_) | PanelContent::UserSkeletons(_) => {
            vec!["Loading...".to_string()]
        }
        PanelContent::Repositories(repos) => {
            let mut lines = Vec::new();
            for repo in repos {
                lines.push(repo_line(repo));
                if let Some(description) = &repo.description {
                    lines.push(format!("    {description}"));
                }
            }
            lines
        }
        PanelContent::Users(users) => users
            .iter()
            .enumerate()
            .map(|(i, user)| user_line(i, user))
            .collect(),
        PanelContent::Empty(message) => vec![format!("Oops! :( {message}")],
        PanelContent::Failed => vec![format!("Oops! :( {FETCH_FAILED}")],
    }
}

fn tab_strip(state: &ViewState) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            let label = format!("{}.{}", tab.index() + 1, tab.label());
            if tab == state.active_tab() {
                format!("[{label}]")
            } else if tab == state.focused_tab() {
                format!("<{label}>")
            } else {
                format!(" {label} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the profile card, the tab strip and the active panel
pub fn print_view(state: &ViewState) {
    if state.error_visible {
        print_error(&format!("Oops! :( {FETCH_FAILED}"));
        return;
    }

    match &state.profile {
        ProfileCard::Empty => {}
        ProfileCard::Skeleton => println!("{}Loading profile...{}", Colors::DIM, Colors::RESET),
        ProfileCard::Loaded(profile) => {
            let mut lines = profile_lines(profile).into_iter();
            if let Some(first) = lines.next() {
                print_header(&first);
            }
            for line in lines {
                println!("  {line}");
            }
        }
    }

    println!();
    print_colored(&tab_strip(state), Colors::CYAN);
    for line in panel_lines(&state.panel(state.active_tab()).content) {
        println!("  {line}");
    }
    println!();
}
