use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use std::path::{Path, PathBuf};

use ghprofile::api::{GitHubApi, HttpTransport};
use ghprofile::config::Config;
use ghprofile::error_handling;
use ghprofile::interactive::InteractiveBrowser;
use ghprofile::render;
use ghprofile::session::{Tab, ViewState, Viewer};
use ghprofile::theme::{Theme, ThemeStore};
use ghprofile::ui;

#[derive(Parser)]
#[command(name = "ghprofile")]
#[command(about = "GitHub profile viewer")]
#[command(version)]
#[command(
    long_about = "GitHub profile viewer.\n\nLook up a GitHub user and browse their profile, repositories, forks, followers and following.\n\nPages are rendered as standalone HTML with light and dark themes."
)]
struct Cli {
    /// GitHub API base URL (defaults to $GHPROFILE_API_URL or https://api.github.com)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a user's profile page as HTML
    Show {
        /// GitHub username to look up
        username: String,
        /// Tab to open: repositories, forked, followers or following
        #[arg(short, long, default_value = "repositories")]
        tab: Tab,
        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse profiles interactively
    Browse {
        /// Profile to open first (defaults to $GHPROFILE_DEFAULT_USER)
        username: Option<String>,
        /// Keep this HTML file in sync with what is on screen
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change the session theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// dark or light
        theme: Theme,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Show {
            username,
            tab,
            output,
        } => show_profile(&config, &username, tab, output.as_deref()),
        Commands::Browse { username, output } => {
            browse(&config, username.as_deref(), output.as_deref())
        }
        Commands::Theme { action } => handle_theme_command(&config, action.unwrap_or(ThemeCommand::Show)),
    }
}

fn build_viewer(config: &Config) -> Result<Viewer<HttpTransport>> {
    let transport = HttpTransport::new().context("Failed to set up HTTP client")?;
    let api = GitHubApi::new(transport, &config.api_url, config.repo_page_size);
    Ok(Viewer::with_theme_store(api, ThemeStore::new(&config.state_dir)))
}

fn write_page(path: &Path, state: &ViewState) -> Result<()> {
    std::fs::write(path, render::page(state))
        .with_context(|| format!("Failed to write page: {}", path.display()))
}

fn show_profile(config: &Config, username: &str, tab: Tab, output: Option<&Path>) -> Result<()> {
    if username.trim().is_empty() {
        ui::show_error_with_help(
            "Username cannot be empty",
            &["Pass a GitHub login, e.g. 'ghprofile show octocat'"],
        );
        return Err(anyhow::anyhow!("Invalid username"));
    }

    let mut viewer = build_viewer(config)?;

    if let Err(e) = viewer.search(username) {
        if let Some(api_error) = e.downcast_ref::<error_handling::ApiError>() {
            error_handling::show_api_error(api_error);
        }
        return Err(e.context(format!("Failed to load profile '{username}'")));
    }

    if let Some(failure) = &viewer.state().failure {
        error_handling::show_profile_failure(username, failure.status, &failure.body);
        if let Some(path) = output {
            write_page(path, viewer.state())?;
        }
        anyhow::bail!("Failed to fetch profile '{username}'");
    }

    if tab != Tab::Repositories {
        viewer.click_tab(tab)?;
    }

    match output {
        Some(path) => {
            write_page(path, viewer.state())?;
            ui::print_success(&format!("✓ Wrote {} tab for {username} to {}", tab, path.display()));
        }
        None => print!("{}", render::page(viewer.state())),
    }

    Ok(())
}

fn browse(config: &Config, username: Option<&str>, output: Option<&Path>) -> Result<()> {
    let mut viewer = build_viewer(config)?;

    if let Some(path) = output {
        write_page(path, viewer.state())?;
        ui::print_info(&format!("Live page: {}", path.display()));

        let path = path.to_path_buf();
        viewer = viewer.on_change(move |state| {
            if let Err(e) = write_page(&path, state) {
                warn!("{e:#}");
            }
        });
    }

    InteractiveBrowser::new(viewer).run(username.or(config.default_user.as_deref()))
}

fn handle_theme_command(config: &Config, action: ThemeCommand) -> Result<()> {
    let store = ThemeStore::new(&config.state_dir);

    match action {
        ThemeCommand::Show => {
            let theme = store.initial();
            if store.load().is_some() {
                println!("{theme}");
            } else {
                println!("{theme} (default)");
            }
        }
        ThemeCommand::Toggle => {
            let theme = store.initial().toggled();
            store.save(theme)?;
            ui::print_success(&format!("✓ Theme set to {theme}"));
        }
        ThemeCommand::Set { theme } => {
            store.save(theme)?;
            ui::print_success(&format!("✓ Theme set to {theme}"));
        }
    }

    Ok(())
}
