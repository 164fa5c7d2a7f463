use crate::api::Transport;
use crate::error_handling::{self, ApiError};
use crate::session::{Key, Tab, Viewer};
use crate::ui;
use anyhow::Result;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Tab(Tab),
    Next,
    Prev,
    Enter,
    Open(usize),
    Theme,
    Help,
    Quit,
}

const HELP: &[&str] = &[
    "<username> or search <username>   load a profile",
    "tab <name|1-4>                    switch tab (repositories, forked, followers, following)",
    "next / prev                       move tab focus right / left",
    "enter                             open the focused tab",
    "open <n>                          load the n-th follower/following profile",
    "theme                             toggle light/dark theme",
    "help                              show this list",
    "quit                              leave",
];

/// Prompt loop over a `Viewer`: one line in, one action, updated view out.
pub struct InteractiveBrowser<T> {
    viewer: Viewer<T>,
}

impl<T: Transport> InteractiveBrowser<T> {
    pub const fn new(viewer: Viewer<T>) -> Self {
        Self { viewer }
    }

    pub fn run(&mut self, initial_user: Option<&str>) -> Result<()> {
        ui::print_header("🔍 GitHub Profile Browser");
        ui::print_info("Type 'help' for commands, 'quit' to leave.");
        println!();

        if let Some(username) = initial_user {
            self.dispatch(BrowseCommand::Search(username.to_string()));
        }

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("ghprofile> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(BrowseCommand::Quit)) => break,
                Ok(Some(command)) => self.dispatch(command),
                Err(e) => {
                    ui::print_warning(&e);
                    ui::print_info("Type 'help' to see available commands");
                }
            }
        }

        Ok(())
    }

    /// Run one command; failures are reported and the loop carries on.
    fn dispatch(&mut self, command: BrowseCommand) {
        let result = match command {
            BrowseCommand::Search(username) => self.viewer.search(&username),
            BrowseCommand::Tab(tab) => self.viewer.click_tab(tab),
            BrowseCommand::Next => {
                self.viewer.key_down(Key::ArrowRight);
                Ok(())
            }
            BrowseCommand::Prev => {
                self.viewer.key_down(Key::ArrowLeft);
                Ok(())
            }
            BrowseCommand::Enter => self.viewer.activate_focused(),
            BrowseCommand::Open(position) => match position.checked_sub(1) {
                Some(index) => self.viewer.open_entry(index),
                None => Err(anyhow::anyhow!("Numbers must start from 1")),
            },
            BrowseCommand::Theme => self.viewer.toggle_theme().map(|theme| {
                ui::print_success(&format!("Theme: {theme}"));
            }),
            BrowseCommand::Help => {
                for line in HELP {
                    println!("  {line}");
                }
                return;
            }
            BrowseCommand::Quit => return,
        };

        match result {
            Ok(()) => ui::print_view(self.viewer.state()),
            Err(e) => match e.downcast_ref::<ApiError>() {
                Some(api_error) => error_handling::show_api_error(api_error),
                None => ui::print_error(&format!("{e:#}")),
            },
        }
    }
}

/// Parse one input line. Blank lines parse to `None`; any word that is not a
/// command is taken as a username to search.
pub fn parse_command(input: &str) -> Result<Option<BrowseCommand>, String> {
    let mut parts = input.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let argument = parts.next();
    if parts.next().is_some() {
        return Err(format!("Too many arguments: '{}'", input.trim()));
    }

    let command = match (word.to_lowercase().as_str(), argument) {
        ("search", Some(name)) => BrowseCommand::Search(name.to_string()),
        ("search", None) => return Err("Usage: search <username>".to_string()),
        ("tab", Some(name)) => BrowseCommand::Tab(name.parse().map_err(|e| format!("{e}"))?),
        ("tab", None) => return Err("Usage: tab <name|1-4>".to_string()),
        ("open", Some(position)) => {
            let position: usize = position
                .parse()
                .map_err(|_| format!("Invalid number: '{position}'"))?;
            if position == 0 {
                return Err("Numbers must start from 1".to_string());
            }
            BrowseCommand::Open(position)
        }
        ("open", None) => return Err("Usage: open <n>".to_string()),
        ("next" | "right", None) => BrowseCommand::Next,
        ("prev" | "left", None) => BrowseCommand::Prev,
        ("enter", None) => BrowseCommand::Enter,
        ("theme", None) => BrowseCommand::Theme,
        ("help" | "?", None) => BrowseCommand::Help,
        ("quit" | "exit" | "q", None) => BrowseCommand::Quit,
        (_, None) => BrowseCommand::Search(word.to_string()),
        (_, Some(_)) => return Err(format!("Unknown command: '{word}'")),
    };

    Ok(Some(command))
}
