//! Runs commands against the browser

use cromrps_core::{CromError, ABOUT};
use cromrps_net::Fetcher;
use cromrps_shell::{Browser, DisplaySurface};
use tracing::{error, info};

use crate::commands::{Command, HELP};

/// What the prompt loop should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Ask the user for a new address
    PromptAddress,
    /// Show a message to the user
    Notice(String),
    Exit,
}

fn notice(err: &CromError) -> Flow {
    error!("{}", err);
    Flow::Notice(format!("[{}] {}", err.title(), err))
}

/// Execute one command.
pub fn dispatch<F: Fetcher>(
    browser: &mut Browser<F>,
    surface: &mut dyn DisplaySurface,
    command: Command,
) -> Flow {
    let result = match command {
        Command::Go(Some(address)) => {
            browser.set_address_text(address);
            browser.go(surface)
        }
        Command::Go(None) => browser.go(surface),
        Command::Open(id) => browser.activate_link(id, surface),
        Command::Reload => browser.reload(surface),
        Command::OpenUrl => return Flow::PromptAddress,
        Command::About => return Flow::Notice(ABOUT.to_string()),
        Command::Help => return Flow::Notice(HELP.to_string()),
        Command::Exit => {
            info!("Exiting");
            return Flow::Exit;
        }
        Command::Invalid(msg) => return Flow::Notice(msg),
        Command::Empty => return Flow::Continue,
    };

    match result {
        Ok(()) => Flow::Continue,
        Err(e) => notice(&e),
    }
}
