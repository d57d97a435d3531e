//! CromRPS - a barebones terminal web browser.
//!
//! Pages are fetched with one blocking request, reduced to text and links,
//! and printed one run per line. Links are followed by number.
//!
//! ## Usage
//!
//! ```bash
//! # Start on a page
//! cromrps wikipedia.org
//!
//! # Use another config file and more logging
//! cromrps --config ./cromrps.json --log-level debug
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cromrps_core::BrowserConfig;
use cromrps_shell::Browser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod app;
mod commands;
mod terminal;

use app::{dispatch, Flow};
use commands::Command;
use terminal::TerminalSurface;

#[derive(Parser)]
#[command(name = "cromrps")]
#[command(about = "Barebones terminal web browser")]
struct Cli {
    /// Address or search text to open at startup
    url: Option<String>,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "cromrps_net=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    tracing_log::LogTracer::init().context("Failed to set log tracer")?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}

fn read_line(stdin: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config_path = cli.config.unwrap_or_else(BrowserConfig::default_path);
    let config = BrowserConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    info!("Starting {}...", config.window_title);

    let mut surface = TerminalSurface::stdout(&config.window_title);
    let mut browser = Browser::with_http(config)?;
    let mut stdin = io::stdin().lock();

    let mut pending = cli.url.map(|url| Command::Go(Some(url)));
    if pending.is_none() {
        println!("{}", commands::HELP);
    }

    loop {
        let command = match pending.take() {
            Some(command) => command,
            None => {
                let prompt = format!("{}> ", browser.address_text());
                match read_line(&mut stdin, &prompt)? {
                    Some(line) => commands::parse(&line),
                    None => break,
                }
            }
        };

        match dispatch(&mut browser, &mut surface, command) {
            Flow::Continue => {}
            Flow::PromptAddress => {
                let prompt = format!("Address [{}]: ", browser.address_text());
                if let Some(line) = read_line(&mut stdin, &prompt)? {
                    let line = line.trim();
                    pending = Some(if line.is_empty() {
                        Command::Go(None)
                    } else {
                        Command::Go(Some(line.to_string()))
                    });
                }
            }
            Flow::Notice(message) => println!("{}", message),
            Flow::Exit => break,
        }
    }

    info!("Goodbye");
    Ok(())
}
