//! Commands typed at the prompt

use cromrps_core::LinkId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to the address, or to the address field when `None`
    Go(Option<String>),
    /// Follow a link on the current page
    Open(LinkId),
    Reload,
    /// Show the address field and ask for a new address
    OpenUrl,
    About,
    Help,
    Exit,
    Invalid(String),
    Empty,
}

pub const HELP: &str = "\
Commands:
  <address>        go to an address or search for the text
  go [address]     same, with no address reloads what the address field holds
  <n> | open <n>   follow link [n]
  reload | r       fetch the current page again
  url              edit the address
  about            about CromRPS
  help             this text
  exit | quit      leave";

fn parse_link_id(arg: &str) -> Option<LinkId> {
    arg.trim().parse::<usize>().ok().map(LinkId)
}

/// Parse one line of input.
pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word.to_ascii_lowercase().as_str(), rest) {
        ("go", "") => Command::Go(None),
        ("go", address) => Command::Go(Some(address.to_string())),
        ("open", arg) => match parse_link_id(arg) {
            Some(id) => Command::Open(id),
            None => Command::Invalid(format!("not a link number: {:?}", arg)),
        },
        ("reload" | "r", "") => Command::Reload,
        ("url", "") => Command::OpenUrl,
        ("about", "") => Command::About,
        ("help" | "?", "") => Command::Help,
        ("exit" | "quit" | "q", "") => Command::Exit,
        _ => match parse_link_id(line) {
            Some(id) => Command::Open(id),
            None => Command::Go(Some(line.to_string())),
        },
    }
}
