//! Address normalization and navigation state

use cromrps_core::config::QUERY_PLACEHOLDER;

/// Percent-encode a search query, leaving `/` as is.
fn encode_query(query: &str) -> String {
    query
        .split('/')
        .map(|part| urlencoding::encode(part))
        .collect::<Vec<_>>()
        .join("/")
}

/// Turn what the user typed into a fetchable address.
///
/// Input with a space or without any `.` is a search query; otherwise a
/// missing `http://`/`https://` scheme gets `http://`.
pub fn normalize(input: &str, search_url: &str) -> String {
    let input = input.trim();

    if input.contains(' ') || !input.contains('.') {
        search_url.replace(QUERY_PLACEHOLDER, &encode_query(input))
    } else if !(input.starts_with("http://") || input.starts_with("https://")) {
        format!("http://{}", input)
    } else {
        input.to_string()
    }
}

/// The address of the page currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    current: Option<String>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Record a navigation that fetched and rendered successfully.
    pub fn commit(&mut self, address: String) {
        log::debug!("Current address is now {}", address);
        self.current = Some(address);
    }
}
