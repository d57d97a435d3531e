//! Browser shell - navigation, rendering, link activation
//!
//! [`Browser`] owns the navigation state and the link table of the page on
//! screen. It normalizes what the user typed, fetches it, and paints the
//! result onto a [`DisplaySurface`]. A failed navigation leaves the surface
//! untouched.

pub mod nav;
pub mod presenter;
pub mod surface;

pub use nav::{normalize, NavigationState};
pub use presenter::{present, DisplayRun, LinkTable, Page};
pub use surface::{DisplaySurface, LinkSpan, TextBuffer};

use cromrps_core::{BrowserConfig, CromError, CromResult, LinkId};
use cromrps_net::{Fetcher, HttpFetcher};

pub struct Browser<F = HttpFetcher> {
    config: BrowserConfig,
    fetcher: F,
    nav: NavigationState,
    /// Contents of the address field
    address: String,
    page: Page,
}

impl Browser<HttpFetcher> {
    /// Create a browser fetching over HTTP.
    pub fn with_http(config: BrowserConfig) -> CromResult<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, fetcher))
    }
}

impl<F: Fetcher> Browser<F> {
    pub fn new(config: BrowserConfig, fetcher: F) -> Self {
        log::info!("Initializing browser shell");

        Self {
            config,
            fetcher,
            nav: NavigationState::new(),
            address: String::new(),
            page: Page::default(),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn address_text(&self) -> &str {
        &self.address
    }

    pub fn set_address_text(&mut self, text: impl Into<String>) {
        self.address = text.into();
    }

    /// Address of the page on screen, if any navigation has succeeded.
    pub fn current_address(&self) -> Option<&str> {
        self.nav.current()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate to whatever is in the address field.
    ///
    /// An empty field falls back to the current address.
    pub fn go(&mut self, surface: &mut dyn DisplaySurface) -> CromResult<()> {
        let input = self.address.trim().to_string();
        if !input.is_empty() {
            return self.navigate(&input, surface);
        }

        match self.nav.current().map(str::to_string) {
            Some(current) => self.navigate(&current, surface),
            None => Err(CromError::empty_input("no address entered")),
        }
    }

    /// Navigate to `input` as if it had been typed into the address field.
    pub fn navigate(&mut self, input: &str, surface: &mut dyn DisplaySurface) -> CromResult<()> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CromError::empty_input("no address entered"));
        }

        let address = normalize(input, &self.config.search_url);
        self.address = address.clone();

        surface.set_loading(true);
        let result = self.fetcher.fetch(&address);
        surface.set_loading(false);

        match result {
            Ok(html) => {
                self.render(&html, surface);
                self.nav.commit(address);
                Ok(())
            }
            Err(e) => {
                log::warn!("Navigation to {} failed: {}", address, e);
                Err(e.into())
            }
        }
    }

    /// Fetch the current address again.
    pub fn reload(&mut self, surface: &mut dyn DisplaySurface) -> CromResult<()> {
        let current = self
            .nav
            .current()
            .map(str::to_string)
            .ok_or_else(CromError::nothing_to_reload)?;

        log::info!("Reloading {}", current);
        self.navigate(&current, surface)
    }

    /// Follow link `id` of the page on screen.
    pub fn activate_link(&mut self, id: LinkId, surface: &mut dyn DisplaySurface) -> CromResult<()> {
        let href = self
            .page
            .links()
            .href(id)
            .map(str::to_string)
            .ok_or(CromError::UnknownLink(id))?;

        log::info!("Following link {} to {}", id, href);
        self.address = href.clone();
        self.navigate(&href, surface)
    }

    /// Tokenize `html`, replace the page on screen with it.
    pub fn render(&mut self, html: &str, surface: &mut dyn DisplaySurface) {
        let page = present(cromrps_html::events(html));
        page.paint(surface);

        log::info!(
            "Rendered {} runs ({} links)",
            page.runs().len(),
            page.links().len()
        );
        self.page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cromrps_net::FetchError;

    fn echo_browser() -> Browser<impl Fetcher> {
        let fetcher =
            |address: &str| -> Result<String, FetchError> { Ok(format!("<p>{}</p>", address)) };
        Browser::new(BrowserConfig::default(), fetcher)
    }

    #[test]
    fn test_navigate_renders_and_commits() {
        let mut browser = echo_browser();
        let mut surface = TextBuffer::new();

        browser.navigate("example.com", &mut surface).unwrap();

        assert_eq!(surface.text(), "http://example.com\n");
        assert_eq!(browser.current_address(), Some("http://example.com"));
        assert_eq!(browser.address_text(), "http://example.com");
        assert!(!surface.is_loading());
    }

    #[test]
    fn test_go_uses_address_field() {
        let mut browser = echo_browser();
        let mut surface = TextBuffer::new();

        browser.set_address_text("  rust lang ");
        browser.go(&mut surface).unwrap();

        assert!(browser.current_address().unwrap().contains("rust%20lang"));
    }

    #[test]
    fn test_go_empty_without_history_is_empty_input() {
        let mut browser = echo_browser();
        let mut surface = TextBuffer::new();

        let err = browser.go(&mut surface).unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_go_empty_falls_back_to_current() {
        let mut browser = echo_browser();
        let mut surface = TextBuffer::new();
        browser.navigate("https://a.org", &mut surface).unwrap();

        browser.set_address_text("");
        browser.go(&mut surface).unwrap();
        assert_eq!(browser.current_address(), Some("https://a.org"));
    }

    #[test]
    fn test_unknown_link() {
        let mut browser = echo_browser();
        let mut surface = TextBuffer::new();

        let err = browser.activate_link(LinkId(3), &mut surface).unwrap_err();
        assert!(matches!(err, CromError::UnknownLink(LinkId(3))));
    }
}
