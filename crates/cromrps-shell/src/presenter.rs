//! Turns tokenizer events into display runs.
//!
//! Only link-vs-plain matters here: tags carry no styling, nesting or
//! indentation, and every run is painted on its own line.

use crate::surface::DisplaySurface;
use cromrps_core::LinkId;
use cromrps_html::{Event, TextContent};

/// One renderable unit of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRun {
    Plain(String),
    Link {
        id: LinkId,
        text: String,
        href: String,
    },
}

/// Hrefs of a page's links, indexed by [`LinkId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    hrefs: Vec<String>,
}

impl LinkTable {
    fn register(&mut self, href: String) -> LinkId {
        let id = LinkId(self.hrefs.len());
        self.hrefs.push(href);
        id
    }

    pub fn href(&self, id: LinkId) -> Option<&str> {
        self.hrefs.get(id.raw()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hrefs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LinkId, &str)> {
        self.hrefs
            .iter()
            .enumerate()
            .map(|(i, href)| (LinkId(i), href.as_str()))
    }
}

/// The result of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    runs: Vec<DisplayRun>,
    links: LinkTable,
}

impl Page {
    pub fn runs(&self) -> &[DisplayRun] {
        &self.runs
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Replace the surface's contents with this page, one run per line.
    pub fn paint(&self, surface: &mut dyn DisplaySurface) {
        surface.clear();
        for run in &self.runs {
            match run {
                DisplayRun::Plain(text) => surface.append_text(text),
                DisplayRun::Link { id, text, .. } => surface.append_link(*id, text),
            }
            surface.append_text("\n");
        }
    }
}

/// Build the display runs for a sequence of events.
///
/// Link ids start at 0 and follow the order link text appears in.
pub fn present<I>(events: I) -> Page
where
    I: IntoIterator<Item = Event>,
{
    let mut page = Page::default();

    for event in events {
        let Event::Text { content, .. } = event else {
            continue;
        };

        match content {
            TextContent::Link { text, href } => {
                if text.is_empty() {
                    continue;
                }
                let id = page.links.register(href.clone());
                page.runs.push(DisplayRun::Link { id, text, href });
            }
            TextContent::Plain(text) => page.runs.push(DisplayRun::Plain(text)),
        }
    }

    page
}
