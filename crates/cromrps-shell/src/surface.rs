//! Display surfaces pages are painted onto

use cromrps_core::LinkId;
use std::ops::Range;

/// Where rendered pages go.
///
/// A surface is read-only to the user: only the browser writes to it. Link
/// activation is reported back by id, never by href.
pub trait DisplaySurface {
    /// Remove everything currently displayed.
    fn clear(&mut self);

    /// Append plain text.
    fn append_text(&mut self, text: &str);

    /// Append clickable text that activates link `id`.
    fn append_link(&mut self, id: LinkId, text: &str);

    /// Called around the blocking fetch, e.g. to relabel the "Go" button.
    fn set_loading(&mut self, _loading: bool) {}
}

/// Span of a [`TextBuffer`] occupied by one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub id: LinkId,
    pub range: Range<usize>,
}

/// In-memory surface: the full text plus the spans that are links.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    content: String,
    links: Vec<LinkSpan>,
    loading: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }

    pub fn link_spans(&self) -> &[LinkSpan] {
        &self.links
    }

    /// Link under byte offset `offset`, as a click at that position would hit.
    pub fn link_at(&self, offset: usize) -> Option<LinkId> {
        self.links
            .iter()
            .find(|span| span.range.contains(&offset))
            .map(|span| span.id)
    }

    pub fn link_text(&self, id: LinkId) -> Option<&str> {
        self.links
            .iter()
            .find(|span| span.id == id)
            .map(|span| &self.content[span.range.clone()])
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl DisplaySurface for TextBuffer {
    fn clear(&mut self) {
        self.content.clear();
        self.links.clear();
    }

    fn append_text(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn append_link(&mut self, id: LinkId, text: &str) {
        let start = self.content.len();
        self.content.push_str(text);
        self.links.push(LinkSpan {
            id,
            range: start..self.content.len(),
        });
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
