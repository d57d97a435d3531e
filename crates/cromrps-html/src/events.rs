//! Flat structure/text events.
//!
//! Walks the token stream with an explicit stack of open tags and turns it
//! into the events the presenter consumes. Subtrees of ignored elements are
//! dropped, text is trimmed, and text directly inside an anchor carries the
//! anchor's href.

use crate::tokenizer::{Token, Tokenizer};
use std::collections::HashMap;
use tracing::trace;

/// Elements whose whole subtree is left out of the event stream.
pub const IGNORED_TAGS: [&str; 4] = ["option", "select", "script", "style"];

/// Href used for anchors that have none.
pub const DEFAULT_HREF: &str = "#";

fn is_ignored(name: &str) -> bool {
    IGNORED_TAGS.contains(&name)
}

/// Content of a text event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Plain(String),
    /// Text whose nearest open tag is `a`
    Link { text: String, href: String },
}

impl TextContent {
    pub fn text(&self) -> &str {
        match self {
            TextContent::Plain(text) => text,
            TextContent::Link { text, .. } => text,
        }
    }
}

/// One structural or textual unit of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartTag {
        name: String,
        attrs: HashMap<String, String>,
    },
    EndTag {
        name: String,
    },
    Text {
        /// Name of the nearest open tag
        scope: String,
        content: TextContent,
    },
}

/// Iterator over the events of one document.
pub struct Events {
    tokens: Tokenizer,
    open_tags: Vec<String>,
    /// Number of ignored elements currently on `open_tags`
    ignored_depth: usize,
    current_href: Option<String>,
}

impl Events {
    pub fn new(html: &str) -> Self {
        Self {
            tokens: Tokenizer::new(html),
            open_tags: Vec::new(),
            ignored_depth: 0,
            current_href: None,
        }
    }

    fn start_tag(&mut self, name: String, attrs: HashMap<String, String>) -> Option<Event> {
        if is_ignored(&name) || self.ignored_depth > 0 {
            if is_ignored(&name) {
                self.ignored_depth += 1;
            }
            self.open_tags.push(name);
            return None;
        }

        if name == "a" {
            // A nested anchor overwrites the outer one's href
            self.current_href = Some(
                attrs
                    .get("href")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_HREF.to_string()),
            );
        }
        self.open_tags.push(name.clone());
        Some(Event::StartTag { name, attrs })
    }

    fn end_tag(&mut self, name: String) -> Option<Event> {
        let suppressed = self.ignored_depth > 0;

        let open = if is_ignored(&name) {
            self.open_tags.iter().rposition(|tag| *tag == name)
        } else {
            None
        };

        match open {
            // Closing an ignored element also closes anything left open
            // inside it, e.g. `<option>`s without end tags
            Some(pos) => {
                self.open_tags.truncate(pos);
                self.ignored_depth = self.open_tags.iter().filter(|t| is_ignored(t)).count();
            }
            // Otherwise pops whatever is on top, matching or not
            None => {
                if let Some(popped) = self.open_tags.pop() {
                    if is_ignored(&popped) {
                        self.ignored_depth -= 1;
                    }
                }
            }
        }

        if suppressed || is_ignored(&name) {
            return None;
        }

        if name == "a" {
            self.current_href = None;
        }
        Some(Event::EndTag { name })
    }

    fn text(&self, data: &str) -> Option<Event> {
        let scope = self.open_tags.last()?;
        if self.ignored_depth > 0 || is_ignored(scope) {
            return None;
        }

        let text = data.trim();
        if text.is_empty() {
            return None;
        }

        let content = if scope == "a" {
            TextContent::Link {
                text: text.to_string(),
                href: self
                    .current_href
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HREF.to_string()),
            }
        } else {
            TextContent::Plain(text.to_string())
        };

        Some(Event::Text {
            scope: scope.clone(),
            content,
        })
    }

    fn process(&mut self, token: Token) -> Option<Event> {
        match token {
            Token::StartTag { name, attrs, .. } => self.start_tag(name, attrs),
            Token::EndTag { name } => self.end_tag(name),
            Token::Text(data) => self.text(&data),
            Token::Comment(_) | Token::Declaration(_) => None,
        }
    }
}

impl Iterator for Events {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            let Some(token) = self.tokens.next() else {
                if !self.open_tags.is_empty() {
                    trace!(unclosed = self.open_tags.len(), "Discarding unclosed tags");
                    self.open_tags.clear();
                    self.ignored_depth = 0;
                }
                return None;
            };
            if let Some(event) = self.process(token) {
                return Some(event);
            }
        }
    }
}
