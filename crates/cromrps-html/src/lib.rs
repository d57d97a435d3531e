//! # CromRPS HTML
//!
//! Tolerant HTML tokenizer for the CromRPS browser.
//!
//! The [`tokenizer`] splits markup into tags and text runs; [`events`] walks
//! those tokens with a stack of open tags and yields a flat, ordered sequence
//! of [`Event`]s. There is no tree construction and no failure mode: any input
//! produces some (possibly empty) sequence of events.

pub mod events;
pub mod tokenizer;

pub use events::{Event, Events, TextContent, DEFAULT_HREF, IGNORED_TAGS};

use tracing::debug;

/// Lazily tokenize `html` into events.
pub fn events(html: &str) -> Events {
    Events::new(html)
}

/// Tokenize `html` into a vector of events.
pub fn parse(html: &str) -> Vec<Event> {
    let events: Vec<Event> = Events::new(html).collect();
    debug!(input_len = html.len(), events = events.len(), "Tokenized document");
    events
}

/// Tokenize raw bytes, replacing invalid UTF-8 sequences.
pub fn parse_bytes(html: &[u8]) -> Vec<Event> {
    parse(&String::from_utf8_lossy(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parse() {
        let events = parse("<html><body><p>Hello</p></body></html>");
        assert_eq!(events.len(), 7);
    }

    #[test]
    fn test_empty_html() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let events = parse_bytes(b"<p>caf\xff</p>");
        assert!(matches!(
            &events[1],
            Event::Text { content, .. } if content.text().starts_with("caf")
        ));
    }

    #[test]
    fn test_lazy_and_eager_agree() {
        let html = "<ul><li><a href=a>A</a></li><li>B</li></ul>";
        assert_eq!(events(html).collect::<Vec<_>>(), parse(html));
    }
}
