//! HTML tokenizer.
//!
//! A small character-level state machine that splits markup into tags, text
//! runs, comments and declarations. It never fails: anything it cannot make
//! sense of is either kept as text or swallowed as a bogus comment.

use std::collections::{HashMap, VecDeque};

/// Elements whose contents are raw text up to the matching end tag.
const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

/// Token types emitted by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start tag (e.g., `<div>` or `<img />`)
    StartTag {
        name: String,
        attrs: HashMap<String, String>,
        self_closing: bool,
    },
    /// End tag (e.g., `</div>`)
    EndTag { name: String },
    /// A run of character data between two pieces of markup
    Text(String),
    /// `<!-- ... -->`, or a malformed construct treated as one
    Comment(String),
    /// `<!DOCTYPE ...>` and `<? ... >`
    Declaration(String),
}

/// Tokenization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    TagOpen,
    TagName,
    EndTagOpen,
    EndTagName,
    AfterEndTagName,
    SelfClosingStartTag,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    MarkupDeclarationOpen,
    Comment,
    BogusComment,
    RawText,
}

/// HTML tokenizer.
///
/// Tokens are produced lazily through [`Iterator`]; the sequence is finite and
/// cannot be restarted.
pub struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    /// Element whose body is currently being read as raw text
    raw_text_tag: String,
    text: String,
    current_tag_name: String,
    current_attrs: HashMap<String, String>,
    current_attr_name: String,
    current_attr_value: String,
    self_closing: bool,
    current_comment: String,
    bogus_is_declaration: bool,
    queue: VecDeque<Token>,
    finished: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            state: State::Data,
            raw_text_tag: String::new(),
            text: String::new(),
            current_tag_name: String::new(),
            current_attrs: HashMap::new(),
            current_attr_name: String::new(),
            current_attr_value: String::new(),
            self_closing: false,
            current_comment: String::new(),
            bogus_is_declaration: false,
            queue: VecDeque::new(),
            finished: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.current_char();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn emit(&mut self, token: Token) {
        self.queue.push_back(token);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.emit(Token::Text(text));
        }
    }

    fn emit_current_comment(&mut self) {
        let comment = std::mem::take(&mut self.current_comment);
        if self.bogus_is_declaration {
            self.emit(Token::Declaration(comment));
        } else {
            self.emit(Token::Comment(comment));
        }
        self.bogus_is_declaration = false;
    }

    fn emit_current_attr(&mut self) {
        if !self.current_attr_name.is_empty() {
            let name = std::mem::take(&mut self.current_attr_name);
            let value = std::mem::take(&mut self.current_attr_value);
            // Later duplicates replace earlier ones
            self.current_attrs.insert(name, value);
        }
        self.current_attr_value.clear();
    }

    fn start_attr(&mut self, ch: char) {
        self.current_attr_name.clear();
        self.current_attr_value.clear();
        self.current_attr_name.push(ch.to_ascii_lowercase());
        self.state = State::AttributeName;
    }

    fn emit_current_tag(&mut self) {
        self.emit_current_attr();
        let name = std::mem::take(&mut self.current_tag_name);
        let attrs = std::mem::take(&mut self.current_attrs);
        let self_closing = std::mem::replace(&mut self.self_closing, false);

        self.state = State::Data;
        if name.is_empty() {
            return;
        }

        if !self_closing && RAW_TEXT_TAGS.contains(&name.as_str()) {
            self.raw_text_tag = name.clone();
            self.state = State::RawText;
        }

        self.emit(Token::StartTag {
            name: name.clone(),
            attrs,
            self_closing,
        });
        // `<br/>` reads as `<br></br>`
        if self_closing {
            self.emit(Token::EndTag { name });
        }
    }

    fn emit_current_end_tag(&mut self) {
        self.state = State::Data;
        if !self.current_tag_name.is_empty() {
            let name = std::mem::take(&mut self.current_tag_name);
            self.emit(Token::EndTag { name });
        }
    }

    /// Advance the state machine by one step. Every step consumes input or
    /// moves to a state that will.
    fn step(&mut self) {
        match self.state {
            State::Data => self.state_data(),
            State::TagOpen => self.state_tag_open(),
            State::TagName => self.state_tag_name(),
            State::EndTagOpen => self.state_end_tag_open(),
            State::EndTagName => self.state_end_tag_name(),
            State::AfterEndTagName => self.state_after_end_tag_name(),
            State::SelfClosingStartTag => self.state_self_closing_start_tag(),
            State::BeforeAttributeName => self.state_before_attribute_name(),
            State::AttributeName => self.state_attribute_name(),
            State::AfterAttributeName => self.state_after_attribute_name(),
            State::BeforeAttributeValue => self.state_before_attribute_value(),
            State::AttributeValueDoubleQuoted => self.state_attribute_value_quoted('"'),
            State::AttributeValueSingleQuoted => self.state_attribute_value_quoted('\''),
            State::AttributeValueUnquoted => self.state_attribute_value_unquoted(),
            State::MarkupDeclarationOpen => self.state_markup_declaration_open(),
            State::Comment => self.state_comment(),
            State::BogusComment => self.state_bogus_comment(),
            State::RawText => self.state_rawtext(),
        }
    }

    /// Wrap up whatever construct the input ended in.
    fn finish(&mut self) {
        match self.state {
            State::Data | State::RawText => {}
            State::TagOpen => self.text.push('<'),
            State::EndTagOpen => self.text.push_str("</"),
            State::EndTagName | State::AfterEndTagName => self.emit_current_end_tag(),
            State::TagName
            | State::SelfClosingStartTag
            | State::BeforeAttributeName
            | State::AttributeName
            | State::AfterAttributeName
            | State::BeforeAttributeValue
            | State::AttributeValueDoubleQuoted
            | State::AttributeValueSingleQuoted
            | State::AttributeValueUnquoted => self.emit_current_tag(),
            State::MarkupDeclarationOpen | State::Comment | State::BogusComment => {
                self.emit_current_comment()
            }
        }
        self.flush_text();
        self.finished = true;
    }

    fn state_data(&mut self) {
        match self.consume() {
            Some('<') => self.state = State::TagOpen,
            Some(ch) => self.text.push(ch),
            None => {}
        }
    }

    fn state_tag_open(&mut self) {
        match self.current_char() {
            Some('!') => {
                self.consume();
                self.flush_text();
                self.state = State::MarkupDeclarationOpen;
            }
            Some('/') => {
                self.consume();
                self.state = State::EndTagOpen;
            }
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.flush_text();
                self.current_tag_name.clear();
                self.current_attrs.clear();
                self.self_closing = false;
                self.state = State::TagName;
            }
            Some('?') => {
                self.consume();
                self.flush_text();
                self.bogus_is_declaration = true;
                self.state = State::BogusComment;
            }
            _ => {
                // Not markup after all
                self.text.push('<');
                self.state = State::Data;
            }
        }
    }

    fn state_tag_name(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() => self.state = State::BeforeAttributeName,
            Some('/') => self.state = State::SelfClosingStartTag,
            Some('>') => self.emit_current_tag(),
            Some(ch) => self.current_tag_name.push(ch.to_ascii_lowercase()),
            None => {}
        }
    }

    fn state_end_tag_open(&mut self) {
        match self.current_char() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                self.flush_text();
                self.current_tag_name.clear();
                self.state = State::EndTagName;
            }
            Some('>') => {
                // `</>` is dropped entirely
                self.consume();
                self.flush_text();
                self.state = State::Data;
            }
            _ => {
                self.flush_text();
                self.state = State::BogusComment;
            }
        }
    }

    fn state_end_tag_name(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() || ch == '/' => {
                self.state = State::AfterEndTagName;
            }
            Some('>') => self.emit_current_end_tag(),
            Some(ch) => self.current_tag_name.push(ch.to_ascii_lowercase()),
            None => {}
        }
    }

    fn state_after_end_tag_name(&mut self) {
        // Attributes on end tags are ignored
        if let Some('>') = self.consume() {
            self.emit_current_end_tag();
        }
    }

    fn state_self_closing_start_tag(&mut self) {
        match self.current_char() {
            Some('>') => {
                self.consume();
                self.self_closing = true;
                self.emit_current_tag();
            }
            _ => self.state = State::BeforeAttributeName,
        }
    }

    fn state_before_attribute_name(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() => {}
            Some('/') => self.state = State::SelfClosingStartTag,
            Some('>') => self.emit_current_tag(),
            Some(ch) => self.start_attr(ch),
            None => {}
        }
    }

    fn state_attribute_name(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() => self.state = State::AfterAttributeName,
            Some('/') => {
                self.emit_current_attr();
                self.state = State::SelfClosingStartTag;
            }
            Some('=') => self.state = State::BeforeAttributeValue,
            Some('>') => self.emit_current_tag(),
            Some(ch) => self.current_attr_name.push(ch.to_ascii_lowercase()),
            None => {}
        }
    }

    fn state_after_attribute_name(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() => {}
            Some('/') => {
                self.emit_current_attr();
                self.state = State::SelfClosingStartTag;
            }
            Some('=') => self.state = State::BeforeAttributeValue,
            Some('>') => self.emit_current_tag(),
            Some(ch) => {
                // Previous attribute had no value
                self.emit_current_attr();
                self.start_attr(ch);
            }
            None => {}
        }
    }

    fn state_before_attribute_value(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() => {}
            Some('"') => self.state = State::AttributeValueDoubleQuoted,
            Some('\'') => self.state = State::AttributeValueSingleQuoted,
            Some('>') => self.emit_current_tag(),
            Some(ch) => {
                self.current_attr_value.push(ch);
                self.state = State::AttributeValueUnquoted;
            }
            None => {}
        }
    }

    fn state_attribute_value_quoted(&mut self, quote: char) {
        match self.consume() {
            Some(ch) if ch == quote => {
                self.emit_current_attr();
                self.state = State::BeforeAttributeName;
            }
            Some(ch) => self.current_attr_value.push(ch),
            None => {}
        }
    }

    fn state_attribute_value_unquoted(&mut self) {
        match self.consume() {
            Some(ch) if ch.is_ascii_whitespace() => {
                self.emit_current_attr();
                self.state = State::BeforeAttributeName;
            }
            Some('>') => self.emit_current_tag(),
            Some(ch) => self.current_attr_value.push(ch),
            None => {}
        }
    }

    fn state_markup_declaration_open(&mut self) {
        self.current_comment.clear();
        if self.current_char() == Some('-') && self.peek_char(1) == Some('-') {
            self.consume();
            self.consume();
            self.state = State::Comment;
        } else {
            // DOCTYPE and friends
            self.bogus_is_declaration = true;
            self.state = State::BogusComment;
        }
    }

    fn state_comment(&mut self) {
        match self.consume() {
            Some('-') if self.current_char() == Some('-') && self.peek_char(1) == Some('>') => {
                self.consume();
                self.consume();
                self.emit_current_comment();
                self.state = State::Data;
            }
            Some(ch) => self.current_comment.push(ch),
            None => {}
        }
    }

    fn state_bogus_comment(&mut self) {
        match self.consume() {
            Some('>') => {
                self.emit_current_comment();
                self.state = State::Data;
            }
            Some(ch) => self.current_comment.push(ch),
            None => {}
        }
    }

    fn state_rawtext(&mut self) {
        match self.consume() {
            Some('<') if self.current_char() == Some('/') && self.matches_end_tag(1) => {
                self.consume(); // '/'
                for _ in 0..self.raw_text_tag.chars().count() {
                    self.consume();
                }
                // Skip to the closing '>'
                while let Some(ch) = self.consume() {
                    if ch == '>' {
                        break;
                    }
                }
                self.flush_text();
                self.current_tag_name = std::mem::take(&mut self.raw_text_tag);
                self.emit_current_end_tag();
            }
            Some(ch) => self.text.push(ch),
            None => {}
        }
    }

    /// Whether the input `offset` chars ahead spells the raw text element's
    /// name followed by whitespace, `/` or `>`.
    fn matches_end_tag(&self, offset: usize) -> bool {
        if self.raw_text_tag.is_empty() {
            return false;
        }

        let mut len = 0;
        for (i, expected_ch) in self.raw_text_tag.chars().enumerate() {
            match self.peek_char(offset + i) {
                Some(ch) if ch.to_ascii_lowercase() == expected_ch => len += 1,
                _ => return false,
            }
        }

        matches!(
            self.peek_char(offset + len),
            Some(ch) if ch.is_ascii_whitespace() || ch == '/' || ch == '>'
        )
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            if self.pos >= self.input.len() {
                self.finish();
            } else {
                self.step();
            }
        }
    }
}

/// Tokenize HTML input.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn end(name: &str) -> Token {
        Token::EndTag {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_simple_tag() {
        let tokens = tokenize("<div></div>");
        assert!(matches!(tokens[0], Token::StartTag { ref name, .. } if name == "div"));
        assert_eq!(tokens[1], end("div"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_self_closing_tag_emits_end_tag() {
        let tokens = tokenize("<br/>");
        assert!(matches!(
            tokens[0],
            Token::StartTag { ref name, self_closing: true, .. } if name == "br"
        ));
        assert_eq!(tokens[1], end("br"));
    }

    #[test]
    fn test_attributes() {
        let tokens = tokenize("<div id=\"test\" class='foo'></div>");
        if let Token::StartTag { name, attrs, .. } = &tokens[0] {
            assert_eq!(name, "div");
            assert_eq!(attrs.get("id"), Some(&"test".to_string()));
            assert_eq!(attrs.get("class"), Some(&"foo".to_string()));
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let tokens = tokenize("<a href=one href=two>");
        if let Token::StartTag { attrs, .. } = &tokens[0] {
            assert_eq!(attrs.get("href"), Some(&"two".to_string()));
            assert_eq!(attrs.len(), 1);
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_text_is_one_run() {
        let tokens = tokenize("<p>Hello World</p>");
        assert_eq!(tokens[1], text("Hello World"));
    }

    #[test]
    fn test_no_entity_decoding() {
        let tokens = tokenize("<p>a &amp; b</p><a href=\"?x=1&amp;y=2\">");
        assert_eq!(tokens[1], text("a &amp; b"));
        if let Token::StartTag { attrs, .. } = &tokens[3] {
            assert_eq!(attrs.get("href"), Some(&"?x=1&amp;y=2".to_string()));
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_comment() {
        let tokens = tokenize("a<!-- comment -->b");
        assert_eq!(
            tokens,
            vec![text("a"), Token::Comment(" comment ".to_string()), text("b")]
        );
    }

    #[test]
    fn test_doctype_and_processing_instruction() {
        let tokens = tokenize("<!DOCTYPE html><?xml version=\"1.0\"?>");
        assert_eq!(tokens[0], Token::Declaration("DOCTYPE html".to_string()));
        assert!(matches!(tokens[1], Token::Declaration(_)));
    }

    #[test]
    fn test_uppercase_names_lowercased() {
        let tokens = tokenize("<DIV CLASS=x></DiV>");
        if let Token::StartTag { name, attrs, .. } = &tokens[0] {
            assert_eq!(name, "div");
            assert!(attrs.contains_key("class"));
        } else {
            panic!("Expected StartTag");
        }
        assert_eq!(tokens[1], end("div"));
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let tokens = tokenize("<p>1 < 2</p>");
        assert_eq!(tokens[1], text("1 < 2"));
    }

    #[test]
    fn test_script_body_is_raw() {
        let tokens = tokenize("<script>if (a<b) { x = '<p>'; }</script><p>after</p>");
        assert_eq!(tokens[1], text("if (a<b) { x = '<p>'; }"));
        assert_eq!(tokens[2], end("script"));
        assert!(matches!(tokens[3], Token::StartTag { ref name, .. } if name == "p"));
    }

    #[test]
    fn test_style_end_tag_case_insensitive() {
        let tokens = tokenize("<style>p{}</STYLE >x");
        assert_eq!(tokens[1], text("p{}"));
        assert_eq!(tokens[2], end("style"));
        assert_eq!(tokens[3], text("x"));
    }

    #[test]
    fn test_end_tag_attributes_ignored() {
        let tokens = tokenize("</a foo=bar>");
        assert_eq!(tokens, vec![end("a")]);
    }

    #[test]
    fn test_empty_end_tag_dropped() {
        assert_eq!(tokenize("a</>b"), vec![text("a"), text("b")]);
    }

    #[test]
    fn test_trailing_text_flushed() {
        let tokens = tokenize("<div><p>Hi");
        assert_eq!(tokens.last(), Some(&text("Hi")));
    }

    #[test]
    fn test_truncated_tag_still_emitted() {
        let tokens = tokenize("<a href='x");
        if let Token::StartTag { name, attrs, .. } = &tokens[0] {
            assert_eq!(name, "a");
            assert_eq!(attrs.get("href"), Some(&"x".to_string()));
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_malformed_tag() {
        let tokens = tokenize("<div<p>");
        // Should recover gracefully
        assert!(!tokens.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_valueless_attribute() {
        let tokens = tokenize("<input type=\"text\" disabled name=foo>");
        if let Token::StartTag { attrs, .. } = &tokens[0] {
            assert_eq!(attrs.len(), 3);
            assert_eq!(attrs.get("disabled"), Some(&"".to_string()));
            assert_eq!(attrs.get("name"), Some(&"foo".to_string()));
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_nested_tags() {
        let tokens = tokenize("<div><span><b>text</b></span></div>");
        let tag_names: Vec<String> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::StartTag { name, .. } => Some(name.clone()),
                Token::EndTag { name } => Some(name.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(tag_names, vec!["div", "span", "b", "b", "span", "div"]);
    }
}
