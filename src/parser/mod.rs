//! Lenient HTML parsing
//!
//! The parser never fails: anything it cannot recognise as markup is kept as
//! text, so malformed or partial input degrades to a tree with fewer (possibly
//! zero) elements.

pub mod entities;
pub mod serialize;

use std::collections::HashMap;

use tracing::trace;

use self::entities::decode_entities;

/// A node of the parsed tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    /// `<!...>`, e.g. a doctype; stores the text between `<!` and `>`
    Declaration(String),
    /// `<?...>`; stores the text between `<?` and `>`
    ProcessingInstruction(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of the named attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.name)
    }

    pub fn is_raw_text(&self) -> bool {
        is_raw_text_element(&self.name)
    }

}

/// Parsed document: the top-level nodes in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Elements in document order (depth-first, pre-order)
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Serialize the tree back to markup
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        serialize::write_nodes(&self.children, &mut output);
        output
    }

    /// Visible text: every text node concatenated, tags stripped
    pub fn text(&self) -> String {
        let mut output = String::new();
        serialize::collect_text(&self.children, &mut output);
        output
    }
}

/// Pre-order iterator over the elements of a [`Document`]
pub struct Elements<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Node::Element(element) = node {
                self.stack.extend(element.children.iter().rev());
                return Some(element);
            }
        }
        None
    }
}

/// A start tag scanned ahead of the cursor
struct StartTag {
    element: Element,
    self_closing: bool,
    end: usize,
}

pub struct HtmlParser {
    input: Vec<char>,
    pos: usize,
    stack: Vec<Element>,
    root: Vec<Node>,
    /// Index of the last `>`; nothing after it can close a tag
    last_close: Option<usize>,
}

impl HtmlParser {
    pub fn new(html: &str) -> Self {
        let input: Vec<char> = html.chars().collect();
        let last_close = input.iter().rposition(|&ch| ch == '>');
        Self {
            input,
            pos: 0,
            stack: Vec::new(),
            root: Vec::new(),
            last_close,
        }
    }

    pub fn parse(mut self) -> Document {
        while self.pos < self.input.len() {
            if self.input[self.pos] == '<' && self.parse_markup() {
                continue;
            }
            self.parse_text();
        }

        while let Some(element) = self.stack.pop() {
            self.add_node(Node::Element(element));
        }
        Document {
            children: self.root,
        }
    }

    /// Consume text up to the next `<`, always taking at least one character
    fn parse_text(&mut self) {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.input.len() && self.input[self.pos] != '<' {
            self.pos += 1;
        }
        let text: String = self.input[start..self.pos].iter().collect();
        self.add_text(&decode_entities(&text));
    }

    /// Try to consume markup at a `<`. Returns false when the `<` is literal text.
    fn parse_markup(&mut self) -> bool {
        if self.starts_with(self.pos, "<!--") {
            self.parse_comment();
            return true;
        }

        match self.peek(1) {
            Some('!') => self.parse_bracketed(2, Node::Declaration),
            Some('?') => self.parse_bracketed(2, Node::ProcessingInstruction),
            Some('/') => self.parse_end_tag(),
            Some(ch) if ch.is_ascii_alphabetic() => self.parse_start_tag(),
            _ => false,
        }
    }

    fn parse_comment(&mut self) {
        let body_start = self.pos + 4;
        let (body_end, next) = match self.find(body_start, "-->") {
            Some(idx) => (idx, idx + 3),
            None => (self.input.len(), self.input.len()),
        };
        let body: String = self.input[body_start..body_end].iter().collect();
        self.add_node(Node::Comment(body));
        self.pos = next;
    }

    fn parse_bracketed(&mut self, skip: usize, make: fn(String) -> Node) -> bool {
        let body_start = self.pos + skip;
        let Some(close) = self.find_close(body_start) else {
            return false;
        };
        let body: String = self.input[body_start..close].iter().collect();
        self.add_node(make(body));
        self.pos = close + 1;
        true
    }

    fn parse_end_tag(&mut self) -> bool {
        if self.starts_with(self.pos, "</>") {
            self.pos += 3;
            return true;
        }
        if !self.peek(2).is_some_and(|ch| ch.is_ascii_alphabetic()) {
            return false;
        }
        let Some(close) = self.find_close(self.pos + 2) else {
            return false;
        };

        let name_start = self.pos + 2;
        let mut name_end = name_start;
        while name_end < close && !is_tag_name_end(self.input[name_end]) {
            name_end += 1;
        }
        let name: String = self.input[name_start..name_end].iter().collect();
        self.pos = close + 1;
        self.close_tag(&name.to_lowercase());
        true
    }

    fn parse_start_tag(&mut self) -> bool {
        if !self.can_close(self.pos + 1) {
            return false;
        }
        let Some(tag) = self.scan_start_tag(self.pos) else {
            // An incomplete tag is text up to and including the next `>`
            let Some(close) = self.find_close(self.pos + 1) else {
                return false;
            };
            trace!(at = self.pos, "treating incomplete start tag as text");
            let text: String = self.input[self.pos..=close].iter().collect();
            self.add_text(&decode_entities(&text));
            self.pos = close + 1;
            return true;
        };
        self.pos = tag.end;

        let mut element = tag.element;
        if tag.self_closing || element.is_void() {
            self.add_node(Node::Element(element));
        } else if element.is_raw_text() {
            let (content_end, next) = self.find_raw_text_end(&element.name);
            if content_end > self.pos {
                let content: String = self.input[self.pos..content_end].iter().collect();
                element.children.push(Node::Text(content));
            }
            self.pos = next;
            self.add_node(Node::Element(element));
        } else {
            self.stack.push(element);
        }
        true
    }

    /// Scan a start tag beginning at `start` without moving the cursor
    fn scan_start_tag(&self, start: usize) -> Option<StartTag> {
        let mut i = start + 1;
        let name_start = i;
        while i < self.input.len() && !is_tag_name_end(self.input[i]) {
            i += 1;
        }
        let name: String = self.input[name_start..i].iter().collect();
        let mut element = Element::new(name.to_lowercase());
        let mut seen: HashMap<String, usize> = HashMap::new();

        loop {
            i = self.skip_whitespace(i);
            match *self.input.get(i)? {
                '>' => {
                    return Some(StartTag {
                        element,
                        self_closing: false,
                        end: i + 1,
                    });
                }
                '/' if self.peek_at(i + 1) == Some('>') => {
                    return Some(StartTag {
                        element,
                        self_closing: true,
                        end: i + 2,
                    });
                }
                '/' => i += 1,
                _ => {
                    let (name, value, next) = self.scan_attribute(i)?;
                    // A repeated name keeps its position and takes the new value
                    match seen.get(&name) {
                        Some(&idx) => element.attrs[idx].value = value,
                        None => {
                            seen.insert(name.clone(), element.attrs.len());
                            element.attrs.push(Attr { name, value });
                        }
                    }
                    i = next;
                }
            }
        }
    }

    /// Scan `name`, `name=value`, `name="value"` or `name='value'` at `start`
    fn scan_attribute(&self, start: usize) -> Option<(String, String, usize)> {
        let mut i = start + 1;
        while i < self.input.len() && !is_attr_name_end(self.input[i]) {
            i += 1;
        }
        let name: String = self.input[start..i].iter().collect();
        let name = name.to_lowercase();

        let after_name = self.skip_whitespace(i);
        if self.peek_at(after_name) != Some('=') {
            return Some((name, String::new(), i));
        }

        let value_start = self.skip_whitespace(after_name + 1);
        match *self.input.get(value_start)? {
            quote @ ('"' | '\'') => {
                let close = self.find(value_start + 1, &quote.to_string())?;
                let raw: String = self.input[value_start + 1..close].iter().collect();
                Some((name, decode_entities(&raw), close + 1))
            }
            _ => {
                let mut end = value_start;
                while end < self.input.len()
                    && self.input[end] != '>'
                    && !self.input[end].is_whitespace()
                {
                    end += 1;
                }
                let raw: String = self.input[value_start..end].iter().collect();
                Some((name, decode_entities(&raw), end))
            }
        }
    }

    /// Locate `</name` for a raw-text element. Returns where the content ends
    /// and where parsing resumes.
    fn find_raw_text_end(&self, name: &str) -> (usize, usize) {
        let needle: Vec<char> = format!("</{}", name).chars().collect();
        let mut i = self.pos;
        while i + needle.len() <= self.input.len() {
            let matches = self.input[i..i + needle.len()]
                .iter()
                .zip(&needle)
                .all(|(a, b)| a.to_ascii_lowercase() == *b);
            if matches {
                let next = match self.find_close(i + needle.len()) {
                    Some(close) => close + 1,
                    None => self.input.len(),
                };
                return (i, next);
            }
            i += 1;
        }
        (self.input.len(), self.input.len())
    }

    /// Close the most recent open element called `name` and everything opened after it
    fn close_tag(&mut self, name: &str) {
        let Some(idx) = self.stack.iter().rposition(|element| element.name == name) else {
            trace!(tag = name, "ignoring end tag without matching start tag");
            return;
        };
        while self.stack.len() > idx {
            if let Some(element) = self.stack.pop() {
                self.add_node(Node::Element(element));
            }
        }
    }

    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    /// Append text, merging with a directly preceding text node
    fn add_text(&mut self, text: &str) {
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        };
        if let Some(Node::Text(previous)) = siblings.last_mut() {
            previous.push_str(text);
        } else {
            siblings.push(Node::Text(text.to_string()));
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.peek_at(self.pos + offset)
    }

    fn peek_at(&self, idx: usize) -> Option<char> {
        self.input.get(idx).copied()
    }

    fn skip_whitespace(&self, mut idx: usize) -> usize {
        while idx < self.input.len() && self.input[idx].is_whitespace() {
            idx += 1;
        }
        idx
    }

    fn starts_with(&self, idx: usize, pattern: &str) -> bool {
        let mut i = idx;
        for expected in pattern.chars() {
            if self.peek_at(i) != Some(expected) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn find(&self, from: usize, pattern: &str) -> Option<usize> {
        (from..self.input.len()).find(|&idx| self.starts_with(idx, pattern))
    }

    /// Whether any `>` exists at or after `from`
    fn can_close(&self, from: usize) -> bool {
        self.last_close.is_some_and(|last| last >= from)
    }

    /// Next `>` at or after `from`
    fn find_close(&self, from: usize) -> Option<usize> {
        if !self.can_close(from) {
            return None;
        }
        self.input[from..]
            .iter()
            .position(|&ch| ch == '>')
            .map(|offset| from + offset)
    }
}

fn is_tag_name_end(ch: char) -> bool {
    ch.is_whitespace() || ch == '>' || ch == '/'
}

fn is_attr_name_end(ch: char) -> bool {
    ch.is_whitespace() || ch == '>' || ch == '/' || ch == '='
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Parse markup into a [`Document`]. Never fails.
pub fn parse_html(html: &str) -> Document {
    HtmlParser::new(html).parse()
}
