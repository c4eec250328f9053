//! Lenient markup parsing.
//!
//! A single left-to-right scan builds the node tree while keeping a stack of
//! open elements. Nothing here can fail: constructs the scanner cannot make
//! sense of are either skipped or kept as text.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::entities::decode_entities;
use crate::node::{Document, ElementData, NodeId, NodeKind};
use crate::utilities::is_void;

/// Parse a markup string into a node tree.
///
/// Whitespace-only text between tags is dropped. Unmatched closing tags are
/// ignored, and a tag or declaration that never terminates turns the rest of
/// the input into a single text node.
///
/// # Example
///
/// ```rust
/// use document_decoder::parse;
///
/// let doc = parse(r#"<div class="container" id="main"><p>Hello</p></div>"#);
///
/// let div = doc.query_selector("div").unwrap();
/// assert_eq!(div.attr("id"), Some("main"));
/// assert_eq!(div.inner_html(), "<p>Hello</p>");
/// ```
pub fn parse(markup: &str) -> Document {
    TreeBuilder::new(markup).build()
}

struct TreeBuilder<'a> {
    input: &'a str,
    pos: usize,
    document: Document,
    /// Open elements; the last entry is the insertion point
    open: SmallVec<[NodeId; 16]>,
}

impl<'a> TreeBuilder<'a> {
    fn new(input: &'a str) -> Self {
        let mut open = SmallVec::new();
        open.push(NodeId::ROOT);
        Self {
            input,
            pos: 0,
            document: Document::new(),
            open,
        }
    }

    fn build(mut self) -> Document {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            if !rest.starts_with('<') {
                self.text();
                continue;
            }
            match rest.as_bytes().get(1) {
                Some(b'!' | b'?') => self.declaration(),
                Some(b'/') => self.closing_tag(),
                _ => self.opening_tag(),
            }
        }
        self.document
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn text(&mut self) {
        let end = self.input[self.pos..]
            .find('<')
            .map_or(self.input.len(), |i| self.pos + i);
        let text = &self.input[self.pos..end];

        if !text.trim().is_empty() {
            let content = decode_entities(text).into_owned();
            self.document.append(self.current(), NodeKind::Text(content));
        }
        self.pos = end;
    }

    /// `<!...>` and `<?...>`: doctypes, comments, processing instructions
    fn declaration(&mut self) {
        let mut depth = 0usize;
        let mut end = None;

        for (i, b) in self.input.bytes().enumerate().skip(self.pos + 1) {
            match b {
                b'<' => depth += 1,
                b'>' if depth == 0 => {
                    end = Some(i);
                    break;
                }
                b'>' => depth -= 1,
                _ => {}
            }
        }

        match end {
            Some(end) => self.pos = end + 1,
            None => self.unterminated("declaration"),
        }
    }

    fn closing_tag(&mut self) {
        let start = self.pos + 2;
        let Some(len) = self.input[start..].find('>') else {
            self.unterminated("closing tag");
            return;
        };
        let name = self.input[start..start + len].trim();
        self.pos = start + len + 1;

        let current = self.current();
        let matches_open = current != NodeId::ROOT
            && self
                .document
                .get(current)
                .is_some_and(|node| node.is_tag(name));

        if matches_open {
            self.open.pop();
        } else {
            log::trace!("ignoring unmatched closing tag </{}>", name);
        }
    }

    fn opening_tag(&mut self) {
        let start = self.pos + 1;
        let Some(end) = find_tag_end(self.input, start) else {
            self.unterminated("tag");
            return;
        };
        let body = &self.input[start..end];
        self.pos = end + 1;

        let (name, rest) = match body.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((i, c)) => (&body[..i], &body[i + c.len_utf8()..]),
            None => (body, ""),
        };
        let name = name.strip_suffix('/').unwrap_or(name);
        let self_closing = body.ends_with('/');

        let element = ElementData::new(name, parse_attributes(rest));
        let id = self.document.append(self.current(), NodeKind::Element(element));

        if !self_closing && !is_void(name) {
            self.open.push(id);
        }
    }

    /// Keep the rest of the input as a single text node
    fn unterminated(&mut self, what: &str) {
        log::trace!(
            "unterminated {} at byte {}, keeping remainder as text",
            what,
            self.pos
        );
        let rest = &self.input[self.pos..];
        self.document
            .append(self.current(), NodeKind::Text(rest.to_string()));
        self.pos = self.input.len();
    }
}

/// Find the `>` that ends a tag starting at `start`.
///
/// Quoted spans may contain `>`. A quote that never closes runs to the end
/// of the input, leaving the tag unterminated.
fn find_tag_end(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut quote = None;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i),
            None => {}
        }
    }

    None
}

/// Parse the attribute part of a tag body.
///
/// Values are entity-decoded. A name without `=` gets an empty value, empty
/// names and a stray `/` are skipped, and the last duplicate wins.
fn parse_attributes(source: &str) -> IndexMap<String, String> {
    let mut attributes = IndexMap::new();
    let mut cursor = Cursor::new(source);

    loop {
        cursor.skip_whitespace();
        if cursor.is_eof() {
            break;
        }

        let name = cursor.take_while(|c| c != '=' && !c.is_whitespace());
        cursor.skip_whitespace();

        let mut value = "";
        if cursor.eat('=') {
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(quote @ ('"' | '\'')) => {
                    cursor.bump();
                    value = cursor.take_while(|c| c != quote && c != '>');
                    cursor.eat(quote);
                }
                Some(_) => value = cursor.take_while(|c| !c.is_whitespace() && c != '>'),
                None => {}
            }
        }

        if name.is_empty() || name == "/" {
            continue;
        }
        attributes.insert(name.to_string(), decode_entities(value).into_owned());
    }

    attributes
}

struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}
