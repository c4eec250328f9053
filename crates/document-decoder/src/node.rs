//! Node tree produced by the parser.
//!
//! Nodes live in an arena owned by [`Document`] and refer to each other by
//! [`NodeId`]. A node owns the ordered list of its children's ids; the parent
//! link is a plain index used for navigation only, so the tree has no
//! reference cycles.
//!
//! [`NodeRef`] pairs an id with a borrow of its document and carries the read
//! API: tag and attribute lookup, class tokens, selection by tag name and
//! serialization back to markup.

use std::fmt;

use indexmap::IndexMap;

use crate::utilities::{class_tokens, escape_attribute, escape_text, is_void};

/// Index of a node within its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// The three kinds of node in a parsed tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The root; has children but no name or text
    Document,
    Element(ElementData),
    /// Decoded text content
    Text(String),
}

/// Name and attributes of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: String,
    attributes: IndexMap<String, String>,
}

impl ElementData {
    pub fn new(name: impl Into<String>, attributes: IndexMap<String, String>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Tag name as written in the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check the tag name, ignoring ASCII case
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value by name.
    ///
    /// An exact match is preferred; otherwise names are compared ignoring
    /// ASCII case.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Tokens of the `class` attribute
    pub fn class_list(&self) -> Vec<&str> {
        self.attr("class").map(|c| class_tokens(c).collect()).unwrap_or_default()
    }

    /// Check for a class token (case-sensitive, whole token)
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| class_tokens(c).any(|token| token == class))
    }

    /// Check if this element can never have children
    pub fn is_void(&self) -> bool {
        is_void(&self.name)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed markup tree.
///
/// Built once by [`parse`](crate::parse) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create a document holding only the root node
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Append a new node as the last child of `parent`
    pub(crate) fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: NodeId::ROOT,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { document: self, id })
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in creation order, which is document order
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |i| NodeRef {
            document: self,
            id: NodeId(i),
        })
    }

    /// First element with the given tag name, depth-first
    pub fn query_selector(&self, tag: &str) -> Option<NodeRef<'_>> {
        self.root().query_selector(tag)
    }

    /// All elements with the given tag name, depth-first
    pub fn query_selector_all(&self, tag: &str) -> Vec<NodeRef<'_>> {
        self.root().query_selector_all(tag)
    }

    pub fn text_content(&self) -> String {
        self.root().text_content()
    }

    /// Serialize the whole tree back to markup
    pub fn to_html(&self) -> String {
        self.root().inner_html()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A node together with the document it belongs to
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.document.data(self.id).kind
    }

    pub fn is_document(&self) -> bool {
        matches!(self.kind(), NodeKind::Document)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    pub fn element(&self) -> Option<&'a ElementData> {
        match self.kind() {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Content of a text node
    pub fn text(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Tag name as written in the source
    pub fn name(&self) -> Option<&'a str> {
        self.element().map(ElementData::name)
    }

    /// Tag name, lowercased
    pub fn tag_name(&self) -> Option<String> {
        self.name().map(str::to_lowercase)
    }

    /// Check the tag name, ignoring ASCII case
    pub fn is_tag(&self, tag: &str) -> bool {
        self.element().is_some_and(|e| e.is(tag))
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element()?.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.element().is_some_and(|e| e.has_class(class))
    }

    pub fn class_list(&self) -> Vec<&'a str> {
        self.element().map(ElementData::class_list).unwrap_or_default()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.document.data(self.id).parent?;
        Some(NodeRef {
            document: self.document,
            id: parent,
        })
    }

    /// Parent, grandparent and so on up to the document
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> {
        let document = self.document;
        document
            .data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { document, id })
    }

    /// Only element children
    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> {
        self.children().filter(|n| n.is_element())
    }

    /// This node and its descendants in depth-first pre-order
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants { stack: vec![*self] }
    }

    /// First element (this node included) with the given tag name
    pub fn query_selector(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.descendants().find(|n| n.is_tag(tag))
    }

    /// All elements (this node included) with the given tag name
    pub fn query_selector_all(&self, tag: &str) -> Vec<NodeRef<'a>> {
        self.descendants().filter(|n| n.is_tag(tag)).collect()
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        self.descendants().filter_map(|n| n.text()).collect()
    }

    /// Reconstruct outer HTML
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Reconstruct inner HTML
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            child.write_html(&mut out);
        }
        out
    }

    /// Serialize this subtree; iterative, nesting depth is not limited by the
    /// call stack
    fn write_html(&self, out: &mut String) {
        let mut stack = vec![HtmlStep::Open(*self)];

        while let Some(step) = stack.pop() {
            let node = match step {
                HtmlStep::Close(name) => {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                    continue;
                }
                HtmlStep::Open(node) => node,
            };

            match node.kind() {
                NodeKind::Document => {
                    stack.extend(node.children().rev().map(HtmlStep::Open));
                }
                NodeKind::Text(text) => out.push_str(&escape_text(text)),
                NodeKind::Element(element) => {
                    out.push('<');
                    out.push_str(element.name());
                    for (name, value) in element.attributes() {
                        out.push(' ');
                        out.push_str(name);
                        if !value.is_empty() {
                            out.push_str("=\"");
                            out.push_str(&escape_attribute(value));
                            out.push('"');
                        }
                    }
                    out.push('>');

                    let has_children = node.children().next().is_some();
                    if element.is_void() && !has_children {
                        continue;
                    }
                    stack.push(HtmlStep::Close(element.name()));
                    stack.extend(node.children().rev().map(HtmlStep::Open));
                }
            }
        }
    }
}

enum HtmlStep<'a> {
    Open(NodeRef<'a>),
    Close(&'a str),
}

/// Depth-first pre-order traversal, see [`NodeRef::descendants`]
pub struct Descendants<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children = &node.document.data(node.id).children;
        self.stack.extend(children.iter().rev().map(|&id| NodeRef {
            document: node.document,
            id,
        }));
        Some(node)
    }
}
