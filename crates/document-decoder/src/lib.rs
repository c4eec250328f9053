//! # document-decoder
//!
//! Convert short, possibly malformed HTML fragments (social-media post bodies
//! and the like) into styled text without a browser engine.
//!
//! ## Design
//!
//! Decoding happens in two passes:
//!
//! - **Parsing**: a lenient single-pass tokenizer builds a [`Document`] tree.
//!   It never fails; broken markup degrades into a best-effort tree.
//! - **Rendering**: the tree is walked into a [`StyledText`], a list of text
//!   runs carrying an [`AttributeSet`] built from tag names, classes and
//!   inline `style` declarations.
//!
//! The tree can also be queried directly (by tag name, attribute or class)
//! and serialized back to markup.
//!
//! ## Example (styled text)
//!
//! ```rust
//! use document_decoder::DocumentDecoder;
//!
//! let decoder = DocumentDecoder::new();
//! let text = decoder.decode(r#"<p>Hello <a href="https://example.com">World</a></p>"#);
//!
//! assert_eq!(text.plain_text(), "Hello World");
//! assert_eq!(text.runs()[1].attributes.link.as_deref(), Some("https://example.com"));
//! ```
//!
//! ## Example (node tree)
//!
//! ```rust
//! use document_decoder::parse;
//!
//! let doc = parse(r#"<a href="/tags/fox" class="mention hashtag">#fox</a>"#);
//! let a = doc.query_selector("a").unwrap();
//!
//! assert!(a.has_class("hashtag"));
//! assert_eq!(a.attr("href"), Some("/tags/fox"));
//! assert_eq!(a.outer_html(), r#"<a href="/tags/fox" class="mention hashtag">#fox</a>"#);
//! ```

mod entities;
pub mod node;
mod parser;
mod service;
pub mod styles;
mod utilities;

pub use document_decoder_core::{AttributeSet, Color, RenderOptions, Run, StyledText};
pub use entities::decode_entities;
pub use node::{Descendants, Document, ElementData, NodeId, NodeKind, NodeRef};
pub use parser::parse;
pub use service::{render, DocumentDecoder};
pub use utilities::{is_block, is_void, BLOCK_ELEMENTS, VOID_ELEMENTS};

/// Error type for decoding operations
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input bytes are not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// Reserved; the parser recovers from malformed markup instead
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
