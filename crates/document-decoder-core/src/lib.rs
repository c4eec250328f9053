//! document-decoder-core - styled-text output model
//!
//! This crate provides the data structures produced when markup is decoded
//! into rich text: a list of [`Run`]s, each pairing a span of text with the
//! [`AttributeSet`] that applies to it. It has no dependencies so that
//! presentation layers can consume decoded text without pulling in the parser.
//!
//! # Architecture
//!
//! ```text
//! Markup String ──parse──▶ Node Tree ──render──▶ ┌────────────┐
//!                                                │ StyledText │ ──▶ native rich text
//!                                                └────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use document_decoder_core::{AttributeSet, Run, StyledText};
//!
//! let bold = AttributeSet {
//!     strong: true,
//!     ..Default::default()
//! };
//!
//! let text = StyledText::from_runs(vec![
//!     Run::plain("This is "),
//!     Run::new("bold", bold),
//!     Run::plain(" text."),
//! ]);
//!
//! assert_eq!(text.plain_text(), "This is bold text.");
//! ```

mod options;
mod run;
mod styled;

pub use options::RenderOptions;
pub use run::{AttributeSet, Color, Run};
pub use styled::StyledText;
