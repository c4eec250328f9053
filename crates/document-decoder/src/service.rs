//! DocumentDecoder - the main entry point for markup to styled-text conversion.

use document_decoder_core::{RenderOptions, Run, StyledText};

use crate::node::{Document, ElementData, NodeKind, NodeRef};
use crate::parser::parse;
use crate::styles::{element_attributes, has_ellipsis, is_invisible};
use crate::utilities::is_block;
use crate::Result;

/// Render a parsed tree into styled text
pub fn render(document: &Document, options: &RenderOptions) -> StyledText {
    let mut text = process_node(document.root(), options);
    post_process(&mut text, options);
    text
}

/// The main service for decoding markup
#[derive(Debug, Clone, Default)]
pub struct DocumentDecoder {
    options: RenderOptions,
}

impl DocumentDecoder {
    /// Create a DocumentDecoder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a DocumentDecoder with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Parse markup into a node tree
    pub fn decode_tree(&self, markup: &str) -> Document {
        let document = parse(markup);
        log::debug!(
            "parsed {} bytes of markup into {} nodes",
            markup.len(),
            document.node_count()
        );
        document
    }

    /// Parse raw bytes into a node tree
    pub fn decode_tree_bytes(&self, bytes: &[u8]) -> Result<Document> {
        let markup = std::str::from_utf8(bytes)?;
        Ok(self.decode_tree(markup))
    }

    /// Convert markup to styled text
    pub fn decode(&self, markup: &str) -> StyledText {
        let document = self.decode_tree(markup);
        let text = self.render(&document);
        log::debug!("rendered {} runs", text.runs().len());
        text
    }

    /// Convert raw bytes to styled text
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<StyledText> {
        let markup = std::str::from_utf8(bytes)?;
        Ok(self.decode(markup))
    }

    /// Render an already parsed tree
    pub fn render(&self, document: &Document) -> StyledText {
        render(document, &self.options)
    }
}

enum Step<'a> {
    Enter(NodeRef<'a>),
    Exit(&'a ElementData),
}

/// Walk the tree depth-first with an explicit work stack.
///
/// Each open element owns a frame collecting its children's runs; the frame is
/// finished and appended to its parent's when the element is exited.
fn process_node(node: NodeRef<'_>, options: &RenderOptions) -> StyledText {
    let mut steps = vec![Step::Enter(node)];
    let mut frames = vec![StyledText::new()];

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node) => match node.kind() {
                NodeKind::Document => {
                    steps.extend(node.children().rev().map(Step::Enter));
                }
                NodeKind::Text(text) => {
                    if let Some(frame) = frames.last_mut() {
                        frame.push(Run::plain(text.as_str()));
                    }
                }
                NodeKind::Element(element) => {
                    if is_invisible(element) {
                        continue;
                    }
                    if element.is("br") {
                        if let Some(frame) = frames.last_mut() {
                            frame.push(Run::plain("\n"));
                        }
                        continue;
                    }
                    frames.push(StyledText::new());
                    steps.push(Step::Exit(element));
                    steps.extend(node.children().rev().map(Step::Enter));
                }
            },
            Step::Exit(element) => {
                let children = frames.pop().unwrap_or_default();
                let result = process_element(element, children, options);
                if let Some(frame) = frames.last_mut() {
                    frame.append(result);
                }
            }
        }
    }

    frames.pop().unwrap_or_default()
}

/// Finish an element once its children have been rendered
fn process_element(
    element: &ElementData,
    mut result: StyledText,
    options: &RenderOptions,
) -> StyledText {
    let attributes = element_attributes(element, options);

    // Attributes set deeper in the tree win
    if !attributes.is_empty() {
        for run in result.runs_mut() {
            run.attributes.merge_missing(&attributes);
        }
    }

    if has_ellipsis(element) && !result.is_empty() {
        result.push(Run::plain(options.ellipsis.as_str()));
    }

    if is_block(element.name()) && !result.is_empty() && !result.ends_with('\n') {
        result.push(Run::plain("\n"));
    }

    result
}

/// Post-process the result
fn post_process(text: &mut StyledText, options: &RenderOptions) {
    if options.trim_newlines {
        text.trim_newlines();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_decoder_core::{AttributeSet, Color};

    fn decode(markup: &str) -> StyledText {
        DocumentDecoder::new().decode(markup)
    }

    fn untrimmed(markup: &str) -> StyledText {
        let options = RenderOptions {
            trim_newlines: false,
            ..Default::default()
        };
        DocumentDecoder::with_options(options).decode(markup)
    }

    #[test]
    fn test_empty_input() {
        assert!(decode("").runs().is_empty());
    }

    #[test]
    fn test_plain_text() {
        let text = decode("Hello, world!");
        assert_eq!(text.runs(), &[Run::plain("Hello, world!")]);
    }

    #[test]
    fn test_paragraph_newline() {
        assert_eq!(untrimmed("<p>Hello</p>").plain_text(), "Hello\n");
        assert_eq!(decode("<p>Hello</p>").plain_text(), "Hello");
    }

    #[test]
    fn test_nested_blocks_single_newline() {
        let text = untrimmed("<div><p>Paragraph <strong><em>with</em> styling</strong></p></div>");
        assert_eq!(text.plain_text(), "Paragraph with styling\n");
    }

    #[test]
    fn test_empty_block_adds_nothing() {
        assert!(untrimmed("<div><p></p></div>").is_empty());
    }

    #[test]
    fn test_line_break() {
        assert_eq!(decode("Line 1<br>Line 2").plain_text(), "Line 1\nLine 2");
        assert_eq!(decode("<br><br>x<br/>").plain_text(), "x");
    }

    #[test]
    fn test_br_ignores_children_and_classes() {
        let text = untrimmed(r#"<p>a<br class="ellipsis">b</p>"#);
        assert_eq!(text.plain_text(), "a\nb\n");
    }

    #[test]
    fn test_strong_run() {
        let text = decode("a <b>bold</b> c");
        let runs = text.runs();
        assert_eq!(runs.len(), 3);
        assert!(!runs[0].attributes.strong);
        assert_eq!(runs[1].text, "bold");
        assert!(runs[1].attributes.strong);
        assert!(!runs[2].attributes.strong);
    }

    #[test]
    fn test_nested_attributes_accumulate() {
        let text = decode("<strong><em>both</em></strong>");
        let run = &text.runs()[0];
        assert!(run.attributes.strong);
        assert!(run.attributes.italic);
    }

    #[test]
    fn test_innermost_wins() {
        let text = decode(
            r#"<span style="color: blue"><span style="color: red">red</span> blue</span>"#,
        );
        let runs = text.runs();
        assert_eq!(runs[0].text, "red");
        assert_eq!(runs[0].attributes.foreground_color, Some(Color::Red));
        assert_eq!(runs[1].text, " blue");
        assert_eq!(runs[1].attributes.foreground_color, Some(Color::Blue));
    }

    #[test]
    fn test_inner_link_kept_in_outer_link() {
        let text = decode(r#"<a href="https://outer.example"><a href="https://inner.example">x</a></a>"#);
        assert_eq!(
            text.runs()[0].attributes.link.as_deref(),
            Some("https://inner.example")
        );
    }

    #[test]
    fn test_link() {
        let text = decode(r#"<a href="https://example.com">Link</a>"#);
        assert_eq!(text.plain_text(), "Link");
        let attributes = &text.runs()[0].attributes;
        assert_eq!(attributes.link.as_deref(), Some("https://example.com"));
        assert_eq!(attributes.foreground_color, Some(Color::Tint));
        assert_eq!(
            attributes.html.as_ref().and_then(|h| h.get("href")).map(String::as_str),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_invisible_subtree() {
        let text = decode(r#"<p>shown</p><div class="invisible"><p>hidden</p></div><p>also</p>"#);
        assert_eq!(text.plain_text(), "shown\nalso");
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(untrimmed(r#"<p class="ellipsis">text</p>"#).plain_text(), "text…\n");
        assert_eq!(untrimmed(r#"<p class="normal">text</p>"#).plain_text(), "text\n");
        assert_eq!(untrimmed(r#"<span class="ellipsis"></span>"#).plain_text(), "");
    }

    #[test]
    fn test_ellipsis_run_inherits_outer_attributes_only() {
        let text = decode(r#"<b><span class="ellipsis" style="color: red">x</span></b>"#);
        let runs = text.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].text, "…");
        assert_eq!(runs[1].attributes.foreground_color, None);
        assert!(runs[1].attributes.strong);
    }

    #[test]
    fn test_custom_ellipsis() {
        let mut decoder = DocumentDecoder::new();
        decoder.options_mut().ellipsis = "...".to_string();
        let text = decoder.decode(r#"<span class="ellipsis">more</span>"#);
        assert_eq!(text.plain_text(), "more...");
    }

    #[test]
    fn test_heading_and_code() {
        let text = decode("<h2>Title</h2><pre><code>let x = 1;</code></pre>");
        assert_eq!(text.plain_text(), "Title\nlet x = 1;");
        let runs = text.runs();
        assert!(runs[0].attributes.strong);
        assert!(runs[2].attributes.monospace);
    }

    #[test]
    fn test_mastodon_post() {
        let text = decode(concat!(
            r#"<p>Hello <span class="h-card"><a href="https://mstdn.jp/@fox" class="u-url mention">@<span>fox</span></a></span></p>"#,
            r#"<p><a href="https://example.com/very/long/path" rel="nofollow noopener" target="_blank">"#,
            r#"<span class="invisible">https://</span><span class="ellipsis">example.com/very</span><span class="invisible">/long/path</span></a></p>"#,
        ));

        assert_eq!(text.plain_text(), "Hello @fox\nexample.com/very…");

        let coalesced = text.coalesced();
        let mention = &coalesced.runs()[1];
        assert_eq!(mention.text, "@fox");
        assert_eq!(mention.attributes.link.as_deref(), Some("https://mstdn.jp/@fox"));
    }

    #[test]
    fn test_deeply_nested_spans() {
        let markup = format!("<b>{}x", "<span>".repeat(100_000));
        let document = parse(&markup);
        assert_eq!(document.node_count(), 100_003);

        let text = render(&document, &RenderOptions::default());
        assert_eq!(text.runs().len(), 1);
        assert_eq!(text.runs()[0].text, "x");
        assert!(text.runs()[0].attributes.strong);
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let markup = format!("{}x{}y", "<div>".repeat(50_000), "</div>".repeat(50_000));
        let text = untrimmed(&markup);
        assert_eq!(text.plain_text(), "x\ny");
    }

    #[test]
    fn test_unstyled_runs_have_empty_attributes() {
        let text = decode("<div><span>plain</span></div>");
        assert_eq!(text.runs()[0].attributes, AttributeSet::default());
    }

    #[test]
    fn test_decode_bytes() {
        let decoder = DocumentDecoder::new();
        let text = decoder.decode_bytes("<b>きつね</b>".as_bytes()).unwrap();
        assert_eq!(text.plain_text(), "きつね");

        let err = decoder.decode_bytes(&[b'<', b'p', b'>', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, crate::DecodeError::InvalidEncoding(_)));
        assert!(decoder.decode_tree_bytes(&[0xc3]).is_err());
    }
}
