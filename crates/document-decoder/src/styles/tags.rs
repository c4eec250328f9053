//! Tag-name rules.

use document_decoder_core::{AttributeSet, RenderOptions};
use url::Url;

use crate::node::ElementData;

/// Attributes implied by an element's tag name
pub fn tag_attributes(element: &ElementData, options: &RenderOptions) -> AttributeSet {
    let mut attributes = AttributeSet::default();

    match element.name().to_ascii_lowercase().as_str() {
        "strong" | "b" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => attributes.strong = true,
        "em" | "i" => attributes.italic = true,
        "u" => attributes.underline = true,
        "strike" | "s" | "del" => attributes.strikethrough = true,
        "code" | "pre" => attributes.monospace = true,
        "a" => {
            attributes.link = element
                .attr("href")
                .filter(|href| is_valid_link(href))
                .map(str::to_string);
            attributes.foreground_color = Some(options.link_color);
            attributes.html = Some(
                element
                    .attributes()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
            );
        }
        _ => {}
    }

    attributes
}

/// Check if `href` is usable as a link target.
///
/// Absolute URLs must parse; relative references are accepted as long as
/// they are non-empty and contain no whitespace.
pub fn is_valid_link(href: &str) -> bool {
    match Url::parse(href) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            !href.is_empty() && !href.contains(char::is_whitespace)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_decoder_core::Color;
    use indexmap::IndexMap;

    fn element(name: &str, pairs: &[(&str, &str)]) -> ElementData {
        let attrs: IndexMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ElementData::new(name, attrs)
    }

    fn attributes_for(name: &str) -> AttributeSet {
        tag_attributes(&element(name, &[]), &RenderOptions::default())
    }

    #[test]
    fn test_emphasis_tags() {
        assert!(attributes_for("strong").strong);
        assert!(attributes_for("B").strong);
        assert!(attributes_for("h3").strong);
        assert!(attributes_for("em").italic);
        assert!(attributes_for("i").italic);
    }

    #[test]
    fn test_decoration_tags() {
        assert!(attributes_for("u").underline);
        assert!(attributes_for("s").strikethrough);
        assert!(attributes_for("strike").strikethrough);
        assert!(attributes_for("del").strikethrough);
        assert!(attributes_for("code").monospace);
        assert!(attributes_for("pre").monospace);
    }

    #[test]
    fn test_unknown_tag_has_no_attributes() {
        assert!(attributes_for("span").is_empty());
        assert!(attributes_for("div").is_empty());
    }

    #[test]
    fn test_anchor() {
        let a = element(
            "a",
            &[
                ("href", "https://mstdn.jp/tags/fox"),
                ("class", "mention hashtag"),
                ("rel", "tag"),
            ],
        );
        let attributes = tag_attributes(&a, &RenderOptions::default());

        assert_eq!(attributes.link.as_deref(), Some("https://mstdn.jp/tags/fox"));
        assert_eq!(attributes.foreground_color, Some(Color::Tint));

        let html = attributes.html.unwrap();
        assert_eq!(html.len(), 3);
        assert_eq!(html.get("class").map(String::as_str), Some("mention hashtag"));
        assert_eq!(html.get("rel").map(String::as_str), Some("tag"));
    }

    #[test]
    fn test_anchor_without_valid_href() {
        let a = element("a", &[("href", "not a url")]);
        let options = RenderOptions {
            link_color: Color::Blue,
            ..Default::default()
        };
        let attributes = tag_attributes(&a, &options);

        assert_eq!(attributes.link, None);
        assert_eq!(attributes.foreground_color, Some(Color::Blue));
        assert!(attributes.html.is_some());
    }

    #[test]
    fn test_is_valid_link() {
        assert!(is_valid_link("https://example.com"));
        assert!(is_valid_link("mailto:someone@example.com"));
        assert!(is_valid_link("/tags/rust"));
        assert!(!is_valid_link(""));
        assert!(!is_valid_link("has space"));
        assert!(!is_valid_link("http://[::1"));
    }
}
