//! Element styling rules.
//!
//! An element's own [`AttributeSet`] comes from its tag name, then any inline
//! `style` declarations are applied on top of it.

mod inline;
mod tags;

pub use inline::apply_inline_style;
pub use tags::{is_valid_link, tag_attributes};

use document_decoder_core::{AttributeSet, RenderOptions};

use crate::node::ElementData;

/// Compute the attributes an element contributes to its content
pub fn element_attributes(element: &ElementData, options: &RenderOptions) -> AttributeSet {
    let mut attributes = tag_attributes(element, options);

    if options.inline_styles {
        if let Some(style) = element.attr("style") {
            apply_inline_style(style, &mut attributes);
        }
    }

    attributes
}

/// Check for a class token equal to `invisible`, ignoring ASCII case
pub fn is_invisible(element: &ElementData) -> bool {
    element
        .class_list()
        .iter()
        .any(|class| class.eq_ignore_ascii_case("invisible"))
}

/// Check for a class token containing `ellipsis`, ignoring ASCII case
pub fn has_ellipsis(element: &ElementData) -> bool {
    element
        .class_list()
        .iter()
        .any(|class| class.to_ascii_lowercase().contains("ellipsis"))
}
