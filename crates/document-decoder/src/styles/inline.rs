//! Inline `style` attribute declarations.

use document_decoder_core::{AttributeSet, Color};

/// Apply the recognized declarations of a `style` attribute.
///
/// Declarations are separated by `;` and split on their first `:`.
/// Recognized: `color` (palette keywords), `font-weight: bold`,
/// `font-style: italic`, and `text-decoration` containing `underline` and/or
/// `line-through`. Everything else is ignored.
pub fn apply_inline_style(style: &str, attributes: &mut AttributeSet) {
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();

        match property.as_str() {
            "color" => {
                if let Some(color) = Color::from_keyword(value) {
                    attributes.foreground_color = Some(color);
                }
            }
            "font-weight" if value.eq_ignore_ascii_case("bold") => attributes.strong = true,
            "font-style" if value.eq_ignore_ascii_case("italic") => attributes.italic = true,
            "text-decoration" => {
                let value = value.to_ascii_lowercase();
                if value.contains("underline") {
                    attributes.underline = true;
                }
                if value.contains("line-through") {
                    attributes.strikethrough = true;
                }
            }
            _ => {}
        }
    }
}
