//! Configuration options for styled-text rendering

use crate::run::Color;

/// Options for rendering a node tree into styled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Strip leading and trailing newlines from the final output
    pub trim_newlines: bool,

    /// Apply declarations from inline `style` attributes
    pub inline_styles: bool,

    /// Foreground color given to link text
    pub link_color: Color,

    /// Marker appended to elements carrying an `ellipsis` class
    pub ellipsis: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trim_newlines: true,
            inline_styles: true,
            link_color: Color::Tint,
            ellipsis: "…".to_string(),
        }
    }
}
