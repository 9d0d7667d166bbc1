//! Inline-style helpers.
//!
//! Email clients routinely strip `<style>` blocks and external CSS, so
//! every declaration is emitted inline on the cell it styles.

use mailsmith_document::{BlockStyle, FontWeight, Padding, TextAlign};

/// CSS value for a padding inset set: the single shorthand when all four
/// insets are equal, the four-value form otherwise.
pub(crate) fn padding_value(padding: &Padding) -> String {
    if padding.is_uniform() {
        format!("{}px", padding.top)
    } else {
        format!(
            "{}px {}px {}px {}px",
            padding.top, padding.right, padding.bottom, padding.left
        )
    }
}

/// Expand 3-digit hex shorthand to the 6-digit form; support for the short
/// form varies across email clients. Anything else passes through.
pub(crate) fn normalize_color(color: &str) -> String {
    let Some(hex) = color.strip_prefix('#') else {
        return color.to_string();
    };
    if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let mut out = String::with_capacity(7);
        out.push('#');
        for c in hex.chars() {
            out.push(c);
            out.push(c);
        }
        out
    } else {
        color.to_string()
    }
}

pub(crate) fn weight_value(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

pub(crate) fn align_value(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

/// Accumulates `property:value;` declarations for one `style` attribute.
#[derive(Debug, Default)]
pub(crate) struct InlineStyle {
    buffer: String,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: &str, value: impl AsRef<str>) -> &mut Self {
        self.buffer.push_str(property);
        self.buffer.push(':');
        self.buffer.push_str(value.as_ref());
        self.buffer.push(';');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Declarations for a block's cell from its style slot. Absent fields emit
/// no property at all, so parent backgrounds and inherited typography show
/// through.
pub(crate) fn cell_style(style: &BlockStyle) -> InlineStyle {
    let mut css = InlineStyle::new();
    if let Some(padding) = &style.padding {
        css.push("padding", padding_value(padding));
    }
    if let Some(color) = &style.background_color {
        css.push("background-color", normalize_color(color));
    }
    if let Some(color) = &style.color {
        css.push("color", normalize_color(color));
    }
    if let Some(size) = style.font_size {
        css.push("font-size", format!("{}px", size));
    }
    if let Some(weight) = style.font_weight {
        css.push("font-weight", weight_value(weight));
    }
    if let Some(align) = style.text_align {
        css.push("text-align", align_value(align));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_collapses_to_shorthand() {
        assert_eq!(padding_value(&Padding::uniform(16)), "16px");
        assert_eq!(
            padding_value(&Padding::symmetric(8, 24)),
            "8px 24px 8px 24px"
        );
    }

    #[test]
    fn test_short_hex_expansion() {
        assert_eq!(normalize_color("#fff"), "#ffffff");
        assert_eq!(normalize_color("#1a2"), "#11aa22");
        assert_eq!(normalize_color("#FFFFFF"), "#FFFFFF");
        assert_eq!(normalize_color("transparent"), "transparent");
        assert_eq!(normalize_color("#ggg"), "#ggg");
    }

    #[test]
    fn test_absent_fields_emit_nothing() {
        let css = cell_style(&BlockStyle::default());
        assert!(css.is_empty());
    }

    #[test]
    fn test_cell_style_declarations() {
        let style = BlockStyle {
            padding: Some(Padding::uniform(8)),
            background_color: Some("#eee".to_string()),
            font_size: Some(14),
            ..Default::default()
        };
        let css = cell_style(&style).finish();
        assert_eq!(css, "padding:8px;background-color:#eeeeee;font-size:14px;");
    }
}
