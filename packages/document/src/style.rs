//! Shared styling vocabulary.
//!
//! Every block carries the same optional style slot. Fields left `None`
//! inherit from the document root (colors, font) or fall back to the
//! variant's own rendering defaults, so absent values must survive
//! serialization untouched rather than being filled in.

use serde::{Deserialize, Serialize};

/// Padding insets in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub fn uniform(px: u32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }

    pub fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// True when all four insets are equal, so the CSS shorthand applies.
    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Named font presets selectable at the document level.
///
/// Email clients only render fonts installed on the recipient's machine,
/// so each preset resolves to a stack of widely available faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Modern,
    Classic,
    Serif,
    Rounded,
    Mono,
}

impl FontFamily {
    /// Concrete font stack for inline `font-family` declarations.
    pub fn stack(&self) -> &'static str {
        match self {
            FontFamily::Modern => "'Helvetica Neue', Helvetica, Arial, sans-serif",
            FontFamily::Classic => "Georgia, 'Times New Roman', serif",
            FontFamily::Serif => "'Times New Roman', Times, serif",
            FontFamily::Rounded => "'Trebuchet MS', 'Lucida Grande', Tahoma, sans-serif",
            FontFamily::Mono => "'Courier New', Courier, monospace",
        }
    }
}

/// Style slot shared by every block variant. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
}

impl BlockStyle {
    /// Field-wise merge: `patch` fields that are set win, the rest keep
    /// their current value.
    pub fn merged(&self, patch: &BlockStyle) -> BlockStyle {
        BlockStyle {
            padding: patch.padding.or(self.padding),
            background_color: patch
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            color: patch.color.clone().or_else(|| self.color.clone()),
            font_size: patch.font_size.or(self.font_size),
            font_weight: patch.font_weight.or(self.font_weight),
            text_align: patch.text_align.or(self.text_align),
        }
    }
}
