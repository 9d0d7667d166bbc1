//! Block vocabulary.
//!
//! A block is one node of the email document: a shared style slot plus
//! variant-specific props. The variant set is a closed sum matched
//! exhaustively by the factory and the HTML compiler, so adding a variant
//! is a compile-enforced change at every dispatch site rather than a
//! runtime default-case fallthrough.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocumentError;
use crate::style::BlockStyle;

/// Opaque block identifier, unique within a document and never reused
/// after deletion.
pub type BlockId = String;

/// One node of the email document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub style: BlockStyle,
    #[serde(flatten)]
    pub props: BlockProps,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        self.props.kind()
    }
}

/// Variant-specific content of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "camelCase")]
pub enum BlockProps {
    Text(TextProps),
    Heading(HeadingProps),
    Image(ImageProps),
    Button(ButtonProps),
    Divider(DividerProps),
    Spacer(SpacerProps),
    Columns(ColumnsProps),
    Container(ContainerProps),
    Avatar(AvatarProps),
    Html(HtmlProps),
    SocialLinks(SocialLinksProps),
    List(ListProps),
    Hero(HeroProps),
    Quote(QuoteProps),
}

impl BlockProps {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockProps::Text(_) => BlockKind::Text,
            BlockProps::Heading(_) => BlockKind::Heading,
            BlockProps::Image(_) => BlockKind::Image,
            BlockProps::Button(_) => BlockKind::Button,
            BlockProps::Divider(_) => BlockKind::Divider,
            BlockProps::Spacer(_) => BlockKind::Spacer,
            BlockProps::Columns(_) => BlockKind::Columns,
            BlockProps::Container(_) => BlockKind::Container,
            BlockProps::Avatar(_) => BlockKind::Avatar,
            BlockProps::Html(_) => BlockKind::Html,
            BlockProps::SocialLinks(_) => BlockKind::SocialLinks,
            BlockProps::List(_) => BlockKind::List,
            BlockProps::Hero(_) => BlockKind::Hero,
            BlockProps::Quote(_) => BlockKind::Quote,
        }
    }

    /// Child-id lists owned by this block, in slot order. Empty for leaf
    /// variants; Container has one list, Columns one per column.
    pub fn child_lists(&self) -> Vec<&Vec<BlockId>> {
        match self {
            BlockProps::Container(p) => vec![&p.children_ids],
            BlockProps::Columns(p) => p.columns.iter().map(|c| &c.children_ids).collect(),
            _ => Vec::new(),
        }
    }

    pub fn child_lists_mut(&mut self) -> Vec<&mut Vec<BlockId>> {
        match self {
            BlockProps::Container(p) => vec![&mut p.children_ids],
            BlockProps::Columns(p) => p.columns.iter_mut().map(|c| &mut c.children_ids).collect(),
            _ => Vec::new(),
        }
    }
}

/// Variant names, used to request blocks from the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Text,
    Heading,
    Image,
    Button,
    Divider,
    Spacer,
    Columns,
    Container,
    Avatar,
    Html,
    SocialLinks,
    List,
    Hero,
    Quote,
}

impl BlockKind {
    pub const ALL: [BlockKind; 14] = [
        BlockKind::Text,
        BlockKind::Heading,
        BlockKind::Image,
        BlockKind::Button,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::Columns,
        BlockKind::Container,
        BlockKind::Avatar,
        BlockKind::Html,
        BlockKind::SocialLinks,
        BlockKind::List,
        BlockKind::Hero,
        BlockKind::Quote,
    ];

    /// Wire name of the variant, also used as the id prefix for new blocks.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Heading => "heading",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
            BlockKind::Columns => "columns",
            BlockKind::Container => "container",
            BlockKind::Avatar => "avatar",
            BlockKind::Html => "html",
            BlockKind::SocialLinks => "socialLinks",
            BlockKind::List => "list",
            BlockKind::Hero => "hero",
            BlockKind::Quote => "quote",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockKind {
    type Err = DocumentError;

    /// Requesting an unknown variant is a construction defect and fails
    /// loudly, never a silent skip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| DocumentError::UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[serde(rename = "1")]
    One,
    #[default]
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl HeadingLevel {
    pub fn tag(&self) -> &'static str {
        match self {
            HeadingLevel::One => "h1",
            HeadingLevel::Two => "h2",
            HeadingLevel::Three => "h3",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingProps {
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    pub text: String,
    pub url: String,
    /// Fill color of the button face.
    pub color: String,
    pub text_color: String,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            url: String::new(),
            color: "#3B82F6".to_string(),
            text_color: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerProps {
    pub color: String,
    pub thickness: u32,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            color: "#E2E2E2".to_string(),
            thickness: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerProps {
    pub height: u32,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self { height: 24 }
    }
}

/// One column slot: an independent ordered child list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    pub children_ids: Vec<BlockId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsProps {
    pub columns: Vec<Column>,
}

impl Default for ColumnsProps {
    fn default() -> Self {
        Self {
            columns: vec![Column::default(), Column::default()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerProps {
    pub children_ids: Vec<BlockId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarShape {
    #[default]
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarProps {
    pub src: String,
    pub alt: String,
    pub size: u32,
    pub shape: AvatarShape,
}

impl Default for AvatarProps {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            size: 64,
            shape: AvatarShape::Circle,
        }
    }
}

/// Raw HTML passthrough. Content is emitted verbatim by the compiler;
/// the block exists as an escape hatch for hand-authored snippets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlProps {
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinksProps {
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProps {
    pub ordered: bool,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroProps {
    pub image_url: String,
    pub overlay_color: String,
    /// Overlay opacity, 0.0 to 1.0.
    pub overlay_opacity: f32,
    pub title: String,
    pub subtitle: String,
}

impl Default for HeroProps {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            overlay_color: "#000000".to_string(),
            overlay_opacity: 0.4,
            title: String::new(),
            subtitle: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteProps {
    pub text: String,
    pub attribution: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_name_round_trip() {
        for kind in BlockKind::ALL {
            let parsed: BlockKind = kind.name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_variant_fails_loudly() {
        let result = "carousel".parse::<BlockKind>();
        assert_eq!(
            result,
            Err(DocumentError::UnknownVariant("carousel".to_string()))
        );
    }

    #[test]
    fn test_block_serialization_shape() {
        let block = Block {
            style: BlockStyle::default(),
            props: BlockProps::Button(ButtonProps {
                text: "Go".to_string(),
                url: "https://example.com".to_string(),
                ..Default::default()
            }),
        };

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["props"]["text"], "Go");
        assert_eq!(json["props"]["textColor"], "#FFFFFF");

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_heading_level_serializes_as_string() {
        let props = HeadingProps {
            text: "Title".to_string(),
            level: HeadingLevel::Two,
        };
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["level"], "2");
    }

    #[test]
    fn test_child_lists_cover_structural_variants() {
        let container = BlockProps::Container(ContainerProps {
            children_ids: vec!["a".to_string()],
        });
        assert_eq!(container.child_lists().len(), 1);

        let columns = BlockProps::Columns(ColumnsProps::default());
        assert_eq!(columns.child_lists().len(), 2);

        let text = BlockProps::Text(TextProps::default());
        assert!(text.child_lists().is_empty());
    }
}
