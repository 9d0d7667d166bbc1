//! Block factory.
//!
//! Produces new blocks with variant-specific default style and content,
//! and generates fresh identifiers. Identifier generation is a separate
//! call so insertion, duplication and template instancing share one
//! scheme.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::block::{
    AvatarProps, Block, BlockKind, BlockProps, ButtonProps, ColumnsProps, ContainerProps,
    DividerProps, HeadingProps, HeroProps, HtmlProps, ImageProps, ListProps, QuoteProps,
    SocialLinksProps, SpacerProps, TextProps,
};
use crate::style::{BlockStyle, FontWeight, Padding, TextAlign};

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Generate a fresh block identifier: the caller-supplied prefix plus a
/// hashed suffix. The serial component keeps ids unique within the process
/// even if two hashes collide.
pub fn new_block_id(prefix: &str) -> String {
    let serial = NEXT_SERIAL.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(prefix.as_bytes());
    hasher.update(&serial.to_le_bytes());
    hasher.update(&nanos.to_le_bytes());

    format!("{}-{:08x}{:x}", prefix, hasher.finalize(), serial)
}

/// Create a block of the requested variant with its default style and
/// content.
pub fn new_block(kind: BlockKind) -> Block {
    match kind {
        BlockKind::Text => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(8, 24)),
                ..Default::default()
            },
            props: BlockProps::Text(TextProps::default()),
        },
        BlockKind::Heading => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(16, 24)),
                font_size: Some(24),
                font_weight: Some(FontWeight::Bold),
                ..Default::default()
            },
            props: BlockProps::Heading(HeadingProps::default()),
        },
        BlockKind::Image => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(8, 0)),
                text_align: Some(TextAlign::Center),
                ..Default::default()
            },
            props: BlockProps::Image(ImageProps::default()),
        },
        BlockKind::Button => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(16, 24)),
                text_align: Some(TextAlign::Center),
                ..Default::default()
            },
            props: BlockProps::Button(ButtonProps::default()),
        },
        BlockKind::Divider => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(16, 24)),
                ..Default::default()
            },
            props: BlockProps::Divider(DividerProps::default()),
        },
        BlockKind::Spacer => Block {
            style: BlockStyle::default(),
            props: BlockProps::Spacer(SpacerProps::default()),
        },
        BlockKind::Columns => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(8, 24)),
                ..Default::default()
            },
            props: BlockProps::Columns(ColumnsProps::default()),
        },
        BlockKind::Container => Block {
            style: BlockStyle {
                padding: Some(Padding::uniform(16)),
                ..Default::default()
            },
            props: BlockProps::Container(ContainerProps::default()),
        },
        BlockKind::Avatar => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(16, 0)),
                text_align: Some(TextAlign::Center),
                ..Default::default()
            },
            props: BlockProps::Avatar(AvatarProps::default()),
        },
        BlockKind::Html => Block {
            style: BlockStyle::default(),
            props: BlockProps::Html(HtmlProps::default()),
        },
        BlockKind::SocialLinks => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(16, 24)),
                text_align: Some(TextAlign::Center),
                ..Default::default()
            },
            props: BlockProps::SocialLinks(SocialLinksProps::default()),
        },
        BlockKind::List => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(8, 24)),
                ..Default::default()
            },
            props: BlockProps::List(ListProps::default()),
        },
        BlockKind::Hero => Block {
            style: BlockStyle::default(),
            props: BlockProps::Hero(HeroProps::default()),
        },
        BlockKind::Quote => Block {
            style: BlockStyle {
                padding: Some(Padding::symmetric(16, 24)),
                ..Default::default()
            },
            props: BlockProps::Quote(QuoteProps::default()),
        },
    }
}
