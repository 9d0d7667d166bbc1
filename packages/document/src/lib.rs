//! # Mailsmith Document Model
//!
//! Structural model of an email: a flat, keyed collection of typed blocks
//! plus root layout attributes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: block vocabulary + arena          │
//! │  - Closed block variant set (14 kinds)      │
//! │  - Factory with per-variant defaults        │
//! │  - Completeness validation, parent lookup   │
//! │  - Predefined templates + instancing        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: actions + snapshot history          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: document → email HTML        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The document is serialized as JSON by the storage collaborator; all
//! types here derive serde with camelCase field names and a tagged block
//! enum, and block order is insertion order (IndexMap) so round trips are
//! stable.

pub mod block;
pub mod document;
pub mod error;
pub mod factory;
pub mod style;
pub mod templates;

pub use block::{
    AvatarProps, AvatarShape, Block, BlockId, BlockKind, BlockProps, ButtonProps, Column,
    ColumnsProps, ContainerProps, DividerProps, HeadingLevel, HeadingProps, HeroProps, HtmlProps,
    ImageProps, ListProps, QuoteProps, SocialLink, SocialLinksProps, SpacerProps, TextProps,
};
pub use document::{BlockLocation, EmailDocument, Parent};
pub use error::DocumentError;
pub use factory::{new_block, new_block_id};
pub use style::{BlockStyle, FontFamily, FontWeight, Padding, TextAlign};
