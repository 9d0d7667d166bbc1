//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Unknown block variant: {0}")]
    UnknownVariant(String),

    /// The document references block ids that are not declared in its arena.
    /// A document in this state is rejected before it reaches the editor or
    /// the template instancing path.
    #[error("Document references missing blocks: {}", .missing.join(", "))]
    MissingBlocks { missing: Vec<String> },
}
