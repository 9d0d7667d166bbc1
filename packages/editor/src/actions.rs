//! Editing actions.
//!
//! Actions are the serializable boundary between the builder UI and the
//! editor: the UI ships an action, the editor resolves it against the
//! current document and publishes a new snapshot. An action referencing a
//! stale id is dropped with a log line, never an error — the UI may be
//! working from references a concurrent edit already invalidated.

use serde::{Deserialize, Serialize};

use mailsmith_document::{BlockId, BlockKind, BlockProps, BlockStyle};

/// Partial update for a single block.
///
/// `style` merges field-wise (set fields win, unset fields keep their
/// current value); `props` replaces the whole props value and must keep
/// the block's variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<BlockStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<BlockProps>,
}

impl BlockPatch {
    pub fn style(style: BlockStyle) -> Self {
        Self {
            style: Some(style),
            props: None,
        }
    }

    pub fn props(props: BlockProps) -> Self {
        Self {
            style: None,
            props: Some(props),
        }
    }
}

/// Structural edits applied to the current document.
///
/// `parent_id` of `None` targets the root list; a `column_index` targets
/// one slot of a Columns block. Positions are clamped to the valid
/// insertion range of the target list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditAction {
    /// Create a block of `kind` via the factory and insert it under the
    /// resolved parent. The new block becomes selected.
    AddBlock {
        kind: BlockKind,
        position: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_id: Option<BlockId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        column_index: Option<usize>,
    },

    /// Merge a partial style/props patch into one block.
    UpdateBlock { block_id: BlockId, patch: BlockPatch },

    /// Remove a block and, recursively, every block reachable through its
    /// child lists.
    DeleteBlock { block_id: BlockId },

    /// Detach a block from its current parent and re-insert it under the
    /// new parent. Same parent at a different position is a reorder.
    MoveBlock {
        block_id: BlockId,
        position: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_id: Option<BlockId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        column_index: Option<usize>,
    },

    /// Deep-copy a block subtree with fresh ids for every node and insert
    /// the copy immediately after the original. The copy becomes selected.
    DuplicateBlock { block_id: BlockId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization_round_trip() {
        let action = EditAction::AddBlock {
            kind: BlockKind::Heading,
            position: 0,
            parent_id: None,
            column_index: None,
        };

        let json = serde_json::to_string(&action).unwrap();
        let back: EditAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_action_tag_shape() {
        let action = EditAction::DeleteBlock {
            block_id: "text-1".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "DeleteBlock");
        assert_eq!(json["block_id"], "text-1");
    }
}
