//! Email document arena.
//!
//! The document is a flat map of id → block plus the root child order.
//! Container and Columns blocks reference their children by id rather than
//! owning them, so a block can be moved across containers or duplicated
//! with remapped ids without rewriting an object graph. The price is a
//! structural invariant: every referenced id must resolve to a declared
//! block, checked by [`EmailDocument::validate`] before a document is
//! accepted anywhere.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId, BlockProps};
use crate::error::DocumentError;
use crate::style::FontFamily;

/// The full email document: root layout attributes, root child order and
/// the block arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDocument {
    /// Page background behind the email body.
    pub backdrop_color: String,
    /// Background of the email body itself.
    pub canvas_color: String,
    /// Default text color, inherited by blocks without one.
    pub text_color: String,
    pub font_family: FontFamily,
    pub children_ids: Vec<BlockId>,
    pub blocks: IndexMap<BlockId, Block>,
}

impl Default for EmailDocument {
    fn default() -> Self {
        Self {
            backdrop_color: "#F8F8F8".to_string(),
            canvas_color: "#FFFFFF".to_string(),
            text_color: "#242424".to_string(),
            font_family: FontFamily::default(),
            children_ids: Vec::new(),
            blocks: IndexMap::new(),
        }
    }
}

/// Structural parent slot of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Root,
    Container(BlockId),
    Column(BlockId, usize),
}

/// Where a block sits: its parent slot and position among siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLocation {
    pub parent: Parent,
    pub index: usize,
}

impl EmailDocument {
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    /// Every id referenced from the root list or any Container/Columns
    /// child list, in walk order. May contain duplicates if the document
    /// is malformed.
    pub fn referenced_ids(&self) -> Vec<BlockId> {
        let mut ids = self.children_ids.clone();
        for block in self.blocks.values() {
            for list in block.props.child_lists() {
                ids.extend(list.iter().cloned());
            }
        }
        ids
    }

    /// Completeness check: every referenced id must resolve to a declared
    /// block. Reports the specific missing ids, sorted.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut missing: Vec<BlockId> = self
            .referenced_ids()
            .into_iter()
            .filter(|id| !self.blocks.contains_key(id))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            missing.sort();
            missing.dedup();
            Err(DocumentError::MissingBlocks { missing })
        }
    }

    /// Find a block's structural parent and sibling position.
    ///
    /// Exhaustive linear scan of the root list and every Container/Columns
    /// block; documents are small enough that no index is maintained.
    pub fn locate(&self, id: &str) -> Option<BlockLocation> {
        if let Some(index) = self.children_ids.iter().position(|c| c == id) {
            return Some(BlockLocation {
                parent: Parent::Root,
                index,
            });
        }

        for (owner_id, block) in &self.blocks {
            match &block.props {
                BlockProps::Container(props) => {
                    if let Some(index) = props.children_ids.iter().position(|c| c == id) {
                        return Some(BlockLocation {
                            parent: Parent::Container(owner_id.clone()),
                            index,
                        });
                    }
                }
                BlockProps::Columns(props) => {
                    for (column, slot) in props.columns.iter().enumerate() {
                        if let Some(index) = slot.children_ids.iter().position(|c| c == id) {
                            return Some(BlockLocation {
                                parent: Parent::Column(owner_id.clone(), column),
                                index,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        None
    }

    /// Resolve a parent slot to its child list. Returns `None` when the
    /// parent block is missing, is not a structural container, or the
    /// column index is out of range.
    pub fn child_list(&self, parent: &Parent) -> Option<&Vec<BlockId>> {
        match parent {
            Parent::Root => Some(&self.children_ids),
            Parent::Container(id) => match self.blocks.get(id).map(|b| &b.props) {
                Some(BlockProps::Container(props)) => Some(&props.children_ids),
                _ => None,
            },
            Parent::Column(id, column) => match self.blocks.get(id).map(|b| &b.props) {
                Some(BlockProps::Columns(props)) => {
                    props.columns.get(*column).map(|c| &c.children_ids)
                }
                _ => None,
            },
        }
    }

    pub fn child_list_mut(&mut self, parent: &Parent) -> Option<&mut Vec<BlockId>> {
        match parent {
            Parent::Root => Some(&mut self.children_ids),
            Parent::Container(id) => match self.blocks.get_mut(id).map(|b| &mut b.props) {
                Some(BlockProps::Container(props)) => Some(&mut props.children_ids),
                _ => None,
            },
            Parent::Column(id, column) => match self.blocks.get_mut(id).map(|b| &mut b.props) {
                Some(BlockProps::Columns(props)) => {
                    props.columns.get_mut(*column).map(|c| &mut c.children_ids)
                }
                _ => None,
            },
        }
    }

    /// The block plus every descendant reachable through Container/Columns
    /// child lists, preorder. Ids without a declared block are included so
    /// callers can clean up dangling references.
    pub fn collect_subtree(&self, id: &str) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];

        while let Some(current) = stack.pop() {
            if let Some(block) = self.blocks.get(&current) {
                for list in block.props.child_lists() {
                    for child in list.iter().rev() {
                        stack.push(child.clone());
                    }
                }
            }
            out.push(current);
        }

        out
    }
}
