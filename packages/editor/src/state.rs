//! Editor state machine.
//!
//! Owns the current document, the selection and the snapshot history for
//! one editing session. Every mutating action computes its result from a
//! deep copy of the current document and publishes the copy atomically:
//! there is no partial edit to observe, and history entries never alias
//! live state.
//!
//! ## Edge-case policy
//!
//! Acceptance of a document is strict (a dangling child reference is a
//! hard error), but actions against an accepted document are lenient: any
//! action that resolves to a missing block, parent or column degrades to
//! a logged no-op. The editor is driven by an interactive surface whose
//! references may be stale, and a dropped action the UI never reflects is
//! preferable to a crashed session.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use mailsmith_document::{
    new_block, new_block_id, BlockId, BlockKind, DocumentError, EmailDocument, Parent,
};

use crate::actions::{BlockPatch, EditAction};
use crate::history::History;

/// Editing state for one in-memory document session.
#[derive(Debug, Clone)]
pub struct EditorState {
    document: EmailDocument,
    selected_id: Option<BlockId>,
    history: History,
    dirty: bool,
}

impl Default for EditorState {
    /// Session over the default empty layout.
    fn default() -> Self {
        let document = EmailDocument::default();
        Self {
            history: History::new(document.clone()),
            document,
            selected_id: None,
            dirty: false,
        }
    }
}

impl EditorState {
    /// Create a session seeded with `document`. The document must pass the
    /// completeness check; incomplete documents are rejected, not patched.
    pub fn new(document: EmailDocument) -> Result<Self, DocumentError> {
        document.validate()?;
        Ok(Self {
            history: History::new(document.clone()),
            document,
            selected_id: None,
            dirty: false,
        })
    }

    pub fn document(&self) -> &EmailDocument {
        &self.document
    }

    pub fn selected_id(&self) -> Option<&BlockId> {
        self.selected_id.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Apply a structural action. Returns whether the document changed.
    pub fn apply(&mut self, action: EditAction) -> bool {
        match action {
            EditAction::AddBlock {
                kind,
                position,
                parent_id,
                column_index,
            } => self.apply_add(kind, position, parent_id, column_index),
            EditAction::UpdateBlock { block_id, patch } => self.apply_update(&block_id, patch),
            EditAction::DeleteBlock { block_id } => self.apply_delete(&block_id),
            EditAction::MoveBlock {
                block_id,
                position,
                parent_id,
                column_index,
            } => self.apply_move(&block_id, position, parent_id, column_index),
            EditAction::DuplicateBlock { block_id } => self.apply_duplicate(&block_id),
        }
    }

    /// Pure selection change; no history entry. Selecting a stale id is a
    /// no-op.
    pub fn select(&mut self, id: Option<BlockId>) {
        match id {
            None => self.selected_id = None,
            Some(id) if self.document.contains(&id) => self.selected_id = Some(id),
            Some(id) => debug!(block_id = %id, "select: unknown block, ignoring"),
        }
    }

    /// Step back one history entry. No-op at the oldest retained snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.document = snapshot;
        self.dirty = true;
        self.repair_selection();
        true
    }

    /// Step forward one history entry. No-op at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.document = snapshot;
        self.dirty = true;
        self.repair_selection();
        true
    }

    /// Replace the document wholesale (e.g. when loading a saved
    /// template). Resets history to a single entry and clears the dirty
    /// flag and selection. Incomplete documents are rejected.
    pub fn set_document(&mut self, document: EmailDocument) -> Result<(), DocumentError> {
        document.validate()?;
        self.history = History::new(document.clone());
        self.document = document;
        self.selected_id = None;
        self.dirty = false;
        Ok(())
    }

    /// Clear the dirty flag after the storage collaborator persisted the
    /// current document.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn apply_add(
        &mut self,
        kind: BlockKind,
        position: usize,
        parent_id: Option<BlockId>,
        column_index: Option<usize>,
    ) -> bool {
        let Some(parent) = resolve_parent(&self.document, parent_id, column_index) else {
            warn!(kind = %kind, "add: parent did not resolve, ignoring");
            return false;
        };

        let id = new_block_id(kind.name());
        let mut next = self.document.clone();
        next.blocks.insert(id.clone(), new_block(kind));
        let Some(list) = next.child_list_mut(&parent) else {
            return false;
        };
        let at = position.min(list.len());
        list.insert(at, id.clone());

        self.commit(next);
        self.selected_id = Some(id);
        true
    }

    fn apply_update(&mut self, block_id: &str, patch: BlockPatch) -> bool {
        let Some(current) = self.document.get(block_id) else {
            debug!(block_id = %block_id, "update: unknown block, ignoring");
            return false;
        };

        // A props patch may not change the block's variant: swapping, say,
        // Container props for Text props would silently drop the subtree.
        if let Some(props) = &patch.props {
            if props.kind() != current.kind() {
                warn!(
                    block_id = %block_id,
                    from = %current.kind(),
                    to = %props.kind(),
                    "update: patch would change block variant, ignoring"
                );
                return false;
            }

            // Nor may it detach children the block currently references:
            // those blocks would be stranded in the arena, unreachable by
            // delete. Removal goes through DeleteBlock.
            let kept: HashSet<&BlockId> = props
                .child_lists()
                .into_iter()
                .flat_map(|list| list.iter())
                .collect();
            let detached = current
                .props
                .child_lists()
                .into_iter()
                .flat_map(|list| list.iter())
                .find(|child| !kept.contains(child));
            if let Some(child) = detached {
                warn!(
                    block_id = %block_id,
                    child_id = %child,
                    "update: patch would detach a referenced child, ignoring"
                );
                return false;
            }
        }

        let mut next = self.document.clone();
        let Some(block) = next.get_mut(block_id) else {
            return false;
        };
        if let Some(style) = &patch.style {
            block.style = block.style.merged(style);
        }
        if let Some(props) = patch.props {
            block.props = props;
        }

        // Patched child lists (Container/Columns props) must still resolve
        if let Err(error) = next.validate() {
            warn!(block_id = %block_id, %error, "update: patch breaks completeness, ignoring");
            return false;
        }

        self.commit(next);
        true
    }

    fn apply_delete(&mut self, block_id: &str) -> bool {
        let Some(location) = self.document.locate(block_id) else {
            debug!(block_id = %block_id, "delete: block not attached, ignoring");
            return false;
        };

        let mut next = self.document.clone();
        if let Some(list) = next.child_list_mut(&location.parent) {
            list.remove(location.index);
        }
        // Cascade: a Container or Columns takes its whole subtree with it
        for id in self.document.collect_subtree(block_id) {
            next.blocks.shift_remove(&id);
        }

        self.commit(next);
        true
    }

    fn apply_move(
        &mut self,
        block_id: &str,
        position: usize,
        parent_id: Option<BlockId>,
        column_index: Option<usize>,
    ) -> bool {
        let Some(location) = self.document.locate(block_id) else {
            warn!(block_id = %block_id, "move: block not attached, ignoring");
            return false;
        };
        let Some(destination) = resolve_parent(&self.document, parent_id, column_index) else {
            warn!(block_id = %block_id, "move: destination did not resolve, ignoring");
            return false;
        };

        // A block may not move into its own subtree; that would detach the
        // subtree from the root while leaving its blocks in the arena.
        if let Parent::Container(owner) | Parent::Column(owner, _) = &destination {
            if self
                .document
                .collect_subtree(block_id)
                .iter()
                .any(|id| id == owner)
            {
                warn!(block_id = %block_id, "move: destination inside own subtree, ignoring");
                return false;
            }
        }

        let mut next = self.document.clone();
        if let Some(list) = next.child_list_mut(&location.parent) {
            list.remove(location.index);
        }
        let Some(list) = next.child_list_mut(&destination) else {
            return false;
        };
        let at = position.min(list.len());
        list.insert(at, block_id.to_string());

        self.commit(next);
        true
    }

    fn apply_duplicate(&mut self, block_id: &str) -> bool {
        let Some(location) = self.document.locate(block_id) else {
            warn!(block_id = %block_id, "duplicate: block not attached, ignoring");
            return false;
        };

        let subtree = self.document.collect_subtree(block_id);
        let mapping: HashMap<BlockId, BlockId> = subtree
            .iter()
            .filter_map(|id| {
                self.document
                    .get(id)
                    .map(|block| (id.clone(), new_block_id(block.kind().name())))
            })
            .collect();

        let mut next = self.document.clone();
        for id in &subtree {
            let Some(block) = self.document.get(id) else {
                continue;
            };
            let mut copy = block.clone();
            for list in copy.props.child_lists_mut() {
                *list = list
                    .iter()
                    .map(|child| mapping.get(child).cloned().unwrap_or_else(|| child.clone()))
                    .collect();
            }
            if let Some(new_id) = mapping.get(id) {
                next.blocks.insert(new_id.clone(), copy);
            }
        }

        let Some(copy_root) = mapping.get(block_id).cloned() else {
            return false;
        };
        let Some(list) = next.child_list_mut(&location.parent) else {
            return false;
        };
        let at = (location.index + 1).min(list.len());
        list.insert(at, copy_root.clone());

        self.commit(next);
        self.selected_id = Some(copy_root);
        true
    }

    fn commit(&mut self, next: EmailDocument) {
        self.document = next;
        self.history.push(self.document.clone());
        self.dirty = true;
        self.repair_selection();
    }

    /// Selection always points at a live block; clear it otherwise.
    fn repair_selection(&mut self) {
        if let Some(id) = &self.selected_id {
            if !self.document.contains(id) {
                self.selected_id = None;
            }
        }
    }
}

/// Resolve an action's parent addressing to a parent slot, checking that
/// the slot actually exists in `doc`.
fn resolve_parent(
    doc: &EmailDocument,
    parent_id: Option<BlockId>,
    column_index: Option<usize>,
) -> Option<Parent> {
    let parent = match (parent_id, column_index) {
        (None, _) => Parent::Root,
        (Some(id), None) => Parent::Container(id),
        (Some(id), Some(column)) => Parent::Column(id, column),
    };
    doc.child_list(&parent).map(|_| parent)
}
