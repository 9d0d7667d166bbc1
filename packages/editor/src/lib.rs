//! # Mailsmith Editor
//!
//! Editing state machine for email documents.
//!
//! ## Core Principles
//!
//! 1. **Snapshots, not inverse operations**: undo/redo restores bounded
//!    whole-document copies; no action needs a defined inverse.
//! 2. **Atomic publication**: each action computes its result from one
//!    immutable input snapshot and publishes one immutable output
//!    snapshot; there is no partial edit to observe.
//! 3. **Strict at the gate, lenient inside**: a document entering the
//!    session must pass the completeness check, but actions against it
//!    degrade to logged no-ops when their references turn out stale.
//! 4. **Single writer**: one session exclusively owns its document and
//!    history; no locking, no cross-session sharing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailsmith_editor::{EditAction, EditorState};
//! use mailsmith_document::BlockKind;
//!
//! let mut editor = EditorState::default();
//!
//! editor.apply(EditAction::AddBlock {
//!     kind: BlockKind::Heading,
//!     position: 0,
//!     parent_id: None,
//!     column_index: None,
//! });
//!
//! editor.undo();
//! editor.redo();
//!
//! // Hand the current document to the storage collaborator
//! let doc = editor.document();
//! assert!(editor.is_dirty());
//! ```

pub mod actions;
pub mod history;
pub mod state;

pub use actions::{BlockPatch, EditAction};
pub use history::{History, MAX_SNAPSHOTS};
pub use state::EditorState;
