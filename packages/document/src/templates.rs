//! Predefined campaign templates.
//!
//! Templates are independent static documents. Before one seeds an editing
//! session it must pass through [`instantiate`], which rewrites every id to
//! a fresh one so two sessions created from the same template never share
//! block identity.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::block::{
    Block, BlockId, BlockKind, BlockProps, ButtonProps, Column, ColumnsProps, HeadingProps,
    SocialLink, SocialLinksProps, TextProps,
};
use crate::document::EmailDocument;
use crate::error::DocumentError;
use crate::factory::{new_block, new_block_id};

/// The default empty layout.
pub fn blank() -> EmailDocument {
    EmailDocument::default()
}

/// Welcome-campaign starter: heading, intro text, call to action, divider
/// and a two-column footer.
pub fn welcome() -> EmailDocument {
    let mut doc = EmailDocument::default();

    let mut heading = new_block(BlockKind::Heading);
    heading.props = BlockProps::Heading(HeadingProps {
        text: "Welcome to the team".to_string(),
        ..Default::default()
    });
    add_root(&mut doc, heading);

    let mut intro = new_block(BlockKind::Text);
    intro.props = BlockProps::Text(TextProps {
        text: "Thanks for signing up, {{first_name}}. Here is everything you need to get started."
            .to_string(),
    });
    add_root(&mut doc, intro);

    let mut cta = new_block(BlockKind::Button);
    cta.props = BlockProps::Button(ButtonProps {
        text: "Get started".to_string(),
        url: "https://example.com/start".to_string(),
        ..Default::default()
    });
    add_root(&mut doc, cta);

    add_root(&mut doc, new_block(BlockKind::Divider));

    let mut left = new_block(BlockKind::Text);
    left.props = BlockProps::Text(TextProps {
        text: "Questions? Just reply to this email.".to_string(),
    });
    let left_id = add_orphan(&mut doc, left);

    let mut right = new_block(BlockKind::SocialLinks);
    right.props = BlockProps::SocialLinks(SocialLinksProps {
        links: vec![
            SocialLink {
                label: "Twitter".to_string(),
                url: "https://twitter.com/example".to_string(),
            },
            SocialLink {
                label: "Blog".to_string(),
                url: "https://example.com/blog".to_string(),
            },
        ],
    });
    let right_id = add_orphan(&mut doc, right);

    let mut footer = new_block(BlockKind::Columns);
    footer.props = BlockProps::Columns(ColumnsProps {
        columns: vec![
            Column {
                children_ids: vec![left_id],
            },
            Column {
                children_ids: vec![right_id],
            },
        ],
    });
    add_root(&mut doc, footer);

    doc
}

/// Copy a template into a fresh set of identifiers, preserving all
/// child-list references. Refuses incomplete templates.
pub fn instantiate(template: &EmailDocument) -> Result<EmailDocument, DocumentError> {
    template.validate()?;

    let mapping: HashMap<BlockId, BlockId> = template
        .blocks
        .iter()
        .map(|(id, block)| (id.clone(), new_block_id(block.kind().name())))
        .collect();

    let mut blocks = IndexMap::with_capacity(template.blocks.len());
    for (id, block) in &template.blocks {
        let mut copy = block.clone();
        for list in copy.props.child_lists_mut() {
            *list = remap(list, &mapping);
        }
        blocks.insert(mapping[id].clone(), copy);
    }

    Ok(EmailDocument {
        children_ids: remap(&template.children_ids, &mapping),
        blocks,
        ..template.clone()
    })
}

fn remap(ids: &[BlockId], mapping: &HashMap<BlockId, BlockId>) -> Vec<BlockId> {
    // Every id is in the mapping once the template has validated
    ids.iter()
        .map(|id| mapping.get(id).cloned().unwrap_or_else(|| id.clone()))
        .collect()
}

fn add_root(doc: &mut EmailDocument, block: Block) -> BlockId {
    let id = add_orphan(doc, block);
    doc.children_ids.push(id.clone());
    id
}

fn add_orphan(doc: &mut EmailDocument, block: Block) -> BlockId {
    let id = new_block_id(block.kind().name());
    doc.blocks.insert(id.clone(), block);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_welcome_template_is_complete() {
        assert!(welcome().validate().is_ok());
    }

    #[test]
    fn test_template_json_round_trip_is_lossless() {
        let template = welcome();
        let json = serde_json::to_string(&template).unwrap();
        let back: EmailDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }

    #[test]
    fn test_instantiate_rewrites_every_id() {
        let template = welcome();
        let instance = instantiate(&template).unwrap();

        let template_ids: HashSet<&BlockId> = template.blocks.keys().collect();
        for id in instance.blocks.keys() {
            assert!(!template_ids.contains(id));
        }
        assert_eq!(instance.blocks.len(), template.blocks.len());
        assert!(instance.validate().is_ok());
    }

    #[test]
    fn test_instantiate_preserves_structure() {
        let template = welcome();
        let a = instantiate(&template).unwrap();
        let b = instantiate(&template).unwrap();

        // Same shape, disjoint identities
        assert_eq!(a.children_ids.len(), b.children_ids.len());
        let a_ids: HashSet<&BlockId> = a.blocks.keys().collect();
        assert!(b.blocks.keys().all(|id| !a_ids.contains(id)));

        // Block content survives the rewrite
        let a_kinds: Vec<_> = a.blocks.values().map(|block| block.kind()).collect();
        let b_kinds: Vec<_> = b.blocks.values().map(|block| block.kind()).collect();
        assert_eq!(a_kinds, b_kinds);
    }

    #[test]
    fn test_instantiate_refuses_incomplete_template() {
        let mut template = welcome();
        let first_root = template.children_ids[0].clone();
        template.blocks.shift_remove(&first_root);

        match instantiate(&template) {
            Err(DocumentError::MissingBlocks { missing }) => {
                assert_eq!(missing, vec![first_root]);
            }
            other => panic!("expected MissingBlocks, got {:?}", other),
        }
    }
}
