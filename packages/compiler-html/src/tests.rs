use std::collections::HashMap;

use mailsmith_document::{
    new_block, new_block_id, templates, Block, BlockId, BlockKind, BlockProps, BlockStyle,
    ButtonProps, Column, ColumnsProps, ContainerProps, EmailDocument, FontFamily, HeadingProps,
    HeroProps, ListProps, Padding, SpacerProps, TextProps,
};
use mailsmith_editor::{BlockPatch, EditAction, EditorState};

use crate::{render, render_plain_text, render_with_options, substitute, RenderOptions};

fn add_root_block(doc: &mut EmailDocument, block: Block) -> BlockId {
    let id = new_block_id(block.kind().name());
    doc.children_ids.push(id.clone());
    doc.blocks.insert(id.clone(), block);
    id
}

fn heading(text: &str) -> Block {
    let mut block = new_block(BlockKind::Heading);
    block.props = BlockProps::Heading(HeadingProps {
        text: text.to_string(),
        ..Default::default()
    });
    block
}

fn paragraph(text: &str) -> Block {
    let mut block = new_block(BlockKind::Text);
    block.props = BlockProps::Text(TextProps {
        text: text.to_string(),
    });
    block
}

fn button(text: &str, url: &str) -> Block {
    let mut block = new_block(BlockKind::Button);
    block.props = BlockProps::Button(ButtonProps {
        text: text.to_string(),
        url: url.to_string(),
        ..Default::default()
    });
    block
}

#[test]
fn test_end_to_end_scenario_through_editor() {
    let mut editor = EditorState::default();
    assert_eq!(editor.document().backdrop_color, "#F8F8F8");
    assert_eq!(editor.document().canvas_color, "#FFFFFF");

    editor.apply(EditAction::AddBlock {
        kind: BlockKind::Heading,
        position: 0,
        parent_id: None,
        column_index: None,
    });
    let heading_id = editor.selected_id().unwrap().clone();
    editor.apply(EditAction::UpdateBlock {
        block_id: heading_id,
        patch: BlockPatch::props(BlockProps::Heading(HeadingProps {
            text: "Welcome".to_string(),
            ..Default::default()
        })),
    });

    editor.apply(EditAction::AddBlock {
        kind: BlockKind::Button,
        position: 1,
        parent_id: None,
        column_index: None,
    });
    let button_id = editor.selected_id().unwrap().clone();
    editor.apply(EditAction::UpdateBlock {
        block_id: button_id,
        patch: BlockPatch::props(BlockProps::Button(ButtonProps {
            text: "Click me".to_string(),
            url: "#".to_string(),
            ..Default::default()
        })),
    });

    let html = render(editor.document());

    let heading_at = html.find("Welcome").expect("heading text rendered");
    let button_at = html.find("Click me").expect("button text rendered");
    assert!(heading_at < button_at, "blocks render in document order");

    // Each block sits in its own presentation table
    let tables = html.matches("<table role=\"presentation\"").count();
    assert!(tables >= 2, "expected at least two block tables, got {}", tables);
}

#[test]
fn test_render_is_deterministic() {
    let doc = templates::welcome();
    assert_eq!(render(&doc), render(&doc));
}

#[test]
fn test_renderer_tolerates_what_validation_rejects() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, paragraph("still here"));
    doc.children_ids.push("text-dangling".to_string());

    // Strict gate rejects the document
    assert!(doc.validate().is_err());
    assert!(EditorState::new(doc.clone()).is_err());

    // The compiler renders best-effort output instead
    let html = render(&doc);
    assert!(html.contains("still here"));
    assert!(!html.contains("text-dangling"));
}

#[test]
fn test_button_renders_both_outlook_and_standard_paths() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, button("Buy now", "https://example.com/buy"));

    let html = render(&doc);

    // Same visible text and target on both markup paths
    assert_eq!(html.matches("Buy now").count(), 2);
    assert_eq!(html.matches("https://example.com/buy").count(), 2);
    assert!(html.contains("<!--[if mso]>"));
    assert!(html.contains("v:roundrect"));
    assert!(html.contains("fillcolor=\"#3B82F6\""));
    assert!(html.contains("strokecolor=\"#3B82F6\""));
    assert!(html.contains("background-color:#3B82F6;"));
    assert!(html.contains("<a href=\"https://example.com/buy\""));
}

#[test]
fn test_uniform_padding_collapses_to_shorthand() {
    let mut doc = EmailDocument::default();
    let mut block = paragraph("padded");
    block.style = BlockStyle {
        padding: Some(Padding::uniform(20)),
        ..Default::default()
    };
    add_root_block(&mut doc, block);

    let html = render(&doc);
    assert!(html.contains("padding:20px;"));
    assert!(!html.contains("padding:20px 20px"));
}

#[test]
fn test_asymmetric_padding_emits_four_values() {
    let mut doc = EmailDocument::default();
    let mut block = paragraph("padded");
    block.style = BlockStyle {
        padding: Some(Padding::symmetric(10, 30)),
        ..Default::default()
    };
    add_root_block(&mut doc, block);

    let html = render(&doc);
    assert!(html.contains("padding:10px 30px 10px 30px;"));
}

#[test]
fn test_short_hex_colors_are_expanded() {
    let mut doc = EmailDocument {
        canvas_color: "#fff".to_string(),
        ..Default::default()
    };
    let mut block = paragraph("tinted");
    block.style = BlockStyle {
        background_color: Some("#e2e".to_string()),
        ..Default::default()
    };
    add_root_block(&mut doc, block);

    let html = render(&doc);
    assert!(html.contains("background-color:#ffffff;"));
    assert!(html.contains("background-color:#ee22ee;"));
    assert!(!html.contains("#e2e\""));
}

#[test]
fn test_absent_background_emits_no_property() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, new_block(BlockKind::Container));

    let html = render(&doc);
    // Backdrop and canvas tables carry the only bgcolor attributes
    assert_eq!(html.matches("bgcolor=").count(), 2);
}

#[test]
fn test_container_emits_bgcolor_attribute_and_inline_style() {
    let mut doc = EmailDocument::default();
    let mut container = new_block(BlockKind::Container);
    container.style = BlockStyle {
        background_color: Some("#FAFAFA".to_string()),
        ..Default::default()
    };
    add_root_block(&mut doc, container);

    let html = render(&doc);
    assert!(html.contains("bgcolor=\"#FAFAFA\""));
    assert!(html.contains("background-color:#FAFAFA;"));
}

#[test]
fn test_empty_container_renders_placeholder() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, new_block(BlockKind::Container));

    let html = render(&doc);
    assert!(html.contains("&nbsp;"));
}

#[test]
fn test_empty_text_renders_placeholder() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, paragraph(""));

    let html = render(&doc);
    assert!(html.contains("&nbsp;"));
}

#[test]
fn test_columns_width_math() {
    let mut doc = EmailDocument::default();
    let a = new_block_id("text");
    doc.blocks.insert(a.clone(), paragraph("left"));
    let b = new_block_id("text");
    doc.blocks.insert(b.clone(), paragraph("middle"));
    let c = new_block_id("text");
    doc.blocks.insert(c.clone(), paragraph("right"));

    let mut columns = new_block(BlockKind::Columns);
    columns.props = BlockProps::Columns(ColumnsProps {
        columns: vec![
            Column {
                children_ids: vec![a],
            },
            Column {
                children_ids: vec![b],
            },
            Column {
                children_ids: vec![c],
            },
        ],
    });
    add_root_block(&mut doc, columns);

    let html = render(&doc);
    // 100 / 3 floors to 33, 600 / 3 is 200
    assert_eq!(html.matches("width=\"33%\"").count(), 3);
    assert_eq!(html.matches("max-width:200px;").count(), 3);
    assert!(html.contains("left"));
    assert!(html.contains("middle"));
    assert!(html.contains("right"));
}

#[test]
fn test_nested_container_renders_children_in_order() {
    let mut doc = EmailDocument::default();
    let first = new_block_id("text");
    doc.blocks.insert(first.clone(), paragraph("first"));
    let second = new_block_id("text");
    doc.blocks.insert(second.clone(), paragraph("second"));

    let mut container = new_block(BlockKind::Container);
    container.props = BlockProps::Container(ContainerProps {
        children_ids: vec![first, second],
    });
    add_root_block(&mut doc, container);

    let html = render(&doc);
    assert!(html.find("first").unwrap() < html.find("second").unwrap());
}

#[test]
fn test_spacer_emits_fixed_height_cell() {
    let mut doc = EmailDocument::default();
    let mut spacer = new_block(BlockKind::Spacer);
    spacer.props = BlockProps::Spacer(SpacerProps { height: 40 });
    add_root_block(&mut doc, spacer);

    let html = render(&doc);
    assert!(html.contains("height=\"40\""));
    assert!(html.contains("height:40px;"));
}

#[test]
fn test_hero_overlay_and_opacity_clamp() {
    let mut doc = EmailDocument::default();
    let mut hero = new_block(BlockKind::Hero);
    hero.props = BlockProps::Hero(HeroProps {
        image_url: "https://example.com/banner.jpg".to_string(),
        overlay_color: "#000".to_string(),
        overlay_opacity: 3.0,
        title: "Big Sale".to_string(),
        subtitle: "This week only".to_string(),
    });
    add_root_block(&mut doc, hero);

    let html = render(&doc);
    assert!(html.contains("background-image:url('https://example.com/banner.jpg')"));
    assert!(html.contains("background-color:#000000;opacity:1;"));
    assert!(html.contains("Big Sale"));
    assert!(html.contains("This week only"));
}

#[test]
fn test_heading_level_picks_tag() {
    let mut doc = EmailDocument::default();
    let mut block = heading("Top");
    block.props = BlockProps::Heading(HeadingProps {
        text: "Top".to_string(),
        level: mailsmith_document::HeadingLevel::One,
    });
    add_root_block(&mut doc, block);

    let html = render(&doc);
    assert!(html.contains("<h1"));
    assert!(html.contains("</h1>"));
}

#[test]
fn test_text_content_is_escaped() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, paragraph("5 < 6 & \"quotes\""));

    let html = render(&doc);
    assert!(html.contains("5 &lt; 6 &amp; &quot;quotes&quot;"));
    assert!(!html.contains("5 < 6"));
}

#[test]
fn test_font_preset_resolves_in_output() {
    let mut doc = EmailDocument {
        font_family: FontFamily::Mono,
        ..Default::default()
    };
    add_root_block(&mut doc, paragraph("code"));

    let html = render(&doc);
    assert!(html.contains("Courier"));
}

#[test]
fn test_render_options_title_and_preheader() {
    let doc = EmailDocument::default();
    let html = render_with_options(
        &doc,
        &RenderOptions {
            title: "March newsletter".to_string(),
            preheader: Some("Fresh picks inside".to_string()),
        },
    );

    assert!(html.contains("<title>March newsletter</title>"));
    assert!(html.contains("Fresh picks inside"));
    assert!(html.contains("display:none"));
}

#[test]
fn test_plain_text_derivation() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, heading("Welcome"));
    add_root_block(&mut doc, paragraph("Glad to have you."));
    add_root_block(&mut doc, button("Start", "https://example.com/start"));
    let mut list = new_block(BlockKind::List);
    list.props = BlockProps::List(ListProps {
        ordered: false,
        items: vec!["One".to_string(), "Two".to_string()],
    });
    add_root_block(&mut doc, list);

    let text = render_plain_text(&doc);
    let welcome = text.find("Welcome").unwrap();
    let glad = text.find("Glad to have you.").unwrap();
    let start = text.find("Start: https://example.com/start").unwrap();
    assert!(welcome < glad && glad < start);
    assert!(text.contains("- One\n- Two"));
    assert!(!text.contains('<'), "plain text output has no markup");
}

#[test]
fn test_substitution_over_rendered_output() {
    let mut doc = EmailDocument::default();
    add_root_block(&mut doc, paragraph("Hi {{first_name}}, your code is {{code}}."));

    let html = render(&doc);
    let mut values = HashMap::new();
    values.insert("first_name".to_string(), "Ada".to_string());

    let out = substitute(&html, &values);
    assert!(out.contains("Hi Ada, your code is {{code}}."));
}

#[test]
fn test_welcome_template_renders_every_text() {
    let doc = templates::welcome();
    let html = render(&doc);

    assert!(html.contains("Welcome to the team"));
    assert!(html.contains("Get started"));
    assert!(html.contains("Twitter"));
    assert!(html.contains("Blog"));
}
