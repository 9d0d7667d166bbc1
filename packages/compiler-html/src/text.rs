//! Plain-text derivation.
//!
//! Delivery sends a text part alongside the HTML part; this walks the
//! same block order as the HTML compiler and emits readable text. Shares
//! the compiler's leniency: unresolved references produce nothing.

use mailsmith_document::{BlockProps, EmailDocument};

/// Derive the plain-text version of a document.
pub fn render_plain_text(document: &EmailDocument) -> String {
    let mut out = String::new();
    render_ids(&mut out, document, &document.children_ids);
    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

fn render_ids(out: &mut String, document: &EmailDocument, ids: &[String]) {
    for id in ids {
        let Some(block) = document.get(id) else {
            continue;
        };
        match &block.props {
            BlockProps::Text(props) => {
                if !props.text.is_empty() {
                    out.push_str(&props.text);
                    out.push_str("\n\n");
                }
            }
            BlockProps::Heading(props) => {
                if !props.text.is_empty() {
                    out.push_str(&props.text);
                    out.push_str("\n\n");
                }
            }
            BlockProps::Image(props) => {
                if !props.alt.is_empty() {
                    out.push_str(&format!("[{}]\n\n", props.alt));
                }
            }
            BlockProps::Button(props) => {
                if !props.text.is_empty() || !props.url.is_empty() {
                    out.push_str(&format!("{}: {}\n\n", props.text, props.url));
                }
            }
            BlockProps::Divider(_) => {
                out.push_str("----------------------------------------\n\n");
            }
            BlockProps::Spacer(_) => {}
            BlockProps::Columns(props) => {
                for column in &props.columns {
                    render_ids(out, document, &column.children_ids);
                }
            }
            BlockProps::Container(props) => {
                render_ids(out, document, &props.children_ids);
            }
            BlockProps::Avatar(props) => {
                if !props.alt.is_empty() {
                    out.push_str(&format!("[{}]\n\n", props.alt));
                }
            }
            BlockProps::Html(_) => {}
            BlockProps::SocialLinks(props) => {
                for link in &props.links {
                    out.push_str(&format!("{}: {}\n", link.label, link.url));
                }
                if !props.links.is_empty() {
                    out.push('\n');
                }
            }
            BlockProps::List(props) => {
                for (index, item) in props.items.iter().enumerate() {
                    if props.ordered {
                        out.push_str(&format!("{}. {}\n", index + 1, item));
                    } else {
                        out.push_str(&format!("- {}\n", item));
                    }
                }
                if !props.items.is_empty() {
                    out.push('\n');
                }
            }
            BlockProps::Hero(props) => {
                if !props.title.is_empty() {
                    out.push_str(&props.title);
                    out.push('\n');
                }
                if !props.subtitle.is_empty() {
                    out.push_str(&props.subtitle);
                    out.push('\n');
                }
                if !props.title.is_empty() || !props.subtitle.is_empty() {
                    out.push('\n');
                }
            }
            BlockProps::Quote(props) => {
                if !props.text.is_empty() {
                    out.push_str(&format!("> {}\n", props.text));
                    if !props.attribution.is_empty() {
                        out.push_str(&format!("> -- {}\n", props.attribution));
                    }
                    out.push('\n');
                }
            }
        }
    }
}
