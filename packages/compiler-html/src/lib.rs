//! # Mailsmith HTML Compiler
//!
//! Compiles an email document to client-safe HTML: table layout only,
//! inline styles only, dedicated Outlook markup paths where the standard
//! path breaks. Pure and deterministic — identical input yields
//! byte-identical output, and concurrent callers can share nothing but
//! the read-only document.
//!
//! Also derives the plain-text part for multipart delivery and provides
//! the merge-tag substitution pass preview and delivery layer on top.

mod compiler;
mod css;
mod substitute;
mod text;

#[cfg(test)]
mod tests;

pub use compiler::{render, render_with_options, RenderOptions, CONTENT_WIDTH};
pub use substitute::substitute;
pub use text::render_plain_text;
