//! detag text conversion
//!
//! Converts markup documents to normalized plain text: tags are stripped,
//! entities are decoded, and meaningful boundaries (paragraphs, headings,
//! list items, explicit line breaks) become line separators. Hyperlink
//! targets survive as a bracketed annotation after the link text; script,
//! style and head subtrees are dropped entirely.

mod config;
mod renderer;
mod scanner;

pub use config::{set_unix_line_breaks, LineBreakStyle, RenderOptions};
pub use renderer::{Renderer, Separator};
pub use scanner::{AttributeList, Scanner, TagKind, Token};

pub use detag_entities::decode_entities;

/// Convert a markup document to plain text using the process-wide default
/// line-break style (see [`set_unix_line_breaks`]).
pub fn html_to_text(input: &str) -> String {
    html_to_text_with_options(
        input,
        RenderOptions {
            line_breaks: LineBreakStyle::global_default(),
        },
    )
}

/// Convert a markup document to plain text with explicit options.
pub fn html_to_text_with_options(input: &str, options: RenderOptions) -> String {
    log::trace!("converting {} bytes of markup", input.len());
    Renderer::new(options).convert(input)
}
