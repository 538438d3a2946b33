//! Text renderer
//!
//! Consumes the scanner's token stream and produces the final plain-text
//! output: deferred separator coalescing, whitespace collapsing, entity
//! decoding, and anchor annotation.

use std::collections::VecDeque;

use detag_entities::decode_entities;

use crate::config::RenderOptions;
use crate::scanner::{Scanner, TagKind, Token};

/// Strength of a deferred line boundary. Requests combine by `max`, so a
/// stronger boundary is never weakened by a later, weaker one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Separator {
    None,
    Line,
    Paragraph,
}

/// Rendering state machine
pub struct Renderer {
    options: RenderOptions,
    pending: Separator,
    anchor_hrefs: VecDeque<String>,
    out: String,
}

impl Renderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            pending: Separator::None,
            anchor_hrefs: VecDeque::new(),
            out: String::new(),
        }
    }

    /// Convert a markup document to plain text
    pub fn convert(mut self, input: &str) -> String {
        let mut scanner = Scanner::new(input);
        loop {
            match scanner.next_token() {
                Token::Eof => break,
                token => self.process_token(token),
            }
        }
        // a trailing separator (e.g. after the last list item) survives
        self.flush_separator();
        self.out
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Text(raw) => self.emit_text(&raw),
            Token::TagOpen {
                kind, attributes, ..
            } => self.open_tag(kind, &attributes),
            Token::TagClose { kind, .. } => self.close_tag(kind),
            Token::SelfClosingTag { kind, .. } => {
                if kind == TagKind::Break {
                    self.request(Separator::Line);
                }
            }
            Token::Eof => {}
        }
    }

    fn open_tag(&mut self, kind: TagKind, attributes: &[(String, String)]) {
        match kind {
            TagKind::Paragraph | TagKind::Heading => self.request(Separator::Paragraph),
            TagKind::ListItem => self.request(Separator::Line),
            TagKind::Anchor => {
                let href = attributes
                    .iter()
                    .find(|(name, _)| name == "href")
                    .map(|(_, value)| decode_entities(value))
                    .unwrap_or_default();
                self.anchor_hrefs.push_back(href);
            }
            TagKind::Break | TagKind::ScriptLike | TagKind::Generic => {}
        }
    }

    fn close_tag(&mut self, kind: TagKind) {
        match kind {
            TagKind::Paragraph | TagKind::Heading => self.request(Separator::Paragraph),
            TagKind::ListItem => self.request(Separator::Line),
            TagKind::Anchor => self.annotate_anchor(),
            TagKind::Break | TagKind::ScriptLike | TagKind::Generic => {}
        }
    }

    /// Append ` <href>` for the oldest unclosed anchor. The queue is FIFO,
    /// not a stack: improperly nested anchors resolve in open order.
    /// Unmatched closing tags (empty queue) are tolerated.
    fn annotate_anchor(&mut self) {
        if let Some(href) = self.anchor_hrefs.pop_front() {
            if !href.is_empty() && !href.starts_with("javascript:") {
                self.out.push_str(" <");
                self.out.push_str(&href);
                self.out.push('>');
            }
        }
    }

    /// Raise the pending separator to `level` if it is stronger
    fn request(&mut self, level: Separator) {
        self.pending = self.pending.max(level);
    }

    /// Decode a raw text run and stream it out with whitespace collapsing
    fn emit_text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        for c in decoded.chars() {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                self.write_space();
            } else {
                self.flush_separator();
                self.out.push(c);
            }
        }
    }

    /// Collapse a whitespace run to a single space. Dropped entirely at
    /// the start of output, after an existing space or line break, and
    /// while a separator is pending (the separator subsumes it).
    fn write_space(&mut self) {
        if self.pending != Separator::None
            || self.out.is_empty()
            || self.out.ends_with(' ')
            || self.out.ends_with('\n')
        {
            return;
        }
        self.out.push(' ');
    }

    /// Write the pending separator once and reset it. A separator with no
    /// preceding output is discarded, never written.
    fn flush_separator(&mut self) {
        let pending = std::mem::replace(&mut self.pending, Separator::None);
        if pending == Separator::None || self.out.is_empty() {
            return;
        }
        let lbr = self.options.line_breaks.as_str();
        self.out.push_str(lbr);
        if pending == Separator::Paragraph {
            self.out.push_str(lbr);
        }
    }
}
