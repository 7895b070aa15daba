use std::collections::HashSet;

use log::trace;

use super::{
    kinds::DelimiterKind,
    lexer::{DelimiterLexer, Match, MatchKind},
    quote::BlockQuote,
    span::Span,
};

/// Whether a delimiter opened or closed its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    Closed,
}

/// Mutable state of one `parse` call.
///
/// Delimiters toggle rather than nest: a kind is either open or not, so two
/// occurrences of the same delimiter always open then close.
#[derive(Debug, Default)]
pub struct ParseState {
    open: HashSet<DelimiterKind>,
    fixed_width: bool,
}

impl ParseState {
    /// Flips `kind` between open and closed.
    pub fn toggle(&mut self, kind: DelimiterKind) -> Toggle {
        if self.open.remove(&kind) {
            Toggle::Closed
        } else {
            self.open.insert(kind);
            Toggle::Opened
        }
    }

    pub fn is_open(&self, kind: DelimiterKind) -> bool {
        self.open.contains(&kind)
    }

    /// True inside a Code or Pre region.
    pub fn fixed_width(&self) -> bool {
        self.fixed_width
    }

    /// Code and Pre share one flag.
    fn flip_fixed_width(&mut self) {
        self.fixed_width = !self.fixed_width;
    }
}

/// Converts delimiter markdown into tag markup.
///
/// # Behavior
/// - `**`, `__`, `--`, `~~`, `||`, `` ` `` become `<b>`, `<i>`, `<u>`, `<s>`,
///   `<spoiler>`, `<code>` and their closing tags, alternating open/close.
/// - `[text](url)` becomes `<a href="url">text</a>`.
/// - Inside `` ` `` or ```` ``` ```` everything else is left untouched.
/// - ```` ```lang ```` opens `<pre language="lang">`; the rest of the fence
///   line is the language.
/// - The first opening `>` rewrites the whole document line by line into
///   `<blockquote>` blocks and returns right away; delimiters after it are
///   never converted.
///
/// Unterminated delimiters are left unbalanced.
pub fn parse(text: &str) -> String {
    Parser::new(text).run()
}

/// Scanner over an immutable input with an output builder.
struct Parser<'a> {
    src: &'a str,
    out: String,
    /// Bytes of `src` already written to `out` or consumed.
    copied: usize,
    state: ParseState,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            out: String::with_capacity(src.len()),
            copied: 0,
            state: ParseState::default(),
        }
    }

    fn run(mut self) -> String {
        for m in DelimiterLexer::new(self.src) {
            if m.span.start < self.copied {
                // Lexed from a fence line already consumed as a language hint.
                continue;
            }
            match m.kind {
                MatchKind::Link { text, url } => self.link(m, text, url),
                MatchKind::Delimiter(kind) => {
                    if let Some(document) = self.delimiter(m, kind) {
                        return document;
                    }
                }
            }
        }
        self.copy_until(self.src.len());
        self.out
    }

    fn link(&mut self, m: Match, text: Span, url: Span) {
        if self.state.fixed_width() {
            trace!("link at {} suppressed in fixed-width region", m.span.start);
            return;
        }
        self.copy_until(m.span.start);
        self.out.push_str("<a href=\"");
        self.out.push_str(url.slice(self.src));
        self.out.push_str("\">");
        self.out.push_str(text.slice(self.src));
        self.out.push_str("</a>");
        self.copied = m.span.end;
    }

    /// Handles one delimiter. Returns the finished document when a quote
    /// short-circuits the scan.
    fn delimiter(&mut self, m: Match, kind: DelimiterKind) -> Option<String> {
        if kind.is_fixed_width() {
            self.state.flip_fixed_width();
        } else if self.state.fixed_width() {
            trace!("{kind:?} at {} suppressed in fixed-width region", m.span.start);
            return None;
        }

        let toggle = self.state.toggle(kind);
        trace!("{kind:?} {toggle:?} at {}", m.span.start);
        self.copy_until(m.span.start);

        match (kind, toggle) {
            (DelimiterKind::Pre, Toggle::Opened) => {
                let line_end = self.src[m.span.end..]
                    .find('\n')
                    .map_or(self.src.len(), |i| m.span.end + i);
                let language = &self.src[m.span.end..line_end];
                self.out.push_str("<pre language=\"");
                self.out.push_str(language);
                self.out.push_str("\">");
                self.copied = line_end;
            }
            (DelimiterKind::Quote, Toggle::Opened) => {
                self.out.push_str(&self.src[m.span.start..]);
                return Some(BlockQuote::wrap_quoted_lines(&self.out));
            }
            (_, Toggle::Opened) => {
                self.out.push_str(&kind.opening_tag());
                self.copied = m.span.end;
            }
            (_, Toggle::Closed) => {
                self.out.push_str(&kind.closing_tag());
                self.copied = m.span.end;
            }
        }
        None
    }

    fn copy_until(&mut self, end: usize) {
        if end > self.copied {
            self.out.push_str(&self.src[self.copied..end]);
            self.copied = end;
        }
    }
}
