//! # Delimiter Lexer
//!
//! Scans text left to right for the eight fixed delimiters and the inline
//! link form `[text](url)`, using a [Logos] generated lexer.
//!
//! [Logos]: https://docs.rs/logos
//!
//! Only matches are yielded. Everything else (plain runs, stray single `*`,
//! `-`, `_`, `~`, `|`, a `[` that does not open a link) is left to the
//! consumer to copy through from the gaps between match spans.
//!
//! ## Longest Match
//!
//! Logos always takes the longest token at a position, so ```` ``` ```` is
//! one `Pre` delimiter rather than three `Code` delimiters, and ```` ```` ````
//! is `Pre` followed by `Code`.
//!
//! ## Links
//!
//! Link text and url behave like the lazy regex `\[(.+?)\]\((.+?)\)`: both are
//! non-empty, neither crosses a newline, the text ends at the first `](` for
//! which a url can be completed, and the url ends at the first `)` that
//! leaves it non-empty.

use logos::{Lexer, Logos};

use super::{kinds::DelimiterKind, span::Span};

/// Byte lengths of the two captures of a link, measured after the `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSplit {
    pub text_len: usize,
    pub url_len: usize,
}

impl LinkSplit {
    const TEXT_END: &'static str = "](";
    const URL_END: char = ')';

    /// Total length of `text](url)`, i.e. the link minus its opening `[`.
    fn tail_len(self) -> usize {
        self.text_len + Self::TEXT_END.len() + self.url_len + Self::URL_END.len_utf8()
    }
}

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[token("```")]
    Pre,

    #[token("`")]
    Code,

    #[token("~~")]
    Strikethrough,

    #[token("--")]
    Underline,

    #[token("__")]
    Italic,

    #[token("**")]
    Bold,

    #[token("||")]
    Spoiler,

    #[token(">")]
    Quote,

    #[token("[", scan_link)]
    Link(LinkSplit),

    /// Runs of characters that can never start a match.
    #[regex(r"[^`~_*|>\[-]+")]
    Text,
}

impl TokenKind {
    /// The delimiter this token stands for, if it is one.
    pub fn to_delimiter(self) -> Option<DelimiterKind> {
        match self {
            TokenKind::Pre => Some(DelimiterKind::Pre),
            TokenKind::Code => Some(DelimiterKind::Code),
            TokenKind::Strikethrough => Some(DelimiterKind::Strikethrough),
            TokenKind::Underline => Some(DelimiterKind::Underline),
            TokenKind::Italic => Some(DelimiterKind::Italic),
            TokenKind::Bold => Some(DelimiterKind::Bold),
            TokenKind::Spoiler => Some(DelimiterKind::Spoiler),
            TokenKind::Quote => Some(DelimiterKind::Quote),
            TokenKind::Link(_) | TokenKind::Text => None,
        }
    }
}

/// Finds the captures of a link given the text following its `[`.
pub fn split_link(after_open: &str) -> Option<LinkSplit> {
    let line = after_open.split('\n').next().unwrap_or_default();

    for (text_len, _) in line.match_indices(LinkSplit::TEXT_END) {
        if text_len == 0 {
            continue;
        }
        let url = &line[text_len + LinkSplit::TEXT_END.len()..];
        let Some(first) = url.chars().next() else {
            continue;
        };
        let first_len = first.len_utf8();
        if let Some(close) = url[first_len..].find(LinkSplit::URL_END) {
            return Some(LinkSplit {
                text_len,
                url_len: first_len + close,
            });
        }
    }
    None
}

fn scan_link(lex: &mut Lexer<TokenKind>) -> Option<LinkSplit> {
    let split = split_link(lex.remainder())?;
    lex.bump(split.tail_len());
    Some(split)
}

/// What a [`Match`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Delimiter(DelimiterKind),
    Link {
        /// Span of the text between `[` and `](`.
        text: Span,
        /// Span of the url between `(` and `)`.
        url: Span,
    },
}

/// A delimiter or link found in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: MatchKind,
    /// Full span of the match, including brackets for links.
    pub span: Span,
}

/// Iterator over the matches in a text, in source order.
pub struct DelimiterLexer<'a> {
    inner: Lexer<'a, TokenKind>,
}

impl<'a> DelimiterLexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
        }
    }
}

impl Iterator for DelimiterLexer<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            let token = self.inner.next()?;
            let span = Span::from(self.inner.span());
            let kind = match token {
                Ok(TokenKind::Link(split)) => {
                    let text_start = span.start + 1;
                    let url_start = text_start + split.text_len + LinkSplit::TEXT_END.len();
                    MatchKind::Link {
                        text: Span::from(text_start..text_start + split.text_len),
                        url: Span::from(url_start..url_start + split.url_len),
                    }
                }
                Ok(token) => match token.to_delimiter() {
                    Some(delimiter) => MatchKind::Delimiter(delimiter),
                    None => continue,
                },
                // A lone marker character that starts no token is plain text.
                Err(()) => continue,
            };
            return Some(Match { kind, span });
        }
    }
}

/// Collects all matches in `source`.
pub fn lex(source: &str) -> Vec<Match> {
    DelimiterLexer::new(source).collect()
}
