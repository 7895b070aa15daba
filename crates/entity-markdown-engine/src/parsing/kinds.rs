//! # Delimiter Kinds
//!
//! Every delimiter owns its marker text and the tag it becomes. The lexer,
//! the parser and the entity serializer all read from here; none of them
//! hardcodes `**` or `b`.

/// One of the eight fixed delimiters of the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    Quote,
}

impl DelimiterKind {
    pub const BOLD: &'static str = "**";
    pub const ITALIC: &'static str = "__";
    pub const UNDERLINE: &'static str = "--";
    pub const STRIKETHROUGH: &'static str = "~~";
    pub const SPOILER: &'static str = "||";
    pub const CODE: &'static str = "`";
    pub const PRE: &'static str = "```";
    pub const QUOTE: &'static str = ">";

    pub const ALL: [DelimiterKind; 8] = [
        DelimiterKind::Bold,
        DelimiterKind::Italic,
        DelimiterKind::Underline,
        DelimiterKind::Strikethrough,
        DelimiterKind::Spoiler,
        DelimiterKind::Code,
        DelimiterKind::Pre,
        DelimiterKind::Quote,
    ];

    /// The literal marker text in the markdown dialect.
    pub fn marker(self) -> &'static str {
        match self {
            DelimiterKind::Bold => Self::BOLD,
            DelimiterKind::Italic => Self::ITALIC,
            DelimiterKind::Underline => Self::UNDERLINE,
            DelimiterKind::Strikethrough => Self::STRIKETHROUGH,
            DelimiterKind::Spoiler => Self::SPOILER,
            DelimiterKind::Code => Self::CODE,
            DelimiterKind::Pre => Self::PRE,
            DelimiterKind::Quote => Self::QUOTE,
        }
    }

    /// The markup tag name this delimiter is rewritten to.
    pub fn tag(self) -> &'static str {
        match self {
            DelimiterKind::Bold => "b",
            DelimiterKind::Italic => "i",
            DelimiterKind::Underline => "u",
            DelimiterKind::Strikethrough => "s",
            DelimiterKind::Spoiler => "spoiler",
            DelimiterKind::Code => "code",
            DelimiterKind::Pre => "pre",
            DelimiterKind::Quote => "blockquote",
        }
    }

    /// Code and Pre open a fixed-width region in which every other
    /// delimiter is inert.
    pub fn is_fixed_width(self) -> bool {
        matches!(self, DelimiterKind::Code | DelimiterKind::Pre)
    }

    pub fn opening_tag(self) -> String {
        format!("<{}>", self.tag())
    }

    pub fn closing_tag(self) -> String {
        format!("</{}>", self.tag())
    }
}
