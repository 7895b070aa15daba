//! Styled-text entities as delivered by chat APIs.
//!
//! The JSON shape follows the Bot API message entity object:
//!
//! ```json
//! {"type": "text_link", "offset": 4, "length": 5, "url": "https://example.com"}
//! ```
//!
//! `offset` and `length` are UTF-16 code units.

use serde::{Deserialize, Serialize};

use crate::parsing::DelimiterKind;

/// A styled span over UTF-16 indexed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleAnnotation {
    #[serde(flatten)]
    pub kind: AnnotationKind,
    pub offset: usize,
    pub length: usize,
}

/// The user referenced by a `text_mention`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionedUser {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnnotationKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Blockquote,
    TextLink {
        url: String,
    },
    TextMention {
        user: MentionedUser,
    },
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    BankCard,
    CustomEmoji {
        custom_emoji_id: String,
    },
    ExpandableBlockquote,
    /// Any type tag this crate does not know.
    #[serde(other)]
    Unknown,
}

impl AnnotationKind {
    /// The markers written before and after the annotated text.
    ///
    /// Returns `None` for kinds without a markdown form; those are dropped.
    pub fn markers(&self) -> Option<(String, String)> {
        let symmetric = |kind: DelimiterKind| -> Option<(String, String)> {
            Some((kind.marker().to_string(), kind.marker().to_string()))
        };

        match self {
            AnnotationKind::Bold => symmetric(DelimiterKind::Bold),
            AnnotationKind::Italic => symmetric(DelimiterKind::Italic),
            AnnotationKind::Underline => symmetric(DelimiterKind::Underline),
            AnnotationKind::Strikethrough => symmetric(DelimiterKind::Strikethrough),
            AnnotationKind::Spoiler => symmetric(DelimiterKind::Spoiler),
            AnnotationKind::Code => symmetric(DelimiterKind::Code),
            AnnotationKind::Pre { language } => Some((
                format!(
                    "{}{}\n",
                    DelimiterKind::PRE,
                    language.as_deref().unwrap_or_default()
                ),
                format!("\n{}", DelimiterKind::PRE),
            )),
            AnnotationKind::Blockquote => Some((format!("{} ", DelimiterKind::QUOTE), "\n".into())),
            AnnotationKind::TextLink { url } => Some(("[".into(), format!("]({url})"))),
            AnnotationKind::TextMention { user } => {
                Some(("[".into(), format!("](tg://user?id={})", user.id)))
            }
            AnnotationKind::Mention
            | AnnotationKind::Hashtag
            | AnnotationKind::Cashtag
            | AnnotationKind::BotCommand
            | AnnotationKind::Url
            | AnnotationKind::Email
            | AnnotationKind::PhoneNumber
            | AnnotationKind::BankCard
            | AnnotationKind::CustomEmoji { .. }
            | AnnotationKind::ExpandableBlockquote
            | AnnotationKind::Unknown => None,
        }
    }

    /// True if `unparse` emits markers for this kind.
    pub fn is_supported(&self) -> bool {
        self.markers().is_some()
    }
}

impl StyleAnnotation {
    pub fn new(kind: AnnotationKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// Exclusive end offset, or `None` on overflow.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }
}
