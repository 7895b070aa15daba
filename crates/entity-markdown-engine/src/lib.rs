//! # entity-markdown-engine
//!
//! Converts between a small delimiter-based markdown dialect and flat lists
//! of styled-text entities whose offsets are counted in UTF-16 code units.
//!
//! ```text
//! "**bold** text"  ── parse ──▶  "<b>bold</b> text"
//!
//! "bold text" + [Bold @0 len 4]  ── unparse ──▶  "**bold** text"
//! ```
//!
//! The two directions are independent and are not inverses of each other:
//! `parse` produces tag markup, `unparse` produces the delimiter dialect.
//!
//! ## Modules
//!
//! - **`parsing`**: delimiter lexer and the `parse` state machine
//! - **`entities`**: `StyleAnnotation` and `AnnotationKind`
//! - **`unparse`**: marker planning and splicing for `unparse`
//! - **`utf16`**: surrogate-pair aware conversion to and from code units
//! - **`error`**: the crate's `Error` type

pub mod entities;
pub mod error;
pub mod parsing;
pub mod unparse;
pub mod utf16;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use entities::{AnnotationKind, MentionedUser, StyleAnnotation};
pub use error::Error;
pub use parsing::parse;
pub use unparse::{MarkerInsertion, Unparser, unparse};
