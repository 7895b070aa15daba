//! # Parsing
//!
//! The `parse` direction: delimiter markdown in, tag markup out.
//!
//! ## Architecture
//!
//! A Logos lexer finds delimiter and link matches; the parser walks them in
//! source order over the immutable input, copying the gaps into an output
//! buffer and writing a tag in place of each match it accepts.
//!
//! - **`kinds`**: `DelimiterKind` with its marker and tag
//! - **`lexer`**: `DelimiterLexer` yielding `Match`es
//! - **`parser`**: `parse()` and its `ParseState`
//! - **`quote`**: the whole-document blockquote pass
//! - **`span`**: byte ranges into the input
//!
//! ## Raw Zones
//!
//! Code and Pre are fixed-width regions: while one is open, every other
//! delimiter and every link is left as literal text.

pub mod kinds;
pub mod lexer;
pub mod parser;
pub mod quote;
pub mod span;

pub use kinds::DelimiterKind;
pub use parser::{ParseState, parse};
