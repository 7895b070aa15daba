use std::string::FromUtf16Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "annotation #{index} (offset {offset}, length {length}) exceeds text of {text_len} UTF-16 units"
    )]
    InvalidAnnotation {
        index: usize,
        offset: usize,
        length: usize,
        text_len: usize,
    },

    #[error("annotation #{index} places a marker inside a surrogate pair at UTF-16 unit {position}")]
    SplitSurrogatePair { index: usize, position: usize },

    #[error("invalid UTF-16 sequence: {0}")]
    InvalidUtf16(#[from] FromUtf16Error),
}
