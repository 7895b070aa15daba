/// Whole-document blockquote rewriting.
///
/// The first `>` that opens a quote switches `parse` from per-match rewriting
/// to a line-based pass over the entire document; the result of this pass is
/// the final output.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
    pub const OPEN: &'static str = "<blockquote>";
    pub const CLOSE: &'static str = "</blockquote>";

    /// Wraps every run of `>`-prefixed lines in `<blockquote>` lines.
    ///
    /// One leading `>` is stripped from each quoted line. Other lines pass
    /// through unchanged, and a quote run still open at the end of the
    /// document is closed.
    pub fn wrap_quoted_lines(document: &str) -> String {
        let mut lines = Vec::new();
        let mut in_quote = false;

        for line in document.split('\n') {
            match line.strip_prefix(Self::PREFIX) {
                Some(content) => {
                    if !in_quote {
                        lines.push(Self::OPEN);
                        in_quote = true;
                    }
                    lines.push(content);
                }
                None => {
                    if in_quote {
                        lines.push(Self::CLOSE);
                        in_quote = false;
                    }
                    lines.push(line);
                }
            }
        }
        if in_quote {
            lines.push(Self::CLOSE);
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_quoted_lines_is_unchanged() {
        assert_eq!(BlockQuote::wrap_quoted_lines("a > b\nc"), "a > b\nc");
    }

    #[test]
    fn single_quoted_line() {
        assert_eq!(
            BlockQuote::wrap_quoted_lines(">hi"),
            "<blockquote>\nhi\n</blockquote>"
        );
    }

    #[test]
    fn contiguous_lines_share_one_block() {
        assert_eq!(
            BlockQuote::wrap_quoted_lines(">a\n>b\nc"),
            "<blockquote>\na\nb\n</blockquote>\nc"
        );
    }

    #[test]
    fn separate_runs_get_separate_blocks() {
        assert_eq!(
            BlockQuote::wrap_quoted_lines(">test\nline\n>test1"),
            "<blockquote>\ntest\n</blockquote>\nline\n<blockquote>\ntest1\n</blockquote>"
        );
    }

    #[test]
    fn only_one_prefix_is_stripped() {
        assert_eq!(
            BlockQuote::wrap_quoted_lines(">> nested"),
            "<blockquote>\n> nested\n</blockquote>"
        );
    }

    #[test]
    fn indented_marker_is_not_a_quote() {
        assert_eq!(BlockQuote::wrap_quoted_lines(" >x"), " >x");
    }

    #[test]
    fn trailing_newline_is_kept_outside_the_block() {
        assert_eq!(
            BlockQuote::wrap_quoted_lines(">x\n"),
            "<blockquote>\nx\n</blockquote>\n"
        );
    }
}
