//! # Unparse
//!
//! Plain text plus a list of [`StyleAnnotation`]s in, delimiter markdown out.
//!
//! Each supported annotation contributes two [`MarkerInsertion`]s, one at its
//! start offset and one at its end. Insertions are defined as applied from
//! the highest position to the lowest, with ties taken last-produced first,
//! so no insertion shifts a position that has yet to be processed.
//!
//! Splicing into the middle of a buffer over and over is quadratic.
//! [`Unparser::render`] walks the same plan in reverse in a single pass:
//! markers sharing a position come out in production order, which is exactly
//! what repeated splicing at that position leaves behind.

use log::{debug, trace};

use crate::{entities::StyleAnnotation, error::Error, utf16};

/// A marker to be inserted at a UTF-16 unit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerInsertion {
    pub marker: String,
    pub position: usize,
}

/// A validated insertion plan over one text.
#[derive(Debug)]
pub struct Unparser {
    units: Vec<u16>,
    /// In production order.
    insertions: Vec<MarkerInsertion>,
}

impl Unparser {
    /// Validates `entities` against `text` and plans the marker insertions.
    ///
    /// Kinds without a markdown form are skipped before validation.
    ///
    /// # Errors
    /// - [`Error::InvalidAnnotation`] if an annotation ends past the text
    /// - [`Error::SplitSurrogatePair`] if a marker would land between the two
    ///   halves of a surrogate pair
    pub fn new(text: &str, entities: &[StyleAnnotation]) -> Result<Self, Error> {
        let units = utf16::to_units(text);
        let mut insertions = Vec::with_capacity(entities.len() * 2);

        for (index, entity) in entities.iter().enumerate() {
            let Some((start, end)) = entity.kind.markers() else {
                debug!("dropping annotation #{index} of unsupported kind {:?}", entity.kind);
                continue;
            };

            let end_position = entity
                .end()
                .filter(|&end| end <= units.len())
                .ok_or(Error::InvalidAnnotation {
                    index,
                    offset: entity.offset,
                    length: entity.length,
                    text_len: units.len(),
                })?;

            for position in [entity.offset, end_position] {
                if utf16::splits_surrogate_pair(&units, position) {
                    return Err(Error::SplitSurrogatePair { index, position });
                }
            }

            insertions.push(MarkerInsertion {
                marker: start,
                position: entity.offset,
            });
            insertions.push(MarkerInsertion {
                marker: end,
                position: end_position,
            });
        }

        Ok(Self { units, insertions })
    }

    /// Insertions in the order they are applied: descending position, ties
    /// broken by reverse production order.
    pub fn insertion_order(&self) -> Vec<&MarkerInsertion> {
        let mut order: Vec<_> = self.insertions.iter().enumerate().collect();
        order.sort_by(|(ia, a), (ib, b)| b.position.cmp(&a.position).then(ib.cmp(ia)));
        order.into_iter().map(|(_, insertion)| insertion).collect()
    }

    /// Produces the markdown text.
    pub fn render(&self) -> Result<String, Error> {
        let marker_units: usize = self
            .insertions
            .iter()
            .map(|i| i.marker.encode_utf16().count())
            .sum();
        let mut out = Vec::with_capacity(self.units.len() + marker_units);
        let mut cursor = 0;

        for insertion in self.insertion_order().into_iter().rev() {
            trace!("{:?} at unit {}", insertion.marker, insertion.position);
            out.extend_from_slice(&self.units[cursor..insertion.position]);
            out.extend(insertion.marker.encode_utf16());
            cursor = insertion.position;
        }
        out.extend_from_slice(&self.units[cursor..]);

        utf16::from_units(&out)
    }
}

/// Converts plain text and its annotations into delimiter markdown.
///
/// See [`Unparser`] for validation rules.
pub fn unparse(text: &str, entities: &[StyleAnnotation]) -> Result<String, Error> {
    Unparser::new(text, entities)?.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AnnotationKind, MentionedUser};
    use pretty_assertions::assert_eq;

    fn ann(kind: AnnotationKind, offset: usize, length: usize) -> StyleAnnotation {
        StyleAnnotation::new(kind, offset, length)
    }

    #[test]
    fn no_entities_returns_text() {
        assert_eq!(unparse("plain", &[]).unwrap(), "plain");
        assert_eq!(unparse("", &[]).unwrap(), "");
    }

    #[test]
    fn two_disjoint_annotations() {
        let entities = [
            ann(AnnotationKind::Bold, 0, 4),
            ann(AnnotationKind::Italic, 10, 3),
        ];
        assert_eq!(
            unparse("bold text abc end", &entities).unwrap(),
            "**bold** text __abc__ end"
        );
    }

    #[test]
    fn plan_is_descending_with_reverse_ties() {
        let entities = [
            ann(AnnotationKind::Bold, 0, 4),
            ann(AnnotationKind::Italic, 4, 2),
        ];
        let plan = Unparser::new("abcdef", &entities).unwrap();
        let order: Vec<_> = plan
            .insertion_order()
            .into_iter()
            .map(|i| (i.marker.as_str(), i.position))
            .collect();
        assert_eq!(
            order,
            vec![("__", 6), ("__", 4), ("**", 4), ("**", 0)]
        );
    }

    #[test]
    fn adjacent_spans_keep_production_order() {
        let entities = [
            ann(AnnotationKind::Bold, 0, 4),
            ann(AnnotationKind::Italic, 4, 2),
        ];
        assert_eq!(unparse("abcdef", &entities).unwrap(), "**abcd**__ef__");
    }

    #[test]
    fn same_span_markers_do_not_mirror() {
        let entities = [
            ann(AnnotationKind::Bold, 0, 3),
            ann(AnnotationKind::Italic, 0, 3),
        ];
        assert_eq!(unparse("abc", &entities).unwrap(), "**__abc**__");
    }

    #[test]
    fn nested_spans() {
        let entities = [
            ann(AnnotationKind::Bold, 0, 9),
            ann(AnnotationKind::Underline, 2, 3),
        ];
        assert_eq!(unparse("a big cat", &entities).unwrap(), "**a --big-- cat**");
    }

    #[test]
    fn pre_with_and_without_language() {
        let with = [ann(
            AnnotationKind::Pre {
                language: Some("python".into()),
            },
            0,
            8,
        )];
        assert_eq!(
            unparse("print(1)", &with).unwrap(),
            "```python\nprint(1)\n```"
        );

        let without = [ann(AnnotationKind::Pre { language: None }, 0, 1)];
        assert_eq!(unparse("x", &without).unwrap(), "```\nx\n```");
    }

    #[test]
    fn blockquote_markers() {
        let entities = [ann(AnnotationKind::Blockquote, 0, 5)];
        assert_eq!(unparse("quote rest", &entities).unwrap(), "> quote\n rest");
    }

    #[test]
    fn links_and_mentions() {
        let entities = [
            ann(
                AnnotationKind::TextLink {
                    url: "https://example.com".into(),
                },
                0,
                4,
            ),
            ann(
                AnnotationKind::TextMention {
                    user: MentionedUser { id: 777 },
                },
                9,
                3,
            ),
        ];
        assert_eq!(
            unparse("site and Sam", &entities).unwrap(),
            "[site](https://example.com) and [Sam](tg://user?id=777)"
        );
    }

    #[test]
    fn unsupported_kinds_are_dropped() {
        let entities = [
            ann(AnnotationKind::Hashtag, 0, 4),
            ann(AnnotationKind::Unknown, 0, 100),
            ann(AnnotationKind::Code, 5, 2),
        ];
        assert_eq!(unparse("#tag ok", &entities).unwrap(), "#tag `ok`");
    }

    #[test]
    fn offsets_count_surrogate_pairs_as_two() {
        // "😀 hi": the emoji is units 0..2, the space 2, "hi" 3..5
        let entities = [ann(AnnotationKind::Bold, 3, 2)];
        assert_eq!(unparse("😀 hi", &entities).unwrap(), "😀 **hi**");
    }

    #[test]
    fn annotation_can_cover_an_emoji() {
        let entities = [ann(AnnotationKind::Spoiler, 1, 2)];
        assert_eq!(unparse("a😀b", &entities).unwrap(), "a||😀||b");
    }

    #[test]
    fn out_of_range_is_rejected() {
        let entities = [
            ann(AnnotationKind::Bold, 0, 2),
            ann(AnnotationKind::Italic, 3, 5),
        ];
        let err = unparse("abcdef", &entities).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAnnotation {
                index: 1,
                offset: 3,
                length: 5,
                text_len: 6
            }
        ));
    }

    #[test]
    fn overflowing_length_is_rejected() {
        let entities = [ann(AnnotationKind::Bold, 1, usize::MAX)];
        assert!(matches!(
            unparse("abc", &entities),
            Err(Error::InvalidAnnotation { index: 0, .. })
        ));
    }

    #[test]
    fn marker_inside_surrogate_pair_is_rejected() {
        let entities = [ann(AnnotationKind::Bold, 0, 2)];
        assert!(matches!(
            unparse("a😀", &entities),
            Err(Error::SplitSurrogatePair {
                index: 0,
                position: 2
            })
        ));
    }

    #[test]
    fn annotation_ending_at_text_end_is_valid() {
        let entities = [ann(AnnotationKind::Strikethrough, 0, 3)];
        assert_eq!(unparse("abc", &entities).unwrap(), "~~abc~~");
    }

    #[test]
    fn empty_annotation_emits_adjacent_markers() {
        let entities = [ann(AnnotationKind::Code, 1, 0)];
        assert_eq!(unparse("ab", &entities).unwrap(), "a``b");
    }
}
