//! Cross-module properties of `parse` and `unparse`.

use proptest::prelude::*;

use crate::{
    entities::{AnnotationKind, StyleAnnotation},
    parse, unparse,
    unparse::Unparser,
    utf16,
};

/// The literal descending splice that `Unparser::render` must agree with.
fn splice_in_plan_order(text: &str, entities: &[StyleAnnotation]) -> String {
    let plan = Unparser::new(text, entities).unwrap();
    let mut units = utf16::to_units(text);
    for insertion in plan.insertion_order() {
        let marker: Vec<u16> = insertion.marker.encode_utf16().collect();
        units.splice(insertion.position..insertion.position, marker);
    }
    utf16::from_units(&units).unwrap()
}

/// UTF-16 offsets of every char boundary in `text`, including both ends.
fn boundaries(text: &str) -> Vec<usize> {
    let mut out = vec![0];
    let mut pos = 0;
    for c in text.chars() {
        pos += c.len_utf16();
        out.push(pos);
    }
    out
}

fn kind_for(n: u8) -> AnnotationKind {
    match n % 6 {
        0 => AnnotationKind::Bold,
        1 => AnnotationKind::Italic,
        2 => AnnotationKind::Blockquote,
        3 => AnnotationKind::Pre {
            language: Some("sh".into()),
        },
        4 => AnnotationKind::TextLink {
            url: "https://example.com".into(),
        },
        _ => AnnotationKind::Mention,
    }
}

proptest! {
    #[test]
    fn text_without_delimiters_is_unchanged(text in "[^`~_*|>\\[-]{0,64}") {
        prop_assert_eq!(parse(&text), text);
    }

    #[test]
    fn single_pass_render_matches_descending_splice(
        text in "\\PC{0,24}",
        raw in prop::collection::vec((any::<u8>(), any::<usize>(), any::<usize>()), 0..6),
    ) {
        let bounds = boundaries(&text);
        let entities: Vec<_> = raw
            .into_iter()
            .map(|(kind, a, b)| {
                let a = bounds[a % bounds.len()];
                let b = bounds[b % bounds.len()];
                StyleAnnotation::new(kind_for(kind), a.min(b), a.abs_diff(b))
            })
            .collect();

        prop_assert_eq!(unparse(&text, &entities).unwrap(), splice_in_plan_order(&text, &entities));
    }

    #[test]
    fn unparse_without_entities_is_identity(text in "\\PC{0,48}") {
        prop_assert_eq!(unparse(&text, &[]).unwrap(), text);
    }
}

#[test]
fn parse_then_unparse_example_from_chat() {
    // A message arrives with entities, is rendered to markdown for editing,
    // and the edited markdown is parsed for display.
    let text = "hey 👋 check this";
    let entities = [
        StyleAnnotation::new(AnnotationKind::Bold, 0, 3),
        StyleAnnotation::new(AnnotationKind::Italic, 7, 5),
    ];
    let markdown = unparse(text, &entities).unwrap();
    assert_eq!(markdown, "**hey** 👋 __check__ this");
    assert_eq!(parse(&markdown), "<b>hey</b> 👋 <i>check</i> this");
}
