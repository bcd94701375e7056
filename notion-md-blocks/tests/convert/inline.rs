use notion_md_blocks::{tokenize, RichTextSpan};

#[test]
fn mixed_inline_formatting() {
    assert_eq!(
        tokenize("See **bold** and `code` and [link](http://x)"),
        vec![
            RichTextSpan::plain("See "),
            RichTextSpan::bold("bold"),
            RichTextSpan::plain(" and "),
            RichTextSpan::code("code"),
            RichTextSpan::plain(" and "),
            RichTextSpan::link("link", "http://x"),
        ]
    );
}

#[test]
fn adjacent_markers() {
    assert_eq!(
        tokenize("**a**`b`[c](d)"),
        vec![
            RichTextSpan::bold("a"),
            RichTextSpan::code("b"),
            RichTextSpan::link("c", "d"),
        ]
    );
}

#[test]
fn stray_bracket_before_link() {
    assert_eq!(
        tokenize("a [ b [c](d)"),
        vec![RichTextSpan::plain("a [ b "), RichTextSpan::link("c", "d")]
    );
}

#[test]
fn lone_markers_are_text() {
    for line in ["**", "`", "[", "*", "]("] {
        assert_eq!(tokenize(line), vec![RichTextSpan::plain(line)], "{line:?}");
    }
}

#[test]
fn link_spans_have_no_other_annotations() {
    let spans = tokenize("[x](y)");
    assert_eq!(spans.len(), 1);
    assert!(!spans[0].bold);
    assert!(!spans[0].code);
    assert!(!spans[0].is_plain());
}
