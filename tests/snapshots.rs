//! Inline snapshots of the syntax tree and of a full canonical document.

use mdcanon::{format, parse};

#[test]
fn emphasis_tree() {
    insta::assert_snapshot!(format!("{:#?}", parse("*a*\n", None)), @r#"
    DOCUMENT@0..4
      PARAGRAPH@0..4
        EMPHASIS@0..3
          EMPHASIS_MARKER@0..1 "*"
          TEXT@1..2 "a"
          EMPHASIS_MARKER@2..3 "*"
        NEWLINE@3..4 "\n"
    "#);
}

#[test]
fn canonical_document() {
    let input = "\
# Notes

Some _emphasis_ and __strong__
text with a [link](http://a 'title').

* one
* two
    * nested

> quoted
lazily

    code
";
    insta::assert_snapshot!(format(input, None).unwrap(), @r#"
    Notes
    =====

    Some *emphasis* and **strong** text with a [link](http://a "title").

    * one
    * two
      * nested

    > quoted lazily

    ```
    code
    ```
    "#);
}
