//! Integration tests for paragraph reordering
//!
//! Documents are built inline so each test shows exactly which markup must
//! survive the sort.

use kurdish_sorter::collation::SORANI_GRAPHEMES;
use kurdish_sorter::config::{SortConfig, SortDirection};
use kurdish_sorter::document::WordDocument;
use kurdish_sorter::error::Error;
use kurdish_sorter::{reorder, reorder_indices};
use proptest::prelude::*;

const HEADER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\r\n",
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    "<w:body>"
);
const FOOTER: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:bidi/></w:sectPr>"#,
    "</w:body></w:document>"
);

/// A right-to-left paragraph with one run per text piece.
fn paragraph(pieces: &[&str]) -> String {
    let mut xml = String::from(r#"<w:p w:rsidR="00A1"><w:pPr><w:bidi/><w:jc w:val="right"/></w:pPr>"#);
    for piece in pieces {
        xml.push_str(r#"<w:r><w:rPr><w:rtl/><w:sz w:val="28"/></w:rPr><w:t xml:space="preserve">"#);
        xml.push_str(piece);
        xml.push_str("</w:t></w:r>");
    }
    xml.push_str("</w:p>");
    xml
}

fn document(paragraphs: &[String]) -> String {
    format!("{}{}{}", HEADER, paragraphs.concat(), FOOTER)
}

fn parse(xml: &str) -> WordDocument {
    WordDocument::parse(xml, &SortConfig::default()).unwrap()
}

#[test]
fn test_worked_example_with_zero_width_non_joiner() {
    // The first word carries U+200C, which is outside the alphabet, so the
    // pair is compared by code point and ئ (U+0626) precedes ب (U+0628).
    let first = "به\u{200c}ڕێز";
    let xml = document(&[paragraph(&[first]), paragraph(&["ئازاد"])]);
    let order = reorder_indices(&parse(&xml), &SortConfig::default()).unwrap();
    assert_eq!(order, vec![1, 0]);
}

#[test]
fn test_worked_example_letters_only() {
    // Without the joiner every character is a letter: ب (2) outranks ئ (0)
    let xml = document(&[paragraph(&["بهڕێز"]), paragraph(&["ئازاد"])]);
    let order = reorder_indices(&parse(&xml), &SortConfig::default()).unwrap();
    assert_eq!(order, vec![0, 1]);

    let ascending = SortConfig::default().with_direction(SortDirection::Ascending);
    assert_eq!(reorder_indices(&parse(&xml), &ascending).unwrap(), vec![1, 0]);
}

#[test]
fn test_text_split_across_runs_and_tatweel() {
    // "ئـا" + "زاد" normalizes to ئازاد; "ب" + "ەفر" to بەفر
    let xml = document(&[
        paragraph(&[" ئـا", "زاد "]),
        paragraph(&["ب", "ەفر"]),
        paragraph(&["ژیـان"]),
    ]);
    let order = reorder_indices(&parse(&xml), &SortConfig::default()).unwrap();
    // ژ (13) > ب (2) > ئ (0)
    assert_eq!(order, vec![2, 1, 0]);
}

#[test]
fn test_full_document_output() {
    let a = paragraph(&["ئاسمان"]);
    let b = paragraph(&["دار"]);
    let c = paragraph(&["هەور"]);
    let xml = document(&[a.clone(), b.clone(), c.clone()]);

    let sorted = reorder(parse(&xml), &SortConfig::default()).unwrap();
    assert_eq!(sorted.as_str(), document(&[c, b, a]));
}

#[test]
fn test_non_paragraph_children_stay_in_place() {
    let table = "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>ی</w:t></w:r></w:p></w:tc></w:tr></w:tbl>";
    let bookmark = r#"<w:bookmarkStart w:id="0" w:name="top"/>"#;
    let xml = format!(
        "{}{}\n{}\n{}\n{}{}",
        HEADER,
        paragraph(&["ئاو"]),
        table,
        bookmark,
        paragraph(&["شار"]),
        FOOTER
    );
    let expected = format!(
        "{}{}\n{}\n{}\n{}{}",
        HEADER,
        paragraph(&["شار"]),
        table,
        bookmark,
        paragraph(&["ئاو"]),
        FOOTER
    );

    let sorted = reorder(parse(&xml), &SortConfig::default()).unwrap();
    assert_eq!(sorted.as_str(), expected);
}

#[test]
fn test_empty_paragraphs_and_mixed_text() {
    let xml = document(&[
        paragraph(&["ب"]),
        "<w:p/>".to_string(),
        paragraph(&["Zagros"]),
        paragraph(&["ئ"]),
    ]);
    let order = reorder_indices(&parse(&xml), &SortConfig::default()).unwrap();
    // "" is a prefix of every letter word and sorts after them; "Zagros"
    // compares by code point and precedes the Arabic-script words.
    assert_eq!(order, vec![2, 0, 3, 1]);
}

#[test]
fn test_empty_body_unchanged() {
    let xml = format!("{}{}", HEADER, FOOTER);
    let sorted = reorder(parse(&xml), &SortConfig::default()).unwrap();
    assert_eq!(sorted.as_str(), xml);
}

#[test]
fn test_byte_order_mark_prefix() {
    let layout = |first: &str, second: &str| {
        format!(
            "{}<w:document><!-- body a>b --><w:body>ئئ{}ئئ{}<w:sectPr/></w:body></w:document>",
            '\u{feff}', first, second
        )
    };
    let water = paragraph(&["ئاو"]);
    let snow = paragraph(&["بەفر"]);
    let xml = layout(&water, &snow);

    let sorted = kurdish_sorter::process(&xml, &SortConfig::default()).unwrap();
    assert_eq!(sorted, layout(&snow, &water));
    assert!(sorted.starts_with('\u{feff}'));
}

#[test]
fn test_missing_body_is_structure_error() {
    let err = WordDocument::parse("<w:document/>", &SortConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Structure(_)));
}

fn mapped_word() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SORANI_GRAPHEMES.to_vec()), 0..6)
        .prop_map(|graphemes| graphemes.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_content_preserved(words in prop::collection::vec(mapped_word(), 0..12)) {
        let paragraphs: Vec<String> = words.iter().map(|w| paragraph(&[w])).collect();
        let xml = document(&paragraphs);
        let sorted = reorder(parse(&xml), &SortConfig::default()).unwrap();

        prop_assert_eq!(sorted.as_str().len(), xml.len());
        prop_assert!(sorted.as_str().starts_with(HEADER));
        prop_assert!(sorted.as_str().ends_with(FOOTER));

        let mut before: Vec<String> = paragraphs.clone();
        let mut after: Vec<String> = sorted.paragraphs().map(str::to_string).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_resort_is_idempotent(words in prop::collection::vec(mapped_word(), 0..12)) {
        let paragraphs: Vec<String> = words.iter().map(|w| paragraph(&[w])).collect();
        let config = SortConfig::default();
        let once = reorder(parse(&document(&paragraphs)), &config).unwrap();

        let order = reorder_indices(&once, &config).unwrap();
        prop_assert_eq!(order, (0..paragraphs.len()).collect::<Vec<_>>());

        let twice = reorder(once.clone(), &config).unwrap();
        prop_assert_eq!(twice.as_str(), once.as_str());
    }
}
