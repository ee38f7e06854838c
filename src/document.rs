//! WordprocessingML document model.
//!
//! A [`WordDocument`] keeps the original XML text together with a byte-span
//! index of the `<w:body>` element and of the paragraphs that are its direct
//! children. Paragraphs are never re-rendered from parsed events: reordering
//! splices the original byte ranges, so everything outside the paragraph
//! slots (prolog, namespaces, tables, `w:sectPr`, whitespace) comes out
//! byte-for-byte identical.
//!
//! Paragraphs nested deeper (table cells, text boxes) belong to their
//! container and are not sortable units.

use crate::config::SortConfig;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::ops::Range;

/// UTF-8 byte order mark.
const BOM: char = '\u{feff}';

/// Byte range of an element within the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the opening `<`
    pub start: usize,
    /// Offset just past the closing `>`
    pub end: usize,
}

impl Span {
    /// The span as a range for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A parsed WordprocessingML part (`word/document.xml`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDocument {
    xml: String,
    body: Span,
    paragraphs: Vec<Span>,
}

impl WordDocument {
    /// Parse document text and index its body paragraphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structure`] if the XML is not well-formed, has no
    /// body element, or has more than one.
    pub fn parse(xml: impl Into<String>, config: &SortConfig) -> Result<Self> {
        let xml = xml.into();
        let (body, paragraphs) = index_body(&xml, config)?;
        log::debug!(
            "Indexed body at bytes {}..{} with {} paragraphs",
            body.start,
            body.end,
            paragraphs.len()
        );
        Ok(Self {
            xml,
            body,
            paragraphs,
        })
    }

    /// The full document text.
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Consume the document, returning its text.
    pub fn into_string(self) -> String {
        self.xml
    }

    /// Span of the body element.
    pub fn body(&self) -> Span {
        self.body
    }

    /// Spans of the body's paragraphs, in document order.
    pub fn paragraph_spans(&self) -> &[Span] {
        &self.paragraphs
    }

    /// Number of body paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Markup of one paragraph.
    pub fn paragraph(&self, index: usize) -> Option<&str> {
        self.paragraphs.get(index).map(|span| &self.xml[span.range()])
    }

    /// Markup of every paragraph, in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.paragraphs.iter().map(move |span| &self.xml[span.range()])
    }

    /// Render a copy with paragraphs placed in a new order.
    ///
    /// `order[k]` is the original index of the paragraph that goes into the
    /// k-th paragraph slot. Only the paragraph slots change; every byte
    /// between them is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `order` is not a permutation of
    /// the paragraph indices.
    pub fn with_paragraph_order(&self, order: &[usize]) -> Result<WordDocument> {
        check_permutation(order, self.paragraphs.len())?;

        let mut xml = String::with_capacity(self.xml.len());
        let mut spans = Vec::with_capacity(self.paragraphs.len());
        let mut cursor = 0;

        for (slot, &source) in self.paragraphs.iter().zip(order) {
            xml.push_str(&self.xml[cursor..slot.start]);
            let start = xml.len();
            xml.push_str(&self.xml[self.paragraphs[source].range()]);
            spans.push(Span {
                start,
                end: xml.len(),
            });
            cursor = slot.end;
        }
        xml.push_str(&self.xml[cursor..]);

        // A permutation of the slots keeps the body length, so the body span holds
        Ok(WordDocument {
            xml,
            body: self.body,
            paragraphs: spans,
        })
    }
}

fn check_permutation(order: &[usize], len: usize) -> Result<()> {
    if order.len() != len {
        return Err(Error::Serialization(format!(
            "paragraph order has {} entries for {} paragraphs",
            order.len(),
            len
        )));
    }
    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(Error::Serialization(format!(
                    "paragraph {} placed twice",
                    index
                )))
            },
            None => {
                return Err(Error::Serialization(format!(
                    "paragraph index {} out of range",
                    index
                )))
            },
        }
    }
    Ok(())
}

/// Check that `xml` is well-formed: parseable, balanced, at least one element.
///
/// # Errors
///
/// Returns [`Error::Structure`] describing the first problem found.
pub fn check_well_formed(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut elements = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                depth += 1;
                elements += 1;
            },
            Ok(Event::Empty(_)) => elements += 1,
            Ok(Event::End(_)) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::Structure(format!(
                        "unexpected closing tag at byte {}",
                        reader.buffer_position()
                    ))
                })?;
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(&reader, e)),
            _ => {},
        }
    }

    if depth != 0 {
        return Err(Error::Structure(format!("{} unclosed element(s)", depth)));
    }
    if elements == 0 {
        return Err(Error::Structure("no elements".to_string()));
    }
    Ok(())
}

/// Locate the single body element and its direct paragraph children.
///
/// Offsets are into `xml` including a leading byte order mark, which the
/// reader would otherwise skip without counting.
fn index_body(xml: &str, config: &SortConfig) -> Result<(Span, Vec<Span>)> {
    let bom = if xml.starts_with(BOM) { BOM.len_utf8() } else { 0 };
    let (body, paragraphs) = index_content(&xml[bom..], config)?;
    let shift = |span: Span| Span {
        start: span.start + bom,
        end: span.end + bom,
    };
    Ok((shift(body), paragraphs.into_iter().map(shift).collect()))
}

fn index_content(xml: &str, config: &SortConfig) -> Result<(Span, Vec<Span>)> {
    let body_name = config.qualified("body");
    let paragraph_name = config.qualified("p");

    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    // (start offset, depth) of the body while it is open
    let mut open_body: Option<(usize, usize)> = None;
    let mut body: Option<Span> = None;
    let mut open_paragraph: Option<usize> = None;
    let mut paragraphs = Vec::new();

    loop {
        let before = reader.buffer_position();
        let event = reader.read_event().map_err(|e| xml_error(&reader, e))?;
        match event {
            Event::Start(e) => {
                let name = e.name();
                if name.as_ref() == body_name.as_slice() {
                    if open_body.is_some() || body.is_some() {
                        return Err(multiple_bodies(&body_name));
                    }
                    open_body = Some((tag_start(xml, before), depth));
                } else if let Some((_, body_depth)) = open_body {
                    if depth == body_depth + 1 && name.as_ref() == paragraph_name.as_slice() {
                        open_paragraph = Some(tag_start(xml, before));
                    }
                }
                depth += 1;
            },
            Event::End(e) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::Structure(format!("unexpected closing tag at byte {}", before))
                })?;
                if let Some((body_start, body_depth)) = open_body {
                    let name = e.name();
                    let end = tag_end(xml, reader.buffer_position());
                    if depth == body_depth + 1 && name.as_ref() == paragraph_name.as_slice() {
                        if let Some(start) = open_paragraph.take() {
                            paragraphs.push(Span { start, end });
                        }
                    } else if depth == body_depth && name.as_ref() == body_name.as_slice() {
                        body = Some(Span {
                            start: body_start,
                            end,
                        });
                        open_body = None;
                    }
                }
            },
            Event::Empty(e) => {
                let name = e.name();
                let span = Span {
                    start: tag_start(xml, before),
                    end: tag_end(xml, reader.buffer_position()),
                };
                if name.as_ref() == body_name.as_slice() {
                    if open_body.is_some() || body.is_some() {
                        return Err(multiple_bodies(&body_name));
                    }
                    body = Some(span);
                } else if let Some((_, body_depth)) = open_body {
                    if depth == body_depth + 1 && name.as_ref() == paragraph_name.as_slice() {
                        paragraphs.push(span);
                    }
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if depth != 0 {
        return Err(Error::Structure(format!("{} unclosed element(s)", depth)));
    }

    let body = body.ok_or_else(|| {
        Error::Structure(format!(
            "no <{}> element",
            String::from_utf8_lossy(&body_name)
        ))
    })?;
    Ok((body, paragraphs))
}

fn multiple_bodies(body_name: &[u8]) -> Error {
    Error::Structure(format!(
        "more than one <{}> element",
        String::from_utf8_lossy(body_name)
    ))
}

fn xml_error(reader: &Reader<&[u8]>, e: quick_xml::Error) -> Error {
    Error::Structure(format!(
        "XML parse error at byte {}: {}",
        reader.buffer_position(),
        e
    ))
}

/// Offset of the `<` opening the tag read from `pos`.
///
/// The reader may or may not have consumed the `<` together with the
/// preceding text, so look back when it is not at `pos`.
fn tag_start(xml: &str, pos: usize) -> usize {
    if xml.as_bytes().get(pos) == Some(&b'<') {
        pos
    } else {
        xml.get(..pos).and_then(|head| head.rfind('<')).unwrap_or(pos)
    }
}

/// Offset just past the `>` closing the tag the reader stopped at.
fn tag_end(xml: &str, pos: usize) -> usize {
    if pos > 0 && xml.as_bytes().get(pos - 1) == Some(&b'>') {
        pos
    } else {
        xml.get(pos..)
            .and_then(|tail| tail.find('>'))
            .map(|i| pos + i + 1)
            .unwrap_or(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        "<w:body>\n",
        r#"<w:p w:rsidR="1"><w:r><w:t>first</w:t></w:r></w:p>"#,
        "\n",
        "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\n",
        "<w:p/>\n",
        r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>third</w:t></w:r></w:p>"#,
        "\n",
        "<w:sectPr/>",
        "</w:body></w:document>"
    );

    fn parse(xml: &str) -> Result<WordDocument> {
        WordDocument::parse(xml, &SortConfig::default())
    }

    #[test]
    fn test_indexes_direct_paragraphs_only() {
        let doc = parse(DOC).unwrap();
        let paragraphs: Vec<&str> = doc.paragraphs().collect();
        assert_eq!(
            paragraphs,
            vec![
                r#"<w:p w:rsidR="1"><w:r><w:t>first</w:t></w:r></w:p>"#,
                "<w:p/>",
                r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>third</w:t></w:r></w:p>"#,
            ]
        );
    }

    #[test]
    fn test_body_span() {
        let doc = parse(DOC).unwrap();
        let body = &doc.as_str()[doc.body().range()];
        assert!(body.starts_with("<w:body>"));
        assert!(body.ends_with("</w:body>"));
    }

    #[test]
    fn test_missing_body() {
        let err = parse("<w:document><w:p/></w:document>").unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
        assert!(format!("{}", err).contains("<w:body>"));
    }

    #[test]
    fn test_multiple_bodies() {
        let err = parse("<w:document><w:body/><w:body></w:body></w:document>").unwrap_err();
        assert!(format!("{}", err).contains("more than one"));
    }

    #[test]
    fn test_empty_body() {
        let doc = parse("<w:document><w:body/></w:document>").unwrap();
        assert_eq!(doc.paragraph_count(), 0);
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse("<w:document><w:body><w:p></w:body></w:document>").unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_unclosed_document() {
        assert!(parse("<w:document><w:body><w:p/>").is_err());
    }

    #[test]
    fn test_byte_order_mark_offsets() {
        let xml = format!("\u{feff}{}", DOC);
        let doc = parse(&xml).unwrap();
        let plain = parse(DOC).unwrap();
        assert_eq!(doc.paragraphs().collect::<Vec<_>>(), plain.paragraphs().collect::<Vec<_>>());
        assert_eq!(doc.body().start, plain.body().start + 3);
        assert!(doc.as_str()[doc.body().range()].starts_with("<w:body>"));
    }

    #[test]
    fn test_unprefixed_names() {
        let config = SortConfig::new().with_namespace_prefix("");
        let doc = WordDocument::parse("<document><body><p>a</p><p>b</p></body></document>", &config)
            .unwrap();
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.paragraph(1), Some("<p>b</p>"));
    }

    #[test]
    fn test_with_paragraph_order_swaps_slots_only() {
        let doc = parse(DOC).unwrap();
        let reordered = doc.with_paragraph_order(&[2, 1, 0]).unwrap();
        let expected = DOC
            .replace(
                r#"<w:p w:rsidR="1"><w:r><w:t>first</w:t></w:r></w:p>"#,
                "@FIRST@",
            )
            .replace(
                r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>third</w:t></w:r></w:p>"#,
                r#"<w:p w:rsidR="1"><w:r><w:t>first</w:t></w:r></w:p>"#,
            )
            .replace(
                "@FIRST@",
                r#"<w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>third</w:t></w:r></w:p>"#,
            );
        assert_eq!(reordered.as_str(), expected);
        assert_eq!(reordered.as_str().len(), DOC.len());
        assert_eq!(reordered.body(), doc.body());
        assert_eq!(reordered.paragraph(2), doc.paragraph(0));
        // The respliced index matches a fresh parse
        assert_eq!(parse(reordered.as_str()).unwrap(), reordered);
    }

    #[test]
    fn test_with_paragraph_order_rejects_bad_permutations() {
        let doc = parse(DOC).unwrap();
        assert!(matches!(
            doc.with_paragraph_order(&[0, 1]),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            doc.with_paragraph_order(&[0, 0, 1]),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            doc.with_paragraph_order(&[0, 1, 3]),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_check_well_formed() {
        assert!(check_well_formed(DOC).is_ok());
        assert!(check_well_formed("<a><b></a>").is_err());
        assert!(check_well_formed("<a>").is_err());
        assert!(check_well_formed("just text").is_err());
    }

    #[test]
    fn test_tag_offsets() {
        let xml = "ab<c>";
        assert_eq!(tag_start(xml, 2), 2);
        assert_eq!(tag_start(xml, 3), 2);
        assert_eq!(tag_end(xml, 5), 5);
        assert_eq!(tag_end(xml, 3), 5);
    }
}
