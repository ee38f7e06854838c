//! Comparison text of a WordprocessingML paragraph.
//!
//! The text is the concatenation, in document order, of every `<w:t>`
//! element inside the paragraph. Only the first child of each `<w:t>` counts,
//! and a `<w:t>` without children contributes nothing.

use crate::config::SortConfig;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// ARABIC TATWEEL (kashida), used only for visual elongation.
pub const TATWEEL: char = '\u{0640}';

/// Extract and normalize the comparison text of one paragraph.
///
/// # Arguments
///
/// * `paragraph_xml` - Markup of a single `<w:p>` element
/// * `config` - Supplies the namespace prefix of the text elements
///
/// # Errors
///
/// Returns [`Error::Structure`] if the paragraph markup is not well-formed
/// or holds an unknown entity reference.
///
/// # Example
///
/// ```
/// use kurdish_sorter::config::SortConfig;
/// use kurdish_sorter::extractors::paragraph_text;
///
/// let xml = "<w:p><w:r><w:t> کـورد</w:t></w:r><w:r><w:t>ستان </w:t></w:r></w:p>";
/// assert_eq!(paragraph_text(xml, &SortConfig::default())?, "کوردستان");
/// # Ok::<(), kurdish_sorter::error::Error>(())
/// ```
pub fn paragraph_text(paragraph_xml: &str, config: &SortConfig) -> Result<String> {
    Ok(normalize(&raw_paragraph_text(paragraph_xml, config)?))
}

/// Concatenated run text of a paragraph, without normalization.
pub fn raw_paragraph_text(paragraph_xml: &str, config: &SortConfig) -> Result<String> {
    let text_name = config.qualified("t");
    let mut reader = Reader::from_str(paragraph_xml);
    let mut text = String::new();
    let mut current: Option<TextElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Structure(format!(
                "XML parse error in paragraph at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;
        match event {
            Event::Start(e) => match current.as_mut() {
                Some(element) => {
                    element.first_child_seen = true;
                    element.depth += 1;
                },
                None if e.name().as_ref() == text_name.as_slice() => {
                    current = Some(TextElement::default());
                },
                None => {},
            },
            Event::End(_) => match current.as_mut() {
                Some(element) if element.depth > 0 => element.depth -= 1,
                Some(_) => current = None,
                None => {},
            },
            Event::Text(e) => {
                if let Some(element) = current.as_mut().filter(|el| !el.first_child_seen) {
                    element.first_child_seen = true;
                    let unescaped = e.unescape().map_err(|err| {
                        Error::Structure(format!("bad text in paragraph: {}", err))
                    })?;
                    text.push_str(&unescaped);
                }
            },
            Event::CData(e) => {
                if let Some(element) = current.as_mut().filter(|el| !el.first_child_seen) {
                    element.first_child_seen = true;
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            },
            Event::Empty(_) | Event::Comment(_) | Event::PI(_) => {
                if let Some(element) = current.as_mut() {
                    element.first_child_seen = true;
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(text)
}

/// Trim surrounding whitespace, then drop every tatweel.
pub fn normalize(text: &str) -> String {
    text.trim().chars().filter(|&c| c != TATWEEL).collect()
}

/// An open `<w:t>` element.
#[derive(Debug, Default)]
struct TextElement {
    /// Nesting depth of child elements
    depth: usize,
    first_child_seen: bool,
}
