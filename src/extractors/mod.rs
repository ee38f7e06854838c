//! Text extraction from document markup.
//!
//! Provides the comparison text that paragraphs are sorted by.

pub mod paragraph_text;

pub use paragraph_text::{normalize, paragraph_text, raw_paragraph_text, TATWEEL};
