//! Alphabetical reordering of body paragraphs.
//!
//! The reorderer extracts one [`ParagraphDescriptor`] per body paragraph,
//! sorts the descriptors with a [`Collator`], and splices the original
//! paragraph markup back into the body in the new order. The document is
//! only rendered once the complete order is known.

use crate::collation::{CollationKey, Collator};
use crate::config::SortConfig;
use crate::document::{check_well_formed, WordDocument};
use crate::error::{Error, Result};
use crate::extractors::paragraph_text;
use std::cmp::Ordering;

/// Sort key of one paragraph.
///
/// Holds no markup, only the position of the paragraph it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphDescriptor {
    /// Index of the paragraph in the original body
    pub original_index: usize,
    /// Normalized text the paragraph is compared by
    pub comparison_text: String,
}

/// Sorts the paragraphs of a [`WordDocument`].
#[derive(Debug, Clone)]
pub struct Reorderer<'a> {
    collator: Collator<'a>,
    config: SortConfig,
}

impl Reorderer<'static> {
    /// Reorderer over the Sorani alphabet, in the configured direction.
    pub fn new(config: SortConfig) -> Self {
        Self {
            collator: Collator::sorani(config.direction),
            config,
        }
    }
}

impl<'a> Reorderer<'a> {
    /// Reorderer with an explicit collator.
    ///
    /// The collator's own direction wins over `config.direction`.
    pub fn with_collator(collator: Collator<'a>, config: SortConfig) -> Self {
        Self { collator, config }
    }

    /// The collator in use.
    pub fn collator(&self) -> &Collator<'a> {
        &self.collator
    }

    /// Build one descriptor per body paragraph, in document order.
    pub fn describe(&self, document: &WordDocument) -> Result<Vec<ParagraphDescriptor>> {
        document
            .paragraphs()
            .enumerate()
            .map(|(original_index, markup)| {
                Ok(ParagraphDescriptor {
                    original_index,
                    comparison_text: paragraph_text(markup, &self.config)?,
                })
            })
            .collect()
    }

    /// Sort descriptors by their comparison text.
    ///
    /// Each text is tokenized once, not once per comparison.
    pub fn sort(&self, descriptors: Vec<ParagraphDescriptor>) -> Vec<ParagraphDescriptor> {
        let order: Vec<usize> = {
            let keyed: Vec<(CollationKey<'_>, usize)> = descriptors
                .iter()
                .enumerate()
                .map(|(position, d)| (self.collator.key(&d.comparison_text), position))
                .collect();
            let mut compare = |a: &(CollationKey<'_>, usize), b: &(CollationKey<'_>, usize)| {
                self.collator.compare_keys(&a.0, &b.0)
            };
            merge_sort_by(keyed, &mut compare)
                .into_iter()
                .map(|(_, position)| position)
                .collect()
        };

        let mut slots: Vec<Option<ParagraphDescriptor>> =
            descriptors.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|position| slots[position].take())
            .collect()
    }

    /// Original paragraph indices in sorted order.
    pub fn order(&self, document: &WordDocument) -> Result<Vec<usize>> {
        let descriptors = self.describe(document)?;
        Ok(self
            .sort(descriptors)
            .into_iter()
            .map(|d| d.original_index)
            .collect())
    }

    /// Reorder the document's body paragraphs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structure`] if a paragraph cannot be read, and
    /// [`Error::Serialization`] if the output cannot be rendered or fails the
    /// well-formedness check.
    pub fn reorder(&self, document: WordDocument) -> Result<WordDocument> {
        if document.paragraph_count() == 0 {
            log::debug!("No body paragraphs, document left unchanged");
            return Ok(document);
        }

        let order = self.order(&document)?;
        let moved = order
            .iter()
            .enumerate()
            .filter(|(slot, index)| slot != *index)
            .count();
        log::debug!(
            "Sorted {} paragraphs, {} change position",
            order.len(),
            moved
        );

        let reordered = document.with_paragraph_order(&order)?;
        if self.config.verify_output {
            check_well_formed(reordered.as_str())
                .map_err(|e| Error::Serialization(format!("output is not well-formed: {}", e)))?;
        }
        Ok(reordered)
    }
}

/// Reorder a document with the Sorani collator.
pub fn reorder(document: WordDocument, config: &SortConfig) -> Result<WordDocument> {
    Reorderer::new(config.clone()).reorder(document)
}

/// Original paragraph indices of `document` in sorted order.
pub fn reorder_indices(document: &WordDocument, config: &SortConfig) -> Result<Vec<usize>> {
    Reorderer::new(config.clone()).order(document)
}

/// Stable top-down merge sort.
///
/// Always terminates with a permutation of `items`, even when `compare` is
/// not transitive across mixed inputs (the code-point fallback is not
/// consistent with rank order).
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }

    merged
}
