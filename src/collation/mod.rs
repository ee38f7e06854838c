//! Sorani Kurdish collation.
//!
//! Text is split into alphabet graphemes (with `وو` as a single unit) and
//! compared by rank rather than by code point.
//!
//! ```
//! use kurdish_sorter::collation::Collator;
//! use std::cmp::Ordering;
//!
//! let collator = Collator::default();
//! // ب outranks ئ, and higher ranks sort first by default
//! assert_eq!(collator.compare("بەفر", "ئاو"), Ordering::Less);
//! ```

mod alphabet;
mod collator;

pub use alphabet::{AlphabetTable, Rank, SORANI_GRAPHEMES};
pub use collator::{CollationKey, Collator, Token};
