//! Alphabet tables: ordered mappings from grapheme to rank.
//!
//! A grapheme is one sorting unit of the alphabet and may span several
//! characters (Sorani `وو`). Ranks are dense, `0..len()`, in alphabet order.
//!
//! Lookup is greedy: multi-character graphemes are tried longest first,
//! then single characters.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Position of a grapheme in the alphabet.
pub type Rank = u32;

/// The Sorani Kurdish alphabet in canonical order.
pub const SORANI_GRAPHEMES: [&str; 34] = [
    "ئ", "ا", "ب", "پ", "ت", "ج", "چ", "ح", "خ", "د", "ر", "ڕ", "ز", "ژ", "س", "ش", "ع", "غ", "ف",
    "ڤ", "ق", "ک", "گ", "ل", "ڵ", "م", "ن", "و", "ۆ", "وو", "ه", "ە", "ی", "ێ",
];

lazy_static! {
    static ref SORANI: AlphabetTable = AlphabetTable::build(&SORANI_GRAPHEMES);
}

/// Immutable grapheme → rank mapping.
#[derive(Debug, Clone)]
pub struct AlphabetTable {
    /// Graphemes in rank order
    ranks: IndexMap<String, Rank>,
    /// Multi-character graphemes, longest first
    multi: Vec<(Vec<char>, Rank)>,
    /// Single-character graphemes
    single: HashMap<char, Rank>,
}

impl AlphabetTable {
    /// The shipped Sorani table.
    pub fn sorani() -> &'static AlphabetTable {
        &SORANI
    }

    /// Build a table from graphemes listed in alphabet order.
    ///
    /// The first grapheme gets rank 0. Empty and duplicate graphemes are
    /// rejected.
    pub fn from_graphemes<S: AsRef<str>>(graphemes: &[S]) -> Result<Self> {
        if graphemes.is_empty() {
            return Err(Error::InvalidAlphabet("alphabet has no graphemes".to_string()));
        }
        let mut seen = IndexMap::with_capacity(graphemes.len());
        for (position, grapheme) in graphemes.iter().enumerate() {
            let grapheme = grapheme.as_ref();
            if grapheme.is_empty() {
                return Err(Error::InvalidAlphabet(format!(
                    "empty grapheme at position {}",
                    position
                )));
            }
            if let Some(first) = seen.insert(grapheme, position) {
                return Err(Error::InvalidAlphabet(format!(
                    "grapheme '{}' listed at positions {} and {}",
                    grapheme, first, position
                )));
            }
        }
        Ok(Self::build(graphemes))
    }

    /// Build without validation. Callers guarantee non-empty, unique graphemes.
    fn build<S: AsRef<str>>(graphemes: &[S]) -> Self {
        let mut ranks = IndexMap::with_capacity(graphemes.len());
        let mut multi = Vec::new();
        let mut single = HashMap::new();

        for (rank, grapheme) in graphemes.iter().enumerate() {
            let grapheme = grapheme.as_ref();
            let rank = rank as Rank;
            ranks.insert(grapheme.to_string(), rank);

            let chars: Vec<char> = grapheme.chars().collect();
            match chars.as_slice() {
                [c] => {
                    single.insert(*c, rank);
                },
                _ => multi.push((chars, rank)),
            }
        }

        // Stable sort keeps alphabet order among graphemes of equal length
        multi.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            ranks,
            multi,
            single,
        }
    }

    /// Number of graphemes.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Rank of a grapheme, if it is part of the alphabet.
    pub fn rank(&self, grapheme: &str) -> Option<Rank> {
        self.ranks.get(grapheme).copied()
    }

    /// Grapheme at a rank.
    pub fn grapheme(&self, rank: Rank) -> Option<&str> {
        self.ranks
            .get_index(rank as usize)
            .map(|(grapheme, _)| grapheme.as_str())
    }

    /// Graphemes and ranks in alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rank)> {
        self.ranks.iter().map(|(g, r)| (g.as_str(), *r))
    }

    /// Longest grapheme at the start of `chars`, as `(rank, length)`.
    pub fn match_at(&self, chars: &[char]) -> Option<(Rank, usize)> {
        for (grapheme, rank) in &self.multi {
            if chars.starts_with(grapheme) {
                return Some((*rank, grapheme.len()));
            }
        }
        chars
            .first()
            .and_then(|c| self.single.get(c))
            .map(|rank| (*rank, 1))
    }
}
