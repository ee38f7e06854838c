//! Alphabet-aware string comparison.

use super::alphabet::{AlphabetTable, Rank};
use crate::config::SortDirection;
use std::cmp::Ordering;

/// One sorting unit produced by [`Collator::tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A grapheme of the alphabet
    Mapped(Rank),
    /// A character outside the alphabet, carrying its code point
    Unmapped(char),
}

/// A string paired with its rank sequence, built once by [`Collator::key`].
///
/// Sorting many strings through keys tokenizes each string a single time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey<'t> {
    text: &'t str,
    ranks: Option<Vec<Rank>>,
}

impl<'t> CollationKey<'t> {
    /// The original text.
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Rank sequence, `None` if the text holds an unmapped character.
    pub fn ranks(&self) -> Option<&[Rank]> {
        self.ranks.as_deref()
    }
}

/// Compares strings under an [`AlphabetTable`].
///
/// Strings made only of alphabet graphemes are compared rank by rank in the
/// configured [`SortDirection`]. As soon as either string holds a character
/// outside the alphabet, both are compared by plain code point instead.
#[derive(Debug, Clone, Copy)]
pub struct Collator<'a> {
    table: &'a AlphabetTable,
    direction: SortDirection,
}

impl Default for Collator<'static> {
    fn default() -> Self {
        Self::sorani(SortDirection::default())
    }
}

impl Collator<'static> {
    /// Collator over the shipped Sorani alphabet.
    pub fn sorani(direction: SortDirection) -> Self {
        Self::new(AlphabetTable::sorani(), direction)
    }
}

impl<'a> Collator<'a> {
    /// Create a collator over an arbitrary table.
    pub fn new(table: &'a AlphabetTable, direction: SortDirection) -> Self {
        Self { table, direction }
    }

    /// The alphabet in use.
    pub fn table(&self) -> &'a AlphabetTable {
        self.table
    }

    /// The rank ordering policy in use.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Split `text` into alphabet tokens, greedily matching the longest
    /// grapheme at each position.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            match self.table.match_at(&chars[i..]) {
                Some((rank, len)) => {
                    tokens.push(Token::Mapped(rank));
                    i += len;
                },
                None => {
                    tokens.push(Token::Unmapped(chars[i]));
                    i += 1;
                },
            }
        }

        tokens
    }

    /// Rank sequence of `text`, or `None` if it holds an unmapped character.
    pub fn ranks(&self, text: &str) -> Option<Vec<Rank>> {
        self.tokenize(text)
            .into_iter()
            .map(|token| match token {
                Token::Mapped(rank) => Some(rank),
                Token::Unmapped(_) => None,
            })
            .collect()
    }

    /// Compare two strings.
    ///
    /// `Less` means `a` sorts before `b`.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.compare_keys(&self.key(a), &self.key(b))
    }

    /// Tokenize `text` once for repeated comparisons.
    pub fn key<'t>(&self, text: &'t str) -> CollationKey<'t> {
        CollationKey {
            text,
            ranks: self.ranks(text),
        }
    }

    /// Compare two prepared keys, with the same result as [`Collator::compare`]
    /// on their texts.
    pub fn compare_keys(&self, a: &CollationKey<'_>, b: &CollationKey<'_>) -> Ordering {
        match (a.ranks(), b.ranks()) {
            (Some(ranks_a), Some(ranks_b)) => self.compare_ranks(ranks_a, ranks_b),
            _ => a.text.cmp(b.text),
        }
    }

    /// Compare two rank sequences.
    ///
    /// The first differing position decides; when one sequence is a prefix
    /// of the other the length decides. Descending order reverses both.
    pub fn compare_ranks(&self, a: &[Rank], b: &[Rank]) -> Ordering {
        match self.direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => a.cmp(b).reverse(),
        }
    }
}
