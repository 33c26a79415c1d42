//! Contiguous symbol alphabets
//!
//! Every symbol stored in the buffer or looked up in a node's child table
//! belongs to a half-open range `[min_s, max_s)`. A symbol's slot is its
//! offset from `min_s`, which indexes the per-node child table directly.

use std::fmt;

use crate::SuffixTreeError;

/// A single symbol of the sequence.
pub type Symbol = u8;

/// Half-open range of admissible symbols `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    min: u8,
    max: u16,
}

impl Alphabet {
    /// Lower-case latin letters `a..=z`.
    pub const LOWERCASE: Alphabet = Alphabet {
        min: b'a',
        max: b'z' as u16 + 1,
    };

    /// Decimal digits `0..=9`.
    pub const DIGITS: Alphabet = Alphabet {
        min: b'0',
        max: b'9' as u16 + 1,
    };

    /// All 256 byte values.
    pub const BYTES: Alphabet = Alphabet { min: 0, max: 256 };

    /// Create the alphabet `[min, max)`.
    pub fn new(min: u8, max: u16) -> Result<Self, SuffixTreeError> {
        if max <= u16::from(min) || max > 256 {
            return Err(SuffixTreeError::InvalidAlphabet {
                min: u16::from(min),
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Create the alphabet `first..=last`.
    pub fn inclusive(first: u8, last: u8) -> Result<Self, SuffixTreeError> {
        Self::new(first, u16::from(last) + 1)
    }

    /// Smallest admissible symbol.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Exclusive upper bound.
    pub fn max(&self) -> u16 {
        self.max
    }

    /// Number of symbols, i.e. the width of every child table.
    #[inline]
    pub fn size(&self) -> usize {
        usize::from(self.max - u16::from(self.min))
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol >= self.min && u16::from(symbol) < self.max
    }

    /// Child-table slot of `symbol`, or `None` when it is outside the range.
    #[inline]
    pub fn slot(&self, symbol: Symbol) -> Option<usize> {
        if self.contains(symbol) {
            Some(usize::from(symbol - self.min))
        } else {
            None
        }
    }

    /// Symbol stored at `slot`.
    pub fn symbol_at(&self, slot: usize) -> Option<Symbol> {
        if slot < self.size() {
            Some(self.min + slot as u8)
        } else {
            None
        }
    }

    /// Reject the first symbol of `symbols` that falls outside the alphabet.
    pub fn validate(&self, symbols: &[Symbol]) -> Result<(), SuffixTreeError> {
        match symbols.iter().position(|&s| !self.contains(s)) {
            Some(position) => Err(SuffixTreeError::InvalidSymbol {
                symbol: symbols[position],
                position,
                alphabet: *self,
            }),
            None => Ok(()),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::LOWERCASE
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let printable = |b: u16| b < 128 && (b as u8).is_ascii_graphic();
        if printable(u16::from(self.min)) && printable(self.max - 1) {
            write!(f, "'{}'..='{}'", self.min as char, (self.max - 1) as u8 as char)
        } else {
            write!(f, "[{}, {})", self.min, self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_offsets() {
        let alphabet = Alphabet::LOWERCASE;
        assert_eq!(alphabet.size(), 26);
        assert_eq!(alphabet.slot(b'a'), Some(0));
        assert_eq!(alphabet.slot(b'z'), Some(25));
        assert_eq!(alphabet.slot(b'{'), None);
        assert_eq!(alphabet.slot(b'A'), None);
        assert_eq!(alphabet.symbol_at(2), Some(b'c'));
        assert_eq!(alphabet.symbol_at(26), None);
    }

    #[test]
    fn test_full_byte_range() {
        let alphabet = Alphabet::BYTES;
        assert_eq!(alphabet.size(), 256);
        assert!(alphabet.contains(0));
        assert!(alphabet.contains(255));
        assert_eq!(alphabet.slot(255), Some(255));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert!(matches!(
            Alphabet::new(b'a', u16::from(b'a')),
            Err(SuffixTreeError::InvalidAlphabet { .. })
        ));
        assert!(Alphabet::new(0, 257).is_err());
        assert_eq!(Alphabet::inclusive(b'0', b'9').unwrap(), Alphabet::DIGITS);
    }

    #[test]
    fn test_validate_reports_first_offender() {
        let err = Alphabet::LOWERCASE.validate(b"abC1").unwrap_err();
        assert_eq!(
            err,
            SuffixTreeError::InvalidSymbol {
                symbol: b'C',
                position: 2,
                alphabet: Alphabet::LOWERCASE,
            }
        );
        assert!(Alphabet::LOWERCASE.validate(b"").is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Alphabet::LOWERCASE.to_string(), "'a'..='z'");
        assert_eq!(Alphabet::BYTES.to_string(), "[0, 256)");
    }
}
