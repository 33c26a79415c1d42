//! Append-only symbol buffer
//!
//! Single source of truth for every edge label. Indices are permanent:
//! the buffer only grows at its end.

use std::ops::Index;

use crate::alphabet::{Alphabet, Symbol};
use crate::SuffixTreeError;

/// Append-only sequence of symbols from one alphabet.
#[derive(Debug, Clone)]
pub struct SymbolBuffer {
    alphabet: Alphabet,
    symbols: Vec<Symbol>,
}

impl SymbolBuffer {
    /// Create an empty buffer over `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            symbols: Vec::new(),
        }
    }

    /// Push `symbol` and return the new length.
    pub fn append(&mut self, symbol: Symbol) -> Result<usize, SuffixTreeError> {
        if !self.alphabet.contains(symbol) {
            return Err(SuffixTreeError::InvalidSymbol {
                symbol,
                position: 0,
                alphabet: self.alphabet,
            });
        }
        self.symbols.push(symbol);
        Ok(self.symbols.len())
    }

    /// Alphabet the buffer validates against.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Current length, i.e. the frontier of every open edge.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True before the first append.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `idx`, if it has been appended.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Symbol> {
        self.symbols.get(idx).copied()
    }

    /// Child-table slot of the symbol at `idx`.
    ///
    /// Every stored symbol passed validation, so the slot always exists.
    #[inline]
    pub(crate) fn slot_at(&self, idx: usize) -> usize {
        usize::from(self.symbols[idx] - self.alphabet.min())
    }

    /// View of the whole buffer.
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Index<usize> for SymbolBuffer {
    type Output = Symbol;

    fn index(&self, idx: usize) -> &Symbol {
        &self.symbols[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_returns_length() {
        let mut buffer = SymbolBuffer::new(Alphabet::LOWERCASE);
        assert!(buffer.is_empty());
        assert_eq!(buffer.append(b'x').unwrap(), 1);
        assert_eq!(buffer.append(b'y').unwrap(), 2);
        assert_eq!(buffer.as_slice(), b"xy");
        assert_eq!(buffer[1], b'y');
        assert_eq!(buffer.get(2), None);
        assert_eq!(buffer.slot_at(1), 24);
    }

    #[test]
    fn test_out_of_range_symbol_is_rejected() {
        let mut buffer = SymbolBuffer::new(Alphabet::DIGITS);
        buffer.append(b'4').unwrap();
        let err = buffer.append(b'a').unwrap_err();
        assert!(matches!(err, SuffixTreeError::InvalidSymbol { symbol: b'a', .. }));
        assert_eq!(buffer.len(), 1);
    }
}
