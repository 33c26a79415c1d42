//! # Online Suffix Tree with Temporal Substring Queries
//!
//! This library builds a suffix tree over an append-only symbol sequence,
//! one symbol at a time, and answers "is `word` a substring of the first `T`
//! symbols" queries interleaved with construction.
//!
//! ## Core Algorithm
//!
//! 1. **Append-only buffer**: symbols from a contiguous alphabet `[min_s, max_s)`
//! 2. **Node arena**: nodes addressed by stable handles, never moved or freed
//! 3. **Ukkonen extension**: active point + suffix links, amortized O(1) per symbol
//! 4. **Temporal evaluation**: leaf edges stay open, queries mask symbols at or
//!    past their time bound
//!
//! ## Usage Example
//!
//! ```
//! use online_suffix_tree::{Event, OracleConfig, Scheduler};
//!
//! let mut scheduler = Scheduler::new(&OracleConfig::lowercase());
//! let answers = scheduler
//!     .replay([
//!         Event::append("ban"),
//!         Event::query("ana"),
//!         Event::append("ana"),
//!         Event::query("ana"),
//!     ])
//!     .unwrap();
//! assert_eq!(answers.to_vec(), vec![false, true]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod alphabet; // Symbol ranges and validation
pub mod tree;     // Buffer, arena, extension engine, temporal evaluator
pub mod schedule; // Event replay and command-stream layer

// Re-exports for convenience
pub use alphabet::{Alphabet, Symbol};
pub use schedule::{Answers, Event, Request, Scheduler};
pub use tree::{ConstructionProfile, NodeId, SuffixTree, TreeStats};

use thiserror::Error;

/// Configuration parameters shared by the tree, the scheduler and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Alphabet every appended symbol and query symbol must belong to
    pub alphabet: Alphabet,

    /// Lower-case ASCII letters in the command stream before validation
    pub fold_case: bool,

    /// Collect construction counters
    pub profile: bool,
}

impl OracleConfig {
    /// Lower-case latin letters `a..=z` with case folding enabled.
    pub fn lowercase() -> Self {
        Self {
            alphabet: Alphabet::LOWERCASE,
            fold_case: true,
            profile: false,
        }
    }

    /// Decimal digits `0..=9`.
    pub fn digits() -> Self {
        Self {
            alphabet: Alphabet::DIGITS,
            fold_case: false,
            profile: false,
        }
    }

    /// Every byte value.
    pub fn bytes() -> Self {
        Self {
            alphabet: Alphabet::BYTES,
            fold_case: false,
            profile: false,
        }
    }

    /// Replace the alphabet.
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Toggle ASCII case folding of command tokens.
    pub fn with_case_folding(mut self, enabled: bool) -> Self {
        self.fold_case = enabled;
        self
    }

    /// Toggle construction profiling.
    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::lowercase()
    }
}

/// Errors raised by the buffer, the extension engine and the evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuffixTreeError {
    /// Symbol outside the configured alphabet
    #[error("symbol {symbol:#04x} at position {position} is outside alphabet {alphabet}")]
    InvalidSymbol {
        /// Offending symbol
        symbol: Symbol,
        /// Index of the symbol within the rejected token
        position: usize,
        /// Alphabet the symbol was checked against
        alphabet: Alphabet,
    },

    /// Alphabet range is empty
    #[error("alphabet [{min}, {max}) is empty")]
    InvalidAlphabet {
        /// Inclusive lower bound
        min: u16,
        /// Exclusive upper bound
        max: u16,
    },

    /// Request time lies beyond the constructed prefix, or requests are unsorted
    #[error("request at time {time} is out of order (constructed length {len})")]
    MalformedRequestOrder {
        /// Time named by the request
        time: usize,
        /// Buffer length when the request was evaluated
        len: usize,
    },
}
