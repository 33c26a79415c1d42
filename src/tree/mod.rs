//! Online suffix tree
//!
//! Ties the append-only buffer, the node arena and the extension engine
//! together. Every append runs exactly one extension step; queries read the
//! arena as it currently stands, bounded by a time no later than the
//! current length.

mod arena;
mod buffer;
mod extension;
mod query;
mod stats;

pub use arena::{EdgeEnd, Node, NodeArena, NodeId};
pub use buffer::SymbolBuffer;
pub use extension::{ActivePoint, ExtensionEngine};
pub use query::contains_at;
pub use stats::{ConstructionProfile, TreeStats};

use std::fmt;

use tracing::debug;

use crate::alphabet::{Alphabet, Symbol};
use crate::{OracleConfig, SuffixTreeError};

/// Suffix tree over a growing symbol sequence.
#[derive(Debug, Clone)]
pub struct SuffixTree {
    buffer: SymbolBuffer,
    arena: NodeArena,
    engine: ExtensionEngine,
}

impl SuffixTree {
    /// Create an empty tree configured by `config`.
    pub fn new(config: &OracleConfig) -> Self {
        Self::build(config.alphabet, config.profile)
    }

    /// Create an empty tree over `alphabet` without profiling.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self::build(alphabet, false)
    }

    /// Build a tree over a complete text.
    pub fn from_symbols(alphabet: Alphabet, symbols: &[Symbol]) -> Result<Self, SuffixTreeError> {
        let mut tree = Self::with_alphabet(alphabet);
        tree.extend_from(symbols)?;
        Ok(tree)
    }

    fn build(alphabet: Alphabet, profile: bool) -> Self {
        Self {
            buffer: SymbolBuffer::new(alphabet),
            arena: NodeArena::new(alphabet.size()),
            engine: ExtensionEngine::new(profile),
        }
    }

    /// Append one symbol and run its extension step. Returns the new length.
    pub fn push(&mut self, symbol: Symbol) -> Result<usize, SuffixTreeError> {
        let len = self.buffer.append(symbol)?;
        self.engine.extend(&mut self.arena, &self.buffer, len - 1);
        Ok(len)
    }

    /// Append a token symbol by symbol.
    ///
    /// The whole token is validated first, so a rejected token leaves the
    /// tree untouched.
    pub fn extend_from(&mut self, symbols: &[Symbol]) -> Result<usize, SuffixTreeError> {
        self.buffer.alphabet().validate(symbols)?;
        for &symbol in symbols {
            self.push(symbol)?;
        }
        debug!(appended = symbols.len(), len = self.len(), nodes = self.node_count(), "token appended");
        Ok(self.len())
    }

    /// Is `word` a substring of the whole buffer?
    pub fn contains(&self, word: &[Symbol]) -> Result<bool, SuffixTreeError> {
        self.contains_at(word, self.len())
    }

    /// Is `word` a substring of the first `time` symbols?
    pub fn contains_at(&self, word: &[Symbol], time: usize) -> Result<bool, SuffixTreeError> {
        query::contains_at(&self.arena, &self.buffer, word, time)
    }

    /// Buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True before the first append.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Alphabet of the tree.
    pub fn alphabet(&self) -> Alphabet {
        self.buffer.alphabet()
    }

    /// Appended symbols.
    pub fn symbols(&self) -> &[Symbol] {
        self.buffer.as_slice()
    }

    /// Nodes excluding the root.
    pub fn node_count(&self) -> usize {
        self.arena.len() - 1
    }

    /// Read access to the arena.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Current construction cursor.
    pub fn active_point(&self) -> ActivePoint {
        self.engine.active_point()
    }

    /// Suffixes still implicit in the tree.
    pub fn pending(&self) -> usize {
        self.engine.pending(&self.arena, self.len())
    }

    /// Construction counters, when profiling is enabled.
    pub fn profile(&self) -> Option<&ConstructionProfile> {
        self.engine.profile()
    }

    /// Structural statistics at the current frontier.
    pub fn stats(&self) -> TreeStats {
        let frontier = self.len();
        let mut stats = TreeStats {
            symbols: frontier,
            ..TreeStats::default()
        };
        for (id, node) in self.arena.iter().skip(1) {
            stats.nodes += 1;
            if node.is_leaf() {
                stats.leaves += 1;
            } else {
                stats.internal_nodes += 1;
            }
            stats.max_depth = stats.max_depth.max(self.arena.string_depth(id, frontier));
        }
        stats
    }

    /// Digest of the buffer and the full arena layout.
    pub fn fingerprint(&self) -> blake3::Hash {
        fn word(value: Option<usize>) -> [u8; 8] {
            value.map_or(u64::MAX, |v| v as u64).to_le_bytes()
        }

        let mut hasher = blake3::Hasher::new();
        let alphabet = self.alphabet();
        hasher.update(&[alphabet.min()]);
        hasher.update(&alphabet.max().to_le_bytes());
        hasher.update(&word(Some(self.len())));
        hasher.update(self.symbols());
        for (_, node) in self.arena.iter() {
            let end = match node.end() {
                EdgeEnd::Open => None,
                EdgeEnd::Closed(end) => Some(end),
            };
            hasher.update(&word(node.parent().map(NodeId::index)));
            hasher.update(&word(Some(node.start())));
            hasher.update(&word(end));
            hasher.update(&word(node.suffix_link().map(NodeId::index)));
            for (slot, child) in node.children() {
                hasher.update(&word(Some(slot)));
                hasher.update(&word(Some(child.index())));
            }
        }
        hasher.finalize()
    }
}

impl fmt::Display for SuffixTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active_point();
        let alphabet = self.alphabet();
        writeln!(f, "Tree:")?;
        writeln!(
            f,
            "alphabet:{} active:{} bias:{}",
            alphabet, active.node, active.bias
        )?;
        writeln!(f, "nodes")?;
        writeln!(f, "{{")?;
        for (id, node) in self.arena.iter() {
            write!(f, "{}<", id)?;
            match node.parent() {
                Some(parent) => write!(f, "parent:{}", parent)?,
                None => write!(f, "root")?,
            }
            match node.end() {
                EdgeEnd::Open => write!(f, " edge:[{}, ..)", node.start())?,
                EdgeEnd::Closed(end) => write!(f, " edge:[{}, {})", node.start(), end)?,
            }
            if let Some(link) = node.suffix_link() {
                write!(f, " link:{}", link)?;
            }
            write!(f, " depth:{} [", self.arena.string_depth(id, self.len()))?;
            for (slot, child) in node.children() {
                let label = alphabet.symbol_at(slot).map_or('?', char::from);
                write!(f, "({}:{})", label, child)?;
            }
            writeln!(f, "]>")?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_token_leaves_tree_untouched() {
        let mut tree = SuffixTree::with_alphabet(Alphabet::LOWERCASE);
        tree.extend_from(b"abc").unwrap();
        let before = tree.fingerprint();

        let err = tree.extend_from(b"deF").unwrap_err();
        assert!(matches!(err, SuffixTreeError::InvalidSymbol { position: 2, .. }));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.fingerprint(), before);
    }

    #[test]
    fn test_stats_for_distinct_symbols() {
        let tree = SuffixTree::from_symbols(Alphabet::LOWERCASE, b"abcd").unwrap();
        let stats = tree.stats();
        assert_eq!(stats.leaves, 4);
        assert_eq!(stats.internal_nodes, 0);
        assert_eq!(stats.max_depth, 4);
        assert!(stats.within_node_bound());
    }

    #[test]
    fn test_profile_follows_config() {
        let config = OracleConfig::lowercase().with_profiling(true);
        let mut tree = SuffixTree::new(&config);
        tree.extend_from(b"abab").unwrap();
        let profile = tree.profile().expect("profiling enabled");
        assert_eq!(profile.extension_steps, 4);
        assert!(SuffixTree::new(&OracleConfig::lowercase()).profile().is_none());
    }

    #[test]
    fn test_display_dumps_every_node() {
        let tree = SuffixTree::from_symbols(Alphabet::LOWERCASE, b"abab").unwrap();
        let dump = tree.to_string();
        assert!(dump.starts_with("Tree:\n"));
        assert_eq!(dump.matches('<').count(), tree.arena().len());
        assert!(dump.contains("#0<root"));
    }
}
