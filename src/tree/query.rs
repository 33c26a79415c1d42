//! Temporal query evaluator
//!
//! Walks the live tree for a word while masking every buffer position at or
//! past the query's time bound. Open leaf edges make later symbols visible
//! in the arena; the bound hides them, so a single tree answers queries for
//! any prefix length up to the current one.
//!
//! Edge labels always point at the earliest occurrence of the string they
//! spell, so a path that only reads positions below `time` exists exactly
//! when the word occurs in the first `time` symbols.

use tracing::trace;

use super::arena::{NodeArena, NodeId};
use super::buffer::SymbolBuffer;
use crate::alphabet::Symbol;
use crate::SuffixTreeError;

/// Is `word` a contiguous substring of the first `time` buffer symbols?
///
/// Read-only: evaluating the same request twice gives the same answer.
pub fn contains_at(
    arena: &NodeArena,
    buffer: &SymbolBuffer,
    word: &[Symbol],
    time: usize,
) -> Result<bool, SuffixTreeError> {
    if time > buffer.len() {
        return Err(SuffixTreeError::MalformedRequestOrder {
            time,
            len: buffer.len(),
        });
    }
    buffer.alphabet().validate(word)?;

    let found = walk(arena, buffer, word, time);
    trace!(time, len = word.len(), found, "query evaluated");
    Ok(found)
}

fn walk(arena: &NodeArena, buffer: &SymbolBuffer, word: &[Symbol], time: usize) -> bool {
    let alphabet = buffer.alphabet();
    let frontier = buffer.len();
    let mut node = NodeId::ROOT;
    let mut bias = 0usize;
    let mut consumed = 0usize;

    while consumed < word.len() {
        let symbol = word[consumed];
        if bias == 0 {
            let Some(slot) = alphabet.slot(symbol) else {
                return false;
            };
            match arena.child_of(node, slot) {
                // A label starting at or past the bound was appended too late.
                Some(child) if arena.node(child).start() < time => {
                    node = child;
                    bias = 1;
                    consumed += 1;
                }
                _ => return false,
            }
            continue;
        }

        let idx = arena.node(node).start() + bias;
        if idx >= time {
            return false;
        }
        if idx >= arena.node(node).end().resolve(frontier) {
            // Edge exhausted: re-examine the same symbol against the children.
            bias = 0;
            continue;
        }
        if buffer[idx] != symbol {
            return false;
        }
        bias += 1;
        consumed += 1;
    }
    true
}
