//! Construction/query scheduler
//!
//! Replays appends and queries in the order they were issued. Each query is
//! stamped with the buffer length at the moment it is issued, so it observes
//! the tree exactly as construction had left it at that time, even though
//! later appends keep growing the same arena.

mod command;

pub use command::{parse_commands, render_answers, run_commands, CommandError};

use std::borrow::Borrow;

use bitvec::prelude::*;
use tracing::{debug, info};

use crate::alphabet::Symbol;
use crate::tree::SuffixTree;
use crate::{OracleConfig, SuffixTreeError};

/// One input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Extend the buffer, one extension step per symbol
    Append(Vec<Symbol>),
    /// Ask whether the word occurs in the buffer as it stands now
    Query(Vec<Symbol>),
}

impl Event {
    /// Append event for `token`.
    pub fn append(token: impl AsRef<[Symbol]>) -> Self {
        Event::Append(token.as_ref().to_vec())
    }

    /// Query event for `word`.
    pub fn query(word: impl AsRef<[Symbol]>) -> Self {
        Event::Query(word.as_ref().to_vec())
    }
}

/// A word together with the buffer length it must be answered against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Temporal bound
    pub time: usize,
    /// Word to look up
    pub word: Vec<Symbol>,
}

impl Request {
    /// Create a request.
    pub fn new(time: usize, word: impl AsRef<[Symbol]>) -> Self {
        Self {
            time,
            word: word.as_ref().to_vec(),
        }
    }
}

/// One boolean per query, in issuance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    bits: BitVec,
}

impl Answers {
    /// Empty answer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty answer list with room for `capacity` answers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(capacity),
        }
    }

    /// Record the next answer.
    pub fn push(&mut self, answer: bool) {
        self.bits.push(answer);
    }

    /// Number of answered queries.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no query was answered.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Answer of the `idx`-th query.
    pub fn get(&self, idx: usize) -> Option<bool> {
        self.bits.get(idx).map(|bit| *bit)
    }

    /// Answers in issuance order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Number of positive answers.
    pub fn count_found(&self) -> usize {
        self.bits.count_ones()
    }

    /// Copy into a plain vector.
    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }
}

impl FromIterator<bool> for Answers {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Drives one tree through an event sequence.
#[derive(Debug)]
pub struct Scheduler {
    tree: SuffixTree,
}

impl Scheduler {
    /// Scheduler over an empty tree.
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            tree: SuffixTree::new(config),
        }
    }

    /// Tree as constructed so far.
    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    /// Hand the tree back.
    pub fn into_tree(self) -> SuffixTree {
        self.tree
    }

    /// Stamp `word` with the current buffer length.
    pub fn issue(&self, word: impl AsRef<[Symbol]>) -> Request {
        Request::new(self.tree.len(), word)
    }

    /// Answer a request against the live tree.
    pub fn evaluate(&self, request: &Request) -> Result<bool, SuffixTreeError> {
        self.tree.contains_at(&request.word, request.time)
    }

    /// Apply one event; queries yield their answer.
    ///
    /// A rejected event leaves the tree unchanged.
    pub fn apply(&mut self, event: &Event) -> Result<Option<bool>, SuffixTreeError> {
        match event {
            Event::Append(symbols) => {
                self.tree.extend_from(symbols)?;
                Ok(None)
            }
            Event::Query(word) => {
                let request = self.issue(word);
                self.evaluate(&request).map(Some)
            }
        }
    }

    /// Apply every event in order and collect the query answers.
    pub fn replay<I>(&mut self, events: I) -> Result<Answers, SuffixTreeError>
    where
        I: IntoIterator,
        I::Item: Borrow<Event>,
    {
        let mut answers = Answers::new();
        let mut appends = 0usize;
        for event in events {
            match self.apply(Borrow::<Event>::borrow(&event))? {
                Some(answer) => answers.push(answer),
                None => appends += 1,
            }
        }
        info!(
            appends,
            queries = answers.len(),
            found = answers.count_found(),
            symbols = self.tree.len(),
            nodes = self.tree.node_count(),
            "replay complete"
        );
        Ok(answers)
    }

    /// Answer pre-stamped requests while building the tree over `text`.
    ///
    /// Requests must be sorted by time and no time may exceed the text
    /// length; each is evaluated as soon as construction reaches its time.
    pub fn answer_offline(
        config: &OracleConfig,
        text: &[Symbol],
        requests: &[Request],
    ) -> Result<Answers, SuffixTreeError> {
        config.alphabet.validate(text)?;

        let mut scheduler = Scheduler::new(config);
        let mut answers = Answers::with_capacity(requests.len());
        let mut due = requests.iter().peekable();

        for &symbol in text {
            while let Some(request) = due.next_if(|r| r.time <= scheduler.tree.len()) {
                answers.push(scheduler.evaluate_due(request)?);
            }
            scheduler.tree.push(symbol)?;
        }
        for request in due {
            answers.push(scheduler.evaluate_due(request)?);
        }

        debug!(requests = requests.len(), symbols = text.len(), "offline batch answered");
        Ok(answers)
    }

    fn evaluate_due(&self, request: &Request) -> Result<bool, SuffixTreeError> {
        if request.time != self.tree.len() {
            return Err(SuffixTreeError::MalformedRequestOrder {
                time: request.time,
                len: self.tree.len(),
            });
        }
        self.evaluate(request)
    }
}
