//! Command-stream layer
//!
//! The textual input is a whitespace-separated stream of `(command, token)`
//! pairs: `A <token>` appends the token, `? <token>` queries it. The token
//! may also be glued to its command (`Aabc`). Answers are printed as one
//! `YES`/`NO` line per query.

use thiserror::Error;
use tracing::debug;

use super::{Answers, Event, Scheduler};
use crate::{OracleConfig, SuffixTreeError};

/// Command that appends its token.
pub const APPEND_COMMAND: char = 'A';
/// Command that queries its token.
pub const QUERY_COMMAND: char = '?';

/// Errors raised while reading or replaying a command stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Command other than `A` or `?`
    #[error("unknown command '{command}' in pair {pair}")]
    UnknownCommand {
        /// Command character
        command: char,
        /// Zero-based index of the pair in the stream
        pair: usize,
    },

    /// Stream ended right after a command
    #[error("command '{command}' in pair {pair} has no token")]
    MissingToken {
        /// Command character
        command: char,
        /// Zero-based index of the pair in the stream
        pair: usize,
    },

    /// Replaying a parsed event failed
    #[error("replay failed: {0}")]
    Replay(#[from] SuffixTreeError),
}

/// Decode a command stream into events, case-folding tokens if configured.
pub fn parse_commands(input: &str, config: &OracleConfig) -> Result<Vec<Event>, CommandError> {
    let mut tokens = input.split_whitespace();
    let mut events = Vec::new();

    while let Some(head) = tokens.next() {
        let pair = events.len();
        let mut chars = head.chars();
        let command = match chars.next() {
            Some(command) => command,
            None => continue,
        };
        let glued = chars.as_str();
        let token = if glued.is_empty() {
            tokens
                .next()
                .ok_or(CommandError::MissingToken { command, pair })?
        } else {
            glued
        };

        let mut symbols = token.as_bytes().to_vec();
        if config.fold_case {
            symbols.make_ascii_lowercase();
        }

        let event = match command {
            APPEND_COMMAND => Event::Append(symbols),
            QUERY_COMMAND => Event::Query(symbols),
            _ => return Err(CommandError::UnknownCommand { command, pair }),
        };
        events.push(event);
    }

    debug!(events = events.len(), "command stream parsed");
    Ok(events)
}

/// Parse and replay a command stream against a fresh tree.
pub fn run_commands(input: &str, config: &OracleConfig) -> Result<Answers, CommandError> {
    let events = parse_commands(input, config)?;
    let mut scheduler = Scheduler::new(config);
    Ok(scheduler.replay(&events)?)
}

/// One `YES`/`NO` line per answer.
pub fn render_answers(answers: &Answers) -> String {
    let mut out = String::with_capacity(answers.len() * 4);
    for answer in answers.iter() {
        out.push_str(if answer { "YES\n" } else { "NO\n" });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separated_and_glued_pairs() {
        let events = parse_commands("A ab\n? AB\nAc ?abc", &OracleConfig::lowercase()).unwrap();
        assert_eq!(
            events,
            vec![
                Event::append("ab"),
                Event::query("ab"),
                Event::append("c"),
                Event::query("abc"),
            ]
        );
    }

    #[test]
    fn test_case_folding_can_be_disabled() {
        let config = OracleConfig::bytes().with_case_folding(false);
        let events = parse_commands("A Ab", &config).unwrap();
        assert_eq!(events, vec![Event::append("Ab")]);
    }

    #[test]
    fn test_parse_errors() {
        let config = OracleConfig::lowercase();
        assert_eq!(
            parse_commands("A ab ?", &config),
            Err(CommandError::MissingToken { command: '?', pair: 1 })
        );
        assert_eq!(
            parse_commands("A ab X cd", &config),
            Err(CommandError::UnknownCommand { command: 'X', pair: 1 })
        );
    }

    #[test]
    fn test_run_and_render() {
        let config = OracleConfig::lowercase();
        let answers = run_commands("A ban ? ana A ana ? ANA ? nab", &config).unwrap();
        assert_eq!(render_answers(&answers), "NO\nYES\nNO\n");
    }

    #[test]
    fn test_invalid_symbol_surfaces_from_replay() {
        let err = run_commands("A ab1", &OracleConfig::lowercase()).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Replay(SuffixTreeError::InvalidSymbol { symbol: b'1', .. })
        ));
    }
}
