use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use online_suffix_tree::schedule::{parse_commands, render_answers};
use online_suffix_tree::{Alphabet, OracleConfig, Scheduler, SuffixTree};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "online-suffix-tree",
    about = "Substring queries answered while a suffix tree grows"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an `A <token>` / `? <token>` command stream and print YES/NO per query.
    Answer {
        /// Command stream file (stdin when omitted).
        input: Option<PathBuf>,
        #[command(flatten)]
        alphabet: AlphabetArgs,
    },
    /// Build a tree over a text and print its structural statistics.
    Stats {
        /// Text file (stdin when omitted). Whitespace is ignored.
        text: Option<PathBuf>,
        #[command(flatten)]
        alphabet: AlphabetArgs,
        /// Dump every node after the statistics.
        #[arg(long)]
        dump: bool,
    },
}

#[derive(Args, Debug)]
struct AlphabetArgs {
    /// First symbol of the alphabet.
    #[arg(long, default_value_t = 'a')]
    min: char,
    /// Last symbol of the alphabet (inclusive).
    #[arg(long, default_value_t = 'z')]
    max: char,
    /// Keep upper-case letters instead of folding them to lower case.
    #[arg(long)]
    no_fold_case: bool,
    /// Collect and print construction counters.
    #[arg(long)]
    profile: bool,
}

impl AlphabetArgs {
    fn to_config(&self) -> Result<OracleConfig> {
        let first = u8::try_from(self.min)
            .with_context(|| format!("alphabet start '{}' is not a single byte", self.min))?;
        let last = u8::try_from(self.max)
            .with_context(|| format!("alphabet end '{}' is not a single byte", self.max))?;
        let alphabet = Alphabet::inclusive(first, last).context("invalid alphabet bounds")?;

        Ok(OracleConfig::lowercase()
            .with_alphabet(alphabet)
            .with_case_folding(!self.no_fold_case)
            .with_profiling(self.profile))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Answer { input, alphabet } => run_answer(input, alphabet.to_config()?)?,
        Commands::Stats {
            text,
            alphabet,
            dump,
        } => run_stats(text, alphabet.to_config()?, dump)?,
    }

    Ok(())
}

fn run_answer(input: Option<PathBuf>, config: OracleConfig) -> Result<()> {
    let contents = read_input(input.as_ref())?;
    let events = parse_commands(&contents, &config).context("failed to parse command stream")?;

    let mut scheduler = Scheduler::new(&config);
    let answers = scheduler
        .replay(&events)
        .context("failed to replay command stream")?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(render_answers(&answers).as_bytes())?;
    if let Some(profile) = scheduler.tree().profile() {
        eprintln!("{}", profile.report());
    }
    Ok(())
}

fn run_stats(text: Option<PathBuf>, config: OracleConfig, dump: bool) -> Result<()> {
    let contents = read_input(text.as_ref())?;
    let mut symbols: Vec<u8> = contents
        .split_whitespace()
        .flat_map(|chunk| chunk.bytes())
        .collect();
    if config.fold_case {
        symbols.make_ascii_lowercase();
    }

    let mut tree = SuffixTree::new(&config);
    tree.extend_from(&symbols)
        .context("failed to build suffix tree")?;

    println!("{}", tree.stats());
    println!("fingerprint={}", tree.fingerprint().to_hex());
    if let Some(profile) = tree.profile() {
        println!("{}", profile.report());
    }
    if dump {
        print!("{}", tree);
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
