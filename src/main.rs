//! Kamus - Main entrypoint.
//!
//! Command-line front end for the Kamus dictionary. Every invocation loads
//! the dictionary file, runs one command and, for commands that change the
//! dictionary, saves it back exactly once before exiting.

use clap::{Parser, Subcommand};
use kamus_lib::config::{ConfigLoader, KamusConfig, LogConfig, Validate, ENV_PREFIX};
use kamus_lib::error::{ErrorContext, ErrorReporter, KamusError, KamusResult, TracingErrorReporter};
use kamus_lib::{KamusTrie, Lookup};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Kamus.
#[derive(Parser, Debug)]
#[clap(name = "kamus", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Dictionary file, overrides `dictionary.path` from the configuration
    #[clap(short, long, value_parser)]
    dictionary: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Add a word, replacing its meaning if it already exists
    Insert {
        /// Word to add
        word: String,
        /// Meaning of the word
        meaning: String,
    },

    /// Look up the meaning of a word
    Search {
        /// Word to look up
        word: String,
    },

    /// Check whether any word starts with a prefix and list those words
    Prefix {
        /// Prefix to check
        prefix: String,
    },

    /// Remove a word
    Delete {
        /// Word to remove
        word: String,
    },

    /// Show all words in alphabetical order
    List {
        /// Print the words as a JSON array
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// One dictionary entry in `list --json` output.
#[derive(Serialize)]
struct Entry<'a> {
    word: String,
    meaning: &'a str,
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so command output on stdout stays clean.
fn init_logging(log: &LogConfig) -> KamusResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| KamusError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Loads the dictionary, treating a missing file as an empty dictionary.
fn open_dictionary(path: &Path) -> KamusResult<KamusTrie> {
    let mut trie = KamusTrie::new();
    trie.load_from_csv(path)?;
    Ok(trie)
}

/// Runs a single command against the configured dictionary.
fn run(command: Command, config: &KamusConfig) -> KamusResult<()> {
    let path = config.dictionary.path.as_path();

    match command {
        Command::Insert { word, meaning } => {
            let mut trie = open_dictionary(path)?;
            match trie.insert(&word, meaning) {
                Some(previous) => info!(word = %word, previous = %previous, "Meaning replaced"),
                None => info!(word = %word, "Word inserted"),
            }
            trie.save_to_csv(path)?;
            println!("Inserted '{word}'");
        }
        Command::Search { word } => {
            let trie = open_dictionary(path)?;
            match trie.lookup(&word) {
                Lookup::Word(meaning) => println!("{word}: {meaning}"),
                Lookup::Prefix => println!("'{word}' not found (it only begins other words)"),
                Lookup::Absent => println!("'{word}' not found"),
            }
        }
        Command::Prefix { prefix } => {
            let trie = open_dictionary(path)?;
            if trie.starts_with(&prefix) {
                println!("Words starting with '{prefix}':");
                for (word, meaning) in trie.words_with_prefix(&prefix) {
                    println!("  {word}: {meaning}");
                }
            } else {
                println!("No word starts with '{prefix}'");
            }
        }
        Command::Delete { word } => {
            let mut trie = open_dictionary(path)?;
            match trie.delete(&word) {
                Some(_) => {
                    info!(word = %word, "Word deleted");
                    println!("Deleted '{word}'");
                }
                None => println!("'{word}' not found, nothing deleted"),
            }
            trie.save_to_csv(path)?;
        }
        Command::List { json } => {
            let trie = open_dictionary(path)?;
            if json {
                let entries: Vec<Entry<'_>> = trie
                    .display_all_words()
                    .map(|(word, meaning)| Entry { word, meaning })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for (word, meaning) in &trie {
                    println!("{word}: {meaning}");
                }
            }
        }
        Command::Validate => {
            config.validate()?;
            info!("Configuration validated successfully");
            println!("Configuration is valid");
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = KamusConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| KamusError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
        }
    }

    Ok(())
}

/// Main entry point for the application.
fn main() -> KamusResult<()> {
    let args = <Args as clap::Parser>::parse();
    let reporter = TracingErrorReporter;

    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let mut config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LogConfig::default())?;
            reporter.report(&ErrorContext::new(e.into(), "config"));
            process::exit(1);
        }
    };

    if let Some(path) = args.dictionary {
        config.dictionary.path = path;
    }

    init_logging(&config.log)?;

    if let Err(error) = run(args.command, &config) {
        let context = ErrorContext::new(error, "dictionary")
            .with_details(format!("dictionary file: {}", config.dictionary.path.display()));
        reporter.report(&context);
        process::exit(1);
    }

    Ok(())
}
