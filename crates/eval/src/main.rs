//! Evaluation CLI for checking Soundex encoding quality.
//!
//! Usage:
//!     eval encode Robert Ashcraft --format json
//!     eval check --vectors data/soundex_vectors.json
//!     eval compare Tymczak Pfister

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use namedex_model::SoundexError;
use namedex_soundex::encode;
use rphonetic::{Encoder, Soundex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "eval")]
#[command(about = "Evaluate Soundex encoding against known vectors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one or more names
    Encode {
        /// Names to encode
        #[arg(required = true)]
        names: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Run the encoder against a golden vector file
    Check {
        /// Path to vector JSON file
        #[arg(short, long, default_value = "data/soundex_vectors.json")]
        vectors: PathBuf,
    },

    /// Compare the encoder with rphonetic's Soundex
    Compare {
        /// Names to compare
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Error kinds as written in vector files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ErrorKind {
    EmptyInput,
    InvalidCharacter,
}

impl From<&SoundexError> for ErrorKind {
    fn from(err: &SoundexError) -> Self {
        match err {
            SoundexError::EmptyInput => Self::EmptyInput,
            SoundexError::InvalidCharacter(_) => Self::InvalidCharacter,
        }
    }
}

/// One golden case: a name and either its code or its error.
#[derive(Debug, Deserialize)]
struct Vector {
    name: String,
    #[serde(default)]
    expected: Option<String>,
    #[serde(default)]
    error: Option<ErrorKind>,
}

/// Outcome of encoding one name, as printed in JSON mode.
#[derive(Debug, Serialize)]
struct Outcome<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("namedex=info".parse()?)
                .add_directive("eval=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { names, format } => run_encode(&names, format)?,
        Commands::Check { vectors } => {
            if !run_check(&vectors)? {
                std::process::exit(1);
            }
        }
        Commands::Compare { names } => {
            if !run_compare(&names) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_encode(names: &[String], format: Format) -> Result<()> {
    let outcomes: Vec<Outcome> = names
        .iter()
        .map(|name| match encode(name) {
            Ok(code) => Outcome {
                name,
                code: Some(code.into_string()),
                error: None,
            },
            Err(err) => Outcome {
                name,
                code: None,
                error: Some(ErrorKind::from(&err)),
            },
        })
        .collect();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        Format::Text => {
            for outcome in &outcomes {
                match (&outcome.code, outcome.error) {
                    (Some(code), _) => println!("{}\t{}", outcome.name, code),
                    (None, Some(kind)) => println!("{}\terror: {:?}", outcome.name, kind),
                    (None, None) => println!("{}\t?", outcome.name),
                }
            }
        }
    }

    Ok(())
}

fn run_check(path: &Path) -> Result<bool> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading vectors from {}", path.display()))?;
    let vectors: Vec<Vector> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing vectors from {}", path.display()))?;
    info!(count = vectors.len(), path = %path.display(), "loaded vectors");

    let failures = vectors.iter().filter(|v| !check_vector(v)).count();

    println!("---");
    println!("Passed: {}/{}", vectors.len() - failures, vectors.len());
    Ok(failures == 0)
}

/// Whether a single vector matches; prints mismatches.
fn check_vector(vector: &Vector) -> bool {
    let actual = encode(&vector.name);
    let ok = match (&actual, &vector.expected, vector.error) {
        (Ok(code), Some(expected), None) => code == expected,
        (Err(err), None, Some(kind)) => ErrorKind::from(err) == kind,
        _ => false,
    };

    if ok {
        debug!(name = %vector.name, "vector passed");
    } else {
        println!(
            "FAIL {:?}: expected {:?} / {:?}, got {:?}",
            vector.name, vector.expected, vector.error, actual
        );
    }
    ok
}

fn run_compare(names: &[String]) -> bool {
    let reference = Soundex::default();
    let mut agreed = 0;

    for name in names {
        let ours = match encode(name) {
            Ok(code) => code.to_uppercase(),
            Err(err) => {
                warn!(%name, error = %err, "skipping name");
                continue;
            }
        };
        let theirs = reference.encode(name);
        let mark = if ours == theirs {
            agreed += 1;
            "="
        } else {
            "!"
        };
        println!("{}\t{}\t{}\t{}", mark, name, ours, theirs);
    }

    println!("---");
    println!("Agreement: {}/{}", agreed, names.len());
    agreed == names.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_vectors_pass() {
        let vectors: Vec<Vector> =
            serde_json::from_str(include_str!("../../../data/soundex_vectors.json")).unwrap();
        assert!(!vectors.is_empty());
        assert!(vectors.iter().all(check_vector));
    }

    #[test]
    fn test_mismatch_fails() {
        let wrong = Vector {
            name: "Robert".to_string(),
            expected: Some("R150".to_string()),
            error: None,
        };
        assert!(!check_vector(&wrong));

        let unexpected_error = Vector {
            name: "Smith3".to_string(),
            expected: Some("S530".to_string()),
            error: None,
        };
        assert!(!check_vector(&unexpected_error));
    }

    #[test]
    fn test_error_kind_names() {
        let kind: ErrorKind = serde_json::from_str("\"invalid_character\"").unwrap();
        assert_eq!(kind, ErrorKind::InvalidCharacter);
        assert_eq!(
            ErrorKind::from(&SoundexError::EmptyInput),
            ErrorKind::EmptyInput
        );
    }
}
