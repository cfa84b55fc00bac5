//! RC1 - Rhetorical constraint auditor CLI
//!
//! ## Commands
//!
//! - `evaluate`: Score a text against the seven RC1 constraints
//! - `loop`: Run the bounded teaching loop over a text
//! - `check-invariants`: Verify scoring arithmetic over a sample corpus

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use rc1_core::{
    check_invariants, evaluate, load_corpus, run_teaching_loop, Gate, Rc1Harness, Rewriter,
    Sample, ScriptedRewriter,
};

#[derive(Parser)]
#[command(name = "rc1")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "RC1 rhetorical constraint auditor", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a text and print the result as JSON
    Evaluate {
        /// Text to evaluate (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Exit non-zero when the gate is FAIL
        #[arg(long)]
        strict: bool,
    },

    /// Run the teaching loop with the reference harness
    Loop {
        /// Read the text from a file (stdin otherwise)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Sample identifier used in iteration ids and logs
        #[arg(long, default_value = "sample_0")]
        sample_id: String,

        /// File holding one candidate rewrite; repeat in order of use
        #[arg(long = "rewrite")]
        rewrites: Vec<PathBuf>,

        /// Print the full loop result as JSON instead of the summary line
        #[arg(long)]
        json_output: bool,
    },

    /// Check scoring invariants over the built-in samples or a corpus file
    CheckInvariants {
        /// JSON corpus: array of strings or of {"id", "text"} objects
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    rc1_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Evaluate { text, file, strict } => {
            cmd_evaluate(text.as_deref(), file.as_deref(), strict)
        }
        Commands::Loop {
            file,
            sample_id,
            rewrites,
            json_output,
        } => cmd_loop(file.as_deref(), &sample_id, &rewrites, json_output),
        Commands::CheckInvariants { corpus } => cmd_check_invariants(corpus.as_deref()),
    }
}

fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read text file: {:?}", path))
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}

fn resolve_text(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => read_text_file(path),
        (None, None) => read_stdin(),
    }
}

fn cmd_evaluate(text: Option<&str>, file: Option<&Path>, strict: bool) -> Result<()> {
    let text = resolve_text(text, file)?;
    let result = evaluate(&text);

    println!("{}", serde_json::to_string_pretty(&result)?);

    if strict && result.gate == Gate::Fail {
        anyhow::bail!("Gate FAIL (score {:.4}, V={})", result.score, result.v);
    }
    Ok(())
}

fn cmd_loop(
    file: Option<&Path>,
    sample_id: &str,
    rewrites: &[PathBuf],
    json_output: bool,
) -> Result<()> {
    let text = resolve_text(None, file)?;

    let mut scripted = if rewrites.is_empty() {
        None
    } else {
        let candidates = rewrites
            .iter()
            .map(|p| read_text_file(p))
            .collect::<Result<Vec<_>>>()?;
        info!(candidates = candidates.len(), "Loaded scripted rewrites");
        Some(ScriptedRewriter::new(candidates))
    };

    let rewriter = scripted
        .as_mut()
        .map(|r| r as &mut dyn Rewriter<rc1_core::Rc1Error>);
    let result = run_teaching_loop(&text, &Rc1Harness, rewriter, sample_id)
        .context("Teaching loop failed")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.summary_line());
    if result.external_handoff {
        if let Some(last) = result.iterations.last() {
            println!();
            println!("{}", last.rewrite_prompt);
        }
    }
    Ok(())
}

fn cmd_check_invariants(corpus: Option<&Path>) -> Result<()> {
    let samples = match corpus {
        Some(path) => load_corpus(path)
            .with_context(|| format!("Failed to load corpus: {:?}", path))?,
        None => Sample::builtin(),
    };

    let report = check_invariants(&samples);
    for failure in &report.failures {
        println!("FAIL {failure}");
    }

    if !report.passed() {
        anyhow::bail!("{} invariant failure(s) detected", report.failures.len());
    }
    println!(
        "All invariants validated across {} samples.",
        report.samples_checked
    );
    Ok(())
}
