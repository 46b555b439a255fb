//! [Command-line interface](Cli) (CLI) of the main binary.

#[cfg(test)]
mod tests;

use crate::run::{ClassifyArgs, CohortArgs, EnrichmentArgs};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
/// ---
/// The CLI is intended for parsing user input from the command-line in the main function. This is achieved with the `parse` function, which parses the command line arguments from [`std::env::args`](https://doc.rust-lang.org/std/env/fn.args.html).
/// ```no_run
/// use clap::Parser;
/// let args = burden::Cli::parse();
/// ```
/// The command-line arguments from `std::env::args` are simply a vector of space separated strings. Here is a manual example of setting the command-line input:
/// ```rust
/// # use clap::Parser;
/// let input = ["burden", "enrichment", "--patients", "patients.tsv", "--reference", "gnomad.tsv", "--inheritance", "recessive"];
/// let args = burden::Cli::parse_from(input);
/// serde_json::to_string_pretty(&args)?;
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
/// With the following pretty JSON representation:
/// ```json
/// {
///   "command": {
///     "Enrichment": {
///       "patients": "patients.tsv",
///       "reference": "gnomad.tsv",
///       "inheritance": "Recessive",
///       "bins": [
///         { "lower": 0.0, "upper": 10.0 },
///         { "lower": 10.0, "upper": 20.0 },
///         { "lower": 20.0, "upper": 30.0 },
///         { "lower": 30.0, "upper": 100.0 }
///       ],
///       "output": null,
///       "output_dir": "."
///     }
///   },
///   "verbosity": "Info"
/// }
/// ```
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(name = "burden", author, version)]
#[clap(about = "burden tests genes for an excess of deleterious genotypes in patients and phenotype groups.")]
pub struct Cli {
    #[clap(subcommand)]
    /// Pass CLI arguments to a particular [Command].
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(hide_possible_values = false)]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants). Used to decide which analysis the CLI arguments should be passed to.
#[derive(Debug, Deserialize, Serialize, Subcommand)]
pub enum Command {
    /// Pass CLI arguments to the [enrichment](crate::run::enrichment) analysis.
    /// ## Examples
    /// ```rust
    /// use burden::{Cli, cli::Command};
    /// use clap::Parser;
    /// let input = ["burden", "enrichment", "-p", "patients.tsv", "-r", "gnomad.tsv", "--bins", "0-15,15-100"];
    /// let args = Cli::parse_from(input);
    /// assert!(matches!(args.command, Command::Enrichment(_)));
    /// ```
    #[clap(about = "Test genes for enrichment of acting genotypes in patients versus a reference population.")]
    Enrichment(EnrichmentArgs),
    #[clap(about = "Compare the rate of affected individuals per gene across phenotype groups.")]
    Cohort(CohortArgs),
    #[clap(about = "Classify variants against curated lab-reported variants.")]
    Classify(ClassifyArgs),
}

// -----------------------------------------------------------------------------
// Verbosity
// -----------------------------------------------------------------------------

/// The output verbosity level.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, ValueEnum)]
pub enum Verbosity {
    #[default]
    Info,
    Warn,
    Debug,
    Error,
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        // Convert to lowercase for RUST_LOG env var compatibility
        let lowercase = format!("{:?}", self).to_lowercase();
        write!(f, "{lowercase}")
    }
}
