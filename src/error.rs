//! Fatal errors of an analysis run.
//!
//! Recoverable numeric substitutions (missing reference bins, p-value floors, z-score
//! sentinels) are handled where they occur and never appear here.

use thiserror::Error;

/// Data-integrity violations and irrecoverable input preconditions.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Bin lower bound ({lower}) must be less than its upper bound ({upper}).")]
    InvalidBin { lower: f64, upper: f64 },

    #[error("Bins must be sorted and non-overlapping: {previous} is followed by {next}.")]
    OverlappingBins { previous: String, next: String },

    #[error("At least one bin is required.")]
    NoBins,

    #[error("Score {score} for gene '{gene}' does not fall into any configured bin.")]
    InvalidScore { gene: String, score: f64 },

    #[error("Fraction of affected individuals exceeds 100 for gene '{gene}' and phenotype '{phenotype}': {fraction}")]
    FractionOverflow { gene: String, phenotype: String, fraction: f64 },

    #[error("Z-scores require at least 2 phenotypes, found {0}.")]
    SinglePhenotype(usize),

    #[error("Sample '{0}' has no phenotype in the cohort.")]
    UnknownSample(String),

    #[error("Sample '{sample}' is assigned to both phenotype '{first}' and '{second}'.")]
    ConflictingPhenotype { sample: String, first: String, second: String },

    #[error("No CLSF field for lab variant at {0}")]
    MissingClassification(String),

    #[error("Lab variant hit is not B, LB, V, LP or P: {0}")]
    UnknownClassification(String),

    #[error("Unknown sample status: {0}")]
    UnknownStatus(String),

    #[error("Unknown zygosity: {0}")]
    UnknownZygosity(String),

    #[error("Failed to build binomial distribution with p={p} and n={n}.")]
    Binomial { p: f64, n: u64 },
}
