//! `burden` tests genes for an excess of rare, deleterious genotypes.
//!
//! ## Analyses
//!
//! 1. **Enrichment**: does a gene carry more _acting_ genotypes in patients than expected
//!    from a reference population? Genotypes are grouped by pathogenicity-score
//!    [bin](binning::Bin), and each gene and bin gets a LOD score from a one-sided binomial
//!    test ([`enrichment::EnrichmentTester`]).
//!
//! 1. **Cohort**: does the rate of affected individuals for a gene differ between phenotype
//!    groups? Each gene and phenotype gets a z-score against the other phenotypes
//!    ([`cohort::CohortAggregator`]).
//!
//! 1. **Classify**: look up variants in a curated table of lab-reported
//!    classifications ([`lab::LabVariants`]).
//!
//! Variant calling, annotation, and inheritance matching of single samples happen upstream.
//! Their results are read as flat tables by the [`io`] readers.

pub mod binning;
#[cfg(feature = "cli")]
pub mod cli;
pub mod cohort;
pub mod enrichment;
pub mod error;
pub mod inheritance;
pub mod io;
pub mod lab;
pub mod report;
pub mod run;
pub mod utils;

#[doc(inline)]
#[cfg(feature = "cli")]
pub use crate::cli::Cli;
#[doc(inline)]
pub use crate::error::Error;
