use crate::cli::{Cli, Command, Verbosity};
use crate::inheritance::Inheritance;

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use std::path::PathBuf;

#[test]
fn enrichment_defaults() -> Result<(), Report> {
    let args = Cli::try_parse_from(["burden", "enrichment", "-p", "patients.tsv", "-r", "gnomad.tsv"])?;
    assert_eq!(args.verbosity, Verbosity::Info);

    let Command::Enrichment(args) = args.command else {
        return Err(color_eyre::eyre::eyre!("Expected the enrichment command."));
    };
    assert_eq!(args.patients, PathBuf::from("patients.tsv"));
    assert_eq!(args.inheritance, Inheritance::Dominant);
    assert_eq!(args.bins.to_string(), "0-10,10-20,20-30,30-100");
    assert_eq!(args.output, None);
    assert_eq!(args.output_dir, PathBuf::from("."));
    Ok(())
}

#[test]
fn enrichment_custom_bins() -> Result<(), Report> {
    let input = ["burden", "enrichment", "-p", "a.tsv", "-r", "b.tsv", "-i", "recessive", "--bins", "0-15,15-100"];
    let Command::Enrichment(args) = Cli::try_parse_from(input)?.command else {
        return Err(color_eyre::eyre::eyre!("Expected the enrichment command."));
    };
    assert_eq!(args.inheritance, Inheritance::Recessive);
    assert_eq!(args.bins.len(), 2);

    // overlapping bins are rejected while parsing
    let input = ["burden", "enrichment", "-p", "a.tsv", "-r", "b.tsv", "--bins", "0-15,10-100"];
    assert!(Cli::try_parse_from(input).is_err());
    Ok(())
}

#[test]
fn cohort_and_global_verbosity() -> Result<(), Report> {
    let input = ["burden", "cohort", "-s", "statuses.tsv", "-c", "samples.tsv", "--verbosity", "debug"];
    let args = Cli::try_parse_from(input)?;
    assert_eq!(args.verbosity.to_string(), "debug");
    assert!(matches!(args.command, Command::Cohort(_)));

    assert!(Cli::try_parse_from(["burden", "cohort", "-s", "statuses.tsv"]).is_err());
    Ok(())
}
