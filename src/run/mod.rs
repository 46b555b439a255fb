//! Run an analysis end to end: read input tables, compute, and write the report.


use crate::binning::{Bins, GenotypeBinner};
use crate::cohort::CohortAggregator;
use crate::enrichment::EnrichmentTester;
use crate::inheritance::Inheritance;
use crate::report::{self, Conditions};
use crate::{io, utils};
use burden_table::Table;
#[cfg(feature = "cli")]
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Read arguments of any analysis from a JSON file.
fn read_args<T, P>(path: &P) -> Result<T, Report>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path> + Debug,
{
    let input = std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read run arguments: {path:?}."))?;
    let args = serde_json::from_str(&input).wrap_err_with(|| format!("Failed to deserialize run arguments: {input}"))?;
    Ok(args)
}

/// Write arguments of any analysis to a JSON file.
fn write_args<T, P>(args: &T, path: &P) -> Result<(), Report>
where
    T: Serialize + Debug,
    P: AsRef<Path> + Debug,
{
    utils::create_parent_dir(path)?;
    let output =
        serde_json::to_string_pretty(args).wrap_err_with(|| format!("Failed to serialize run arguments: {args:?}"))?;
    std::fs::write(path, output).wrap_err_with(|| format!("Failed to write run arguments: {path:?}"))?;
    Ok(())
}

/// Resolve the report path: the explicit output, or a timestamped name in the output directory.
fn output_path(output: Option<&Path>, output_dir: &Path, prefix: &str, suffix: Option<&str>) -> PathBuf {
    match output {
        Some(output) => output.to_path_buf(),
        None => utils::timestamped_path(output_dir, prefix, suffix),
    }
}

/// Write a report table, creating parent directories as needed.
fn write_table<P>(table: &Table<String>, path: &P) -> Result<(), Report>
where
    P: AsRef<Path> + Debug,
{
    utils::create_parent_dir(path)?;
    table.write(path, Some('\t'))?;
    info!("Wrote {} rows: {path:?}", table.rows.len());
    Ok(())
}

// ----------------------------------------------------------------------------
// Enrichment

/// Test genes for enrichment of acting genotypes in patients versus a reference population.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
pub struct EnrichmentArgs {
    /// Patient genotype observations (gene, score, zygosity, count).
    #[cfg_attr(feature = "cli", clap(short = 'p', long, required = true))]
    pub patients: PathBuf,

    /// Reference population genotype observations (gene, score, zygosity, count).
    #[cfg_attr(feature = "cli", clap(short = 'r', long, required = true))]
    pub reference: PathBuf,

    /// Mode of inheritance, decides which genotypes are acting.
    #[cfg_attr(feature = "cli", arg(short = 'i', long, value_enum, default_value_t = EnrichmentArgs::default().inheritance))]
    pub inheritance: Inheritance,

    /// Pathogenicity score bins.
    ///
    /// Comma separated, ex. 0-10,10-20,20-30,30-100.
    #[cfg_attr(feature = "cli", arg(short = 'b', long, default_value_t = EnrichmentArgs::default().bins))]
    pub bins: Bins,

    /// Output file.
    ///
    /// If not provided, a timestamped file is created in the output directory.
    #[cfg_attr(feature = "cli", clap(short = 'o', long))]
    pub output: Option<PathBuf>,

    /// Output directory for timestamped files.
    #[cfg_attr(feature = "cli", clap(short = 'd', long, default_value = "."))]
    pub output_dir: PathBuf,
}

impl Default for EnrichmentArgs {
    fn default() -> Self {
        EnrichmentArgs {
            patients: PathBuf::new(),
            reference: PathBuf::new(),
            inheritance: Inheritance::default(),
            bins: Bins::default(),
            output: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl EnrichmentArgs {
    pub fn new() -> Self {
        EnrichmentArgs::default()
    }

    /// Reads [`EnrichmentArgs`] from a JSON file.
    pub fn read<P>(path: &P) -> Result<EnrichmentArgs, Report>
    where
        P: AsRef<Path> + Debug,
    {
        read_args(path)
    }

    /// Write [`EnrichmentArgs`] to a JSON file.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::run::EnrichmentArgs;
    ///
    /// let dir = tempfile::tempdir()?;
    /// let path = dir.path().join("args").join("enrichment.json");
    /// let args = EnrichmentArgs::default();
    /// args.write(&path)?;
    /// assert_eq!(EnrichmentArgs::read(&path)?, args);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn write<P>(&self, path: &P) -> Result<(), Report>
    where
        P: AsRef<Path> + Debug,
    {
        write_args(self, path)
    }
}

/// Compute LOD scores of patient genotypes against the reference and write them as a table.
///
/// Returns the path of the written report.
pub fn enrichment(args: &EnrichmentArgs) -> Result<PathBuf, Report> {
    debug!("Enrichment arguments: {args:?}");
    let binner = GenotypeBinner::new(args.bins.clone());

    info!("Binning reference genotypes: {:?}", args.reference);
    let observations = io::read_observations(&args.reference, args.inheritance)?;
    let reference = binner.bin(observations).wrap_err("Failed to bin reference genotypes.")?;

    info!("Binning patient genotypes: {:?}", args.patients);
    let observations = io::read_observations(&args.patients, args.inheritance)?;
    let patients = binner.bin(observations).wrap_err("Failed to bin patient genotypes.")?;

    info!("Testing {} genes for enrichment ({} inheritance).", patients.len(), args.inheritance);
    let lods = EnrichmentTester.run(&patients, &reference)?;

    let inheritance = args.inheritance.to_string();
    let path = output_path(args.output.as_deref(), &args.output_dir, "enrichment", Some(&inheritance));
    write_table(&report::lod_table(&lods)?, &path)?;
    info!("Significant hits:\n{}", report::lod_summary(&lods)?);

    Ok(path)
}

// ----------------------------------------------------------------------------
// Cohort

/// Compare the rate of affected individuals per gene across phenotype groups.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
pub struct CohortArgs {
    /// Per-sample statuses (chromosome, position, gene, sample, status).
    #[cfg_attr(feature = "cli", clap(short = 's', long, required = true))]
    pub statuses: PathBuf,

    /// Phenotype of each sample (sample, phenotype).
    #[cfg_attr(feature = "cli", clap(short = 'c', long, required = true))]
    pub cohort: PathBuf,

    /// Disease-gene table with #GENE and CONDITION columns.
    #[cfg_attr(feature = "cli", clap(long))]
    pub conditions: Option<PathBuf>,

    /// Output file.
    ///
    /// If not provided, a timestamped file is created in the output directory.
    #[cfg_attr(feature = "cli", clap(short = 'o', long))]
    pub output: Option<PathBuf>,

    /// Output directory for timestamped files.
    #[cfg_attr(feature = "cli", clap(short = 'd', long, default_value = "."))]
    pub output_dir: PathBuf,
}

impl CohortArgs {
    pub fn new() -> Self {
        CohortArgs { output_dir: PathBuf::from("."), ..Default::default() }
    }

    /// Reads [`CohortArgs`] from a JSON file.
    pub fn read<P>(path: &P) -> Result<CohortArgs, Report>
    where
        P: AsRef<Path> + Debug,
    {
        read_args(path)
    }

    /// Write [`CohortArgs`] to a JSON file.
    pub fn write<P>(&self, path: &P) -> Result<(), Report>
    where
        P: AsRef<Path> + Debug,
    {
        write_args(self, path)
    }
}

/// Compute z-scores of affected-individual rates per gene and phenotype, and write them as
/// a table.
///
/// Returns the path of the written report.
pub fn cohort(args: &CohortArgs) -> Result<PathBuf, Report> {
    debug!("Cohort arguments: {args:?}");

    let cohort = io::read_cohort(&args.cohort)?;
    info!("Cohort of {} samples in {} phenotypes.", cohort.len(), cohort.sizes().len());

    let statuses = io::read_statuses(&args.statuses)?;
    let result = CohortAggregator::run(&cohort, statuses).wrap_err("Failed to compare phenotypes.")?;

    let conditions = match &args.conditions {
        Some(path) => io::read_conditions(path)?,
        None => Conditions::default(),
    };

    let path = output_path(args.output.as_deref(), &args.output_dir, "cohort", None);
    write_table(&report::zscore_table(&result, &conditions)?, &path)?;

    Ok(path)
}

// ----------------------------------------------------------------------------
// Classify

/// Classify variants against curated lab-reported variants.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
pub struct ClassifyArgs {
    /// Lab variants (chromosome, position, ref, alt, clsf).
    #[cfg_attr(feature = "cli", clap(short = 'l', long, required = true))]
    pub lab: PathBuf,

    /// Variants to classify (chromosome, position, ref, alt, gene).
    #[cfg_attr(feature = "cli", clap(short = 'i', long, required = true))]
    pub variants: PathBuf,

    /// Output file.
    ///
    /// If not provided, a timestamped file is created in the output directory.
    #[cfg_attr(feature = "cli", clap(short = 'o', long))]
    pub output: Option<PathBuf>,

    /// Output directory for timestamped files.
    #[cfg_attr(feature = "cli", clap(short = 'd', long, default_value = "."))]
    pub output_dir: PathBuf,
}

impl ClassifyArgs {
    pub fn new() -> Self {
        ClassifyArgs { output_dir: PathBuf::from("."), ..Default::default() }
    }

    /// Reads [`ClassifyArgs`] from a JSON file.
    pub fn read<P>(path: &P) -> Result<ClassifyArgs, Report>
    where
        P: AsRef<Path> + Debug,
    {
        read_args(path)
    }

    /// Write [`ClassifyArgs`] to a JSON file.
    pub fn write<P>(&self, path: &P) -> Result<(), Report>
    where
        P: AsRef<Path> + Debug,
    {
        write_args(self, path)
    }
}

#[derive(Debug, Deserialize)]
struct VariantRecord {
    chromosome: String,
    position: u64,
    #[serde(rename = "ref")]
    reference: String,
    alt: String,
    gene: String,
}

/// Classify every variant allele reported by the lab, and write the judgments as a table.
///
/// Variants the lab did not report are left out of the table.
pub fn classify(args: &ClassifyArgs) -> Result<PathBuf, Report> {
    debug!("Classify arguments: {args:?}");

    let lab = io::read_lab_variants(&args.lab)?;
    let variants = io::read_records::<VariantRecord, _>(&args.variants)?;

    let mut table = Table::new();
    table.headers =
        ["Chr", "Pos", "Ref", "Alt", "Gene", "Classification", "Code", "Source", "Reason"].map(String::from).to_vec();

    for variant in &variants {
        for alt in variant.alt.split(',') {
            let judgment = lab
                .classify(&variant.chromosome, variant.position, &variant.reference, alt, &variant.gene)
                .wrap_err_with(|| format!("Failed to classify variant: {variant:?}"))?;
            let Some(judgment) = judgment else { continue };
            let row = [
                variant.chromosome.clone(),
                variant.position.to_string(),
                variant.reference.clone(),
                alt.to_string(),
                judgment.gene,
                judgment.classification.to_string(),
                judgment.code.to_string(),
                judgment.source,
                judgment.reason,
            ]
            .into_iter()
            .collect_vec();
            table.add_row(row)?;
        }
    }
    info!("Lab reported {} of {} variants.", table.rows.len(), variants.len());

    let path = output_path(args.output.as_deref(), &args.output_dir, "classify", None);
    write_table(&table, &path)?;

    Ok(path)
}
