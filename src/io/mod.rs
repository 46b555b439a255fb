//! Readers for the delimited tables produced by upstream annotation tools.
//!
//! Every table has a header row. The delimiter is chosen from the file extension
//! (`.tsv`/`.txt` tab, `.csv` comma).

#[cfg(test)]
mod tests;

use crate::binning::Observation;
use crate::cohort::{PhenotypeCohort, StatusObservation};
use crate::inheritance::{Inheritance, SampleStatus, Zygosity};
use crate::lab::{LabVariant, LabVariants};
use crate::report::Conditions;
use burden_table::{get_delimiter, Table};
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Deserialize every row of a delimited file.
pub fn read_records<T, P>(path: &P) -> Result<Vec<T>, Report>
where
    T: DeserializeOwned,
    P: AsRef<Path> + Debug,
{
    let delim = get_delimiter(path)?;
    let delim = u8::try_from(delim).wrap_err_with(|| format!("Invalid delimiter: {delim:?}"))?;
    let file = File::open(path).wrap_err_with(|| eyre!("Failed to read file: {path:?}"))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let records = reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            // +2 for the header and 1-based line numbers
            record.wrap_err_with(|| format!("Failed to parse line {} of {path:?}", i + 2))
        })
        .collect::<Result<Vec<T>, Report>>()?;

    debug!("Read {} records from {path:?}", records.len());
    Ok(records)
}

// ----------------------------------------------------------------------------
// Observations

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    gene: String,
    score: f64,
    #[serde(default)]
    zygosity: Option<String>,
    count: u64,
    #[serde(default)]
    acting: Option<bool>,
}

/// Read genotype observations: `gene`, `score`, `zygosity`, `count`, and optionally `acting`.
///
/// An explicit `acting` value takes precedence, otherwise the zygosity is judged by the
/// inheritance model.
pub fn read_observations<P>(path: &P, inheritance: Inheritance) -> Result<Vec<Observation>, Report>
where
    P: AsRef<Path> + Debug,
{
    read_records::<ObservationRecord, P>(path)?
        .into_iter()
        .map(|record| {
            let is_acting = match (record.acting, &record.zygosity) {
                (Some(acting), _) => acting,
                (None, Some(zygosity)) => inheritance.is_acting(Zygosity::from_str(zygosity)?),
                (None, None) => {
                    return Err(eyre!("Observation for gene {:?} has no zygosity or acting value.", record.gene)
                        .suggestion("Add a 'zygosity' (het, homalt, homref) or 'acting' (true, false) column."))
                }
            };
            Ok(Observation {
                gene: record.gene,
                score: record.score,
                is_acting,
                genotype_count: record.count,
            })
        })
        .collect::<Result<Vec<_>, Report>>()
        .wrap_err_with(|| format!("Failed to read observations: {path:?}"))
}

// ----------------------------------------------------------------------------
// Statuses

#[derive(Debug, Deserialize)]
struct StatusRecord {
    chromosome: String,
    position: u64,
    gene: String,
    sample: String,
    status: String,
}

/// Read per-sample statuses: `chromosome`, `position`, `gene`, `sample`, `status`.
pub fn read_statuses<P>(path: &P) -> Result<Vec<StatusObservation>, Report>
where
    P: AsRef<Path> + Debug,
{
    read_records::<StatusRecord, P>(path)?
        .into_iter()
        .map(|record| {
            Ok(StatusObservation {
                status: SampleStatus::from_str(&record.status)?,
                chromosome: record.chromosome,
                position: record.position,
                gene: record.gene,
                sample: record.sample,
            })
        })
        .collect::<Result<Vec<_>, Report>>()
        .wrap_err_with(|| format!("Failed to read sample statuses: {path:?}"))
}

// ----------------------------------------------------------------------------
// Cohort

#[derive(Debug, Deserialize)]
struct SampleRecord {
    sample: String,
    phenotype: String,
}

/// Read the phenotype of every sample: `sample`, `phenotype`.
pub fn read_cohort<P>(path: &P) -> Result<PhenotypeCohort, Report>
where
    P: AsRef<Path> + Debug,
{
    let records = read_records::<SampleRecord, P>(path)?;
    let cohort = PhenotypeCohort::from_samples(records.into_iter().map(|r| (r.sample, r.phenotype)))
        .wrap_err_with(|| format!("Failed to read cohort: {path:?}"))?;
    debug!("Phenotype sizes: {:?}", cohort.sizes());
    Ok(cohort)
}

// ----------------------------------------------------------------------------
// Lab Variants

/// Read lab variants: `chromosome`, `position`, `ref`, `alt`, `clsf`.
pub fn read_lab_variants<P>(path: &P) -> Result<LabVariants, Report>
where
    P: AsRef<Path> + Debug,
{
    let variants = read_records::<LabVariant, P>(path)?;
    Ok(LabVariants::new(variants))
}

// ----------------------------------------------------------------------------
// Conditions

/// Read gene conditions from a disease-gene table with `#GENE` (or `GENE`) and
/// `CONDITION` columns.
pub fn read_conditions<P>(path: &P) -> Result<Conditions, Report>
where
    P: AsRef<Path> + Debug,
{
    let table = Table::read(path, None)?;
    Conditions::from_table(&table).wrap_err_with(|| format!("Failed to read conditions: {path:?}"))
}
