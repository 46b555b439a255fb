//! Compare the rate of affected individuals per gene across phenotype groups.
//!
//! The analysis runs in three strictly sequential passes:
//!
//! 1. [`CohortAggregator::count`]: count presumed affected samples per gene and phenotype,
//!    each sample at most once per gene.
//! 2. [`fraction_pass`]: convert counts to a percentage of the phenotype group.
//! 3. [`zscore_pass`]: normalize each percentage against the other phenotype groups.


use crate::inheritance::{PresumedAffected, SampleStatus};
use crate::Error;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};

/// Z-score used when the comparison groups have no variance.
pub const ZSCORE_SENTINEL: f64 = 99.0;

// ----------------------------------------------------------------------------
// Keys and Records

/// Composite key of a gene and a phenotype.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct GenePhenotype {
    pub gene: String,
    pub phenotype: String,
}

impl GenePhenotype {
    pub fn new(gene: &str, phenotype: &str) -> Self {
        GenePhenotype { gene: gene.to_string(), phenotype: phenotype.to_string() }
    }
}

impl Display for GenePhenotype {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.gene, self.phenotype)
    }
}

/// Genomic position where a gene was first counted.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Location {
    pub chromosome: String,
    pub position: u64,
}

/// Inheritance-matching verdict of one sample, for one gene of one variant record.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StatusObservation<S = SampleStatus> {
    pub chromosome: String,
    pub position: u64,
    pub gene: String,
    pub sample: String,
    pub status: S,
}

// ----------------------------------------------------------------------------
// Phenotype Cohort

/// Samples and the phenotype group each belongs to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PhenotypeCohort {
    samples: BTreeMap<String, String>,
    sizes: BTreeMap<String, u64>,
}

impl PhenotypeCohort {
    /// Build a cohort from `(sample, phenotype)` pairs.
    ///
    /// A sample listed twice with the same phenotype is counted once; listed with two
    /// different phenotypes it is an error.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::cohort::PhenotypeCohort;
    ///
    /// let cohort = PhenotypeCohort::from_samples([
    ///     ("P1", "IRONACC"),
    ///     ("P2", "IRONACC"),
    ///     ("C1", "CONTROL"),
    /// ])?;
    /// assert_eq!(cohort.size("IRONACC"), 2);
    /// assert_eq!(cohort.phenotypes(), vec!["CONTROL", "IRONACC"]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn from_samples<I, S, P>(samples: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<String>,
    {
        let mut cohort = PhenotypeCohort::default();
        for (sample, phenotype) in samples {
            let (sample, phenotype) = (sample.into(), phenotype.into());
            match cohort.samples.get(&sample) {
                Some(first) if *first == phenotype => continue,
                Some(first) => {
                    return Err(Error::ConflictingPhenotype {
                        sample,
                        first: first.clone(),
                        second: phenotype,
                    })
                }
                None => {
                    *cohort.sizes.entry(phenotype.clone()).or_insert(0) += 1;
                    cohort.samples.insert(sample, phenotype);
                }
            }
        }
        Ok(cohort)
    }

    /// Phenotype of a sample.
    pub fn phenotype(&self, sample: &str) -> Option<&str> {
        self.samples.get(sample).map(String::as_str)
    }

    /// Number of samples with a phenotype, zero if unknown.
    pub fn size(&self, phenotype: &str) -> u64 {
        self.sizes.get(phenotype).copied().unwrap_or(0)
    }

    /// All phenotypes, in lexicographic order.
    pub fn phenotypes(&self) -> Vec<&str> {
        self.sizes.keys().map(String::as_str).collect()
    }

    pub fn sizes(&self) -> &BTreeMap<String, u64> {
        &self.sizes
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Cohort Result

/// Final tables of one cohort analysis run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CohortResult {
    /// Phenotypes, in report column order.
    pub phenotypes: Vec<String>,
    /// Gene to first-seen location, for every gene with an affected sample.
    pub locations: BTreeMap<String, Location>,
    pub counts: BTreeMap<GenePhenotype, u64>,
    pub fractions: BTreeMap<GenePhenotype, f64>,
    pub zscores: BTreeMap<GenePhenotype, f64>,
}

impl CohortResult {
    /// Z-score of a gene and phenotype, `0.0` when no affected individual was seen.
    pub fn zscore(&self, gene: &str, phenotype: &str) -> f64 {
        self.zscores.get(&GenePhenotype::new(gene, phenotype)).copied().unwrap_or(0.0)
    }
}

// ----------------------------------------------------------------------------
// Cohort Aggregator

/// Counts presumed affected samples per gene and phenotype for one analysis run.
#[derive(Debug)]
pub struct CohortAggregator<'c> {
    cohort: &'c PhenotypeCohort,
    /// (sample, gene) pairs already counted in this run.
    seen: HashSet<(String, String)>,
    counts: BTreeMap<GenePhenotype, u64>,
    locations: BTreeMap<String, Location>,
}

impl<'c> CohortAggregator<'c> {
    pub fn new(cohort: &'c PhenotypeCohort) -> Self {
        CohortAggregator {
            cohort,
            seen: HashSet::new(),
            counts: BTreeMap::new(),
            locations: BTreeMap::new(),
        }
    }

    /// Count pass over status observations, in input order.
    ///
    /// May be called repeatedly to feed the observations in chunks; the dedup of
    /// (sample, gene) pairs spans all calls on this aggregator.
    pub fn count<S, I>(&mut self, observations: I) -> Result<(), Error>
    where
        S: PresumedAffected,
        I: IntoIterator<Item = StatusObservation<S>>,
    {
        let cohort = self.cohort;
        for observation in observations {
            if observation.status.is_indeterminate() {
                continue;
            }
            let key = (observation.sample, observation.gene);
            if self.seen.contains(&key) || !observation.status.is_presumed_affected() {
                continue;
            }
            let (sample, gene) = key;
            let phenotype = cohort
                .phenotype(&sample)
                .ok_or_else(|| Error::UnknownSample(sample.clone()))?;

            *self.counts.entry(GenePhenotype::new(&gene, phenotype)).or_insert(0) += 1;

            if !self.locations.contains_key(&gene) {
                let location = Location { chromosome: observation.chromosome, position: observation.position };
                self.locations.insert(gene.clone(), location);
            }
            self.seen.insert((sample, gene));
        }

        Ok(())
    }

    /// Affected counts so far.
    pub fn counts(&self) -> &BTreeMap<GenePhenotype, u64> {
        &self.counts
    }

    /// Run the fraction and z-score passes on the counts.
    pub fn finish(self) -> Result<CohortResult, Error> {
        info!(
            "Counted affected individuals for {} genes in {} samples.",
            self.locations.len(),
            self.cohort.len()
        );
        let fractions = fraction_pass(&self.counts, self.cohort)?;
        let phenotypes = self.cohort.phenotypes();
        let zscores = zscore_pass(&fractions, &phenotypes)?;

        Ok(CohortResult {
            phenotypes: phenotypes.into_iter().map(String::from).collect(),
            locations: self.locations,
            counts: self.counts,
            fractions,
            zscores,
        })
    }

    /// Run all three passes over one stream of observations.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::cohort::{CohortAggregator, PhenotypeCohort, StatusObservation};
    /// use burden::inheritance::SampleStatus;
    ///
    /// let cohort = PhenotypeCohort::from_samples([("P1", "CASE"), ("P2", "CASE"), ("C1", "CONTROL")])?;
    /// let observations = vec![StatusObservation {
    ///     chromosome: "6".to_string(),
    ///     position: 26093141,
    ///     gene: "HFE".to_string(),
    ///     sample: "P1".to_string(),
    ///     status: SampleStatus::Homozygous,
    /// }];
    /// let result = CohortAggregator::run(&cohort, observations)?;
    /// assert_eq!(result.fractions.values().collect::<Vec<_>>(), vec![&50.0]);
    /// assert_eq!(result.zscore("HFE", "CASE"), 99.0);
    /// assert_eq!(result.zscore("HFE", "CONTROL"), 0.0);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn run<S, I>(cohort: &'c PhenotypeCohort, observations: I) -> Result<CohortResult, Error>
    where
        S: PresumedAffected,
        I: IntoIterator<Item = StatusObservation<S>>,
    {
        let mut aggregator = CohortAggregator::new(cohort);
        aggregator.count(observations)?;
        aggregator.finish()
    }
}

// ----------------------------------------------------------------------------
// Fractions

/// Convert affected counts to a percentage of each phenotype group.
///
/// A percentage above 100 means a group has more affected individuals than members, and
/// is an error rather than being clamped.
pub fn fraction_pass(
    counts: &BTreeMap<GenePhenotype, u64>,
    cohort: &PhenotypeCohort,
) -> Result<BTreeMap<GenePhenotype, f64>, Error> {
    counts
        .iter()
        .map(|(key, count)| {
            let fraction = (*count as f64 / cohort.size(&key.phenotype) as f64) * 100.0;
            // NaN when the phenotype has no members at all
            if fraction > 100.0 || fraction.is_nan() {
                return Err(Error::FractionOverflow {
                    gene: key.gene.clone(),
                    phenotype: key.phenotype.clone(),
                    fraction,
                });
            }
            Ok((key.clone(), fraction))
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Z-Scores

/// Fractions of every phenotype except `phenotype`, for one gene.
///
/// Phenotypes without a fraction for the gene contribute `0.0`.
pub fn comparison_set(
    fractions: &BTreeMap<GenePhenotype, f64>,
    gene: &str,
    phenotype: &str,
    phenotypes: &[&str],
) -> Vec<f64> {
    phenotypes
        .iter()
        .filter(|other| **other != phenotype)
        .map(|other| fractions.get(&GenePhenotype::new(gene, other)).copied().unwrap_or(0.0))
        .collect()
}

/// Z-score of a fraction against its comparison set.
///
/// The comparison set uses the sample standard deviation, which is `0` for a single value.
/// Infinite results are replaced by `±99`, and `0 / 0` by `0`.
///
/// ## Examples
///
/// ```rust
/// use burden::cohort::zscore;
///
/// assert_eq!(zscore(50.0, &[0.0]), 99.0);
/// assert_eq!(zscore(20.0, &[10.0, 30.0]), 0.0);
/// ```
pub fn zscore(fraction: f64, comparison: &[f64]) -> f64 {
    let mean = comparison.iter().mean();
    let sd = match comparison.len() {
        1 => 0.0,
        _ => comparison.iter().std_dev(),
    };

    let z = (fraction - mean) / sd;
    if z == f64::INFINITY {
        ZSCORE_SENTINEL
    } else if z == f64::NEG_INFINITY {
        -ZSCORE_SENTINEL
    } else if z.is_nan() {
        0.0
    } else {
        z
    }
}

/// Normalize every fraction against the other phenotypes of the same gene.
pub fn zscore_pass(
    fractions: &BTreeMap<GenePhenotype, f64>,
    phenotypes: &[&str],
) -> Result<BTreeMap<GenePhenotype, f64>, Error> {
    if phenotypes.len() < 2 {
        return Err(Error::SinglePhenotype(phenotypes.len()));
    }

    let zscores = fractions
        .iter()
        .map(|(key, fraction)| {
            let comparison = comparison_set(fractions, &key.gene, &key.phenotype, phenotypes);
            let z = zscore(*fraction, &comparison);
            debug!("{key}: fraction {fraction}, compared to {comparison:?}, z-score {z}");
            (key.clone(), z)
        })
        .collect();

    Ok(zscores)
}
