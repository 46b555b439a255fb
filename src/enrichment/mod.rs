//! One-sided binomial enrichment of acting genotypes in patients versus a reference
//! population, summarized as a LOD score per gene and [`Bin`](crate::binning::Bin).

#[cfg(test)]
mod tests;

use crate::binning::{BinnedGenotypeCount, GeneBinTable};
use crate::Error;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, DiscreteCDF};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Smallest p-value used before taking the logarithm.
pub const PVALUE_FLOOR: f64 = 1e-10;
/// LOD above which a hit is genome-wide significant (p < 5e-8).
pub const GENOME_WIDE_LOD: f64 = 7.30103;
/// LOD above which a hit is interesting, but not reported by default.
pub const SUGGESTIVE_LOD: f64 = 4.0;

/// `"<gene>_<lower>-<upper>"` to LOD score.
pub type LodScoreMap = BTreeMap<String, f64>;

/// Key of a gene and bin in the [`LodScoreMap`].
pub fn lod_key(gene: &str, count: &BinnedGenotypeCount) -> String {
    format!("{gene}_{}", count.bin)
}

// ----------------------------------------------------------------------------
// Significance

/// Reporting label of a LOD score. Not a filter.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Significance {
    None,
    Suggestive,
    GenomeWide,
}

impl Significance {
    pub fn from_lod(lod: f64) -> Self {
        if lod > GENOME_WIDE_LOD {
            Significance::GenomeWide
        } else if lod > SUGGESTIVE_LOD {
            Significance::Suggestive
        } else {
            Significance::None
        }
    }
}

impl Display for Significance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Significance::None => "",
            Significance::Suggestive => "suggestive",
            Significance::GenomeWide => "genome-wide",
        };
        write!(f, "{label}")
    }
}

// ----------------------------------------------------------------------------
// Enrichment Tester

/// Compares patient genotype counts to the reference population rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnrichmentTester;

impl EnrichmentTester {
    /// Probability of an acting genotype in the reference bin matching `patient`.
    ///
    /// A gene without a matching reference bin, or a reference bin without genotypes,
    /// is treated as never showing an acting genotype (`0.0`).
    pub fn reference_probability(
        patient: &BinnedGenotypeCount,
        reference: Option<&[BinnedGenotypeCount]>,
    ) -> f64 {
        let matching = reference
            .into_iter()
            .flatten()
            .find(|count| count.bin.same_bounds(&patient.bin));

        match matching {
            Some(count) if count.total_genotypes > 0 => {
                count.acting_genotypes as f64 / count.total_genotypes as f64
            }
            Some(_) => 0.0,
            None => {
                debug!("No reference bin {} found, using probability 0.0", patient.bin);
                0.0
            }
        }
    }

    /// P-value of observing `successes` or more in `draws` trials with probability `p`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::enrichment::EnrichmentTester;
    ///
    /// assert_eq!(EnrichmentTester::upper_tail(10, 0, 0.3)?, 1.0);
    /// assert_eq!(EnrichmentTester::upper_tail(10, 1, 0.0)?, 0.0);
    /// let p = EnrichmentTester::upper_tail(10, 10, 0.5)?;
    /// assert!((p - 0.5_f64.powi(10)).abs() < 1e-12);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn upper_tail(draws: u64, successes: u64, p: f64) -> Result<f64, Error> {
        if successes == 0 {
            return Ok(1.0);
        }
        if successes > draws {
            return Ok(0.0);
        }
        let binomial = Binomial::new(p, draws).map_err(|_| Error::Binomial { p, n: draws })?;
        // survival function is P(X > x), so shift by one for P(X >= successes)
        Ok(binomial.sf(successes - 1))
    }

    /// LOD score of one patient bin against the reference counts of the same gene.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::binning::{Bin, BinnedGenotypeCount};
    /// use burden::enrichment::{EnrichmentTester, GENOME_WIDE_LOD};
    ///
    /// let bin = Bin::new(0.0, 10.0)?;
    /// let reference = vec![BinnedGenotypeCount { bin, acting_genotypes: 10, total_genotypes: 1000 }];
    /// let patient = BinnedGenotypeCount { bin, acting_genotypes: 5, total_genotypes: 10 };
    ///
    /// let lod = EnrichmentTester::test(&patient, Some(reference.as_slice()))?;
    /// assert!(lod > GENOME_WIDE_LOD);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn test(
        patient: &BinnedGenotypeCount,
        reference: Option<&[BinnedGenotypeCount]>,
    ) -> Result<f64, Error> {
        let draws = patient.total_genotypes;
        let successes = patient.acting_genotypes;
        let p = Self::reference_probability(patient, reference);

        let pvalue = Self::upper_tail(draws, successes, p)?.max(PVALUE_FLOOR);
        // log10(1/p) rather than -log10(p), so a p-value of 1 scores 0 and not -0
        Ok(pvalue.recip().log10())
    }

    /// Test every patient gene and bin against the reference table.
    ///
    /// Genes missing from the reference table are skipped.
    pub fn run(&self, patient: &GeneBinTable, reference: &GeneBinTable) -> Result<LodScoreMap, Error> {
        let mut lod_scores = LodScoreMap::new();

        for (gene, patient_counts) in patient {
            let Some(reference_counts) = reference.get(gene) else {
                debug!("Reference does not have a gene named '{gene}', skipping.");
                continue;
            };

            for patient_count in patient_counts {
                let lod = Self::test(patient_count, Some(reference_counts.as_slice()))?;

                if Significance::from_lod(lod) == Significance::GenomeWide {
                    info!(
                        "{gene}, {}, draws: {}, successes: {}, LOD: {lod}",
                        patient_count.bin, patient_count.total_genotypes, patient_count.acting_genotypes
                    );
                }
                lod_scores.insert(lod_key(gene, patient_count), lod);
            }
        }

        Ok(lod_scores)
    }
}
