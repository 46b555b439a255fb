//! Count acting and total genotypes per gene and pathogenicity-score [`Bin`].

#[cfg(test)]
mod tests;

use crate::Error;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ----------------------------------------------------------------------------
// Bin

/// An interval over a pathogenicity score.
///
/// Whether `upper` belongs to the bin depends on its position in [`Bins`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
}

impl Bin {
    /// Create a new [`Bin`], `lower` must be less than `upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, Error> {
        if lower.is_nan() || upper.is_nan() || lower >= upper {
            return Err(Error::InvalidBin { lower, upper });
        }
        Ok(Bin { lower, upper })
    }

    /// Return true if the score falls in `[lower, upper)`, or `[lower, upper]` when
    /// `inclusive_upper` is set.
    pub fn contains(&self, score: f64, inclusive_upper: bool) -> bool {
        match inclusive_upper {
            true => score >= self.lower && score <= self.upper,
            false => score >= self.lower && score < self.upper,
        }
    }

    /// Return true if both bins have identical boundaries.
    pub fn same_bounds(&self, other: &Bin) -> bool {
        self.lower == other.lower && self.upper == other.upper
    }
}

impl Display for Bin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.lower, self.upper)
    }
}

impl FromStr for Bin {
    type Err = Report;

    /// Parse a bin from `<lower>-<upper>`, ex. `10-20`.
    fn from_str(s: &str) -> Result<Self, Report> {
        // skip the first character so a leading minus sign is not taken as the separator
        let split = s.char_indices().skip(1).find(|(_, c)| *c == '-').map(|(i, _)| i);
        let (lower, upper) = match split {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => Err(eyre!("Bin is missing a '-' separator: {s:?}"))
                .suggestion("Example of a valid bin: 10-20")?,
        };
        let lower = lower.trim().parse::<f64>().wrap_err_with(|| format!("Invalid bin lower bound: {s:?}"))?;
        let upper = upper.trim().parse::<f64>().wrap_err_with(|| format!("Invalid bin upper bound: {s:?}"))?;
        Ok(Bin::new(lower, upper)?)
    }
}

// ----------------------------------------------------------------------------
// Bins

/// An ordered, non-overlapping set of [`Bin`]s used for one analysis run.
///
/// ## Examples
///
/// ```rust
/// use burden::binning::Bins;
///
/// let bins = Bins::default();
/// assert_eq!(bins.to_string(), "0-10,10-20,20-30,30-100");
///
/// // upper bounds are exclusive, except for the final bin
/// assert_eq!(bins.find(10.0), Some(1));
/// assert_eq!(bins.find(100.0), Some(3));
/// assert_eq!(bins.find(100.5), None);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "Vec<Bin>", into = "Vec<Bin>")]
pub struct Bins(Vec<Bin>);

impl Bins {
    /// Create a validated set of bins.
    pub fn new(bins: Vec<Bin>) -> Result<Self, Error> {
        if bins.is_empty() {
            return Err(Error::NoBins);
        }
        for bin in &bins {
            Bin::new(bin.lower, bin.upper)?;
        }
        if let Some((previous, next)) = bins.iter().tuple_windows().find(|(p, n)| p.upper > n.lower) {
            return Err(Error::OverlappingBins {
                previous: previous.to_string(),
                next: next.to_string(),
            });
        }
        Ok(Bins(bins))
    }

    /// Index of the bin containing the score.
    pub fn find(&self, score: f64) -> Option<usize> {
        let last = self.0.len() - 1;
        self.0.iter().enumerate().find(|(i, bin)| bin.contains(score, *i == last)).map(|(i, _)| i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Bins {
    fn default() -> Self {
        Bins(vec![
            Bin { lower: 0.0, upper: 10.0 },
            Bin { lower: 10.0, upper: 20.0 },
            Bin { lower: 20.0, upper: 30.0 },
            Bin { lower: 30.0, upper: 100.0 },
        ])
    }
}

impl TryFrom<Vec<Bin>> for Bins {
    type Error = Error;
    fn try_from(bins: Vec<Bin>) -> Result<Self, Error> {
        Bins::new(bins)
    }
}

impl From<Bins> for Vec<Bin> {
    fn from(bins: Bins) -> Self {
        bins.0
    }
}

impl Display for Bins {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromStr for Bins {
    type Err = Report;

    /// Parse comma-separated bins, ex. `0-10,10-20,20-30,30-100`.
    fn from_str(s: &str) -> Result<Self, Report> {
        let bins = s.split(',').map(Bin::from_str).collect::<Result<Vec<_>, _>>()?;
        Ok(Bins::new(bins)?)
    }
}

// ----------------------------------------------------------------------------
// Binned Genotype Count

/// Acting and total genotype counts of one gene in one [`Bin`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BinnedGenotypeCount {
    pub bin: Bin,
    pub acting_genotypes: u64,
    pub total_genotypes: u64,
}

impl BinnedGenotypeCount {
    pub fn new(bin: Bin) -> Self {
        BinnedGenotypeCount { bin, acting_genotypes: 0, total_genotypes: 0 }
    }
}

/// Gene name to one [`BinnedGenotypeCount`] per configured bin, in bin order.
pub type GeneBinTable = BTreeMap<String, Vec<BinnedGenotypeCount>>;

// ----------------------------------------------------------------------------
// Observation

/// A scored genotype observation, one row of the binner input.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Observation {
    /// Gene or sequence feature name.
    pub gene: String,
    /// Pathogenicity score, ex. CADD phred.
    pub score: f64,
    /// Whether the genotype is eligible under the inheritance model.
    pub is_acting: bool,
    /// Number of genotypes this observation stands for.
    pub genotype_count: u64,
}

// ----------------------------------------------------------------------------
// Genotype Binner

/// Builds a [`GeneBinTable`] from a stream of [`Observation`]s.
#[derive(Clone, Debug, Default)]
pub struct GenotypeBinner {
    pub bins: Bins,
}

impl GenotypeBinner {
    pub fn new(bins: Bins) -> Self {
        GenotypeBinner { bins }
    }

    /// Count genotypes per gene and bin.
    ///
    /// Every gene in the result has one count per bin, including empty bins.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::binning::{GenotypeBinner, Observation};
    ///
    /// let binner = GenotypeBinner::default();
    /// let observations = vec![
    ///     Observation { gene: "HFE".to_string(), score: 25.3, is_acting: true, genotype_count: 2 },
    ///     Observation { gene: "HFE".to_string(), score: 21.0, is_acting: false, genotype_count: 8 },
    /// ];
    /// let table = binner.bin(observations)?;
    /// let counts = &table["HFE"];
    /// assert_eq!(counts.len(), 4);
    /// assert_eq!((counts[2].acting_genotypes, counts[2].total_genotypes), (2, 10));
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn bin<I>(&self, observations: I) -> Result<GeneBinTable, Error>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut table = GeneBinTable::new();

        for observation in observations {
            let bin_i = self.bins.find(observation.score).ok_or_else(|| Error::InvalidScore {
                gene: observation.gene.clone(),
                score: observation.score,
            })?;

            let counts = table.entry(observation.gene).or_insert_with(|| {
                self.bins.iter().map(|bin| BinnedGenotypeCount::new(*bin)).collect_vec()
            });

            let count = &mut counts[bin_i];
            count.total_genotypes += observation.genotype_count;
            if observation.is_acting {
                count.acting_genotypes += observation.genotype_count;
            }
        }

        debug!("Binned genotype counts for {} genes.", table.len());

        Ok(table)
    }
}
