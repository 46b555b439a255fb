//! Genotype eligibility and per-sample affected status.
//!
//! Deciding *which* genotypes or samples qualify under an inheritance model is the job of
//! upstream tools. This module only names their verdicts and exposes the two predicates
//! the analyses depend on: [`Inheritance::is_acting`] and [`PresumedAffected`].

#[cfg(test)]
mod tests;

use crate::Error;
#[cfg(feature = "cli")]
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::EnumIter;

// ----------------------------------------------------------------------------
// Inheritance

/// Mode of inheritance used to decide which genotypes are "acting".
#[derive(Clone, Copy, Debug, Default, Deserialize, EnumIter, PartialEq, Serialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum Inheritance {
    /// One alternate allele is enough.
    #[default]
    Dominant,
    /// Both alleles must be alternate.
    Recessive,
}

impl Inheritance {
    /// Return true if a genotype of this zygosity is consistent with disease causation.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::inheritance::{Inheritance, Zygosity};
    ///
    /// assert!(Inheritance::Dominant.is_acting(Zygosity::Het));
    /// assert!(!Inheritance::Recessive.is_acting(Zygosity::Het));
    /// assert!(Inheritance::Recessive.is_acting(Zygosity::HomAlt));
    /// ```
    pub fn is_acting(&self, zygosity: Zygosity) -> bool {
        match (self, zygosity) {
            (_, Zygosity::HomRef) => false,
            (Inheritance::Dominant, _) => true,
            (Inheritance::Recessive, Zygosity::HomAlt) => true,
            (Inheritance::Recessive, Zygosity::Het) => false,
        }
    }
}

impl Display for Inheritance {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        // lowercase, matches the CLI value names
        let lowercase = format!("{:?}", self).to_lowercase();
        write!(f, "{lowercase}")
    }
}

// ----------------------------------------------------------------------------
// Zygosity

/// Zygosity of an observed genotype.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, PartialEq, Serialize)]
pub enum Zygosity {
    HomRef,
    Het,
    HomAlt,
}

impl FromStr for Zygosity {
    type Err = Error;

    /// Parse a zygosity label, either by name or by diploid genotype notation.
    fn from_str(s: &str) -> Result<Self, Error> {
        let zygosity = match s.to_lowercase().as_str() {
            "homref" | "hom_ref" | "0/0" | "0|0" => Zygosity::HomRef,
            "het" | "0/1" | "1/0" | "0|1" | "1|0" => Zygosity::Het,
            "homalt" | "hom_alt" | "hom" | "1/1" | "1|1" => Zygosity::HomAlt,
            _ => return Err(Error::UnknownZygosity(s.to_string())),
        };
        Ok(zygosity)
    }
}

// ----------------------------------------------------------------------------
// Sample Status

/// Verdict of inheritance matching for one sample and one gene.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, Hash, PartialEq, Serialize)]
pub enum SampleStatus {
    Homozygous,
    HomozygousCompoundHet,
    Affected,
    AffectedCompoundHet,
    Heterozygous,
    HeterozygousMultiHit,
    Carrier,
    /// Genotype missing or not interpretable.
    Indeterminate,
}

/// Predicate over a status value: does it mark the sample as presumed affected?
pub trait PresumedAffected {
    fn is_presumed_affected(&self) -> bool;

    /// Indeterminate statuses are ignored entirely by the cohort count pass.
    fn is_indeterminate(&self) -> bool {
        false
    }
}

impl PresumedAffected for SampleStatus {
    fn is_presumed_affected(&self) -> bool {
        matches!(
            self,
            SampleStatus::Homozygous
                | SampleStatus::HomozygousCompoundHet
                | SampleStatus::Affected
                | SampleStatus::AffectedCompoundHet
        )
    }

    fn is_indeterminate(&self) -> bool {
        *self == SampleStatus::Indeterminate
    }
}

impl Display for SampleStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SampleStatus::Homozygous => "HOMOZYGOUS",
            SampleStatus::HomozygousCompoundHet => "HOMOZYGOUS_COMPOUNDHET",
            SampleStatus::Affected => "AFFECTED",
            SampleStatus::AffectedCompoundHet => "AFFECTED_COMPOUNDHET",
            SampleStatus::Heterozygous => "HETEROZYGOUS",
            SampleStatus::HeterozygousMultiHit => "HETEROZYGOUS_MULTIHIT",
            SampleStatus::Carrier => "CARRIER",
            SampleStatus::Indeterminate => "INDETERMINATE",
        };
        write!(f, "{status}")
    }
}

impl FromStr for SampleStatus {
    type Err = Error;

    fn from_str(status: &str) -> Result<Self, Error> {
        let status = match status {
            "HOMOZYGOUS" => SampleStatus::Homozygous,
            "HOMOZYGOUS_COMPOUNDHET" => SampleStatus::HomozygousCompoundHet,
            "AFFECTED" => SampleStatus::Affected,
            "AFFECTED_COMPOUNDHET" => SampleStatus::AffectedCompoundHet,
            "HETEROZYGOUS" => SampleStatus::Heterozygous,
            "HETEROZYGOUS_MULTIHIT" => SampleStatus::HeterozygousMultiHit,
            "CARRIER" => SampleStatus::Carrier,
            "INDETERMINATE" | "" | "." => SampleStatus::Indeterminate,
            _ => return Err(Error::UnknownStatus(status.to_string())),
        };
        Ok(status)
    }
}
