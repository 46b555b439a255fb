//! Curated lab-reported variant classifications, matched by position and allele.


use crate::Error;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::EnumIter;

// ----------------------------------------------------------------------------
// Classification

/// Classification of a variant.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize)]
pub enum Classification {
    Benign,
    Vous,
    Pathogenic,
}

impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let classification = match self {
            Classification::Benign => "Benign",
            Classification::Vous => "VOUS",
            Classification::Pathogenic => "Pathogenic",
        };
        write!(f, "{classification}")
    }
}

/// A lab classification code, as reported in the `CLSF` field.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LabCode {
    P,
    LP,
    V,
    B,
    LB,
}

impl LabCode {
    pub fn classification(&self) -> Classification {
        match self {
            LabCode::P | LabCode::LP => Classification::Pathogenic,
            LabCode::V => Classification::Vous,
            LabCode::B | LabCode::LB => Classification::Benign,
        }
    }

    /// Human-readable reason attached to a [`Judgment`].
    pub fn description(&self) -> &'static str {
        match self.classification() {
            Classification::Pathogenic => "Reported pathogenic",
            Classification::Vous => "Reported VUS",
            Classification::Benign => "Reported benign",
        }
    }
}

impl Display for LabCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for LabCode {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Error> {
        let code = match code {
            "P" => LabCode::P,
            "LP" => LabCode::LP,
            "V" => LabCode::V,
            "B" => LabCode::B,
            "LB" => LabCode::LB,
            _ => return Err(Error::UnknownClassification(code.to_string())),
        };
        Ok(code)
    }
}

// ----------------------------------------------------------------------------
// Judgment

/// Outcome of matching a variant against the lab variants.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Judgment {
    pub classification: Classification,
    pub gene: String,
    pub code: LabCode,
    pub source: String,
    pub reason: String,
}

// ----------------------------------------------------------------------------
// Lab Variant

/// One row of the lab variants table.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LabVariant {
    pub chromosome: String,
    pub position: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    /// Comma-separated alternate alleles.
    pub alt: String,
    /// Classification code, may be missing.
    #[serde(default)]
    pub clsf: Option<String>,
}

/// Trim the trailing bases shared by `reference` and `alt`, keeping at least one base of
/// each, and join them with `sep`.
///
/// ## Examples
///
/// ```rust
/// use burden::lab::back_trim_ref_alt;
///
/// assert_eq!(back_trim_ref_alt("TCGCG", "TCG", "_"), "TCG_T");
/// assert_eq!(back_trim_ref_alt("A", "G", "_"), "A_G");
/// assert_eq!(back_trim_ref_alt("AT", "GT", "_"), "A_G");
/// ```
pub fn back_trim_ref_alt(reference: &str, alt: &str, sep: &str) -> String {
    let (mut reference, mut alt) = (reference.as_bytes(), alt.as_bytes());
    while reference.len() > 1 && alt.len() > 1 && reference.last() == alt.last() {
        reference = &reference[..reference.len() - 1];
        alt = &alt[..alt.len() - 1];
    }
    format!(
        "{}{sep}{}",
        String::from_utf8_lossy(reference),
        String::from_utf8_lossy(alt)
    )
}

/// Lookup key of a variant: `<chromosome>_<position>_<ref>_<alt>`, alleles back-trimmed.
pub fn variant_key(chromosome: &str, position: u64, reference: &str, alt: &str) -> String {
    format!("{chromosome}_{position}_{}", back_trim_ref_alt(reference, alt, "_"))
}

// ----------------------------------------------------------------------------
// Lab Variants

/// Lab variants indexed by [`variant_key`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabVariants {
    variants: BTreeMap<String, LabVariant>,
}

impl LabVariants {
    /// Index lab variants, one key per alternate allele.
    pub fn new<I>(variants: I) -> Self
    where
        I: IntoIterator<Item = LabVariant>,
    {
        let mut index = BTreeMap::new();
        for variant in variants {
            for alt in variant.alt.split(',') {
                let key = variant_key(&variant.chromosome, variant.position, &variant.reference, alt);
                index.insert(key, variant.clone());
            }
        }
        info!("Lab variants ({}) loaded", index.len());
        LabVariants { variants: index }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Classify a variant allele if it was reported by the lab.
    ///
    /// A reported variant without a classification code, or with an unrecognized one, is
    /// an error.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burden::lab::{Classification, LabVariant, LabVariants};
    ///
    /// let lab = LabVariants::new([LabVariant {
    ///     chromosome: "6".to_string(),
    ///     position: 26093141,
    ///     reference: "G".to_string(),
    ///     alt: "A".to_string(),
    ///     clsf: Some("LP".to_string()),
    /// }]);
    ///
    /// let judgment = lab.classify("6", 26093141, "G", "A", "HFE")?.unwrap();
    /// assert_eq!(judgment.classification, Classification::Pathogenic);
    /// assert!(lab.classify("6", 26093141, "G", "T", "HFE")?.is_none());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn classify(
        &self,
        chromosome: &str,
        position: u64,
        reference: &str,
        alt: &str,
        gene: &str,
    ) -> Result<Option<Judgment>, Error> {
        let key = variant_key(chromosome, position, reference, alt);
        let Some(variant) = self.variants.get(&key) else {
            return Ok(None);
        };

        let clsf = match variant.clsf.as_deref() {
            Some(clsf) if !clsf.is_empty() => clsf,
            _ => return Err(Error::MissingClassification(key)),
        };
        let code = LabCode::from_str(clsf)?;

        Ok(Some(Judgment {
            classification: code.classification(),
            gene: gene.to_string(),
            code,
            source: "Lab variant".to_string(),
            reason: code.description().to_string(),
        }))
    }
}
