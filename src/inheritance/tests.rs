use crate::inheritance::{Inheritance, PresumedAffected, SampleStatus, Zygosity};
use crate::Error;

use color_eyre::eyre::{Report, Result};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn hom_ref_never_acting() {
    for inheritance in Inheritance::iter() {
        assert!(!inheritance.is_acting(Zygosity::HomRef));
    }
}

#[test]
fn zygosity_from_genotype() -> Result<(), Report> {
    assert_eq!(Zygosity::from_str("0/1")?, Zygosity::Het);
    assert_eq!(Zygosity::from_str("1|1")?, Zygosity::HomAlt);
    assert_eq!(Zygosity::from_str("HomRef")?, Zygosity::HomRef);
    assert_eq!(Zygosity::from_str("2/2"), Err(Error::UnknownZygosity("2/2".to_string())));
    Ok(())
}

#[test]
fn status_display_roundtrip() -> Result<(), Report> {
    for status in SampleStatus::iter() {
        assert_eq!(SampleStatus::from_str(&status.to_string())?, status);
    }
    Ok(())
}

#[test]
fn presumed_affected() {
    let affected = SampleStatus::iter().filter(|s| s.is_presumed_affected()).collect::<Vec<_>>();
    let expected = vec![
        SampleStatus::Homozygous,
        SampleStatus::HomozygousCompoundHet,
        SampleStatus::Affected,
        SampleStatus::AffectedCompoundHet,
    ];
    assert_eq!(affected, expected);
    assert!(SampleStatus::Indeterminate.is_indeterminate());
    assert!(!SampleStatus::Carrier.is_indeterminate());
}

#[test]
fn unknown_status() {
    assert_eq!(SampleStatus::from_str("MAYBE"), Err(Error::UnknownStatus("MAYBE".to_string())));
}
