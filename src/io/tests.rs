use crate::inheritance::{Inheritance, SampleStatus};
use crate::io::{read_cohort, read_conditions, read_lab_variants, read_observations, read_statuses};

use color_eyre::eyre::{Report, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn tsv(content: &str) -> Result<NamedTempFile, Report> {
    let mut file = tempfile::Builder::new().suffix(".tsv").tempfile()?;
    write!(file, "{content}")?;
    Ok(file)
}

#[test]
fn observations_acting_by_inheritance() -> Result<(), Report> {
    let file = tsv("gene\tscore\tzygosity\tcount\nG1\t5.0\thet\t3\nG1\t15\t1/1\t2\nG2\t50\thomref\t7\n")?;

    let dominant = read_observations(&file.path(), Inheritance::Dominant)?;
    assert_eq!(dominant.len(), 3);
    assert_eq!(dominant.iter().map(|o| o.is_acting).collect::<Vec<_>>(), [true, true, false]);
    assert_eq!(dominant[1].genotype_count, 2);
    assert_eq!(dominant[1].score, 15.0);

    let recessive = read_observations(&file.path(), Inheritance::Recessive)?;
    assert_eq!(recessive.iter().map(|o| o.is_acting).collect::<Vec<_>>(), [false, true, false]);
    Ok(())
}

#[test]
fn observations_explicit_acting_column() -> Result<(), Report> {
    let file = tsv("gene\tscore\tzygosity\tcount\tacting\nG1\t5\thet\t3\tfalse\nG1\t5\thet\t3\t\n")?;
    let observations = read_observations(&file.path(), Inheritance::Dominant)?;
    assert!(!observations[0].is_acting);
    // an empty acting cell falls back to the zygosity
    assert!(observations[1].is_acting);

    let file = tsv("gene\tscore\tcount\tacting\nG1\t5\t3\ttrue\n")?;
    let observations = read_observations(&file.path(), Inheritance::Recessive)?;
    assert!(observations[0].is_acting);
    Ok(())
}

#[test]
fn observations_bad_rows_fail() -> Result<(), Report> {
    let file = tsv("gene\tscore\tzygosity\tcount\nG1\t5\ttriploid\t3\n")?;
    assert!(read_observations(&file.path(), Inheritance::Dominant).is_err());

    let file = tsv("gene\tscore\tcount\nG1\t5\t3\n")?;
    assert!(read_observations(&file.path(), Inheritance::Dominant).is_err());

    let file = tsv("gene\tscore\tzygosity\tcount\nG1\tNA\thet\t3\n")?;
    assert!(read_observations(&file.path(), Inheritance::Dominant).is_err());
    Ok(())
}

#[test]
fn statuses_and_cohort() -> Result<(), Report> {
    let statuses = tsv(
        "chromosome\tposition\tgene\tsample\tstatus\n\
         6\t26093141\tHFE\tP1\tHOMOZYGOUS\n\
         6\t26093141\tHFE\tP2\t\n",
    )?;
    let statuses = read_statuses(&statuses.path())?;
    assert_eq!(statuses[0].status, SampleStatus::Homozygous);
    assert_eq!(statuses[0].position, 26093141);
    assert_eq!(statuses[1].status, SampleStatus::Indeterminate);

    let samples = tsv("sample\tphenotype\nP1\tIRONACC\nP2\tIRONACC\nC1\tCONTROL\n")?;
    let cohort = read_cohort(&samples.path())?;
    assert_eq!(cohort.size("IRONACC"), 2);
    assert_eq!(cohort.phenotype("C1"), Some("CONTROL"));

    let samples = tsv("sample\tphenotype\nP1\tIRONACC\nP1\tCONTROL\n")?;
    assert!(read_cohort(&samples.path()).is_err());
    Ok(())
}

#[test]
fn missing_status_column_fails() -> Result<(), Report> {
    let statuses = tsv("chromosome\tposition\tgene\tsample\n6\t1\tHFE\tP1\n")?;
    assert!(read_statuses(&statuses.path()).is_err());
    Ok(())
}

#[test]
fn unknown_status_fails() -> Result<(), Report> {
    let statuses = tsv("chromosome\tposition\tgene\tsample\tstatus\n1\t1\tG\tS\tMAYBE\n")?;
    assert!(read_statuses(&statuses.path()).is_err());
    Ok(())
}

#[test]
fn lab_variants_and_conditions() -> Result<(), Report> {
    let lab = tsv("chromosome\tposition\tref\talt\tclsf\n6\t26093141\tG\tA\tLP\n1\t100\tA\tG,T\t\n")?;
    let lab = read_lab_variants(&lab.path())?;
    assert_eq!(lab.len(), 3);
    assert!(lab.classify("6", 26093141, "G", "A", "HFE")?.is_some());
    assert!(lab.classify("1", 100, "A", "T", "X").is_err());

    let conditions = tsv("#GENE\tCONDITION\tINHERITANCE\nHFE\tHemochromatosis\tAR\n")?;
    let conditions = read_conditions(&conditions.path())?;
    assert_eq!(conditions.get("HFE"), "Hemochromatosis");
    Ok(())
}

#[test]
fn missing_file_fails() {
    assert!(read_cohort(&"does/not/exist.tsv").is_err());
}
