use crate::cohort::{CohortAggregator, PhenotypeCohort, StatusObservation};
use crate::enrichment::LodScoreMap;
use crate::inheritance::SampleStatus;
use crate::report::{format_score, lod_summary, lod_table, zscore_table, Conditions};

use burden_table::Table;
use color_eyre::eyre::{Report, Result};

fn affected(chromosome: &str, position: u64, gene: &str, sample: &str) -> StatusObservation {
    StatusObservation {
        chromosome: chromosome.to_string(),
        position,
        gene: gene.to_string(),
        sample: sample.to_string(),
        status: SampleStatus::Affected,
    }
}

#[test]
fn lod_rows_split_gene_and_bin() -> Result<(), Report> {
    let lods = LodScoreMap::from([
        ("HLA_DRB1_0-10".to_string(), 2.0),
        ("HFE_10-20".to_string(), 5.0),
        ("BRCA1_30-100".to_string(), 10.0),
    ]);
    let table = lod_table(&lods)?;

    assert_eq!(table.headers, ["Gene", "Bin", "LOD", "Significance"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0], ["BRCA1", "30-100", "10.0", "genome-wide"]);
    assert_eq!(table.rows[1], ["HFE", "10-20", "5.0", "suggestive"]);
    assert_eq!(table.rows[2], ["HLA_DRB1", "0-10", "2.0", ""]);
    Ok(())
}

#[test]
fn scores_keep_a_decimal_point() {
    assert_eq!(format_score(99.0), "99.0");
    assert_eq!(format_score(-99.0), "-99.0");
    assert_eq!(format_score(50.0), "50.0");
    assert_eq!(format_score(0.0), "0.0");
    assert_eq!(format_score(7.30103), "7.30103");
}

#[test]
fn lod_summary_keeps_significant_hits() -> Result<(), Report> {
    let lods = LodScoreMap::from([
        ("A_0-10".to_string(), 4.5),
        ("B_0-10".to_string(), 9.0),
        ("C_0-10".to_string(), 1.0),
    ]);
    let summary = lod_summary(&lods)?;
    let lines = summary.lines().collect::<Vec<_>>();

    // header, frame, two hits
    assert_eq!(lines.len(), 4);
    assert!(lines[2].contains(" B "));
    assert!(lines[3].contains(" A "));
    assert!(!summary.contains(" C "));
    Ok(())
}

#[test]
fn zscore_rows_fill_missing_cells() -> Result<(), Report> {
    let cohort = PhenotypeCohort::from_samples([
        ("P1", "IRONACC"),
        ("P2", "IRONACC"),
        ("C1", "CONTROL"),
        ("C2", "CONTROL"),
    ])?;
    let observations = vec![affected("6", 26093141, "HFE", "P1"), affected("1", 500, "ABC", "C1")];
    let result = CohortAggregator::run(&cohort, observations)?;

    let mut conditions = Conditions::default();
    conditions.insert("HFE", "Hemochromatosis");

    let table = zscore_table(&result, &conditions)?;
    assert_eq!(table.headers, ["Gene", "Condition", "Chr", "Pos", "CONTROL", "IRONACC"]);
    assert_eq!(table.rows[0], ["ABC", "", "1", "500", "99.0", "0.0"]);
    assert_eq!(table.rows[1], ["HFE", "Hemochromatosis", "6", "26093141", "0.0", "99.0"]);
    Ok(())
}

#[test]
fn conditions_from_either_gene_header() -> Result<(), Report> {
    for header in ["#GENE", "GENE"] {
        let mut table = Table::new();
        table.headers = vec![header.to_string(), "CONDITION".to_string()];
        table.add_row(["HFE".to_string(), "Hemochromatosis".to_string()])?;

        let conditions = Conditions::from_table(&table)?;
        assert_eq!(conditions.get("HFE"), "Hemochromatosis");
        assert_eq!(conditions.get("BRCA1"), "");
    }

    let mut table = Table::new();
    table.headers = vec!["SYMBOL".to_string(), "CONDITION".to_string()];
    assert!(Conditions::from_table(&table).is_err());
    Ok(())
}
