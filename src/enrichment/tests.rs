use crate::binning::{Bin, BinnedGenotypeCount, GeneBinTable};
use crate::enrichment::{EnrichmentTester, Significance, GENOME_WIDE_LOD, PVALUE_FLOOR};

use color_eyre::eyre::{Report, Result};

fn count(lower: f64, upper: f64, acting: u64, total: u64) -> BinnedGenotypeCount {
    BinnedGenotypeCount {
        bin: Bin { lower, upper },
        acting_genotypes: acting,
        total_genotypes: total,
    }
}

#[test]
fn brca1_genome_wide() -> Result<(), Report> {
    let mut reference = GeneBinTable::new();
    reference.insert("BRCA1".to_string(), vec![count(0.0, 10.0, 10, 1000), count(10.0, 20.0, 0, 1000)]);
    let mut patient = GeneBinTable::new();
    patient.insert("BRCA1".to_string(), vec![count(0.0, 10.0, 5, 10), count(10.0, 20.0, 0, 10)]);

    let lod_scores = EnrichmentTester.run(&patient, &reference)?;
    assert_eq!(lod_scores.len(), 2);

    let lod = lod_scores["BRCA1_0-10"];
    assert!(lod > GENOME_WIDE_LOD, "lod: {lod}");
    assert_eq!(Significance::from_lod(lod), Significance::GenomeWide);

    // no acting genotypes observed, p-value of 1
    assert_eq!(lod_scores["BRCA1_10-20"], 0.0);
    Ok(())
}

#[test]
fn gene_missing_from_reference_is_skipped() -> Result<(), Report> {
    let mut reference = GeneBinTable::new();
    reference.insert("HFE".to_string(), vec![count(0.0, 10.0, 1, 100)]);
    let mut patient = GeneBinTable::new();
    patient.insert("BRCA2".to_string(), vec![count(0.0, 10.0, 5, 10), count(10.0, 20.0, 5, 10)]);
    patient.insert("HFE".to_string(), vec![count(0.0, 10.0, 1, 10)]);

    let lod_scores = EnrichmentTester.run(&patient, &reference)?;
    assert_eq!(lod_scores.keys().collect::<Vec<_>>(), vec!["HFE_0-10"]);
    Ok(())
}

#[test]
fn missing_reference_bin_uses_zero_probability() -> Result<(), Report> {
    let reference = vec![count(0.0, 10.0, 10, 1000)];
    let patient = count(10.0, 20.0, 1, 10);

    assert_eq!(EnrichmentTester::reference_probability(&patient, Some(reference.as_slice())), 0.0);
    assert_eq!(EnrichmentTester::reference_probability(&patient, None), 0.0);

    // any success is impossible under p = 0, so the p-value is floored
    let lod = EnrichmentTester::test(&patient, Some(reference.as_slice()))?;
    assert!((lod + PVALUE_FLOOR.log10()).abs() < 1e-9);
    Ok(())
}

#[test]
fn empty_reference_bin_uses_zero_probability() {
    let reference = vec![count(0.0, 10.0, 0, 0)];
    let patient = count(0.0, 10.0, 1, 10);
    assert_eq!(EnrichmentTester::reference_probability(&patient, Some(reference.as_slice())), 0.0);
}

#[test]
fn lod_is_monotonic_in_successes() -> Result<(), Report> {
    let reference = vec![count(20.0, 30.0, 30, 1000)];
    let mut previous = f64::NEG_INFINITY;
    for successes in 0..=25 {
        let patient = count(20.0, 30.0, successes, 25);
        let lod = EnrichmentTester::test(&patient, Some(reference.as_slice()))?;
        assert!(lod >= previous, "successes: {successes}, lod: {lod}, previous: {previous}");
        assert!(lod.is_finite());
        previous = lod;
    }
    Ok(())
}

#[test]
fn upper_tail_matches_exact_sum() -> Result<(), Report> {
    // P(X >= 2) for n = 4, p = 0.25, summed by hand: 1 - 0.75^4 - 4 * 0.25 * 0.75^3
    let expected = 1.0 - 0.75_f64.powi(4) - 4.0 * 0.25 * 0.75_f64.powi(3);
    let observed = EnrichmentTester::upper_tail(4, 2, 0.25)?;
    assert!((observed - expected).abs() < 1e-12, "observed: {observed}, expected: {expected}");
    Ok(())
}

#[test]
fn significance_thresholds() {
    assert_eq!(Significance::from_lod(7.30103), Significance::Suggestive);
    assert_eq!(Significance::from_lod(7.31), Significance::GenomeWide);
    assert_eq!(Significance::from_lod(4.0), Significance::None);
    assert_eq!(Significance::from_lod(4.01), Significance::Suggestive);
}
