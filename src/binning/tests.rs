use crate::binning::{Bin, Bins, GenotypeBinner, Observation};
use crate::Error;

use color_eyre::eyre::{Report, Result};
use std::str::FromStr;

fn observation(gene: &str, score: f64, is_acting: bool, genotype_count: u64) -> Observation {
    Observation { gene: gene.to_string(), score, is_acting, genotype_count }
}

#[test]
fn bin_boundaries() -> Result<(), Report> {
    let bins = Bins::default();
    assert_eq!(bins.find(0.0), Some(0));
    assert_eq!(bins.find(9.999), Some(0));
    assert_eq!(bins.find(20.0), Some(2));
    assert_eq!(bins.find(30.0), Some(3));
    assert_eq!(bins.find(-0.1), None);
    assert_eq!(bins.find(f64::NAN), None);

    // the last bin is inclusive on both ends, even when it is not the widest
    let bins = Bins::from_str("0-5,5-10")?;
    assert_eq!(bins.find(5.0), Some(1));
    assert_eq!(bins.find(10.0), Some(1));
    Ok(())
}

#[test]
fn parse_bins() -> Result<(), Report> {
    let bins = Bins::from_str("0-10,10-20,20-30,30-100")?;
    assert_eq!(bins, Bins::default());
    assert_eq!(Bin::from_str("-5-2.5")?, Bin { lower: -5.0, upper: 2.5 });
    assert!(Bin::from_str("10").is_err());
    assert!(Bin::from_str("20-10").is_err());
    assert!(Bins::from_str("0-10,5-20").is_err());
    Ok(())
}

#[test]
fn invalid_bins() {
    assert_eq!(Bin::new(10.0, 10.0), Err(Error::InvalidBin { lower: 10.0, upper: 10.0 }));
    assert_eq!(Bins::new(vec![]), Err(Error::NoBins));
    let overlapping = vec![Bin { lower: 0.0, upper: 15.0 }, Bin { lower: 10.0, upper: 20.0 }];
    assert_eq!(
        Bins::new(overlapping),
        Err(Error::OverlappingBins { previous: "0-15".to_string(), next: "10-20".to_string() })
    );
}

#[test]
fn every_gene_has_every_bin() -> Result<(), Report> {
    let binner = GenotypeBinner::default();
    let observations = vec![
        observation("BRCA1", 5.0, true, 3),
        observation("BRCA1", 35.0, false, 7),
        observation("HFE", 100.0, true, 1),
    ];
    let table = binner.bin(observations)?;

    assert_eq!(table.len(), 2);
    for counts in table.values() {
        assert_eq!(counts.len(), binner.bins.len());
        for (count, bin) in counts.iter().zip(binner.bins.iter()) {
            assert_eq!(&count.bin, bin);
        }
    }
    // a bin with no observations is still present, with zero counts
    assert_eq!(table["HFE"][0].total_genotypes, 0);
    assert_eq!(table["HFE"][3].acting_genotypes, 1);
    Ok(())
}

#[test]
fn totals_sum_to_observed_counts() -> Result<(), Report> {
    let binner = GenotypeBinner::default();
    let observations = vec![
        observation("BRCA1", 1.0, true, 3),
        observation("BRCA1", 12.0, false, 7),
        observation("BRCA1", 12.5, true, 2),
        observation("BRCA1", 29.9, false, 11),
        observation("brca1", 29.9, true, 4),
    ];
    let expected_total: u64 =
        observations.iter().filter(|o| o.gene == "BRCA1").map(|o| o.genotype_count).sum();

    let table = binner.bin(observations)?;
    let observed_total: u64 = table["BRCA1"].iter().map(|c| c.total_genotypes).sum();
    assert_eq!(observed_total, expected_total);

    // gene names are case-sensitive
    assert_eq!(table["brca1"][2].total_genotypes, 4);

    for count in table.values().flatten() {
        assert!(count.acting_genotypes <= count.total_genotypes);
    }
    assert_eq!(table["BRCA1"][1].acting_genotypes, 2);
    assert_eq!(table["BRCA1"][1].total_genotypes, 9);
    Ok(())
}

#[test]
fn score_outside_bins_fails() {
    let binner = GenotypeBinner::default();
    let observations = vec![observation("BRCA1", 5.0, true, 1), observation("HFE", 101.0, true, 1)];
    let result = binner.bin(observations);
    assert_eq!(result, Err(Error::InvalidScore { gene: "HFE".to_string(), score: 101.0 }));
}
