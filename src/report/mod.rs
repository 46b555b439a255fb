//! Tabular reports of enrichment and cohort results.

#[cfg(test)]
mod tests;

use crate::cohort::CohortResult;
use crate::enrichment::{LodScoreMap, Significance};
use burden_table::Table;
use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Help;
use itertools::Itertools;
use std::collections::BTreeMap;

// ----------------------------------------------------------------------------
// Conditions

/// Disease condition associated with each gene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conditions(BTreeMap<String, String>);

impl Conditions {
    /// Collect gene conditions from a table with a `#GENE` (or `GENE`) and a `CONDITION`
    /// column. Later rows replace earlier rows of the same gene.
    pub fn from_table(table: &Table<String>) -> Result<Self, Report> {
        let gene_i = ["#GENE", "GENE"]
            .iter()
            .find_map(|h| table.get_header_index(&h.to_string()).ok())
            .ok_or_else(|| {
                eyre!("Gene column was not found in table: {:?}", table.path)
                    .suggestion("Name the gene column '#GENE' or 'GENE'.")
            })?;
        let condition_i = table.get_header_index(&"CONDITION".to_string())?;

        let conditions = table
            .rows
            .iter()
            .map(|row| (row[gene_i].clone(), row[condition_i].clone()))
            .collect();
        Ok(Conditions(conditions))
    }

    /// Condition of a gene, empty if unknown.
    pub fn get(&self, gene: &str) -> &str {
        self.0.get(gene).map(String::as_str).unwrap_or("")
    }

    pub fn insert(&mut self, gene: &str, condition: &str) {
        self.0.insert(gene.to_string(), condition.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Render a score the way it is written to reports, always with a decimal point.
///
/// ```rust
/// use burden::report::format_score;
///
/// assert_eq!(format_score(99.0), "99.0");
/// assert_eq!(format_score(7.5), "7.5");
/// assert_eq!(format_score(0.0), "0.0");
/// ```
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}

// ----------------------------------------------------------------------------
// LOD Scores

/// Tabulate LOD scores, one row per gene and bin, in key order.
///
/// ## Examples
///
/// ```rust
/// use burden::enrichment::LodScoreMap;
/// use burden::report::lod_table;
///
/// let lods = LodScoreMap::from([("HFE_10-20".to_string(), 8.5)]);
/// let table = lod_table(&lods)?;
/// assert_eq!(table.headers, ["Gene", "Bin", "LOD", "Significance"]);
/// assert_eq!(table.rows[0], ["HFE", "10-20", "8.5", "genome-wide"]);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn lod_table(lods: &LodScoreMap) -> Result<Table<String>, Report> {
    let mut table = Table::new();
    table.headers = ["Gene", "Bin", "LOD", "Significance"].into_iter().map(String::from).collect();

    for (key, lod) in lods {
        // gene names may contain underscores, bins never do
        let (gene, bin) = key
            .rsplit_once('_')
            .ok_or_else(|| eyre!("LOD key is not of the form <gene>_<bin>: {key:?}"))?;
        let significance = Significance::from_lod(*lod);
        table.add_row([gene.to_string(), bin.to_string(), format_score(*lod), significance.to_string()])?;
    }

    Ok(table)
}

/// Markdown summary of the LOD scores above the suggestive threshold, highest first.
pub fn lod_summary(lods: &LodScoreMap) -> Result<String, Report> {
    let mut table = lod_table(lods)?;
    let lod_i = table.get_header_index(&"LOD".to_string())?;
    let sig_i = table.get_header_index(&"Significance".to_string())?;

    table.rows = table
        .rows
        .into_iter()
        .filter(|row| !row[sig_i].is_empty())
        .sorted_by(|a, b| {
            let (a, b) = (a[lod_i].parse::<f64>(), b[lod_i].parse::<f64>());
            match (a, b) {
                (Ok(a), Ok(b)) => b.total_cmp(&a),
                _ => std::cmp::Ordering::Equal,
            }
        })
        .collect();

    Ok(table.to_markdown())
}

// ----------------------------------------------------------------------------
// Z-Scores

/// Tabulate z-scores, one row per gene and one column per phenotype.
///
/// Genes without an affected individual in some phenotype show `0.0` in that column.
pub fn zscore_table(result: &CohortResult, conditions: &Conditions) -> Result<Table<String>, Report> {
    let mut table = Table::new();
    table.headers = ["Gene", "Condition", "Chr", "Pos"]
        .into_iter()
        .map(String::from)
        .chain(result.phenotypes.iter().cloned())
        .collect();

    for (gene, location) in &result.locations {
        let row = [
            gene.clone(),
            conditions.get(gene).to_string(),
            location.chromosome.clone(),
            location.position.to_string(),
        ]
        .into_iter()
        .chain(result.phenotypes.iter().map(|phenotype| format_score(result.zscore(gene, phenotype))))
        .collect_vec();
        table.add_row(row)?;
    }

    Ok(table)
}
