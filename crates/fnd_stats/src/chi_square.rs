use fnd_core::{ClickbaitLabel, SentimentLabel};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use crate::Outcome;

/// Every label level must be observed at least this often for the test to run.
pub const MIN_LEVEL_COUNT: usize = 2;

/// Clickbait x sentiment counts over the observed levels only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyTable {
    pub rows: Vec<ClickbaitLabel>,
    pub columns: Vec<SentimentLabel>,
    pub counts: Vec<Vec<usize>>,
}

impl ContingencyTable {
    pub fn from_pairs(pairs: &[(ClickbaitLabel, SentimentLabel)]) -> Self {
        let rows: Vec<ClickbaitLabel> = ClickbaitLabel::ALL
            .into_iter()
            .filter(|label| pairs.iter().any(|(c, _)| c == label))
            .collect();
        let columns: Vec<SentimentLabel> = SentimentLabel::ALL
            .into_iter()
            .filter(|label| pairs.iter().any(|(_, s)| s == label))
            .collect();

        let mut counts = vec![vec![0; columns.len()]; rows.len()];
        for (clickbait, sentiment) in pairs {
            let (Some(r), Some(c)) = (
                rows.iter().position(|l| l == clickbait),
                columns.iter().position(|l| l == sentiment),
            ) else {
                continue;
            };
            counts[r][c] += 1;
        }
        Self { rows, columns, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.columns.len())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquare {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
    /// Whether the Yates continuity correction was applied (2x2 tables).
    pub yates: bool,
    pub table: ContingencyTable,
    pub expected: Vec<Vec<f64>>,
}

/// Pearson's chi-square test of independence between the clickbait and
/// sentiment labels.
///
/// Only observed labels form the table. The test needs at least two levels of
/// each label, and every level must be observed at least [`MIN_LEVEL_COUNT`]
/// times; otherwise the result is [`Outcome::InsufficientData`]. For example
/// `(Clickbait, Positive), (NotClickbait, Positive), (NotClickbait, Negative)`
/// is insufficient because `Clickbait` and `Negative` are each seen once.
/// The Yates correction is applied when the table has one degree of freedom.
pub fn chi_square(pairs: &[(ClickbaitLabel, SentimentLabel)]) -> Outcome<ChiSquare> {
    let table = ContingencyTable::from_pairs(pairs);
    if table.rows.len() < 2 || table.columns.len() < 2 {
        return Outcome::InsufficientData(format!(
            "need at least 2 clickbait and 2 sentiment categories, got {} x {}",
            table.rows.len(),
            table.columns.len()
        ));
    }

    let row_totals = table.row_totals();
    let column_totals = table.column_totals();
    if row_totals.iter().chain(&column_totals).any(|&t| t < MIN_LEVEL_COUNT) {
        return Outcome::InsufficientData(format!(
            "every category needs at least {} articles",
            MIN_LEVEL_COUNT
        ));
    }

    let total = table.total() as f64;
    let expected: Vec<Vec<f64>> = row_totals
        .iter()
        .map(|&r| column_totals.iter().map(|&c| r as f64 * c as f64 / total).collect())
        .collect();

    let dof = (table.rows.len() - 1) * (table.columns.len() - 1);
    let yates = dof == 1;
    let mut statistic = 0.0;
    for (observed_row, expected_row) in table.counts.iter().zip(&expected) {
        for (&o, &e) in observed_row.iter().zip(expected_row) {
            let mut diff = (o as f64 - e).abs();
            if yates {
                diff -= diff.min(0.5);
            }
            statistic += diff * diff / e;
        }
    }

    let p_value = match ChiSquared::new(dof as f64) {
        Ok(dist) => dist.sf(statistic).clamp(0.0, 1.0),
        Err(e) => return Outcome::InsufficientData(format!("chi-square distribution undefined: {}", e)),
    };

    Outcome::Computed(ChiSquare {
        statistic,
        p_value,
        dof,
        yates,
        table,
        expected,
    })
}
