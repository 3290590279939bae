use serde::Serialize;

use crate::{
    analysis::merge::{MergedColumn, MergedRecord, column_values},
    error::{EsError, EsResult},
    utils::stats,
};

/// Descriptive statistics over the non-missing values of one column.
///
/// `variance` and `std_dev` are sample statistics (N - 1). `skewness` and
/// `kurtosis` are moment based, kurtosis reported as excess kurtosis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryStats {
    pub label: String,
    pub total: usize,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub mean: f64,
    pub median: f64,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

pub fn summarize(
    records: &[MergedRecord],
    column: MergedColumn,
    label: &str,
) -> EsResult<SummaryStats> {
    summarize_values(&column_values(records, column), label)
}

pub fn summarize_values(values: &[Option<f64>], label: &str) -> EsResult<SummaryStats> {
    let present: Vec<f64> = values
        .iter()
        .filter_map(|v| v.filter(|v| v.is_finite()))
        .collect();

    if present.is_empty() {
        return Err(EsError::InsufficientData {
            code: "NO_VALUES",
            message: format!("'{label}' has no non-missing values"),
        });
    }

    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = stats::mean(&present).unwrap_or_default();
    let median = stats::median(&present).unwrap_or_default();

    Ok(SummaryStats {
        label: label.to_string(),
        total: values.len(),
        count: present.len(),
        min,
        max,
        range: max - min,
        mean,
        median,
        variance: stats::variance(&present, 1),
        std_dev: stats::std(&present, 1),
        skewness: stats::skewness(&present),
        kurtosis: stats::kurtosis(&present),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_values() {
        let values = vec![
            Some(1.0),
            None,
            Some(2.0),
            Some(3.0),
            Some(f64::NAN),
            Some(4.0),
            Some(5.0),
        ];
        let summary = summarize_values(&values, "Annual Return").unwrap();

        assert_eq!(summary.label, "Annual Return");
        assert_eq!(summary.total, 7);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.range, summary.max - summary.min);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.median, 3.0);
        assert!((summary.variance.unwrap() - 2.5).abs() < 1e-12);
        assert!((summary.std_dev.unwrap() - 2.5_f64.sqrt()).abs() < 1e-12);
        assert!(summary.skewness.unwrap().abs() < 1e-12);
        assert!((summary.kurtosis.unwrap() + 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_single_value() {
        let summary = summarize_values(&[Some(0.5)], "x").unwrap();

        assert_eq!(summary.count, 1);
        assert_eq!(summary.range, 0.0);
        assert_eq!(summary.median, 0.5);
        assert!(summary.variance.is_none());
        assert!(summary.skewness.is_none());
    }

    #[test]
    fn test_summarize_no_values() {
        assert!(matches!(
            summarize_values(&[None, None], "x"),
            Err(EsError::InsufficientData {
                code: "NO_VALUES",
                ..
            })
        ));
    }

    #[test]
    fn test_summarize_records() {
        let records = vec![
            MergedRecord {
                identifier: "A".to_string(),
                start_price: Some(100.0),
                end_price: Some(110.0),
                annual_return: Some(0.1),
                price_difference: Some(10.0),
                total_esg_score: None,
            },
            MergedRecord {
                identifier: "B".to_string(),
                start_price: Some(100.0),
                end_price: Some(80.0),
                annual_return: Some(-0.2),
                price_difference: Some(-20.0),
                total_esg_score: Some(20.0),
            },
        ];

        let summary = summarize(&records, MergedColumn::PriceDifference, "diff").unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.min, -20.0);
        assert_eq!(summary.median, -5.0);

        let summary = summarize(&records, MergedColumn::TotalEsgScore, "esg").unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total, 2);
    }
}
