use serde::Serialize;

use crate::{
    analysis::{
        correlation::paired,
        merge::{MergedColumn, MergedRecord, column_values},
    },
    error::EsResult,
    utils::math::linear_regression,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares line of `y` on `x` over complete pairs.
pub fn fit_trend_line(
    records: &[MergedRecord],
    x: MergedColumn,
    y: MergedColumn,
) -> EsResult<TrendLine> {
    let (xs, ys) = paired(&column_values(records, x), &column_values(records, y))?;
    let (slope, intercept, r2) = linear_regression(&xs, &ys)?;

    Ok(TrendLine {
        slope,
        intercept,
        r2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str, esg: Option<f64>, ret: Option<f64>) -> MergedRecord {
        MergedRecord {
            identifier: identifier.to_string(),
            start_price: None,
            end_price: None,
            annual_return: ret,
            price_difference: None,
            total_esg_score: esg,
        }
    }

    #[test]
    fn test_fit_trend_line() {
        let records = vec![
            record("A", Some(10.0), Some(0.3)),
            record("B", Some(20.0), Some(0.2)),
            record("C", None, Some(5.0)),
            record("D", Some(30.0), Some(0.1)),
        ];

        let line =
            fit_trend_line(&records, MergedColumn::TotalEsgScore, MergedColumn::AnnualReturn)
                .unwrap();

        assert!((line.slope + 0.01).abs() < 1e-9);
        assert!((line.intercept - 0.4).abs() < 1e-9);
        assert!((line.at(25.0) - 0.15).abs() < 1e-9);
        assert!((line.r2 - 1.0).abs() < 1e-9);
    }
}
