use serde::Serialize;

use crate::{
    analysis::merge::{MergedColumn, MergedRecord, column_values},
    error::{EsError, EsResult},
    utils::math::student_t_two_tailed_p,
};

pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
pub enum Verdict {
    #[strum(to_string = "reject null hypothesis")]
    RejectNull,
    #[strum(to_string = "fail to reject null hypothesis")]
    FailToRejectNull,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub n: usize,
    pub r: f64,
    pub p_value: f64,
    pub significance_level: f64,
    pub reject_null: bool,
}

impl CorrelationResult {
    pub fn verdict(&self) -> Verdict {
        if self.reject_null {
            Verdict::RejectNull
        } else {
            Verdict::FailToRejectNull
        }
    }
}

/// Whether a p-value rejects `r = 0`; the threshold itself rejects.
pub fn is_significant(p_value: f64) -> bool {
    p_value <= SIGNIFICANCE_LEVEL
}

pub fn correlate(
    records: &[MergedRecord],
    x: MergedColumn,
    y: MergedColumn,
) -> EsResult<CorrelationResult> {
    pearson(&column_values(records, x), &column_values(records, y))
}

/// Complete `(x, y)` pairs, dropping any pair with a missing side.
pub fn paired(xs: &[Option<f64>], ys: &[Option<f64>]) -> EsResult<(Vec<f64>, Vec<f64>)> {
    if xs.len() != ys.len() {
        return Err(EsError::InsufficientData {
            code: "SHAPE_MISMATCH",
            message: format!("Columns have {} and {} rows", xs.len(), ys.len()),
        });
    }

    Ok(xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .unzip())
}

/// Pearson's r with the two-tailed p-value for `r = 0`.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> EsResult<CorrelationResult> {
    let (xs, ys) = paired(xs, ys)?;

    let n = xs.len();
    if n < 2 {
        return Err(EsError::InsufficientData {
            code: "TOO_FEW_PAIRS",
            message: format!("Correlation needs at least 2 paired observations, got {n}"),
        });
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(EsError::InsufficientData {
            code: "CONSTANT_INPUT",
            message: "Correlation is undefined for a constant column".to_string(),
        });
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);

    let p_value = if n == 2 {
        1.0
    } else {
        let df = (n - 2) as f64;
        let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
        student_t_two_tailed_p(t, df)
    };

    Ok(CorrelationResult {
        n,
        r,
        p_value,
        significance_level: SIGNIFICANCE_LEVEL,
        reject_null: is_significant(p_value),
    })
}
