use std::cmp::Ordering;

pub fn mean(values: &[f64]) -> Option<f64> {
    let sum = values.iter().sum::<f64>();
    let count = values.len();

    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Two-point percentage change, `None` unless `start` is strictly positive.
pub fn pct_change(start: f64, end: f64) -> Option<f64> {
    if start > 0.0 && start.is_finite() && end.is_finite() {
        Some(end / start - 1.0)
    } else {
        None
    }
}

pub fn quantile(values: &[f64], quantile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    if !(0.0..=1.0).contains(&quantile) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let n = sorted.len();
    let pos = (n as f64 - 1.0) * quantile;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;

    if upper >= n {
        Some(sorted[lower])
    } else {
        Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

/// Variance with `ddof` delta degrees of freedom (1 for the sample variance).
pub fn variance(values: &[f64], ddof: usize) -> Option<f64> {
    let count = values.len();
    if count <= ddof {
        return None;
    }

    mean(values).map(|mean| {
        values
            .iter()
            .map(|value| {
                let diff = *value - mean;

                diff * diff
            })
            .sum::<f64>()
            / (count - ddof) as f64
    })
}

pub fn std(values: &[f64], ddof: usize) -> Option<f64> {
    variance(values, ddof).map(f64::sqrt)
}

/// Population central moment of the given order.
pub fn central_moment(values: &[f64], order: i32) -> Option<f64> {
    mean(values).map(|mean| {
        values.iter().map(|v| (v - mean).powi(order)).sum::<f64>() / values.len() as f64
    })
}

/// Moment-based (biased) skewness: m3 / m2^1.5.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let m2 = central_moment(values, 2)?;
    let m3 = central_moment(values, 3)?;

    if m2 > 0.0 {
        Some(m3 / m2.powf(1.5))
    } else {
        None
    }
}

/// Moment-based excess kurtosis: m4 / m2^2 - 3, so a normal distribution scores 0.
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    let m2 = central_moment(values, 2)?;
    let m4 = central_moment(values, 4)?;

    if m2 > 0.0 {
        Some(m4 / (m2 * m2) - 3.0)
    } else {
        None
    }
}
