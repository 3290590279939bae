use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Sturges' rule: `ceil(log2 n) + 1` bins.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        (n as f64).log2().ceil() as usize + 1
    }
}

/// Equal-width bins over `[min, max]`, the maximum lands in the last bin.
pub fn histogram(values: &[f64], bins: Option<usize>) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return vec![];
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min - 0.5,
            upper: max + 0.5,
            count: values.len(),
        }];
    }

    let bins = bins.unwrap_or_else(|| sturges_bins(values.len())).max(1);
    let width = (max - min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in values {
        let i = (((v - min) / width).floor() as usize).min(bins - 1);
        result[i].count += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sturges_bins() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(8), 4);
        assert_eq!(sturges_bins(500), 10);
    }

    #[test]
    fn test_histogram() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN], Some(4));

        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[3].upper, 4.0);
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![1, 1, 1, 2]
        );
        assert_eq!(bins[0].width(), 1.0);
        assert_eq!(bins[1].center(), 1.5);
    }

    #[test]
    fn test_histogram_degenerate() {
        assert!(histogram(&[], None).is_empty());

        let bins = histogram(&[0.2, 0.2, 0.2], None);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }
}
