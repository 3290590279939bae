use smartcore::{
    linalg::basic::{arrays::Array, matrix::DenseMatrix},
    linear::linear_regression::{
        LinearRegression, LinearRegressionParameters, LinearRegressionSolverName,
    },
    metrics::r2,
};

use crate::error::{EsError, EsResult};

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

const BETACF_MAX_ITERATIONS: usize = 300;
const BETACF_EPSILON: f64 = 1e-15;
const BETACF_FPMIN: f64 = 1e-300;

/// Simple regression of `ys` on `xs`, returning `(slope, intercept, r2)`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> EsResult<(f64, f64, f64)> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(EsError::InsufficientData {
            code: "REGRESSION_SHAPE",
            message: format!(
                "Regression needs at least 2 paired values, got {} and {}",
                xs.len(),
                ys.len()
            ),
        });
    }

    let features: Vec<Vec<f64>> = xs.iter().map(|x| vec![*x]).collect();
    let x = DenseMatrix::from_2d_array(
        &features
            .iter()
            .map(|v| v.as_slice())
            .collect::<Vec<&[f64]>>(),
    )
    .map_err(|err| EsError::MachineLearningError(err.to_string()))?;
    let y: Vec<f64> = ys.to_vec();

    let parameters =
        LinearRegressionParameters::default().with_solver(LinearRegressionSolverName::QR);
    let model = LinearRegression::fit(&x, &y, parameters)
        .map_err(|err| EsError::MachineLearningError(err.to_string()))?;
    let slope = *model.coefficients().get((0, 0));

    let origin = DenseMatrix::from_2d_array(&[&[0.0][..]])
        .map_err(|err| EsError::MachineLearningError(err.to_string()))?;
    let intercept = model
        .predict(&origin)
        .map_err(|err| EsError::MachineLearningError(err.to_string()))?
        .first()
        .copied()
        .unwrap_or(0.0);

    let y_pred = model
        .predict(&x)
        .map_err(|err| EsError::MachineLearningError(err.to_string()))?;
    let r2_score = r2(&y, &y_pred);

    Ok((slope, intercept, r2_score))
}

/// Natural log of the gamma function for `x > 0` (Lanczos approximation).
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula
        let pi = std::f64::consts::PI;
        (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut a = LANCZOS_COEFFICIENTS[0];
        let t = x + LANCZOS_G + 0.5;
        for (i, c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }

        0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
    }
}

/// Regularized incomplete beta function `I_x(a, b)`.
pub fn incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // The continued fraction converges quickly only below this point
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(x, a, b) / a
    } else {
        1.0 - front * beta_continued_fraction(1.0 - x, b, a) / b
    }
}

/// Two-tailed p-value of a Student's t statistic with `df` degrees of freedom.
pub fn student_t_two_tailed_p(t: f64, df: f64) -> f64 {
    if t.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }

    incomplete_beta(df / (df + t * t), df / 2.0, 0.5).clamp(0.0, 1.0)
}

fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < BETACF_FPMIN {
        d = BETACF_FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=BETACF_MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < BETACF_FPMIN {
            d = BETACF_FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < BETACF_FPMIN {
            c = BETACF_FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < BETACF_FPMIN {
            d = BETACF_FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < BETACF_FPMIN {
            c = BETACF_FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < BETACF_EPSILON {
            break;
        }
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_regression() {
        let (slope, intercept, r2_score) =
            linear_regression(&[1.0, 2.0, 3.0, 4.0], &[3.0, 5.0, 7.0, 9.0]).unwrap();

        assert!((slope - 2.0).abs() < 1e-6);
        assert!((intercept - 1.0).abs() < 1e-6);
        assert!((r2_score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_regression_shape() {
        assert!(linear_regression(&[1.0], &[1.0]).is_err());
        assert!(linear_regression(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_ln_gamma() {
        assert!(ln_gamma(1.0).abs() < 1e-12);
        assert!(ln_gamma(2.0).abs() < 1e-12);
        assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-12);
        assert!((ln_gamma(0.5) - std::f64::consts::PI.sqrt().ln()).abs() < 1e-12);
    }

    #[test]
    fn test_incomplete_beta() {
        assert_eq!(incomplete_beta(0.0, 2.0, 3.0), 0.0);
        assert_eq!(incomplete_beta(1.0, 2.0, 3.0), 1.0);
        assert!((incomplete_beta(0.3, 1.0, 1.0) - 0.3).abs() < 1e-12);
        // I_x(1, b) = 1 - (1 - x)^b
        assert!((incomplete_beta(0.4, 1.0, 0.5) - (1.0 - 0.6_f64.sqrt())).abs() < 1e-12);
        // Symmetry: I_x(a, b) = 1 - I_(1-x)(b, a)
        let lhs = incomplete_beta(0.35, 2.5, 4.0);
        let rhs = 1.0 - incomplete_beta(0.65, 4.0, 2.5);
        assert!((lhs - rhs).abs() < 1e-12);
    }

    #[test]
    fn test_student_t_two_tailed_p() {
        // df = 1 is the Cauchy distribution
        let t: f64 = 1.7;
        let expected = 1.0 - 2.0 / std::f64::consts::PI * t.atan();
        assert!((student_t_two_tailed_p(t, 1.0) - expected).abs() < 1e-10);

        // df = 2 has a closed form
        let t: f64 = -2.3;
        let expected = 1.0 - t.abs() / (2.0 + t * t).sqrt();
        assert!((student_t_two_tailed_p(t, 2.0) - expected).abs() < 1e-10);

        assert_eq!(student_t_two_tailed_p(0.0, 10.0), 1.0);
        assert_eq!(student_t_two_tailed_p(f64::INFINITY, 10.0), 0.0);
        assert!((student_t_two_tailed_p(2.0, 10.0) - 0.073_388_034_770_740_4).abs() < 1e-10);
        assert!((student_t_two_tailed_p(1.2, 30.0) - 0.239_530_350_889_662).abs() < 1e-10);
        assert!((student_t_two_tailed_p(-3.5, 5.0) - 0.017_284_431_785_293_4).abs() < 1e-10);
    }
}
