use ljpw_core::errors::{ErrorInfo, LjpwError};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

fn distribution_error(code: &str, err: impl ToString) -> LjpwError {
    LjpwError::Configuration(ErrorInfo::new(code, err.to_string()))
}

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with Bessel's correction. Zero for fewer than
/// two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Quantile of the standard Student t distribution with `df` degrees of
/// freedom.
pub fn t_quantile(p: f64, df: f64) -> Result<f64, LjpwError> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|err| distribution_error("students-t", err))?;
    Ok(dist.inverse_cdf(p))
}

/// Two-sided p-value of a t statistic.
pub fn t_two_sided_p(t: f64, df: f64) -> Result<f64, LjpwError> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|err| distribution_error("students-t", err))?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// `P(X ≤ x)` for `X ~ N(mean, std²)`.
pub fn normal_cdf(x: f64, mean: f64, std: f64) -> Result<f64, LjpwError> {
    let dist = Normal::new(mean, std).map_err(|err| distribution_error("normal", err))?;
    Ok(dist.cdf(x))
}

/// Inverse CDF of `N(mean, std²)`.
pub fn normal_quantile(p: f64, mean: f64, std: f64) -> Result<f64, LjpwError> {
    let dist = Normal::new(mean, std).map_err(|err| distribution_error("normal", err))?;
    Ok(dist.inverse_cdf(p))
}

/// Ordinary least squares fit of `y = slope · x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient of determination; zero when `y` is constant.
    pub r_squared: f64,
    /// Two-sided p-value for a non-zero slope.
    pub p_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    /// Residual degrees of freedom (`n − 2`).
    pub df: usize,
}

/// Fits `ys` against `xs`.
///
/// Requires equal lengths, at least three points and a non-constant `xs`.
/// A zero standard error yields `p = 0` for a non-zero slope and `p = 1`
/// otherwise.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<Regression, LjpwError> {
    if xs.len() != ys.len() {
        return Err(LjpwError::InsufficientData(
            ErrorInfo::new("mismatched-lengths", "regression inputs differ in length")
                .with_context("x", xs.len().to_string())
                .with_context("y", ys.len().to_string()),
        ));
    }
    let n = xs.len();
    if n < 3 {
        return Err(LjpwError::InsufficientData(
            ErrorInfo::new("too-few-points", "regression needs at least three points")
                .with_context("n", n.to_string()),
        ));
    }

    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    if sxx == 0.0 {
        return Err(LjpwError::insufficient_data(
            "degenerate-predictor",
            "predictor values are all identical",
        ));
    }
    let sxy: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();
    let syy: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let sse: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let r_squared = if syy == 0.0 {
        0.0
    } else {
        (1.0 - sse / syy).clamp(0.0, 1.0)
    };

    let df = n - 2;
    let std_err = (sse / df as f64 / sxx).sqrt();
    let p_value = if std_err == 0.0 {
        if slope == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        t_two_sided_p(slope / std_err, df as f64)?
    };

    Ok(Regression {
        slope,
        intercept,
        r_squared,
        p_value,
        std_err,
        df,
    })
}
