//! Return-series statistics shared across the analytics modules
//!
//! Provides:
//! - Simple and logarithmic returns from price series
//! - Sample covariance, correlation and covariance matrices
//! - Skewness (distribution asymmetry)
//! - Annualization helpers (252 trading days)

use ndarray::Array2;
use statrs::statistics::{Data, Distribution};

/// Trading days per year used for annualization
pub const TRADING_DAYS: f64 = 252.0;

/// Simple (arithmetic) returns: r_t = (p_t - p_{t-1}) / p_{t-1}
///
/// Non-positive prices are skipped so a corrupt bar cannot produce
/// an infinite return.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(prices.len().saturating_sub(1));
    for i in 1..prices.len() {
        if prices[i - 1] > 0.0 && prices[i] > 0.0 {
            returns.push((prices[i] - prices[i - 1]) / prices[i - 1]);
        }
    }
    returns
}

/// Logarithmic returns: r_t = ln(p_t / p_{t-1})
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(prices.len().saturating_sub(1));
    for i in 1..prices.len() {
        if prices[i - 1] > 0.0 && prices[i] > 0.0 {
            returns.push((prices[i] / prices[i - 1]).ln());
        }
    }
    returns
}

/// Mean and standard deviation of a series (f64 boundary for the statistical library)
///
/// Returns `None` for an empty series.
pub fn mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let data = Data::new(values.to_vec());
    let mean = data.mean()?;
    let std_dev = data.std_dev()?;
    Some((mean, std_dev))
}

/// Sample covariance between two aligned series (n-1 denominator)
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let cov = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum::<f64>()
        / (n - 1.0);

    Some(cov)
}

/// Pearson correlation coefficient between two aligned series
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut x_denom = 0.0;
    let mut y_denom = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        numerator += (xi - x_mean) * (yi - y_mean);
        x_denom += (xi - x_mean).powi(2);
        y_denom += (yi - y_mean).powi(2);
    }

    let denom = (x_denom * y_denom).sqrt();
    if denom < 1e-12 {
        return None;
    }
    Some(numerator / denom)
}

/// Sample covariance matrix from aligned return series (one row of input per asset)
///
/// All series must have the same length >= 2. Returns `None` otherwise.
pub fn covariance_matrix(series: &[Vec<f64>]) -> Option<Array2<f64>> {
    let n_assets = series.len();
    if n_assets == 0 {
        return None;
    }
    let len = series[0].len();
    if len < 2 || series.iter().any(|s| s.len() != len) {
        return None;
    }

    let mut cov = Array2::<f64>::zeros((n_assets, n_assets));
    for i in 0..n_assets {
        for j in i..n_assets {
            let c = covariance(&series[i], &series[j])?;
            cov[[i, j]] = c;
            cov[[j, i]] = c;
        }
    }
    Some(cov)
}

/// Calculate skewness of a distribution
///
/// - Skew = 0: symmetric distribution
/// - Skew > 0: right tail (positive outliers)
/// - Skew < 0: left tail (negative outliers)
pub fn skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev < 1e-10 {
        return None;
    }

    let skew = values
        .iter()
        .map(|v| ((v - mean) / std_dev).powi(3))
        .sum::<f64>()
        / n;

    Some(skew)
}

/// Annualize a mean daily return
pub fn annualize_return(mean_daily: f64) -> f64 {
    mean_daily * TRADING_DAYS
}

/// Annualize a daily volatility
pub fn annualize_volatility(daily_std: f64) -> f64 {
    daily_std * TRADING_DAYS.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_returns() {
        let prices = vec![100.0, 110.0, 99.0];
        let returns = simple_returns(&prices);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_log_returns_skip_bad_prices() {
        let prices = vec![100.0, 0.0, 110.0];
        let returns = log_returns(&prices);
        // Both transitions touch the zero bar, so both are dropped
        assert!(returns.is_empty());
    }

    #[test]
    fn test_correlation_perfect() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let corr = correlation(&x, &y).unwrap();
        assert!((corr - 1.0).abs() < 1e-10);

        let y_inv = vec![8.0, 6.0, 4.0, 2.0];
        let corr = correlation(&x, &y_inv).unwrap();
        assert!((corr + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_covariance_matrix_symmetric() {
        let series = vec![
            vec![0.01, -0.02, 0.03, 0.00],
            vec![0.02, 0.01, -0.01, 0.01],
        ];
        let cov = covariance_matrix(&series).unwrap();
        assert_eq!(cov.nrows(), 2);
        assert!((cov[[0, 1]] - cov[[1, 0]]).abs() < 1e-15);
        assert!(cov[[0, 0]] > 0.0);
    }

    #[test]
    fn test_covariance_matrix_ragged_rejected() {
        let series = vec![vec![0.01, 0.02], vec![0.01]];
        assert!(covariance_matrix(&series).is_none());
    }

    #[test]
    fn test_skewness_positive() {
        let values = vec![1.0, 1.0, 1.0, 1.0, 10.0];
        assert!(skewness(&values).unwrap() > 0.0);
    }

    #[test]
    fn test_mean_std() {
        let (mean, std) = mean_std(&[2.0, 4.0, 6.0]).unwrap();
        assert!((mean - 4.0).abs() < 1e-12);
        assert!(std > 0.0);
    }
}
