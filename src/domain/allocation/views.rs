//! Investor views for the Black-Litterman blend
//!
//! A view is either absolute ("asset 2 will return 7%") or relative
//! ("asset 0 will outperform asset 3 by 2%"). Each view may carry an
//! explicit uncertainty (variance); views without one fall back to the
//! He-Litterman convention when the omega matrix is assembled.

use crate::domain::errors::AllocationError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// The asset at `asset` will return `expected_return` (annualized)
    Absolute {
        asset: usize,
        expected_return: f64,
        variance: Option<f64>,
    },
    /// The `long` asset will outperform the `short` asset by `spread`
    Relative {
        long: usize,
        short: usize,
        spread: f64,
        variance: Option<f64>,
    },
}

impl View {
    fn max_index(&self) -> usize {
        match self {
            View::Absolute { asset, .. } => *asset,
            View::Relative { long, short, .. } => (*long).max(*short),
        }
    }

    fn variance(&self) -> Option<f64> {
        match self {
            View::Absolute { variance, .. } | View::Relative { variance, .. } => *variance,
        }
    }
}

/// An ordered collection of views over a fixed asset universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSet {
    n_assets: usize,
    views: Vec<View>,
}

impl ViewSet {
    pub fn new(n_assets: usize) -> Self {
        Self {
            n_assets,
            views: Vec::new(),
        }
    }

    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Add a view, validating asset indices and uncertainty
    pub fn push(&mut self, view: View) -> Result<(), AllocationError> {
        let index = view.max_index();
        if index >= self.n_assets {
            return Err(AllocationError::ViewOutOfBounds {
                index,
                n_assets: self.n_assets,
            });
        }
        if let Some(variance) = view.variance() {
            if variance <= 0.0 {
                return Err(AllocationError::NonPositiveUncertainty { value: variance });
            }
        }
        self.views.push(view);
        Ok(())
    }

    /// Assemble the view matrices (P, Q, Omega)
    ///
    /// P is k x n linking views to assets, Q the k view returns, and
    /// Omega the k x k diagonal uncertainty matrix. Views without an
    /// explicit variance use diag(tau * P Sigma P') per He-Litterman.
    pub(crate) fn matrices(
        &self,
        covariance: &Array2<f64>,
        tau: f64,
    ) -> Result<(Array2<f64>, Array1<f64>, Array2<f64>), AllocationError> {
        let k = self.views.len();
        let n = self.n_assets;
        if covariance.nrows() != n {
            return Err(AllocationError::DimensionMismatch {
                what: "covariance matrix",
                expected: n,
                actual: covariance.nrows(),
            });
        }

        let mut p = Array2::<f64>::zeros((k, n));
        let mut q = Array1::<f64>::zeros(k);

        for (row, view) in self.views.iter().enumerate() {
            match *view {
                View::Absolute {
                    asset,
                    expected_return,
                    ..
                } => {
                    p[[row, asset]] = 1.0;
                    q[row] = expected_return;
                }
                View::Relative {
                    long,
                    short,
                    spread,
                    ..
                } => {
                    p[[row, long]] = 1.0;
                    p[[row, short]] = -1.0;
                    q[row] = spread;
                }
            }
        }

        // Default uncertainty for each view: the tau-scaled variance the
        // prior itself assigns to that view portfolio.
        let p_sigma_pt = p.dot(covariance).dot(&p.t());
        let mut omega = Array2::<f64>::zeros((k, k));
        for (row, view) in self.views.iter().enumerate() {
            omega[[row, row]] = match view.variance() {
                Some(variance) => variance,
                None => tau * p_sigma_pt[[row, row]],
            };
            if omega[[row, row]] <= 0.0 {
                return Err(AllocationError::NonPositiveUncertainty {
                    value: omega[[row, row]],
                });
            }
        }

        Ok((p, q, omega))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_out_of_bounds_view_rejected() {
        let mut views = ViewSet::new(2);
        let err = views
            .push(View::Absolute {
                asset: 2,
                expected_return: 0.1,
                variance: None,
            })
            .unwrap_err();
        assert!(matches!(err, AllocationError::ViewOutOfBounds { .. }));
    }

    #[test]
    fn test_negative_uncertainty_rejected() {
        let mut views = ViewSet::new(2);
        let err = views
            .push(View::Absolute {
                asset: 0,
                expected_return: 0.1,
                variance: Some(-0.01),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            AllocationError::NonPositiveUncertainty { .. }
        ));
    }

    #[test]
    fn test_matrices_shapes_and_entries() {
        let mut views = ViewSet::new(3);
        views
            .push(View::Absolute {
                asset: 1,
                expected_return: 0.07,
                variance: None,
            })
            .unwrap();
        views
            .push(View::Relative {
                long: 0,
                short: 2,
                spread: 0.02,
                variance: Some(0.001),
            })
            .unwrap();

        let sigma = arr2(&[
            [0.04, 0.01, 0.00],
            [0.01, 0.02, 0.00],
            [0.00, 0.00, 0.03],
        ]);
        let (p, q, omega) = views.matrices(&sigma, 0.05).unwrap();

        assert_eq!(p.shape(), &[2, 3]);
        assert_eq!(p[[0, 1]], 1.0);
        assert_eq!(p[[1, 0]], 1.0);
        assert_eq!(p[[1, 2]], -1.0);
        assert_eq!(q[0], 0.07);
        assert_eq!(q[1], 0.02);

        // First view defaults to tau * sigma_11, second keeps its explicit variance
        assert!((omega[[0, 0]] - 0.05 * 0.02).abs() < 1e-12);
        assert_eq!(omega[[1, 1]], 0.001);
        assert_eq!(omega[[0, 1]], 0.0);
    }
}
