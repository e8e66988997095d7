//! Dense matrix inversion for the allocator
//!
//! Gauss-Jordan elimination with partial pivoting. The matrices involved
//! are covariance-sized (one row per asset), so a direct dense solve is
//! the right tool; pivoting keeps it stable on ill-scaled inputs.

use crate::domain::errors::AllocationError;
use ndarray::Array2;

const PIVOT_EPSILON: f64 = 1e-12;

/// Invert a square matrix
///
/// Fails with `SingularMatrix` when no usable pivot remains.
pub fn invert(m: &Array2<f64>) -> Result<Array2<f64>, AllocationError> {
    let n = m.nrows();
    if m.ncols() != n {
        return Err(AllocationError::NotSquare {
            rows: n,
            cols: m.ncols(),
        });
    }

    let mut a = m.clone();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        // Partial pivot: largest magnitude entry in this column
        let mut pivot_row = col;
        for row in (col + 1)..n {
            if a[[row, col]].abs() > a[[pivot_row, col]].abs() {
                pivot_row = row;
            }
        }
        if a[[pivot_row, col]].abs() < PIVOT_EPSILON {
            return Err(AllocationError::SingularMatrix);
        }
        if pivot_row != col {
            for j in 0..n {
                a.swap([pivot_row, j], [col, j]);
                inv.swap([pivot_row, j], [col, j]);
            }
        }

        let pivot = a[[col, col]];
        for j in 0..n {
            a[[col, j]] /= pivot;
            inv[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[[row, j]] -= factor * a[[col, j]];
                inv[[row, j]] -= factor * inv[[col, j]];
            }
        }
    }

    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_identity_inverts_to_itself() {
        let eye = Array2::<f64>::eye(4);
        let inv = invert(&eye).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((inv[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_known_2x2_inverse() {
        let m = arr2(&[[4.0, 7.0], [2.0, 6.0]]);
        let inv = invert(&m).unwrap();
        // det = 10, inverse = [[0.6, -0.7], [-0.2, 0.4]]
        assert!((inv[[0, 0]] - 0.6).abs() < 1e-12);
        assert!((inv[[0, 1]] + 0.7).abs() < 1e-12);
        assert!((inv[[1, 0]] + 0.2).abs() < 1e-12);
        assert!((inv[[1, 1]] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_product_with_inverse_is_identity() {
        let m = arr2(&[
            [2.0, -1.0, 0.0],
            [-1.0, 2.0, -1.0],
            [0.0, -1.0, 2.0],
        ]);
        let inv = invert(&m).unwrap();
        let product = m.dot(&inv);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (product[[i, j]] - expected).abs() < 1e-10,
                    "product[{},{}] = {}",
                    i,
                    j,
                    product[[i, j]]
                );
            }
        }
    }

    #[test]
    fn test_singular_rejected() {
        let m = arr2(&[[1.0, 2.0], [2.0, 4.0]]);
        assert!(matches!(invert(&m), Err(AllocationError::SingularMatrix)));
    }

    #[test]
    fn test_non_square_rejected() {
        let m = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            invert(&m),
            Err(AllocationError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_pivoting_handles_zero_leading_entry() {
        let m = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let inv = invert(&m).unwrap();
        assert!((inv[[0, 1]] - 1.0).abs() < 1e-12);
        assert!((inv[[1, 0]] - 1.0).abs() < 1e-12);
    }
}
