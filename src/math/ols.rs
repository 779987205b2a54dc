//! Linear least squares solver.
//!
//! Every Levenberg-Marquardt iteration solves a tiny damped normal system
//!
//! ```text
//! (JᵀJ + λ D) δ = -Jᵀe
//! ```
//!
//! for the parameter step `δ`. The system is 2×2 but can be close to singular when
//! the weighted points barely constrain one coefficient (few points, or all weight
//! concentrated on a single `x`). SVD keeps the solve robust in that regime.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-14, 1e-12, 1e-10] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn damped_rank_one_system_is_solvable() {
        // JᵀJ of a single point is rank one; Marquardt damping restores full rank.
        let g = [0.3, -0.7];
        let lambda = 1e-3;
        let mut a = DMatrix::from_fn(2, 2, |i, j| g[i] * g[j]);
        for i in 0..2 {
            a[(i, i)] += lambda * a[(i, i)];
        }
        let rhs = DVector::from_row_slice(&[-0.3, 0.7]);

        let step = solve_least_squares(&a, &rhs).unwrap();
        assert!(step.iter().all(|v| v.is_finite()));
        let back = &a * &step;
        assert!((back[0] - rhs[0]).abs() < 1e-8);
        assert!((back[1] - rhs[1]).abs() < 1e-8);
    }
}
