//! Model evaluation for the five sigmoid families.
//!
//! The fitter relies on two primitive operations:
//! - the residual `r(c, x) = 1 - shape(c[0], c[1], x)` (the fitted survival curve)
//! - its analytic gradient `[∂r/∂k, ∂r/∂alpha]`
//!
//! Every shape is a function of `u = k (x - alpha)`, so with `s'(u)` the slope of
//! the shape in `u`:
//!
//! ```text
//! ∂r/∂k     = -s'(u) (x - alpha)
//! ∂r/∂alpha =  s'(u) k
//! ```

use crate::domain::ModelKind;

fn sech(x: f64) -> f64 {
    1.0 / x.cosh()
}

/// Forward shape `f(k, alpha, x)`.
pub fn shape(model: ModelKind, k: f64, alpha: f64, x: f64) -> f64 {
    shape_at(model, k * (x - alpha))
}

fn shape_at(model: ModelKind, u: f64) -> f64 {
    match model {
        ModelKind::Logistic => 1.0 / (1.0 + (-u).exp()),
        ModelKind::HyperbolicTangent => (u.tanh() + 1.0) / 2.0,
        ModelKind::Arctangent => (u.atan() + 1.0) / 2.0,
        ModelKind::Gudermannian => (2.0 * (u / 2.0).tanh().atan() + 1.0) / 2.0,
        ModelKind::Algebraic => (u / (1.0 + u * u).sqrt() + 1.0) / 2.0,
    }
}

/// `ds/du` in closed form.
fn slope_at(model: ModelKind, u: f64) -> f64 {
    match model {
        ModelKind::Logistic => {
            let s = 1.0 / (1.0 + (-u).exp());
            s * (1.0 - s)
        }
        ModelKind::HyperbolicTangent => {
            let h = sech(u);
            h * h / 2.0
        }
        ModelKind::Arctangent => 1.0 / (2.0 * (1.0 + u * u)),
        ModelKind::Gudermannian => {
            let half = 0.5 * u;
            let h = sech(half);
            let t = half.tanh();
            h * h / (2.0 * (t * t + 1.0))
        }
        ModelKind::Algebraic => {
            let q = 1.0 + u * u;
            1.0 / (2.0 * q * q.sqrt())
        }
    }
}

/// Residual `r(c, x) = 1 - shape(c[0], c[1], x)`.
pub fn residual(model: ModelKind, c: &[f64; 2], x: f64) -> f64 {
    1.0 - shape(model, c[0], c[1], x)
}

/// Analytic gradient `[∂r/∂k, ∂r/∂alpha]` of [`residual`].
pub fn gradient(model: ModelKind, c: &[f64; 2], x: f64) -> [f64; 2] {
    let d = x - c[1];
    let s = slope_at(model, c[0] * d);
    [-s * d, s * c[0]]
}

/// Residual and gradient in one call.
pub fn residual_and_gradient(model: ModelKind, c: &[f64; 2], x: f64) -> (f64, [f64; 2]) {
    (residual(model, c, x), gradient(model, c, x))
}
