//! ECDF point construction.
//!
//! For `l` ascending distances the i-th sample (1-indexed) gets the survival
//! fraction `1 - i/(l+1)`. Two boundary points anchor the curve: `(0, 1)` in front
//! and `(FAR_DISTANCE, 0)` at the end. Every point is weighted by `x²`, so the
//! origin anchor carries no weight and far distances dominate the fit.

/// Far anchor on the normalised distance scale.
pub const FAR_DISTANCE: f64 = 1.0;

/// Weighted ECDF points for one class, as parallel arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct EcdfPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub w: Vec<f64>,
}

impl EcdfPoints {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of real samples (boundary points excluded).
    pub fn sample_count(&self) -> usize {
        self.x.len().saturating_sub(2)
    }
}

/// Build ECDF points from ascending distances.
///
/// The input vector is consumed and becomes `x` with the boundary points inserted
/// in place. An empty input is valid and yields only the two anchors.
pub fn build_ecdf(mut distances: Vec<f64>) -> EcdfPoints {
    let l = distances.len();
    let denom = (l + 1) as f64;

    let mut y = Vec::with_capacity(l + 2);
    y.push(1.0);
    y.extend((1..=l).map(|i| 1.0 - i as f64 / denom));
    y.push(0.0);

    distances.insert(0, 0.0);
    distances.push(FAR_DISTANCE);

    let w = distances.iter().map(|x| x * x).collect();
    EcdfPoints { x: distances, y, w }
}
