//! Synthetic per-class distance generation.
//!
//! Each class draws its distances from a Beta distribution on `[0, 1]`, the
//! normalised distance scale, with the shape varying by class so the classes
//! prefer different sigmoid steepness and location. A small fraction of draws is
//! replaced by uniform outliers.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Beta;

use crate::domain::ClassDistances;
use crate::error::AppError;

/// Settings for synthetic generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub classes: usize,
    pub samples_per_class: usize,
    pub seed: u64,
    /// Probability that a draw is replaced by a uniform outlier.
    pub outlier_prob: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            classes: 4,
            samples_per_class: 200,
            seed: 42,
            outlier_prob: 0.02,
        }
    }
}

/// Generate sorted distances for `config.classes` classes named `class-01`, ...
pub fn generate_classes(config: &SampleConfig) -> Result<ClassDistances, AppError> {
    if config.classes == 0 {
        return Err(AppError::new(2, "Class count must be > 0."));
    }
    if !(0.0..1.0).contains(&config.outlier_prob) {
        return Err(AppError::new(2, "Outlier probability must be in [0, 1)."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut out = ClassDistances::with_capacity(config.classes);

    for i in 0..config.classes {
        let (a, b) = class_shape(i);
        let beta = Beta::new(a, b)
            .map_err(|e| AppError::new(4, format!("Distance distribution error: {e}")))?;

        let mut distances: Vec<f64> = (0..config.samples_per_class)
            .map(|_| {
                if rng.gen_bool(config.outlier_prob) {
                    rng.gen_range(0.0..1.0)
                } else {
                    beta.sample(&mut rng)
                }
            })
            .collect();
        distances.sort_by(f64::total_cmp);

        out.insert(format!("class-{:02}", i + 1), distances);
    }

    Ok(out)
}

/// Beta shape parameters for the i-th class.
fn class_shape(i: usize) -> (f64, f64) {
    let step = (i % 6) as f64;
    (2.0 + 1.5 * step, 6.0 - 0.5 * step)
}
