//! Box space.
use crate::error::ReducedEnvError;
use anyhow::Result;
use ndarray::{Array1, Zip};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fmt;

/// A box in `R^n` with per-dimension bounds and its own sampler.
///
/// Cloning the space also clones the state of the sampler.
#[derive(Clone)]
pub struct BoxSpace {
    low: Array1<f32>,
    high: Array1<f32>,
    rng: SmallRng,
}

impl fmt::Debug for BoxSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxSpace")
            .field("low", &self.low)
            .field("high", &self.high)
            .finish()
    }
}

impl PartialEq for BoxSpace {
    /// Two spaces are equal if their bounds are; the sampler state is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.low == other.low && self.high == other.high
    }
}

impl BoxSpace {
    /// Constructs a box with the given bounds.
    pub fn new(low: Array1<f32>, high: Array1<f32>) -> Result<Self> {
        if low.len() != high.len() {
            return Err(ReducedEnvError::InvalidBounds(format!(
                "low has {} elements and high has {}",
                low.len(),
                high.len()
            ))
            .into());
        }
        if low.iter().chain(high.iter()).any(|v| v.is_nan()) {
            return Err(ReducedEnvError::InvalidBounds(format!(
                "NaN in bounds: low {}, high {}",
                low, high
            ))
            .into());
        }
        if low.iter().zip(high.iter()).any(|(l, h)| l > h) {
            return Err(
                ReducedEnvError::InvalidBounds(format!("low {} exceeds high {}", low, high)).into(),
            );
        }

        Ok(Self {
            low,
            high,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Constructs `[-bound, bound]^dim`.
    pub fn symmetric(dim: usize, bound: f32) -> Self {
        let bound = bound.abs();
        Self {
            low: Array1::from_elem(dim, -bound),
            high: Array1::from_elem(dim, bound),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Lower bounds.
    pub fn low(&self) -> &Array1<f32> {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &Array1<f32> {
        &self.high
    }

    /// Shape of elements in the space.
    pub fn shape(&self) -> Vec<usize> {
        vec![self.low.len()]
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Returns `true` if `x` lies in the box.
    pub fn contains(&self, x: &Array1<f32>) -> bool {
        x.len() == self.dim()
            && Zip::from(x)
                .and(&self.low)
                .and(&self.high)
                .all(|&v, &l, &h| l <= v && v <= h)
    }

    /// Seeds the sampler.
    pub fn seed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Draws a point from the box.
    ///
    /// Bounded dimensions are drawn uniformly. A dimension unbounded on both
    /// sides is drawn from the standard normal distribution, and a dimension
    /// bounded on one side only is drawn from the bound plus (or minus) a
    /// unit exponential variate.
    pub fn sample(&mut self) -> Array1<f32> {
        let rng = &mut self.rng;
        Zip::from(&self.low)
            .and(&self.high)
            .map_collect(|&l, &h| sample_interval(rng, l, h))
    }
}

fn sample_interval(rng: &mut SmallRng, l: f32, h: f32) -> f32 {
    match (l.is_finite(), h.is_finite()) {
        _ if l >= h => l,
        (true, true) => {
            // In f64 so that `h - l` does not overflow for extreme f32 bounds.
            let (l64, h64) = (l as f64, h as f64);
            let x = l64 + rng.gen::<f64>() * (h64 - l64);
            (x as f32).max(l).min(h)
        }
        (true, false) => l + exponential(rng),
        (false, true) => h - exponential(rng),
        (false, false) => standard_normal(rng),
    }
}

fn open_unit(rng: &mut SmallRng) -> f64 {
    // Uniform in (0, 1].
    1.0 - rng.gen::<f64>()
}

fn exponential(rng: &mut SmallRng) -> f32 {
    (-open_unit(rng).ln()) as f32
}

fn standard_normal(rng: &mut SmallRng) -> f32 {
    // Box-Muller.
    let r = (-2.0 * open_unit(rng).ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
    (r * theta.cos()) as f32
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_symmetric() {
        let space = BoxSpace::symmetric(6, 1.0);
        assert_eq!(space.shape(), vec![6]);
        assert_eq!(space.low(), &Array1::from_elem(6, -1.0f32));
        assert_eq!(space.high(), &Array1::from_elem(6, 1.0f32));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(BoxSpace::new(arr1(&[0.0, 0.0]), arr1(&[1.0])).is_err());
        assert!(BoxSpace::new(arr1(&[1.0]), arr1(&[0.0])).is_err());
        assert!(BoxSpace::new(arr1(&[0.0]), arr1(&[0.0])).is_ok());
    }

    #[test]
    fn test_sample_in_bounds() -> Result<()> {
        let mut space = BoxSpace::new(arr1(&[-1.0, 0.0, 2.0]), arr1(&[1.0, 0.5, 2.0]))?;
        space.seed(0);
        for _ in 0..100 {
            let x = space.sample();
            assert!(space.contains(&x), "{} out of bounds", x);
            assert_eq!(x[2], 2.0);
        }
        Ok(())
    }

    #[test]
    fn test_nan_bounds_rejected() {
        assert!(BoxSpace::new(arr1(&[f32::NAN]), arr1(&[0.0])).is_err());
        assert!(BoxSpace::new(arr1(&[0.0]), arr1(&[f32::NAN])).is_err());
    }

    #[test]
    fn test_sample_unbounded() -> Result<()> {
        let inf = f32::INFINITY;
        let mut space = BoxSpace::new(
            arr1(&[-inf, 1.0, -inf, -f32::MAX]),
            arr1(&[inf, inf, -1.0, f32::MAX]),
        )?;
        space.seed(7);
        for _ in 0..200 {
            let x = space.sample();
            assert!(x.iter().all(|v| v.is_finite()), "{} not finite", x);
            assert!(space.contains(&x), "{} out of bounds", x);
            assert!(x[1] >= 1.0);
            assert!(x[2] <= -1.0);
        }
        Ok(())
    }

    #[test]
    fn test_sample_standard_normal_spread() -> Result<()> {
        let inf = f32::INFINITY;
        let mut space = BoxSpace::new(arr1(&[-inf]), arr1(&[inf]))?;
        space.seed(0);
        let n = 2000;
        let xs: Vec<f32> = (0..n).map(|_| space.sample()[0]).collect();
        let mean = xs.iter().sum::<f32>() / n as f32;
        let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.2, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.3, "var {}", var);
        Ok(())
    }

    #[test]
    fn test_seeded_samples_repeat() {
        let mut s1 = BoxSpace::symmetric(2, 1.0);
        let mut s2 = BoxSpace::symmetric(2, 1.0);
        s1.seed(42);
        s2.seed(42);
        assert_eq!(s1.sample(), s2.sample());
        assert_eq!(s1.sample(), s2.sample());
    }

    #[test]
    fn test_contains_checks_length() {
        let space = BoxSpace::symmetric(2, 1.0);
        assert!(!space.contains(&arr1(&[0.0, 0.0, 0.0])));
        assert!(!space.contains(&arr1(&[0.0, 1.5])));
        assert!(space.contains(&arr1(&[-1.0, 1.0])));
    }
}
