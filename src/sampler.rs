//! Monte Carlo π sampler and estimator.
//!
//! # Governing Equations
//!
//! ```text
//! Point:      (x, y) ~ U[0,1) × U[0,1)
//! Inside:     √(x² + y²) ≤ 1
//! Estimator:  π̂ = 4 · inside / total
//! Error:      |π̂ − π| / π · 100   (percent)
//! ```
//!
//! The quarter circle covers `π/4` of the unit square, so by the law of large
//! numbers `π̂ → π` as the number of samples grows.

use crate::engine::rng::SimRng;
use crate::error::PiError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::iter::FusedIterator;

/// A sampled point in the unit square.
///
/// `is_inside` is fixed at construction from the coordinates. Deserializing
/// reads only `x` and `y` and reclassifies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointCoords")]
pub struct Point {
    x: f64,
    y: f64,
    is_inside: bool,
}

impl Point {
    /// Create a point and classify it against the quarter circle.
    ///
    /// Evaluated as `x² + y² ≤ 1` so the classification agrees bit-for-bit
    /// with the squared-distance form at the boundary.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_inside: x * x + y * y <= 1.0,
        }
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Whether the point lies inside (or on) the quarter circle.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        self.is_inside
    }
}

#[derive(Deserialize)]
struct PointCoords {
    x: f64,
    y: f64,
}

impl From<PointCoords> for Point {
    fn from(coords: PointCoords) -> Self {
        Self::new(coords.x, coords.y)
    }
}

/// Aggregate statistics of a run.
///
/// Always derived from `(total_points, inside_circle)` through
/// [`SimulationResult::from_counts`]. Deserializing reads only the counts,
/// rejects `inside_circle > total_points` and recomputes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResultCounts")]
pub struct SimulationResult {
    /// Number of points sampled.
    pub total_points: u64,
    /// Number of sampled points inside the quarter circle.
    pub inside_circle: u64,
    /// `4 · inside / total`, or 0 without samples.
    pub estimated_pi: f64,
    /// Reference value of π.
    pub actual_pi: f64,
    /// Percentage error of the estimate, or 0 without samples.
    pub error: f64,
}

impl SimulationResult {
    /// Derive a result from raw counts.
    ///
    /// `inside` is capped at `total`. With `total == 0` there is no estimate:
    /// both `estimated_pi` and `error` are 0.
    #[must_use]
    pub fn from_counts(total: u64, inside: u64) -> Self {
        debug_assert!(inside <= total, "inside {inside} exceeds total {total}");
        let inside = inside.min(total);
        let estimated_pi = estimate_from(total, inside);
        let error = if total == 0 {
            0.0
        } else {
            error_of(estimated_pi)
        };

        Self {
            total_points: total,
            inside_circle: inside,
            estimated_pi,
            actual_pi: PI,
            error,
        }
    }

    /// The empty result shown before any run and after a reset.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::from_counts(0, 0)
    }

    /// Fraction of points inside the quarter circle.
    #[must_use]
    pub fn inside_ratio(&self) -> f64 {
        if self.total_points == 0 {
            0.0
        } else {
            self.inside_circle as f64 / self.total_points as f64
        }
    }
}

#[derive(Deserialize)]
struct ResultCounts {
    total_points: u64,
    inside_circle: u64,
}

impl TryFrom<ResultCounts> for SimulationResult {
    type Error = PiError;

    fn try_from(counts: ResultCounts) -> Result<Self, Self::Error> {
        if counts.inside_circle > counts.total_points {
            return Err(PiError::serialization(format!(
                "inside_circle {} exceeds total_points {}",
                counts.inside_circle, counts.total_points
            )));
        }
        Ok(Self::from_counts(counts.total_points, counts.inside_circle))
    }
}

impl Default for SimulationResult {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Estimate π from counts. Returns 0 when `total` is 0.
#[must_use]
pub fn estimate_from(total: u64, inside: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    4.0 * inside as f64 / total as f64
}

/// Percentage error of an estimate against π.
#[must_use]
pub fn error_of(estimate: f64) -> f64 {
    ((estimate - PI) / PI * 100.0).abs()
}

/// Source of random points.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: SimRng,
}

impl Sampler {
    /// Create a reproducible sampler.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SimRng::new(seed),
        }
    }

    /// Create a sampler seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SimRng::from_entropy(),
        }
    }

    /// Create from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Master seed of the underlying generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Draw one point uniformly from `[0,1) × [0,1)`.
    pub fn generate_point(&mut self) -> Point {
        draw_point(&mut self.rng)
    }

    /// Draw `n` points and aggregate them.
    ///
    /// Runs synchronously; for very large `n` this blocks the caller.
    pub fn run_batch(&mut self, n: u64) -> SimulationResult {
        let inside = (0..n).fold(0u64, |inside, _| {
            inside + u64::from(self.generate_point().is_inside())
        });
        let result = SimulationResult::from_counts(n, inside);
        tracing::debug!(
            total = n,
            inside,
            estimate = result.estimated_pi,
            "batch complete"
        );
        result
    }

    /// Lazy sequence of exactly `n` points.
    ///
    /// The sequence draws from its own forked stream, so it can outlive the
    /// borrow of the sampler and be pulled across frames.
    #[must_use]
    pub fn incremental(&mut self, n: u64) -> PointSequence {
        PointSequence {
            rng: self.rng.fork(),
            remaining: n,
        }
    }
}

fn draw_point(rng: &mut SimRng) -> Point {
    let x = rng.gen_f64();
    let y = rng.gen_f64();
    Point::new(x, y)
}

/// Finite, non-rewindable sequence of sampled points.
///
/// Yields exactly the requested number of points and then `None` forever.
#[derive(Debug, Clone)]
pub struct PointSequence {
    rng: SimRng,
    remaining: u64,
}

impl PointSequence {
    /// Points not yet produced.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether every point has been produced.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl Iterator for PointSequence {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(draw_point(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for PointSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Equations
    // =========================================================================

    #[test]
    fn test_point_classification() {
        assert!(Point::new(0.0, 0.0).is_inside());
        assert!(Point::new(1.0, 0.0).is_inside(), "boundary counts as inside");
        assert!(Point::new(0.0, 1.0).is_inside());
        assert!(!Point::new(0.8, 0.8).is_inside());
        assert!(!Point::new(0.99, 0.99).is_inside());
    }

    #[test]
    fn test_point_deserialize_reclassifies() {
        let p: Point = serde_json::from_str(r#"{"x":0.9,"y":0.9,"is_inside":true}"#)
            .expect("coordinates parse");
        assert!(!p.is_inside());
        assert_eq!(p, Point::new(0.9, 0.9));

        let q: Point = serde_json::from_str(r#"{"x":0.1,"y":0.2}"#).expect("coordinates parse");
        assert!(q.is_inside());
    }

    #[test]
    fn test_result_deserialize_recomputes_from_counts() {
        let r: SimulationResult = serde_json::from_str(
            r#"{"total_points":4,"inside_circle":3,"estimated_pi":9.0,"actual_pi":3.0,"error":-1.0}"#,
        )
        .expect("counts parse");
        assert_eq!(r, SimulationResult::from_counts(4, 3));
    }

    #[test]
    fn test_result_deserialize_rejects_inside_above_total() {
        let parsed = serde_json::from_str::<SimulationResult>(
            r#"{"total_points":1,"inside_circle":5,"estimated_pi":9.0,"actual_pi":3.0,"error":-1.0}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_json_roundtrip_keeps_invariants() {
        let original = Sampler::new(11).run_batch(500);
        let json = serde_json::to_string(&original).expect("serializes");
        let back: SimulationResult = serde_json::from_str(&json).expect("parses");
        assert_eq!(back, original);
    }

    #[test]
    fn test_point_accessors() {
        let p = Point::new(0.25, 0.5);
        assert!((p.x() - 0.25).abs() < f64::EPSILON);
        assert!((p.y() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_from_zero_total() {
        assert!(estimate_from(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_from_all_inside() {
        assert!((estimate_from(4, 4) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_from_none_inside() {
        assert!(estimate_from(4, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_from_typical_ratio() {
        // 78.5% inside is about π/4
        assert!((estimate_from(1000, 785) - 3.14).abs() < 1e-12);
    }

    #[test]
    fn test_error_of_pi_is_zero() {
        assert!(error_of(PI).abs() < 1e-12);
    }

    #[test]
    fn test_error_of_four() {
        assert!((error_of(4.0) - 27.32).abs() < 0.01, "got {}", error_of(4.0));
    }

    #[test]
    fn test_error_of_is_symmetric() {
        assert!((error_of(PI + 0.1) - error_of(PI - 0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_error_of_zero_estimate() {
        assert!((error_of(0.0) - 100.0).abs() < 1e-12);
    }

    // =========================================================================
    // SimulationResult
    // =========================================================================

    #[test]
    fn test_result_from_counts() {
        let r = SimulationResult::from_counts(1000, 785);
        assert_eq!(r.total_points, 1000);
        assert_eq!(r.inside_circle, 785);
        assert!((r.estimated_pi - 3.14).abs() < 1e-12);
        assert!((r.actual_pi - PI).abs() < f64::EPSILON);
        assert!((r.error - error_of(3.14)).abs() < 1e-12);
    }

    #[test]
    fn test_result_zeroed() {
        let r = SimulationResult::zeroed();
        assert_eq!(r.total_points, 0);
        assert_eq!(r.inside_circle, 0);
        assert!(r.estimated_pi.abs() < f64::EPSILON);
        assert!(r.error.abs() < f64::EPSILON);
        assert!((r.actual_pi - PI).abs() < f64::EPSILON);
        assert_eq!(r, SimulationResult::default());
    }

    #[test]
    fn test_inside_ratio() {
        assert!(SimulationResult::zeroed().inside_ratio().abs() < f64::EPSILON);
        let r = SimulationResult::from_counts(8, 6);
        assert!((r.inside_ratio() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_result_serialization() {
        let r = SimulationResult::from_counts(10, 8);
        let json = serde_json::to_string(&r).expect("serialize");
        assert!(json.contains("\"total_points\":10"));
        assert!(json.contains("estimated_pi"));
    }

    // =========================================================================
    // Sampler
    // =========================================================================

    #[test]
    fn test_generate_point_in_unit_square() {
        let mut sampler = Sampler::new(42);
        for _ in 0..1000 {
            let p = sampler.generate_point();
            assert!((0.0..1.0).contains(&p.x()));
            assert!((0.0..1.0).contains(&p.y()));
            assert_eq!(p.is_inside(), p.x() * p.x() + p.y() * p.y() <= 1.0);
        }
    }

    #[test]
    fn test_run_batch_zero() {
        let mut sampler = Sampler::new(42);
        let r = sampler.run_batch(0);
        assert_eq!(r.total_points, 0);
        assert_eq!(r.inside_circle, 0);
        assert!(r.estimated_pi.abs() < f64::EPSILON);
        assert!(r.estimated_pi.is_finite());
    }

    #[test]
    fn test_run_batch_counts() {
        let mut sampler = Sampler::new(42);
        let r = sampler.run_batch(1000);
        assert_eq!(r.total_points, 1000);
        assert!(r.inside_circle <= r.total_points);
        assert!(r.inside_circle > 0);
    }

    #[test]
    fn test_run_batch_converges() {
        let mut sampler = Sampler::new(42);
        let r = sampler.run_batch(100_000);
        assert!(r.error < 5.0, "error {}% too large", r.error);
    }

    #[test]
    fn test_run_batch_converges_from_entropy() {
        let mut sampler = Sampler::from_entropy();
        let r = sampler.run_batch(100_000);
        assert!(r.error < 5.0, "error {}% too large", r.error);
    }

    #[test]
    fn test_run_batch_reproducible() {
        let mut a = Sampler::new(7);
        let mut b = Sampler::new(7);
        assert_eq!(a.run_batch(5000), b.run_batch(5000));
    }

    #[test]
    fn test_seeds_differ() {
        let mut a = Sampler::new(1);
        let mut b = Sampler::new(2);
        assert_ne!(a.generate_point(), b.generate_point());
    }

    #[test]
    fn test_from_seed() {
        assert_eq!(Sampler::from_seed(Some(5)).seed(), 5);
        let _ = Sampler::from_seed(None);
    }

    // =========================================================================
    // PointSequence
    // =========================================================================

    #[test]
    fn test_incremental_yields_exactly_n() {
        let mut sampler = Sampler::new(42);
        let seq = sampler.incremental(17);
        assert_eq!(seq.count(), 17);
    }

    #[test]
    fn test_incremental_fused_after_completion() {
        let mut sampler = Sampler::new(42);
        let mut seq = sampler.incremental(2);
        assert!(seq.next().is_some());
        assert!(seq.next().is_some());
        assert!(seq.is_exhausted());
        assert!(seq.next().is_none());
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_incremental_zero() {
        let mut sampler = Sampler::new(42);
        let mut seq = sampler.incremental(0);
        assert!(seq.is_exhausted());
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_incremental_size_hint() {
        let mut sampler = Sampler::new(42);
        let mut seq = sampler.incremental(5);
        assert_eq!(seq.size_hint(), (5, Some(5)));
        let _ = seq.next();
        assert_eq!(seq.remaining(), 4);
        assert_eq!(seq.size_hint(), (4, Some(4)));
    }

    #[test]
    fn test_incremental_sequences_are_fresh() {
        let mut sampler = Sampler::new(42);
        let first: Vec<Point> = sampler.incremental(10).collect();
        let second: Vec<Point> = sampler.incremental(10).collect();
        assert_ne!(first, second, "each run gets a new stream");
    }

    #[test]
    fn test_incremental_reproducible() {
        let a: Vec<Point> = Sampler::new(3).incremental(50).collect();
        let b: Vec<Point> = Sampler::new(3).incremental(50).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_incremental_partial_pull() {
        let mut sampler = Sampler::new(42);
        let mut seq = sampler.incremental(10);
        let frame: Vec<Point> = seq.by_ref().take(4).collect();
        assert_eq!(frame.len(), 4);
        assert_eq!(seq.remaining(), 6);
        assert_eq!(seq.count(), 6);
    }
}
