//! Constrained Poisson disk sampling.
//!
//! Grid-accelerated dart throwing (Bridson style) restricted to a [`Region`]. Because the
//! region may not contain the domain center, seeding sweeps left and right from an anchor
//! at a fraction of the domain width. When the active list drains before the sweep has
//! crossed the domain, seeding resumes from where it stopped, so disconnected islands of
//! the region are found as well.
use std::f32::consts::TAU;
use std::iter::FusedIterator;

use glam::Vec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::sampling::grid::BackgroundGrid;
use crate::sampling::region::{Everywhere, Region};
use crate::sampling::{rand01, rand_index, rand_sign, PointSource};

/// Poisson disk sampling parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in world units.
    pub min_distance: f32,
    /// Candidate attempts per active sample (and per seed batch) before giving up on it.
    pub max_attempts: usize,
    /// Horizontal seed anchor as a fraction of the domain width.
    pub seed_anchor: f32,
    /// Growth of the horizontal seed offset after each unsuccessful seed batch.
    pub seed_step: f32,
}

impl PoissonDiskSampling {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 30;
    pub const DEFAULT_SEED_ANCHOR: f32 = 0.4;
    pub const DEFAULT_SEED_STEP: f32 = 10.0;

    /// Create a new PoissonDiskSampling with the given minimum distance and default settings.
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            seed_anchor: Self::DEFAULT_SEED_ANCHOR,
            seed_step: Self::DEFAULT_SEED_STEP,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_seed_anchor(mut self, seed_anchor: f32) -> Self {
        self.seed_anchor = seed_anchor;
        self
    }

    pub fn with_seed_step(mut self, seed_step: f32) -> Self {
        self.seed_step = seed_step;
        self
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_distance must be finite and > 0, got {}",
                self.min_distance
            )));
        }
        if !(0.0..=1.0).contains(&self.seed_anchor) {
            return Err(Error::InvalidConfig(format!(
                "seed_anchor must be within [0, 1], got {}",
                self.seed_anchor
            )));
        }
        if !self.seed_step.is_finite() || self.seed_step <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "seed_step must be finite and > 0, got {}",
                self.seed_step
            )));
        }
        Ok(())
    }

    /// Creates a lazy sampler over `bounds` constrained to `region`.
    pub fn sampler<G: Region>(&self, bounds: Bounds, region: G) -> Result<PoissonDiskSampler<G>> {
        PoissonDiskSampler::new(self.clone(), bounds, region)
    }

    /// Samples until exhaustion and returns every accepted point in acceptance order.
    pub fn generate<G: Region>(
        &self,
        bounds: Bounds,
        region: G,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Vec2>> {
        let mut sampler = self.sampler(bounds, region)?;
        Ok(sampler.generate(rng))
    }
}

impl Default for PoissonDiskSampling {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Counters describing a sampling run so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    /// Points accepted and yielded.
    pub accepted: usize,
    /// Candidates outside the bounds.
    pub rejected_bounds: usize,
    /// Candidates inside the bounds but outside the region.
    pub rejected_region: usize,
    /// Candidates closer than the minimum distance to an accepted point.
    pub rejected_neighbor: usize,
    /// Completed seed batches that moved the sweep outward.
    pub seed_batches: usize,
    /// Seeding passes that found a new disconnected area.
    pub islands: usize,
}

impl SamplerStats {
    pub fn rejected(&self) -> usize {
        self.rejected_bounds + self.rejected_region + self.rejected_neighbor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Seeding,
    Growing,
    Exhausted,
}

/// State of one sampling run.
///
/// Produces points one at a time via [`PoissonDiskSampler::next_point`]; every yielded point
/// is inside the bounds, inside the region, and at least `min_distance` away from all points
/// yielded before it.
pub struct PoissonDiskSampler<G = Everywhere> {
    config: PoissonDiskSampling,
    bounds: Bounds,
    region: G,
    radius_squared: f32,
    grid: BackgroundGrid,
    points: Vec<Vec2>,
    active: Vec<usize>,
    seed_batch: u64,
    seed_attempt: usize,
    seed_pass_accepted: bool,
    phase: Phase,
    stats: SamplerStats,
}

impl<G: Region> PoissonDiskSampler<G> {
    pub fn new(config: PoissonDiskSampling, bounds: Bounds, region: G) -> Result<Self> {
        config.validate()?;
        bounds.validate()?;

        let phase = if config.max_attempts == 0 {
            Phase::Exhausted
        } else {
            Phase::Seeding
        };

        Ok(Self {
            radius_squared: config.min_distance * config.min_distance,
            grid: BackgroundGrid::new(&bounds, config.min_distance)?,
            config,
            bounds,
            region,
            points: Vec::new(),
            active: Vec::new(),
            seed_batch: 0,
            seed_attempt: 0,
            seed_pass_accepted: false,
            phase,
            stats: SamplerStats::default(),
        })
    }

    pub fn config(&self) -> &PoissonDiskSampling {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn region(&self) -> &G {
        &self.region
    }

    pub fn grid(&self) -> &BackgroundGrid {
        &self.grid
    }

    /// All points accepted so far, in acceptance order.
    pub fn accepted(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of accepted points still eligible to spawn candidates.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::Exhausted
    }

    /// Produces the next accepted point, or `None` once no more points can be found.
    pub fn next_point(&mut self, rng: &mut dyn RngCore) -> Option<Vec2> {
        loop {
            match self.phase {
                Phase::Seeding => {
                    if self.seed_attempt == 0 {
                        if !self.active.is_empty() {
                            self.phase = Phase::Growing;
                            continue;
                        }
                        if self.seed_offset() >= self.bounds.width() {
                            self.finish();
                            return None;
                        }
                        trace!("Seed batch at offset {}.", self.seed_offset());
                    }

                    while self.seed_attempt < self.config.max_attempts {
                        self.seed_attempt += 1;
                        let candidate = self.seed_candidate(rng);
                        if self.try_accept(candidate, rng) {
                            if !self.seed_pass_accepted {
                                self.seed_pass_accepted = true;
                                self.stats.islands += 1;
                            }
                            return Some(candidate);
                        }
                    }

                    self.seed_attempt = 0;
                    self.seed_batch += 1;
                    self.stats.seed_batches += 1;
                }
                Phase::Growing => {
                    if self.active.is_empty() {
                        debug!(
                            "Active list drained after {} points; resuming seed sweep at offset {}.",
                            self.points.len(),
                            self.seed_offset()
                        );
                        self.phase = Phase::Seeding;
                        self.seed_pass_accepted = false;
                        continue;
                    }

                    let slot = rand_index(rng, self.active.len());
                    let origin = self.points[self.active[slot]];
                    for _ in 0..self.config.max_attempts {
                        let candidate = self.candidate_around(origin, rng);
                        if self.try_accept(candidate, rng) {
                            return Some(candidate);
                        }
                    }
                    self.active.swap_remove(slot);
                }
                Phase::Exhausted => return None,
            }
        }
    }

    /// Iterator adapter pulling from this sampler with `rng`.
    pub fn points<'a>(&'a mut self, rng: &'a mut dyn RngCore) -> Points<'a, G> {
        Points { sampler: self, rng }
    }

    /// Drains the sampler to exhaustion.
    pub fn generate(&mut self, rng: &mut dyn RngCore) -> Vec<Vec2> {
        self.points(rng).collect()
    }

    fn seed_offset(&self) -> f32 {
        (self.seed_batch as f64 * self.config.seed_step as f64) as f32
    }

    fn seed_candidate(&self, rng: &mut dyn RngCore) -> Vec2 {
        let anchor_x = self.bounds.min.x + self.bounds.width() * self.config.seed_anchor;
        let x = anchor_x + self.seed_offset() * rand_sign(rng);
        let y = self.bounds.min.y + rand01(rng) * self.bounds.height();
        Vec2::new(x, y)
    }

    fn candidate_around(&self, origin: Vec2, rng: &mut dyn RngCore) -> Vec2 {
        let angle = rand01(rng) * TAU;
        let distance = self.config.min_distance * (1.0 + rand01(rng));
        origin + Vec2::from_angle(angle) * distance
    }

    fn is_far_enough(&self, candidate: Vec2) -> bool {
        self.grid
            .neighbors(candidate)
            .all(|i| self.points[i].distance_squared(candidate) >= self.radius_squared)
    }

    fn try_accept(&mut self, candidate: Vec2, rng: &mut dyn RngCore) -> bool {
        if !self.bounds.contains(candidate) {
            self.stats.rejected_bounds += 1;
            return false;
        }
        if !self.region.contains(candidate, rng) {
            self.stats.rejected_region += 1;
            return false;
        }
        if !self.is_far_enough(candidate) {
            self.stats.rejected_neighbor += 1;
            return false;
        }

        let index = self.points.len();
        self.grid.insert(candidate, index);
        self.points.push(candidate);
        self.active.push(index);
        self.stats.accepted += 1;
        true
    }

    fn finish(&mut self) {
        self.phase = Phase::Exhausted;
        debug!(
            "Poisson sampler exhausted: {} accepted, {} rejected, {} island(s), {} seed batches.",
            self.stats.accepted,
            self.stats.rejected(),
            self.stats.islands,
            self.stats.seed_batches,
        );
    }
}

impl<G: Region> PointSource for PoissonDiskSampler<G> {
    #[inline]
    fn next_point(&mut self, rng: &mut dyn RngCore) -> Option<Vec2> {
        PoissonDiskSampler::next_point(self, rng)
    }
}

/// Iterator over the remaining points of a [`PoissonDiskSampler`].
pub struct Points<'a, G: Region> {
    sampler: &'a mut PoissonDiskSampler<G>,
    rng: &'a mut dyn RngCore,
}

impl<G: Region> Iterator for Points<'_, G> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        self.sampler.next_point(&mut *self.rng)
    }
}

impl<G: Region> FusedIterator for Points<'_, G> {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::region::FnRegion;

    fn pairwise_min_distance(points: &[Vec2]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min = min.min(points[i].distance(points[j]));
            }
        }
        min
    }

    fn in_rect(p: Vec2, min: Vec2, max: Vec2) -> bool {
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    #[test]
    fn unconstrained_square_yields_dozens_of_separated_points() {
        let mut rng = StdRng::seed_from_u64(123);
        let bounds = Bounds::from_extent(100.0, 100.0);
        let points = PoissonDiskSampling::new(10.0)
            .generate(bounds, Everywhere, &mut rng)
            .unwrap();

        assert!(points.len() > 20, "only {} points", points.len());
        assert!(points.len() < 150);
        assert!(pairwise_min_distance(&points) >= 10.0);
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn no_point_is_yielded_twice() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = PoissonDiskSampling::new(3.0)
            .generate(Bounds::from_extent(60.0, 40.0), Everywhere, &mut rng)
            .unwrap();
        let unique: HashSet<(u32, u32)> = points
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        assert_eq!(unique.len(), points.len());
    }

    #[test]
    fn first_point_sits_on_seed_anchor() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new([10.0, 0.0], [110.0, 50.0]);
        let mut sampler = PoissonDiskSampling::new(5.0)
            .sampler(bounds, Everywhere)
            .unwrap();
        let first = sampler.next_point(&mut rng).unwrap();
        assert_eq!(first.x, 10.0 + 100.0 * 0.4);
        assert!((0.0..50.0).contains(&first.y));
    }

    #[test]
    fn always_false_region_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut sampler = PoissonDiskSampling::new(5.0)
            .sampler(
                Bounds::from_extent(100.0, 100.0),
                FnRegion::new(|_: Vec2| false),
            )
            .unwrap();
        assert!(sampler.next_point(&mut rng).is_none());
        assert!(sampler.is_exhausted());
        assert_eq!(sampler.stats().accepted, 0);
        // 100 units wide swept in steps of 10.
        assert_eq!(sampler.stats().seed_batches, 10);
    }

    #[test]
    fn zero_attempts_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sampler = PoissonDiskSampling::new(5.0)
            .with_max_attempts(0)
            .sampler(Bounds::from_extent(100.0, 100.0), Everywhere)
            .unwrap();
        assert!(sampler.is_exhausted());
        assert!(sampler.next_point(&mut rng).is_none());
        assert_eq!(sampler.stats().rejected(), 0);
    }

    #[test]
    fn distance_beyond_diagonal_yields_single_point() {
        let mut rng = StdRng::seed_from_u64(13);
        let points = PoissonDiskSampling::new(500.0)
            .generate(Bounds::from_extent(100.0, 100.0), Everywhere, &mut rng)
            .unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn disconnected_islands_are_both_sampled() {
        let left_min = Vec2::new(5.0, 5.0);
        let left_max = Vec2::new(25.0, 45.0);
        let right_min = Vec2::new(170.0, 5.0);
        let right_max = Vec2::new(195.0, 45.0);
        let region = FnRegion::new(move |p: Vec2| {
            in_rect(p, left_min, left_max) || in_rect(p, right_min, right_max)
        });

        let mut rng = StdRng::seed_from_u64(2024);
        let mut sampler = PoissonDiskSampling::new(4.0)
            .sampler(Bounds::from_extent(200.0, 50.0), region)
            .unwrap();
        let points = sampler.generate(&mut rng);

        assert!(points.iter().any(|p| in_rect(*p, left_min, left_max)));
        assert!(points.iter().any(|p| in_rect(*p, right_min, right_max)));
        assert!(points
            .iter()
            .all(|p| in_rect(*p, left_min, left_max) || in_rect(*p, right_min, right_max)));
        assert!(sampler.stats().islands >= 2);
        assert!(pairwise_min_distance(&points) >= 4.0);
    }

    #[test]
    fn region_only_sees_in_bounds_candidates() {
        let bounds = Bounds::new([-20.0, -10.0], [20.0, 10.0]);
        let region = FnRegion::new(move |p: Vec2| {
            assert!(bounds.contains(p), "region queried outside bounds: {p:?}");
            true
        });
        let mut rng = StdRng::seed_from_u64(17);
        let points = PoissonDiskSampling::new(2.0)
            .generate(bounds, region, &mut rng)
            .unwrap();
        assert!(!points.is_empty());
    }

    #[test]
    fn grid_stays_consistent_with_accepted_log() {
        let mut rng = StdRng::seed_from_u64(31);
        let region = FnRegion::new(|p: Vec2| (p - Vec2::new(50.0, 30.0)).length() < 25.0);
        let mut sampler = PoissonDiskSampling::new(3.0)
            .sampler(Bounds::from_extent(100.0, 60.0), region)
            .unwrap();

        for _ in 0..4 {
            sampler.pull(25, &mut rng);
            let grid = sampler.grid();
            let mut seen = 0;
            for (cell, index) in grid.occupied() {
                assert_eq!(grid.cell_of(sampler.accepted()[index]), cell);
                seen += 1;
            }
            assert_eq!(seen, sampler.accepted().len());
        }
    }

    #[test]
    fn iterator_is_fused_after_exhaustion() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = PoissonDiskSampling::new(20.0)
            .sampler(Bounds::from_extent(50.0, 50.0), Everywhere)
            .unwrap();
        let count = sampler.points(&mut rng).count();
        assert!(count >= 1);
        assert!(sampler.next_point(&mut rng).is_none());
        assert_eq!(sampler.active_len(), 0);
        assert_eq!(sampler.stats().accepted, count);
    }

    #[test]
    fn stats_count_every_rejection_reason() {
        let mut rng = StdRng::seed_from_u64(41);
        let region = FnRegion::new(|p: Vec2| p.y < 20.0);
        let mut sampler = PoissonDiskSampling::new(4.0)
            .sampler(Bounds::from_extent(60.0, 40.0), region)
            .unwrap();
        sampler.generate(&mut rng);
        let stats = sampler.stats();
        assert!(stats.rejected_bounds > 0);
        assert!(stats.rejected_region > 0);
        assert!(stats.rejected_neighbor > 0);
        assert!(stats.islands >= 1);
        assert_eq!(stats.accepted, sampler.accepted().len());
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let bounds = Bounds::from_extent(10.0, 10.0);
        assert!(PoissonDiskSampling::new(0.0)
            .sampler(bounds, Everywhere)
            .is_err());
        assert!(PoissonDiskSampling::new(-1.0)
            .sampler(bounds, Everywhere)
            .is_err());
        assert!(PoissonDiskSampling::new(f32::NAN)
            .sampler(bounds, Everywhere)
            .is_err());
        assert!(PoissonDiskSampling::new(1.0)
            .with_seed_step(0.0)
            .sampler(bounds, Everywhere)
            .is_err());
        assert!(PoissonDiskSampling::new(1.0)
            .with_seed_anchor(1.5)
            .sampler(bounds, Everywhere)
            .is_err());
        assert!(PoissonDiskSampling::new(1.0)
            .sampler(Bounds::new([5.0, 0.0], [5.0, 10.0]), Everywhere)
            .is_err());
        assert!(matches!(
            PoissonDiskSampling::new(1e-3).sampler(Bounds::from_extent(1e6, 1e6), Everywhere),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let sampling = PoissonDiskSampling::new(5.0);
        let bounds = Bounds::from_extent(80.0, 40.0);
        let a = sampling
            .generate(bounds, Everywhere, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = sampling
            .generate(bounds, Everywhere, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn samples_respect_separation_and_containment(
            width in 10.0f32..150.0,
            height in 10.0f32..150.0,
            min_distance in 4.0f32..20.0,
            radius_frac in 0.2f32..0.8,
            seed in any::<u64>(),
        ) {
            let bounds = Bounds::from_extent(width, height);
            let center = bounds.extent() * 0.5;
            let radius = width.min(height) * radius_frac;
            let region = FnRegion::new(move |p: Vec2| p.distance(center) < radius);

            let mut rng = StdRng::seed_from_u64(seed);
            let points = PoissonDiskSampling::new(min_distance)
                .generate(bounds, region, &mut rng)
                .unwrap();

            for p in &points {
                prop_assert!(bounds.contains(*p));
                prop_assert!(p.distance(center) < radius);
            }
            if points.len() > 1 {
                prop_assert!(pairwise_min_distance(&points) >= min_distance - 1e-4);
            }
        }
    }
}
