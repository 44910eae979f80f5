//! Initial placement of newly created shapes.

use crate::config::{ConfigError, ConfigResult};
use kurbo::{Point, Rect};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Where a new shape's center lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// Always the same point.
    Fixed { at: Point },
    /// Uniformly random inside `area` (x0..x1, y0..y1, upper bounds excluded).
    Random { area: Rect },
}

impl SpawnPolicy {
    pub(crate) fn validate(&self) -> ConfigResult<()> {
        match self {
            SpawnPolicy::Fixed { .. } => Ok(()),
            SpawnPolicy::Random { area } if area.width() > 0.0 && area.height() > 0.0 => Ok(()),
            SpawnPolicy::Random { area } => Err(ConfigError::Invalid(format!(
                "random spawn area must have positive size, got {area:?}"
            ))),
        }
    }
}

/// Produces spawn positions, owning the random source for random policies.
#[derive(Debug, Clone)]
pub struct Spawner {
    policy: SpawnPolicy,
    rng: SmallRng,
}

impl Spawner {
    /// Create a spawner seeded from a fresh UUID.
    pub fn new(policy: SpawnPolicy) -> Self {
        let seed = uuid::Uuid::new_v4().as_u64_pair().0;
        Self::with_seed(policy, seed)
    }

    /// Create a spawner with a fixed seed (reproducible placement).
    pub fn with_seed(policy: SpawnPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Next spawn position.
    ///
    /// A random area with no extent along an axis yields that axis' lower
    /// edge instead of sampling.
    pub fn next_position(&mut self) -> Point {
        match self.policy {
            SpawnPolicy::Fixed { at } => at,
            SpawnPolicy::Random { area } => Point::new(
                sample(&mut self.rng, area.x0, area.x1),
                sample(&mut self.rng, area.y0, area.y1),
            ),
        }
    }
}

fn sample(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    if lo < hi { rng.random_range(lo..hi) } else { lo.min(hi) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_spawn() {
        let mut spawner = Spawner::new(SpawnPolicy::Fixed {
            at: Point::new(100.0, 100.0),
        });
        assert_eq!(spawner.next_position(), Point::new(100.0, 100.0));
        assert_eq!(spawner.next_position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_random_spawn_stays_in_area() {
        let area = Rect::new(50.0, 50.0, 450.0, 450.0);
        let mut spawner = Spawner::with_seed(SpawnPolicy::Random { area }, 7);
        for _ in 0..500 {
            let p = spawner.next_position();
            assert!(p.x >= 50.0 && p.x < 450.0, "x out of range: {}", p.x);
            assert!(p.y >= 50.0 && p.y < 450.0, "y out of range: {}", p.y);
        }
    }

    #[test]
    fn test_random_spawn_is_reproducible() {
        let area = Rect::new(0.0, 0.0, 400.0, 400.0);
        let mut a = Spawner::with_seed(SpawnPolicy::Random { area }, 42);
        let mut b = Spawner::with_seed(SpawnPolicy::Random { area }, 42);
        for _ in 0..10 {
            assert_eq!(a.next_position(), b.next_position());
        }
    }

    #[test]
    fn test_random_spawn_varies() {
        let area = Rect::new(0.0, 0.0, 400.0, 400.0);
        let mut spawner = Spawner::with_seed(SpawnPolicy::Random { area }, 1);
        let first = spawner.next_position();
        assert!((0..10).any(|_| spawner.next_position() != first));
    }

    #[test]
    fn test_empty_random_area_invalid() {
        let policy = SpawnPolicy::Random {
            area: Rect::new(10.0, 10.0, 10.0, 20.0),
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_empty_random_area_spawns_at_corner() {
        let area = Rect::new(10.0, 10.0, 10.0, 10.0);
        let mut spawner = Spawner::with_seed(SpawnPolicy::Random { area }, 5);
        assert_eq!(spawner.next_position(), Point::new(10.0, 10.0));

        // Degenerate on one axis only.
        let area = Rect::new(0.0, 30.0, 100.0, 30.0);
        let mut spawner = Spawner::with_seed(SpawnPolicy::Random { area }, 5);
        let p = spawner.next_position();
        assert!((0.0..100.0).contains(&p.x));
        assert_eq!(p.y, 30.0);
    }
}
