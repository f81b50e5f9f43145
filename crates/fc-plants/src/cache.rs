//! Cache hit-rate plant.
//!
//! Stateless: the hit rate is `clamp(size / capacity, 0, 1)`. Any notion of an
//! accumulated cache size lives upstream, in the controller's integral term.

use crate::common::{check_input, check_positive};
use crate::error::PlantResult;
use crate::traits::Plant;

/// Cache size at which the hit rate saturates, unless configured otherwise.
pub const DEFAULT_CAPACITY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    capacity: f64,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Cache {
    pub fn new(capacity: f64) -> PlantResult<Self> {
        let capacity = check_positive(capacity, "cache capacity must be positive")?;
        Ok(Self { capacity })
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Hit rate in `[0, 1]` for a cache of the given size.
    pub fn hit_rate(&self, size: f64) -> PlantResult<f64> {
        let size = check_input(size, "cache size")?;
        Ok((size / self.capacity).clamp(0.0, 1.0))
    }
}

impl Plant for Cache {
    fn name(&self) -> &str {
        "cache"
    }

    fn initial_output(&self) -> f64 {
        0.0
    }

    fn step(&mut self, input: f64) -> PlantResult<f64> {
        self.hit_rate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_saturates() {
        let cache = Cache::default();
        assert_eq!(cache.hit_rate(160.0).unwrap(), 1.0);
        assert_eq!(cache.hit_rate(-10.0).unwrap(), 0.0);
        assert_eq!(cache.hit_rate(50.0).unwrap(), 0.5);
    }

    #[test]
    fn custom_capacity() {
        let cache = Cache::new(200.0).unwrap();
        assert_eq!(cache.hit_rate(50.0).unwrap(), 0.25);
        assert!(Cache::new(0.0).is_err());
        assert!(Cache::new(-5.0).is_err());
    }

    #[test]
    fn nan_size_is_domain_error() {
        assert!(Cache::default().hit_rate(f64::NAN).is_err());
        assert!(Cache::default().hit_rate(f64::INFINITY).is_err());
    }
}
