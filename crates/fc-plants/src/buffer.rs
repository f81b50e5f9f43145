//! Work-queue plant.
//!
//! Upstream work enters a ready pool. Each step a random share of the ready
//! pool moves into the queue, and a random amount (up to `max_flow`) is
//! released downstream. The observed output is the queue length.

use crate::common::check_input;
use crate::error::{PlantError, PlantResult};
use crate::random::{SeededRng, UniformSource};
use crate::traits::Plant;
use fc_core::round_half_up;

/// Largest accepted capacity. Transfers are computed as `f64` products, which
/// stay exact integers only up to 2^53.
pub const MAX_CAPACITY: u64 = 1 << 53;

#[derive(Debug, Clone)]
pub struct Buffer<R = SeededRng> {
    /// Largest amount of work admitted to the ready pool per step.
    max_wip: u64,
    /// Largest amount released from the queue per step.
    max_flow: u64,
    wip: u64,
    queued: u64,
    rng: R,
}

impl Buffer<SeededRng> {
    /// Create a buffer driven by a seeded pseudo-random source.
    pub fn new(max_wip: u64, max_flow: u64, seed: u64) -> PlantResult<Self> {
        Self::with_source(max_wip, max_flow, SeededRng::new(seed))
    }
}

impl<R: UniformSource> Buffer<R> {
    /// Create a buffer drawing its transfers from `rng`.
    pub fn with_source(max_wip: u64, max_flow: u64, rng: R) -> PlantResult<Self> {
        if max_wip == 0 {
            return Err(PlantError::InvalidArg {
                what: "max_wip must be positive",
            });
        }
        if max_flow == 0 {
            return Err(PlantError::InvalidArg {
                what: "max_flow must be positive",
            });
        }
        if max_wip > MAX_CAPACITY || max_flow > MAX_CAPACITY {
            return Err(PlantError::InvalidArg {
                what: "buffer capacity must not exceed 2^53",
            });
        }
        Ok(Self {
            max_wip,
            max_flow,
            wip: 0,
            queued: 0,
            rng,
        })
    }

    pub fn max_wip(&self) -> u64 {
        self.max_wip
    }

    pub fn max_flow(&self) -> u64 {
        self.max_flow
    }

    /// Items waiting in the ready pool.
    pub fn ready_pool(&self) -> u64 {
        self.wip
    }

    /// Items in the queue.
    pub fn queued(&self) -> u64 {
        self.queued
    }

    /// Admit `u` units of upstream work and advance one step.
    ///
    /// Draw order is fixed: first the ready-pool transfer, then the release.
    pub fn work(&mut self, u: f64) -> PlantResult<u64> {
        let u = check_input(u, "buffer work input")?;

        let admitted = round_half_up(u).clamp(0.0, self.max_wip as f64) as u64;
        let mut wip = grow(self.wip, admitted, "ready pool")?;

        let moved = (round_half_up(self.rng.next_unit() * wip as f64) as u64).min(wip);
        wip -= moved;
        let mut queued = grow(self.queued, moved, "queue")?;

        let released = (round_half_up(self.rng.next_unit() * self.max_flow as f64) as u64)
            .min(self.max_flow)
            .min(queued);
        queued -= released;

        self.wip = wip;
        self.queued = queued;
        Ok(queued)
    }
}

fn grow(current: u64, added: u64, what: &'static str) -> PlantResult<u64> {
    current.checked_add(added).ok_or(PlantError::Domain {
        what,
        value: current as f64 + added as f64,
    })
}

impl<R: UniformSource> Plant for Buffer<R> {
    fn name(&self) -> &str {
        "buffer"
    }

    fn initial_output(&self) -> f64 {
        self.queued as f64
    }

    fn step(&mut self, input: f64) -> PlantResult<f64> {
        self.work(input).map(|q| q as f64)
    }
}
