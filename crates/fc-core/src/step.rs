//! Discrete simulation step index.

/// Index of one simulation tick. Step 0 is the seed observation.
pub type Step = u64;
