//! Plant models: the simulated subsystems a feedback loop drives.
//!
//! Every plant maps one control input to one observed output per step and
//! clamps that output into its physical range before returning it.
//!
//! - [`Buffer`]: work queue fed through a ready pool, with random transfers
//! - [`Cache`]: hit rate as a saturating function of cache size
//! - [`SpeedSystem`]: speed regulator with decay when unpowered
//! - [`OnOffSpeedSystem`]: speed regulator nudged up or down by one unit

pub mod buffer;
pub mod cache;
pub mod common;
pub mod error;
pub mod random;
pub mod speed;
pub mod traits;

pub use buffer::Buffer;
pub use cache::Cache;
pub use error::{PlantError, PlantResult};
pub use random::{ScriptedSource, SeededRng, UniformSource};
pub use speed::{OnOffSpeedSystem, SpeedSystem};
pub use traits::Plant;
