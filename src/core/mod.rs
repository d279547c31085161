pub mod aggregator;
pub mod aspect;
pub mod classifier;
pub mod engine;
pub mod job;
pub mod packer;
pub mod queue;

pub use crate::domain::model::{PickRow, SheetResult};
pub use crate::domain::ports::{ArtifactResolver, ImageProbe, JobSubmitter, Pipeline, Storage};
pub use crate::utils::error::Result;
