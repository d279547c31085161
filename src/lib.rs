pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;
pub use crate::config::{cli::LocalStorage, SheetConfig};

pub use crate::adapters::{ArtworkDirectory, HeaderProbe, RipClient};
pub use crate::app::pipelines::PickSheetPipeline;
pub use crate::core::engine::SheetEngine;
pub use crate::domain::model::{GroupKey, LayoutParams, PlacedEntry, QueueEntry, RowPitch, SizeClass};
pub use crate::utils::error::{Result, SheetError};
