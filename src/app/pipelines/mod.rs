pub mod pick_pipeline;

pub use pick_pipeline::PickSheetPipeline;
