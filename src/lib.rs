// Library exports for sheet2frames

pub mod config;
pub mod event;
pub mod model;
pub mod pipeline;
pub mod pipeline_worker;
pub mod report;

pub use config::Config;
pub use model::{Catalog, Preset, SheetSpec};
pub use pipeline_worker::{PipelineWorker, RunReport};
