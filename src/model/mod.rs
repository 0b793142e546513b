pub mod catalog;
pub mod sheet;

pub use catalog::{Catalog, Preset, SheetSpec};
pub use sheet::{Frame, FrameRect, RemainderPolicy};
