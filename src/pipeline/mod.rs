// Sprite sheet to frame PNG pipeline

pub mod error;
pub mod fetcher;
pub mod fs_ops;
pub mod png_writer;
pub mod slicer;

pub use error::{FetchError, SheetError};
pub use fetcher::{Fetch, HttpFetcher, sheet_url};
pub use png_writer::{frame_filename, write_frame};
pub use slicer::{decode_sheet, frame_rects, slice};
