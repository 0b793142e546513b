use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{filename}: server returned HTTP {status}")]
    Status { filename: String, status: u16 },
    #[error("{filename}: transport error: {cause}")]
    Transport { filename: String, cause: String },
    #[error("{filename}: failed to read response body: {source}")]
    Body {
        filename: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{filename}: response body exceeds {limit} bytes")]
    TooLarge { filename: String, limit: u64 },
}

/// Everything that can make a single sheet fail. None of these abort a run.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{filename}: not a decodable image: {source}")]
    Decode {
        filename: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{filename}: invalid sheet entry: {reason}")]
    InvalidSpec { filename: String, reason: String },
}

impl SheetError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, SheetError::Fetch(_))
    }
}
