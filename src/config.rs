use crate::model::sheet::RemainderPolicy;
use crate::pipeline::fetcher::DEFAULT_MAX_BODY_BYTES;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Where frame PNGs land. Defaults to the working directory.
    pub output_dir: PathBuf,
    /// Exit non-zero with a failure summary if any sheet failed.
    pub strict: bool,
    /// Sheets processed at once; 1 keeps the run strictly sequential.
    pub jobs: usize,
    pub remainder: RemainderPolicy,
    pub max_body_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            strict: false,
            jobs: 1,
            remainder: RemainderPolicy::Truncate,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_remainder(mut self, policy: RemainderPolicy) -> Self {
        self.remainder = policy;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = limit;
        self
    }
}
