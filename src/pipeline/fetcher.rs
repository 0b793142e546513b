// Sheet download over HTTP (blocking)

use std::io::Read;
use tracing::debug;

use super::error::FetchError;

pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Source of raw sheet bytes. The worker only talks to this trait, so tests can
/// swap the network out.
pub trait Fetch: Send + Sync {
    fn fetch(&self, base_url: &str, filename: &str) -> Result<Vec<u8>, FetchError>;
}

/// Joins `filename` onto `base_url`, percent-encoding each path segment and
/// keeping `/` separators intact.
pub fn sheet_url(base_url: &str, filename: &str) -> String {
    let path = filename
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}{}", base_url, path)
}

#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::agent(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, base_url: &str, filename: &str) -> Result<Vec<u8>, FetchError> {
        let url = sheet_url(base_url, filename);
        debug!(%url, "fetching sheet");

        let resp = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => FetchError::Status {
                filename: filename.to_string(),
                status,
            },
            ureq::Error::Transport(t) => FetchError::Transport {
                filename: filename.to_string(),
                cause: t.to_string(),
            },
        })?;

        // ureq only hands back 1xx-3xx here; anything outside 2xx is still a failure.
        let status = resp.status();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status {
                filename: filename.to_string(),
                status,
            });
        }

        let mut bytes = Vec::new();
        resp.into_reader()
            .take(self.max_body_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|source| FetchError::Body {
                filename: filename.to_string(),
                source,
            })?;

        if bytes.len() as u64 > self.max_body_bytes {
            return Err(FetchError::TooLarge {
                filename: filename.to_string(),
                limit: self.max_body_bytes,
            });
        }

        debug!(%url, len = bytes.len(), "sheet downloaded");
        Ok(bytes)
    }
}
