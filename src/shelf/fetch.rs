//! HTTP plumbing: the shared agent and the fetch abstraction the shelf
//! sources sit on.

use std::io::Read;
use std::time::Duration;

use thiserror::Error;

use crate::config::HttpSettings;

/// Ways a single fetch can fail. Shelf sources absorb these into empty
/// results at their boundary; only logs and tests ever see them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
}

/// The HTTP surface the shelf needs. A trait so tests can serve canned
/// documents without opening a socket.
pub trait Fetcher {
    fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Build the agent shared by shelf and track fetches.
pub fn build_agent(http: &HttpSettings) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(http.connect_timeout_secs))
        .timeout_read(Duration::from_secs(http.read_timeout_secs))
        .user_agent(&http.user_agent)
        .build()
}

/// `Fetcher` backed by a `ureq` agent.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    /// Fetch a binary body. Used for track bytes, which are decoded
    /// in-memory rather than streamed.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.agent.get(url).call().map_err(map_ureq)?;
        let mut data = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut data)
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(data)
    }
}

impl Fetcher for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.agent.get(url).call().map_err(map_ureq)?;
        response
            .into_string()
            .map_err(|err| FetchError::Transport(err.to_string()))
    }
}

fn map_ureq(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::Status(code, _) => FetchError::Status(code),
        ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
    }
}
