// src/core/net.rs
//
// Blocking HTTP retrieval of one issue archive (reqwest, rustls).

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::consts::USER_AGENT;
use crate::file::Layout;

/// Outcome of one retrieval attempt.
#[derive(Debug)]
pub enum FetchResult {
    Found { bytes: Vec<u8>, filename: String },
    NotFound,
    TransientError(FetchError),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("issue {issue}: HTTP {status} from {url}")]
    Status { issue: u32, url: String, status: u16 },

    #[error("issue {issue}: request to {url} failed")]
    Network {
        issue: u32,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Anything that can hand back the archive bytes for an issue.
pub trait IssueSource {
    fn fetch(&mut self, issue: u32) -> FetchResult;
}

impl<S: IssueSource + ?Sized> IssueSource for &mut S {
    fn fetch(&mut self, issue: u32) -> FetchResult {
        (**self).fetch(issue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    NotFound,
    Failed(u16),
}

pub fn classify(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        404 | 410 => StatusClass::NotFound,
        other => StatusClass::Failed(other),
    }
}

pub struct HttpSource {
    client: Client,
    base_url: String,
    probe_head: bool,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration, probe_head: bool) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            probe_head,
        })
    }

    pub fn url_for(&self, issue: u32) -> String {
        format!("{}/{}", self.base_url, Layout::archive_name(issue))
    }

    /// HEAD probe. `Some(NotFound)` short-circuits the GET; anything else
    /// (including probe failures) leaves the decision to the GET.
    fn probe(&self, issue: u32, url: &str) -> Option<StatusClass> {
        debug!(issue, url, "HEAD");
        match self.client.head(url).send() {
            Ok(resp) => {
                let class = classify(resp.status().as_u16());
                if let StatusClass::Failed(status) = class {
                    warn!(issue, status, "HEAD returned unexpected status, trying GET");
                }
                Some(class)
            }
            Err(e) => {
                warn!(issue, error = %e, "HEAD failed, trying GET");
                None
            }
        }
    }
}

impl IssueSource for HttpSource {
    fn fetch(&mut self, issue: u32) -> FetchResult {
        let url = self.url_for(issue);

        if self.probe_head && self.probe(issue, &url) == Some(StatusClass::NotFound) {
            return FetchResult::NotFound;
        }

        debug!(issue, url = %url, "GET");
        let resp = match self.client.get(&url).send() {
            Ok(r) => r,
            Err(source) => return FetchResult::TransientError(FetchError::Network { issue, url, source }),
        };

        match classify(resp.status().as_u16()) {
            StatusClass::Success => match resp.bytes() {
                Ok(body) => FetchResult::Found {
                    bytes: body.to_vec(),
                    filename: Layout::archive_name(issue),
                },
                Err(source) => FetchResult::TransientError(FetchError::Network { issue, url, source }),
            },
            StatusClass::NotFound => FetchResult::NotFound,
            StatusClass::Failed(status) => {
                FetchResult::TransientError(FetchError::Status { issue, url, status })
            }
        }
    }
}
