//! Page fetching

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::extractors::HtmlDocument;

/// Supplies raw page bodies and parsed documents by URL
pub trait PageSource {
    fn fetch_text(&self, url: &str) -> Result<String>;

    fn fetch(&self, url: &str) -> Result<HtmlDocument> {
        let body = self.fetch_text(url)?;
        Ok(HtmlDocument::parse(&body))
    }
}

/// Blocking HTTP source backed by ureq. No retries.
pub struct HttpSource {
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(Duration::from_secs(timeout_secs)))
                .user_agent(user_agent)
                .build(),
        );
        Self { agent }
    }
}

impl PageSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching");
        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Error::source_unavailable(url, e))?;

        if !resp.status().is_success() {
            return Err(Error::source_unavailable(url, format!("HTTP {}", resp.status())));
        }

        resp.into_body()
            .read_to_string()
            .map_err(|e| Error::source_unavailable(url, e))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory pages keyed by URL; unknown URLs fail like a dead host
    #[derive(Default)]
    pub struct StaticSource {
        pages: HashMap<String, String>,
        pub requests: RefCell<Vec<String>>,
    }

    impl StaticSource {
        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl PageSource for StaticSource {
        fn fetch_text(&self, url: &str) -> Result<String> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| Error::source_unavailable(url, "HTTP 404 Not Found"))
        }
    }
}
