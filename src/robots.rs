//! robots.txt checking for the scraper

use std::collections::HashMap;

use texting_robots::Robot;
use tracing::debug;

use crate::fetch::PageSource;

/// robots.txt bodies cached per host for the lifetime of a run
#[derive(Debug, Default)]
pub struct RobotsGuard {
    user_agent: String,
    // Robot doesn't impl Clone, so we store the raw text
    cache: HashMap<String, String>,
}

impl RobotsGuard {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            cache: HashMap::new(),
        }
    }

    /// Whether `url` may be fetched. Unparsable URLs and hosts without a
    /// readable robots.txt are allowed.
    pub fn allowed<S: PageSource + ?Sized>(&mut self, source: &S, url: &str) -> bool {
        let parsed = match url::Url::parse(url) {
            Ok(u) => u,
            Err(_) => return true,
        };
        let domain = match parsed.host_str() {
            Some(h) => h.to_lowercase(),
            None => return true,
        };

        let user_agent = &self.user_agent;
        let robots_txt = self.cache.entry(domain).or_insert_with_key(|domain| {
            let robots_url = format!("{}://{}/robots.txt", parsed.scheme(), domain);
            match source.fetch_text(&robots_url) {
                Ok(text) => text,
                Err(e) => {
                    // No robots.txt = allow all
                    debug!(%robots_url, error = %e, "robots.txt unavailable");
                    String::new()
                }
            }
        });

        Robot::new(user_agent, robots_txt.as_bytes())
            .map(|r| r.allowed(url))
            .unwrap_or(true)
    }
}
