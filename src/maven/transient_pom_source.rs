use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::maven::remote_repo::PomSource;

/// in-memory POM source, neither optimized nor particularly robust - for testing purposes.
///
/// Every request is recorded (including failed ones), so tests can check how often a URL was
///  actually fetched.
pub struct TransientPomSource {
    poms: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}
impl TransientPomSource {
    pub fn new() -> TransientPomSource {
        TransientPomSource {
            poms: Default::default(),
            requests: Default::default(),
        }
    }

    pub fn with_pom(mut self, url: &str, pom: &str) -> TransientPomSource {
        self.poms.insert(url.to_string(), pom.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock()
            .unwrap()
            .clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == url)
            .count()
    }
}

impl Default for TransientPomSource {
    fn default() -> Self {
        TransientPomSource::new()
    }
}

#[async_trait]
impl PomSource for TransientPomSource {
    async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        self.requests.lock()
            .unwrap()
            .push(url.to_string());

        self.poms.get(url)
            .cloned()
            .ok_or_else(|| anyhow!("upstream request failed: 404 Not Found"))
    }
}
