use std::collections::HashMap;

use crate::error::DescriptorError;
use crate::maven::coordinates::MavenCoordinates;

pub type FetchResult = Result<Vec<MavenCoordinates>, DescriptorError>;

/// Outcome of fetching and parsing a descriptor, by descriptor URL. Failures are cached as well,
///  so a URL is requested at most once per crawl.
///
/// Keyed by URL rather than by coordinate because one coordinate may be probed in several
///  repositories before one succeeds.
#[derive(Debug, Default)]
pub struct FetchCache {
    results: HashMap<String, FetchResult>,
}
impl FetchCache {
    pub fn new() -> FetchCache {
        Default::default()
    }

    pub fn get(&self, url: &str) -> Option<&FetchResult> {
        self.results.get(url)
    }

    /// Returns the cached result, which is the given one unless the URL was already present
    pub fn insert_if_absent(&mut self, url: String, result: FetchResult) -> &FetchResult {
        self.results.entry(url).or_insert(result)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
