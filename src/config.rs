use std::time::Duration;

use clap::ValueEnum;

use crate::maven::paths::MavenRepository;

/// What to do with checksums announced by the repository in response headers
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum ChecksumPolicy {
    /// fail if the repository does not announce a checksum
    Require,
    #[default]
    VerifyIfPresent,
    Ignore,
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// tried in this order for every coordinate, the first one to succeed wins
    pub repositories: Vec<MavenRepository>,
    pub checksum_policy: ChecksumPolicy,
    /// per HTTP request, a hung request blocks the whole crawl
    pub timeout: Duration,
    /// Maven Central returns a 403 without a user agent
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            repositories: vec![MavenRepository::maven_central()],
            checksum_policy: ChecksumPolicy::default(),
            timeout: Duration::from_secs(30),
            user_agent: "curl/7.68.0".to_string(),
        }
    }
}
