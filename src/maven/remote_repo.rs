use async_trait::async_trait;

use crate::config::ResolverConfig;
use crate::util::validating_http_downloader::ValidatingHttpDownloader;

/// Where POM descriptors come from: given a descriptor URL, returns the raw text or a failure.
///
/// Any kind of failure (transport, status, timeout, checksum) is collapsed into one error - the
///  resolver treats them all the same.
#[async_trait]
pub trait PomSource: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<String>;
}

pub struct RemotePomSource {
    downloader: ValidatingHttpDownloader,
}
impl RemotePomSource {
    pub fn new(config: &ResolverConfig) -> RemotePomSource {
        RemotePomSource {
            downloader: ValidatingHttpDownloader::new(config),
        }
    }
}

#[async_trait]
impl PomSource for RemotePomSource {
    async fn fetch(&self, url: &str) -> anyhow::Result<String> {
        self.downloader.get_text(url).await
    }
}
