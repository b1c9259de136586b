use std::time::Duration;

use anyhow::anyhow;
use hyper::{Body, Client, Request, Uri};
use hyper::body::to_bytes;
use hyper::client::HttpConnector;
use hyper::header::USER_AGENT;
use hyper_tls::HttpsConnector;
use tokio::time::timeout;
use tracing::trace;

use crate::config::{ChecksumPolicy, ResolverConfig};
use crate::util::checksum::validators_from_headers;

/// Downloads small text files, checking the body's integrity against hashcodes announced in
///  response headers as the checksum policy demands.
///
/// Instances do HTTP connection caching internally, so keeping them alive has performance benefits.
pub struct ValidatingHttpDownloader {
    client: Client<HttpsConnector<HttpConnector>>,
    user_agent: String,
    timeout: Duration,
    checksum_policy: ChecksumPolicy,
}
impl ValidatingHttpDownloader {
    pub fn new(config: &ResolverConfig) -> ValidatingHttpDownloader {
        ValidatingHttpDownloader {
            client: Client::builder()
                .build::<_, Body>(HttpsConnector::new()),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            checksum_policy: config.checksum_policy,
        }
    }

    pub async fn get_text(&self, uri: &str) -> anyhow::Result<String> {
        let request = Request::builder()
            .method("GET")
            .uri(Uri::try_from(uri)?)
            .header(USER_AGENT, &self.user_agent)
            .body(Body::empty())?;

        trace!("getting {:?}", request);

        let response = timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| anyhow!("timed out after {:?}", self.timeout))??;

        if !response.status().is_success() {
            return Err(anyhow!("upstream request failed: {}", response.status()));
        }

        let validators = match self.checksum_policy {
            ChecksumPolicy::Ignore => vec![],
            policy => {
                let validators = validators_from_headers(response.headers());
                if validators.is_empty() && policy == ChecksumPolicy::Require {
                    return Err(anyhow!("no checksum announced for {}", uri));
                }
                validators
            }
        };

        let body = timeout(self.timeout, to_bytes(response.into_body()))
            .await
            .map_err(|_| anyhow!("timed out reading body after {:?}", self.timeout))??;

        for validator in &validators {
            if !validator.is_valid(&body) {
                return Err(anyhow!("failed {} validation", validator.algorithm()));
            }
        }

        // older descriptors are often Latin-1 encoded
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod test {
    use rstest::*;
    use sha1::{Digest, Sha1};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use crate::maven::pom::Pom;

    use super::*;

    const BODY: &[u8] = b"<project/>";

    fn response(status: &str, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
        let mut result = format!("HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n", status, body.len());
        for (name, value) in headers {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result.push_str("\r\n");

        let mut result = result.into_bytes();
        result.extend_from_slice(body);
        result
    }

    /// Answers every request with the given bytes, or never answers if there are none
    async fn serve(response: Option<Vec<u8>>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let response = response.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }

                    match response {
                        Some(response) => {
                            let _ = socket.write_all(&response).await;
                            let _ = socket.shutdown().await;
                        }
                        None => tokio::time::sleep(Duration::from_secs(60)).await,
                    }
                });
            }
        });

        format!("http://{}/g/a/1/a-1.pom", addr)
    }

    fn downloader(checksum_policy: ChecksumPolicy) -> ValidatingHttpDownloader {
        ValidatingHttpDownloader::new(&ResolverConfig {
            checksum_policy,
            timeout: Duration::from_millis(500),
            ..Default::default()
        })
    }

    fn sha1_of(data: &[u8]) -> String {
        hex::encode(Sha1::digest(data))
    }

    #[tokio::test]
    async fn test_get_text() {
        let url = serve(Some(response("200 OK", &[], BODY))).await;
        assert_eq!(downloader(ChecksumPolicy::VerifyIfPresent).get_text(&url).await.unwrap(), "<project/>");
    }

    #[tokio::test]
    async fn test_not_found() {
        let url = serve(Some(response("404 Not Found", &[], b"gone"))).await;
        let err = downloader(ChecksumPolicy::VerifyIfPresent).get_text(&url).await.unwrap_err();
        assert!(err.to_string().contains("404"), "{}", err);
    }

    #[rstest]
    #[case::verified(ChecksumPolicy::VerifyIfPresent, Some(sha1_of(BODY)), None)]
    #[case::mismatch(ChecksumPolicy::VerifyIfPresent, Some(sha1_of(b"other")), Some("failed SHA1 validation"))]
    #[case::absent(ChecksumPolicy::VerifyIfPresent, None, None)]
    #[case::required(ChecksumPolicy::Require, Some(sha1_of(BODY)), None)]
    #[case::required_but_absent(ChecksumPolicy::Require, None, Some("no checksum announced"))]
    #[case::ignored_mismatch(ChecksumPolicy::Ignore, Some(sha1_of(b"other")), None)]
    #[tokio::test]
    async fn test_checksum_policy(#[case] policy: ChecksumPolicy, #[case] sha1: Option<String>, #[case] expected_error: Option<&str>) {
        let headers: Vec<(&str, &str)> = sha1.iter().map(|h| ("X-Checksum-Sha1", h.as_str())).collect();
        let url = serve(Some(response("200 OK", &headers, BODY))).await;

        let result = downloader(policy).get_text(&url).await;
        match expected_error {
            None => assert_eq!(result.unwrap(), "<project/>"),
            Some(expected) => {
                let err = result.unwrap_err();
                assert!(err.to_string().contains(expected), "{}", err);
            }
        }
    }

    #[tokio::test]
    async fn test_stalled_response_times_out() {
        let url = serve(None).await;
        let err = downloader(ChecksumPolicy::VerifyIfPresent).get_text(&url).await.unwrap_err();
        assert!(err.to_string().contains("timed out"), "{}", err);
    }

    #[tokio::test]
    async fn test_latin1_body() {
        let mut body = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<project><name>Caf".to_vec();
        body.push(0xE9);
        body.extend_from_slice(b"</name><dependencies><dependency><groupId>g</groupId><artifactId>a</artifactId><version>1</version></dependency></dependencies></project>");
        let url = serve(Some(response("200 OK", &[], &body))).await;

        let text = downloader(ChecksumPolicy::VerifyIfPresent).get_text(&url).await.unwrap();
        assert!(text.contains("Caf\u{FFFD}"));

        let dependencies = Pom::parse(&text).unwrap().dependencies().unwrap();
        assert_eq!(dependencies.len(), 1);
        assert_eq!(dependencies[0].to_string(), "g:a:1");
    }
}
