use hex::FromHex;
use hyper::HeaderMap;
use sha1::{Digest, Sha1};
use tracing::{trace, warn};

/// Checks a fully downloaded body against a hash the repository announced for it
pub trait ChecksumValidator: Send + Sync {
    fn algorithm(&self) -> &'static str;
    fn is_valid(&self, data: &[u8]) -> bool;
}

pub struct Sha1ChecksumValidator {
    expected_hash: [u8; 20],
}
impl Sha1ChecksumValidator {
    pub fn new(expected_hash: [u8; 20]) -> Sha1ChecksumValidator {
        Sha1ChecksumValidator { expected_hash }
    }
}
impl ChecksumValidator for Sha1ChecksumValidator {
    fn algorithm(&self) -> &'static str {
        "SHA1"
    }

    fn is_valid(&self, data: &[u8]) -> bool {
        trace!("validating SHA1 hash");
        Sha1::digest(data).as_slice() == self.expected_hash
    }
}

pub struct Md5ChecksumValidator {
    expected_hash: [u8; 16],
}
impl Md5ChecksumValidator {
    pub fn new(expected_hash: [u8; 16]) -> Md5ChecksumValidator {
        Md5ChecksumValidator { expected_hash }
    }
}
impl ChecksumValidator for Md5ChecksumValidator {
    fn algorithm(&self) -> &'static str {
        "MD5"
    }

    fn is_valid(&self, data: &[u8]) -> bool {
        trace!("validating MD5 hash");
        md5::compute(data).0 == self.expected_hash
    }
}

/// Collects validators for all checksums announced in the response headers (Artifactory / Nexus
///  style and Google Cloud Storage style).
///
/// A header that does not contain a hex hash of the right length is ignored rather than failing
///  the download.
pub fn validators_from_headers(headers: &HeaderMap) -> Vec<Box<dyn ChecksumValidator>> {
    let header_value = |names: &[&str]| {
        names.iter()
            .find_map(|name| headers.get(*name))
            .and_then(|h| h.to_str().ok())
            .map(|s| s.trim().trim_matches('"').to_string())
    };

    let mut validators: Vec<Box<dyn ChecksumValidator>> = vec![];

    if let Some(sha1) = header_value(&["x-checksum-sha1", "x-goog-meta-checksum-sha1"]) {
        match <[u8; 20]>::from_hex(&sha1) {
            Ok(expected_hash) => validators.push(Box::new(Sha1ChecksumValidator::new(expected_hash))),
            Err(e) => warn!("ignoring malformed SHA1 checksum header {:?}: {}", sha1, e),
        }
    }
    if let Some(md5) = header_value(&["x-checksum-md5", "x-goog-meta-checksum-md5"]) {
        match <[u8; 16]>::from_hex(&md5) {
            Ok(expected_hash) => validators.push(Box::new(Md5ChecksumValidator::new(expected_hash))),
            Err(e) => warn!("ignoring malformed MD5 checksum header {:?}: {}", md5, e),
        }
    }

    validators
}
