use thiserror::Error;

/// The root coordinate given by the user can not be parsed - fatal, detected before crawling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("failed to parse artifact: [{input}] (expected groupId:artifactId:version)")]
    Invalid { input: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("invalid repository URL: [{url}]: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Outcome of a failed attempt to get the dependencies of a single coordinate.
///
/// These are never fatal to a crawl: they are recorded against the coordinate and the crawl goes
///  on. Values are cached per descriptor URL and handed out repeatedly, hence `Clone` and plain
///  string payloads rather than wrapped source errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("not resolvable")]
    NotResolvable,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("not found in any of the repositories")]
    NotFoundInAnyRepository,
}
