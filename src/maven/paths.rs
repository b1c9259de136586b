use std::fmt::{Display, Formatter};

use hyper::Uri;

use crate::error::RepositoryError;
use crate::maven::coordinates::MavenCoordinates;

pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

/// Base URL of a remote Maven repository, e.g. `https://repo1.maven.org/maven2`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MavenRepository {
    base_uri: String, // without trailing '/'
}
impl MavenRepository {
    pub fn new(base_uri: &str) -> Result<MavenRepository, RepositoryError> {
        let base_uri = base_uri.trim().trim_matches('"').trim_end_matches('/').to_string();

        let invalid = |reason: String| RepositoryError::InvalidUrl {
            url: base_uri.clone(),
            reason,
        };

        // check that the base URI is valid - and absolute, a relative URI can not be fetched
        let uri = Uri::try_from(base_uri.as_str()).map_err(|e| invalid(e.to_string()))?;
        match (uri.scheme_str(), uri.host()) {
            (Some("http") | Some("https"), Some(_)) => {}
            _ => return Err(invalid("expected an absolute http(s) URL".to_string())),
        }

        Ok(MavenRepository { base_uri })
    }

    pub fn maven_central() -> MavenRepository {
        MavenRepository {
            base_uri: MAVEN_CENTRAL.to_string(),
        }
    }

    /// The descriptor of a coordinate in this repository, following the standard layout
    pub fn pom_url(&self, coordinates: &MavenCoordinates) -> String {
        format!("{}/{}", self.base_uri, pom_path(coordinates))
    }
}
impl Display for MavenRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base_uri)
    }
}

/// Path of a coordinate's descriptor relative to the repository root, i.e. it starts with
///  something like "org/..." or "com/..."
pub fn pom_path(coordinates: &MavenCoordinates) -> String {
    format!(
        "{}/{}/{}/{}-{}.pom",
        coordinates.group_id.0.replace('.', "/"),
        coordinates.artifact_id.0,
        coordinates.version.0,
        coordinates.artifact_id.0,
        coordinates.version.0,
    )
}
