use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::CoordinateError;

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct MavenGroupId(pub String);

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct MavenArtifactId(pub String);

/// The version string exactly as declared - no normalization, no range evaluation
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct MavenVersion(pub String);
impl MavenVersion {
    /// Version ranges like `[1.0,2.0)` or `(,1.5]` - there is no version mediation, so these
    ///  can not be pinned to a single descriptor
    pub fn is_range(&self) -> bool {
        matches!(self.0.chars().next(), Some('[') | Some('('))
    }
}

/// Identifies a dependency. Identity is (group, artifact, version) - the scope is informational
///  and only shown when rendering.
///
/// NB: two versions of the same library are two unrelated coordinates, there is no conflict
///  detection between them
#[derive(Clone, Debug)]
pub struct MavenCoordinates {
    pub group_id: MavenGroupId,
    pub artifact_id: MavenArtifactId,
    pub version: MavenVersion,
    pub scope: Option<String>,
}

impl MavenCoordinates {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> MavenCoordinates {
        MavenCoordinates {
            group_id: MavenGroupId(group_id.to_string()),
            artifact_id: MavenArtifactId(artifact_id.to_string()),
            version: MavenVersion(version.to_string()),
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> MavenCoordinates {
        self.scope = scope;
        self
    }

    /// Unresolvable coordinates are leaves: they are never fetched
    pub fn is_resolvable(&self) -> bool {
        let all_present = [&self.group_id.0, &self.artifact_id.0, &self.version.0]
            .iter()
            .all(|s| !s.trim().is_empty());

        all_present && !self.version.is_range()
    }
}

impl PartialEq for MavenCoordinates {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
    }
}
impl Eq for MavenCoordinates {}

impl Hash for MavenCoordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
        self.artifact_id.hash(state);
        self.version.hash(state);
    }
}

impl Display for MavenCoordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id.0, self.artifact_id.0, self.version.0)?;
        if let Some(scope) = &self.scope {
            write!(f, " ({})", scope)?;
        }
        Ok(())
    }
}

/// Parses `groupId:artifactId:version`. Segments beyond the third are ignored, blank segments
///  are accepted (and make the result unresolvable).
impl FromStr for MavenCoordinates {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.trim().split(':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(group_id), Some(artifact_id), Some(version)) => {
                Ok(MavenCoordinates::new(group_id, artifact_id, version))
            }
            _ => Err(CoordinateError::Invalid { input: s.to_string() }),
        }
    }
}
