use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::maven::coordinates::MavenCoordinates;

/// What is known about a coordinate's dependencies after it was visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// possibly empty - unresolvable coordinates are recorded with no children without being
    ///  fetched
    Resolved(Vec<MavenCoordinates>),
    /// resolvable, but no repository delivered a usable descriptor
    Failed,
}
impl Resolution {
    pub fn children(&self) -> Option<&[MavenCoordinates]> {
        match self {
            Resolution::Resolved(children) => Some(children.as_slice()),
            Resolution::Failed => None,
        }
    }
}

/// Result of a crawl: every visited coordinate with its resolution, in the order the coordinates
///  were visited. Entries are never replaced or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    entries: IndexMap<MavenCoordinates, Resolution>,
}
impl DependencyMap {
    pub fn new() -> DependencyMap {
        Default::default()
    }

    /// Returns `false` and leaves the existing entry untouched if the coordinate is present
    pub fn insert_if_absent(&mut self, coordinates: MavenCoordinates, resolution: Resolution) -> bool {
        match self.entries.entry(coordinates) {
            Entry::Occupied(_) => false,
            Entry::Vacant(e) => {
                e.insert(resolution);
                true
            }
        }
    }

    pub fn contains(&self, coordinates: &MavenCoordinates) -> bool {
        self.entries.contains_key(coordinates)
    }

    pub fn get(&self, coordinates: &MavenCoordinates) -> Option<&Resolution> {
        self.entries.get(coordinates)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MavenCoordinates, &Resolution)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
