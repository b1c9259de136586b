use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::DescriptorError;
use crate::maven::coordinates::MavenCoordinates;
use crate::maven::paths::MavenRepository;
use crate::maven::pom::Pom;
use crate::maven::remote_repo::PomSource;
use crate::resolve::dependency_map::{DependencyMap, Resolution};
use crate::resolve::fetch_cache::{FetchCache, FetchResult};

/// One actual request for a descriptor (cache hits are not reported). `outcome` is about getting
///  the text only - a descriptor that is fetched successfully may still fail to parse.
pub struct FetchReport<'a> {
    pub url: &'a str,
    pub elapsed: Duration,
    pub outcome: Result<(), &'a anyhow::Error>,
}

/// Progress observer for crawls - observability only, has no influence on the result
pub trait FetchListener: Send + Sync {
    fn on_fetch(&self, report: &FetchReport<'_>);
}

/// Crawls the transitive dependencies of a coordinate, breadth first.
///
/// Repositories are tried in the configured order for every coordinate, and the first repository
///  that delivers a usable descriptor wins (as opposed to the fastest one). Failures of any kind
///  are recorded against the coordinate, they never abort the crawl.
pub struct Resolver<S: PomSource> {
    source: S,
    repositories: Vec<MavenRepository>,
    listener: Option<Box<dyn FetchListener>>,
}

impl <S: PomSource> Resolver<S> {
    pub fn new(source: S, repositories: Vec<MavenRepository>) -> Resolver<S> {
        Resolver {
            source,
            repositories,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl FetchListener + 'static) -> Resolver<S> {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every call is an independent crawl with fresh caches
    pub async fn resolve(&self, root: &MavenCoordinates) -> DependencyMap {
        debug!("resolving {} against {} repositories", root, self.repositories.len());

        let dependencies = Crawl::new(self).run(root).await;

        debug!("resolved {} coordinates for {}", dependencies.len(), root);
        dependencies
    }
}

/// State of a single crawl
struct Crawl<'a, S: PomSource> {
    resolver: &'a Resolver<S>,
    fetch_cache: FetchCache,
    dependencies: DependencyMap,
}

impl <'a, S: PomSource> Crawl<'a, S> {
    fn new(resolver: &'a Resolver<S>) -> Crawl<'a, S> {
        Crawl {
            resolver,
            fetch_cache: FetchCache::new(),
            dependencies: DependencyMap::new(),
        }
    }

    async fn run(mut self, root: &MavenCoordinates) -> DependencyMap {
        let mut queue = VecDeque::from([root.clone()]);

        while let Some(coordinates) = queue.pop_front() {
            // visited coordinates are neither resolved again nor expanded again - this is what
            //  terminates cycles
            if self.dependencies.contains(&coordinates) {
                continue;
            }

            let resolution = if coordinates.is_resolvable() {
                match self.resolve_dependencies(&coordinates).await {
                    Ok(children) => Resolution::Resolved(children),
                    Err(_) => Resolution::Failed,
                }
            }
            else {
                Resolution::Resolved(vec![])
            };

            let children = resolution.children().map(<[_]>::to_vec).unwrap_or_default();
            self.dependencies.insert_if_absent(coordinates, resolution);

            let mut enqueued = HashSet::new();
            for child in children {
                if !self.dependencies.contains(&child) && enqueued.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }

        self.dependencies
    }

    async fn resolve_dependencies(&mut self, coordinates: &MavenCoordinates) -> FetchResult {
        if !coordinates.is_resolvable() {
            return Err(DescriptorError::NotResolvable);
        }

        let resolver = self.resolver;
        for repository in &resolver.repositories {
            match self.fetch_one(repository.pom_url(coordinates)).await {
                Ok(children) => return Ok(children),
                Err(e) => debug!("{} not available from {}: {}", coordinates, repository, e),
            }
        }

        Err(DescriptorError::NotFoundInAnyRepository)
    }

    async fn fetch_one(&mut self, url: String) -> FetchResult {
        if let Some(cached) = self.fetch_cache.get(&url) {
            trace!("cache hit for {}", url);
            return cached.clone();
        }

        let start = Instant::now();
        let fetched = self.resolver.source.fetch(&url).await;
        let elapsed = start.elapsed();

        if let Some(listener) = &self.resolver.listener {
            listener.on_fetch(&FetchReport {
                url: &url,
                elapsed,
                outcome: fetched.as_ref().map(|_| ()),
            });
        }

        let result = match fetched {
            Ok(text) => Pom::parse(&text)
                .and_then(|pom| pom.dependencies())
                .map_err(|e| DescriptorError::Parse(format!("{:#}", e))),
            Err(e) => Err(DescriptorError::Fetch(format!("{:#}", e))),
        };

        self.fetch_cache.insert_if_absent(url, result).clone()
    }
}
