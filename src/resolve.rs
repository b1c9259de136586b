pub mod dependency_map;
pub mod fetch_cache;
pub mod resolver;
