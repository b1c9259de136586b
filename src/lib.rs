//! Resolves the transitive dependencies of a Maven artifact by crawling POM files in remote
//! repositories, and renders them as a tree.
//!
//! There is no version mediation: every distinct (group, artifact, version) is a node of its
//! own, and parent POMs are not taken into account.

pub mod cli;
pub mod config;
pub mod error;
pub mod maven;
pub mod resolve;
pub mod tree;
pub mod util;
