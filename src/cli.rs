use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use console::style;
use inquire::Text;

use crate::config::{ChecksumPolicy, ResolverConfig};
use crate::maven::coordinates::MavenCoordinates;
use crate::maven::paths::MavenRepository;
use crate::resolve::resolver::{FetchListener, FetchReport};

#[derive(Debug, Clone, Parser)]
#[command(name = "pomtree")]
#[command(about = "Print the transitive dependency tree of a Maven artifact")]
pub struct Cli {
    /// groupId:artifactId:version - asked for interactively if missing
    #[arg(value_name = "ARTIFACT")]
    pub artifact: Option<String>,

    /// Maven repository to search, in order of priority (defaults to Maven Central)
    #[arg(long = "repository", value_name = "URL", env = "POMTREE_REPOSITORIES", value_delimiter = ',')]
    pub repositories: Vec<String>,

    /// Hide progress messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Hide the legend
    #[arg(long)]
    pub no_legend: bool,

    #[arg(long, value_enum, value_name = "POLICY", default_value_t = ChecksumPolicy::VerifyIfPresent)]
    pub checksums: ChecksumPolicy,

    /// Per request
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

impl Cli {
    /// Invalid repository URLs are fatal here, before anything is fetched
    pub fn resolver_config(&self) -> anyhow::Result<ResolverConfig> {
        let mut config = ResolverConfig {
            checksum_policy: self.checksums,
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        };

        if !self.repositories.is_empty() {
            config.repositories = parse_repositories(self.repositories.iter().map(String::as_str))?;
        }
        Ok(config)
    }
}

fn parse_repositories<'a>(urls: impl Iterator<Item = &'a str>) -> anyhow::Result<Vec<MavenRepository>> {
    urls.map(|url| MavenRepository::new(url).context("invalid repository"))
        .collect()
}

pub fn print_name() {
    println!("🌲 Maven Dependency Tree\n");
}

pub fn print_args(args: &[String]) {
    if let Some(line) = args_line(args) {
        println!("{}", line);
    }
}

fn args_line(args: &[String]) -> Option<String> {
    if args.is_empty() {
        return None;
    }
    Some(format!("⚙️ Arguments: [{}]", args.join(", ")))
}

fn prompt(question: &str) -> anyhow::Result<String> {
    Ok(Text::new(question).prompt()?)
}

/// Asks until the answer is a well-formed coordinate
pub fn ask_for_artifact() -> anyhow::Result<MavenCoordinates> {
    loop {
        match prompt("Artifact (groupId:artifactId:version)")?.parse() {
            Ok(coordinates) => return Ok(coordinates),
            Err(e) => println!("{}", e),
        }
    }
}

/// Space separated URLs - an empty answer means the defaults
pub fn ask_for_repositories() -> anyhow::Result<Vec<MavenRepository>> {
    loop {
        let answer = prompt("Optional repositories (URLs)")?;
        if answer.trim().is_empty() {
            return Ok(ResolverConfig::default().repositories);
        }
        match parse_repositories(answer.split_whitespace()) {
            Ok(repositories) => return Ok(repositories),
            Err(e) => println!("{:#}", e),
        }
    }
}

/// Prints one line per descriptor request
pub struct ConsoleFetchListener;

impl FetchListener for ConsoleFetchListener {
    fn on_fetch(&self, report: &FetchReport<'_>) {
        match report.outcome {
            Ok(()) => println!("{}", style(format!("✅ {} in {:?}", report.url, report.elapsed)).green()),
            Err(e) => println!("{}", style(format!("❌ {} {} in {:?}", report.url, e, report.elapsed)).red()),
        }
    }
}
