use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pomtree::cli::{ask_for_artifact, ask_for_repositories, print_args, print_name, Cli, ConsoleFetchListener};
use pomtree::maven::coordinates::MavenCoordinates;
use pomtree::maven::remote_repo::RemotePomSource;
use pomtree::resolve::resolver::Resolver;
use pomtree::tree::TreePrinter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.quiet {
        print_name();
        print_args(&std::env::args().skip(1).collect::<Vec<_>>());
    }

    let mut config = cli.resolver_config()?;
    let root: MavenCoordinates = match &cli.artifact {
        Some(artifact) => artifact.parse()?,
        None => {
            let root = ask_for_artifact()?;
            if cli.repositories.is_empty() {
                config.repositories = ask_for_repositories()?;
            }
            root
        }
    };

    let mut resolver = Resolver::new(RemotePomSource::new(&config), config.repositories.clone());
    if !cli.quiet {
        resolver = resolver.with_listener(ConsoleFetchListener);
        println!("📡 Crawling POM files…");
    }

    let start = Instant::now();
    let dependencies = resolver.resolve(&root).await;
    if !cli.quiet {
        println!("⏱ Total duration: {:?}\n", start.elapsed());
    }

    print!("{}", TreePrinter::new(&dependencies).with_legend(!cli.no_legend).render(&root));
    Ok(())
}
