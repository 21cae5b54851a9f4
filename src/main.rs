use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vidthumb::{
    config::Config,
    thumbnail::{self, ThumbnailCache},
    transport::ReqwestTransport,
    web,
};

mod cli;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_cache(config: &Config) -> anyhow::Result<Arc<ThumbnailCache>> {
    let transport = ReqwestTransport::new(&config.http)?;
    Ok(Arc::new(ThumbnailCache::new(Arc::new(transport))))
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_logging();

    match args.command {
        cli::Command::Detect { url } => {
            match thumbnail::detect(&url) {
                Some(platform) => println!("{platform}"),
                None => println!("unrecognized"),
            }
            Ok(())
        }

        cli::Command::Resolve { urls } => {
            let config = Config::load()?;
            let cache = build_cache(&config)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            let results = runtime.block_on(async {
                let mut results = Vec::with_capacity(urls.len());
                for url in &urls {
                    results.push(cache.resolve(url).await);
                }
                results
            });

            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(())
        }

        cli::Command::Daemon { listen } => {
            let mut config = Config::load()?;
            if let Some(listen) = listen {
                config.server.listen = listen;
            }
            let cache = build_cache(&config)?;

            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(web::start_daemon(&config, cache))
        }
    }
}
