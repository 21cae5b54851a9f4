use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print which platform a video url belongs to
    Detect {
        /// video page url
        url: String,
    },

    /// Resolve thumbnails and print them as json
    Resolve {
        /// one or more video page urls
        #[clap(required = true)]
        urls: Vec<String>,
    },

    /// Start the http api
    Daemon {
        /// Override `server.listen` from config.yaml
        #[clap(short, long)]
        listen: Option<String>,
    },
}
