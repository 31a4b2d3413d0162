use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and warm the site's content cache from the command line
#[derive(Parser)]
#[command(name = "foxbeep-content")]
#[command(about = "Fetch, cache and inspect Foxbeep site content", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to the platform config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the content API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every known resource key
    Keys,
    /// Fetch one resource and print it as JSON
    Fetch {
        /// Resource key: hero, company, ads or a converter id such as mkv-to-mp4
        key: String,
        /// Ignore the cache and hit the API
        #[arg(short, long)]
        force: bool,
    },
    /// Refetch every resource and print its resulting state
    RefetchAll,
    /// Print one random active ad
    RandomAd,
    /// Print the site identity used for page metadata
    Seo,
}
