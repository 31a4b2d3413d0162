mod cli;

use anyhow::{bail, Result};
use clap::Parser;
use serde_json::json;

use cli::{Cli, Commands};
use foxbeep_content::logging::init_logging;
use foxbeep_content::{ContentConfig, Orchestrator, ResourceKey, Snapshot};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ContentConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
        config.validate()?;
    }
    init_logging(&config.log_level);
    let orchestrator = Orchestrator::new(&config)?;

    match cli.command {
        Commands::Keys => {
            for key in ResourceKey::all() {
                println!("{key}");
            }
        }
        Commands::Fetch { key, force } => {
            let Some(snapshot) = orchestrator.ensure_fresh_named(&key, force).await else {
                bail!("unknown resource key: {key}");
            };
            println!("{}", serde_json::to_string_pretty(&snapshot_json(&snapshot))?);
        }
        Commands::RefetchAll => {
            for s in orchestrator.refetch_all(true).await {
                let note = s.error.map(|e| format!("  ({e})")).unwrap_or_default();
                println!("{:<12} {}{}", s.key.name(), s.state.as_str(), note);
            }
        }
        Commands::RandomAd => {
            orchestrator.ensure_fresh(ResourceKey::Ads, false).await;
            match orchestrator.random_active_ad() {
                Some(ad) => println!("{}", serde_json::to_string_pretty(&ad)?),
                None => println!("No active ads."),
            }
        }
        Commands::Seo => {
            orchestrator.ensure_fresh(ResourceKey::Company, false).await;
            println!("{}", serde_json::to_string_pretty(&orchestrator.seo_profile())?);
        }
    }
    Ok(())
}

fn snapshot_json(s: &Snapshot) -> serde_json::Value {
    json!({
        "key": s.key.name(),
        "state": s.state.as_str(),
        "error": s.error.as_ref().map(|e| e.to_string()),
        "payload": &*s.payload,
    })
}
