use std::path::PathBuf;

use acstats_core::{
    action,
    client::SessionPersistentClient,
    config::{CrawlConfig, Dataset},
    snapshot::{FsSnapshotStore, SnapshotCache},
};
use acstats_webclient::Platform;
use anyhow::bail;
use colored::Colorize as _;

use super::{GlobalArgs, SubcmdResult};
use crate::{config::GlobalConfig, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Labels of datasets to crawl. Omit to crawl every dataset.
    #[arg()] // positional argument
    pub labels: Vec<String>,

    /// Path to the crawl config file (default: find crawl.toml in ancestor dirs).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);

    let crawl_cfg = match &args.config {
        Some(path) => CrawlConfig::from_toml_file(path.clone())?,
        None => CrawlConfig::from_file_finding_in_ancestors(util::current_dir())?,
    };

    let datasets: Vec<&Dataset> = if args.labels.is_empty() {
        crawl_cfg.datasets.iter().collect()
    } else {
        let mut selected = Vec::with_capacity(args.labels.len());
        for label in &args.labels {
            let Some(d) = crawl_cfg.find_dataset(label) else {
                bail!("No dataset labeled '{}' in the crawl config", label);
            };
            selected.push(d);
        }
        selected
    };

    let cli = SessionPersistentClient::new(Platform::AtCoder, &cfg.cache_dir);
    let cache = SnapshotCache::new(FsSnapshotStore::new(cfg.cache_dir.join("standings")));

    for dataset in datasets {
        let out_file = action::crawl_dataset(&cli, &cache, dataset, &cfg.out_dir).await?;
        println!(
            "{}",
            format!(
                "Successfully wrote '{}'",
                util::replace_homedir_to_tilde(out_file).to_string_lossy()
            )
            .green()
        );
    }
    Ok(())
}
