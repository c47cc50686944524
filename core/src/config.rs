use std::path::{Path, PathBuf};
use std::result::Result as StdResult;

use acstats_webclient::ContestId;
use anyhow::Context as _;
use serde::Deserialize;

/// Crawl plan: independent labeled datasets, each aggregated into one
/// output document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlConfig {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,

    #[serde(rename = "dataset")]
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dataset {
    /// Output document name. (e.g.) "arc_120m"
    pub label: String,
    pub duration_min: u32,
    pub contests: Vec<ContestId>,
}

impl CrawlConfig {
    pub const FILENAME: &str = "crawl.toml";

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid crawl config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| format!("Cannot find '{}' in ancestor dirs", Self::FILENAME))
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Self::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }

    pub fn find_dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}
