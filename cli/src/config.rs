use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "acstats";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "GlobalConfig::default_out_dir")]
    pub out_dir: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            cache_dir: Self::default_cache_dir(),
            out_dir: Self::default_out_dir(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "acstats.toml";

    pub fn filepath() -> PathBuf {
        let dir = dirs::config_dir().expect("Failed to get user's config dir path");
        dir.join(APP_NAME).join(Self::FILENAME)
    }

    fn default_cache_dir() -> PathBuf {
        let dir = dirs::cache_dir().expect("Failed to get user's cache dir path");
        dir.join(APP_NAME)
    }

    fn default_out_dir() -> PathBuf {
        PathBuf::from("./standings")
    }

    pub fn from_file_or_default() -> Self {
        let path = Self::filepath();
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        toml::from_str(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            cache_dir,
            out_dir,
        } = args;

        if let Some(d) = cache_dir {
            self.cache_dir = d.clone();
        }
        if let Some(d) = out_dir {
            self.out_dir = d.clone();
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }
}
