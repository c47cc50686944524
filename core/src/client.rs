use std::{
    ops::{Deref, DerefMut},
    path::Path,
};

use acstats_webclient::{ContestId, Platform};
use anyhow::Context as _;
use async_trait::async_trait;
use fsutil::SingleFileDriver;

use crate::snapshot::StandingsSource;

pub fn authtoken_filename(platform: Platform) -> String {
    format!("{}-auth.json", platform.lowercase())
}

/// Web client whose session cookie survives across process runs via a
/// JSON authtoken file.
pub struct SessionPersistentClient {
    cli: Box<dyn acstats_webclient::Client>,
    authtoken_file: SingleFileDriver,
}

impl Deref for SessionPersistentClient {
    type Target = Box<dyn acstats_webclient::Client>;

    fn deref(&self) -> &Self::Target {
        &self.cli
    }
}

impl DerefMut for SessionPersistentClient {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cli
    }
}

impl SessionPersistentClient {
    pub fn new(p: Platform, save_dir: impl AsRef<Path>) -> Self {
        let savepath = save_dir.as_ref().join(authtoken_filename(p));

        let mut x = Self {
            cli: acstats_webclient::new_client(p),
            authtoken_file: SingleFileDriver::new(savepath),
        };

        x.load_authtoken_if_file_exists().unwrap_or_else(|e| {
            log::warn!("Initializing SessionPersistentClient: {:#}", e);
        });
        x
    }

    fn load_authtoken_if_file_exists(&mut self) -> anyhow::Result<()> {
        if !self.authtoken_file.filepath.exists() {
            return Ok(());
        }
        let json = self
            .authtoken_file
            .read()
            .context("Failed to read authtoken file")?;
        self.cli
            .load_authtoken_json(&json)
            .context("Failed to restore session from authtoken file")
    }

    pub fn save_authtoken_to_storage(&self) -> anyhow::Result<()> {
        self.authtoken_file
            .write(&self.cli.export_authtoken_as_json())
            .context("Failed to save authtoken file")
    }

    pub fn remove_authtoken_from_storage(&self) -> anyhow::Result<()> {
        self.authtoken_file
            .remove()
            .context("Failed to remove authtoken file")
    }
}

#[async_trait]
impl StandingsSource for SessionPersistentClient {
    async fn fetch_standings_json(
        &self,
        contest: &ContestId,
    ) -> acstats_webclient::Result<String> {
        self.cli.fetch_standings_json(contest).await
    }
}
