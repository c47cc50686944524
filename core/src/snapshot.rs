use std::{
    collections::HashMap,
    io,
    path::PathBuf,
    sync::Mutex,
};

use acstats_webclient::{ContestId, Standings};
use async_trait::async_trait;

use crate::error::{Error, Result};

/// Parses a raw standings payload into typed records.
///
/// This is the single validating boundary: a missing field or shape
/// mismatch surfaces here as `MalformedSnapshot` with the contest id,
/// instead of failing deep inside aggregation.
pub fn parse_standings(contest: &ContestId, json: &str) -> Result<Standings> {
    serde_json::from_str(json).map_err(|e| Error::MalformedSnapshot {
        contest: contest.clone(),
        source: e,
    })
}

/// Upstream that can produce a standings payload for a contest.
#[async_trait]
pub trait StandingsSource {
    async fn fetch_standings_json(
        &self,
        contest: &ContestId,
    ) -> acstats_webclient::Result<String>;
}

/// Storage backend for raw snapshot payloads.
pub trait SnapshotStore {
    fn exists(&self, contest: &ContestId) -> bool;
    fn load(&self, contest: &ContestId) -> Result<String>;
    fn save(&self, contest: &ContestId, payload: &str) -> Result<()>;
}

/// File-backed store: one `<dir>/<contest_id>.json` per contest.
pub struct FsSnapshotStore {
    dir: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_file(&self, contest: &ContestId) -> PathBuf {
        self.dir.join(format!("{}.json", contest))
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn exists(&self, contest: &ContestId) -> bool {
        self.snapshot_file(contest).is_file()
    }

    fn load(&self, contest: &ContestId) -> Result<String> {
        Ok(fsutil::read_to_string(self.snapshot_file(contest))?)
    }

    fn save(&self, contest: &ContestId, payload: &str) -> Result<()> {
        Ok(fsutil::write_atomic_with_mkdir(
            self.snapshot_file(contest),
            payload,
        )?)
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemSnapshotStore {
    entries: Mutex<HashMap<ContestId, String>>,
}

impl SnapshotStore for MemSnapshotStore {
    fn exists(&self, contest: &ContestId) -> bool {
        self.entries.lock().unwrap().contains_key(contest)
    }

    fn load(&self, contest: &ContestId) -> Result<String> {
        match self.entries.lock().unwrap().get(contest) {
            Some(payload) => Ok(payload.clone()),
            None => Err(Error::Storage(fsutil::Error::SingleIO(
                "Cannot read file",
                PathBuf::from(contest.as_str()),
                io::Error::from(io::ErrorKind::NotFound),
            ))),
        }
    }

    fn save(&self, contest: &ContestId, payload: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(contest.clone(), payload.to_owned());
        Ok(())
    }
}

/// Snapshot cache over an injectable storage backend.
///
/// An upstream is queried at most once per contest id: presence of the
/// stored artifact is the deduplication guard, so a payload fetched once
/// is reused for the rest of the process lifetime (and, with the
/// file-backed store, across runs).
pub struct SnapshotCache<S> {
    store: S,
}

impl<S: SnapshotStore> SnapshotCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `true` iff the payload was genuinely fetched from upstream.
    /// On a fetch failure nothing is stored.
    pub async fn ensure(
        &self,
        source: &impl StandingsSource,
        contest: &ContestId,
    ) -> Result<bool> {
        if self.store.exists(contest) {
            return Ok(false);
        }
        let payload = source
            .fetch_standings_json(contest)
            .await
            .map_err(|e| Error::Fetch {
                contest: contest.clone(),
                source: e,
            })?;
        self.store.save(contest, &payload)?;
        Ok(true)
    }

    pub fn load(&self, contest: &ContestId) -> Result<String> {
        self.store.load(contest)
    }
}
