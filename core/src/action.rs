pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use acstats_webclient::{ContestEntry, ContestId, Standings};
use error::*;

use crate::aggregate::{self, RatioCurves};
use crate::client::SessionPersistentClient;
use crate::config::Dataset;
use crate::interactive::ask_credential;
use crate::snapshot::{parse_standings, SnapshotCache, SnapshotStore, StandingsSource};

/// Quiescent interval after a genuine upstream fetch, to bound the
/// request rate against the standings endpoint.
pub const FETCH_COOLDOWN: Duration = Duration::from_secs(5);

pub async fn login(cli: &mut SessionPersistentClient) -> Result<()> {
    ensure!(
        !cli.is_logged_in(),
        "Already logged in to {}",
        cli.platform()
    );

    let cred = ask_credential(cli.credential_fields());

    cli.login(cred)
        .await
        .with_context(|| format!("Failed to login to {}", cli.platform()))?;

    cli.save_authtoken_to_storage()
}

pub async fn logout(cli: &mut SessionPersistentClient) -> Result<()> {
    ensure!(
        cli.is_logged_in(),
        "Already logged out from {}",
        cli.platform()
    );

    let _ = cli.remove_authtoken_from_storage();

    cli.logout()
        .await
        .with_context(|| format!("Failed to logout from {}", cli.platform()))
}

/// Fills the snapshot cache for every listed contest, strictly one at a
/// time. After each fetch that actually hit the network, pauses
/// [`FETCH_COOLDOWN`]; cached contests cost nothing.
pub async fn ensure_snapshots<S: SnapshotStore>(
    source: &impl StandingsSource,
    cache: &SnapshotCache<S>,
    contests: &[ContestId],
) -> Result<()> {
    log::info!("Checking standings snapshots");
    for contest in contests {
        log::info!("-> Check {}", contest);
        let freshly_fetched = cache
            .ensure(source, contest)
            .await
            .with_context(|| format!("Failed to ensure standings snapshot of '{}'", contest))?;
        if freshly_fetched {
            tokio::time::sleep(FETCH_COOLDOWN).await;
        }
    }
    Ok(())
}

/// Loads every cached snapshot of the dataset and aggregates the
/// acceptance-ratio curves.
pub fn build_ratio_curves<S: SnapshotStore>(
    cache: &SnapshotCache<S>,
    dataset: &Dataset,
) -> Result<RatioCurves> {
    log::info!("Aggregating acceptance ratios for label '{}'", dataset.label);

    let mut snapshots = Vec::with_capacity(dataset.contests.len());
    for contest in &dataset.contests {
        let payload = cache.load(contest)?;
        let standings: Standings = parse_standings(contest, &payload)?;
        log::info!(
            "{}: {} tasks, {} participants",
            contest,
            standings.tasks.len(),
            standings.participants.len()
        );
        snapshots.push((contest.clone(), standings));
    }

    let curves = aggregate::aggregate(&snapshots, dataset.duration_min as usize)?;
    Ok(curves)
}

/// Runs one labeled dataset end to end and returns the output file path.
///
/// The output document is written only after aggregation over all the
/// dataset's snapshots succeeded, so a failed run never leaves a partial
/// or corrupt document behind.
pub async fn crawl_dataset<S: SnapshotStore>(
    source: &impl StandingsSource,
    cache: &SnapshotCache<S>,
    dataset: &Dataset,
    out_dir: &Path,
) -> Result<PathBuf> {
    ensure!(
        dataset.duration_min > 0,
        "Dataset '{}': duration_min must be positive",
        dataset.label
    );
    ensure!(
        !dataset.contests.is_empty(),
        "Dataset '{}' lists no contests",
        dataset.label
    );

    ensure_snapshots(source, cache, &dataset.contests).await?;
    let curves = build_ratio_curves(cache, dataset)?;

    let out_file = out_dir.join(format!("{}.json", dataset.label));
    fsutil::write_json_atomic_with_mkdir(&out_file, &curves)
        .with_context(|| format!("Failed to write output document of label '{}'", dataset.label))?;
    Ok(out_file)
}

/// Fetches up to `pages` pages of the contest archive, stopping early at
/// the first empty page.
pub async fn fetch_contest_archive(
    cli: &SessionPersistentClient,
    pages: u32,
) -> Result<Vec<ContestEntry>> {
    let mut entries = Vec::new();
    for page in 1..=pages {
        let mut page_entries = cli
            .fetch_contest_archive(page)
            .await
            .with_context(|| format!("Failed to fetch contest archive page {}", page))?;
        if page_entries.is_empty() {
            break;
        }
        entries.append(&mut page_entries);
    }
    Ok(entries)
}

/// Groups archive entries by duration, the shape dataset contest lists
/// are composed from.
pub fn group_contests_by_duration(
    entries: Vec<ContestEntry>,
) -> BTreeMap<u32, Vec<ContestEntry>> {
    let mut groups: BTreeMap<u32, Vec<ContestEntry>> = BTreeMap::new();
    for e in entries {
        groups.entry(e.duration_min).or_default().push(e);
    }
    groups
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::snapshot::MemSnapshotStore;

    struct CannedSource {
        payloads: HashMap<ContestId, String>,
        fetch_count: Mutex<u32>,
    }

    #[async_trait]
    impl StandingsSource for CannedSource {
        async fn fetch_standings_json(
            &self,
            contest: &ContestId,
        ) -> acstats_webclient::Result<String> {
            *self.fetch_count.lock().unwrap() += 1;
            Ok(self.payloads[contest].clone())
        }
    }

    const STANDINGS_JSON: &str = r#"{
        "TaskInfo": [{"TaskScreenName": "x_a", "TaskName": "A"}],
        "StandingsData": [
            {"TaskResults": {"x_a": {"Status": 1, "Elapsed": 30000000000}}},
            {"TaskResults": {"x_a": {"Status": 1, "Elapsed": 90000000000}}},
            {"TaskResults": {"x_a": {"Status": 1, "Elapsed": 90000000000}}},
            {"TaskResults": {"x_a": {"Status": 6, "Elapsed": 0}}}
        ]
    }"#;

    // Paused clock: the post-fetch cooldown elapses instantly.
    #[tokio::test(start_paused = true)]
    async fn crawl_dataset_end_to_end() {
        let id = ContestId::new("x").unwrap();
        let source = CannedSource {
            payloads: HashMap::from([(id.clone(), STANDINGS_JSON.to_owned())]),
            fetch_count: Mutex::new(0),
        };
        let cache = SnapshotCache::new(MemSnapshotStore::default());
        let dataset = Dataset {
            label: "test_3m".to_owned(),
            duration_min: 3,
            contests: vec![id],
        };
        let out_dir = std::env::temp_dir()
            .join("acstats-test")
            .join(format!("action-{}", std::process::id()));

        let out_file = crawl_dataset(&source, &cache, &dataset, &out_dir)
            .await
            .unwrap();
        assert_eq!(out_file, out_dir.join("test_3m.json"));
        assert_eq!(*source.fetch_count.lock().unwrap(), 1);

        let written = fsutil::read_to_string(&out_file).unwrap();
        assert_eq!(written, r#"{"x_a":[0.25,0.75,0.75]}"#);

        // A rerun reuses the cached snapshot.
        crawl_dataset(&source, &cache, &dataset, &out_dir)
            .await
            .unwrap();
        assert_eq!(*source.fetch_count.lock().unwrap(), 1);

        std::fs::remove_dir_all(&out_dir).unwrap();
    }

    #[tokio::test]
    async fn crawl_dataset_rejects_zero_duration() {
        let source = CannedSource {
            payloads: HashMap::new(),
            fetch_count: Mutex::new(0),
        };
        let cache = SnapshotCache::new(MemSnapshotStore::default());
        let dataset = Dataset {
            label: "zero".to_owned(),
            duration_min: 0,
            contests: vec![ContestId::new("x").unwrap()],
        };

        let err = crawl_dataset(&source, &cache, &dataset, Path::new("/nonexistent"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("duration_min"));
        assert_eq!(*source.fetch_count.lock().unwrap(), 0);
    }

    #[test]
    fn grouping_by_duration() {
        use acstats_webclient::LocalDateTime;
        let t: LocalDateTime = chrono::DateTime::parse_from_str(
            "2021-06-06 21:00:00+0900",
            "%Y-%m-%d %H:%M:%S%z",
        )
        .unwrap()
        .into();
        let entry = |slug: &str, duration_min: u32| ContestEntry {
            id: ContestId::new(slug).unwrap(),
            name: slug.to_owned(),
            start_at: t,
            duration_min,
        };

        let groups = group_contests_by_duration(vec![
            entry("arc121", 120),
            entry("abc204", 100),
            entry("arc120", 120),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&120].len(), 2);
        assert_eq!(groups[&100][0].id, ContestId::new("abc204").unwrap());
    }
}
