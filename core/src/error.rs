use acstats_webclient::ContestId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to fetch standings of '{contest}': {source}")]
    Fetch {
        contest: ContestId,
        #[source]
        source: acstats_webclient::Error,
    },

    #[error(transparent)]
    Storage(#[from] fsutil::Error),

    #[error("Malformed standings snapshot of '{contest}': {source}")]
    MalformedSnapshot {
        contest: ContestId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Standings of '{contest}' has no participants")]
    EmptyStandings { contest: ContestId },
}
