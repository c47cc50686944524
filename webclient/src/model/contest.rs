use super::atom::LocalDateTime;
use super::contest_id::ContestId;

/// One row of the contest archive listing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ContestEntry {
    pub id: ContestId,
    pub name: String,
    pub start_at: LocalDateTime,
    pub duration_min: u32,
}
