use std::collections::HashMap;

use serde::Deserialize;

/// Full standings document of one contest, as served by
/// `https://atcoder.jp/contests/<slug>/standings/json`.
///
/// Only the fields the aggregation needs are modeled; the rest of the
/// document (`Fixed`, `AdditionalColumns`, `Translation`, per-user rating
/// columns, ...) is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Standings {
    #[serde(rename = "TaskInfo")]
    pub tasks: Vec<TaskInfo>,

    #[serde(rename = "StandingsData")]
    pub participants: Vec<ParticipantRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskInfo {
    /// Unique task identifier within the contest. (e.g.) "arc121_a"
    #[serde(rename = "TaskScreenName")]
    pub screen_name: String,

    #[serde(rename = "TaskName", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticipantRow {
    /// Keyed by task screen name.
    #[serde(rename = "TaskResults")]
    pub task_results: HashMap<String, TaskResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaskResult {
    #[serde(rename = "Status")]
    pub status: i32,

    /// Nanoseconds since contest start. Not every row carries it;
    /// an accepted result without it counts toward nothing.
    #[serde(rename = "Elapsed")]
    pub elapsed_ns: Option<i64>,
}

impl TaskResult {
    pub const STATUS_ACCEPTED: i32 = 1;

    pub fn is_accepted(&self) -> bool {
        self.status == Self::STATUS_ACCEPTED
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_standings_ignoring_extra_fields() {
        let json = r#"{
            "Fixed": true,
            "AdditionalColumns": null,
            "TaskInfo": [
                {"Assignment": "A", "TaskName": "2nd Greatest Distance", "TaskScreenName": "arc121_a"},
                {"Assignment": "B", "TaskName": "RGB Matching", "TaskScreenName": "arc121_b"}
            ],
            "StandingsData": [
                {
                    "Rank": 1,
                    "UserScreenName": "alice",
                    "TaskResults": {
                        "arc121_a": {"Count": 1, "Failure": 0, "Penalty": 0, "Score": 40000,
                                     "Elapsed": 308000000000, "Status": 1, "Pending": false, "Frozen": false}
                    }
                },
                {"Rank": 2, "UserScreenName": "bob", "TaskResults": {}}
            ],
            "Translation": {}
        }"#;

        let s: Standings = serde_json::from_str(json).unwrap();
        assert_eq!(s.tasks.len(), 2);
        assert_eq!(s.tasks[0].screen_name, "arc121_a");
        assert_eq!(s.participants.len(), 2);

        let r = &s.participants[0].task_results["arc121_a"];
        assert!(r.is_accepted());
        assert_eq!(r.elapsed_ns, Some(308_000_000_000));
        assert!(s.participants[1].task_results.is_empty());
    }

    #[test]
    fn missing_elapsed_deserializes_as_none() {
        let r: TaskResult = serde_json::from_str(r#"{"Status": 1}"#).unwrap();
        assert!(r.is_accepted());
        assert_eq!(r.elapsed_ns, None);
    }

    #[test]
    fn missing_task_results_is_an_error() {
        let json = r#"{
            "TaskInfo": [],
            "StandingsData": [{"Rank": 1}]
        }"#;
        assert!(serde_json::from_str::<Standings>(json).is_err());
    }
}
