use std::collections::BTreeMap;

use acstats_webclient::{ContestId, Standings};

use crate::error::{Error, Result};
use crate::ratio::Ratio9;

pub type TaskScreenName = String;
pub type RatioCurve = Vec<Ratio9>;

/// The output document: task screen name => per-minute cumulative
/// acceptance-ratio curve. BTreeMap keeps the serialized key order stable.
pub type RatioCurves = BTreeMap<TaskScreenName, RatioCurve>;

const NS_PER_SEC: i64 = 1_000_000_000;
const SECS_PER_MIN: i64 = 60;

/// Minute offset of an accepted solve from contest start.
/// Both divisions truncate; never rounds.
pub fn acceptance_minute(elapsed_ns: i64) -> i64 {
    elapsed_ns / NS_PER_SEC / SECS_PER_MIN
}

/// Turns standings snapshots into ratio curves of `duration_min` entries
/// per task.
///
/// The denominator of every ratio is the full roster size of the snapshot,
/// including participants who solved nothing. Accepted solves recorded at
/// or after `duration_min` (frozen or extended standings) are dropped.
/// When two snapshots share a task screen name, the later snapshot wins.
pub fn aggregate(snapshots: &[(ContestId, Standings)], duration_min: usize) -> Result<RatioCurves> {
    let mut curves = RatioCurves::new();

    for (contest, standings) in snapshots {
        let participant_count = standings.participants.len() as u64;
        if participant_count == 0 {
            return Err(Error::EmptyStandings {
                contest: contest.clone(),
            });
        }

        // Per-minute acceptance counts (imos array), one slot per minute.
        // Every announced task gets a curve, even with zero acceptances.
        let mut counts: BTreeMap<&str, Vec<u64>> = standings
            .tasks
            .iter()
            .map(|t| (t.screen_name.as_str(), vec![0u64; duration_min]))
            .collect();

        for row in &standings.participants {
            for (screen_name, result) in &row.task_results {
                if !result.is_accepted() {
                    continue;
                }
                // Accepted rows without an elapsed time carry no event.
                let Some(elapsed_ns) = result.elapsed_ns else {
                    log::debug!(
                        "{}: dropping acceptance of '{}' with undefined elapsed time",
                        contest,
                        screen_name
                    );
                    continue;
                };
                let minute = acceptance_minute(elapsed_ns);
                if minute < 0 || minute as usize >= duration_min {
                    log::debug!(
                        "{}: dropping acceptance of '{}' at out-of-range minute {}",
                        contest,
                        screen_name,
                        minute
                    );
                    continue;
                }
                counts
                    .entry(screen_name.as_str())
                    .or_insert_with(|| vec![0u64; duration_min])[minute as usize] += 1;
            }
        }

        for (screen_name, mut slots) in counts {
            // Inclusive prefix sum: slot i becomes the total number of
            // acceptances by the end of minute i.
            for i in 1..slots.len() {
                slots[i] += slots[i - 1];
            }
            let curve = slots
                .iter()
                .map(|&cnt| Ratio9::div_floor(cnt, participant_count))
                .collect();
            curves.insert(screen_name.to_owned(), curve);
        }
    }
    Ok(curves)
}

#[cfg(test)]
mod test {
    use acstats_webclient::{ParticipantRow, TaskInfo, TaskResult};

    use super::*;

    fn contest(slug: &str) -> ContestId {
        ContestId::new(slug).unwrap()
    }

    fn task(screen_name: &str) -> TaskInfo {
        TaskInfo {
            screen_name: screen_name.to_owned(),
            name: String::new(),
        }
    }

    fn accepted(elapsed_ns: i64) -> TaskResult {
        TaskResult {
            status: TaskResult::STATUS_ACCEPTED,
            elapsed_ns: Some(elapsed_ns),
        }
    }

    fn rejected() -> TaskResult {
        TaskResult {
            status: 0,
            elapsed_ns: None,
        }
    }

    fn row(results: Vec<(&str, TaskResult)>) -> ParticipantRow {
        ParticipantRow {
            task_results: results
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        }
    }

    fn nanos_of(curves: &RatioCurves, screen_name: &str) -> Vec<u64> {
        curves[screen_name].iter().map(|r| r.nanos()).collect()
    }

    #[test]
    fn minute_derivation_matches_single_division() {
        let samples = [
            0i64,
            1,
            59_999_999_999,
            60_000_000_000,
            90_000_000_000,
            308_000_000_000,
            i64::MAX,
        ];
        for e in samples {
            assert_eq!(acceptance_minute(e), e / 60_000_000_000, "e={}", e);
        }
    }

    #[test]
    fn worked_scenario() {
        // duration 3, one task, 4 participants, accepted elapsed (ns)
        // {30e9, 90e9, 90e9, none} => minutes {0, 1, 1}
        // => counts [1, 2, 0] => prefix [1, 3, 3] => ratios [.25, .75, .75]
        let standings = Standings {
            tasks: vec![task("x_a")],
            participants: vec![
                row(vec![("x_a", accepted(30_000_000_000))]),
                row(vec![("x_a", accepted(90_000_000_000))]),
                row(vec![("x_a", accepted(90_000_000_000))]),
                row(vec![("x_a", rejected())]),
            ],
        };
        let curves = aggregate(&[(contest("x"), standings)], 3).unwrap();

        assert_eq!(
            nanos_of(&curves, "x_a"),
            vec![250_000_000, 750_000_000, 750_000_000]
        );
    }

    #[test]
    fn curves_are_monotone_and_bounded() {
        let standings = Standings {
            tasks: vec![task("y_a"), task("y_b")],
            participants: vec![
                row(vec![
                    ("y_a", accepted(10_000_000_000)),
                    ("y_b", accepted(250_000_000_000)),
                ]),
                row(vec![("y_a", accepted(200_000_000_000))]),
                row(vec![("y_a", rejected()), ("y_b", rejected())]),
                row(vec![]),
                row(vec![("y_a", accepted(299_000_000_000))]),
                row(vec![("y_b", accepted(0))]),
                row(vec![("y_a", accepted(59_999_999_999))]),
            ],
        };
        let curves = aggregate(&[(contest("y"), standings)], 5).unwrap();

        for (screen_name, curve) in &curves {
            assert_eq!(curve.len(), 5, "task {}", screen_name);
            for w in curve.windows(2) {
                assert!(w[0] <= w[1], "task {} not monotone", screen_name);
            }
            for r in curve {
                assert!(*r <= Ratio9::ONE);
            }
        }
        // 2 of 7 solved y_a within minute 0 (10s and 59.999...s).
        assert_eq!(nanos_of(&curves, "y_a")[0], 285_714_285);
    }

    #[test]
    fn out_of_range_acceptance_affects_nothing() {
        let in_range = Standings {
            tasks: vec![task("z_a")],
            participants: vec![
                row(vec![("z_a", accepted(30_000_000_000))]),
                row(vec![]),
            ],
        };
        let with_late = Standings {
            tasks: vec![task("z_a")],
            participants: vec![
                row(vec![("z_a", accepted(30_000_000_000))]),
                // Minute 3 == duration: dropped.
                row(vec![("z_a", accepted(180_000_000_000))]),
            ],
        };

        let a = aggregate(&[(contest("z"), in_range)], 3).unwrap();
        let b = aggregate(&[(contest("z"), with_late)], 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn accepted_without_elapsed_counts_toward_nothing() {
        let standings = Standings {
            tasks: vec![task("q_a")],
            participants: vec![
                row(vec![(
                    "q_a",
                    TaskResult {
                        status: TaskResult::STATUS_ACCEPTED,
                        elapsed_ns: None,
                    },
                )]),
                row(vec![]),
            ],
        };
        let curves = aggregate(&[(contest("q"), standings)], 2).unwrap();
        assert_eq!(nanos_of(&curves, "q_a"), vec![0, 0]);
    }

    #[test]
    fn unsolved_task_gets_all_zero_curve() {
        let standings = Standings {
            tasks: vec![task("w_a"), task("w_b")],
            participants: vec![row(vec![("w_a", accepted(0))])],
        };
        let curves = aggregate(&[(contest("w"), standings)], 2).unwrap();
        assert_eq!(nanos_of(&curves, "w_b"), vec![0, 0]);
    }

    #[test]
    fn result_for_unannounced_task_is_not_an_error() {
        // "phantom" never appears in TaskInfo; indexing is by the
        // identifiers seen in results, so it simply gets its own curve.
        let standings = Standings {
            tasks: vec![task("v_a")],
            participants: vec![
                row(vec![("phantom", accepted(0))]),
                row(vec![]),
            ],
        };
        let curves = aggregate(&[(contest("v"), standings)], 1).unwrap();
        assert_eq!(nanos_of(&curves, "phantom"), vec![500_000_000]);
    }

    #[test]
    fn later_snapshot_wins_on_task_collision() {
        let first = Standings {
            tasks: vec![task("shared_a")],
            participants: vec![row(vec![("shared_a", accepted(0))])],
        };
        let second = Standings {
            tasks: vec![task("shared_a")],
            participants: vec![row(vec![]), row(vec![])],
        };
        let curves = aggregate(
            &[(contest("c1"), first), (contest("c2"), second)],
            1,
        )
        .unwrap();
        assert_eq!(nanos_of(&curves, "shared_a"), vec![0]);
    }

    #[test]
    fn empty_standings_is_fatal() {
        let standings = Standings {
            tasks: vec![task("e_a")],
            participants: vec![],
        };
        let err = aggregate(&[(contest("e"), standings)], 1).unwrap_err();
        assert!(matches!(err, Error::EmptyStandings { .. }));
        assert!(err.to_string().contains("'e'"));
    }

    #[test]
    fn multiple_contests_land_in_one_document() {
        let arc = Standings {
            tasks: vec![task("arc1_a")],
            participants: vec![
                row(vec![("arc1_a", accepted(0))]),
                row(vec![]),
            ],
        };
        let abc = Standings {
            tasks: vec![task("abc1_a")],
            participants: vec![row(vec![("abc1_a", accepted(60_000_000_000))])],
        };
        let curves = aggregate(&[(contest("arc1"), arc), (contest("abc1"), abc)], 2).unwrap();

        assert_eq!(curves.len(), 2);
        assert_eq!(nanos_of(&curves, "arc1_a"), vec![500_000_000, 500_000_000]);
        assert_eq!(nanos_of(&curves, "abc1_a"), vec![0, 1_000_000_000]);
    }
}
