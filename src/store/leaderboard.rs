/// Per-maze leaderboard, derived from the profile store on demand.

use crate::error::StoreError;
use crate::store::profiles::{ProfileStore, UserRecord};

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub seconds: f64,
}

/// Rank every recorded time for `maze`, fastest first.
/// Ties keep record order (stable sort). No times = empty, not an error.
pub fn rank(records: &[UserRecord], maze: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = records.iter()
        .filter_map(|r| r.timings.get(maze).map(|seconds| LeaderboardEntry {
            username: r.username.clone(),
            seconds,
        }))
        .collect();
    entries.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
    entries
}

/// Load the store once and rank it.
pub fn rank_store(store: &ProfileStore, maze: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
    Ok(rank(&store.load()?, maze))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::timing::TimingLog;

    fn record(name: &str, timings: &str) -> UserRecord {
        UserRecord {
            timings: TimingLog::parse(timings),
            ..UserRecord::new(name, "pw")
        }
    }

    fn names(entries: &[LeaderboardEntry]) -> Vec<(&str, f64)> {
        entries.iter().map(|e| (e.username.as_str(), e.seconds)).collect()
    }

    #[test]
    fn ascending_with_stable_ties() {
        let records = vec![
            record("b", "maze0:12.0"),
            record("a", "maze0:9.5"),
            record("c", "maze0:9.5"),
        ];
        assert_eq!(names(&rank(&records, 0)), vec![("a", 9.5), ("c", 9.5), ("b", 12.0)]);
    }

    #[test]
    fn only_requested_maze_is_ranked() {
        let records = vec![
            record("a", "maze0:3,maze1:8"),
            record("b", "maze1:2"),
            record("c", ""),
        ];
        assert_eq!(names(&rank(&records, 1)), vec![("b", 2.0), ("a", 8.0)]);
        assert_eq!(names(&rank(&records, 0)), vec![("a", 3.0)]);
    }

    #[test]
    fn unplayed_maze_is_empty() {
        let records = vec![record("a", "maze0:3")];
        assert!(rank(&records, 7).is_empty());
        assert!(rank(&[], 0).is_empty());
    }

    #[test]
    fn ranks_straight_from_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.txt");
        std::fs::write(&path, "x;p;1;maze2:4.5\ny;p;1;maze2:1.25\nbroken\n").unwrap();
        let ranked = rank_store(&ProfileStore::new(path), 2).unwrap();
        assert_eq!(names(&ranked), vec![("y", 1.25), ("x", 4.5)]);
    }
}
