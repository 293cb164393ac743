use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const SNAPSHOT_PREFIX: &str = "contacts_backup_";
const SNAPSHOT_EXT: &str = "bin";

pub const DEFAULT_INTERVAL_MINUTES: i64 = 30;

/// When to snapshot and how many snapshots to keep. The timer loop driving
/// this decision lives with the caller.
#[derive(Debug, Clone, Copy)]
pub struct BackupPolicy {
    pub interval: Duration,
    /// `None` keeps every snapshot.
    pub retain: Option<usize>,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::minutes(DEFAULT_INTERVAL_MINUTES),
            retain: None,
        }
    }
}

impl BackupPolicy {
    pub fn is_due(&self, last_run: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_run {
            None => true,
            Some(last) => now.signed_duration_since(last) >= self.interval,
        }
    }
}

/// Copies the table file verbatim into a timestamped snapshot. An absent
/// source is a no-op, not an error.
pub fn snapshot(
    table_path: &Path,
    backup_dir: &Path,
    now: DateTime<Utc>,
) -> Result<Option<PathBuf>> {
    if !table_path.exists() {
        return Ok(None);
    }
    if !backup_dir.exists() {
        fs::create_dir_all(backup_dir)?;
    }
    let name = format!(
        "{}{}.{}",
        SNAPSHOT_PREFIX,
        now.format("%Y%m%d_%H%M%S"),
        SNAPSHOT_EXT
    );
    let dest = backup_dir.join(name);
    fs::copy(table_path, &dest)?;
    info!(path = %dest.display(), "contact table snapshot written");
    Ok(Some(dest))
}

/// Removes the oldest snapshots beyond `retain`. Snapshot names embed their
/// timestamp, so lexicographic order is chronological order.
pub fn prune(backup_dir: &Path, retain: usize) -> Result<usize> {
    if !backup_dir.exists() {
        return Ok(0);
    }

    let mut snapshots: Vec<PathBuf> = fs::read_dir(backup_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_snapshot(path))
        .collect();
    if snapshots.len() <= retain {
        return Ok(0);
    }

    snapshots.sort();
    let excess = snapshots.len() - retain;
    for path in snapshots.iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

fn is_snapshot(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(SNAPSHOT_PREFIX) && name.ends_with(&format!(".{}", SNAPSHOT_EXT))
}

#[cfg(test)]
mod tests {
    use super::BackupPolicy;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn first_run_is_always_due() {
        let policy = BackupPolicy::default();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(policy.is_due(None, now));
    }

    #[test]
    fn due_exactly_at_the_interval_boundary() {
        let policy = BackupPolicy {
            interval: Duration::minutes(30),
            retain: None,
        };
        let last = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert!(!policy.is_due(Some(last), last + Duration::minutes(29)));
        assert!(policy.is_due(Some(last), last + Duration::minutes(30)));
        assert!(policy.is_due(Some(last), last + Duration::minutes(31)));
    }
}
