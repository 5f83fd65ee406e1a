use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Immediate subdirectories of the backup root, oldest modification time first. Symlinks are
/// never followed and never counted. Entries that can't be read are logged and left out.
pub fn list_run_directories(root: &Path) -> std::io::Result<Vec<(PathBuf, SystemTime)>> {
    let mut run_dirs = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(root = ?root, "unable to read backup entry: {err}");
                continue;
            }
        };
        let path = entry.path();

        // DirEntry metadata describes the link itself, not its target
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(path = ?path, "unable to stat backup entry: {err}");
                continue;
            }
        };

        if !metadata.file_type().is_dir() {
            continue;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        run_dirs.push((path, modified));
    }

    run_dirs.sort_by(|(a_path, a_time), (b_path, b_time)| {
        a_time.cmp(b_time).then_with(|| a_path.cmp(b_path))
    });

    Ok(run_dirs)
}

/// Removes the oldest run directories until at most `keep_last` remain. A limit of zero or less
/// disables pruning. Failures are logged and skipped; the directories that were actually removed
/// are returned.
pub fn prune(root: &Path, keep_last: i64) -> Vec<PathBuf> {
    if keep_last <= 0 {
        return Vec::new();
    }

    let run_dirs = match list_run_directories(root) {
        Ok(dirs) => dirs,
        Err(err) => {
            tracing::error!(root = ?root, "failed to list backup directories: {err}");
            return Vec::new();
        }
    };

    let keep_last = usize::try_from(keep_last).unwrap_or(usize::MAX);
    if run_dirs.len() <= keep_last {
        return Vec::new();
    }

    let excess = run_dirs.len() - keep_last;
    let mut removed = Vec::with_capacity(excess);

    for (path, _) in run_dirs.into_iter().take(excess) {
        tracing::info!(path = ?path, "removing old backup");

        match std::fs::remove_dir_all(&path) {
            Ok(()) => removed.push(path),
            Err(err) => tracing::error!(path = ?path, "failed to remove old backup: {err}"),
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::time::Duration;

    fn make_run_dir(root: &Path, name: &str, age_secs: u64) -> PathBuf {
        let path = root.join(name);
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("project.zip"), b"zip").unwrap();

        let modified = SystemTime::now() - Duration::from_secs(age_secs);
        File::open(&path).unwrap().set_modified(modified).unwrap();

        path
    }

    #[test]
    fn test_listing_sorted_by_modification_time() {
        let root = tempfile::tempdir().unwrap();

        // Names sort the opposite way to their ages so only mtime can produce this order
        let newest = make_run_dir(root.path(), "a", 10);
        let oldest = make_run_dir(root.path(), "c", 300);
        let middle = make_run_dir(root.path(), "b", 100);
        std::fs::write(root.path().join("stray.txt"), b"not a run").unwrap();

        let listed: Vec<PathBuf> = list_run_directories(root.path())
            .unwrap()
            .into_iter()
            .map(|(p, _)| p)
            .collect();

        assert_eq!(listed, vec![oldest, middle, newest]);
    }

    #[test]
    fn test_prune_removes_oldest_excess() {
        let root = tempfile::tempdir().unwrap();
        let d1 = make_run_dir(root.path(), "2025-01-01_00-00-00", 400);
        let d2 = make_run_dir(root.path(), "2025-01-02_00-00-00", 300);
        let d3 = make_run_dir(root.path(), "2025-01-03_00-00-00", 200);
        let d4 = make_run_dir(root.path(), "2025-01-04_00-00-00", 100);

        let removed = prune(root.path(), 2);

        assert_eq!(removed, vec![d1.clone(), d2.clone()]);
        assert!(!d1.exists());
        assert!(!d2.exists());
        assert!(d3.exists());
        assert!(d4.exists());
    }

    #[test]
    fn test_prune_disabled_or_under_limit() {
        let root = tempfile::tempdir().unwrap();
        make_run_dir(root.path(), "one", 200);
        make_run_dir(root.path(), "two", 100);

        assert!(prune(root.path(), 0).is_empty());
        assert!(prune(root.path(), -3).is_empty());
        assert!(prune(root.path(), 2).is_empty());
        assert_eq!(list_run_directories(root.path()).unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_runs() {
        let root = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();

        let older = make_run_dir(root.path(), "2025-01-01_00-00-00", 300);
        let newer = make_run_dir(root.path(), "2025-01-02_00-00-00", 100);
        std::os::unix::fs::symlink(outside.path(), root.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(root.path().join("gone"), root.path().join("dangling"))
            .unwrap();

        let listed: Vec<PathBuf> = list_run_directories(root.path())
            .unwrap()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(listed, vec![older.clone(), newer.clone()]);

        assert!(prune(root.path(), 2).is_empty());
        assert!(older.exists());
        assert!(newer.exists());
        assert!(outside.path().exists());

        assert_eq!(prune(root.path(), 1), vec![older.clone()]);
        assert!(newer.exists());
        assert!(root.path().join("linked").symlink_metadata().is_ok());
    }

    #[test]
    fn test_prune_missing_root_is_not_fatal() {
        let root = tempfile::tempdir().unwrap();
        assert!(prune(&root.path().join("absent"), 1).is_empty());
    }
}
