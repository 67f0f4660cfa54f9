//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "quotegrid";
const APPLICATION: &str = "quotegrid";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/quotegrid` or `~/.cache/quotegrid`
/// - macOS: `~/Library/Caches/dev.quotegrid.quotegrid`
/// - Windows: `C:\Users\<User>\AppData\Local\quotegrid\quotegrid\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/quotegrid` or `~/.config/quotegrid`
/// - macOS: `~/Library/Application Support/dev.quotegrid.quotegrid`
/// - Windows: `C:\Users\<User>\AppData\Roaming\quotegrid\quotegrid\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default config file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Number of archived logs kept next to `latest.log`.
pub const KEEP_ARCHIVED_LOGS: usize = 10;

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "quotegrid-";
const ARCHIVE_STAMP: &str = "%Y%m%d-%H%M%S";

/// Archives the previous run's `latest.log` under the time it was last
/// written, then deletes all but the `keep` newest archives.
pub fn rotate_logs(cache: &Path, keep: usize) -> io::Result<()> {
    let latest = cache.join(LATEST_LOG);
    match fs::metadata(&latest) {
        Ok(meta) => {
            let written: DateTime<Local> = meta.modified()?.into();
            fs::rename(&latest, cache.join(archive_name(written.naive_local())))?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    prune_archives(cache, keep)
}

fn archive_name(stamp: NaiveDateTime) -> String {
    format!("{}{}.log", ARCHIVE_PREFIX, stamp.format(ARCHIVE_STAMP))
}

/// Timestamp of an archive file name; `None` for anything else.
fn archive_stamp(name: &str) -> Option<NaiveDateTime> {
    let stamp = name.strip_prefix(ARCHIVE_PREFIX)?.strip_suffix(".log")?;
    NaiveDateTime::parse_from_str(stamp, ARCHIVE_STAMP).ok()
}

fn prune_archives(cache: &Path, keep: usize) -> io::Result<()> {
    let mut archives: Vec<(NaiveDateTime, PathBuf)> = fs::read_dir(cache)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let stamp = archive_stamp(entry.file_name().to_str()?)?;
            Some((stamp, entry.path()))
        })
        .collect();

    // Newest first
    archives.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in archives.into_iter().skip(keep) {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn stamp(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 30, 0))
            .unwrap()
    }

    #[test]
    fn test_archive_names() {
        let name = archive_name(stamp(5, 9));
        assert_eq!(name, "quotegrid-20260105-093000.log");
        assert_eq!(archive_stamp(&name), Some(stamp(5, 9)));
        assert_eq!(archive_stamp(LATEST_LOG), None);
        assert_eq!(archive_stamp("quotegrid-garbage.log"), None);
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "previous run").unwrap();

        rotate_logs(dir.path(), KEEP_ARCHIVED_LOGS).unwrap();

        assert!(!dir.path().join(LATEST_LOG).exists());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(archive_stamp(&names[0]).is_some());
    }

    #[test]
    fn test_rotate_without_previous_log() {
        let dir = tempfile::tempdir().unwrap();
        rotate_logs(dir.path(), KEEP_ARCHIVED_LOGS).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_prune_keeps_newest_archives() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=5 {
            fs::write(dir.path().join(archive_name(stamp(day, 12))), "x").unwrap();
        }
        fs::write(dir.path().join("notes.log"), "unrelated").unwrap();

        prune_archives(dir.path(), 2).unwrap();

        assert!(dir.path().join(archive_name(stamp(5, 12))).exists());
        assert!(dir.path().join(archive_name(stamp(4, 12))).exists());
        assert!(!dir.path().join(archive_name(stamp(3, 12))).exists());
        assert!(dir.path().join("notes.log").exists());
    }
}
