use crate::error::{Result, ValidationError};
use crate::{debug_log, info_log};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk value meaning "no score yet". Files written by older versions of
/// the game use the same marker, so it is never accepted as a real score.
pub const UNSET_SCORE: u32 = i32::MAX as u32;

/// The fewest attempts ever needed to win, stored as a one-line text file.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Open the record at `path`, writing the unset marker first if the file
    /// does not exist yet. An existing record must parse.
    pub fn load_or_init<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Self::init_unset(path);
        }

        let store = Self { path };
        let best = store.read()?;
        debug_log!("High score record {} holds {:?}", store.path.display(), best);
        Ok(store)
    }

    /// Open the record at `path` holding the unset marker, whatever it held
    /// before (including unparseable content).
    pub fn init_unset<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let store = Self { path: path.into() };
        if let Some(parent) = store.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ValidationError::io(
                    format!("Failed to create directory {}", parent.display()),
                    e,
                )
            })?;
        }
        store.persist(UNSET_SCORE)?;
        info_log!("Initialized high score record {}", store.path.display());
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored best, or `None` if no game has been won yet.
    pub fn read(&self) -> Result<Option<u32>> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| ValidationError::io("Failed to read high score file.", e))?;

        let line = contents.lines().next().unwrap_or("");
        if line.trim().is_empty() {
            return Err(ValidationError::new(
                "High score file is empty or contains a blank line.",
            ));
        }

        parse_score(line)
    }

    /// Overwrite the record with `score`.
    pub fn write(&self, score: u32) -> Result<()> {
        if score == 0 || score >= UNSET_SCORE {
            return Err(ValidationError::new(format!(
                "High score must be between 1 and {}, got {score}.",
                UNSET_SCORE - 1
            )));
        }
        self.persist(score)?;
        info_log!("Saved high score {} to {}", score, self.path.display());
        Ok(())
    }

    /// Forget the stored best.
    pub fn reset(&self) -> Result<()> {
        self.persist(UNSET_SCORE)?;
        info_log!("Reset high score record {}", self.path.display());
        Ok(())
    }

    fn persist(&self, value: u32) -> Result<()> {
        fs::write(&self.path, format!("{value}\n"))
            .map_err(|e| ValidationError::io("Failed to write high score.", e))
    }
}

fn parse_score(text: &str) -> Result<Option<u32>> {
    let value: i64 = text.trim().parse().map_err(|_| {
        ValidationError::new(format!(
            "High score file contains a non-numeric value: {text}"
        ))
    })?;

    match value {
        v if v == i64::from(UNSET_SCORE) => Ok(None),
        v if v >= 1 && v < i64::from(UNSET_SCORE) => Ok(Some(v as u32)),
        _ => Err(ValidationError::new(format!(
            "High score file contains an out-of-range value: {text}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ScoreStore {
        ScoreStore::load_or_init(dir.path().join("highscore.txt")).unwrap()
    }

    #[test]
    fn test_first_use_writes_unset_marker() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.read().unwrap(), None);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.trim(), "2147483647");
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("nested").join("highscore.txt");
        let store = ScoreStore::load_or_init(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(4).unwrap();
        assert_eq!(store.read().unwrap(), Some(4));
        store.write(2).unwrap();
        assert_eq!(store.read().unwrap(), Some(2));
    }

    #[test]
    fn test_reset_round_trips_to_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write(3).unwrap();
        store.reset().unwrap();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_init_unset_replaces_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "garbage").unwrap();
        let store = ScoreStore::init_unset(&path).unwrap();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_existing_record_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "7").unwrap();
        let store = ScoreStore::load_or_init(&path).unwrap();
        assert_eq!(store.read().unwrap(), Some(7));
    }

    #[test]
    fn test_surrounding_whitespace_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "  12 \n").unwrap();
        let store = ScoreStore::load_or_init(&path).unwrap();
        assert_eq!(store.read().unwrap(), Some(12));
    }

    #[test]
    fn test_blank_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "   \n").unwrap();
        let err = ScoreStore::load_or_init(&path).unwrap_err();
        assert!(err.message().contains("empty or contains a blank line"));
    }

    #[test]
    fn test_non_numeric_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "three").unwrap();
        let err = ScoreStore::load_or_init(&path).unwrap_err();
        assert!(err.message().contains("non-numeric value: three"));
    }

    #[test]
    fn test_out_of_range_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.txt");
        fs::write(&path, "0").unwrap();
        assert!(ScoreStore::load_or_init(&path).is_err());
        fs::write(&path, "-4").unwrap();
        assert!(ScoreStore::load_or_init(&path).is_err());
    }

    #[test]
    fn test_write_rejects_zero_and_marker() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.write(0).is_err());
        assert!(store.write(UNSET_SCORE).is_err());
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_unreadable_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be cannot be read as text.
        let path = dir.path().join("highscore.txt");
        fs::create_dir(&path).unwrap();
        let err = ScoreStore::load_or_init(&path).unwrap_err();
        assert_eq!(err.message(), "Failed to read high score file.");
    }
}
