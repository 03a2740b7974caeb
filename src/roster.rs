//! Player record store backed by a single JSON file.
//!
//! The file holds one ordered collection of records (`{"players": [...]}`).
//! Every read goes back to disk, so a `list` issued right after a delete
//! observes the removal. Record identity for deletion is the photo path;
//! names are not required to be unique.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("player store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("player store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One persisted player identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub photo: String,
    pub created: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RosterFile {
    players: Vec<PlayerRecord>,
}

/// Handle over the on-disk player store.
pub struct Roster {
    path: PathBuf,
}

impl Roster {
    /// Opens the store, bootstrapping an empty-but-valid file when absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            let empty = serde_json::to_string_pretty(&RosterFile::default())?;
            fs::write(&path, empty)?;
            log::info!("Bootstrapped empty player store at {}", path.display());
        }
        Ok(Roster { path })
    }

    /// Reads the full record list from disk. Never cached.
    pub fn list(&self) -> Result<Vec<PlayerRecord>, RosterError> {
        Ok(self.read_file()?.players)
    }

    /// Appends a new record with the current timestamp.
    pub fn append(&self, name: &str, photo: &str) -> Result<(), RosterError> {
        let mut file = self.read_file()?;
        file.players.push(PlayerRecord {
            name: name.to_string(),
            photo: photo.to_string(),
            created: Local::now().to_rfc3339(),
        });
        self.write_file(&file)?;
        crate::debug_roster!("Appended record for {} ({})", name, photo);
        Ok(())
    }

    /// Removes the record whose photo path matches, along with the photo
    /// file itself. Failure to remove the file is swallowed.
    pub fn delete_by_photo(&self, photo: &str) -> Result<(), RosterError> {
        if let Err(e) = fs::remove_file(photo) {
            crate::debug_roster!("Could not remove photo {}: {}", photo, e);
        }
        let mut file = self.read_file()?;
        file.players.retain(|p| p.photo != photo);
        self.write_file(&file)?;
        crate::debug_roster!("Deleted record with photo {}", photo);
        Ok(())
    }

    fn read_file(&self) -> Result<RosterFile, RosterError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_file(&self, file: &RosterFile) -> Result<(), RosterError> {
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test gets its own store file under the system temp directory.
    fn temp_store(tag: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "blade_arena_{}_{}_players.json",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_open_bootstraps_empty_store() {
        let path = temp_store("bootstrap");
        let roster = Roster::open(&path).unwrap();
        assert!(path.exists());
        assert!(roster.list().unwrap().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_append_and_list() {
        let path = temp_store("append");
        let roster = Roster::open(&path).unwrap();
        roster.append("Ann", "assets/ann_1234.jpg").unwrap();
        roster.append("Ben", "assets/ben_5678.jpg").unwrap();

        let records = roster.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Ann");
        assert_eq!(records[1].photo, "assets/ben_5678.jpg");
        // Created timestamp starts with an ISO date
        assert_eq!(records[0].created.chars().nth(4), Some('-'));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_delete_by_photo_and_fresh_list() {
        let path = temp_store("delete");
        let roster = Roster::open(&path).unwrap();
        roster.append("Ann", "assets/ann_1234.jpg").unwrap();
        roster.append("Ben", "assets/ben_5678.jpg").unwrap();

        roster.delete_by_photo("assets/ann_1234.jpg").unwrap();

        // A second handle over the same path sees the removal immediately
        let fresh = Roster::open(&path).unwrap();
        let records = fresh.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ben");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_delete_with_missing_photo_file_is_swallowed() {
        let path = temp_store("missing_photo");
        let roster = Roster::open(&path).unwrap();
        roster.append("Ann", "no/such/file.jpg").unwrap();
        // The photo file never existed; the record removal must still succeed
        roster.delete_by_photo("no/such/file.jpg").unwrap();
        assert!(roster.list().unwrap().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let path = temp_store("dupes");
        let roster = Roster::open(&path).unwrap();
        roster.append("Ann", "assets/ann_1111.jpg").unwrap();
        roster.append("Ann", "assets/ann_2222.jpg").unwrap();

        roster.delete_by_photo("assets/ann_1111.jpg").unwrap();
        let records = roster.list().unwrap();
        // Only the record matching the photo path is removed
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].photo, "assets/ann_2222.jpg");
        let _ = fs::remove_file(&path);
    }
}
