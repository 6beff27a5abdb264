//! Campaign save slots: one pretty-printed JSON file per slot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use imperium_core::enums::FactionId;
use imperium_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::campaign::{Campaign, CampaignStatus};

/// Full save data written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub slot_name: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub campaign: Campaign,
}

impl SaveData {
    /// Snapshot a campaign, stamped with the current time.
    pub fn new(slot: &str, campaign: &Campaign) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let mut campaign = campaign.clone();
        // Pending events belong to the live session, not the snapshot.
        campaign.drain_events();
        campaign.map_mut().drain_events();
        Self {
            slot_name: slot.to_string(),
            timestamp,
            campaign,
        }
    }
}

/// Lightweight metadata for listing saves without keeping full state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub timestamp: u64,
    pub turn: u32,
    pub player: FactionId,
    pub status: CampaignStatus,
}

fn save_path(dir: &Path, slot: &str) -> Result<PathBuf> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(Error::InvalidSlot(slot.to_string()));
    }
    Ok(dir.join(format!("{slot}.json")))
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<()> {
    let path = save_path(dir, slot)?;
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
    tracing::info!(slot, turn = data.campaign.current_turn(), "campaign saved");
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData> {
    let path = save_path(dir, slot)?;
    if !path.exists() {
        return Err(Error::SaveNotFound(slot.to_string()));
    }
    let json = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let data: SaveData = serde_json::from_str(&json)?;
    tracing::info!(slot, turn = data.campaign.current_turn(), "campaign loaded");
    Ok(data)
}

/// All readable saves in `dir`, newest first. Unreadable files are skipped.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let parsed = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str::<SaveData>(&json).ok());
        match parsed {
            Some(data) => saves.push(SaveMetadata {
                turn: data.campaign.current_turn(),
                player: data.campaign.player(),
                status: data.campaign.status(),
                slot_name: data.slot_name,
                timestamp: data.timestamp,
            }),
            None => tracing::debug!(path = %path.display(), "skipping unreadable save"),
        }
    }
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    saves
}

/// Remove a slot. Deleting a missing slot is not an error.
pub fn delete_save(dir: &Path, slot: &str) -> Result<()> {
    let path = save_path(dir, slot)?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_save_data(slot: &str, turns: u32) -> SaveData {
        let mut campaign = Campaign::default();
        campaign.start(FactionId::Rome);
        for _ in 0..turns {
            campaign.process_turn();
        }
        SaveData::new(slot, &campaign)
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = make_save_data("slot1", 3);
        save_to_file(dir.path(), "slot1", &data).unwrap();

        let loaded = load_from_file(dir.path(), "slot1").unwrap();
        assert_eq!(loaded.slot_name, "slot1");
        assert_eq!(loaded.campaign.current_turn(), 4);
        assert_eq!(loaded.campaign, data.campaign);
    }

    #[test]
    fn load_missing_slot() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_from_file(dir.path(), "nope"),
            Err(Error::SaveNotFound(slot)) if slot == "nope"
        ));
    }

    #[test]
    fn corrupt_save_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(
            load_from_file(dir.path(), "broken"),
            Err(Error::Json(_))
        ));
        assert!(list_saves(dir.path()).is_empty());
    }

    #[test]
    fn slot_names_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data = make_save_data("x", 0);
        for slot in ["", "../evil", "a/b", "dot.ted"] {
            assert!(matches!(
                save_to_file(dir.path(), slot, &data),
                Err(Error::InvalidSlot(_))
            ));
        }
    }

    #[test]
    fn list_saves_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_saves(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn list_saves_newest_first() {
        let dir = tempfile::tempdir().unwrap();

        let mut early = make_save_data("early", 2);
        early.timestamp = 1000;
        save_to_file(dir.path(), "early", &early).unwrap();

        let mut late = make_save_data("late", 8);
        late.timestamp = 2000;
        save_to_file(dir.path(), "late", &late).unwrap();

        let saves = list_saves(dir.path());
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].slot_name, "late");
        assert_eq!(saves[0].turn, 9);
        assert_eq!(saves[1].slot_name, "early");
        assert_eq!(saves[1].status, CampaignStatus::Active);
    }

    #[test]
    fn delete_save_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = make_save_data("todelete", 1);
        save_to_file(dir.path(), "todelete", &data).unwrap();
        assert!(dir.path().join("todelete.json").exists());

        delete_save(dir.path(), "todelete").unwrap();
        assert!(!dir.path().join("todelete.json").exists());
        delete_save(dir.path(), "todelete").unwrap();
    }
}
