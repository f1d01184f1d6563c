// Directory scans for the slot catalog

use crate::error::{VaultError, read_dir_checked};
use crate::slots::{SaveSlot, pure};

use std::path::Path;

/// Build the slot catalog for one player folder, ascending index order.
/// Files that don't look like active saves are ignored.
pub fn scan_slots(player_path: &Path) -> Result<Vec<SaveSlot>, VaultError> {
    let mut indices = Vec::new();
    for entry in read_dir_checked(player_path)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(index) = pure::parse_active_file_name(name) {
            indices.push(index);
        }
    }
    indices.sort_unstable();
    indices.dedup();

    Ok(indices
        .into_iter()
        .map(|index| SaveSlot::new(index, player_path))
        .collect())
}

/// Names of the per-player folders under the save base directory, sorted.
pub fn list_player_folders(base: &Path) -> Result<Vec<String>, VaultError> {
    let mut folders = Vec::new();
    for entry in read_dir_checked(base)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            folders.push(name.to_string());
        }
    }
    folders.sort();
    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotCategory;
    use std::fs;

    #[test]
    fn scans_slots_in_ascending_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "gamedata_12.ato",
            "gamedata_0.ato",
            "gamedata_3.ato",
            "gamedata_0_turn.ato",
            "gamedata_3_20240101_090000.ato",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let slots = scan_slots(dir.path()).unwrap();
        let indices: Vec<u32> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 3, 12]);
        assert_eq!(slots[2].category, SlotCategory::Obelisk);
        assert_eq!(slots[2].display_name(), "Obelisk Slot 1");
        assert_eq!(slots[0].active_path, dir.path().join("gamedata_0.ato"));
    }

    #[test]
    fn missing_directory_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        match scan_slots(&gone) {
            Err(VaultError::DirectoryNotFound(p)) => assert_eq!(p, gone),
            other => panic!("expected DirectoryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn lists_player_folders_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("76561198000000001")).unwrap();
        fs::create_dir(dir.path().join("76561198000000000")).unwrap();
        fs::write(dir.path().join("stray.ato"), b"x").unwrap();

        let folders = list_player_folders(dir.path()).unwrap();
        assert_eq!(folders, vec!["76561198000000000", "76561198000000001"]);
    }
}
