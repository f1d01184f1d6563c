// Save slot catalog
// Classifies the gamedata_<n>.ato files found in a player folder.

mod operations;
pub mod pure;

pub use operations::{list_player_folders, scan_slots};

use std::path::{Path, PathBuf};

/// Slot category, a total function of the slot index.
/// 0-11 are adventure saves, 12-23 obelisk challenges, 24+ weekly runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotCategory {
    Adventure,
    Obelisk,
    Weekly,
}

impl SlotCategory {
    pub fn label(self) -> &'static str {
        match self {
            SlotCategory::Adventure => "Adventure",
            SlotCategory::Obelisk => "Obelisk",
            SlotCategory::Weekly => "Weekly",
        }
    }
}

/// One save slot found on disk. Derived from a directory scan, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct SaveSlot {
    pub index: u32,
    pub category: SlotCategory,
    pub active_path: PathBuf,
}

impl SaveSlot {
    pub fn new(index: u32, player_path: &Path) -> Self {
        SaveSlot {
            index,
            category: pure::classify(index),
            active_path: player_path.join(pure::active_file_name(index)),
        }
    }

    /// Label shown in the slot dropdown, e.g. "Obelisk Slot 3".
    pub fn display_name(&self) -> String {
        format!(
            "{} Slot {}",
            self.category.label(),
            pure::slot_position(self.index)
        )
    }
}
