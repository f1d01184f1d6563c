// Pure slot classification and filename parsing - no I/O

use crate::slots::SlotCategory;

use regex::Regex;
use std::sync::LazyLock;

/// Active save files are `gamedata_<index>.ato` with a 1-2 digit index.
/// Backups carry a timestamp suffix and don't match this.
static ACTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gamedata_(\d{1,2})\.ato$").unwrap());

pub fn classify(index: u32) -> SlotCategory {
    if index < 12 {
        SlotCategory::Adventure
    } else if index < 24 {
        SlotCategory::Obelisk
    } else {
        SlotCategory::Weekly
    }
}

/// 1-based position of the slot within its category.
pub fn slot_position(index: u32) -> u32 {
    match classify(index) {
        SlotCategory::Adventure => index + 1,
        SlotCategory::Obelisk => index - 12 + 1,
        SlotCategory::Weekly => index - 24 + 1,
    }
}

pub fn active_file_name(index: u32) -> String {
    format!("gamedata_{index}.ato")
}

/// Extract the slot index from an active save file name.
/// Returns None for backups, turn files and anything else.
pub fn parse_active_file_name(name: &str) -> Option<u32> {
    let caps = ACTIVE_RE.captures(name)?;
    caps.get(1)?.as_str().parse().ok()
}
