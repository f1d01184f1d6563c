use crate::hotkeys::{HotkeyAction, HotkeyBindings, HotkeyKey};

use serde::{Deserialize, Serialize};

/// Persisted application settings. Only the two hotkey bindings and the
/// last-selected player folder live here; everything else is derived from
/// the save directory on each scan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultConfig {
    #[serde(default)]
    pub backup_hotkey: HotkeyKey,
    #[serde(default)]
    pub restore_hotkey: HotkeyKey,
    /// Restored on startup when the folder still exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_player: Option<String>,
}

impl VaultConfig {
    pub fn bindings(&self) -> HotkeyBindings {
        HotkeyBindings {
            backup: self.backup_hotkey,
            restore: self.restore_hotkey,
        }
    }

    pub fn set_hotkey(&mut self, action: HotkeyAction, key: HotkeyKey) {
        match action {
            HotkeyAction::Backup => self.backup_hotkey = key,
            HotkeyAction::Restore => self.restore_hotkey = key,
        }
    }
}
