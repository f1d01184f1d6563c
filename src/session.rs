// Shared state between the UI thread and the hotkey dispatcher
// Both sides reach it through an Arc; there is no global singleton.

use crate::archive::Vault;
use crate::hotkeys::{HotkeyAction, HotkeyBindings, HotkeyKey};

use std::sync::{Arc, Mutex};

pub struct Session {
    vault: Mutex<Option<Arc<Vault>>>,
    slot: Mutex<Option<u32>>,
    bindings: Mutex<HotkeyBindings>,
}

impl Session {
    pub fn new(bindings: HotkeyBindings) -> Self {
        Session {
            vault: Mutex::new(None),
            slot: Mutex::new(None),
            bindings: Mutex::new(bindings),
        }
    }

    /// Swap in the vault for a newly selected player folder.
    /// Clears the slot selection; the old vault finishes whatever operation
    /// it may be running on the key-source thread.
    pub fn set_vault(&self, vault: Option<Arc<Vault>>) {
        *self.vault.lock().unwrap() = vault;
        *self.slot.lock().unwrap() = None;
    }

    pub fn current_vault(&self) -> Option<Arc<Vault>> {
        self.vault.lock().unwrap().clone()
    }

    pub fn select_slot(&self, index: Option<u32>) {
        *self.slot.lock().unwrap() = index;
    }

    pub fn selected_slot(&self) -> Option<u32> {
        *self.slot.lock().unwrap()
    }

    pub fn bindings(&self) -> HotkeyBindings {
        *self.bindings.lock().unwrap()
    }

    pub fn set_binding(&self, action: HotkeyAction, key: HotkeyKey) {
        self.bindings.lock().unwrap().set(action, key);
    }
}
