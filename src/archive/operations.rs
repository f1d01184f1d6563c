// Backup, restore and prune over one player directory

use crate::archive::pure::{
    backup_file_name, format_stamp, parse_backup_file_name, parse_stamp, sort_newest_first,
};
use crate::archive::{BackupOutcome, PruneOutcome, RestoreOutcome};
use crate::error::{VaultError, read_dir_checked};
use crate::slots::pure::active_file_name;

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Archiving engine over one player's save directory.
///
/// Hotkey dispatch runs on its own thread, so operations against the same
/// slot serialize through a per-slot gate; different slots don't block each
/// other. All file I/O is synchronous and completes before the gate drops.
pub struct Vault {
    player_path: PathBuf,
    slot_gates: Mutex<HashMap<u32, Arc<Mutex<()>>>>,
}

impl Vault {
    pub fn new(player_path: PathBuf) -> Self {
        Vault {
            player_path,
            slot_gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn player_path(&self) -> &Path {
        &self.player_path
    }

    fn gate(&self, index: u32) -> Arc<Mutex<()>> {
        let mut gates = self.slot_gates.lock().unwrap();
        gates.entry(index).or_default().clone()
    }

    /// File names of this slot's backups, newest first.
    fn backup_names(&self, index: u32) -> Result<Vec<String>, VaultError> {
        let mut names = Vec::new();
        for entry in read_dir_checked(&self.player_path)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if parse_backup_file_name(name).is_some_and(|(i, _)| i == index) {
                names.push(name.to_string());
            }
        }
        sort_newest_first(&mut names);
        Ok(names)
    }

    /// Copy the active save to a backup stamped with its modification time.
    ///
    /// An existing backup with the same stamp means this save state is
    /// already captured, so the call is an idempotent no-op. At most one
    /// file is created; the active save is never touched.
    pub fn backup(&self, index: u32) -> Result<BackupOutcome, VaultError> {
        let gate = self.gate(index);
        let _held = gate.lock().unwrap();

        let active = self.player_path.join(active_file_name(index));
        if !active.is_file() {
            return Err(VaultError::SaveNotFound(index));
        }

        let modified = fs::metadata(&active)?.modified()?;
        let dest = self
            .player_path
            .join(backup_file_name(index, &format_stamp(modified)));
        if dest.exists() {
            return Ok(BackupOutcome::AlreadyExists);
        }

        fs::copy(&active, &dest)?;
        log::info!("backed up slot {index} to {}", dest.display());
        Ok(BackupOutcome::Created(dest))
    }

    /// Promote the newest backup to the active save.
    ///
    /// The previous active file is deleted first; the chosen backup is only
    /// copied, never removed.
    pub fn restore(&self, index: u32) -> Result<RestoreOutcome, VaultError> {
        let gate = self.gate(index);
        let _held = gate.lock().unwrap();

        let names = self.backup_names(index)?;
        let Some(newest) = names.first() else {
            return Ok(RestoreOutcome::NoBackups);
        };
        let source = self.player_path.join(newest);

        let active = self.player_path.join(active_file_name(index));
        if active.exists() {
            fs::remove_file(&active)?;
        }
        fs::copy(&source, &active)?;

        log::info!("restored slot {index} from {}", source.display());
        Ok(RestoreOutcome::Restored(source))
    }

    /// Delete every backup of the slot except the newest one.
    /// Retention never goes below one backup. Confirmation is the caller's
    /// job; the engine just deletes.
    pub fn prune(&self, index: u32) -> Result<PruneOutcome, VaultError> {
        let gate = self.gate(index);
        let _held = gate.lock().unwrap();

        let names = self.backup_names(index)?;
        if names.len() <= 1 {
            return Ok(PruneOutcome::Nothing);
        }

        let mut removed = 0;
        for name in &names[1..] {
            fs::remove_file(self.player_path.join(name))?;
            removed += 1;
        }
        log::info!("pruned {removed} backup(s) of slot {index}");
        Ok(PruneOutcome::Pruned(removed))
    }

    /// Backup timestamps for the slot, newest first.
    pub fn list_backups(&self, index: u32) -> Result<Vec<NaiveDateTime>, VaultError> {
        let names = self.backup_names(index)?;
        Ok(names
            .iter()
            .filter_map(|name| parse_backup_file_name(name))
            .filter_map(|(_, stamp)| parse_stamp(stamp))
            .collect())
    }
}
