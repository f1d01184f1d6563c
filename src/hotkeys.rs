// Global hotkey bindings and dispatch
// A key-event source is injected as a capability; dispatch is a plain
// callback, no process-wide singleton.

use crate::archive::{BackupOutcome, RestoreOutcome};
use crate::session::Session;
use crate::status::StatusSink;

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Keys available for global bindings. `None` disables the binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum HotkeyKey {
    #[default]
    None,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl HotkeyKey {
    pub const ALL: [HotkeyKey; 13] = [
        HotkeyKey::None,
        HotkeyKey::F1,
        HotkeyKey::F2,
        HotkeyKey::F3,
        HotkeyKey::F4,
        HotkeyKey::F5,
        HotkeyKey::F6,
        HotkeyKey::F7,
        HotkeyKey::F8,
        HotkeyKey::F9,
        HotkeyKey::F10,
        HotkeyKey::F11,
        HotkeyKey::F12,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HotkeyKey::None => "None",
            HotkeyKey::F1 => "F1",
            HotkeyKey::F2 => "F2",
            HotkeyKey::F3 => "F3",
            HotkeyKey::F4 => "F4",
            HotkeyKey::F5 => "F5",
            HotkeyKey::F6 => "F6",
            HotkeyKey::F7 => "F7",
            HotkeyKey::F8 => "F8",
            HotkeyKey::F9 => "F9",
            HotkeyKey::F10 => "F10",
            HotkeyKey::F11 => "F11",
            HotkeyKey::F12 => "F12",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        HotkeyKey::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for HotkeyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Stored values from older versions or hand-edited files may hold anything;
// an unrecognized key name loads as None instead of failing the whole config.
impl<'de> Deserialize<'de> for HotkeyKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(HotkeyKey::from_name(&name).unwrap_or(HotkeyKey::None))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    Backup,
    Restore,
}

/// Current resolved key for each action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HotkeyBindings {
    pub backup: HotkeyKey,
    pub restore: HotkeyKey,
}

impl HotkeyBindings {
    pub fn set(&mut self, action: HotkeyAction, key: HotkeyKey) {
        match action {
            HotkeyAction::Backup => self.backup = key,
            HotkeyAction::Restore => self.restore = key,
        }
    }
}

/// Map a key-down event to at most one action. Backup is checked before
/// Restore, so a key bound to both actions backs up rather than restores.
pub fn resolve_action(key: HotkeyKey, bindings: &HotkeyBindings) -> Option<HotkeyAction> {
    if key == HotkeyKey::None {
        return None;
    }
    if key == bindings.backup {
        return Some(HotkeyAction::Backup);
    }
    if key == bindings.restore {
        return Some(HotkeyAction::Restore);
    }
    None
}

/// Capability handle over a stream of global key-down events.
///
/// Implementations deliver the callback from their own thread. `subscribe`
/// and `unsubscribe` are each called exactly once over the life of the
/// process; after `unsubscribe` returns no further callbacks fire.
pub trait KeySource {
    fn subscribe(&mut self, on_key_down: Box<dyn Fn(HotkeyKey) + Send>) -> io::Result<()>;
    fn unsubscribe(&mut self);
}

/// Routes key-down events to engine actions on the currently selected slot.
pub struct HotkeyDispatcher {
    session: Arc<Session>,
    sink: Arc<dyn StatusSink>,
}

impl HotkeyDispatcher {
    pub fn new(session: Arc<Session>, sink: Arc<dyn StatusSink>) -> Self {
        HotkeyDispatcher { session, sink }
    }

    /// Runs on the key-source thread. Every failure is reported through the
    /// status sink; nothing crosses back into the event source. Without a
    /// vault or a selected slot this is a no-op.
    pub fn on_key_down(&self, key: HotkeyKey) {
        let Some(action) = resolve_action(key, &self.session.bindings()) else {
            return;
        };
        let Some(vault) = self.session.current_vault() else {
            return;
        };
        let Some(index) = self.session.selected_slot() else {
            return;
        };

        match action {
            HotkeyAction::Backup => match vault.backup(index) {
                Ok(BackupOutcome::Created(_)) => self.sink.show_info("Backup created."),
                Ok(BackupOutcome::AlreadyExists) => {
                    self.sink.show_info("Save is already backed up.")
                }
                Err(e) => self.sink.show_error(&e.to_string()),
            },
            HotkeyAction::Restore => match vault.restore(index) {
                Ok(RestoreOutcome::Restored(_)) => self.sink.show_info("Save restored."),
                Ok(RestoreOutcome::NoBackups) => {
                    self.sink.show_info("There are no backups for this slot.")
                }
                Err(e) => self.sink.show_error(&e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Vault;
    use crate::status::{StatusLevel, StatusNote};
    use std::fs;
    use std::sync::Mutex;

    #[test]
    fn none_never_resolves() {
        let bindings = HotkeyBindings {
            backup: HotkeyKey::None,
            restore: HotkeyKey::None,
        };
        assert_eq!(resolve_action(HotkeyKey::None, &bindings), None);
        assert_eq!(resolve_action(HotkeyKey::F1, &bindings), None);
    }

    #[test]
    fn backup_wins_when_both_bindings_share_a_key() {
        let bindings = HotkeyBindings {
            backup: HotkeyKey::F5,
            restore: HotkeyKey::F5,
        };
        assert_eq!(
            resolve_action(HotkeyKey::F5, &bindings),
            Some(HotkeyAction::Backup)
        );
    }

    #[test]
    fn unbound_keys_resolve_to_nothing() {
        let bindings = HotkeyBindings {
            backup: HotkeyKey::F5,
            restore: HotkeyKey::F9,
        };
        assert_eq!(
            resolve_action(HotkeyKey::F9, &bindings),
            Some(HotkeyAction::Restore)
        );
        assert_eq!(resolve_action(HotkeyKey::F2, &bindings), None);
    }

    #[test]
    fn unknown_key_names_deserialize_to_none() {
        assert_eq!(
            serde_json::from_str::<HotkeyKey>("\"F13\"").unwrap(),
            HotkeyKey::None
        );
        assert_eq!(
            serde_json::from_str::<HotkeyKey>("\"F4\"").unwrap(),
            HotkeyKey::F4
        );
    }

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<StatusNote>>);

    impl StatusSink for RecordingSink {
        fn show_info(&self, message: &str) {
            self.0.lock().unwrap().push(StatusNote {
                level: StatusLevel::Info,
                text: message.to_string(),
            });
        }
        fn show_error(&self, message: &str) {
            self.0.lock().unwrap().push(StatusNote {
                level: StatusLevel::Error,
                text: message.to_string(),
            });
        }
    }

    fn dispatcher_over(dir: &std::path::Path) -> (HotkeyDispatcher, Arc<RecordingSink>) {
        let session = Arc::new(Session::new(HotkeyBindings {
            backup: HotkeyKey::F5,
            restore: HotkeyKey::F9,
        }));
        session.set_vault(Some(Arc::new(Vault::new(dir.to_path_buf()))));
        session.select_slot(Some(3));
        let sink = Arc::new(RecordingSink::default());
        (HotkeyDispatcher::new(session, sink.clone()), sink)
    }

    #[test]
    fn dispatch_runs_the_bound_action() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gamedata_3.ato"), b"savedata").unwrap();
        let (dispatcher, sink) = dispatcher_over(dir.path());

        dispatcher.on_key_down(HotkeyKey::F5);
        let backups = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(backups, 2);

        dispatcher.on_key_down(HotkeyKey::F9);
        let notes = sink.0.lock().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "Backup created.");
        assert_eq!(notes[1].text, "Save restored.");
    }

    #[test]
    fn dispatch_reports_failures_instead_of_propagating() {
        let dir = tempfile::tempdir().unwrap();
        let (dispatcher, sink) = dispatcher_over(dir.path());

        // no active save: the error must land in the sink
        dispatcher.on_key_down(HotkeyKey::F5);
        let notes = sink.0.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, StatusLevel::Error);
    }

    #[test]
    fn dispatch_without_a_selected_slot_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let (dispatcher, sink) = dispatcher_over(dir.path());
        dispatcher.session.select_slot(None);

        dispatcher.on_key_down(HotkeyKey::F5);
        assert!(sink.0.lock().unwrap().is_empty());
    }
}
