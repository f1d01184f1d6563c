// Global keyboard hook over evdev
// Scans /dev/input for keyboards and delivers F-key presses to the
// dispatcher from a background thread.

use crate::hotkeys::{HotkeyKey, KeySource};

use evdev::*;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Map an evdev key code to a bindable hotkey. Everything outside F1-F12
/// is ignored.
pub fn hotkey_from_code(code: KeyCode) -> Option<HotkeyKey> {
    let key = match code {
        KeyCode::KEY_F1 => HotkeyKey::F1,
        KeyCode::KEY_F2 => HotkeyKey::F2,
        KeyCode::KEY_F3 => HotkeyKey::F3,
        KeyCode::KEY_F4 => HotkeyKey::F4,
        KeyCode::KEY_F5 => HotkeyKey::F5,
        KeyCode::KEY_F6 => HotkeyKey::F6,
        KeyCode::KEY_F7 => HotkeyKey::F7,
        KeyCode::KEY_F8 => HotkeyKey::F8,
        KeyCode::KEY_F9 => HotkeyKey::F9,
        KeyCode::KEY_F10 => HotkeyKey::F10,
        KeyCode::KEY_F11 => HotkeyKey::F11,
        KeyCode::KEY_F12 => HotkeyKey::F12,
        _ => return None,
    };
    Some(key)
}

/// Collect readable keyboards: anything that can type a space.
fn scan_keyboards() -> Vec<Device> {
    let mut keyboards = Vec::new();
    for (path, dev) in evdev::enumerate() {
        let is_keyboard = dev
            .supported_keys()
            .map_or(false, |keys| keys.contains(KeyCode::KEY_SPACE));
        if !is_keyboard {
            continue;
        }
        if dev.set_nonblocking(true).is_err() {
            log::warn!(
                "evdev: failed to set non-blocking mode for {}",
                path.display()
            );
            continue;
        }
        keyboards.push(dev);
    }
    keyboards
}

/// evdev-backed implementation of the global key-event capability.
///
/// `subscribe` spawns the polling thread; `unsubscribe` stops and joins it,
/// after which no further callbacks fire. An in-flight callback finishes
/// before the join returns.
pub struct KeyboardHook {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl KeyboardHook {
    pub fn new() -> Self {
        KeyboardHook {
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

impl KeySource for KeyboardHook {
    fn subscribe(&mut self, on_key_down: Box<dyn Fn(HotkeyKey) + Send>) -> io::Result<()> {
        let mut keyboards = scan_keyboards();
        if keyboards.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no readable keyboard devices (is the user in the input group?)",
            ));
        }
        log::info!("hotkeys: listening on {} keyboard device(s)", keyboards.len());

        let stop = self.stop.clone();
        self.worker = Some(std::thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                for dev in &mut keyboards {
                    let Ok(events) = dev.fetch_events() else { continue };
                    for event in events {
                        // value 1 is the press edge; auto-repeat (2) and
                        // release (0) don't dispatch
                        if let EventSummary::Key(_, code, 1) = event.destructure() {
                            if let Some(key) = hotkey_from_code(code) {
                                on_key_down(key);
                            }
                        }
                    }
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        }));
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.stop.store(true, Ordering::Relaxed);
            let _ = worker.join();
        }
    }
}

impl Drop for KeyboardHook {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_function_keys_map_to_hotkeys() {
        assert_eq!(hotkey_from_code(KeyCode::KEY_F1), Some(HotkeyKey::F1));
        assert_eq!(hotkey_from_code(KeyCode::KEY_F12), Some(HotkeyKey::F12));
        assert_eq!(hotkey_from_code(KeyCode::KEY_A), None);
        assert_eq!(hotkey_from_code(KeyCode::KEY_SPACE), None);
    }

    #[test]
    fn unsubscribe_without_subscribe_is_a_no_op() {
        let mut hook = KeyboardHook::new();
        hook.unsubscribe();
    }
}
