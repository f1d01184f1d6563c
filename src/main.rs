mod app;
mod archive;
mod config;
mod error;
mod hotkeys;
mod input;
mod paths;
mod session;
mod slots;
mod status;
mod util;

use crate::app::VaultApp;
use crate::archive::{BackupOutcome, PruneOutcome, RestoreOutcome, Vault};
use crate::config::{VaultConfig, load_cfg};
use crate::hotkeys::{HotkeyDispatcher, KeySource};
use crate::input::KeyboardHook;
use crate::session::Session;
use crate::slots::{list_player_folders, scan_slots};
use crate::status::ChannelSink;

use std::path::Path;
use std::sync::Arc;

fn main() -> eframe::Result {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        std::process::exit(0);
    }

    let Some(base_path) = paths::locate_save_base() else {
        eprintln!("[atovault] Can't find the Across the Obelisk save directory.");
        eprintln!("[atovault] Set ATOVAULT_SAVE_PATH to the folder that holds the player folders.");
        std::process::exit(1);
    };

    let options = load_cfg();

    if let Some(code) = run_cli(&args, &base_path, &options) {
        std::process::exit(code);
    }

    let session = Arc::new(Session::new(options.bindings()));
    let (sink, status_rx) = ChannelSink::new();
    let dispatcher = HotkeyDispatcher::new(session.clone(), Arc::new(sink));

    let mut hook = KeyboardHook::new();
    if let Err(e) = hook.subscribe(Box::new(move |key| dispatcher.on_key_down(key))) {
        log::warn!("global hotkeys disabled: {e}");
    }

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([480.0, 440.0])
            .with_min_inner_size([400.0, 360.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "atovault",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(VaultApp::new(
                base_path, options, session, status_rx,
            )))
        }),
    );

    // torn down exactly once; an in-flight dispatch finishes before this returns
    hook.unsubscribe();
    result
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let i = args.iter().position(|a| a == flag)?;
    args.get(i + 1).map(String::as_str)
}

fn slot_arg(args: &[String], flag: &str) -> Option<u32> {
    arg_value(args, flag).and_then(|v| v.parse().ok())
}

/// Non-interactive mode: run one engine operation and exit.
/// Returns the exit code, or None when no CLI flag asked for one.
fn run_cli(args: &[String], base: &Path, options: &VaultConfig) -> Option<i32> {
    let wants_cli = ["--list", "--backup", "--restore", "--prune"]
        .iter()
        .any(|flag| args.iter().any(|a| a == flag));
    if !wants_cli {
        return None;
    }

    let player = arg_value(args, "--player")
        .map(str::to_string)
        .or_else(|| options.last_player.clone())
        .or_else(|| {
            list_player_folders(base)
                .ok()
                .and_then(|folders| folders.into_iter().next())
        });
    let Some(player) = player else {
        eprintln!("[atovault] No player folders under {}", base.display());
        return Some(1);
    };
    let vault = Vault::new(base.join(&player));

    if args.iter().any(|a| a == "--list") {
        let slots = match scan_slots(vault.player_path()) {
            Ok(slots) => slots,
            Err(e) => {
                eprintln!("[atovault] {e}");
                return Some(1);
            }
        };
        println!("Player {player}");
        for slot in slots {
            let backups = vault.list_backups(slot.index).map_or(0, |b| b.len());
            println!(
                "  [{:2}] {} - {} backup(s)",
                slot.index,
                slot.display_name(),
                backups
            );
        }
        return Some(0);
    }

    if args.iter().any(|a| a == "--backup") {
        let Some(index) = slot_arg(args, "--backup") else {
            eprintln!("{}", USAGE_TEXT);
            return Some(1);
        };
        return Some(match vault.backup(index) {
            Ok(BackupOutcome::Created(path)) => {
                println!("Backup created: {}", path.display());
                0
            }
            Ok(BackupOutcome::AlreadyExists) => {
                println!("Save is already backed up.");
                0
            }
            Err(e) => {
                eprintln!("[atovault] {e}");
                1
            }
        });
    }

    if args.iter().any(|a| a == "--restore") {
        let Some(index) = slot_arg(args, "--restore") else {
            eprintln!("{}", USAGE_TEXT);
            return Some(1);
        };
        return Some(match vault.restore(index) {
            Ok(RestoreOutcome::Restored(path)) => {
                println!("Restored from {}", path.display());
                0
            }
            Ok(RestoreOutcome::NoBackups) => {
                println!("There are no backups for this slot.");
                0
            }
            Err(e) => {
                eprintln!("[atovault] {e}");
                1
            }
        });
    }

    if args.iter().any(|a| a == "--prune") {
        let Some(index) = slot_arg(args, "--prune") else {
            eprintln!("{}", USAGE_TEXT);
            return Some(1);
        };
        if !args.iter().any(|a| a == "--yes") {
            eprintln!(
                "[atovault] Pruning deletes all but the newest backup. Re-run with --yes to confirm."
            );
            return Some(1);
        }
        return Some(match vault.prune(index) {
            Ok(PruneOutcome::Pruned(n)) => {
                println!("Deleted {n} backup file(s).");
                0
            }
            Ok(PruneOutcome::Nothing) => {
                println!("Nothing to prune.");
                0
            }
            Err(e) => {
                eprintln!("[atovault] {e}");
                1
            }
        });
    }

    None
}

static USAGE_TEXT: &str = r#"
Versioned backups for Across the Obelisk save slots.
Usage: atovault [OPTIONS]

Without options the GUI starts, with global F-key hotkeys for backup/restore.

Options:
    --list                List save slots and backup counts, then exit
    --backup <slot>       Back up the slot's active save, then exit
    --restore <slot>      Restore the slot's newest backup, then exit
    --prune <slot>        Delete all but the slot's newest backup (needs --yes)
    --yes                 Confirm the prune
    --player <folder>     Player folder to operate on (default: last used)
    --help                Show this text
"#;
