// eframe app glue
// Everything here consumes the engine's public surface; the engine itself
// never talks to egui.

use crate::archive::{BackupOutcome, PruneOutcome, RestoreOutcome, Vault};
use crate::config::{VaultConfig, save_cfg};
use crate::error::VaultError;
use crate::hotkeys::{HotkeyAction, HotkeyKey};
use crate::session::Session;
use crate::slots::{SaveSlot, list_player_folders, scan_slots};
use crate::status::{StatusLevel, StatusNote};
use crate::util;

use chrono::NaiveDateTime;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

pub struct VaultApp {
    options: VaultConfig,
    session: Arc<Session>,
    status_rx: mpsc::Receiver<StatusNote>,

    base_path: PathBuf,
    players: Vec<String>,
    selected_player: Option<usize>,

    slots: Vec<SaveSlot>,
    selected_slot: Option<usize>,
    backups: Vec<NaiveDateTime>,

    infotext: String,
    info_is_error: bool,
}

impl VaultApp {
    pub fn new(
        base_path: PathBuf,
        options: VaultConfig,
        session: Arc<Session>,
        status_rx: mpsc::Receiver<StatusNote>,
    ) -> Self {
        let players = list_player_folders(&base_path).unwrap_or_default();

        let mut app = VaultApp {
            options,
            session,
            status_rx,
            base_path,
            players,
            selected_player: None,
            slots: Vec::new(),
            selected_slot: None,
            backups: Vec::new(),
            infotext: String::new(),
            info_is_error: false,
        };

        let start = app
            .options
            .last_player
            .clone()
            .and_then(|name| app.players.iter().position(|p| p == &name))
            .or(if app.players.is_empty() { None } else { Some(0) });
        match start {
            Some(i) => app.select_player(i),
            None => app.show_error("No player folders found."),
        }
        app
    }

    fn show_info(&mut self, message: &str) {
        self.infotext = message.to_string();
        self.info_is_error = false;
    }

    fn show_error(&mut self, message: &str) {
        log::warn!("{message}");
        self.infotext = message.to_string();
        self.info_is_error = true;
    }

    fn target(&self) -> Option<(Arc<Vault>, u32)> {
        let vault = self.session.current_vault()?;
        let index = self.session.selected_slot()?;
        Some((vault, index))
    }

    fn current_slot_index(&self) -> Option<u32> {
        self.selected_slot
            .and_then(|p| self.slots.get(p))
            .map(|s| s.index)
    }

    fn select_player(&mut self, i: usize) {
        let Some(name) = self.players.get(i).cloned() else {
            return;
        };
        let path = self.base_path.join(&name);
        if !path.is_dir() {
            self.show_error(&format!("Folder {} not found.", path.display()));
            self.reload_players();
            return;
        }

        self.selected_player = Some(i);
        self.session.set_vault(Some(Arc::new(Vault::new(path))));
        self.options.last_player = Some(name);
        self.persist_options();
        self.refresh_slots();
    }

    fn reload_players(&mut self) {
        self.players = list_player_folders(&self.base_path).unwrap_or_default();
        self.selected_player = None;
        self.session.set_vault(None);
        self.slots.clear();
        self.selected_slot = None;
        self.backups.clear();
    }

    fn refresh_slots(&mut self) {
        let Some(vault) = self.session.current_vault() else {
            return;
        };
        let keep = self.current_slot_index();
        match scan_slots(vault.player_path()) {
            Ok(slots) => {
                self.slots = slots;
                let pos = keep
                    .and_then(|index| self.slots.iter().position(|s| s.index == index))
                    .or(if self.slots.is_empty() { None } else { Some(0) });
                self.set_selected_slot(pos);
            }
            Err(e) => {
                self.slots.clear();
                self.set_selected_slot(None);
                self.show_error(&e.to_string());
            }
        }
    }

    fn set_selected_slot(&mut self, pos: Option<usize>) {
        self.selected_slot = pos;
        self.session
            .select_slot(pos.map(|p| self.slots[p].index));
        self.refresh_backups();
    }

    fn refresh_backups(&mut self) {
        self.backups.clear();
        let Some((vault, index)) = self.target() else {
            return;
        };
        match vault.list_backups(index) {
            Ok(backups) => self.backups = backups,
            Err(e) => self.show_error(&e.to_string()),
        }
    }

    fn persist_options(&mut self) {
        if let Err(e) = save_cfg(&self.options) {
            self.show_error(&format!("Failed to save settings: {e}"));
        }
    }

    fn apply_bindings(&mut self) {
        self.session
            .set_binding(HotkeyAction::Backup, self.options.backup_hotkey);
        self.session
            .set_binding(HotkeyAction::Restore, self.options.restore_hotkey);
        self.persist_options();
    }

    fn report_error(&mut self, e: VaultError) {
        let rescan = e.needs_rescan();
        self.show_error(&e.to_string());
        if rescan {
            self.refresh_slots();
        }
    }

    fn do_backup(&mut self) {
        let Some((vault, index)) = self.target() else {
            return;
        };
        match vault.backup(index) {
            Ok(BackupOutcome::Created(_)) => self.show_info("Backup created."),
            Ok(BackupOutcome::AlreadyExists) => self.show_info("Save is already backed up."),
            Err(e) => self.report_error(e),
        }
        self.refresh_backups();
    }

    fn do_restore(&mut self) {
        let Some((vault, index)) = self.target() else {
            return;
        };
        match vault.restore(index) {
            Ok(RestoreOutcome::Restored(_)) => self.show_info("Save restored."),
            Ok(RestoreOutcome::NoBackups) => {
                self.show_info("There are no backups for this slot.")
            }
            Err(e) => self.report_error(e),
        }
        self.refresh_backups();
    }

    fn confirm_and_prune(&mut self) {
        let Some((vault, index)) = self.target() else {
            return;
        };
        let others = self.backups.len().saturating_sub(1);
        if others == 0 {
            self.show_info("No other backups exist.");
            return;
        }
        if !util::yesno(
            "Confirm",
            &format!("Are you sure to delete {others} backup file(s)?"),
        ) {
            return;
        }
        match vault.prune(index) {
            Ok(PruneOutcome::Pruned(n)) => {
                self.show_info(&format!("Deleted {n} backup file(s)."))
            }
            Ok(PruneOutcome::Nothing) => self.show_info("No other backups exist."),
            Err(e) => self.report_error(e),
        }
        self.refresh_backups();
    }

    /// Pull in results of hotkey-invoked actions from the key-source thread.
    fn drain_status(&mut self) {
        let mut refreshed = false;
        while let Ok(note) = self.status_rx.try_recv() {
            match note.level {
                StatusLevel::Info => self.show_info(&note.text),
                StatusLevel::Error => self.show_error(&note.text),
            }
            refreshed = true;
        }
        if refreshed {
            // a hotkey action may have changed the file set
            self.refresh_slots();
        }
    }

    fn draw_selectors(&mut self, ui: &mut egui::Ui) {
        let mut pick_player = None;
        ui.horizontal(|ui| {
            ui.label("Player:");
            let current = self
                .selected_player
                .and_then(|i| self.players.get(i))
                .cloned()
                .unwrap_or_else(|| "-".to_string());
            egui::ComboBox::from_id_salt("player")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for (i, name) in self.players.iter().enumerate() {
                        if ui
                            .selectable_label(self.selected_player == Some(i), name)
                            .clicked()
                        {
                            pick_player = Some(i);
                        }
                    }
                });
        });
        if let Some(i) = pick_player {
            self.select_player(i);
        }

        let mut pick_slot = None;
        ui.horizontal(|ui| {
            ui.label("Save slot:");
            let current = self
                .selected_slot
                .and_then(|p| self.slots.get(p))
                .map(|s| s.display_name())
                .unwrap_or_else(|| "-".to_string());
            egui::ComboBox::from_id_salt("slot")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for (p, slot) in self.slots.iter().enumerate() {
                        if ui
                            .selectable_label(self.selected_slot == Some(p), slot.display_name())
                            .clicked()
                        {
                            pick_slot = Some(p);
                        }
                    }
                });
        });
        if let Some(p) = pick_slot {
            self.set_selected_slot(Some(p));
        }
    }

    fn draw_actions(&mut self, ui: &mut egui::Ui) {
        enum Pending {
            Backup,
            Restore,
            Prune,
            OpenFolder,
        }

        let has_slot = self.current_slot_index().is_some();
        let mut pending = None;
        ui.horizontal(|ui| {
            if ui.add_enabled(has_slot, egui::Button::new("Backup")).clicked() {
                pending = Some(Pending::Backup);
            }
            if ui.add_enabled(has_slot, egui::Button::new("Restore")).clicked() {
                pending = Some(Pending::Restore);
            }
            if ui.add_enabled(has_slot, egui::Button::new("Prune")).clicked() {
                pending = Some(Pending::Prune);
            }
            if ui.button("Open Folder").clicked() {
                pending = Some(Pending::OpenFolder);
            }
        });
        match pending {
            Some(Pending::Backup) => self.do_backup(),
            Some(Pending::Restore) => self.do_restore(),
            Some(Pending::Prune) => self.confirm_and_prune(),
            Some(Pending::OpenFolder) => {
                if let Some(vault) = self.session.current_vault() {
                    util::open_folder(vault.player_path());
                }
            }
            None => {}
        }
    }

    fn draw_backup_list(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Backups ({})", self.backups.len()));
        egui::ScrollArea::vertical()
            .max_height(180.0)
            .show(ui, |ui| {
                if self.backups.is_empty() {
                    ui.weak("No backups yet.");
                }
                for stamp in &self.backups {
                    ui.label(stamp.format("%Y/%m/%d %H:%M:%S").to_string());
                }
            });
    }

    fn draw_hotkey_options(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Backup hotkey:");
            egui::ComboBox::from_id_salt("backup_key")
                .selected_text(self.options.backup_hotkey.name())
                .show_ui(ui, |ui| {
                    for key in HotkeyKey::ALL {
                        if ui
                            .selectable_label(self.options.backup_hotkey == key, key.name())
                            .clicked()
                        {
                            self.options.set_hotkey(HotkeyAction::Backup, key);
                            changed = true;
                        }
                    }
                });
            ui.label("Restore hotkey:");
            egui::ComboBox::from_id_salt("restore_key")
                .selected_text(self.options.restore_hotkey.name())
                .show_ui(ui, |ui| {
                    for key in HotkeyKey::ALL {
                        if ui
                            .selectable_label(self.options.restore_hotkey == key, key.name())
                            .clicked()
                        {
                            self.options.set_hotkey(HotkeyAction::Restore, key);
                            changed = true;
                        }
                    }
                });
        });
        if changed {
            self.apply_bindings();
        }
    }
}

impl eframe::App for VaultApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_status();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let color = if self.info_is_error {
                egui::Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.colored_label(color, &self.infotext);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Across the Obelisk save vault");
            ui.add_space(6.0);
            self.draw_selectors(ui);
            ui.separator();
            self.draw_actions(ui);
            ui.separator();
            self.draw_backup_list(ui);
            ui.separator();
            self.draw_hotkey_options(ui);
        });

        // hotkey results arrive from another thread; keep polling
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
