use crate::config::types::VaultConfig;
use crate::paths::PATH_VAULT;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn settings_path(dir: &Path) -> PathBuf {
    dir.join("settings.json")
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable. Individual bad hotkey values already fall back to None during
/// deserialization.
pub fn load_cfg() -> VaultConfig {
    load_cfg_from(&PATH_VAULT)
}

pub fn save_cfg(config: &VaultConfig) -> Result<(), Box<dyn Error>> {
    save_cfg_to(&PATH_VAULT, config)
}

fn load_cfg_from(dir: &Path) -> VaultConfig {
    if let Ok(file) = File::open(settings_path(dir)) {
        if let Ok(config) = serde_json::from_reader::<_, VaultConfig>(BufReader::new(file)) {
            return config;
        }
    }
    VaultConfig::default()
}

fn save_cfg_to(dir: &Path, config: &VaultConfig) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let file = File::create(settings_path(dir))?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkeys::HotkeyKey;
    use std::fs;

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = VaultConfig {
            backup_hotkey: HotkeyKey::F5,
            restore_hotkey: HotkeyKey::F9,
            last_player: Some("76561198000000000".to_string()),
        };
        save_cfg_to(dir.path(), &config).unwrap();
        assert_eq!(load_cfg_from(dir.path()), config);
    }

    #[test]
    fn missing_or_garbled_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_cfg_from(dir.path()), VaultConfig::default());

        fs::write(settings_path(dir.path()), "{not json").unwrap();
        assert_eq!(load_cfg_from(dir.path()), VaultConfig::default());
    }

    #[test]
    fn unknown_hotkey_values_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            settings_path(dir.path()),
            r#"{"backup_hotkey": "PrintScreen", "restore_hotkey": "F9"}"#,
        )
        .unwrap();

        let config = load_cfg_from(dir.path());
        assert_eq!(config.backup_hotkey, HotkeyKey::None);
        assert_eq!(config.restore_hotkey, HotkeyKey::F9);
        assert_eq!(config.last_player, None);
    }
}
