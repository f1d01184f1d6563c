use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> =
    LazyLock::new(|| PathBuf::from(env::var("HOME").unwrap()));

pub static PATH_LOCAL_SHARE: LazyLock<PathBuf> = LazyLock::new(|| PATH_HOME.join(".local/share"));

/// Where settings live. Respects XDG_DATA_HOME.
pub static PATH_VAULT: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("atovault");
    }
    PATH_LOCAL_SHARE.join("atovault")
});

/// Steam app id for Across the Obelisk.
const STEAM_APPID: &str = "1385380";

/// Path from a Proton prefix down to the game's save directory.
const SAVE_SUBPATH: &str =
    "pfx/drive_c/users/steamuser/AppData/LocalLow/Dreamsite Games/AcrossTheObelisk";

/// Locate the directory that holds the per-player save folders.
///
/// ATOVAULT_SAVE_PATH overrides everything. Otherwise probe the usual Steam
/// installs (native, the ~/.steam symlink, Flatpak) for the game's compatdata
/// prefix. Returns None when the game data can't be found; startup treats
/// that as fatal.
pub fn locate_save_base() -> Option<PathBuf> {
    if let Ok(path) = env::var("ATOVAULT_SAVE_PATH") {
        return Some(PathBuf::from(path));
    }

    let steam_roots = [
        PATH_LOCAL_SHARE.join("Steam"),
        PATH_HOME.join(".steam/steam"),
        PATH_HOME.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"),
    ];

    for root in &steam_roots {
        let base = root
            .join("steamapps/compatdata")
            .join(STEAM_APPID)
            .join(SAVE_SUBPATH);
        if base.is_dir() {
            return Some(base);
        }
    }
    None
}
