use dialog::{Choice, DialogBox};

use std::path::Path;

/// Blocking yes/no prompt, used before destructive operations.
pub fn yesno(title: &str, contents: &str) -> bool {
    if let Ok(prompt) = dialog::Question::new(contents).title(title).show() {
        if prompt == Choice::Yes {
            return true;
        }
    }
    false
}

/// Reveal a directory in the user's file manager.
pub fn open_folder(path: &Path) {
    if let Err(e) = std::process::Command::new("xdg-open").arg(path).status() {
        log::warn!("xdg-open failed for {}: {e}", path.display());
    }
}
