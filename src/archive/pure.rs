// Pure backup naming and ordering - no I/O

use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use std::time::SystemTime;

/// Timestamp layout used in backup file names. Fixed width and zero padded,
/// so lexicographic order on the full name is chronological order.
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Backups are `gamedata_<index>_<yyyyMMdd_HHmmss>.ato`. The digit counts
/// keep turn files (`gamedata_0_turn.ato`) out of the match.
static BACKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^gamedata_(\d{1,2})_(\d{8}_\d{6})\.ato$").unwrap());

pub fn backup_file_name(index: u32, stamp: &str) -> String {
    format!("gamedata_{index}_{stamp}.ato")
}

/// Render a file modification time as a backup stamp, local time,
/// truncated to whole seconds.
pub fn format_stamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format(STAMP_FORMAT).to_string()
}

/// Extract slot index and stamp from a backup file name.
pub fn parse_backup_file_name(name: &str) -> Option<(u32, &str)> {
    let caps = BACKUP_RE.captures(name)?;
    let index = caps.get(1)?.as_str().parse().ok()?;
    Some((index, caps.get(2)?.as_str()))
}

pub fn parse_stamp(stamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}

/// Order backup file names newest first.
pub fn sort_newest_first(names: &mut [String]) {
    names.sort_unstable_by(|a, b| b.cmp(a));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_backup_file_names() {
        assert_eq!(
            backup_file_name(3, "20240102_100000"),
            "gamedata_3_20240102_100000.ato"
        );
    }

    #[test]
    fn parses_backup_file_names() {
        assert_eq!(
            parse_backup_file_name("gamedata_3_20240102_100000.ato"),
            Some((3, "20240102_100000"))
        );
        assert_eq!(
            parse_backup_file_name("gamedata_23_19991231_235959.ato"),
            Some((23, "19991231_235959"))
        );
        // active saves, turn files and malformed stamps don't match
        assert_eq!(parse_backup_file_name("gamedata_3.ato"), None);
        assert_eq!(parse_backup_file_name("gamedata_0_turn.ato"), None);
        assert_eq!(parse_backup_file_name("gamedata_3_2024012_100000.ato"), None);
        assert_eq!(parse_backup_file_name("gamedata_3_20240102_1000.ato"), None);
        assert_eq!(parse_backup_file_name("gamedata_123_20240102_100000.ato"), None);
    }

    #[test]
    fn newest_first_is_descending_lexicographic() {
        let mut names = vec![
            "gamedata_3_20240101_090000.ato".to_string(),
            "gamedata_3_20240102_100000.ato".to_string(),
            "gamedata_3_20231231_235959.ato".to_string(),
        ];
        sort_newest_first(&mut names);
        assert_eq!(names[0], "gamedata_3_20240102_100000.ato");
        assert_eq!(names[2], "gamedata_3_20231231_235959.ato");
    }

    #[test]
    fn parses_stamps() {
        let dt = parse_stamp("20240102_100000").unwrap();
        assert_eq!(dt.format("%Y/%m/%d %H:%M:%S").to_string(), "2024/01/02 10:00:00");
        assert_eq!(parse_stamp("2024-01-02"), None);
    }
}
