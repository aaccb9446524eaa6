use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::shared::constants::SCREENSHOT_FILE_PREFIX;

/// `eyes_closed_screenshot_YYYYmmdd_HHMMSS.png` for the given local time.
pub fn screenshot_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{SCREENSHOT_FILE_PREFIX}{}.png", at.format("%Y%m%d_%H%M%S"))
}

pub fn screenshot_path<Tz: TimeZone>(dir: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(screenshot_file_name(at))
}

/// The user's pictures directory, falling back to `~/Pictures`.
pub fn default_screenshot_dir() -> Option<PathBuf> {
    dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};

    #[test]
    fn test_file_name_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            screenshot_file_name(&at),
            "eyes_closed_screenshot_20240307_090501.png"
        );
    }

    #[test]
    fn test_path_joins_dir() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let path = screenshot_path(Path::new("/tmp/shots"), &at);
        assert_eq!(
            path,
            PathBuf::from("/tmp/shots/eyes_closed_screenshot_20231231_235959.png")
        );
    }

    #[test]
    fn test_local_time_name_has_expected_shape() {
        let name = screenshot_file_name(&Local::now());
        let stamp = name
            .strip_prefix(SCREENSHOT_FILE_PREFIX)
            .and_then(|s| s.strip_suffix(".png"))
            .unwrap();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
        assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }
}
