//! Timestamp suffixes for destination object names
//!
//! A name is split on `.`: the first segment is the stem and the last segment is
//! the extension. Segments in between are dropped, so `a.b.png` stamps to
//! `a_<ts>.png`. Names without a dot keep no extension.

use chrono::Local;

/// `YYYYMMDDhhmmss`, second resolution
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const THUMBNAIL_MARKER: &str = "thumbnail";

/// Current local wall-clock time formatted for use in object names
#[must_use]
pub fn timestamp_token() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Appends the current timestamp to the stem of `filename`
#[must_use]
pub fn stamp(filename: &str) -> String {
    stamp_with(filename, &timestamp_token())
}

/// Inserts the thumbnail marker, then appends the current timestamp
#[must_use]
pub fn stamp_thumbnail(filename: &str) -> String {
    stamp_thumbnail_with(filename, &timestamp_token())
}

/// Appends `token` to the stem of `filename`
#[must_use]
pub fn stamp_with(filename: &str, token: &str) -> String {
    let (stem, extension) = split_name(filename);
    join_name(&format!("{stem}_{token}"), extension)
}

/// Inserts the thumbnail marker, then appends `token`
#[must_use]
pub fn stamp_thumbnail_with(filename: &str, token: &str) -> String {
    let (stem, extension) = split_name(filename);
    join_name(&format!("{stem}_{THUMBNAIL_MARKER}_{token}"), extension)
}

/// Appends a counter to the stem of an already stamped name
#[must_use]
pub fn with_counter(stamped: &str, counter: usize) -> String {
    match stamped.rsplit_once('.') {
        Some((stem, extension)) => format!("{stem}_{counter}.{extension}"),
        None => format!("{stamped}_{counter}"),
    }
}

fn split_name(filename: &str) -> (&str, Option<&str>) {
    let mut segments = filename.split('.');
    let stem = segments.next().unwrap_or_default();
    (stem, segments.last())
}

fn join_name(stem: &str, extension: Option<&str>) -> String {
    match extension {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "20240102030405";

    #[test]
    fn test_stamp_simple_name() {
        assert_eq!(stamp_with("photo.png", TOKEN), "photo_20240102030405.png");
    }

    #[test]
    fn test_stamp_thumbnail_name() {
        assert_eq!(
            stamp_thumbnail_with("photo.png", TOKEN),
            "photo_thumbnail_20240102030405.png"
        );
    }

    #[test]
    fn test_stamp_drops_middle_segments() {
        assert_eq!(
            stamp_with("archive.tar.gz", TOKEN),
            "archive_20240102030405.gz"
        );
        assert_eq!(
            stamp_thumbnail_with("my.holiday.photo.jpeg", TOKEN),
            "my_thumbnail_20240102030405.jpeg"
        );
    }

    #[test]
    fn test_stamp_without_extension() {
        assert_eq!(stamp_with("README", TOKEN), "README_20240102030405");
        assert_eq!(
            stamp_thumbnail_with("README", TOKEN),
            "README_thumbnail_20240102030405"
        );
    }

    #[test]
    fn test_stamp_preserves_extension() {
        for name in ["photo.png", "a.b.c.jpeg", "x.gif", "trailing."] {
            let stamped = stamp(name);
            let original_ext = name.rsplit_once('.').map(|(_, ext)| ext);
            let stamped_ext = stamped.rsplit_once('.').map(|(_, ext)| ext);
            assert_eq!(stamped_ext, original_ext, "extension changed for {name}");
        }
    }

    #[test]
    fn test_timestamp_token_format() {
        let token = timestamp_token();
        assert_eq!(token.len(), 14);
        assert!(token.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_with_counter() {
        assert_eq!(
            with_counter("photo_20240102030405.png", 2),
            "photo_20240102030405_2.png"
        );
        assert_eq!(with_counter("README_20240102030405", 1), "README_20240102030405_1");
    }
}
