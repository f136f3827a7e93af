//! Built-in allow-set of archive, media and executable extensions.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Extensions (uppercase, no dot) whose downloads are handed to the companion.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "3GP", "7Z", "AAC", "ACE", "AIF", "APK", "ARJ", "ASF", "AVI", "BIN", "BZ2", "EXE", "GZ",
    "GZIP", "IMG", "ISO", "LZH", "M4A", "M4V", "MKV", "MOV", "MP3", "MP4", "MPA", "MPE", "MPEG",
    "MPG", "MSI", "MSU", "OGG", "OGV", "PDF", "PLJ", "PPS", "PPT", "QT", "RA", "RAR", "RM",
    "RMVB", "SEA", "SIT", "SITX", "TAR", "TIF", "TIFF", "WAV", "WMA", "WMV", "Z", "ZIP",
];

fn allow_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ALLOWED_EXTENSIONS.iter().copied().collect())
}

/// True if `ext` (already uppercased) is in the allow-set.
pub fn is_allowed_extension(ext: &str) -> bool {
    allow_set().contains(ext)
}
