//! Repository root detection

use std::fs;
use std::path::Path;

use super::config::CONTROL_DIR;

/// Returns true when `dir` has an immediate child directory named `.git`
///
/// The name comparison is case-insensitive. Only direct children are looked at,
/// and any I/O error simply means "not a repository".
pub fn is_repository(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry.file_type().is_ok_and(|ft| ft.is_dir())
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(CONTROL_DIR))
    })
}
