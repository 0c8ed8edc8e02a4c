//! Formatting of per-repository result lines

use super::config::{
    BRANCH_MARKER, DEFAULT_BRANCHES, FAILURE_MARKER, SUCCESS_MARKER, TAG_PREFIX,
};
use crate::git::SyncAction;

const ERROR_MESSAGE_MAX_LENGTH: usize = 80;
const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 77;

/// Whether the branch is worth printing: default branches and tags are not
pub fn show_branch(branch: &str) -> bool {
    let is_default = DEFAULT_BRANCHES
        .iter()
        .any(|default| branch.eq_ignore_ascii_case(default));
    !is_default && !branch.starts_with(TAG_PREFIX)
}

/// Builds the one-line result for a repository, e.g.
/// `fetch | work/api | 🌿️  feature/login | 👍🏼️`
pub fn format_result(name: &str, branch: &str, action: SyncAction, succeeded: bool) -> String {
    let mut line = String::new();

    if let Some(prefix) = action.prefix() {
        line.push_str(prefix);
        line.push_str(" | ");
    }

    line.push_str(name);
    line.push_str(" | ");

    if show_branch(branch) {
        line.push_str(&format!("{BRANCH_MARKER}  {branch} | "));
    }

    line.push_str(if succeeded { SUCCESS_MARKER } else { FAILURE_MARKER });
    line
}

/// Cleans and formats git error output for a single log line
pub fn clean_error_message(error: &str) -> String {
    // Collapse newlines, tabs and runs of whitespace
    let cleaned = error.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.contains("authentication") || cleaned.contains("Permission denied") {
        "authentication failed".to_string()
    } else if cleaned.contains("conflict") || cleaned.contains("diverged") {
        "merge conflict".to_string()
    } else if cleaned.contains("no tracking information") {
        "no upstream".to_string()
    } else if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
