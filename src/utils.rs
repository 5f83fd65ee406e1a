use chrono::{DateTime, Local};

/// Characters that can't appear in a file name on at least one of the platforms we write to.
const UNSAFE_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Format used for run directory names, e.g. `2025-09-25_21-37-00`.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Replaces every character that isn't usable in a file name with an underscore. Nothing else is
/// escaped and the length is left alone.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// The archive file name a project with the provided display name is stored under.
pub fn archive_file_name(name: &str) -> String {
    format!("{}.zip", sanitize_file_name(name))
}

pub fn run_timestamp(at: DateTime<Local>) -> String {
    at.format(RUN_TIMESTAMP_FORMAT).to_string()
}
