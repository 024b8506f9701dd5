//! Progress messages on stderr.

use crate::ports::reporter::{Notice, Reporter};

/// Prints notices to stderr, one line each.
pub struct ConsoleReporter;

/// The line printed for `notice`.
#[must_use]
pub fn format_notice(notice: &Notice) -> String {
    match notice {
        Notice::Loaded { count } => format!("Loaded {count} caregiver records"),
        Notice::Rendered { row, path } => {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            format!("Profile {row}: {name}")
        }
        Notice::Skipped { row, reason } => format!("Warning: row {row} skipped: {reason}"),
        Notice::Failed { row, reason } => format!("Error (row {row}): {reason}"),
        Notice::Archived { path, entries } => {
            format!("Archived {entries} profile(s) into {}", path.display())
        }
    }
}

impl Reporter for ConsoleReporter {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", format_notice(&notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rendered_shows_file_name_only() {
        let line = format_notice(&Notice::Rendered {
            row: 3,
            path: PathBuf::from("/tmp/run/Mary_Jane.png"),
        });
        assert_eq!(line, "Profile 3: Mary_Jane.png");
    }

    #[test]
    fn skips_and_failures_are_distinguishable() {
        let skip = format_notice(&Notice::Skipped { row: 2, reason: "No image".into() });
        let fail = format_notice(&Notice::Failed { row: 2, reason: "boom".into() });
        assert!(skip.starts_with("Warning:"));
        assert!(fail.starts_with("Error (row 2)"));
    }
}
