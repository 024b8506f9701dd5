//! Reporter port for user-facing progress messages.

use std::path::PathBuf;

/// Something the user should hear about during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The sheet was read.
    Loaded {
        /// Number of records.
        count: usize,
    },
    /// A profile was rendered and is ready for inspection.
    Rendered {
        /// 1-based row of the record.
        row: usize,
        /// Where the image was written.
        path: PathBuf,
    },
    /// A record was skipped for an expected reason (warning).
    Skipped {
        /// 1-based row of the record.
        row: usize,
        /// Human-readable reason.
        reason: String,
    },
    /// A record failed (error); the batch continues.
    Failed {
        /// 1-based row of the record.
        row: usize,
        /// Human-readable reason.
        reason: String,
    },
    /// The archive was built.
    Archived {
        /// Archive location.
        path: PathBuf,
        /// Number of images inside.
        entries: usize,
    },
}

/// Receives notices; advisory only.
pub trait Reporter: Send + Sync {
    /// Deliver one notice.
    fn notify(&self, notice: Notice);
}
