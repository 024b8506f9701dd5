//! Runs the renderer over every record and archives the results.

use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::ports::{Archiver, Notice, Reporter, ARCHIVE_NAME};
use crate::render::Renderer;
use crate::sheet::Record;

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rendered card paths, in record order.
    pub rendered: Vec<PathBuf>,
    /// Records that produced no card.
    pub skipped: usize,
    /// The archive, when at least one card was rendered.
    pub archive: Option<PathBuf>,
}

/// Sequential batch over a sheet.
pub struct BatchDriver<'a> {
    /// Per-record renderer.
    pub renderer: Renderer<'a>,
    /// Packs the cards at the end.
    pub archiver: &'a dyn Archiver,
    /// Receives progress notices.
    pub reporter: &'a dyn Reporter,
}

impl BatchDriver<'_> {
    /// Render every record into `out_dir`, then bundle the cards into
    /// `out_dir/profiles.zip`.
    ///
    /// A failing record is reported and skipped; it never stops the batch.
    ///
    /// # Errors
    ///
    /// Only archive construction can fail the run.
    pub async fn run(
        &self,
        records: &[Record],
        out_dir: &Path,
    ) -> Result<BatchSummary, ProfileError> {
        let mut summary = BatchSummary::default();

        for record in records {
            match self.renderer.render(record, out_dir).await {
                Ok(profile) => {
                    tracing::debug!(row = record.row, name = %profile.name, "profile rendered");
                    let path = profile.path.clone();
                    self.reporter.notify(Notice::Rendered { row: record.row, path });
                    summary.rendered.push(profile.path);
                }
                Err(e) => {
                    summary.skipped += 1;
                    let reason = e.to_string();
                    tracing::debug!(row = record.row, error = %reason, "record skipped");
                    if e.is_warning() {
                        self.reporter.notify(Notice::Skipped { row: record.row, reason });
                    } else {
                        self.reporter.notify(Notice::Failed { row: record.row, reason });
                    }
                }
            }
        }

        if !summary.rendered.is_empty() {
            let path = self.archiver.bundle(&summary.rendered, &out_dir.join(ARCHIVE_NAME))?;
            self.reporter
                .notify(Notice::Archived { path: path.clone(), entries: summary.rendered.len() });
            summary.archive = Some(path);
        }

        Ok(summary)
    }
}
