//! CLI argument parsing with clap.

use clap::Parser;

use crate::config::DefaultsConfig;

/// Caregiver profile card generator.
///
/// Reads a CSV of caregiver records, fetches each record's photo, removes its
/// background and composites everything onto a template image.
#[derive(Parser, Debug)]
#[command(name = "nannycard", version, about)]
pub struct Cli {
    /// CSV file with the columns Age, Location, Languages, Education,
    /// Experience, Salary, Availability and `DriveLink`.
    pub sheet: String,

    /// Template image (defaults to the config value, then `Blank.png`).
    #[arg(short, long)]
    pub template: Option<String>,

    /// Where to write the finished ZIP archive.
    #[arg(short, long)]
    pub archive: Option<String>,

    /// Also copy every rendered profile image into this directory.
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Background remover: remove-bg, none.
    #[arg(short, long)]
    pub remover: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Background remover selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoverKind {
    /// The remove.bg HTTP API.
    RemoveBg,
    /// Keep the photo as-is.
    Passthrough,
}

impl Cli {
    /// Template path from the flag, falling back to the config default.
    #[must_use]
    pub fn template_path(&self, defaults: &DefaultsConfig) -> String {
        self.template.clone().unwrap_or_else(|| defaults.template.clone())
    }

    /// Archive destination from the flag, falling back to the config default.
    #[must_use]
    pub fn archive_path(&self, defaults: &DefaultsConfig) -> String {
        self.archive.clone().unwrap_or_else(|| defaults.archive.clone())
    }

    /// Resolve the background remover from the flag or the config default.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known remover.
    pub fn remover_kind(&self, defaults: &DefaultsConfig) -> Result<RemoverKind, String> {
        let name = self.remover.as_deref().unwrap_or(&defaults.remover);
        match name {
            "remove-bg" => Ok(RemoverKind::RemoveBg),
            "none" => Ok(RemoverKind::Passthrough),
            other => Err(format!("Unsupported remover '{other}'. Valid: remove-bg, none")),
        }
    }
}
