//! Nannycard - caregiver profile card generator.

mod adapters;
mod batch;
mod cassette;
mod cli;
mod compose;
mod config;
mod context;
mod error;
mod layout;
mod logging;
mod output;
mod ports;
mod render;
mod sheet;
mod text;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use image::RgbaImage;

use crate::adapters::live::console::ConsoleReporter;
use crate::adapters::live::zip_archive::ZipArchiver;
use crate::batch::{BatchDriver, BatchSummary};
use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::ProfileError;
use crate::layout::Layout;
use crate::ports::{Notice, Reporter};
use crate::render::Renderer;
use crate::text::FontSet;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ProfileError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ProfileError::Config)?;
    let remover = cli.remover_kind(&config.defaults).map_err(ProfileError::InvalidArgument)?;

    // Read the whole sheet before touching any image
    let records = sheet::read_records(Path::new(&cli.sheet))?;
    let reporter = ConsoleReporter;
    reporter.notify(Notice::Loaded { count: records.len() });

    let template_path = cli.template_path(&config.defaults);
    let template = load_template(Path::new(&template_path))?;
    let layout = Layout::default();
    layout.check_fits(template.width(), template.height())?;

    let fonts = FontSet::load(&config.fonts);
    if cli.verbose {
        eprintln!("Template: {template_path} ({}x{})", template.width(), template.height());
        if fonts.is_builtin() {
            let (bold, regular) = (&config.fonts.bold, &config.fonts.regular);
            eprintln!("Fonts: built-in (could not load {bold} / {regular})");
        }
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("NANNYCARD_REPLAY").ok();
    let is_recording = std::env::var("NANNYCARD_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path), remover)?, None)
    } else if is_recording {
        if cli.verbose {
            eprintln!("Recording mode enabled");
        }
        let (ctx, session) = ServiceContext::recording(remover, &config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(remover, &config)?, None)
    };

    // Render into a scratch directory, then publish
    let workspace = tempfile::Builder::new().prefix("nannycard-run-").tempdir()?;
    let driver = BatchDriver {
        renderer: Renderer {
            fetcher: ctx.fetcher.as_ref(),
            remover: ctx.remover.as_ref(),
            template: &template,
            layout: &layout,
            fonts: &fonts,
        },
        archiver: &ZipArchiver,
        reporter: &reporter,
    };
    let summary = driver.run(&records, workspace.path()).await?;

    if let Some(ref dir) = cli.out_dir {
        copy_profiles(&summary, Path::new(dir))?;
    }

    match summary.archive {
        Some(ref archive) => {
            let dest = PathBuf::from(cli.archive_path(&config.defaults));
            std::fs::copy(archive, &dest)?;
            eprintln!("Saved: {}", dest.display());
        }
        None => eprintln!("No profiles were rendered; no archive written."),
    }
    eprintln!("Done: {} rendered, {} skipped", summary.rendered.len(), summary.skipped);

    // Finish recording if active
    drop(ctx);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(())
}

fn load_template(path: &Path) -> Result<RgbaImage, ProfileError> {
    let image = image::open(path).map_err(|e| {
        ProfileError::Template(format!("Failed to load template {}: {e}", path.display()))
    })?;
    Ok(image.to_rgba8())
}

fn copy_profiles(summary: &BatchSummary, dir: &Path) -> Result<(), ProfileError> {
    std::fs::create_dir_all(dir)?;
    for path in &summary.rendered {
        if let Some(name) = path.file_name() {
            let dest = dir.join(name);
            std::fs::copy(path, &dest)?;
            eprintln!("Saved: {}", dest.display());
        }
    }
    Ok(())
}
