//! Cassette replay integration tests with zero network I/O.
//!
//! All tests set `NANNYCARD_REPLAY` to a cassette file path so that the binary
//! never contacts Google Drive or remove.bg.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "Age,Location,Languages,Education,Experience,Salary,Availability,DriveLink";
const MARY: &str = "https://drive.google.com/drive/folders/1maryJaneFolder?usp=sharing";
const EMPTY: &str = "https://drive.google.com/drive/folders/1emptyFolder";
const PRIVATE: &str = "https://drive.google.com/drive/folders/1privateFolder";

fn cmd(work: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nannycard");
    cmd.current_dir(work)
        .env("NANNYCARD_REPLAY", fixtures_dir().join("drive_session.cassette.yaml"))
        .env("NANNYCARD_CONFIG", work.join("no-such-config.toml"))
        .env_remove("NANNYCARD_REC")
        .env_remove("REMOVE_BG_API_KEY")
        .env_remove("GOOGLE_API_KEY");
    cmd
}

/// Absolute path to the `test_fixtures` directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

fn setup(links: &[&str]) -> (TempDir, PathBuf) {
    let work = TempDir::new().unwrap();
    RgbaImage::from_pixel(1080, 1350, Rgba([255, 255, 255, 255]))
        .save(work.path().join("Blank.png"))
        .unwrap();
    let mut sheet = format!("{HEADER}\n");
    for link in links {
        sheet.push_str(&format!("29,Kisumu,Luo and English,Diploma,7,KES 22000,Weekdays,{link}\n"));
    }
    let path = work.path().join("nannies.csv");
    std::fs::write(&path, sheet).unwrap();
    (work, path)
}

#[test]
fn replayed_drive_folder_produces_archive() {
    let (work, sheet) = setup(&[MARY]);

    cmd(work.path())
        .arg(sheet.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("Profile 1: Mary_Jane.png"))
        .stderr(predicate::str::contains("Saved: nanny_profiles.zip"));

    let archive = std::fs::File::open(work.path().join("nanny_profiles.zip")).unwrap();
    let zip = zip::ZipArchive::new(archive).unwrap();
    assert_eq!(zip.file_names().collect::<Vec<_>>(), vec!["Mary_Jane.png"]);
}

#[test]
fn replayed_failures_are_reported_per_record() {
    let (work, sheet) = setup(&[MARY, EMPTY, PRIVATE]);

    cmd(work.path())
        .arg(sheet.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: row 2 skipped: No image found in"))
        .stderr(predicate::str::contains("Error (row 3)"))
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("Done: 1 rendered, 2 skipped"));
}

#[test]
fn exhausted_cassette_fails_the_record_not_the_run() {
    let (work, sheet) = setup(&[MARY, EMPTY, PRIVATE, MARY]);

    cmd(work.path())
        .arg(sheet.to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error (row 4)"))
        .stderr(predicate::str::contains("Cassette exhausted"));
}

#[test]
fn passthrough_replays_fetches_only() {
    let (work, sheet) = setup(&[MARY]);

    cmd(work.path())
        .args([sheet.to_str().unwrap(), "--remover", "none"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Profile 1: Mary_Jane.png"));
}

#[test]
fn missing_cassette_is_fatal() {
    let (work, sheet) = setup(&[MARY]);

    cmd(work.path())
        .env("NANNYCARD_REPLAY", "/nonexistent/session.cassette.yaml")
        .arg(sheet.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read cassette"));
}
