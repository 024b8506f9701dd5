//! Live adapters.

pub mod console;
pub mod drive;
pub mod local;
pub mod passthrough;
pub mod remove_bg;
pub mod routing;
pub mod zip_archive;
