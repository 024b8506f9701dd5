//! Adapter implementations for port traits.
//!
//! - `live/` holds the real implementations (Drive, local folders, remove.bg, zip, console)
//! - `recording/` records interactions to cassettes
//! - `replaying/` replays interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
