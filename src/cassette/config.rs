//! Opens a cassette for replay.

use std::path::Path;

use super::format::{Cassette, KNOWN_CALLS};
use super::replayer::CassetteReplayer;
use crate::error::ProfileError;

/// Read, parse and check a cassette file, then build its replayer.
///
/// Every interaction must belong to a port this tool records; a cassette
/// from another tool or an older layout is refused up front instead of
/// failing record by record.
///
/// # Errors
///
/// Returns [`ProfileError::Config`] if the file cannot be read or parsed, or
/// holds an interaction for an unknown port/method.
pub fn open_replayer(path: &Path) -> Result<CassetteReplayer, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ProfileError::Config(format!("Failed to read cassette {}: {e}", path.display()))
    })?;
    let cassette: Cassette = serde_yaml::from_str(&content).map_err(|e| {
        ProfileError::Config(format!("Failed to parse cassette {}: {e}", path.display()))
    })?;

    if let Some(odd) = cassette
        .interactions
        .iter()
        .find(|i| !KNOWN_CALLS.contains(&(i.port.as_str(), i.method.as_str())))
    {
        return Err(ProfileError::Config(format!(
            "Cassette {} has an unknown interaction {}::{} at seq {}",
            path.display(),
            odd.port,
            odd.method,
            odd.seq
        )));
    }

    tracing::debug!(
        path = %path.display(),
        interactions = cassette.interactions.len(),
        "cassette loaded"
    );
    Ok(CassetteReplayer::new(&cassette))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = "name: t\nrecorded_at: 2026-03-02T09:15:00Z\ncommit: abc\n";

    fn write(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.cassette.yaml");
        std::fs::write(&path, format!("{HEAD}{body}")).unwrap();
        (dir, path)
    }

    #[test]
    fn opens_fetch_and_strip_session() {
        let (_dir, path) = write(
            "interactions:\n\
             - {seq: 0, port: photo_fetcher, method: fetch, input: {}, output: {Ok: []}}\n\
             - {seq: 1, port: background_remover, method: strip, output: {Err: boom}}\n",
        );
        let mut replayer = open_replayer(&path).unwrap();
        assert_eq!(replayer.next_interaction("photo_fetcher", "fetch").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("background_remover", "strip").unwrap().seq, 1);
    }

    #[test]
    fn unknown_port_is_refused() {
        let (_dir, path) = write(
            "interactions:\n\
             - {seq: 4, port: image_generator, method: generate, output: {Ok: {}}}\n",
        );
        let err = open_replayer(&path).unwrap_err();
        assert!(matches!(err, ProfileError::Config(_)));
        assert!(err.to_string().contains("image_generator::generate at seq 4"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = open_replayer(Path::new("/nonexistent/cassette.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read cassette"));
    }

    #[test]
    fn garbage_is_config_error() {
        let (_dir, path) = write("interactions: [[[");
        assert!(open_replayer(&path).unwrap_err().to_string().contains("Failed to parse"));
    }
}
