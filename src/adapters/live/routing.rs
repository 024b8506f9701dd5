//! Chooses a fetcher by the shape of the locator.

use crate::ports::photo_fetcher::{FetchFuture, PhotoFetcher};

/// Sends `http(s)://` locators to the remote fetcher and everything else to
/// the local one.
pub struct RoutingFetcher {
    remote: Box<dyn PhotoFetcher>,
    local: Box<dyn PhotoFetcher>,
}

impl RoutingFetcher {
    /// Route between the given fetchers.
    #[must_use]
    pub fn new(remote: Box<dyn PhotoFetcher>, local: Box<dyn PhotoFetcher>) -> Self {
        Self { remote, local }
    }
}

/// Whether `locator` is a web link.
#[must_use]
pub fn is_remote(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

impl PhotoFetcher for RoutingFetcher {
    fn fetch(&self, locator: &str) -> FetchFuture<'_> {
        if is_remote(locator) {
            self.remote.fetch(locator)
        } else {
            self.local.fetch(locator)
        }
    }
}
