//! Live adapter for Google Drive folders, via the Drive v3 REST API.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ProfileError;
use crate::ports::photo_fetcher::{FetchFuture, FetchedFile, PhotoFetcher};
use crate::render::is_recognized_image;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const GOOGLE_NATIVE_PREFIX: &str = "application/vnd.google-apps.";

/// Fetches the photo of a shared Drive folder.
///
/// Only the entry that would be chosen as the photo is downloaded; the rest of
/// the folder is never transferred.
pub struct DriveFetcher {
    client: Client,
    api_key: Option<String>,
}

impl DriveFetcher {
    /// Create a fetcher. Without a key every fetch fails with
    /// [`ProfileError::MissingApiKey`].
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self { client: Client::new(), api_key }
    }

    async fn fetch_folder(&self, locator: &str) -> Result<Vec<FetchedFile>, ProfileError> {
        let key = self.api_key.as_deref().ok_or_else(|| ProfileError::MissingApiKey {
            service: "Google Drive".into(),
            env_var: "GOOGLE_API_KEY".into(),
        })?;
        let folder_id = folder_id_from_link(locator)?;

        let listing = self.list(&folder_id, key).await?;
        tracing::debug!(folder = %folder_id, entries = listing.len(), "drive folder listed");

        let Some(photo) = photo_candidate(&listing) else {
            return Ok(Vec::new());
        };
        let data = self.download(&photo.id, key).await?;
        Ok(vec![FetchedFile { name: photo.name.clone(), data }])
    }

    async fn list(&self, folder_id: &str, key: &str) -> Result<Vec<DriveFile>, ProfileError> {
        let query = format!("'{folder_id}' in parents and trashed = false");
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(DRIVE_FILES_URL).query(&[
                ("q", query.as_str()),
                ("orderBy", "name"),
                ("pageSize", "1000"),
                ("fields", "nextPageToken,files(id,name,mimeType)"),
                ("key", key),
            ]);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(ProfileError::Api { status: status.as_u16(), message: body });
            }

            let page: FileList = serde_json::from_str(&body).map_err(|e| ProfileError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse folder listing: {e}"),
            })?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(files)
    }

    async fn download(&self, file_id: &str, key: &str) -> Result<Vec<u8>, ProfileError> {
        let response = self
            .client
            .get(format!("{DRIVE_FILES_URL}/{file_id}"))
            .query(&[("alt", "media"), ("key", key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            return Err(ProfileError::Api { status: status.as_u16(), message });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl PhotoFetcher for DriveFetcher {
    fn fetch(&self, locator: &str) -> FetchFuture<'_> {
        let locator = locator.to_string();
        Box::pin(async move { self.fetch_folder(&locator).await })
    }
}

/// First listed entry that is a regular file with a photo suffix.
/// Google-native entries (folders, Docs, shortcuts) have no downloadable bytes.
fn photo_candidate(listing: &[DriveFile]) -> Option<&DriveFile> {
    listing
        .iter()
        .filter(|f| !f.mime_type.starts_with(GOOGLE_NATIVE_PREFIX))
        .find(|f| is_recognized_image(&f.name))
}

/// Extract the folder id from a share link: the last path segment, with any
/// query string removed.
///
/// # Errors
///
/// Returns [`ProfileError::Locator`] if no usable id remains.
pub fn folder_id_from_link(link: &str) -> Result<String, ProfileError> {
    let path = link.trim().split(['?', '#']).next().unwrap_or_default();
    let id = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

    let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || "-_".contains(c));
    if valid {
        Ok(id.to_string())
    } else {
        Err(ProfileError::Locator(link.to_string()))
    }
}

// Drive API response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    #[serde(default)]
    mime_type: String,
}
