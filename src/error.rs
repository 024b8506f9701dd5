//! Unified error type for nannycard.

use thiserror::Error;

/// Errors that can occur while loading input or rendering profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// An HTTP API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input sheet could not be parsed.
    #[error("Sheet error: {0}")]
    Sheet(#[from] csv::Error),

    /// The input sheet lacks one or more required columns.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The template image cannot hold the layout.
    #[error("Template error: {0}")]
    Template(String),

    /// A photo locator could not be turned into a folder reference.
    #[error("Invalid photo link '{0}'")]
    Locator(String),

    /// The fetched folder holds no recognized image file.
    #[error("No image found in {locator}")]
    NoPhoto {
        /// The photo locator that was fetched.
        locator: String,
    },

    /// Image decoding, encoding, or conversion failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Archive construction failed.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// No API key configured for a service.
    #[error("No API key for {service}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The service name.
        service: String,
        /// The environment variable name.
        env_var: String,
    },
}

impl ProfileError {
    /// Whether this failure is an expected skip rather than a real error.
    ///
    /// A folder without a usable photo is reported as a warning; everything
    /// else that stops a record is reported as an error.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoPhoto { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_all() {
        let err = ProfileError::MissingColumns(vec!["Salary".into(), "DriveLink".into()]);
        assert_eq!(err.to_string(), "Missing required column(s): Salary, DriveLink");
    }

    #[test]
    fn only_no_photo_is_a_warning() {
        assert!(ProfileError::NoPhoto { locator: "x".into() }.is_warning());
        assert!(!ProfileError::Locator("x".into()).is_warning());
        assert!(!ProfileError::Api { status: 500, message: "boom".into() }.is_warning());
    }
}
