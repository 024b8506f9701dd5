//! Caregiver records loaded from a CSV sheet.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::ProfileError;

/// Column names every sheet must carry. Matching is exact.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Age",
    "Location",
    "Languages",
    "Education",
    "Experience",
    "Salary",
    "Availability",
    "DriveLink",
];

/// One caregiver row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    /// 1-based data row number, used in messages only.
    #[serde(skip)]
    pub row: usize,
    /// Age in years, as written in the sheet.
    #[serde(rename = "Age")]
    pub age: String,
    /// City or area served.
    #[serde(rename = "Location")]
    pub location: String,
    /// Spoken languages.
    #[serde(rename = "Languages")]
    pub languages: String,
    /// Highest education.
    #[serde(rename = "Education")]
    pub education: String,
    /// Years of experience, as written in the sheet.
    #[serde(rename = "Experience")]
    pub experience: String,
    /// Expected salary.
    #[serde(rename = "Salary")]
    pub salary: String,
    /// Availability description.
    #[serde(rename = "Availability")]
    pub availability: String,
    /// Locator of the folder holding the caregiver's photo.
    #[serde(rename = "DriveLink")]
    pub photo_source: String,
}

/// Read every record from the CSV file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, a required column is missing, or any
/// row is malformed. No partial result is returned.
pub fn read_records(path: &Path) -> Result<Vec<Record>, ProfileError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ProfileError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open sheet {}: {e}", path.display()),
        ))
    })?;
    read_records_from(file)
}

/// Read every record from CSV data.
///
/// # Errors
///
/// See [`read_records`].
pub fn read_records_from<R: Read>(input: R) -> Result<Vec<Record>, ProfileError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| (*col).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ProfileError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<Record>().enumerate() {
        let mut record = row?;
        record.row = i + 1;
        records.push(record);
    }
    tracing::debug!(count = records.len(), "sheet loaded");
    Ok(records)
}
