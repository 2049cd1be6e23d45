use crate::license_analysis::domain::Issue;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to gate on license compliance while still
/// distinguishing a failed scan from a scan that found problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the scan produced no issues
    Success = 0,
    /// At least one issue of any kind was found
    IssuesFound = 1,
    /// The scan could not run (bad arguments, bad config, provider failure, I/O error)
    ScanFailed = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a finished scan's issue list to its exit status
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues.is_empty() {
            ExitCode::Success
        } else {
            ExitCode::IssuesFound
        }
    }
}

impl serde::Serialize for ExitCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::IssuesFound => write!(f, "Issues Found (1)"),
            ExitCode::ScanFailed => write!(f, "Scan Failed (2)"),
        }
    }
}

/// Application-specific errors for license scanning.
///
/// Only contract violations and provider failures are errors. Missing,
/// ambiguous or conflicting license evidence is reported as data.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid configuration: {details}\n\n💡 Hint: Check allowed_licenses, ignored_packages and overrides in your config file")]
    Configuration { details: String },

    #[error("Schema error: {details}")]
    Schema { details: String },

    #[error("Invalid package identifier '{value}': {reason}")]
    InvalidPackageId { value: String, reason: String },

    #[error("Failed to obtain data for package '{package}'\nDetails: {details}\n\n💡 Hint: The scan was aborted before any results were produced")]
    ProviderFailure { package: String, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
