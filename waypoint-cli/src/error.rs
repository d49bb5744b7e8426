//! Error types emitted by the Waypoint CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypoint_core::{PreferenceTableError, RequestValidationError};

/// Errors emitted by the Waypoint CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// `--mode` named no known mode.
    #[error("unknown mode {value:?} (expected live, preview or no-location)")]
    InvalidMode {
        /// Value as supplied.
        value: String,
    },
    /// `--now` was not an RFC 3339 timestamp.
    #[error("invalid --now timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Value as supplied.
        value: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },
    /// Opening the request file failed.
    #[error("failed to open recommendation request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse recommendation request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The request failed boundary validation.
    #[error("recommendation request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// First problem found.
        #[source]
        source: RequestValidationError,
    },
    /// Opening the preference table failed.
    #[error("failed to open preference table at {path:?}: {source}")]
    OpenPreferences {
        /// Table path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The preference table was malformed or unusable.
    #[error("preference table at {path:?} is invalid: {source}")]
    InvalidPreferences {
        /// Table path.
        path: Utf8PathBuf,
        /// Decode or validation failure.
        #[source]
        source: PreferenceTableError,
    },
    /// Serialising the recommendations failed.
    #[error("failed to serialise recommendations: {0}")]
    SerialiseRecommendations(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
