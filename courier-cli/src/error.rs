//! Error types emitted by the courier CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::TravelTimeError;
use courier_solver_astar::ParseOptionError;
use thiserror::Error;

/// Errors emitted by the courier CLI.
///
/// Requests that fail validation are not errors: they are reported as
/// `invalid_input` entries in the command output.
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
        field: &'static str,
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// A search option did not name a known value.
    #[error("invalid --{field}: {source}")]
    InvalidOption {
        field: &'static str,
        #[source]
        source: ParseOptionError,
    },
    /// The configured courier speed is not usable.
    #[error("invalid --speed-kmh: {0}")]
    InvalidSpeed(#[source] TravelTimeError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the delivery request file failed.
    #[error("failed to open delivery request at {path:?}: {source}")]
    OpenDeliveryRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Delivery request JSON could not be decoded.
    #[error("failed to parse delivery request JSON at {path:?}: {source}")]
    ParseDeliveryRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Serialising the plan responses failed.
    #[error("failed to serialise plan response: {0}")]
    SerialisePlanResponse(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
