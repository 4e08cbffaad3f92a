//! Error types emitted by the Paseo CLI.
//!
//! Helpers return `Result<_, CliError>`, so keep variants boxed or small
//! enough for `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use paseo_core::RouteError;
use paseo_data::catalog::CatalogError;
use paseo_data::directions::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Paseo CLI.
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
    /// A timeout of zero seconds was configured.
    #[error("--{field} must be at least one second")]
    ZeroTimeout { field: &'static str },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist or is not a file")]
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
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Loading the place catalog failed.
    #[error(transparent)]
    LoadPlaces(#[from] CatalogError),
    /// Constructing the directions provider failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildDirectionsProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The route pipeline rejected the request.
    #[error("route planning failed: {source}")]
    Plan { source: RouteError },
    /// Serializing the planned route failed.
    #[error("failed to serialize planned route: {0}")]
    SerializeRoute(#[source] serde_json::Error),
    /// Writing the planned route failed.
    #[error("failed to write planned route: {0}")]
    WriteRouteOutput(#[source] std::io::Error),
}
