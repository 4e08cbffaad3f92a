//! Plan command implementation for the Paseo CLI.
//!
//! The command reads a JSON plan request (origin, destination and an
//! optional category order), loads the place catalog from disk, runs the
//! route optimizer against a walking-directions service and prints the
//! resulting route as JSON.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use paseo_core::{
    Category, DirectionsProvider, Endpoint, OptimizerConfig, OrderingAuthority, RouteOptimizer,
    RouteRequest, RouteResult, ServiceArea,
};
use paseo_data::catalog::open_candidate_pool;
use paseo_data::directions::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, HttpDirectionsProvider, HttpDirectionsProviderConfig,
};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_API_KEY, ARG_PLAN_DIRECTIONS_BASE_URL, ARG_PLAN_ORDERING, ARG_PLAN_PLACES,
    ARG_PLAN_REQUEST, ARG_PLAN_TIMEOUT_SECS, CliError, ENV_PLAN_PLACES, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a walking route. The request file names the origin, \
                 the destination and optionally the order of place categories \
                 to visit. Candidate places are read from a JSON catalog and \
                 the walking path is requested from a Google-Directions-compatible \
                 service.",
    about = "Plan a walking route"
)]
#[ortho_config(prefix = "PASEO")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing the plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the JSON place catalog.
    #[arg(long = ARG_PLAN_PLACES, value_name = "path")]
    #[serde(default)]
    pub(crate) places: Option<Utf8PathBuf>,
    /// Directions endpoint URL.
    #[arg(long = ARG_PLAN_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// API key for the directions service.
    #[arg(long = ARG_PLAN_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Timeout for the directions request in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Who decides the visiting order when no categories are given.
    #[arg(long = ARG_PLAN_ORDERING, value_name = "core|provider")]
    #[serde(default)]
    pub(crate) ordering: Option<OrderingAuthority>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) places: Utf8PathBuf,
    pub(crate) directions_base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) ordering: OrderingAuthority,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        Self::require_existing(&self.places, ARG_PLAN_PLACES)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn provider_config(&self) -> HttpDirectionsProviderConfig {
        let config = HttpDirectionsProviderConfig::new(self.directions_base_url.clone())
            .with_timeout(self.timeout);
        match &self.api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let places = args.places.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_PLACES,
            env: ENV_PLAN_PLACES,
        })?;
        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::ZeroTimeout {
                field: ARG_PLAN_TIMEOUT_SECS,
            });
        }
        Ok(Self {
            request_path,
            places,
            directions_base_url: args
                .directions_base_url
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
            api_key: args.api_key.filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(timeout_secs),
            ordering: args.ordering.unwrap_or_default(),
        })
    }
}

/// On-disk shape of a plan request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PlanRequestFile {
    pub(crate) origin: Endpoint,
    pub(crate) destination: Endpoint,
    /// Category visiting order; empty means nearest-neighbour over all places.
    #[serde(default)]
    pub(crate) categories: Vec<Category>,
}

/// Builds a directions provider for the current plan invocation.
pub(super) trait PlanProviderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn DirectionsProvider>, CliError>;
}

pub(super) struct DefaultPlanProviderBuilder;

impl PlanProviderBuilder for DefaultPlanProviderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn DirectionsProvider>, CliError> {
        let provider =
            HttpDirectionsProvider::with_config(config.provider_config()).map_err(|source| {
                CliError::BuildDirectionsProvider {
                    base_url: config.directions_base_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(provider))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanProviderBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_plan(args, builder)?;
    write_route(writer, &route)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn PlanProviderBuilder,
) -> Result<RouteResult, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request_file = load_plan_request(&config.request_path)?;
    let area = ServiceArea::default();
    let report = open_candidate_pool(&config.places, &area)?;
    info!(
        "planning with {} candidate place(s); {} catalog record(s) rejected",
        report.pool.len(),
        report.rejected.len()
    );
    let request = RouteRequest {
        origin: request_file.origin,
        destination: request_file.destination,
        category_order: request_file.categories,
        candidates: report.pool,
    };

    let provider = builder.build(&config)?;
    let optimizer = RouteOptimizer::with_config(
        provider,
        OptimizerConfig::default()
            .with_area(area)
            .with_ordering(config.ordering),
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime
        .block_on(optimizer.optimize_route(&request))
        .map_err(|source| CliError::Plan { source })
}

/// Loads a JSON-encoded plan request from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequestFile, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route(writer: &mut dyn Write, route: &RouteResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(route).map_err(CliError::SerializeRoute)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRouteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteRouteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
