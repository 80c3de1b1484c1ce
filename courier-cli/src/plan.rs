//! Plan command implementation for the courier CLI.

use std::io::{BufReader, Write};
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{
    DeliveryRequest, HaversineTravelTime, PlanResponse, PlanStatus, Planner, Solver,
};
use courier_solver_astar::{AStarConfig, AStarSolver, Deduplication, HeuristicKind, ParseOptionError};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_DEDUPLICATION, ARG_PLAN_ENVIRONMENT, ARG_PLAN_HEURISTIC, ARG_PLAN_MAX_EXPANSIONS,
    ARG_PLAN_REQUEST, ARG_PLAN_SOLVER, ARG_PLAN_SPEED, CliError, ENV_PLAN_REQUEST,
};

/// Deployment label used when none is configured.
pub(crate) const DEFAULT_ENVIRONMENT: &str = "development";

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan the fastest delivery run for each request in a JSON \
                 file. The file holds one DeliveryRequest object or an array \
                 of them; one result per request is printed as JSON.",
    about = "Plan delivery routes"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing one or more delivery requests.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Deployment label echoed in every result.
    #[arg(long = ARG_PLAN_ENVIRONMENT, value_name = "name")]
    #[serde(default)]
    pub(crate) environment: Option<String>,
    /// Route solver: `astar` or `exhaustive`.
    #[arg(long = ARG_PLAN_SOLVER, value_name = "name")]
    #[serde(default)]
    pub(crate) solver: Option<String>,
    /// Search heuristic: `nearest-unvisited`, `direct-sum` or `zero`.
    #[arg(long = ARG_PLAN_HEURISTIC, value_name = "name")]
    #[serde(default)]
    pub(crate) heuristic: Option<String>,
    /// Search state merging: `stop-and-visited` or `visited-set`.
    #[arg(long = ARG_PLAN_DEDUPLICATION, value_name = "name")]
    #[serde(default)]
    pub(crate) deduplication: Option<String>,
    /// Upper bound on expanded search states.
    #[arg(long = ARG_PLAN_MAX_EXPANSIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_expansions: Option<u64>,
    /// Average courier speed in kilometres per hour.
    #[arg(long = ARG_PLAN_SPEED, value_name = "kmh")]
    #[serde(default)]
    pub(crate) speed_kmh: Option<f64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Which solver answers the requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SolverKind {
    /// Best-first search.
    #[default]
    AStar,
    /// Enumerate every valid route.
    Exhaustive,
}

impl FromStr for SolverKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a-star" => Ok(Self::AStar),
            "exhaustive" => Ok(Self::Exhaustive),
            _ => Err(ParseOptionError {
                option: "solver",
                value: s.to_owned(),
            }),
        }
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Deployment label echoed in every result.
    pub(crate) environment: String,
    /// Route solver.
    pub(crate) solver: SolverKind,
    /// Search options for [`SolverKind::AStar`].
    pub(crate) search: AStarConfig,
    /// Travel-time model shared by the solver and the reported totals.
    pub(crate) travel_time: HaversineTravelTime,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_PLAN_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

fn parse_option<T>(value: Option<String>, field: &'static str) -> Result<T, CliError>
where
    T: FromStr<Err = ParseOptionError> + Default,
{
    value.map_or_else(
        || Ok(T::default()),
        |raw| raw.parse().map_err(|source| CliError::InvalidOption { field, source }),
    )
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let environment = args
            .environment
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned());
        let solver: SolverKind = parse_option(args.solver, ARG_PLAN_SOLVER)?;
        let heuristic: HeuristicKind = parse_option(args.heuristic, ARG_PLAN_HEURISTIC)?;
        let deduplication: Deduplication =
            parse_option(args.deduplication, ARG_PLAN_DEDUPLICATION)?;
        let travel_time = args
            .speed_kmh
            .map_or_else(
                || Ok(HaversineTravelTime::default()),
                HaversineTravelTime::new,
            )
            .map_err(CliError::InvalidSpeed)?;

        Ok(Self {
            request_path,
            environment,
            solver,
            search: AStarConfig {
                heuristic,
                deduplication,
                max_expansions: Some(
                    args.max_expansions
                        .unwrap_or(AStarConfig::DEFAULT_MAX_EXPANSIONS),
                ),
                time_budget: None,
            },
            travel_time,
        })
    }
}

/// Builds a solver instance for the current plan invocation.
pub(super) trait PlanSolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(super) struct DefaultPlanSolverBuilder;

impl PlanSolverBuilder for DefaultPlanSolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
        match config.solver {
            SolverKind::AStar => Ok(Box::new(AStarSolver::with_travel_time(
                config.travel_time,
                config.search.clone(),
            ))),
            SolverKind::Exhaustive => build_exhaustive(config),
        }
    }
}

#[cfg(feature = "solver-exhaustive")]
fn build_exhaustive(config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
    Ok(Box::new(
        courier_solver_exhaustive::ExhaustiveSolver::with_travel_time(config.travel_time),
    ))
}

#[cfg(not(feature = "solver-exhaustive"))]
fn build_exhaustive(_config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-exhaustive",
        action: "--solver exhaustive",
    })
}

/// One result line of the command output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanEnvelope {
    /// Deployment label from configuration.
    pub(crate) environment: String,
    /// The planning outcome for one request.
    #[serde(flatten)]
    pub(crate) response: PlanResponse,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestBatch {
    Many(Vec<DeliveryRequest>),
    One(DeliveryRequest),
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanSolverBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let envelopes = execute_plan(args, builder)?;
    write_plan_output(writer, &envelopes)
}

fn execute_plan(
    args: PlanArgs,
    builder: &dyn PlanSolverBuilder,
) -> Result<Vec<PlanEnvelope>, CliError> {
    let config = resolve_plan_config(args)?;
    let requests = load_delivery_requests(&config.request_path)?;
    let solver = builder.build(&config)?;
    let planner = Planner::with_travel_time(solver, config.travel_time);
    Ok(requests
        .iter()
        .map(|request| {
            let response = planner.plan(request);
            log_outcome(&config.environment, &response);
            PlanEnvelope {
                environment: config.environment.clone(),
                response,
            }
        })
        .collect())
}

fn log_outcome(environment: &str, response: &PlanResponse) {
    match (&response.route, response.estimated_time_hours) {
        (Some(route), Some(hours)) if response.status == PlanStatus::Ok => {
            let joined = route
                .iter()
                .map(|stop| stop.short_tag())
                .collect::<Vec<_>>()
                .join(" -> ");
            info!("Environment: {environment} | Best route: {joined}, Estimated Time: {hours} hours");
        }
        _ => warn!(
            "Environment: {environment} | {:?}: {}",
            response.status,
            response.message.as_deref().unwrap_or("no details")
        ),
    }
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads one or more JSON-encoded [`DeliveryRequest`]s from disk.
pub(super) fn load_delivery_requests(path: &Utf8Path) -> Result<Vec<DeliveryRequest>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenDeliveryRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let batch: RequestBatch =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseDeliveryRequest {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match batch {
        RequestBatch::Many(requests) => requests,
        RequestBatch::One(request) => vec![request],
    })
}

fn write_plan_output(writer: &mut dyn Write, envelopes: &[PlanEnvelope]) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(envelopes).map_err(CliError::SerialisePlanResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
