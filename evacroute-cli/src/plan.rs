//! Plan command implementation for the evacroute CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use evacroute_core::{EvacuationPlan, PlanRequest, Planner, PlannerConfig, RequestLimits};
use evacroute_fs::{create_utf8_file, open_utf8_file};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Write};

use crate::{
    ARG_PLAN_AVERAGE_SPEED, ARG_PLAN_MAX_ZONES, ARG_PLAN_OUTPUT, ARG_PLAN_REQUEST, CliError,
    ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Choose which zones to evacuate within the vehicle capacity, \
                 serving high-severity zones first, and find the shortest \
                 order to visit them before reaching the safe zone. The \
                 request is a JSON document with zones, vehicle_capacity and \
                 safe_zone.",
    about = "Plan an evacuation from a JSON request"
)]
#[ortho_config(prefix = "EVACROUTE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the plan to this file instead of stdout.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Average vehicle speed used for the travel-time estimate.
    #[arg(long = ARG_PLAN_AVERAGE_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
    /// Reject requests with more zones than this.
    #[arg(long = ARG_PLAN_MAX_ZONES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_zones: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Destination for the response; stdout when `None`.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Planner settings.
    pub(crate) planner: PlannerConfig,
    /// Bounds applied while validating the request.
    pub(crate) limits: RequestLimits,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match evacroute_fs::file_is_file(path) {
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
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut planner = PlannerConfig::default();
        if let Some(speed) = args.average_speed_kmh {
            planner.average_speed_kmh = speed;
        }
        planner.validate()?;

        Ok(Self {
            request_path,
            output: args.output,
            planner,
            limits: RequestLimits {
                max_zones: args.max_zones,
            },
        })
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

/// Plan the configured request and write the response to the configured
/// output, or to `stdout` when none is set.
pub(super) fn run_plan_with(args: PlanArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config)?;
    match &config.output {
        Some(path) => {
            let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            write_plan_response(&mut writer, &plan)?;
            writer.flush().map_err(CliError::WritePlanOutput)?;
            log::info!("wrote evacuation plan to {path}");
            Ok(())
        }
        None => write_plan_response(stdout, &plan),
    }
}

fn execute_plan(config: &PlanConfig) -> Result<EvacuationPlan, CliError> {
    let request = load_plan_request(&config.request_path)?;
    Planner::with_config(config.planner.clone())?
        .plan_request(&request, config.limits)
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_response(writer: &mut dyn Write, plan: &EvacuationPlan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialisePlanResponse)?;
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
