//! Recommend command implementation for the Waypoint CLI.

use std::io::{BufReader, Write};
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypoint_core::{
    Candidate, JourneyContext, Mode, PreferenceTable, RecommendationEngine, RecommendationOptions,
    Recommendations, validate_request,
};
use waypoint_fs::{create_utf8_file, open_utf8_file};

use crate::{
    ARG_DIVERSITY_WEIGHT, ARG_MAX_RESULTS, ARG_MODE, ARG_NOW, ARG_OUTPUT, ARG_PREFERENCES,
    ARG_RECOMMEND_REQUEST, CliError, ENV_RECOMMEND_REQUEST,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate amenities for a journey. The request file \
                 holds the journey context, the candidates and optional \
                 engine options; flags override the options it carries.",
    about = "Recommend amenities for a journey"
)]
#[ortho_config(prefix = "WAYPOINT")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing the recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON preference table replacing the built-in one.
    #[arg(long = ARG_PREFERENCES, value_name = "path")]
    #[serde(default)]
    pub(crate) preferences: Option<Utf8PathBuf>,
    /// Maximum number of results.
    #[arg(long = ARG_MAX_RESULTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Strength of the repeated-category penalty.
    #[arg(long = ARG_DIVERSITY_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) diversity_weight: Option<f64>,
    /// Force a mode: live, preview or no-location.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Evaluate as if it were this RFC 3339 instant.
    #[arg(long = ARG_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<String>,
    /// Write results to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) preferences: Option<Utf8PathBuf>,
    pub(crate) max_results: Option<usize>,
    pub(crate) diversity_weight: Option<f64>,
    pub(crate) mode: Option<Mode>,
    pub(crate) now: Option<DateTime<Utc>>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_RECOMMEND_REQUEST)?;
        if let Some(path) = &self.preferences {
            require_existing(path, ARG_PREFERENCES)?;
        }
        Ok(())
    }

    /// Overlay command-line options on those carried by the request.
    fn apply_overrides(&self, options: &mut RecommendationOptions) {
        if let Some(max_results) = self.max_results {
            options.max_results = max_results;
        }
        if let Some(weight) = self.diversity_weight {
            options.diversity_weight = weight;
        }
        if self.mode.is_some() {
            options.mode = self.mode;
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_REQUEST,
            env: ENV_RECOMMEND_REQUEST,
        })?;
        let mode = args
            .mode
            .map(|value| Mode::from_str(&value).map_err(|_| CliError::InvalidMode { value }))
            .transpose()?;
        let now = args.now.map(parse_timestamp).transpose()?;
        Ok(Self {
            request_path,
            preferences: args.preferences,
            max_results: args.max_results,
            diversity_weight: args.diversity_weight,
            mode,
            now,
            output: args.output,
        })
    }
}

fn parse_timestamp(value: String) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(&value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|source| CliError::InvalidTimestamp { value, source })
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match waypoint_fs::file_is_file(path) {
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

/// JSON body accepted by `waypoint recommend`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct RecommendRequest {
    pub(crate) context: JourneyContext,
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    #[serde(default)]
    pub(crate) options: RecommendationOptions,
    /// Fixed evaluation instant; the wall clock is used when absent.
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let recommendations = execute_recommend(&config)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_json(&mut file, &recommendations)?;
            info!("wrote recommendations to {path}");
            Ok(())
        }
        None => write_json(writer, &recommendations),
    }
}

fn execute_recommend(config: &RecommendConfig) -> Result<Recommendations, CliError> {
    let mut request = load_request(&config.request_path)?;
    config.apply_overrides(&mut request.options);
    validate_request(&request.options, &request.candidates).map_err(|source| {
        CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        }
    })?;

    let table = match &config.preferences {
        Some(path) => load_preferences(path)?,
        None => PreferenceTable::default(),
    };
    let engine = RecommendationEngine::new(table);
    let now = config.now.or(request.now).unwrap_or_else(Utc::now);
    debug!(
        "evaluating {} candidates for {} at {now}",
        request.candidates.len(),
        request.context.venue_name
    );
    Ok(engine.recommend(&request.context, &request.candidates, &request.options, now))
}

/// Load a JSON-encoded [`RecommendRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<RecommendRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a JSON preference table.
pub(crate) fn load_preferences(path: &Utf8Path) -> Result<PreferenceTable, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPreferences {
        path: path.to_path_buf(),
        source,
    })?;
    PreferenceTable::from_json_reader(BufReader::new(file)).map_err(|source| {
        CliError::InvalidPreferences {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_json(writer: &mut dyn Write, value: &impl Serialize) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(value).map_err(CliError::SerialiseRecommendations)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
