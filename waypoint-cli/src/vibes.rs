//! Vibes command: list the categories a traveller may select.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypoint_core::PreferenceTable;

use crate::recommend::{load_preferences, require_existing};
use crate::{ARG_PREFERENCES, CliError};

/// CLI arguments for the `vibes` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List the vibes offered by a preference table")]
#[ortho_config(prefix = "WAYPOINT")]
pub(crate) struct VibesArgs {
    /// Path to a JSON preference table replacing the built-in one.
    #[arg(long = ARG_PREFERENCES, value_name = "path")]
    #[serde(default)]
    pub(crate) preferences: Option<Utf8PathBuf>,
}

pub(super) fn run_vibes(args: VibesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_vibes_with(args, &mut stdout)
}

pub(super) fn run_vibes_with(args: VibesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let table = match &merged.preferences {
        Some(path) => {
            require_existing(path, ARG_PREFERENCES)?;
            load_preferences(path)?
        }
        None => PreferenceTable::default(),
    };
    for vibe in table.vibes() {
        writeln!(writer, "{}", vibe.as_str()).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
