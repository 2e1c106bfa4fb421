use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use servease_core::{ReferenceData, SchedulingOptions};
use servease_provider_zippopotam::BASE_URL;

use crate::cli::Cli;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub lookup: LookupConfig,
    pub scheduling: SchedulingOptions,
    /// JSON reference data; the bundled directory is used when unset.
    pub reference_data: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LookupConfig {
    pub enabled: bool,
    pub base_url: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: BASE_URL.to_owned(),
        }
    }
}

impl AppConfig {
    /// Load the TOML file at `path`, or defaults when no path is given.
    ///
    /// A relative `reference_data` path is taken relative to the config file.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(reference) = config.reference_data.as_mut()
            && reference.is_relative()
            && let Some(dir) = path.parent()
        {
            *reference = dir.join(&*reference);
        }

        Ok(config)
    }

    /// Apply command line overrides.
    pub(crate) fn with_overrides(mut self, cli: &Cli) -> Self {
        if cli.offline {
            self.lookup.enabled = false;
        }
        if let Some(mode) = cli.match_mode {
            self.scheduling.match_mode = mode.into();
        }
        if let Some(policy) = cli.unmatched {
            self.scheduling.unmatched = policy.into();
        }
        self
    }

    pub(crate) fn reference_data(&self) -> Result<ReferenceData> {
        match &self.reference_data {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read reference data {}", path.display()))?;
                ReferenceData::from_json(&raw)
                    .with_context(|| format!("Invalid reference data {}", path.display()))
            }
            None => ReferenceData::builtin().context("Bundled reference data is corrupt"),
        }
    }
}
