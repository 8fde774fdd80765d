use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use paycalc_core::TaxYearRegistry;
use paycalc_data::{LoadMode, ScheduleLoader};
use tracing::{debug, info};

use crate::config::Settings;

/// Everything a command needs: resolved settings and the loaded registry.
#[derive(Debug, Clone)]
pub struct App {
    pub settings: Settings,
    pub registry: TaxYearRegistry,
}

impl App {
    /// Reads the settings file (if any), then builds the registry from the
    /// built-in years plus every schedule file, settings first, flags last.
    pub fn load(
        config: Option<&Path>,
        extra_schedules: &[PathBuf],
    ) -> Result<Self> {
        let settings = Settings::load(config)?;

        let schedule_files: Vec<&Path> = settings
            .schedules
            .iter()
            .chain(extra_schedules)
            .map(PathBuf::as_path)
            .collect();
        let registry = build_registry(&schedule_files)?;

        Ok(Self { settings, registry })
    }
}

/// Built-in years with each schedule file upserted over them in order.
pub fn build_registry(schedule_files: &[&Path]) -> Result<TaxYearRegistry> {
    let mut registry = TaxYearRegistry::with_builtin_years();

    for path in schedule_files {
        debug!(path = %path.display(), "loading schedule file");
        let file = File::open(path)
            .with_context(|| format!("Failed to open schedule file: {}", path.display()))?;
        let summary = ScheduleLoader::load(&mut registry, file, LoadMode::Upsert)
            .with_context(|| format!("Failed to load schedules from: {}", path.display()))?;
        info!(
            path = %path.display(),
            added = ?summary.added,
            updated = ?summary.updated,
            "loaded schedule file"
        );
    }

    Ok(registry)
}
