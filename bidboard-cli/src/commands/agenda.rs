//! The combined agenda view: stored events + derived project milestones,
//! run through the persisted filter pipeline.

use anyhow::{Context, Result};

use bidboard_core::prefs::FilterPrefsFile;
use bidboard_core::store::EventGateway;
use bidboard_core::{GroupFilter, ProjectRecord, filter_events, merge, milestones};

use crate::config::GlobalConfig;
use crate::render;

pub async fn run(
    config: &GlobalConfig,
    gateway: &EventGateway,
    group_arg: Option<String>,
) -> Result<()> {
    let stored = gateway.list().await?;

    let projects = load_projects(config)?;
    let derived = milestones::derive_milestones(&projects);
    let mut synthesized = merge::merge_specials(&derived);
    synthesized.extend(milestones::boundary_events(&derived));

    let prefs_file = FilterPrefsFile::new(config.prefs_path()?);
    let prefs = prefs_file.load()?;
    let group = match group_arg {
        Some(raw) => GroupFilter::parse(&raw).with_context(|| {
            format!(
                "Unknown group '{}'. Available: all, admin, projects, \
                 project-start-date, project-end-date",
                raw
            )
        })?,
        None => prefs.group,
    };

    let visible = filter_events(&stored, &synthesized, &prefs.toggles, group);
    render::print_events(&visible);
    Ok(())
}

/// Load the read-only project feed. No configured feed means no milestones.
fn load_projects(config: &GlobalConfig) -> Result<Vec<ProjectRecord>> {
    let Some(path) = &config.projects_path else {
        return Ok(Vec::new());
    };
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project feed at {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse project feed at {}", path.display()))
}
