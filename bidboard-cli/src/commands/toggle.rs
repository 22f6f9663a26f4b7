//! Flip category toggles and set the group filter.
//!
//! Changes are written back immediately; the next `agenda` run picks them up.

use anyhow::{Context, Result, bail};

use bidboard_core::GroupFilter;
use bidboard_core::prefs::{FilterPrefs, FilterPrefsFile};

use crate::config::GlobalConfig;

const TOGGLE_NAMES: &str =
    "job-walks, bid-due, rfi-deadlines, pre-con, project-schedules, material-delivery";

pub fn run(config: &GlobalConfig, name: Option<String>, group: Option<String>) -> Result<()> {
    let prefs_file = FilterPrefsFile::new(config.prefs_path()?);
    let mut prefs = prefs_file.load()?;
    let mut changed = false;

    if let Some(raw) = group {
        prefs.group = GroupFilter::parse(&raw).with_context(|| {
            format!(
                "Unknown group '{}'. Available: all, admin, projects, \
                 project-start-date, project-end-date",
                raw
            )
        })?;
        changed = true;
    }

    if let Some(name) = name {
        let flag = match name.as_str() {
            "job-walks" => &mut prefs.toggles.job_walks,
            "bid-due" => &mut prefs.toggles.bid_due,
            "rfi-deadlines" => &mut prefs.toggles.rfi_deadlines,
            "pre-con" => &mut prefs.toggles.pre_con_meetings,
            "project-schedules" => &mut prefs.toggles.project_schedules,
            "material-delivery" => &mut prefs.toggles.material_delivery,
            _ => bail!("Unknown toggle '{}'. Available: {}", name, TOGGLE_NAMES),
        };
        *flag = !*flag;
        changed = true;
    }

    if changed {
        prefs_file.save(&prefs)?;
    }
    print_state(&prefs);
    Ok(())
}

fn print_state(prefs: &FilterPrefs) {
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    println!("Group filter: {}", prefs.group.label());
    println!("  job-walks          {}", on_off(prefs.toggles.job_walks));
    println!("  bid-due            {}", on_off(prefs.toggles.bid_due));
    println!("  rfi-deadlines      {}", on_off(prefs.toggles.rfi_deadlines));
    println!("  pre-con            {}", on_off(prefs.toggles.pre_con_meetings));
    println!("  project-schedules  {}", on_off(prefs.toggles.project_schedules));
    println!("  material-delivery  {}", on_off(prefs.toggles.material_delivery));
}
