//! The staged category filter pipeline.
//!
//! Stored and milestone events are concatenated, narrowed by the
//! single-select group filter, then narrowed again by the per-category
//! toggles. Each stage only removes events and relative input order is
//! preserved, so repeated runs over the same inputs render identically.

use serde::{Deserialize, Serialize};

use crate::event::{CalendarEvent, EventCategory};

/// Per-category visibility toggles. All default to ON.
///
/// Toggles are independent: an event is hidden when the toggle owning its
/// category is OFF, regardless of the other toggles. Loaded once at startup
/// and written back on every change via `prefs::FilterPrefsFile` — the state
/// is explicitly injected, never an ambient singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryFilterState {
    pub job_walks: bool,
    pub bid_due: bool,
    pub rfi_deadlines: bool,
    pub pre_con_meetings: bool,
    pub project_schedules: bool,
    pub material_delivery: bool,
}

impl Default for CategoryFilterState {
    fn default() -> Self {
        CategoryFilterState {
            job_walks: true,
            bid_due: true,
            rfi_deadlines: true,
            pre_con_meetings: true,
            project_schedules: true,
            material_delivery: true,
        }
    }
}

impl CategoryFilterState {
    /// Whether the toggle owning `category` is currently OFF.
    ///
    /// Categories without an owning toggle (admin, meeting, internal) are
    /// never excluded here; only the group filter can remove them.
    fn excludes(&self, category: EventCategory) -> bool {
        let enabled = match category {
            EventCategory::JobWalk => self.job_walks,
            EventCategory::BidDue => self.bid_due,
            EventCategory::RfiDeadline => self.rfi_deadlines,
            EventCategory::PreConMeeting => self.pre_con_meetings,
            EventCategory::ProjectSchedule
            | EventCategory::ProjectStartDate
            | EventCategory::ProjectEndDate => self.project_schedules,
            EventCategory::MaterialDelivery => self.material_delivery,
            EventCategory::Meeting | EventCategory::Admin | EventCategory::Internal => true,
        };
        !enabled
    }
}

/// Single-select group filter applied before the toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupFilter {
    #[default]
    All,
    Admin,
    Projects,
    ProjectStartDate,
    ProjectEndDate,
}

impl GroupFilter {
    /// Category membership per group. `None` means no narrowing (All).
    /// The start/end-date groups match exactly one category.
    pub fn members(self) -> Option<&'static [EventCategory]> {
        match self {
            GroupFilter::All => None,
            GroupFilter::Admin => Some(&[
                EventCategory::Admin,
                EventCategory::Meeting,
                EventCategory::Internal,
            ]),
            GroupFilter::Projects => Some(&[
                EventCategory::JobWalk,
                EventCategory::BidDue,
                EventCategory::RfiDeadline,
                EventCategory::PreConMeeting,
                EventCategory::ProjectSchedule,
                EventCategory::MaterialDelivery,
                EventCategory::ProjectStartDate,
                EventCategory::ProjectEndDate,
            ]),
            GroupFilter::ProjectStartDate => Some(&[EventCategory::ProjectStartDate]),
            GroupFilter::ProjectEndDate => Some(&[EventCategory::ProjectEndDate]),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Some(GroupFilter::All),
            "admin" => Some(GroupFilter::Admin),
            "projects" => Some(GroupFilter::Projects),
            "project-start-date" | "start" => Some(GroupFilter::ProjectStartDate),
            "project-end-date" | "end" => Some(GroupFilter::ProjectEndDate),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupFilter::All => "All",
            GroupFilter::Admin => "Admin",
            GroupFilter::Projects => "Projects",
            GroupFilter::ProjectStartDate => "Project Start Date",
            GroupFilter::ProjectEndDate => "Project End Date",
        }
    }
}

/// Run the pipeline: concatenate, apply the group filter, apply the toggles.
pub fn filter_events(
    stored: &[CalendarEvent],
    milestones: &[CalendarEvent],
    state: &CategoryFilterState,
    group: GroupFilter,
) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = stored.iter().chain(milestones).cloned().collect();

    if let Some(members) = group.members() {
        events.retain(|e| e.category.is_some_and(|c| members.contains(&c)));
    }

    events.retain(|e| e.category.is_none_or(|c| !state.excludes(c)));

    events
}
