//! Derivation of calendar milestones from project records.
//!
//! Every project contributes up to five milestones: start, end, pre-bid
//! conference, bid due, and RFI due. Start/end are "boundary" milestones and
//! always become distinct, separately styled events. The other three are
//! "special" milestones and are eligible for same-day merging in `merge`.

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::dates;
use crate::event::{CalendarEvent, EventCategory, MILESTONE_ID_PREFIX};
use crate::project::ProjectRecord;

/// Affirmative color for project-start events.
pub const COLOR_PROJECT_START: &str = "#10b981";
/// Alert color for project-end events.
pub const COLOR_PROJECT_END: &str = "#ef4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneKind {
    Start,
    End,
    PreBid,
    BidDue,
    RfiDue,
}

impl MilestoneKind {
    pub fn label(self) -> &'static str {
        match self {
            MilestoneKind::Start => "Project Start",
            MilestoneKind::End => "Project End",
            MilestoneKind::PreBid => "Pre-Bid Conference",
            MilestoneKind::BidDue => "Bid Due",
            MilestoneKind::RfiDue => "RFI Due",
        }
    }

    pub fn category(self) -> EventCategory {
        match self {
            MilestoneKind::Start => EventCategory::ProjectStartDate,
            MilestoneKind::End => EventCategory::ProjectEndDate,
            MilestoneKind::PreBid => EventCategory::PreConMeeting,
            MilestoneKind::BidDue => EventCategory::BidDue,
            MilestoneKind::RfiDue => EventCategory::RfiDeadline,
        }
    }

    /// Special milestones are merge-eligible; boundary milestones are not.
    pub fn is_special(self) -> bool {
        matches!(
            self,
            MilestoneKind::PreBid | MilestoneKind::BidDue | MilestoneKind::RfiDue
        )
    }

    fn id_slug(self) -> &'static str {
        match self {
            MilestoneKind::Start => "start",
            MilestoneKind::End => "end",
            MilestoneKind::PreBid => "pre-bid",
            MilestoneKind::BidDue => "bid-due",
            MilestoneKind::RfiDue => "rfi-due",
        }
    }
}

/// A project-derived date of interest, before merge/conversion into a
/// displayable event.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMilestone {
    pub id: String,
    pub date: NaiveDate,
    pub kind: MilestoneKind,
    pub project_id: String,
    pub project_name: String,
}

impl RawMilestone {
    fn new(project: &ProjectRecord, kind: MilestoneKind, date: NaiveDate) -> Self {
        RawMilestone {
            id: format!("{}{}-{}", MILESTONE_ID_PREFIX, kind.id_slug(), project.id),
            date,
            kind,
            project_id: project.id.clone(),
            project_name: project.name.clone(),
        }
    }
}

/// Derive the full milestone set from a batch of project records.
///
/// Boundary dates (start/end) use the lenient normalizer: an unparseable
/// date still produces a visible event, placed on today. Special dates use
/// the structured normalizer and are skipped when unparseable, so that
/// garbage text cannot collapse unrelated deadlines onto the current date
/// during merging.
pub fn derive_milestones(projects: &[ProjectRecord]) -> Vec<RawMilestone> {
    let mut milestones = Vec::new();

    for project in projects {
        if let Some(raw) = &project.start_date {
            let date = dates::normalize(Some(raw));
            milestones.push(RawMilestone::new(project, MilestoneKind::Start, date));
        }
        if let Some(raw) = &project.end_date {
            let date = dates::normalize(Some(raw));
            milestones.push(RawMilestone::new(project, MilestoneKind::End, date));
        }

        for (kind, raw) in [
            (MilestoneKind::PreBid, &project.pre_bid_conference_date),
            (MilestoneKind::BidDue, &project.bid_due_date),
            (MilestoneKind::RfiDue, &project.rfi_due_date),
        ] {
            let Some(raw) = raw else { continue };
            match dates::try_normalize(raw) {
                Some(date) => milestones.push(RawMilestone::new(project, kind, date)),
                None => warn!(
                    project = %project.name,
                    kind = kind.label(),
                    input = raw.as_str(),
                    "skipping special milestone with unparseable date"
                ),
            }
        }
    }

    milestones
}

/// Convert boundary (start/end) milestones 1:1 into all-day events.
///
/// These are never merged with same-day specials. Each carries a
/// back-reference to its source project for detail display.
pub fn boundary_events(milestones: &[RawMilestone]) -> Vec<CalendarEvent> {
    milestones
        .iter()
        .filter(|m| !m.kind.is_special())
        .map(|m| {
            let midnight = m.date.and_time(NaiveTime::MIN);
            let color = match m.kind {
                MilestoneKind::End => COLOR_PROJECT_END,
                _ => COLOR_PROJECT_START,
            };
            CalendarEvent {
                id: m.id.clone(),
                title: format!("{} ({})", m.project_name, m.kind.label()),
                start: midnight,
                end: midnight,
                all_day: true,
                description: None,
                location: None,
                color: Some(color.to_string()),
                category: Some(m.kind.category()),
                owner_id: None,
                project_id: Some(m.project_id.clone()),
            }
        })
        .collect()
}
