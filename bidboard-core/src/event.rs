//! Calendar event types.
//!
//! `CalendarEvent` is the single event representation used across the engine:
//! user-authored events coming out of the persistence gateway and synthesized
//! project-milestone events coming out of derivation/merge both use it. The
//! two populations are distinguished by id: synthesized events carry the
//! reserved `project-` prefix and are read-only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reserved id prefix for synthesized project-milestone events.
///
/// Events whose id starts with this prefix are derived from project records,
/// never stored, and rejected by the gateway on update/delete.
pub const MILESTONE_ID_PREFIX: &str = "project-";

/// A calendar event.
///
/// `end >= start` holds for user-authored events (enforced by the gateway);
/// all-day milestone events use `start == end` at midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Back-reference to the source project for milestone events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl CalendarEvent {
    /// Whether this event was synthesized from project records.
    pub fn is_milestone(&self) -> bool {
        self.id.starts_with(MILESTONE_ID_PREFIX)
    }
}

/// Closed set of event categories.
///
/// Replaces the dashboard's old substring matching on free-form category
/// strings: filter groups and toggles match exhaustively against these
/// variants via explicit membership tables in `filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    JobWalk,
    BidDue,
    RfiDeadline,
    PreConMeeting,
    ProjectSchedule,
    MaterialDelivery,
    Meeting,
    Admin,
    Internal,
    ProjectStartDate,
    ProjectEndDate,
}

impl EventCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            EventCategory::JobWalk => "Job Walk",
            EventCategory::BidDue => "Bid Due",
            EventCategory::RfiDeadline => "RFI Deadline",
            EventCategory::PreConMeeting => "Pre-Con Meeting",
            EventCategory::ProjectSchedule => "Project Schedule",
            EventCategory::MaterialDelivery => "Material Delivery",
            EventCategory::Meeting => "Meeting",
            EventCategory::Admin => "Admin",
            EventCategory::Internal => "Internal",
            EventCategory::ProjectStartDate => "Project Start Date",
            EventCategory::ProjectEndDate => "Project End Date",
        }
    }

    /// Lenient parse for category text coming from outside the engine
    /// (legacy stored rows, CLI arguments). Known aliases first, then the
    /// old keyword heuristics as a last resort.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        let parsed = match s.as_str() {
            "job-walk" | "job walk" | "jobwalk" => Some(EventCategory::JobWalk),
            "bid-due" | "bid due" | "bid" => Some(EventCategory::BidDue),
            "rfi" | "rfi-due" | "rfi due" | "rfi-deadline" => Some(EventCategory::RfiDeadline),
            "pre-con" | "precon" | "pre-bid" | "pre-con-meeting" => {
                Some(EventCategory::PreConMeeting)
            }
            "project-schedule" | "schedule" => Some(EventCategory::ProjectSchedule),
            "material-delivery" | "material delivery" | "delivery" => {
                Some(EventCategory::MaterialDelivery)
            }
            "meeting" => Some(EventCategory::Meeting),
            "admin" => Some(EventCategory::Admin),
            "internal" => Some(EventCategory::Internal),
            "project-start-date" => Some(EventCategory::ProjectStartDate),
            "project-end-date" => Some(EventCategory::ProjectEndDate),
            _ => None,
        };
        parsed.or_else(|| {
            if s.contains("bid") {
                Some(EventCategory::BidDue)
            } else if s.contains("rfi") {
                Some(EventCategory::RfiDeadline)
            } else if s.contains("walk") {
                Some(EventCategory::JobWalk)
            } else if s.contains("deliver") {
                Some(EventCategory::MaterialDelivery)
            } else if s.contains("sched") {
                Some(EventCategory::ProjectSchedule)
            } else {
                None
            }
        })
    }
}

/// Fields for creating a new user-authored event.
///
/// The gateway assigns the id (uuid v4, client-side) and the owner.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
    pub category: Option<EventCategory>,
}

/// Partial update for an existing event. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
}

impl EventPatch {
    pub fn apply_to(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(color) = &self.color {
            event.color = Some(color.clone());
        }
        if let Some(category) = self.category {
            event.category = Some(category);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.all_day.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.color.is_none()
            && self.category.is_none()
    }
}
