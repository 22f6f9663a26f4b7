//! Same-day merging of special milestones into single display events.
//!
//! Bid-due, RFI-due, and pre-bid milestones landing on the same calendar day
//! collapse into one all-day event per day. A day whose milestones all belong
//! to one project keeps the project name in the title; a day spanning several
//! projects degrades to a generic "Multiple Events" title, with the detail
//! preserved in the description.

use chrono::NaiveTime;
use std::collections::HashMap;

use crate::dates;
use crate::event::{CalendarEvent, EventCategory};
use crate::milestones::RawMilestone;

/// Color applied to merged special-date events.
pub const COLOR_SPECIAL: &str = "#f59e0b";

/// Title used when a day's milestones span multiple projects.
pub const MULTIPLE_EVENTS_TITLE: &str = "Multiple Events";

/// Transient aggregate for one canonical date key. Built during merge,
/// discarded after producing the group's event.
struct MergedMilestoneGroup {
    date: chrono::NaiveDate,
    source_ids: Vec<String>,
    project_ids: Vec<String>,
    project_names: Vec<String>,
    labels: Vec<String>,
    categories: Vec<EventCategory>,
}

impl MergedMilestoneGroup {
    fn new(date: chrono::NaiveDate) -> Self {
        MergedMilestoneGroup {
            date,
            source_ids: Vec::new(),
            project_ids: Vec::new(),
            project_names: Vec::new(),
            labels: Vec::new(),
            categories: Vec::new(),
        }
    }

    fn push(&mut self, milestone: &RawMilestone) {
        self.source_ids.push(milestone.id.clone());
        if !self.project_ids.contains(&milestone.project_id) {
            self.project_ids.push(milestone.project_id.clone());
            self.project_names.push(milestone.project_name.clone());
        }
        self.labels.push(milestone.kind.label().to_string());
        self.categories.push(milestone.kind.category());
    }

    fn into_event(self) -> CalendarEvent {
        let single_project = self.project_ids.len() == 1;
        // A single-project title already lists every label; the description
        // only carries the detail lost behind the generic multi-project
        // title.
        let (title, description) = if single_project {
            let title = format!("{} ({})", self.project_names[0], self.labels.join(", "));
            (title, None)
        } else {
            (MULTIPLE_EVENTS_TITLE.to_string(), Some(self.labels.join(", ")))
        };
        let midnight = self.date.and_time(NaiveTime::MIN);

        CalendarEvent {
            // Stable and deterministic: ids join in insertion order.
            id: self.source_ids.join("+"),
            title,
            start: midnight,
            end: midnight,
            all_day: true,
            description,
            location: None,
            color: Some(COLOR_SPECIAL.to_string()),
            category: self.categories.first().copied(),
            owner_id: None,
            project_id: if single_project {
                Some(self.project_ids[0].clone())
            } else {
                None
            },
        }
    }
}

/// Merge special milestones into one all-day event per calendar date.
///
/// Grouping is keyed by the canonical `YYYY-MM-DD` string. Date groups come
/// out in first-seen order and milestones keep their insertion order within
/// a group, so the result is deterministic for a given input order. Boundary
/// milestones in the input are ignored; pass the full derived set.
pub fn merge_specials(milestones: &[RawMilestone]) -> Vec<CalendarEvent> {
    let mut key_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, MergedMilestoneGroup> = HashMap::new();

    for milestone in milestones.iter().filter(|m| m.kind.is_special()) {
        let key = dates::date_key(milestone.date);
        let group = groups.entry(key.clone()).or_insert_with(|| {
            key_order.push(key);
            MergedMilestoneGroup::new(milestone.date)
        });
        group.push(milestone);
    }

    key_order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .map(MergedMilestoneGroup::into_event)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::derive_milestones;
    use crate::project::ProjectRecord;

    fn project(id: &str, name: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: name.to_string(),
            start_date: None,
            end_date: None,
            pre_bid_conference_date: None,
            bid_due_date: None,
            rfi_due_date: None,
        }
    }

    #[test]
    fn test_same_project_same_day_combines_labels() {
        let mut p = project("p1", "Acme Corp");
        p.bid_due_date = Some("2025-06-01".to_string());
        p.rfi_due_date = Some("2025-06-01".to_string());

        let events = merge_specials(&derive_milestones(&[p]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Acme Corp (Bid Due, RFI Due)");
        assert_eq!(events[0].id, "project-bid-due-p1+project-rfi-due-p1");
        assert_eq!(events[0].project_id.as_deref(), Some("p1"));
        // The title already lists the labels; no description needed.
        assert!(events[0].description.is_none());
        assert!(events[0].all_day);
    }

    #[test]
    fn test_cross_project_same_day_degrades_title() {
        // Acme's bid+RFI and Beta's bid all land on the same date.
        let mut acme = project("p1", "Acme");
        acme.bid_due_date = Some("2025-06-01".to_string());
        acme.rfi_due_date = Some("2025-06-01".to_string());
        let mut beta = project("p2", "Beta");
        beta.bid_due_date = Some("2025-06-01".to_string());

        let events = merge_specials(&derive_milestones(&[acme, beta]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, MULTIPLE_EVENTS_TITLE);
        assert_eq!(
            events[0].description.as_deref(),
            Some("Bid Due, RFI Due, Bid Due")
        );
        assert!(events[0].project_id.is_none());
    }

    #[test]
    fn test_merge_is_deterministic() {
        let mut a = project("p1", "Acme");
        a.bid_due_date = Some("2025-06-01".to_string());
        a.pre_bid_conference_date = Some("2025-05-20".to_string());
        let mut b = project("p2", "Beta");
        b.rfi_due_date = Some("2025-06-01".to_string());

        let projects = [a, b];
        let first = merge_specials(&derive_milestones(&projects));
        let second = merge_specials(&derive_milestones(&projects));
        assert_eq!(first, second);

        // Date groups come out in first-seen order: derivation emits Acme's
        // pre-bid (May 20) before the bid/RFI pair on June 1.
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, "project-pre-bid-p1");
        assert_eq!(first[1].id, "project-bid-due-p1+project-rfi-due-p2");
    }

    #[test]
    fn test_boundary_milestones_never_merge() {
        let mut p = project("p1", "Acme");
        p.start_date = Some("2025-06-01".to_string());
        p.bid_due_date = Some("2025-06-01".to_string());

        let events = merge_specials(&derive_milestones(&[p]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "project-bid-due-p1");
        assert_eq!(events[0].title, "Acme (Bid Due)");
    }

    #[test]
    fn test_different_days_stay_separate() {
        let mut p = project("p1", "Acme");
        p.bid_due_date = Some("2025-06-01".to_string());
        p.rfi_due_date = Some("2025-05-15".to_string());

        let events = merge_specials(&derive_milestones(&[p]));
        assert_eq!(events.len(), 2);
    }
}
