//! Integration tests for the persistence gateway's three call modes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use bidboard_core::event::{CalendarEvent, EventDraft, EventPatch};
use bidboard_core::store::{
    ANONYMOUS_OWNER, EventGateway, FixedIdentity, LocalEventStore, RemoteEventStore,
};
use bidboard_core::{CalendarError, CalendarResult};

/// Scriptable remote: availability and operation failure are set per test,
/// successful operations hit an in-memory table. Clones share the table, so
/// tests can keep a handle after the gateway takes ownership.
#[derive(Clone)]
struct MockRemote {
    available: bool,
    fail_ops: bool,
    rows: Arc<Mutex<Vec<CalendarEvent>>>,
    probed_user: Arc<Mutex<Option<String>>>,
}

impl MockRemote {
    fn healthy() -> Self {
        MockRemote {
            available: true,
            fail_ops: false,
            rows: Arc::default(),
            probed_user: Arc::default(),
        }
    }

    fn unreachable() -> Self {
        MockRemote {
            available: false,
            fail_ops: true,
            rows: Arc::default(),
            probed_user: Arc::default(),
        }
    }

    /// Probe succeeds but every operation fails mid-call.
    fn flaky() -> Self {
        MockRemote {
            available: true,
            fail_ops: true,
            rows: Arc::default(),
            probed_user: Arc::default(),
        }
    }
}

#[async_trait]
impl RemoteEventStore for MockRemote {
    async fn probe(&self, user_id: &str) -> bool {
        *self.probed_user.lock().unwrap() = Some(user_id.to_string());
        self.available
    }

    async fn list(&self, user_id: &str) -> CalendarResult<Vec<CalendarEvent>> {
        if self.fail_ops {
            return Err(CalendarError::Backend("connection reset".to_string()));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create(&self, event: &CalendarEvent) -> CalendarResult<CalendarEvent> {
        if self.fail_ops {
            return Err(CalendarError::Backend("connection reset".to_string()));
        }
        self.rows.lock().unwrap().push(event.clone());
        Ok(event.clone())
    }

    async fn update(&self, id: &str, patch: &EventPatch) -> CalendarResult<CalendarEvent> {
        if self.fail_ops {
            return Err(CalendarError::Backend("connection reset".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;
        patch.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> CalendarResult<()> {
        if self.fail_ops {
            return Err(CalendarError::Backend("connection reset".to_string()));
        }
        self.rows.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

fn ts(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        start: ts(9),
        end: ts(10),
        all_day: false,
        description: None,
        location: None,
        color: None,
        category: None,
    }
}

fn seeded_event(id: &str, owner: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: "Seeded".to_string(),
        start: ts(9),
        end: ts(10),
        all_day: false,
        description: None,
        location: None,
        color: None,
        category: None,
        owner_id: Some(owner.to_string()),
        project_id: None,
    }
}

fn gateway(
    remote: MockRemote,
    store_path: &std::path::Path,
    user: Option<&str>,
) -> EventGateway {
    EventGateway::new(
        Box::new(remote),
        LocalEventStore::new(store_path),
        Box::new(FixedIdentity::new(user.map(String::from))),
    )
}

#[tokio::test]
async fn anonymous_create_then_list_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let gw = gateway(MockRemote::unreachable(), &path, None);

    let created = gw.create(draft("Site walkthrough")).await.unwrap();
    assert_eq!(created.owner_id.as_deref(), Some(ANONYMOUS_OWNER));

    let listed = gw.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn anonymous_events_are_shared_across_sessions() {
    // Intentional shared-demo behavior: a second unauthenticated session over
    // the same fallback store sees the first session's events.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let first = gateway(MockRemote::unreachable(), &path, None);
    let created = first.create(draft("Shared")).await.unwrap();

    let second = gateway(MockRemote::unreachable(), &path, None);
    let listed = second.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn anonymous_sessions_cannot_touch_user_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let store = LocalEventStore::new(&path);
    store.save(&[seeded_event("e1", "user-1")]).unwrap();

    let gw = gateway(MockRemote::unreachable(), &path, None);
    assert!(gw.list().await.unwrap().is_empty());

    let err = gw.remove("e1").await.unwrap_err();
    assert!(matches!(err, CalendarError::Unauthorized { .. }));
}

#[tokio::test]
async fn degraded_mode_scopes_to_user_and_rejects_foreign_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let store = LocalEventStore::new(&path);
    store
        .save(&[seeded_event("mine", "user-1"), seeded_event("theirs", "user-2")])
        .unwrap();

    let gw = gateway(MockRemote::unreachable(), &path, Some("user-1"));

    let listed = gw.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "mine");

    let patch = EventPatch {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let err = gw.update("theirs", &patch).await.unwrap_err();
    assert!(matches!(err, CalendarError::Unauthorized { .. }));

    let err = gw.update("missing", &patch).await.unwrap_err();
    assert!(matches!(err, CalendarError::NotFound(_)));

    let updated = gw.update("mine", &patch).await.unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn healthy_remote_takes_the_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let gw = gateway(MockRemote::healthy(), &path, Some("user-1"));

    let created = gw.create(draft("Pre-con meeting")).await.unwrap();
    assert_eq!(created.owner_id.as_deref(), Some("user-1"));

    let listed = gw.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    // Nothing landed in the fallback store.
    assert!(LocalEventStore::new(&path).load().unwrap().is_empty());
}

#[tokio::test]
async fn remote_failure_mid_update_falls_back_to_local() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let store = LocalEventStore::new(&path);
    store.save(&[seeded_event("e1", "user-1")]).unwrap();

    // Probe succeeds, operations fail: the gateway must retry locally and
    // never surface the backend error.
    let gw = gateway(MockRemote::flaky(), &path, Some("user-1"));

    let patch = EventPatch {
        title: Some("Moved to Thursday".to_string()),
        start: Some(ts(13)),
        end: Some(ts(14)),
        ..Default::default()
    };
    let updated = gw.update("e1", &patch).await.unwrap();
    assert_eq!(updated.title, "Moved to Thursday");

    let listed = gw.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Moved to Thursday");
    assert_eq!(listed[0].start, ts(13));
}

#[tokio::test]
async fn remote_failure_mid_create_falls_back_to_local() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let gw = gateway(MockRemote::flaky(), &path, Some("user-1"));

    let created = gw.create(draft("Bid review")).await.unwrap();

    let local = LocalEventStore::new(&path).load().unwrap();
    assert_eq!(local.len(), 1);
    // The client-side id survived the tier switch.
    assert_eq!(local[0].id, created.id);
    assert_eq!(local[0].owner_id.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn remove_converges_both_tiers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let store = LocalEventStore::new(&path);
    store.save(&[seeded_event("e1", "user-1")]).unwrap();

    let remote = MockRemote::healthy();
    remote
        .rows
        .lock()
        .unwrap()
        .push(seeded_event("e1", "user-1"));

    let gw = gateway(remote, &path, Some("user-1"));
    gw.remove("e1").await.unwrap();

    assert!(gw.list().await.unwrap().is_empty());
    assert!(LocalEventStore::new(&path).load().unwrap().is_empty());
}

#[tokio::test]
async fn remove_is_best_effort_when_remote_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let store = LocalEventStore::new(&path);
    store.save(&[seeded_event("e1", "user-1")]).unwrap();

    let gw = gateway(MockRemote::flaky(), &path, Some("user-1"));
    // Remote delete fails; the local copy must still go away.
    gw.remove("e1").await.unwrap();
    assert!(LocalEventStore::new(&path).load().unwrap().is_empty());

    // Locally missing id on the healthy path is not an error either.
    gw.remove("never-existed").await.unwrap();
}

#[tokio::test]
async fn milestone_ids_are_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let gw = gateway(MockRemote::healthy(), &path, Some("user-1"));

    let patch = EventPatch::default();
    let err = gw.update("project-start-p1", &patch).await.unwrap_err();
    assert!(matches!(err, CalendarError::ReadOnly(_)));

    let err = gw.remove("project-bid-due-p1").await.unwrap_err();
    assert!(matches!(err, CalendarError::ReadOnly(_)));
}

#[tokio::test]
async fn create_rejects_inverted_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    let gw = gateway(MockRemote::unreachable(), &path, None);

    let mut bad = draft("Backwards");
    bad.start = ts(12);
    bad.end = ts(9);
    let err = gw.create(bad).await.unwrap_err();
    assert!(matches!(err, CalendarError::InvalidEvent(_)));
}

#[tokio::test]
async fn update_rejects_inverted_range_on_every_tier() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let remote = MockRemote::healthy();
    remote
        .rows
        .lock()
        .unwrap()
        .push(seeded_event("e1", "user-1"));
    let handle = remote.clone();
    let gw = gateway(remote, &path, Some("user-1"));

    // Inverted patch against a healthy remote must fail exactly like the
    // local tiers do, not depend on backend availability.
    let inverted = EventPatch {
        start: Some(ts(12)),
        end: Some(ts(9)),
        ..Default::default()
    };
    let err = gw.update("e1", &inverted).await.unwrap_err();
    assert!(matches!(err, CalendarError::InvalidEvent(_)));

    // A partial patch can invert against the stored row (end stays 10:00).
    let partial = EventPatch {
        start: Some(ts(12)),
        ..Default::default()
    };
    let err = gw.update("e1", &partial).await.unwrap_err();
    assert!(matches!(err, CalendarError::InvalidEvent(_)));

    // The remote row is untouched.
    let rows = handle.rows.lock().unwrap();
    assert_eq!(rows[0].start, ts(9));
    assert_eq!(rows[0].end, ts(10));
}

#[tokio::test]
async fn probe_identifies_the_requesting_user() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");

    let remote = MockRemote::healthy();
    let handle = remote.clone();
    let gw = gateway(remote, &path, Some("user-1"));

    gw.list().await.unwrap();
    assert_eq!(handle.probed_user.lock().unwrap().as_deref(), Some("user-1"));
}
