//! The persistence gateway.
//!
//! Every call resolves an explicit mode before touching storage:
//!
//! - `Unauthenticated`: local store only, scoped to unowned/anonymous events.
//! - `RemoteHealthy`: remote operation; a remote failure is logged and the
//!   same operation is retried against the local store, so reads and writes
//!   keep working through backend outages.
//! - `RemoteDegraded`: remote probe failed; local store scoped to the user,
//!   with real `Unauthorized`/`NotFound` errors for bad targets.
//!
//! `create` always pre-generates the id client-side so the same id lands in
//! whichever tier takes the write.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventDraft, EventPatch, MILESTONE_ID_PREFIX};
use crate::store::local::LocalEventStore;
use crate::store::{Identity, RemoteEventStore};

/// Owner marker recorded on events created by unauthenticated sessions.
///
/// Anonymous events are visible to every unauthenticated session sharing the
/// fallback store; there is no per-device scoping. This is intentional
/// shared-demo behavior, pinned by the gateway integration tests.
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// Per-call persistence mode.
enum CallMode {
    Unauthenticated,
    RemoteHealthy(String),
    RemoteDegraded(String),
}

/// Ownership scope for local-store operations.
enum Scope<'a> {
    Anonymous,
    User(&'a str),
}

impl Scope<'_> {
    fn owns(&self, event: &CalendarEvent) -> bool {
        match self {
            Scope::Anonymous => matches!(event.owner_id.as_deref(), None | Some(ANONYMOUS_OWNER)),
            Scope::User(user) => event.owner_id.as_deref() == Some(user),
        }
    }
}

pub struct EventGateway {
    remote: Box<dyn RemoteEventStore>,
    local: LocalEventStore,
    identity: Box<dyn Identity>,
}

impl EventGateway {
    pub fn new(
        remote: Box<dyn RemoteEventStore>,
        local: LocalEventStore,
        identity: Box<dyn Identity>,
    ) -> Self {
        EventGateway {
            remote,
            local,
            identity,
        }
    }

    async fn mode(&self) -> CallMode {
        match self.identity.current_user() {
            None => CallMode::Unauthenticated,
            Some(user) => {
                if self.remote.probe(&user).await {
                    CallMode::RemoteHealthy(user)
                } else {
                    debug!(user = %user, "remote store unavailable, using local fallback");
                    CallMode::RemoteDegraded(user)
                }
            }
        }
    }

    pub async fn list(&self) -> CalendarResult<Vec<CalendarEvent>> {
        match self.mode().await {
            CallMode::Unauthenticated => {
                let events = self.local.load()?;
                Ok(events
                    .into_iter()
                    .filter(|e| Scope::Anonymous.owns(e))
                    .collect())
            }
            CallMode::RemoteDegraded(user) => self.local_list(&user),
            CallMode::RemoteHealthy(user) => match self.remote.list(&user).await {
                Ok(events) => Ok(events),
                Err(err) => {
                    warn!(error = %err, "remote list failed, serving local fallback");
                    self.local_list(&user)
                }
            },
        }
    }

    pub async fn create(&self, draft: EventDraft) -> CalendarResult<CalendarEvent> {
        if draft.end < draft.start {
            return Err(CalendarError::InvalidEvent(
                "end must not precede start".to_string(),
            ));
        }

        let mode = self.mode().await;
        let owner = match &mode {
            CallMode::Unauthenticated => ANONYMOUS_OWNER.to_string(),
            CallMode::RemoteHealthy(user) | CallMode::RemoteDegraded(user) => user.clone(),
        };

        let event = CalendarEvent {
            // Client-side id: the same id is usable whichever tier takes
            // the write.
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
            description: draft.description,
            location: draft.location,
            color: draft.color,
            category: draft.category,
            owner_id: Some(owner),
            project_id: None,
        };

        match mode {
            CallMode::RemoteHealthy(_) => match self.remote.create(&event).await {
                Ok(created) => Ok(created),
                Err(err) => {
                    warn!(error = %err, id = %event.id, "remote create failed, writing to local fallback");
                    self.local_insert(event)
                }
            },
            _ => self.local_insert(event),
        }
    }

    pub async fn update(&self, id: &str, patch: &EventPatch) -> CalendarResult<CalendarEvent> {
        if id.starts_with(MILESTONE_ID_PREFIX) {
            return Err(CalendarError::ReadOnly(id.to_string()));
        }

        match self.mode().await {
            CallMode::Unauthenticated => self.local_update(id, patch, Scope::Anonymous),
            CallMode::RemoteDegraded(user) => self.local_update(id, patch, Scope::User(&user)),
            CallMode::RemoteHealthy(user) => {
                // Validate the patched result before the remote write, so
                // accepted inputs do not depend on backend availability:
                // the local tiers reject an inverted range, the remote tier
                // must too.
                if let Some(mut patched) = self.remote_current(&user, id).await {
                    patch.apply_to(&mut patched);
                    if patched.end < patched.start {
                        return Err(CalendarError::InvalidEvent(
                            "end must not precede start".to_string(),
                        ));
                    }
                }
                match self.remote.update(id, patch).await {
                    Ok(updated) => Ok(updated),
                    Err(err) => {
                        warn!(error = %err, id, "remote update failed, applying to local fallback");
                        self.local_update(id, patch, Scope::User(&user))
                    }
                }
            }
        }
    }

    pub async fn remove(&self, id: &str) -> CalendarResult<()> {
        if id.starts_with(MILESTONE_ID_PREFIX) {
            return Err(CalendarError::ReadOnly(id.to_string()));
        }

        match self.mode().await {
            CallMode::Unauthenticated => self.local_remove(id, Scope::Anonymous),
            CallMode::RemoteDegraded(user) => self.local_remove(id, Scope::User(&user)),
            CallMode::RemoteHealthy(_) => {
                // Best-effort on both tiers: a remote failure must not stop
                // the local delete, and a locally missing id is fine.
                if let Err(err) = self.remote.delete(id).await {
                    warn!(error = %err, id, "remote delete failed, removing from local fallback only");
                }
                let mut events = self.local.load()?;
                let before = events.len();
                events.retain(|e| e.id != id);
                if events.len() != before {
                    self.local.save(&events)?;
                }
                Ok(())
            }
        }
    }

    /// The remote copy of an event, if the remote can produce one. Used for
    /// pre-write validation only; a failed read here just skips the check
    /// and lets the usual fallback handling run.
    async fn remote_current(&self, user: &str, id: &str) -> Option<CalendarEvent> {
        match self.remote.list(user).await {
            Ok(events) => events.into_iter().find(|e| e.id == id),
            Err(_) => None,
        }
    }

    fn local_list(&self, user: &str) -> CalendarResult<Vec<CalendarEvent>> {
        let events = self.local.load()?;
        Ok(events
            .into_iter()
            .filter(|e| Scope::User(user).owns(e))
            .collect())
    }

    fn local_insert(&self, event: CalendarEvent) -> CalendarResult<CalendarEvent> {
        let mut events = self.local.load()?;
        events.push(event.clone());
        self.local.save(&events)?;
        Ok(event)
    }

    fn local_update(
        &self,
        id: &str,
        patch: &EventPatch,
        scope: Scope<'_>,
    ) -> CalendarResult<CalendarEvent> {
        let mut events = self.local.load()?;
        let index = events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;

        if !scope.owns(&events[index]) {
            return Err(CalendarError::Unauthorized { id: id.to_string() });
        }

        patch.apply_to(&mut events[index]);
        if events[index].end < events[index].start {
            return Err(CalendarError::InvalidEvent(
                "end must not precede start".to_string(),
            ));
        }

        let updated = events[index].clone();
        self.local.save(&events)?;
        Ok(updated)
    }

    fn local_remove(&self, id: &str, scope: Scope<'_>) -> CalendarResult<()> {
        let mut events = self.local.load()?;
        let index = events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;

        if !scope.owns(&events[index]) {
            return Err(CalendarError::Unauthorized { id: id.to_string() });
        }

        events.remove(index);
        self.local.save(&events)?;
        Ok(())
    }
}
