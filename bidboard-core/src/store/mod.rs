//! Tiered event persistence.
//!
//! The gateway writes remote-first and falls back to a local store; the
//! remote backend and the identity source are ports so the engine stays
//! independent of any particular hosted backend.

mod gateway;
mod local;

pub use gateway::{ANONYMOUS_OWNER, EventGateway};
pub use local::LocalEventStore;

use async_trait::async_trait;

use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventPatch};

/// The authoritative remote event store.
///
/// `probe` reports availability (table/schema reachable); the gateway calls
/// it once per operation before choosing the remote path, identifying the
/// requesting user the same way the operations do.
#[async_trait]
pub trait RemoteEventStore: Send + Sync {
    async fn probe(&self, user_id: &str) -> bool;
    async fn list(&self, user_id: &str) -> CalendarResult<Vec<CalendarEvent>>;
    async fn create(&self, event: &CalendarEvent) -> CalendarResult<CalendarEvent>;
    async fn update(&self, id: &str, patch: &EventPatch) -> CalendarResult<CalendarEvent>;
    async fn delete(&self, id: &str) -> CalendarResult<()>;
}

/// Remote store for offline use: never available, so every gateway call
/// takes the local path.
pub struct Disabled;

#[async_trait]
impl RemoteEventStore for Disabled {
    async fn probe(&self, _user_id: &str) -> bool {
        false
    }

    async fn list(&self, _user_id: &str) -> CalendarResult<Vec<CalendarEvent>> {
        Err(CalendarError::Backend("remote store disabled".to_string()))
    }

    async fn create(&self, _event: &CalendarEvent) -> CalendarResult<CalendarEvent> {
        Err(CalendarError::Backend("remote store disabled".to_string()))
    }

    async fn update(&self, _id: &str, _patch: &EventPatch) -> CalendarResult<CalendarEvent> {
        Err(CalendarError::Backend("remote store disabled".to_string()))
    }

    async fn delete(&self, _id: &str) -> CalendarResult<()> {
        Err(CalendarError::Backend("remote store disabled".to_string()))
    }
}

/// Source of the current user identity. Gates every persistence call;
/// `None` means an unauthenticated session.
pub trait Identity: Send + Sync {
    fn current_user(&self) -> Option<String>;
}

/// Identity fixed at construction time (config-driven sessions, tests).
pub struct FixedIdentity(Option<String>);

impl FixedIdentity {
    pub fn new(user_id: Option<String>) -> Self {
        FixedIdentity(user_id)
    }
}

impl Identity for FixedIdentity {
    fn current_user(&self) -> Option<String> {
        self.0.clone()
    }
}
