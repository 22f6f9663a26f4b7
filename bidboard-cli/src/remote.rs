//! HTTP implementation of the remote event store.
//!
//! Talks to the hosted events API: one `events` table with
//! `id, title, description, location, start, end, all_day, color, user_id`.
//! Timestamps go over the wire as full `%Y-%m-%dT%H:%M:%S` strings and come
//! back as local date-times. The backend carries no category column, so
//! remote-sourced events deserialize with `category: None`.

use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use bidboard_core::event::{CalendarEvent, EventPatch};
use bidboard_core::store::RemoteEventStore;
use bidboard_core::{CalendarError, CalendarResult, dates};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Serialize, Deserialize)]
struct EventRow {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    start: String,
    end: String,
    all_day: bool,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

impl EventRow {
    fn from_event(event: &CalendarEvent) -> Self {
        EventRow {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start: event.start.format(TIMESTAMP_FORMAT).to_string(),
            end: event.end.format(TIMESTAMP_FORMAT).to_string(),
            all_day: event.all_day,
            color: event.color.clone(),
            user_id: event.owner_id.clone(),
        }
    }

    fn into_event(self) -> CalendarEvent {
        CalendarEvent {
            id: self.id,
            title: self.title,
            start: parse_timestamp(&self.start),
            end: parse_timestamp(&self.end),
            all_day: self.all_day,
            description: self.description,
            location: self.location,
            color: self.color,
            category: None,
            owner_id: self.user_id,
            project_id: None,
        }
    }
}

/// Partial row for PATCH requests; absent fields stay untouched server-side.
#[derive(Debug, Default, Serialize)]
struct PatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl PatchRow {
    fn from_patch(patch: &EventPatch) -> Self {
        PatchRow {
            title: patch.title.clone(),
            description: patch.description.clone(),
            location: patch.location.clone(),
            start: patch.start.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            end: patch.end.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            all_day: patch.all_day,
            color: patch.color.clone(),
        }
    }
}

fn parse_timestamp(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .unwrap_or_else(|_| dates::normalize(Some(raw)).and_time(NaiveTime::MIN))
}

pub struct HttpRemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteStore {
    pub fn new(base_url: &str) -> Self {
        HttpRemoteStore {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn event_url(&self, id: &str) -> String {
        format!("{}/events/{}", self.base_url, id)
    }
}

fn backend_err(err: reqwest::Error) -> CalendarError {
    CalendarError::Backend(err.to_string())
}

fn check_status(response: reqwest::Response) -> CalendarResult<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(CalendarError::Backend(format!(
            "events API returned {}",
            response.status()
        )))
    }
}

#[async_trait]
impl RemoteEventStore for HttpRemoteStore {
    async fn probe(&self, user_id: &str) -> bool {
        match self
            .client
            .get(self.events_url())
            .query(&[("limit", "1"), ("user_id", user_id)])
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list(&self, user_id: &str) -> CalendarResult<Vec<CalendarEvent>> {
        let response = self
            .client
            .get(self.events_url())
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(backend_err)?;
        let rows: Vec<EventRow> = check_status(response)?.json().await.map_err(backend_err)?;
        Ok(rows.into_iter().map(EventRow::into_event).collect())
    }

    async fn create(&self, event: &CalendarEvent) -> CalendarResult<CalendarEvent> {
        let response = self
            .client
            .post(self.events_url())
            .json(&EventRow::from_event(event))
            .send()
            .await
            .map_err(backend_err)?;
        let row: EventRow = check_status(response)?.json().await.map_err(backend_err)?;
        Ok(row.into_event())
    }

    async fn update(&self, id: &str, patch: &EventPatch) -> CalendarResult<CalendarEvent> {
        let response = self
            .client
            .patch(self.event_url(id))
            .json(&PatchRow::from_patch(patch))
            .send()
            .await
            .map_err(backend_err)?;
        let row: EventRow = check_status(response)?.json().await.map_err(backend_err)?;
        Ok(row.into_event())
    }

    async fn delete(&self, id: &str) -> CalendarResult<()> {
        let response = self
            .client
            .delete(self.event_url(id))
            .send()
            .await
            .map_err(backend_err)?;
        check_status(response)?;
        Ok(())
    }
}
