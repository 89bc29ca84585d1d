//! REST client for the workspace event API.

use reqwest::{RequestBuilder, Response};
use url::Url;

use crate::calendar::CalendarEvent;
use crate::config::Config;

use super::traits::EventStore;
use super::types::{ApiError, CreateEventPayload, EventRecord, NewEvent};

/// Reqwest-backed [`EventStore`].
///
/// Holds no session state beyond an optional bearer token; authentication
/// itself belongs to the excluded identity layer.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
    user_id: i64,
}

impl RestClient {
    /// Create a client for the given API origin.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            bearer_token: None,
            user_id: 1,
        })
    }

    /// Build a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let mut client = Self::new(&config.api.base_url)?;
        client.user_id = config.api.user_id;
        client.bearer_token = config.api.bearer_token.clone();
        Ok(client)
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the user id stamped on created events.
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Turn a non-2xx response into an error, preferring the body's
    /// `message` field over the generic fallback.
    async fn read_api_error(response: Response, fallback: &str) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
            .and_then(|json| json["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Api { status, message }
    }
}

impl EventStore for RestClient {
    async fn list_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        let url = self.endpoint("api/events/")?;
        let response = self.authed(self.http.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(Self::read_api_error(response, "failed to fetch events").await);
        }
        let records: Vec<EventRecord> = response.json().await?;
        Ok(records.into_iter().map(EventRecord::into_event).collect())
    }

    async fn create_event(&self, event: &NewEvent) -> Result<CalendarEvent, ApiError> {
        let url = self.endpoint("api/events/")?;
        let payload = CreateEventPayload::from_new_event(event, self.user_id);
        let response = self
            .authed(self.http.post(url))
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::read_api_error(response, "failed to create event").await);
        }
        let record: EventRecord = response.json().await?;
        Ok(record.into_event())
    }

    async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/events/{id}/"))?;
        let response = self.authed(self.http.delete(url)).send().await?;
        if !response.status().is_success() {
            return Err(Self::read_api_error(response, "failed to delete event").await);
        }
        Ok(())
    }
}
