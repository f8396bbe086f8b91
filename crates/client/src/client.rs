//! HTTP client for the Early (Timeular) REST API.

use crate::config::EarlyConfig;
use crate::error::{EarlyError, EarlyResult};
use crate::timestamp::{end_of_day_timestamp, now_api_timestamp, to_api_timestamp};
use crate::types::*;
use reqwest::{header, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    api_key: &'a str,
    api_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    token: String,
}

/// Authenticated client for the Early API.
///
/// [`EarlyClient::connect`] signs in once with the configured key/secret
/// pair and holds the returned bearer token for the client's lifetime.
/// Each method issues a single HTTP round-trip; failures surface
/// immediately with no retries.
#[derive(Debug, Clone)]
pub struct EarlyClient {
    http: reqwest::Client,
    config: EarlyConfig,
}

impl EarlyClient {
    /// Sign in to the API and build an authenticated client.
    pub async fn connect(config: EarlyConfig) -> EarlyResult<Self> {
        let bootstrap = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let url = build_url(&config, "/developer/sign-in");
        debug!(url = %url, "signing in");

        let response = bootstrap
            .post(url)
            .json(&SignInRequest {
                api_key: &config.api_key,
                api_secret: &config.api_secret,
            })
            .send()
            .await?;
        let response = check(response).await?;
        let SignInResponse { token } = response.json().await?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                EarlyError::InvalidInput("sign-in returned a token unusable as a header".into())
            })?,
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// List all activities.
    pub async fn activities(&self) -> EarlyResult<Vec<Activity>> {
        let response: ActivitiesResponse = self.get("/activities").await?;
        Ok(response.activities)
    }

    /// Fetch the running tracking session, if any.
    pub async fn current_tracking(&self) -> EarlyResult<Option<TrackingSession>> {
        let response: TrackingResponse = self.get("/tracking").await?;
        Ok(response.current_tracking)
    }

    /// Start tracking an activity. `started_at` defaults to now; a
    /// session already running upstream surfaces as a conflict error.
    pub async fn start_tracking(
        &self,
        activity_id: &str,
        started_at: Option<&str>,
    ) -> EarlyResult<Option<TrackingSession>> {
        let started_at = match started_at {
            Some(ts) => to_api_timestamp(ts)?,
            None => now_api_timestamp(),
        };
        let response: TrackingResponse = self
            .post(
                &format!("/tracking/{activity_id}/start"),
                &StartTrackingRequest { started_at },
            )
            .await?;
        Ok(response.current_tracking)
    }

    /// Stop the running session, which the API closes into a time entry.
    /// `stopped_at` defaults to now.
    pub async fn stop_tracking(&self, stopped_at: Option<&str>) -> EarlyResult<TimeEntry> {
        let stopped_at = match stopped_at {
            Some(ts) => to_api_timestamp(ts)?,
            None => now_api_timestamp(),
        };
        let response: StopTrackingResponse = self
            .post("/tracking/stop", &StopTrackingRequest { stopped_at })
            .await?;
        Ok(response.created_time_entry)
    }

    /// Patch the running session. Rejects an empty patch before any
    /// network call.
    pub async fn edit_tracking(
        &self,
        patch: TrackingPatch,
    ) -> EarlyResult<Option<TrackingSession>> {
        if patch.is_empty() {
            return Err(EarlyError::InvalidInput(
                "at least one of note, activity_id, started_at is required".into(),
            ));
        }
        let response: TrackingResponse = self.patch("/tracking", &patch).await?;
        Ok(response.current_tracking)
    }

    /// List entries whose interval intersects the `from_date..=to_date`
    /// day range (both `YYYY-MM-DD`).
    pub async fn time_entries(&self, from_date: &str, to_date: &str) -> EarlyResult<Vec<TimeEntry>> {
        let stopped_after = to_api_timestamp(from_date)?;
        let started_before = end_of_day_timestamp(to_date)?;

        // Fixed-width API format, so string order is chronological order.
        if started_before < stopped_after {
            return Err(EarlyError::InvalidInput(format!(
                "to_date {to_date} is before from_date {from_date}"
            )));
        }

        let response: TimeEntriesResponse = self
            .get(&format!("/time-entries/{stopped_after}/{started_before}"))
            .await?;
        Ok(response.time_entries)
    }

    /// Create a closed entry directly; no active-session requirement.
    pub async fn create_time_entry(&self, request: CreateTimeEntryRequest) -> EarlyResult<TimeEntry> {
        if request.stopped_at < request.started_at {
            return Err(EarlyError::InvalidInput(format!(
                "stopped_at {} is before started_at {}",
                request.stopped_at, request.started_at
            )));
        }
        self.post("/time-entries", &request).await
    }

    /// Patch an existing entry; only the supplied fields change.
    pub async fn update_time_entry(
        &self,
        time_entry_id: &str,
        patch: TimeEntryPatch,
    ) -> EarlyResult<TimeEntry> {
        if patch.is_empty() {
            return Err(EarlyError::InvalidInput(
                "at least one field to update is required".into(),
            ));
        }
        self.patch(&format!("/time-entries/{time_entry_id}"), &patch)
            .await
    }

    /// Delete an entry. An unknown id surfaces as [`EarlyError::NotFound`].
    pub async fn delete_time_entry(&self, time_entry_id: &str) -> EarlyResult<()> {
        let url = self.url(&format!("/time-entries/{time_entry_id}"));
        debug!(url = %url, "DELETE request");
        let response = self.http.delete(url).send().await?;
        check(response).await?;
        Ok(())
    }

    /// List all tags and mentions.
    pub async fn tags_and_mentions(&self) -> EarlyResult<TagsAndMentions> {
        self.get("/tags-and-mentions").await
    }

    /// Create a tag. Key uniqueness is enforced upstream.
    pub async fn create_tag(&self, key: &str, label: &str) -> EarlyResult<Tag> {
        self.post("/tags", &CreateTagRequest::new(key, label)).await
    }

    // Request plumbing

    fn url(&self, path: &str) -> String {
        build_url(&self.config, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> EarlyResult<T> {
        let url = self.url(path);
        debug!(url = %url, "GET request");
        let response = check(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> EarlyResult<T> {
        let url = self.url(path);
        debug!(url = %url, "POST request");
        let response = check(self.http.post(url).json(body).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> EarlyResult<T> {
        let url = self.url(path);
        debug!(url = %url, "PATCH request");
        let response = check(self.http.patch(url).json(body).send().await?).await?;
        Ok(response.json().await?)
    }
}

fn build_url(config: &EarlyConfig, path: &str) -> String {
    format!("{}{}", config.base_url.as_str().trim_end_matches('/'), path)
}

/// Map non-success responses to [`EarlyError`], carrying the upstream
/// body verbatim.
async fn check(response: Response) -> EarlyResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EarlyError::from_response(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn connect_to(server: &MockServer) -> EarlyClient {
        Mock::given(method("POST"))
            .and(path("/developer/sign-in"))
            .and(body_partial_json(serde_json::json!({
                "apiKey": "test-key",
                "apiSecret": "test-secret"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "tok-123"})),
            )
            .mount(server)
            .await;

        let config = EarlyConfig::new("test-key", "test-secret")
            .with_base_url(Url::parse(&server.uri()).unwrap());
        EarlyClient::connect(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_token_attached_to_requests() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "activities": [{"id": "123", "name": "Development", "color": "#a1b2c3"}]
            })))
            .mount(&server)
            .await;

        let activities = client.activities().await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].name, "Development");
    }

    #[tokio::test]
    async fn test_sign_in_failure_surfaces_as_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/developer/sign-in"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "invalid credentials"})),
            )
            .mount(&server)
            .await;

        let config = EarlyConfig::new("bad", "creds")
            .with_base_url(Url::parse(&server.uri()).unwrap());
        let result = EarlyClient::connect(config).await;

        match result {
            Err(EarlyError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid credentials");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_current_tracking_none_active() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("GET"))
            .and(path("/tracking"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"currentTracking": null})),
            )
            .mount(&server)
            .await;

        assert!(client.current_tracking().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_start_tracking_conflict() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("POST"))
            .and(path("/tracking/123/start"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"message": "tracking already running"})),
            )
            .mount(&server)
            .await;

        let result = client.start_tracking("123", None).await;
        assert!(matches!(result, Err(EarlyError::Api { status: 409, .. })));
    }

    #[tokio::test]
    async fn test_stop_tracking_unwraps_created_entry() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("POST"))
            .and(path("/tracking/stop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "createdTimeEntry": {
                    "id": "987",
                    "activityId": "123",
                    "duration": {
                        "startedAt": "2025-01-15T09:00:00.000",
                        "stoppedAt": "2025-01-15T10:00:00.000"
                    },
                    "note": {"text": "", "tags": [], "mentions": []}
                }
            })))
            .mount(&server)
            .await;

        let entry = client.stop_tracking(Some("2025-01-15T10:00:00")).await.unwrap();
        assert_eq!(entry.id, "987");
        assert_eq!(entry.duration.stopped_at, "2025-01-15T10:00:00.000");
    }

    #[tokio::test]
    async fn test_time_entries_rejects_inverted_range() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        let result = client.time_entries("2025-02-01", "2025-01-01").await;
        assert!(matches!(result, Err(EarlyError::InvalidInput(_))));
        // No /time-entries mock mounted: the call must fail before any request.
    }

    #[tokio::test]
    async fn test_time_entries_range_in_path() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("GET"))
            .and(path(
                "/time-entries/2025-01-01T00:00:00.000/2025-01-31T23:59:59.999",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"timeEntries": []})),
            )
            .mount(&server)
            .await;

        let entries = client.time_entries("2025-01-01", "2025-01-31").await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_entry_is_not_found() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/time-entries/nope"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "no such time entry"})),
            )
            .mount(&server)
            .await;

        let result = client.delete_time_entry("nope").await;
        assert!(matches!(result, Err(EarlyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_edit_tracking_rejects_empty_patch() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        let result = client.edit_tracking(TrackingPatch::default()).await;
        assert!(matches!(result, Err(EarlyError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_time_entry_rejects_inverted_interval() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        let request = CreateTimeEntryRequest {
            activity_id: "123".to_string(),
            started_at: "2025-01-15T10:00:00.000".to_string(),
            stopped_at: "2025-01-15T09:00:00.000".to_string(),
            note: None,
        };
        let result = client.create_time_entry(request).await;
        assert!(matches!(result, Err(EarlyError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_tag_sends_fixed_scope() {
        let server = MockServer::start().await;
        let client = connect_to(&server).await;

        Mock::given(method("POST"))
            .and(path("/tags"))
            .and(body_partial_json(serde_json::json!({
                "key": "WEB-3343",
                "label": "WEB-3343",
                "scope": "timeular",
                "space_id": 0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 55,
                "key": "WEB-3343",
                "label": "WEB-3343"
            })))
            .mount(&server)
            .await;

        let tag = client.create_tag("WEB-3343", "WEB-3343").await.unwrap();
        assert_eq!(tag.id, 55);
        assert_eq!(tag.key, "WEB-3343");
    }
}
