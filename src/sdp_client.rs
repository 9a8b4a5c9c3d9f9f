//! HTTP client for ServiceDesk Plus API.
//!
//! This module provides the `SdpClient` struct for making authenticated
//! requests to the ServiceDesk Plus v3 REST API.
//!
//! # Request Shape
//!
//! Every call goes to `<base_url>/api/v3/<endpoint>` and carries the
//! technician key twice: as the `Authtoken` header and as the
//! `TECHNICIAN_KEY` query parameter. Structured input is JSON-encoded into
//! the `input_data` query parameter; no request body is ever sent.
//!
//! The response body is parsed as JSON and returned as-is, whatever the
//! HTTP status. There is no retry logic: each call is exactly one round trip.
//!
//! # Security
//!
//! The API key is never logged. Transport errors may embed the request URL,
//! which contains the key; log them through `SdpError::sanitized_display`.

use std::fmt;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::endpoints::{Action, ApiMethod};
use crate::error::SdpError;
use crate::models::{
    AssignEnvelope, CausedByChangeEnvelope, InitiatedChangeEnvelope, LinkRequestsEnvelope,
    ListInfo, ListInfoEnvelope, NoteEnvelope, NoteFlags, ProblemAssociationEnvelope,
    RequestEnvelope, ResolutionEnvelope, ResponseStatus,
};

/// Header carrying the technician key.
pub const AUTH_HEADER: &str = "Authtoken";

/// Query parameter carrying the technician key.
pub const TECHNICIAN_KEY_PARAM: &str = "TECHNICIAN_KEY";

/// Query parameter carrying the JSON-encoded payload.
pub const INPUT_DATA_PARAM: &str = "input_data";

/// The Accept header value for SDP API v3.
const SDP_ACCEPT_HEADER: &str = "application/vnd.manageengine.sdp.v3+json";

/// HTTP client for ServiceDesk Plus API.
///
/// Holds the technician key and the normalized API base URL; neither
/// changes after construction, so the client can be cloned and shared
/// across tasks freely.
///
/// # Example
///
/// ```ignore
/// let client = SdpClient::from_parts("my-technician-key", "https://sdp.example.com/")?;
///
/// let ticket = client.request_view("42").await?;
/// client.request_assign("42", "Ops", "Jane").await?;
/// ```
#[derive(Clone)]
pub struct SdpClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL for the SDP API, always ending in `/api/v3/`.
    base_url: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,
}

impl fmt::Debug for SdpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl SdpClient {
    /// Creates a new SDP client from configuration.
    ///
    /// The HTTP transport is built with `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, SdpError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SdpError::HttpClient)?;

        Ok(Self::with_http_client(config, http))
    }

    /// Creates a client from a technician key and base URL using default settings.
    pub fn from_parts(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SdpError> {
        Self::new(&Config::new(api_key, base_url))
    }

    /// Creates a client around a caller-built transport.
    ///
    /// Use this to control timeouts, proxies or TLS settings; `config.timeout`
    /// is ignored.
    pub fn with_http_client(config: &Config, http: Client) -> Self {
        Self {
            http,
            base_url: Self::normalize_base_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    /// Normalizes the base URL so it ends with exactly one `/api/v3/`.
    fn normalize_base_url(url: &str) -> String {
        let url = url.trim().trim_end_matches('/');
        if url.ends_with("/api/v3") {
            format!("{}/", url)
        } else if url.ends_with("/api") {
            format!("{}/v3/", url)
        } else {
            format!("{}/api/v3/", url)
        }
    }

    /// Returns the normalized API base URL (ending in `/api/v3/`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a reference to the API key for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub fn api_key_for_sanitization(&self) -> &str {
        &self.api_key
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Sends one request to the SDP API and returns the parsed JSON body.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path relative to `api/v3/` (e.g., `requests/42`)
    /// * `method` - HTTP method
    /// * `payload` - Optional input, JSON-encoded into the `input_data` query parameter
    ///
    /// # Errors
    ///
    /// - `SdpError::Serialization` if the payload cannot be encoded
    /// - `SdpError::Http` for transport failures (connect, DNS, TLS, timeout)
    /// - `SdpError::InvalidResponse` if the body is not valid JSON
    pub async fn send(
        &self,
        endpoint: &str,
        method: ApiMethod,
        payload: Option<&Value>,
    ) -> Result<Value, SdpError> {
        let url = self.url_for(endpoint);

        let mut query: Vec<(&str, String)> = vec![(TECHNICIAN_KEY_PARAM, self.api_key.clone())];
        if let Some(data) = payload {
            let input_json = serde_json::to_string(data).map_err(SdpError::Serialization)?;
            query.push((INPUT_DATA_PARAM, input_json));
        }

        tracing::debug!(
            method = %method,
            endpoint = %endpoint,
            has_input_data = payload.is_some(),
            "Making SDP API request"
        );

        let response = self
            .http
            .request(method.into(), &url)
            .header(AUTH_HEADER, &self.api_key)
            .header("Accept", SDP_ACCEPT_HEADER)
            .query(&query)
            .send()
            .await
            .map_err(SdpError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(SdpError::Http)?;

        tracing::trace!(status = %status, body = %body, "SDP API response");

        serde_json::from_str(&body).map_err(SdpError::InvalidResponse)
    }

    /// Like [`send`](Self::send), but takes the method as text.
    ///
    /// Only the exact names `GET`, `POST`, `PUT` and `DELETE` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::UnsupportedMethod` without touching the network
    /// for any other method name.
    pub async fn send_raw(
        &self,
        endpoint: &str,
        method: &str,
        payload: Option<&Value>,
    ) -> Result<Value, SdpError> {
        let method: ApiMethod = method.parse().inspect_err(|_| {
            tracing::warn!(method = %method, endpoint = %endpoint, "Refusing unsupported HTTP method");
        })?;
        self.send(endpoint, method, payload).await
    }

    /// Dispatches an [`Action`] from the endpoint table.
    ///
    /// `path_params` fill the action's path template in order.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::PathParams` if the parameter count does not match
    /// the template, plus anything [`send`](Self::send) returns.
    pub async fn call(
        &self,
        action: Action,
        path_params: &[&str],
        payload: Option<Value>,
    ) -> Result<Value, SdpError> {
        let route = action.route();
        let endpoint = route.render(action.name(), path_params)?;
        self.send(&endpoint, route.method, payload.as_ref()).await
    }

    /// Tests connectivity and authentication by listing a single request.
    ///
    /// # Errors
    ///
    /// Returns `SdpError::ConnectionTest` with a sanitized message if the
    /// server is unreachable, returns something other than JSON, or reports
    /// a failed status.
    pub async fn test_connection(&self) -> Result<(), SdpError> {
        tracing::debug!("Testing connection to SDP server");

        let body = self
            .request_view_all(&ListInfo::new().with_row_count(1))
            .await
            .map_err(|e| match e {
                SdpError::Http(ref inner) if inner.is_timeout() => SdpError::connection_test(
                    "connection timed out - verify SDP_BASE_URL is correct and the server is reachable",
                ),
                other => SdpError::connection_test(other.sanitized_display(&self.api_key)),
            })?;

        match ResponseStatus::from_response(&body) {
            Some(status) if !status.is_success() => {
                let message = status.first_message().unwrap_or("unknown error");
                Err(SdpError::connection_test(format!(
                    "SDP returned status {}: {}",
                    status.status_code,
                    SdpError::sanitize_message(message, &self.api_key)
                )))
            }
            _ => {
                tracing::info!("Connection test successful");
                Ok(())
            }
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Gets full details of a single request.
    pub async fn request_view(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestView, &[request_id], None).await
    }

    /// Lists requests.
    ///
    /// `list_info` is sent verbatim as `{"list_info": ...}`; pass a
    /// [`ListInfo`] or any other serializable descriptor.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let list_info = ListInfo::new()
    ///     .with_row_count(10)
    ///     .with_criterion(SearchCriterion::is("status.name", "Open"));
    /// let page = client.request_view_all(&list_info).await?;
    /// ```
    pub async fn request_view_all<T>(&self, list_info: &T) -> Result<Value, SdpError>
    where
        T: Serialize + ?Sized,
    {
        let payload = envelope(&ListInfoEnvelope { list_info })?;
        self.call(Action::RequestViewAll, &[], Some(payload)).await
    }

    /// Creates a request from the given fields.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let created = client
    ///     .request_add(&json!({"subject": "Printer not working"}))
    ///     .await?;
    /// ```
    pub async fn request_add<T>(&self, fields: &T) -> Result<Value, SdpError>
    where
        T: Serialize + ?Sized,
    {
        let payload = envelope(&RequestEnvelope { request: fields })?;
        self.call(Action::RequestAdd, &[], Some(payload)).await
    }

    /// Updates fields of an existing request.
    pub async fn request_edit<T>(&self, request_id: &str, fields: &T) -> Result<Value, SdpError>
    where
        T: Serialize + ?Sized,
    {
        let payload = envelope(&RequestEnvelope { request: fields })?;
        self.call(Action::RequestEdit, &[request_id], Some(payload))
            .await
    }

    /// Moves a request to the trash.
    pub async fn request_delete(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestDelete, &[request_id], None).await
    }

    /// Permanently deletes a request that is already in the trash.
    pub async fn request_delete_from_trash(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestDeleteFromTrash, &[request_id], None)
            .await
    }

    /// Restores a request from the trash.
    pub async fn request_restore_from_trash(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestRestoreFromTrash, &[request_id], None)
            .await
    }

    /// Closes a request.
    pub async fn request_close(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestClose, &[request_id], None).await
    }

    /// Assigns a request to the technician owning the API key.
    pub async fn request_pickup(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestPickup, &[request_id], None).await
    }

    /// Assigns a request to a support group and technician, both by name.
    pub async fn request_assign(
        &self,
        request_id: &str,
        group: &str,
        technician: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&AssignEnvelope::new(group, technician))?;
        self.call(Action::RequestAssign, &[request_id], Some(payload))
            .await
    }

    /// Gets the summary view of a request.
    pub async fn request_get_summary(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestGetSummary, &[request_id], None)
            .await
    }

    // ========================================================================
    // Resolutions
    // ========================================================================

    /// Gets the resolution of a request.
    pub async fn request_get_resolution(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestGetResolution, &[request_id], None)
            .await
    }

    /// Adds a resolution, optionally copying it to linked requests.
    pub async fn request_add_resolution(
        &self,
        request_id: &str,
        content: &str,
        add_to_linked_requests: bool,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&ResolutionEnvelope::add(content, add_to_linked_requests))?;
        self.call(Action::RequestAddResolution, &[request_id], Some(payload))
            .await
    }

    /// Replaces the content of a request's resolution.
    pub async fn request_edit_resolution(
        &self,
        request_id: &str,
        content: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&ResolutionEnvelope::edit(content))?;
        self.call(Action::RequestEditResolution, &[request_id], Some(payload))
            .await
    }

    // ========================================================================
    // Associations
    // ========================================================================

    /// Associates a problem with the request.
    pub async fn request_associate_problem(
        &self,
        request_id: &str,
        problem_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&ProblemAssociationEnvelope::new(problem_id))?;
        self.call(Action::RequestAssociateProblem, &[request_id], Some(payload))
            .await
    }

    /// Gets the problem associated with the request.
    pub async fn request_get_problem(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestGetProblem, &[request_id], None)
            .await
    }

    /// Removes the association with a problem.
    pub async fn request_dissociate_problem(
        &self,
        request_id: &str,
        problem_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&ProblemAssociationEnvelope::new(problem_id))?;
        self.call(Action::RequestDissociateProblem, &[request_id], Some(payload))
            .await
    }

    /// Records that the request initiated the given change.
    pub async fn request_associate_initiated_change(
        &self,
        request_id: &str,
        change_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&InitiatedChangeEnvelope::new(change_id))?;
        self.call(
            Action::RequestAssociateInitiatedChange,
            &[request_id],
            Some(payload),
        )
        .await
    }

    /// Gets the change initiated by the request.
    pub async fn request_get_initiated_change(
        &self,
        request_id: &str,
    ) -> Result<Value, SdpError> {
        self.call(Action::RequestGetInitiatedChange, &[request_id], None)
            .await
    }

    /// Removes an initiated-change association.
    pub async fn request_dissociate_initiated_change(
        &self,
        request_id: &str,
        change_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&InitiatedChangeEnvelope::new(change_id))?;
        self.call(
            Action::RequestDissociateInitiatedChange,
            &[request_id],
            Some(payload),
        )
        .await
    }

    /// Records that the given change caused the request.
    pub async fn request_associate_caused_by_change(
        &self,
        request_id: &str,
        change_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&CausedByChangeEnvelope::new(change_id))?;
        self.call(
            Action::RequestAssociateCausedByChange,
            &[request_id],
            Some(payload),
        )
        .await
    }

    /// Gets the change that caused the request.
    pub async fn request_get_caused_by_change(
        &self,
        request_id: &str,
    ) -> Result<Value, SdpError> {
        self.call(Action::RequestGetCausedByChange, &[request_id], None)
            .await
    }

    /// Removes a caused-by-change association.
    pub async fn request_dissociate_caused_by_change(
        &self,
        request_id: &str,
        change_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&CausedByChangeEnvelope::new(change_id))?;
        self.call(
            Action::RequestDissociateCausedByChange,
            &[request_id],
            Some(payload),
        )
        .await
    }

    // ========================================================================
    // Linked requests
    // ========================================================================

    /// Links another request to this one. A missing comment is sent as `""`.
    pub async fn request_link_request(
        &self,
        request_id: &str,
        linked_request_id: &str,
        comments: Option<&str>,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&LinkRequestsEnvelope::link(linked_request_id, comments))?;
        self.call(Action::RequestLinkRequest, &[request_id], Some(payload))
            .await
    }

    /// Lists the requests linked to this one.
    pub async fn request_get_linked_requests(&self, request_id: &str) -> Result<Value, SdpError> {
        self.call(Action::RequestGetLinkedRequests, &[request_id], None)
            .await
    }

    /// Removes the link to another request.
    pub async fn request_unlink_request(
        &self,
        request_id: &str,
        linked_request_id: &str,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&LinkRequestsEnvelope::unlink(linked_request_id))?;
        self.call(Action::RequestUnlinkRequest, &[request_id], Some(payload))
            .await
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// Adds a note to a request.
    ///
    /// # Arguments
    ///
    /// * `request_id` - The unique request ID
    /// * `description` - The note content
    /// * `flags` - Visibility and notification flags, all off by default
    pub async fn request_add_note(
        &self,
        request_id: &str,
        description: &str,
        flags: NoteFlags,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&NoteEnvelope::add(description, flags))?;
        self.call(Action::RequestAddNote, &[request_id], Some(payload))
            .await
    }

    /// Replaces a note's content and its two visibility flags.
    pub async fn request_edit_note(
        &self,
        request_id: &str,
        note_id: &str,
        description: &str,
        show_to_requester: bool,
        notify_technician: bool,
    ) -> Result<Value, SdpError> {
        let payload = envelope(&NoteEnvelope::edit(
            description,
            show_to_requester,
            notify_technician,
        ))?;
        self.call(Action::RequestEditNote, &[request_id, note_id], Some(payload))
            .await
    }

    /// Gets a single note.
    pub async fn request_view_note(
        &self,
        request_id: &str,
        note_id: &str,
    ) -> Result<Value, SdpError> {
        self.call(Action::RequestViewNote, &[request_id, note_id], None)
            .await
    }

    /// Deletes a note.
    pub async fn request_delete_note(
        &self,
        request_id: &str,
        note_id: &str,
    ) -> Result<Value, SdpError> {
        self.call(Action::RequestDeleteNote, &[request_id, note_id], None)
            .await
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Gets the history of any entity, e.g. `entity_view_history("problems", "7")`.
    pub async fn entity_view_history(
        &self,
        entity: &str,
        entity_id: &str,
    ) -> Result<Value, SdpError> {
        self.call(Action::EntityViewHistory, &[entity, entity_id], None)
            .await
    }
}

/// Serializes an envelope into the JSON value sent as `input_data`.
fn envelope<T: Serialize + ?Sized>(value: &T) -> Result<Value, SdpError> {
    serde_json::to_value(value).map_err(SdpError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            SdpClient::normalize_base_url("https://example.com"),
            "https://example.com/api/v3/"
        );
        assert_eq!(
            SdpClient::normalize_base_url("https://example.com/"),
            "https://example.com/api/v3/"
        );
        assert_eq!(
            SdpClient::normalize_base_url("https://example.com/api/v3"),
            "https://example.com/api/v3/"
        );
        assert_eq!(
            SdpClient::normalize_base_url("https://example.com/api/v3/"),
            "https://example.com/api/v3/"
        );
        assert_eq!(
            SdpClient::normalize_base_url("https://example.com/api"),
            "https://example.com/api/v3/"
        );
        assert_eq!(
            SdpClient::normalize_base_url("https://example.com/sdp/"),
            "https://example.com/sdp/api/v3/"
        );
    }

    #[test]
    fn test_normalize_base_url_is_idempotent() {
        let once = SdpClient::normalize_base_url("https://example.com");
        assert_eq!(SdpClient::normalize_base_url(&once), once);
    }

    /// Creates an SdpClient for unit tests without requiring Config/env vars.
    fn test_client() -> SdpClient {
        SdpClient {
            http: Client::new(),
            base_url: "https://example.com/api/v3/".to_string(),
            api_key: "test_key".to_string(),
        }
    }

    #[test]
    fn test_url_for() {
        let client = test_client();
        assert_eq!(
            client.url_for("requests/42"),
            "https://example.com/api/v3/requests/42"
        );
        assert_eq!(
            client.url_for("/requests"),
            "https://example.com/api/v3/requests"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", test_client());
        assert!(!debug.contains("test_key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_parts_normalizes() {
        let client = SdpClient::from_parts("k", "https://sdp.example.com/").unwrap();
        assert_eq!(client.base_url(), "https://sdp.example.com/api/v3/");
    }

    #[tokio::test]
    async fn test_send_raw_rejects_unknown_method_without_network() {
        // Port 9 (discard) is never contacted: the method check happens first.
        let client = SdpClient::from_parts("k", "http://127.0.0.1:9/").unwrap();
        let err = client.send_raw("requests", "PATCH", None).await.unwrap_err();
        assert!(matches!(err, SdpError::UnsupportedMethod(ref m) if m == "PATCH"));
    }

    #[tokio::test]
    async fn test_call_rejects_wrong_param_count() {
        let client = test_client();
        let err = client
            .call(Action::RequestViewNote, &["42"], None)
            .await
            .unwrap_err();
        assert!(matches!(err, SdpError::PathParams { action: "request_view_note", .. }));
    }
}
