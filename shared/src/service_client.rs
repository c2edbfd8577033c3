//! HTTP client shared by the live service implementations

use crate::{error::AppError, utils::generate_request_id, Result};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const SEGMENT_BASE: &str = "http://gateway.local/";

/// One request, one response: no retries, no caching.
///
/// Clones share the same connection pool and session token, so a token
/// obtained through one domain service is attached by all of them.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
    service_name: String,
    session_token: Arc<RwLock<Option<String>>>,
}

impl ServiceClient {
    pub fn new(base_url: String, service_name: String, timeout_seconds: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_name,
            session_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins segments into an endpoint path, percent-encoding each one so a
    /// caller-supplied id always stays a single segment.
    ///
    /// Empty, `.` and `..` segments cannot be expressed in a URL path and are
    /// rejected.
    pub fn endpoint(segments: &[&str]) -> Result<String> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(AppError::rejected(format!(
                "{:?} is not a valid path segment",
                segment
            )));
        }

        let mut url = Url::parse(SEGMENT_BASE)
            .map_err(|e| AppError::configuration(format!("Invalid endpoint base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("Endpoint base cannot hold a path"))?
            .clear()
            .extend(segments);

        Ok(url.path().to_string())
    }

    pub fn set_session_token(&self, token: impl Into<String>) {
        *self.session_token.write() = Some(token.into());
    }

    pub fn clear_session_token(&self) {
        *self.session_token.write() = None;
    }

    pub fn session_token(&self) -> Option<String> {
        self.session_token.read().clone()
    }

    /// Make a GET request
    pub async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::GET, endpoint)).await
    }

    /// Make a GET request with a serialized query string
    pub async fn get_query<Q, T>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::GET, endpoint).query(query)).await
    }

    /// Make a POST request
    pub async fn post<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::POST, endpoint).json(body)).await
    }

    /// Make a PUT request
    pub async fn put<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::PUT, endpoint).json(body)).await
    }

    /// Make a PATCH request
    pub async fn patch<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::PATCH, endpoint).json(body)).await
    }

    /// Make a DELETE request
    pub async fn delete<T>(&self, endpoint: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::DELETE, endpoint)).await
    }

    /// Make a multipart POST request (file uploads)
    pub async fn post_multipart<R>(&self, endpoint: &str, form: Form) -> Result<R>
    where
        R: for<'de> Deserialize<'de>,
    {
        self.send(self.request(Method::POST, endpoint).multipart(form)).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let request_id = generate_request_id();
        debug!(service = %self.service_name, %method, %url, %request_id, "sending request");

        let builder = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, request_id);

        match self.session_token.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = builder
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T>(&self, response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                AppError::external_service(
                    &self.service_name,
                    format!("Failed to deserialize response: {}", e),
                )
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(AppError::external_service(
                &self.service_name,
                format!("HTTP {} - {}", status, error_text),
            ))
        }
    }

    /// Map reqwest errors to AppError
    fn map_reqwest_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::timeout(format!("Request to {} timed out", self.service_name))
        } else if error.is_connect() {
            AppError::service_unavailable(&self.service_name)
        } else {
            AppError::HttpClient(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ServiceClient {
        ServiceClient::new(server.uri(), "test".to_string(), 5).unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ServiceClient::new("http://localhost:1/".to_string(), "t".to_string(), 30).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1");
    }

    #[test]
    fn endpoint_escapes_each_segment() {
        assert_eq!(
            ServiceClient::endpoint(&["insurance", "claims", "clm-001"]).unwrap(),
            "/insurance/claims/clm-001"
        );
        assert_eq!(
            ServiceClient::endpoint(&["insurance", "claims", "clm#7"]).unwrap(),
            "/insurance/claims/clm%237"
        );
        assert_eq!(
            ServiceClient::endpoint(&["ingestion", "records", "../../security/sessions/x?y=1"])
                .unwrap(),
            "/ingestion/records/..%2F..%2Fsecurity%2Fsessions%2Fx%3Fy=1"
        );
        assert_eq!(
            ServiceClient::endpoint(&["accessibility", "translations", "hi-IN"]).unwrap(),
            "/accessibility/translations/hi-IN"
        );
    }

    #[test]
    fn endpoint_rejects_dot_and_empty_segments() {
        for segment in ["", ".", ".."] {
            let err = ServiceClient::endpoint(&["ingestion", "records", segment]).unwrap_err();
            assert_eq!(err.error_code(), "REJECTED");
        }
    }

    #[tokio::test]
    async fn sends_json_headers_and_request_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("content-type", "application/json"))
            .and(header_exists(REQUEST_ID_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let body: Value = client(&server).get("/ping").await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn serializes_query_parameters() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query {
            include_expired: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            limit: Option<u32>,
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("includeExpired", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let items: Vec<Value> = client(&server)
            .get_query("/items", &Query { include_expired: false, limit: None })
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn attaches_bearer_token_once_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/secure"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let shared = client.clone();
        shared.set_session_token("abc123");
        assert_eq!(client.session_token().as_deref(), Some("abc123"));

        let _: Value = client.post("/secure", &json!({})).await.unwrap();

        client.clear_session_token();
        assert!(shared.session_token().is_none());
    }

    #[tokio::test]
    async fn non_success_status_becomes_external_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let err = client(&server).delete::<Value>("/gone").await.unwrap_err();
        match err {
            AppError::ExternalService { message, .. } => {
                assert!(message.contains("404"));
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/shape"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .put::<_, Value>("/shape", &json!({"a": 1}))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "EXTERNAL_SERVICE_ERROR");
    }
}
