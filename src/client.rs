//! The client module for sending requests and parsing responses

use crate::error::Error;
use crate::request::payload::{NotificationId, NotificationLike};
use crate::response::CallResult;
use tokio::time::timeout;

use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{self, Method, StatusCode};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use serde_json::{json, Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://onesignal.com/api/v1/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

type HyperConnector = HttpsConnector<HttpConnector>;

/// The OneSignal application(s) a client operates on, decided once at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppId {
    /// One application. `send` targets it through the `app_id` field.
    Single(String),

    /// Several applications. `send` targets them through the `app_ids`
    /// field, with the ids wrapped in an additional list. The extra list
    /// looks wrong but matches what existing consumers of the v1 API put
    /// on the wire, so it is kept for compatibility.
    Multiple(Vec<String>),
}

impl From<&str> for AppId {
    fn from(app_id: &str) -> AppId {
        AppId::Single(app_id.to_string())
    }
}

impl From<String> for AppId {
    fn from(app_id: String) -> AppId {
        AppId::Single(app_id)
    }
}

impl From<Vec<String>> for AppId {
    fn from(app_ids: Vec<String>) -> AppId {
        AppId::Multiple(app_ids)
    }
}

impl From<Vec<&str>> for AppId {
    fn from(app_ids: Vec<&str>) -> AppId {
        AppId::Multiple(app_ids.into_iter().map(String::from).collect())
    }
}

/// Renders the value for the `app_id` query parameter of the
/// notification detail endpoints. Multiple ids come out comma-joined;
/// those endpoints operate on a single application in practice.
impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppId::Single(app_id) => write!(f, "{}", app_id),
            AppId::Multiple(app_ids) => write!(f, "{}", app_ids.join(",")),
        }
    }
}

/// Uses the public v1 endpoint by default.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The timeout of the HTTP requests
    pub request_timeout_secs: Option<u64>,
    /// The timeout for idle sockets being kept alive
    pub pool_idle_timeout_secs: Option<u64>,
    /// The URL every endpoint path is appended to
    pub base_api_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            pool_idle_timeout_secs: Some(600),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            base_api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_api_url(mut self, base_api_url: impl Into<String>) -> Self {
        self.base_api_url = base_api_url.into();
        self
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    pub fn with_pool_idle_timeout(mut self, seconds: u64) -> Self {
        self.pool_idle_timeout_secs = Some(seconds);
        self
    }
}

#[derive(Debug, Clone)]
struct ConnectionOptions {
    base_api_url: String,
    request_timeout: Duration,
}

impl From<ClientOptions> for ConnectionOptions {
    fn from(value: ClientOptions) -> Self {
        let ClientOptions {
            base_api_url,
            pool_idle_timeout_secs: _,
            request_timeout_secs,
        } = value;
        let request_timeout = Duration::from_secs(request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS));
        Self {
            base_api_url,
            request_timeout,
        }
    }
}

/// Handles requests to and responses from the OneSignal REST API.
/// Holds the credentials, injects the needed authentication into every
/// request and keeps one connection pool alive for its whole lifetime.
///
/// The `send` and `cancel` methods normalize the response into a
/// [`CallResult`]; `details` returns the re-keyed response body directly.
/// Any status other than `200 OK` fails the call with
/// [`Error::ApiError`] holding the response body for handling.
#[derive(Debug, Clone)]
pub struct Client {
    app_id: AppId,
    rest_api_key: String,
    options: ConnectionOptions,
    http_client: HttpClient<HyperConnector, BoxBody<Bytes, Infallible>>,
}

impl Client {
    /// Creates a client for the given application(s), authenticating with
    /// the REST API key from the application settings. If `options` is
    /// not set, a default using the public v1 endpoint will be
    /// initialized.
    pub fn new(app_id: impl Into<AppId>, rest_api_key: impl Into<String>, options: Option<ClientOptions>) -> Client {
        let options = options.unwrap_or_default();
        let http_client = HttpClient::builder(TokioExecutor::new())
            .pool_idle_timeout(options.pool_idle_timeout_secs.map(Duration::from_secs))
            .build(default_connector());

        Client {
            app_id: app_id.into(),
            rest_api_key: rest_api_key.into(),
            options: options.into(),
            http_client,
        }
    }

    /// Send a notification. The targeted application is merged into the
    /// notification's request data, taking precedence over any
    /// identifier the data already carried.
    #[cfg_attr(feature = "tracing", ::tracing::instrument)]
    pub async fn send<T: NotificationLike>(&self, notification: &T) -> Result<CallResult, Error> {
        let data = self.send_data(notification)?;
        let response = self.request(Method::POST, "notifications", Value::Object(data)).await?;

        CallResult::from_response(response).await
    }

    /// Cancel a sent or scheduled notification. Accepts the id the
    /// service assigned, or a [`Notification`](crate::Notification) whose
    /// `id` is set; fails with [`Error::NotificationNotSent`] before any
    /// HTTP call otherwise.
    #[cfg_attr(feature = "tracing", ::tracing::instrument)]
    pub async fn cancel<T>(&self, notification: &T) -> Result<CallResult, Error>
    where
        T: NotificationId + ?Sized,
    {
        let endpoint = self.notification_endpoint(notification)?;
        let response = self.request(Method::DELETE, &endpoint, json!({})).await?;

        CallResult::from_response(response).await
    }

    /// Fetch the delivery details of a notification. Returns the decoded
    /// response body with every top-level key converted to snake_case.
    /// Unlike `send` and `cancel`, the body is not wrapped in a
    /// [`CallResult`].
    #[cfg_attr(feature = "tracing", ::tracing::instrument)]
    pub async fn details<T>(&self, notification: &T) -> Result<Map<String, Value>, Error>
    where
        T: NotificationId + ?Sized,
    {
        let endpoint = self.notification_endpoint(notification)?;
        let response = self.request(Method::GET, &endpoint, json!({})).await?;
        let body = response.into_body().collect().await?.to_bytes();
        let decoded: Map<String, Value> = serde_json::from_slice(&body)?;

        Ok(underscore_keys(decoded))
    }

    /// The primitive every operation goes through. Returns the raw
    /// response for post-processing when the service answers `200 OK`;
    /// escalates any other status as [`Error::ApiError`] carrying the
    /// decoded body, or a synthesized status-code message when the body
    /// is not JSON.
    async fn request(&self, method: Method, endpoint: &str, payload: Value) -> Result<hyper::Response<Incoming>, Error> {
        let request = self.build_request(method, endpoint, &payload)?;
        let requesting = self.http_client.request(request);

        let Ok(response_result) = timeout(self.options.request_timeout, requesting).await else {
            return Err(Error::RequestTimeout(self.options.request_timeout.as_secs()));
        };

        let response = response_result?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.into_body().collect().await?.to_bytes();
            let body = serde_json::from_slice(&body).unwrap_or_else(|_| {
                json!({ "errors": format!("Status code \"{}\" returned.", status.as_u16()) })
            });

            return Err(Error::ApiError {
                status_code: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        payload: &Value,
    ) -> Result<hyper::Request<BoxBody<Bytes, Infallible>>, Error> {
        let path = format!("{}{}", self.options.base_api_url, endpoint);

        // The service expects the key behind a literal "Basic" label,
        // without base64 user:pass encoding.
        let mut builder = hyper::Request::builder()
            .uri(&path)
            .method(method)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Basic {}", self.rest_api_key));

        let payload_json = serde_json::to_string(payload)?;
        builder = builder.header(CONTENT_LENGTH, format!("{}", payload_json.len()).as_bytes());

        let request_body = Full::from(payload_json.into_bytes()).boxed();
        builder.body(request_body).map_err(Error::BuildRequestError)
    }

    fn send_data<T: NotificationLike>(&self, notification: &T) -> Result<Map<String, Value>, Error> {
        let mut data = notification.get_data()?;

        match &self.app_id {
            AppId::Single(app_id) => {
                data.insert("app_id".to_string(), Value::String(app_id.clone()));
            }
            AppId::Multiple(app_ids) => {
                // The extra list around the ids is deliberate, see
                // `AppId::Multiple`.
                data.insert("app_ids".to_string(), json!([app_ids]));
            }
        }

        Ok(data)
    }

    fn notification_endpoint<T>(&self, notification: &T) -> Result<String, Error>
    where
        T: NotificationId + ?Sized,
    {
        let id = notification.notification_id()?;

        Ok(format!("notifications/{}?app_id={}", id, self.app_id))
    }
}

fn default_connector() -> HyperConnector {
    HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_only()
        .enable_http1()
        .enable_http2()
        .build()
}

/// Converts a camelCase key to snake_case by inserting an underscore
/// before every uppercase letter and lowercasing it. Already-lowercase
/// characters pass through untouched.
pub fn to_underscore(key: &str) -> String {
    let mut result = String::with_capacity(key.len());

    for letter in key.chars() {
        if letter.is_uppercase() {
            result.push('_');
            result.extend(letter.to_lowercase());
        } else {
            result.push(letter);
        }
    }

    result
}

/// Re-keys the top level of a details response. Nested objects keep
/// their original keys.
fn underscore_keys(body: Map<String, Value>) -> Map<String, Value> {
    body.into_iter().map(|(key, value)| (to_underscore(&key), value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::notification::{NotificationBuilder, SegmentNotificationBuilder};

    fn test_client() -> Client {
        Client::new("a-test-app-id", "a-test-rest-api-key", None)
    }

    #[test]
    fn test_request_uri() {
        let client = test_client();
        let request = client.build_request(Method::POST, "notifications", &json!({})).unwrap();
        let uri = format!("{}", request.uri());

        assert_eq!("https://onesignal.com/api/v1/notifications", &uri);
    }

    #[test]
    fn test_request_uri_with_custom_base_api_url() {
        let options = ClientOptions::new().with_base_api_url("https://localhost:8080/api/v1/");
        let client = Client::new("a-test-app-id", "a-test-rest-api-key", Some(options));
        let request = client.build_request(Method::POST, "notifications", &json!({})).unwrap();
        let uri = format!("{}", request.uri());

        assert_eq!("https://localhost:8080/api/v1/notifications", &uri);
    }

    #[test]
    fn test_request_method() {
        let client = test_client();
        let request = client.build_request(Method::DELETE, "notifications/id", &json!({})).unwrap();

        assert_eq!(&Method::DELETE, request.method());
    }

    #[test]
    fn test_request_authorization() {
        let client = test_client();
        let request = client.build_request(Method::POST, "notifications", &json!({})).unwrap();

        assert_eq!(
            "Basic a-test-rest-api-key",
            request.headers().get(AUTHORIZATION).unwrap()
        );
    }

    #[test]
    fn test_request_content_type() {
        let client = test_client();
        let request = client.build_request(Method::POST, "notifications", &json!({})).unwrap();

        assert_eq!("application/json", request.headers().get(CONTENT_TYPE).unwrap());
    }

    #[test]
    fn test_request_content_length() {
        let client = test_client();
        let payload = json!({ "contents": { "en": "Hello" } });
        let request = client.build_request(Method::POST, "notifications", &payload).unwrap();
        let payload_json = serde_json::to_string(&payload).unwrap();
        let content_length = request.headers().get(CONTENT_LENGTH).unwrap().to_str().unwrap();

        assert_eq!(&format!("{}", payload_json.len()), content_length);
    }

    #[tokio::test]
    async fn test_request_body() {
        let client = test_client();
        let payload = json!({ "contents": { "en": "Hello" }, "included_segments": ["All"] });
        let request = client.build_request(Method::POST, "notifications", &payload).unwrap();

        let body = request.into_body().collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        assert_eq!(serde_json::to_string(&payload).unwrap(), body_str);
    }

    #[test]
    fn test_send_data_with_a_single_app_id() {
        let client = test_client();
        let notification = SegmentNotificationBuilder::new("Hello", &["All"]).build();
        let data = client.send_data(&notification).unwrap();

        assert_eq!(json!("a-test-app-id"), data["app_id"]);
        assert_eq!(json!({ "en": "Hello" }), data["contents"]);
    }

    #[test]
    fn test_send_data_with_multiple_app_ids() {
        let client = Client::new(vec!["app-1", "app-2"], "a-test-rest-api-key", None);
        let notification = SegmentNotificationBuilder::new("Hello", &["All"]).build();
        let data = client.send_data(&notification).unwrap();

        assert!(!data.contains_key("app_id"));
        assert_eq!(json!([["app-1", "app-2"]]), data["app_ids"]);
    }

    #[test]
    fn test_send_data_keeps_the_client_app_id() {
        #[derive(Serialize, Debug)]
        struct RogueNotification {
            app_id: &'static str,
            contents: &'static str,
        }

        impl NotificationLike for RogueNotification {
            fn get_id(&self) -> Option<&str> {
                None
            }
        }

        let client = test_client();
        let notification = RogueNotification {
            app_id: "someone-elses-app",
            contents: "Hello",
        };
        let data = client.send_data(&notification).unwrap();

        assert_eq!(json!("a-test-app-id"), data["app_id"]);
    }

    #[test]
    fn test_notification_endpoint() {
        let client = test_client();
        let endpoint = client.notification_endpoint("already-sent-id").unwrap();

        assert_eq!("notifications/already-sent-id?app_id=a-test-app-id", &endpoint);
    }

    #[test]
    fn test_notification_endpoint_with_multiple_app_ids() {
        let client = Client::new(vec!["app-1", "app-2"], "a-test-rest-api-key", None);
        let endpoint = client.notification_endpoint("already-sent-id").unwrap();

        assert_eq!("notifications/already-sent-id?app_id=app-1,app-2", &endpoint);
    }

    #[tokio::test]
    async fn test_cancel_without_an_id_fails_before_any_call() {
        let client = test_client();
        let notification = SegmentNotificationBuilder::new("Hello", &["All"]).build();

        assert!(matches!(
            client.cancel(&notification).await,
            Err(Error::NotificationNotSent)
        ));
    }

    #[tokio::test]
    async fn test_details_without_an_id_fails_before_any_call() {
        let client = test_client();
        let notification = SegmentNotificationBuilder::new("Hello", &["All"]).build();

        assert!(matches!(
            client.details(&notification).await,
            Err(Error::NotificationNotSent)
        ));
    }

    #[test]
    fn test_to_underscore() {
        assert_eq!("player_id", to_underscore("playerId"));
        assert_eq!("id", to_underscore("id"));
        assert_eq!("external_user_id", to_underscore("externalUserId"));
        assert_eq!("successful", to_underscore("successful"));
    }

    #[test]
    fn test_underscore_keys_is_not_recursive() {
        let body: Map<String, Value> = serde_json::from_str(
            r#"{"remaining": 3, "convertedPlayers": 2, "platformDeliveryStats": {"chromeWebPush": 1}}"#,
        )
        .unwrap();
        let result = underscore_keys(body);

        assert_eq!(json!(2), result["converted_players"]);
        assert_eq!(json!(1), result["platform_delivery_stats"]["chromeWebPush"]);
        assert!(!result.contains_key("convertedPlayers"));
    }

    #[test]
    fn test_app_id_display() {
        assert_eq!("abc", AppId::from("abc").to_string());
        assert_eq!("a,b", AppId::from(vec!["a", "b"]).to_string());
    }
}
