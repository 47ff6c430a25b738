//! The OneSignal call result

use crate::error::Error;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use serde_json::{json, Value};

/// The normalized outcome of one OneSignal API call, returned from
/// [`send`](crate::Client::send) and [`cancel`](crate::Client::cancel).
///
/// The service reports partial failures inside a `200` body through an
/// `errors` key, so a successful status code alone does not mean every
/// recipient was accepted. The `errors` field surfaces that convention
/// without raising.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    /// The HTTP status code of the response.
    pub status_code: u16,

    /// True when the status code was not `200 OK`.
    pub is_error: bool,

    /// The body's `errors` value, set when the call failed or when the
    /// body carried an `errors` key despite the `200`.
    pub errors: Option<Value>,

    /// The fully decoded JSON body.
    pub body: Value,
}

impl CallResult {
    /// Normalizes one response. A body that is not valid JSON is replaced
    /// with a synthetic `errors` object instead of failing the call.
    pub fn new(status_code: u16, body: &[u8]) -> CallResult {
        let body: Value = serde_json::from_slice(body)
            .unwrap_or_else(|_| json!({ "errors": "Failed to decode JSON in OneSignalClient." }));

        let is_error = status_code != 200;
        let has_errors_key = body.as_object().is_some_and(|body| body.contains_key("errors"));

        let errors = if is_error || has_errors_key {
            body.get("errors").cloned()
        } else {
            None
        };

        CallResult {
            status_code,
            is_error,
            errors,
            body,
        }
    }

    pub(crate) async fn from_response(response: hyper::Response<Incoming>) -> Result<CallResult, Error> {
        let status_code = response.status().as_u16();
        let body = response.into_body().collect().await?.to_bytes();

        Ok(CallResult::new(status_code, &body))
    }

    /// The id the service assigned to the created notification, if the
    /// body carries one. Keep it around to cancel the notification or to
    /// ask for its delivery details later.
    pub fn notification_id(&self) -> Option<&str> {
        self.body.get("id").and_then(Value::as_str)
    }
}
