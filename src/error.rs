//! Error and result module

use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// User request or OneSignal response JSON data was faulty.
    #[error("Error serializing to JSON: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A problem connecting to the OneSignal servers.
    #[error("Error connecting to OneSignal: {0}")]
    ConnectionError(#[from] hyper_util::client::legacy::Error),

    /// Reading a response body from OneSignal failed.
    #[error("Error reading the response body: {0}")]
    ResponseBodyError(#[from] hyper::Error),

    /// Couldn't assemble an HTTP request for the given endpoint.
    #[error("Error building the request: {0}")]
    BuildRequestError(http::Error),

    /// OneSignal didn't respond within the configured request timeout.
    #[error("request timed out after {0} seconds")]
    RequestTimeout(u64),

    /// OneSignal rejected the request. Carries the decoded error body, or
    /// a synthesized `{"errors": ...}` object when the body was not JSON.
    #[error("OneSignal could not process the request (status {status_code})")]
    ApiError { status_code: u16, body: Value },

    /// `cancel` or `details` was called with a notification that has no
    /// id, i.e. one that was probably not sent yet.
    #[error("the notification has no id, it was probably not sent yet")]
    NotificationNotSent,

    /// A notification serialized to something other than a JSON object.
    #[error("notification data is not a JSON object")]
    InvalidData,
}
