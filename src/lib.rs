//! # os1
//!
//! os1 is an asynchronous client for the OneSignal push notification
//! service. It provides a type-safe way to build notifications targeting
//! segments, filters or individual devices, send them through the
//! OneSignal REST API, cancel scheduled notifications and fetch delivery
//! details.
//!
//! To create a notification, the builders hold the shared content and
//! delivery fields while selecting the audience:
//!
//! * [`SegmentNotificationBuilder`] delivers to subscriber segments.
//! * [`FilterNotificationBuilder`] delivers to users matching a filter
//!   expression.
//! * [`DeviceNotificationBuilder`] delivers to specific devices.
//!
//! The client authenticates every request with the application's REST API
//! key and keeps one connection pool alive for its whole lifetime.
//!
//! ## Example
//!
//! ```no_run
//! # use os1::{Client, SegmentNotificationBuilder, NotificationBuilder};
//! # #[tokio::main]
//! # async fn main() -> Result<(), os1::Error> {
//! let client = Client::new("my-app-id", "my-rest-api-key", None);
//!
//! let notification = SegmentNotificationBuilder::new("Ch-check it out!", &["Subscribed Users"])
//!     .set_heading("en", "Hi there")
//!     .set_url("https://example.com/news")
//!     .build();
//!
//! let result = client.send(&notification).await?;
//! println!("created notification {:?}", result.notification_id());
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate serde;

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use crate::client::{AppId, Client, ClientOptions};
pub use crate::error::Error;
pub use crate::request::notification::{
    DelayedOption, DeviceNotificationBuilder, Filter, FilterNotificationBuilder, NotificationBuilder, Priority,
    Relation, SegmentNotificationBuilder,
};
pub use crate::request::payload::{Notification, NotificationId, NotificationLike};
pub use crate::response::CallResult;
