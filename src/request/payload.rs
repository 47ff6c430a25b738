//! Notification payload with audience, content and custom data

use crate::error::Error;
use crate::request::notification::{DelayedOption, Filter, Priority};
use erased_serde::Serialize as ErasedSerialize;
use serde::Serialize;
use serde_json::{self, Map, Value};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// The request-body contract the client consumes when sending. Implement
/// it to send your own notification type instead of [`Notification`].
pub trait NotificationLike: Serialize + Debug {
    /// The identifier the service assigned to this notification, if known.
    fn get_id(&self) -> Option<&str>;

    /// The request fields for the create-notification call, before the
    /// client merges the targeted application on top.
    fn get_data(&self) -> Result<Map<String, Value>, Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::InvalidData),
        }
    }
}

/// Anything that resolves to the id of an already-created notification.
/// The [`cancel`](crate::Client::cancel) and
/// [`details`](crate::Client::details) endpoints accept a bare id string
/// as well as a sent [`Notification`].
pub trait NotificationId: Debug {
    fn notification_id(&self) -> Result<&str, Error>;
}

impl NotificationId for str {
    fn notification_id(&self) -> Result<&str, Error> {
        Ok(self)
    }
}

impl NotificationId for String {
    fn notification_id(&self) -> Result<&str, Error> {
        Ok(self)
    }
}

impl NotificationId for Notification<'_> {
    fn notification_id(&self) -> Result<&str, Error> {
        self.id.as_deref().ok_or(Error::NotificationNotSent)
    }
}

/// The audience of a notification. Exactly one targeting mode goes into
/// every create call.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum Target<'a> {
    /// Deliver to subscriber segments.
    Segments {
        included_segments: Vec<&'a str>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        excluded_segments: Vec<&'a str>,
    },
    /// Deliver to users matching the filter expression.
    Filters { filters: Vec<Filter<'a>> },
    /// Deliver to specific devices by their player ids.
    Devices { include_player_ids: Vec<&'a str> },
}

/// Content and delivery fields shared by every notification flavor. All
/// fields are optional on the wire; the message maps are localized by
/// two-letter language code.
#[derive(Serialize, Debug, Clone, Default)]
pub struct Content<'a> {
    /// The message text per language. Required by the service unless a
    /// template id is given.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub contents: BTreeMap<&'a str, &'a str>,

    /// The title per language.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headings: BTreeMap<&'a str, &'a str>,

    /// The subtitle per language, iOS only.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub subtitle: BTreeMap<&'a str, &'a str>,

    /// Id of a template created in the OneSignal dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<&'a str>,

    /// The URL to open when the notification is tapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,

    /// Wake the receiving app without displaying anything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_available: Option<bool>,

    /// Allow the receiving app to modify the content before display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutable_content: Option<bool>,

    /// Android small icon resource name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_icon: Option<&'a str>,

    /// Android big picture URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_picture: Option<&'a str>,

    /// Schedule delivery for a future time, e.g.
    /// `2026-09-24 14:00:00 GMT-0700`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_after: Option<&'a str>,

    /// Per-user delivery staggering relative to `send_after`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delayed_option: Option<DelayedOption>,

    /// The local time of day for [`DelayedOption::Timezone`] deliveries,
    /// e.g. `9:00AM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time_of_day: Option<&'a str>,

    /// Seconds the notification stays valid for offline devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Android delivery priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// A push notification ready to be sent with the
/// [`Client`](crate::Client). Built with one of the notification
/// builders, which pick the audience and seed the content.
#[derive(Serialize, Debug, Clone)]
pub struct Notification<'a> {
    /// The identifier assigned by the service. Never part of the request
    /// body; copy it from
    /// [`CallResult::notification_id`](crate::CallResult::notification_id)
    /// after a successful send to cancel or inspect the notification
    /// through this value later.
    #[serde(skip_serializing)]
    pub id: Option<String>,

    /// Who receives the notification.
    #[serde(flatten)]
    pub target: Target<'a>,

    /// What is delivered, and how.
    #[serde(flatten)]
    pub content: Content<'a>,

    /// Application-specific key-value payload, sent as the `data` field.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<&'a str, Value>,
}

impl<'a> Notification<'a> {
    /// Application-specific custom data to be delivered with the
    /// notification. The `key` defines the entry in the `data` object and
    /// `value` can be any `Serialize`, which allows using any Rust
    /// collection or a struct with `#[derive(Serialize)]` from
    /// [Serde](https://serde.rs).
    ///
    /// ```rust
    /// # use os1::{SegmentNotificationBuilder, NotificationBuilder, NotificationLike};
    /// # use std::collections::HashMap;
    /// # fn main() -> Result<(), os1::Error> {
    /// let mut notification = SegmentNotificationBuilder::new("Hello", &["All"]).build();
    /// let mut order = HashMap::new();
    ///
    /// order.insert("order_id", "123");
    /// notification.add_custom_data("order", &order)?;
    ///
    /// let data = notification.get_data()?;
    /// assert_eq!("123", data["data"]["order"]["order_id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_custom_data(&mut self, key: &'a str, value: &dyn ErasedSerialize) -> Result<&mut Self, Error> {
        self.data.insert(key, serde_json::to_value(value)?);

        Ok(self)
    }
}

impl NotificationLike for Notification<'_> {
    fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
