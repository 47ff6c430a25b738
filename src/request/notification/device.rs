use crate::request::notification::{DelayedOption, NotificationBuilder, Priority};
use crate::request::payload::{Content, Notification, Target};

use std::collections::BTreeMap;

/// A builder for a notification delivered to specific devices by their
/// OneSignal player ids.
///
/// # Example
///
/// ```rust
/// # use os1::{DeviceNotificationBuilder, NotificationBuilder, NotificationLike};
/// # fn main() -> Result<(), os1::Error> {
/// let notification =
///     DeviceNotificationBuilder::new("Your order shipped", &["1dd608f2-c6a1-11e3-851d-000c2940e62c"])
///         .set_ttl(3600)
///         .build();
///
/// let data = notification.get_data()?;
/// assert_eq!("1dd608f2-c6a1-11e3-851d-000c2940e62c", data["include_player_ids"][0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceNotificationBuilder<'a> {
    include_player_ids: Vec<&'a str>,
    content: Content<'a>,
}

impl<'a> DeviceNotificationBuilder<'a> {
    /// Creates a builder with an English message for the given devices.
    pub fn new(message: &'a str, player_ids: &[&'a str]) -> DeviceNotificationBuilder<'a> {
        let mut contents = BTreeMap::new();
        contents.insert("en", message);

        DeviceNotificationBuilder {
            include_player_ids: player_ids.to_vec(),
            content: Content {
                contents,
                ..Default::default()
            },
        }
    }

    /// Adds or replaces the message for a language.
    pub fn set_content(mut self, language: &'a str, message: &'a str) -> Self {
        self.content.contents.insert(language, message);
        self
    }

    /// The notification title for a language.
    pub fn set_heading(mut self, language: &'a str, heading: &'a str) -> Self {
        self.content.headings.insert(language, heading);
        self
    }

    /// The notification subtitle for a language, shown on iOS.
    pub fn set_subtitle(mut self, language: &'a str, subtitle: &'a str) -> Self {
        self.content.subtitle.insert(language, subtitle);
        self
    }

    /// Use a template created in the OneSignal dashboard.
    pub fn set_template_id(mut self, template_id: &'a str) -> Self {
        self.content.template_id = Some(template_id);
        self
    }

    /// The URL to open when the notification is tapped.
    pub fn set_url(mut self, url: &'a str) -> Self {
        self.content.url = Some(url);
        self
    }

    /// Wake the receiving app without displaying anything.
    pub fn set_content_available(mut self) -> Self {
        self.content.content_available = Some(true);
        self
    }

    /// Allow the receiving app to modify the content before display.
    pub fn set_mutable_content(mut self) -> Self {
        self.content.mutable_content = Some(true);
        self
    }

    /// Android small icon resource name.
    pub fn set_small_icon(mut self, icon: &'a str) -> Self {
        self.content.small_icon = Some(icon);
        self
    }

    /// Android big picture URL.
    pub fn set_big_picture(mut self, url: &'a str) -> Self {
        self.content.big_picture = Some(url);
        self
    }

    /// Schedule the delivery, e.g. `2026-09-24 14:00:00 GMT-0700`.
    pub fn set_send_after(mut self, send_after: &'a str) -> Self {
        self.content.send_after = Some(send_after);
        self
    }

    /// Stagger a scheduled delivery per user.
    pub fn set_delayed_option(mut self, option: DelayedOption) -> Self {
        self.content.delayed_option = Some(option);
        self
    }

    /// Local time of day for timezone-staggered deliveries, e.g. `9:00AM`.
    pub fn set_delivery_time_of_day(mut self, time: &'a str) -> Self {
        self.content.delivery_time_of_day = Some(time);
        self
    }

    /// Seconds the notification stays valid for offline devices.
    pub fn set_ttl(mut self, ttl: u32) -> Self {
        self.content.ttl = Some(ttl);
        self
    }

    /// Android delivery priority.
    pub fn set_priority(mut self, priority: Priority) -> Self {
        self.content.priority = Some(priority);
        self
    }
}

impl<'a> NotificationBuilder<'a> for DeviceNotificationBuilder<'a> {
    fn build(self) -> Notification<'a> {
        Notification {
            id: None,
            target: Target::Devices {
                include_player_ids: self.include_player_ids,
            },
            content: self.content,
            data: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_device_notification() {
        let notification = DeviceNotificationBuilder::new("Hello", &["player-1", "player-2"]).build();

        assert_eq!(
            json!({
                "contents": { "en": "Hello" },
                "include_player_ids": ["player-1", "player-2"],
            }),
            serde_json::to_value(&notification).unwrap()
        );
    }

    #[test]
    fn test_silent_device_notification() {
        let notification = DeviceNotificationBuilder::new("Hello", &["player-1"])
            .set_content_available()
            .set_priority(Priority::Normal)
            .build();

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(json!(true), value["content_available"]);
        assert_eq!(json!(5), value["priority"]);
    }
}
