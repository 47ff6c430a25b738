use crate::request::notification::{DelayedOption, NotificationBuilder, Priority};
use crate::request::payload::{Content, Notification, Target};

use std::collections::BTreeMap;

/// A builder for a notification delivered to subscriber segments, such as
/// `Subscribed Users` or segments created in the OneSignal dashboard.
///
/// # Example
///
/// ```rust
/// # use os1::{SegmentNotificationBuilder, NotificationBuilder, NotificationLike};
/// # fn main() -> Result<(), os1::Error> {
/// let notification = SegmentNotificationBuilder::new("Back in stock!", &["Active Users"])
///     .set_excluded_segments(&["Banned Users"])
///     .set_heading("en", "Store news")
///     .set_url("https://example.com/store")
///     .build();
///
/// let data = notification.get_data()?;
/// assert_eq!("Back in stock!", data["contents"]["en"]);
/// assert_eq!("Active Users", data["included_segments"][0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SegmentNotificationBuilder<'a> {
    included_segments: Vec<&'a str>,
    excluded_segments: Vec<&'a str>,
    content: Content<'a>,
}

impl<'a> SegmentNotificationBuilder<'a> {
    /// Creates a builder with an English message for the given segments.
    pub fn new(message: &'a str, included_segments: &[&'a str]) -> SegmentNotificationBuilder<'a> {
        let mut contents = BTreeMap::new();
        contents.insert("en", message);

        SegmentNotificationBuilder {
            included_segments: included_segments.to_vec(),
            excluded_segments: Vec::new(),
            content: Content {
                contents,
                ..Default::default()
            },
        }
    }

    /// Segments to leave out even when they match an included segment.
    pub fn set_excluded_segments(mut self, segments: &[&'a str]) -> Self {
        self.excluded_segments = segments.to_vec();
        self
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

impl<'a> NotificationBuilder<'a> for SegmentNotificationBuilder<'a> {
    fn build(self) -> Notification<'a> {
        Notification {
            id: None,
            target: Target::Segments {
                included_segments: self.included_segments,
                excluded_segments: self.excluded_segments,
            },
            content: self.content,
            data: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::payload::NotificationLike;
    use serde_json::json;

    #[test]
    fn test_minimal_segment_notification() {
        let notification = SegmentNotificationBuilder::new("Hello", &["All"]).build();

        assert_eq!(
            json!({
                "contents": { "en": "Hello" },
                "included_segments": ["All"],
            }),
            serde_json::to_value(&notification).unwrap()
        );
    }

    #[test]
    fn test_excluded_segments() {
        let notification = SegmentNotificationBuilder::new("Hello", &["Active Users"])
            .set_excluded_segments(&["Inactive Users"])
            .build();

        let data = notification.get_data().unwrap();
        assert_eq!(json!(["Active Users"]), data["included_segments"]);
        assert_eq!(json!(["Inactive Users"]), data["excluded_segments"]);
    }

    #[test]
    fn test_localized_content_and_headings() {
        let notification = SegmentNotificationBuilder::new("Hello", &["All"])
            .set_content("fi", "Moi")
            .set_heading("en", "Greetings")
            .set_subtitle("en", "from the store")
            .build();

        let data = notification.get_data().unwrap();
        assert_eq!(json!({ "en": "Hello", "fi": "Moi" }), data["contents"]);
        assert_eq!(json!({ "en": "Greetings" }), data["headings"]);
        assert_eq!(json!({ "en": "from the store" }), data["subtitle"]);
    }

    #[test]
    fn test_delivery_fields() {
        let notification = SegmentNotificationBuilder::new("Hello", &["All"])
            .set_send_after("2026-09-24 14:00:00 GMT-0700")
            .set_delayed_option(DelayedOption::Timezone)
            .set_delivery_time_of_day("9:00AM")
            .set_ttl(259200)
            .set_priority(Priority::High)
            .build();

        let data = notification.get_data().unwrap();
        assert_eq!(json!("2026-09-24 14:00:00 GMT-0700"), data["send_after"]);
        assert_eq!(json!("timezone"), data["delayed_option"]);
        assert_eq!(json!("9:00AM"), data["delivery_time_of_day"]);
        assert_eq!(json!(259200), data["ttl"]);
        assert_eq!(json!(10), data["priority"]);
    }

    #[test]
    fn test_display_fields() {
        let notification = SegmentNotificationBuilder::new("Hello", &["All"])
            .set_url("https://example.com")
            .set_small_icon("ic_stat_onesignal_default")
            .set_big_picture("https://example.com/hero.png")
            .set_content_available()
            .set_mutable_content()
            .build();

        let data = notification.get_data().unwrap();
        assert_eq!(json!("https://example.com"), data["url"]);
        assert_eq!(json!("ic_stat_onesignal_default"), data["small_icon"]);
        assert_eq!(json!("https://example.com/hero.png"), data["big_picture"]);
        assert_eq!(json!(true), data["content_available"]);
        assert_eq!(json!(true), data["mutable_content"]);
    }
}
