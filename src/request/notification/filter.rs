use crate::request::notification::{DelayedOption, NotificationBuilder, Priority};
use crate::request::payload::{Content, Notification, Target};

use std::collections::BTreeMap;

/// How a filter condition compares the field against the value.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "exists")]
    Exists,
    #[serde(rename = "not_exists")]
    NotExists,
}

/// One entry of a filter expression. Consecutive conditions combine with
/// an implicit AND; insert [`Filter::or`] between them to combine with OR
/// instead.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum Filter<'a> {
    Condition {
        field: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<&'a str>,
        relation: Relation,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hours_ago: Option<&'a str>,
    },
    Operator { operator: &'static str },
}

impl<'a> Filter<'a> {
    /// A condition on a user field, e.g. `language`, `country` or
    /// `session_count`.
    pub fn field(field: &'a str, relation: Relation, value: &'a str) -> Filter<'a> {
        Filter::Condition {
            field,
            key: None,
            relation,
            value: Some(value),
            hours_ago: None,
        }
    }

    /// A condition on a data tag set for the user.
    pub fn tag(key: &'a str, relation: Relation, value: &'a str) -> Filter<'a> {
        Filter::Condition {
            field: "tag",
            key: Some(key),
            relation,
            value: Some(value),
            hours_ago: None,
        }
    }

    /// A condition on the hours since the user's last session.
    pub fn last_session(relation: Relation, hours_ago: &'a str) -> Filter<'a> {
        Filter::Condition {
            field: "last_session",
            key: None,
            relation,
            value: None,
            hours_ago: Some(hours_ago),
        }
    }

    /// Combines the surrounding conditions with OR instead of the
    /// implicit AND.
    pub fn or() -> Filter<'static> {
        Filter::Operator { operator: "OR" }
    }
}

/// A builder for a notification delivered to users matching a filter
/// expression.
///
/// # Example
///
/// ```rust
/// # use os1::{Filter, FilterNotificationBuilder, NotificationBuilder, NotificationLike, Relation};
/// # fn main() -> Result<(), os1::Error> {
/// let notification = FilterNotificationBuilder::new(
///     "Long time no see!",
///     vec![
///         Filter::tag("level", Relation::GreaterThan, "10"),
///         Filter::or(),
///         Filter::last_session(Relation::GreaterThan, "48"),
///     ],
/// )
/// .build();
///
/// let data = notification.get_data()?;
/// assert_eq!("tag", data["filters"][0]["field"]);
/// assert_eq!("OR", data["filters"][1]["operator"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FilterNotificationBuilder<'a> {
    filters: Vec<Filter<'a>>,
    content: Content<'a>,
}

impl<'a> FilterNotificationBuilder<'a> {
    /// Creates a builder with an English message for users matching the
    /// given filters.
    pub fn new(message: &'a str, filters: Vec<Filter<'a>>) -> FilterNotificationBuilder<'a> {
        let mut contents = BTreeMap::new();
        contents.insert("en", message);

        FilterNotificationBuilder {
            filters,
            content: Content {
                contents,
                ..Default::default()
            },
        }
    }

    /// Appends one more filter entry.
    pub fn add_filter(mut self, filter: Filter<'a>) -> Self {
        self.filters.push(filter);
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

impl<'a> NotificationBuilder<'a> for FilterNotificationBuilder<'a> {
    fn build(self) -> Notification<'a> {
        Notification {
            id: None,
            target: Target::Filters { filters: self.filters },
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
    fn test_tag_filter_serialization() {
        let filter = Filter::tag("level", Relation::GreaterThan, "10");

        assert_eq!(
            json!({ "field": "tag", "key": "level", "relation": ">", "value": "10" }),
            serde_json::to_value(filter).unwrap()
        );
    }

    #[test]
    fn test_field_filter_serialization() {
        let filter = Filter::field("language", Relation::Equals, "en");

        assert_eq!(
            json!({ "field": "language", "relation": "=", "value": "en" }),
            serde_json::to_value(filter).unwrap()
        );
    }

    #[test]
    fn test_last_session_filter_serialization() {
        let filter = Filter::last_session(Relation::GreaterThan, "1.2");

        assert_eq!(
            json!({ "field": "last_session", "relation": ">", "hours_ago": "1.2" }),
            serde_json::to_value(filter).unwrap()
        );
    }

    #[test]
    fn test_or_operator_serialization() {
        assert_eq!(json!({ "operator": "OR" }), serde_json::to_value(Filter::or()).unwrap());
    }

    #[test]
    fn test_relation_tokens() {
        assert_eq!(json!(">"), serde_json::to_value(Relation::GreaterThan).unwrap());
        assert_eq!(json!("!="), serde_json::to_value(Relation::NotEquals).unwrap());
        assert_eq!(json!("not_exists"), serde_json::to_value(Relation::NotExists).unwrap());
    }

    #[test]
    fn test_filter_notification_body() {
        let notification = FilterNotificationBuilder::new(
            "Hello",
            vec![Filter::tag("vip", Relation::Exists, "true")],
        )
        .add_filter(Filter::field("country", Relation::Equals, "FI"))
        .build();

        assert_eq!(
            json!({
                "contents": { "en": "Hello" },
                "filters": [
                    { "field": "tag", "key": "vip", "relation": "exists", "value": "true" },
                    { "field": "country", "relation": "=", "value": "FI" },
                ],
            }),
            serde_json::to_value(&notification).unwrap()
        );
    }
}
