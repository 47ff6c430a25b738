//! The notification content builders

mod device;
mod filter;
mod options;
mod segment;

pub use self::device::DeviceNotificationBuilder;
pub use self::filter::{Filter, FilterNotificationBuilder, Relation};
pub use self::options::{DelayedOption, Priority};
pub use self::segment::SegmentNotificationBuilder;

use crate::request::payload::Notification;

pub trait NotificationBuilder<'a> {
    /// Generates the notification to be sent with the `Client`.
    fn build(self) -> Notification<'a>;
}
