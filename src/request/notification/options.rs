use serde::{Serialize, Serializer};
use std::fmt;

/// The importance how fast to bring the notification for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Deliver immediately, waking a sleeping device and opening its
    /// network connection.
    High,

    /// Deliver at a time that takes the device's power situation into
    /// account. Notifications with this priority might be grouped and
    /// delivered in bursts.
    Normal,
}

impl Priority {
    fn as_number(&self) -> u8 {
        match self {
            Priority::High => 10,
            Priority::Normal => 5,
        }
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_number())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

/// How the service staggers a scheduled delivery across users.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DelayedOption {
    /// Deliver at the same local time of day in every user's timezone.
    Timezone,

    /// Deliver at the same time of day the user last opened the app.
    LastActive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_serializes_to_numbers() {
        assert_eq!(json!(10), serde_json::to_value(Priority::High).unwrap());
        assert_eq!(json!(5), serde_json::to_value(Priority::Normal).unwrap());
    }

    #[test]
    fn test_priority_display() {
        assert_eq!("10", Priority::High.to_string());
        assert_eq!("5", Priority::Normal.to_string());
    }

    #[test]
    fn test_delayed_option_wire_tokens() {
        assert_eq!(json!("timezone"), serde_json::to_value(DelayedOption::Timezone).unwrap());
        assert_eq!(json!("last-active"), serde_json::to_value(DelayedOption::LastActive).unwrap());
    }
}
