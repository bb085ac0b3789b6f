use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Delivery channel used for the one-time-password login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "sms" => Ok(Channel::Sms),
            other => Err(format!("Channel must be 'email' or 'sms', got '{}'", other)),
        }
    }
}

/// The authenticated session identity.
///
/// Persisted as JSON under the `user` storage key; optional fields are
/// omitted when absent so the record reads the same as the web client's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    pub channel: Channel,
    /// Email address or phone number
    pub contact: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    pub fn new(channel: Channel, contact: impl Into<String>) -> Self {
        Self {
            channel,
            contact: contact.into(),
            display_name: None,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name to show in a UI: the display name if set, otherwise the contact.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.contact)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case_and_skips_absent_fields() {
        let user = User::new(Channel::Email, "ada@example.com");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"channel":"email","contact":"ada@example.com"}"#);

        let user = user.with_display_name("Ada").with_token("t-1");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["displayName"], "Ada");
        assert_eq!(value["token"], "t-1");
    }

    #[test]
    fn test_user_deserializes_web_client_record() {
        let raw = r#"{"channel":"sms","contact":"+15550100","displayName":"Bob","token":"abc"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.channel, Channel::Sms);
        assert_eq!(user.contact, "+15550100");
        assert_eq!(user.display_name.as_deref(), Some("Bob"));
        assert_eq!(user.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_user_missing_contact_is_rejected() {
        assert!(serde_json::from_str::<User>(r#"{"channel":"email"}"#).is_err());
        assert!(serde_json::from_str::<User>(r#"{"email":"ada@example.com"}"#).is_err());
    }

    #[test]
    fn test_channel_from_str() {
        assert_eq!("email".parse::<Channel>(), Ok(Channel::Email));
        assert_eq!("SMS".parse::<Channel>(), Ok(Channel::Sms));
        assert!("fax".parse::<Channel>().is_err());
    }

    #[test]
    fn test_user_label_prefers_display_name() {
        let user = User::new(Channel::Email, "ada@example.com");
        assert_eq!(user.label(), "ada@example.com");
        assert_eq!(user.with_display_name("Ada").label(), "Ada");
    }
}
