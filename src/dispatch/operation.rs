//! Backend operation identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of backend capabilities.
///
/// An identifier outside this set cannot be constructed in code; the only
/// way to name an operation at runtime is [`FromStr`], which fails with
/// [`OperationParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationId {
    #[serde(rename = "send-notification")]
    SendNotification,
    #[serde(rename = "verify-otp")]
    VerifyOtp,
    #[serde(rename = "create-notification-v2")]
    CreateNotificationV2,
    #[serde(rename = "read-feed")]
    ReadFeed,
    #[serde(rename = "update-feed")]
    UpdateFeed,
}

impl OperationId {
    pub const ALL: [OperationId; 5] = [
        OperationId::SendNotification,
        OperationId::VerifyOtp,
        OperationId::CreateNotificationV2,
        OperationId::ReadFeed,
        OperationId::UpdateFeed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationId::SendNotification => "send-notification",
            OperationId::VerifyOtp => "verify-otp",
            OperationId::CreateNotificationV2 => "create-notification-v2",
            OperationId::ReadFeed => "read-feed",
            OperationId::UpdateFeed => "update-feed",
        }
    }

    /// API identifier reported in response bodies.
    pub fn api_id(self) -> &'static str {
        match self {
            OperationId::SendNotification => "api.notification.send",
            OperationId::VerifyOtp => "api.otp.verify",
            OperationId::CreateNotificationV2 => "api.notification.v2.send",
            OperationId::ReadFeed => "api.notification.feed.read",
            OperationId::UpdateFeed => "api.notification.feed.update",
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation `{0}`")]
pub struct OperationParseError(pub String);

impl FromStr for OperationId {
    type Err = OperationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationId::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| OperationParseError(s.to_string()))
    }
}
