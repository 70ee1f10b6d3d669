pub mod client;
pub mod oauth;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::TwitterError;

pub use client::TwitterClient;

/// The authenticated account, as returned by `account/verify_credentials`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id_str: String,
    pub screen_name: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUser {
    pub screen_name: String,
}

/// A posted tweet, as returned by `statuses/update`.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id_str: String,
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub user: Option<StatusUser>,
}

impl Status {
    pub fn url(&self) -> Option<String> {
        self.user
            .as_ref()
            .map(|user| format!("https://twitter.com/{}/status/{}", user.screen_name, self.id_str))
    }
}

/// v1.1 timestamps look like `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        DateTime::parse_from_str(&value, CREATED_AT_FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

/// Somewhere a message can be posted to.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Confirms the credentials are accepted and returns who they belong to.
    async fn verify_credentials(&self) -> Result<Account, TwitterError>;

    /// Posts `text` once. No retry.
    async fn post_status(&self, text: &str) -> Result<Status, TwitterError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_status_deserializes_and_parses_created_at() {
        let json = r#"{
            "id_str": "1050118621198921728",
            "text": "hello\nworld",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "user": {"screen_name": "idlesbot"}
        }"#;
        let status: Status = serde_json::from_str(json).unwrap();
        let created = status.created_at.unwrap();
        assert_eq!(created.year(), 2018);
        assert_eq!(created.month(), 10);
        assert_eq!(created.hour(), 20);
        assert!(!status.truncated);
        assert_eq!(
            status.url(),
            Some("https://twitter.com/idlesbot/status/1050118621198921728".to_string())
        );
    }

    #[test]
    fn test_status_tolerates_odd_created_at() {
        let json = r#"{"id_str": "1", "text": "x", "created_at": "yesterday"}"#;
        let status: Status = serde_json::from_str(json).unwrap();
        assert!(status.created_at.is_none());
        assert!(status.url().is_none());
    }

    #[test]
    fn test_account_optional_fields() {
        let json = r#"{"id_str": "42", "screen_name": "idlesbot", "name": "Idles Bot"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.screen_name, "idlesbot");
        assert!(account.email.is_none());
    }
}
