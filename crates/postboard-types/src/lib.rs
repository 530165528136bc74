//! Shared data model for postboard.
//!
//! These types mirror what the backend returns over the wire. The UI consumes
//! them read-only: posts are never edited or deleted client-side.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Avatar shown for authors without an image.
pub const AVATAR_PLACEHOLDER_URL: &str = "https://www.w3schools.com/howto/img_avatar.png";

/// Short US date ("3/5/2024"). Also the fallback for unparsable formats.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Formats `date` with a strftime string, falling back to
/// [`DEFAULT_DATE_FORMAT`] if `date_format` does not parse.
pub fn format_date<Tz>(date: &DateTime<Tz>, date_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let valid = !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error));
    let format = if valid {
        date_format
    } else {
        DEFAULT_DATE_FORMAT
    };
    date.format(format).to_string()
}

/// Author sub-record attached to every post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    /// Avatar image URL. `None` when the provider supplied no picture.
    #[serde(default)]
    pub image: Option<String>,
}

impl Author {
    /// The image URL, or the placeholder when none is set. A present image is
    /// used verbatim, even when empty.
    pub fn avatar_src(&self) -> &str {
        self.image.as_deref().unwrap_or(AVATAR_PLACEHOLDER_URL)
    }
}

/// A post as returned by the list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}

impl Post {
    /// Creation date in the viewer's local time zone.
    pub fn created_local(&self, date_format: &str) -> String {
        format_date(&self.created_at.with_timezone(&Local), date_format)
    }
}

/// Input of the create mutation. Sent exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub body: String,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// An authenticated session. Absence of a session means anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session for a user with the given display name.
    pub fn for_user(name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            user: SessionUser {
                name: Some(name.into()),
                image,
            },
            expires: None,
        }
    }

    /// Display name, or a generic label when the provider gave none.
    pub fn display_name(&self) -> &str {
        self.user.name.as_deref().unwrap_or("signed-in user")
    }
}

/// Identifies a cached query for invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKey {
    Posts,
    Session,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Posts => f.write_str("post.getAll"),
            QueryKey::Session => f.write_str("auth.getSession"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_camel_case_with_null_image() {
        let json = r#"{
            "id": "clx1",
            "title": "Hello",
            "body": "World",
            "createdAt": "2024-03-05T10:00:00Z",
            "author": { "name": "Ada", "image": null }
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "clx1");
        assert_eq!(post.author.name, "Ada");
        assert_eq!(post.author.image, None);
        assert_eq!(post.created_at.to_rfc3339(), "2024-03-05T10:00:00+00:00");
    }

    #[test]
    fn test_author_image_may_be_missing() {
        let author: Author = serde_json::from_str(r#"{"name":"Bob"}"#).unwrap();
        assert_eq!(author.image, None);
    }

    #[test]
    fn test_session_without_expiry() {
        let session: Session =
            serde_json::from_str(r#"{"user":{"name":"Ada","image":"https://x/a.png"}}"#).unwrap();
        assert_eq!(session.display_name(), "Ada");
        assert_eq!(session.expires, None);
        assert_eq!(session.user.image.as_deref(), Some("https://x/a.png"));
    }

    #[test]
    fn test_format_date_default_is_us_short_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(format_date(&date, DEFAULT_DATE_FORMAT), "3/5/2024");
        assert_eq!(format_date(&date, "%Y-%m-%d"), "2024-03-05");
    }

    #[test]
    fn test_format_date_invalid_format_falls_back() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(format_date(&date, "%Q broken"), "3/5/2024");
        assert_eq!(format_date(&date, "%Q"), "3/5/2024");
    }

    #[test]
    fn test_query_key_display_uses_procedure_names() {
        assert_eq!(QueryKey::Posts.to_string(), "post.getAll");
        assert_eq!(QueryKey::Session.to_string(), "auth.getSession");
    }
}
