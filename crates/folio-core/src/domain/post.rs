use chrono::{DateTime, TimeDelta, Utc};

/// Post identifier, assigned by the store on insert.
pub type PostId = i32;

/// Post entity - a blog post with its publication timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub publish_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Apply a partial update in place. Fields absent from `changes` keep
    /// their value; `updated_at` always moves forward.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.updated_at = next_timestamp(self.updated_at, now);
    }
}

/// Timestamps never go backwards, even if the clock does.
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    /// Defaults to the creation time when `None`.
    pub publish_date: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            publish_date: None,
        }
    }

    /// Backdate (or schedule) the publication date.
    pub fn published_at(mut self, publish_date: DateTime<Utc>) -> Self {
        self.publish_date = Some(publish_date);
        self
    }
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// True when the update only refreshes `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let created = Utc::now();
        Post {
            id: 1,
            title: "Original title".to_string(),
            content: "Original content".to_string(),
            publish_date: created,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_apply_keeps_unspecified_fields() {
        let mut post = sample_post();
        let changes = PostChanges {
            title: Some("New title".to_string()),
            content: None,
        };

        post.apply(changes, Utc::now());

        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "Original content");
    }

    #[test]
    fn test_apply_empty_changes_still_refreshes_updated_at() {
        let mut post = sample_post();
        let created_at = post.created_at;
        let changes = PostChanges::default();
        assert!(changes.is_empty());

        post.apply(changes, created_at);

        assert_eq!(post.created_at, created_at);
        assert!(post.updated_at > created_at);
    }

    #[test]
    fn test_apply_never_moves_updated_at_backwards() {
        let mut post = sample_post();
        let before = post.updated_at;

        post.apply(PostChanges::default(), before - TimeDelta::seconds(30));

        assert!(post.updated_at > before);
    }

    #[test]
    fn test_new_post_publish_date() {
        let date = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let post = NewPost::new("Title", "Body").published_at(date);
        assert_eq!(post.publish_date, Some(date));
        assert_eq!(NewPost::new("Title", "Body").publish_date, None);
    }
}
