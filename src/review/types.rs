//! Customer review feed schema.
//!
//! The feed wraps every leaf value in a `{"label": ...}` object, so the
//! schema mirrors that nesting instead of flattening it.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer};

/// A `{"label": value}` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label<T> {
    /// Wrapped value.
    pub label: T,
}

impl<T> Label<T> {
    /// Wrap a value.
    pub fn new(label: T) -> Self {
        Self { label }
    }
}

/// Top-level feed document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    /// The feed body.
    pub feed: Feed,
}

/// Feed body holding the review entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feed {
    /// Review entries, most recent first.
    ///
    /// Absent when the app has no reviews; a bare object when it has one.
    #[serde(default, deserialize_with = "one_or_many")]
    pub entry: Vec<ReviewEntry>,
}

/// Review author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: Label<String>,
    /// Profile URI.
    #[serde(default)]
    pub uri: Option<Label<String>>,
}

/// One customer review.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewEntry {
    /// Review author.
    pub author: Author,
    /// Last update time.
    pub updated: Label<DateTime<FixedOffset>>,
    /// Star rating as the feed supplies it (a decimal string).
    #[serde(rename = "im:rating")]
    pub rating: Label<String>,
    /// Review title.
    pub title: Label<String>,
    /// Review body.
    pub content: Label<String>,
}

impl ReviewEntry {
    /// Build an entry from plain values.
    pub fn new(
        author_name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        rating: impl Into<String>,
        updated: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            author: Author {
                name: Label::new(author_name.into()),
                uri: None,
            },
            updated: Label::new(updated),
            rating: Label::new(rating.into()),
            title: Label::new(title.into()),
            content: Label::new(content.into()),
        }
    }

    /// Author display name.
    pub fn author_name(&self) -> &str {
        &self.author.name.label
    }

    /// Author profile URI, if the feed supplied one.
    pub fn author_uri(&self) -> Option<&str> {
        self.author.uri.as_ref().map(|u| u.label.as_str())
    }

    pub fn title(&self) -> &str {
        &self.title.label
    }

    pub fn content(&self) -> &str {
        &self.content.label
    }

    /// Raw rating label.
    pub fn rating_label(&self) -> &str {
        &self.rating.label
    }

    /// Last update time normalized to UTC.
    pub fn updated_utc(&self) -> DateTime<Utc> {
        self.updated.label.with_timezone(&Utc)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}
