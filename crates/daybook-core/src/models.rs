//! Data models for Daybook
//!
//! Defines the journal entry record, the closed mood set, and the
//! validated draft that create/update operations accept.

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ValidationError;

/// A stored journal entry
///
/// Constructed once at the store boundary; `id` and `created_at` are
/// assigned by the store and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// Entry title, never blank
    pub title: String,
    /// Mood tag from the closed set
    pub mood: Mood,
    /// Free-text body; embedded newlines are paragraph boundaries
    pub content: String,
    /// When this entry was created (UTC)
    pub created_at: DateTime<Utc>,
}

/// The closed set of mood tags
///
/// Parsing is ASCII-case-insensitive ("happy" and "Happy" both work);
/// the capitalized variant name is the canonical stored and displayed
/// form. Anything else fails to parse, so an invalid mood cannot reach
/// the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mood {
    Happy,
    Sad,
    Neutral,
    Excited,
    Angry,
}

impl Mood {
    /// The full closed set in canonical order, for option listings
    pub fn options() -> [Mood; 5] {
        [
            Mood::Happy,
            Mood::Sad,
            Mood::Neutral,
            Mood::Excited,
            Mood::Angry,
        ]
    }
}

impl ToSql for Mood {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Mood {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: strum::ParseError| FromSqlError::Other(Box::new(e)))
    }
}

/// Validated input for creating or updating an entry
///
/// Title and content are trimmed; blank values are rejected here so
/// every draft the store sees already satisfies the entry invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    title: String,
    mood: Mood,
    content: String,
}

impl EntryDraft {
    /// Validate raw field values into a draft
    pub fn new(
        title: impl Into<String>,
        mood: Mood,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let content = content.into().trim().to_string();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        Ok(Self {
            title,
            mood,
            content,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
