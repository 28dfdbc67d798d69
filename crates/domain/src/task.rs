use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::errors::{DomainError, DomainResult};

/// Minimum title length, counted in Unicode scalar values.
pub const MIN_TITLE_CHARS: usize = 3;

/// Identifier for a task (ULID, 26-character Crockford base32).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Parses a path segment into an id, normalizing to the canonical
    /// uppercase ULID form.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let ulid = Ulid::from_string(raw)
            .map_err(|_| DomainError::InvalidTaskId(raw.to_string()))?;
        Ok(Self(ulid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored task as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.is_empty() {
        return Err(DomainError::MissingTitle);
    }
    if title.chars().count() < MIN_TITLE_CHARS {
        return Err(DomainError::TitleTooShort);
    }
    Ok(())
}

/// A validated request to create a task. Construction is the only way
/// to obtain one, so a `NewTask` always carries an acceptable title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
}

impl NewTask {
    pub fn new(title: Option<String>) -> DomainResult<Self> {
        let title = title.ok_or(DomainError::MissingTitle)?;
        validate_title(&title)?;
        Ok(Self { title })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_title(self) -> String {
        self.title
    }
}

/// A validated partial update. At least one field is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    title: Option<String>,
    completed: Option<bool>,
}

impl TaskUpdate {
    pub fn new(title: Option<String>, completed: Option<bool>) -> DomainResult<Self> {
        if title.is_none() && completed.is_none() {
            return Err(DomainError::EmptyUpdate);
        }
        if let Some(title) = &title {
            validate_title(title)?;
        }
        Ok(Self { title, completed })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn completed(&self) -> Option<bool> {
        self.completed
    }
}
