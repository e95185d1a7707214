//! Subject: the tracked entity (an athlete) that season stat rows hang off.
//!
//! A subject is created once, the first time its identifier is seen, and is
//! never updated or deleted by the loader.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Storage limit on `subjects.subject_id`.
pub const MAX_SUBJECT_ID_LEN: usize = 50;

/// A validated subject identifier: non-empty, at most
/// [`MAX_SUBJECT_ID_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
  pub fn new(id: impl Into<String>) -> Result<Self> {
    let id = id.into();
    let len = id.chars().count();
    if len == 0 {
      return Err(Error::EmptySubjectId);
    }
    if len > MAX_SUBJECT_ID_LEN {
      return Err(Error::SubjectIdTooLong { id, len });
    }
    Ok(Self(id))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for SubjectId {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::new(value) }
}

impl From<SubjectId> for String {
  fn from(id: SubjectId) -> Self { id.0 }
}

impl fmt::Display for SubjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// A persisted subject row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
  pub subject_id:       SubjectId,
  pub display_name:     String,
  pub primary_position: Option<String>,
  pub debut_year:       Option<i32>,
}

/// Input for [`StatStore::insert_subject_if_absent`](crate::store::StatStore::insert_subject_if_absent).
///
/// Position and debut year are left for later enrichment, so the loader only
/// ever supplies a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
  pub subject_id:   SubjectId,
  pub display_name: String,
}
