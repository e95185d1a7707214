//! Error types for `statline-core`.

use thiserror::Error;

use crate::subject::MAX_SUBJECT_ID_LEN;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subject id must not be empty")]
  EmptySubjectId,

  #[error("subject id {id:?} is {len} characters; the limit is {MAX_SUBJECT_ID_LEN}")]
  SubjectIdTooLong { id: String, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
