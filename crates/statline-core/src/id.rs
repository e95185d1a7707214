//! Synthetic subject identifiers.
//!
//! Source files carry no canonical player id, so one is derived from the
//! display name plus whichever disambiguators (age, team, season) are known,
//! e.g. `"Mike Trout", 28, "Angels", 2023` → `mike_trout_28_angels_2023`.
//!
//! Two inputs that agree on their first [`MAX_SUBJECT_ID_LEN`] characters
//! collide. That is accepted.

use crate::{
  field::MISSING_TEXT,
  subject::{MAX_SUBJECT_ID_LEN, SubjectId},
};

/// Derive the identifier for a subject. Returns `None` when `name` has no
/// usable characters.
pub fn generate_id(
  name: &str,
  age: Option<i64>,
  team: Option<&str>,
  season: Option<i32>,
) -> Option<SubjectId> {
  let slug = name_slug(name)?;

  let mut parts = vec![slug];
  if let Some(age) = age {
    parts.push(age.to_string());
  }
  if let Some(team) = team {
    let team = team.trim();
    if !team.is_empty() && team != MISSING_TEXT {
      parts.push(team.to_lowercase().replace(' ', "_"));
    }
  }
  if let Some(season) = season {
    parts.push(season.to_string());
  }

  let full: String = parts.join("_").chars().take(MAX_SUBJECT_ID_LEN).collect();
  SubjectId::new(full).ok()
}

/// Lowercase, strip, drop everything but `[a-z0-9]` and whitespace, then
/// turn each whitespace run into one underscore.
fn name_slug(name: &str) -> Option<String> {
  let lowered = name.trim().to_lowercase();

  let mut slug = String::with_capacity(lowered.len());
  let mut in_space = false;
  for c in lowered.chars() {
    if c.is_whitespace() {
      if !in_space {
        slug.push('_');
        in_space = true;
      }
    } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
      slug.push(c);
      in_space = false;
    }
  }

  if slug.chars().all(|c| c == '_') { None } else { Some(slug) }
}
