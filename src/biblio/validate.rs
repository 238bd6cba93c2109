//! Field rules for book records.

use crate::error::ValidationError;
use crate::model::{BookFields, Status};

/// Checks `candidate` against the record field rules.
///
/// With `partial == false` all four fields must be present. Present text
/// fields must be non-blank and a present status must name one of the
/// allowed values. The first violation wins.
pub fn validate(candidate: &BookFields, partial: bool) -> Result<(), ValidationError> {
    if !partial {
        let missing: Vec<&'static str> = [
            ("titulo", candidate.title.is_none()),
            ("autor", candidate.author.is_none()),
            ("genero", candidate.genre.is_none()),
            ("estado", candidate.status.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
    }

    for (name, value) in [
        ("titulo", &candidate.title),
        ("autor", &candidate.author),
        ("genero", &candidate.genre),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(name));
            }
        }
    }

    if let Some(status) = &candidate.status {
        if status.parse::<Status>().is_err() {
            return Err(ValidationError::InvalidStatus);
        }
    }

    Ok(())
}
