//! Draft validation.
//!
//! Rules are checked in order and the first failure is reported:
//! 1. `name`, `author`, `genre`, `description` are non-empty once trimmed
//! 2. `rating` parses to a finite number within `MIN_RATING..=MAX_RATING`;
//!    blank rating text is rejected, it never defaults to 0

use super::error::DraftError;
use super::models::{BookDraft, ValidDraft, MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, DraftError>;

impl BookDraft {
    /// Parse and validate the draft without touching any store.
    pub fn validate(&self) -> ValidationResult<ValidDraft> {
        let name = required("name", &self.name)?;
        let author = required("author", &self.author)?;
        let genre = required("genre", &self.genre)?;
        let description = required("description", &self.description)?;
        let rating = parse_rating(&self.rating)?;

        Ok(ValidDraft {
            name,
            author,
            genre,
            rating,
            description,
        })
    }
}

fn required(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DraftError::Required { field });
    }
    Ok(value.to_string())
}

/// Parse rating text. Blank text is not a number.
pub fn parse_rating(raw: &str) -> ValidationResult<f64> {
    let text = raw.trim();
    let value = text
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DraftError::InvalidRating {
            value: text.to_string(),
        })?;

    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(DraftError::RatingOutOfRange { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: &str) -> BookDraft {
        BookDraft::new("Clean Code", "Robert C. Martin", "Programming", rating, "Craft.")
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let valid = BookDraft::new("  Dune ", "\tFrank Herbert", " Sci-Fi ", " 4.5 ", " Spice. ")
            .validate()
            .unwrap();
        assert_eq!(valid.name, "Dune");
        assert_eq!(valid.author, "Frank Herbert");
        assert_eq!(valid.genre, "Sci-Fi");
        assert_eq!(valid.description, "Spice.");
        assert_eq!(valid.rating, 4.5);
    }

    #[test]
    fn blank_text_fields_are_required() {
        let mut blank_name = draft("3");
        blank_name.name = "   ".to_string();
        assert_eq!(
            blank_name.validate(),
            Err(DraftError::Required { field: "name" })
        );

        let mut blank_description = draft("3");
        blank_description.description = String::new();
        assert_eq!(blank_description.validate().unwrap_err().field(), "description");
    }

    #[test]
    fn text_fields_are_checked_before_rating() {
        let mut both_bad = draft("abc");
        both_bad.genre = String::new();
        assert_eq!(both_bad.validate(), Err(DraftError::Required { field: "genre" }));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert_eq!(draft("0").validate().unwrap().rating, 0.0);
        assert_eq!(draft("5").validate().unwrap().rating, 5.0);
        assert_eq!(
            draft("-0.01").validate(),
            Err(DraftError::RatingOutOfRange { value: -0.01 })
        );
        assert_eq!(
            draft("5.01").validate(),
            Err(DraftError::RatingOutOfRange { value: 5.01 })
        );
        assert!(draft("7").validate().is_err());
    }

    #[test]
    fn non_numeric_ratings_are_rejected() {
        for raw in ["abc", "", "  ", "NaN", "inf", "4 stars"] {
            let err = draft(raw).validate().unwrap_err();
            assert!(
                matches!(err, DraftError::InvalidRating { .. }),
                "{raw:?} gave {err:?}"
            );
            assert_eq!(err.field(), "rating");
        }
    }
}
