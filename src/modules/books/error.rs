use thiserror::Error;

/// Why a [`BookDraft`](super::models::BookDraft) was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("rating '{value}' is not a number")]
    InvalidRating { value: String },

    #[error("rating {value} is outside 0..=5")]
    RatingOutOfRange { value: f64 },
}

impl DraftError {
    /// Name of the draft field the failure is about.
    pub fn field(&self) -> &'static str {
        match self {
            DraftError::Required { field } => field,
            DraftError::InvalidRating { .. } | DraftError::RatingOutOfRange { .. } => "rating",
        }
    }
}

/// Failure of a bulk catalog load. The display text ends up in `loadError`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("failed to fetch books: {0}")]
    Transport(String),

    #[error("failed to fetch books: server responded with status {status}")]
    Status { status: u16 },

    #[error("failed to read books: {0}")]
    Io(String),

    #[error("malformed books payload: {0}")]
    Decode(String),

    #[error("invalid books payload: {0}")]
    InvalidPayload(String),
}
