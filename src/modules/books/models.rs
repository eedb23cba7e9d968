use serde::{Deserialize, Serialize};

/// Cover image given to every book created through the store.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://img.freepik.com/free-vector/blue-text-book-library-icon_24877-83092.jpg?semt=ais_hybrid&w=740&q=80";

/// Lowest accepted rating, inclusive.
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating, inclusive.
pub const MAX_RATING: f64 = 5.0;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Opaque identifier, unique within a catalog
    pub id: String,
    /// Title of the book
    pub name: String,
    /// Author of the book
    pub author: String,
    /// Cover image URL
    #[serde(rename = "imgUrl")]
    pub image_url: String,
    pub genre: String,
    /// Between [`MIN_RATING`] and [`MAX_RATING`]
    pub rating: f64,
    pub description: String,
    pub is_read: bool,
}

/// Raw form input for creating a book. Nothing here has been validated;
/// the rating is still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDraft {
    pub name: String,
    pub author: String,
    pub genre: String,
    pub rating: String,
    pub description: String,
}

impl BookDraft {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        rating: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            genre: genre.into(),
            rating: rating.into(),
            description: description.into(),
        }
    }
}

/// A draft that passed validation: trimmed text and a parsed rating.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
    pub description: String,
}

impl ValidDraft {
    /// Turn the draft into a fresh, unread record with the placeholder cover.
    pub fn into_record(self, id: String) -> BookRecord {
        BookRecord {
            id,
            name: self.name,
            author: self.author,
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            genre: self.genre,
            rating: self.rating,
            description: self.description,
            is_read: false,
        }
    }
}
