use super::models::{BookRecord, PLACEHOLDER_IMAGE_URL};

/// Sample records the catalog starts with before any load settles.
pub fn seed_records() -> Vec<BookRecord> {
    vec![
        BookRecord {
            id: "1".to_string(),
            name: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            genre: "Programming".to_string(),
            rating: 4.7,
            description: "How to write clean, maintainable code.".to_string(),
            is_read: false,
        },
        BookRecord {
            id: "2".to_string(),
            name: "The Pragmatic Programmer".to_string(),
            author: "Andrew Hunt, David Thomas".to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            genre: "Programming".to_string(),
            rating: 4.6,
            description: "Practical advice for software developers.".to_string(),
            is_read: true,
        },
    ]
}
