use super::models::BookRecord;

/// Records whose id, name or author contain `query`, ignoring case.
///
/// The query is trimmed first; a blank query matches everything.
/// Catalog order is preserved.
pub fn filter_records<'a>(items: &'a [BookRecord], query: &str) -> Vec<&'a BookRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

fn matches(record: &BookRecord, needle: &str) -> bool {
    [&record.id, &record.name, &record.author]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
