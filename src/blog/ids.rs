use chrono::Utc;

const MAX_STEM_LEN: usize = 50;
const FALLBACK_STEM: &str = "post";

/// Permanent id for a new post: a slug of the title plus the creation time in
/// epoch milliseconds.
pub fn generate_id(title: &str) -> String {
    generate_id_at(title, Utc::now().timestamp_millis())
}

pub fn generate_id_at(title: &str, millis: i64) -> String {
    format!("{}-{}", id_stem(title), millis)
}

/// Slug part of a generated id: lowercase ASCII letters and digits, with
/// whitespace runs turned into single hyphens, at most 50 characters.
pub fn id_stem(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let stem: String = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(MAX_STEM_LEN)
        .collect();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}
