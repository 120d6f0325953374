use crate::types::Post;

const DEFAULT_POSTS_JSON: &str = include_str!("../../data/default_posts.json");

/// The catalogue shipped with the binary. It never changes at runtime; admins
/// can only shadow or suppress its entries.
pub fn load_default_posts() -> Result<Vec<Post>, serde_json::Error> {
    serde_json::from_str(DEFAULT_POSTS_JSON)
}
