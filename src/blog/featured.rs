use crate::types::Post;

/// Flip the featured flag on `target_id`, keeping at most one post featured.
///
/// Turning a post on clears every other featured post. Turning the featured
/// post off leaves nothing featured. An unknown id returns the list as is.
pub fn toggle_featured(mut posts: Vec<Post>, target_id: &str) -> Vec<Post> {
    let turn_on = match posts.iter().find(|p| p.id == target_id) {
        Some(target) => !target.featured,
        None => return posts,
    };

    for post in posts.iter_mut() {
        post.featured = turn_on && post.id == target_id;
    }

    posts
}

/// Posts whose featured flag differs between `before` and `after`, which must
/// list the same posts in the same order.
pub fn changed_posts<'a>(before: &[Post], after: &'a [Post]) -> Vec<&'a Post> {
    before
        .iter()
        .zip(after)
        .filter(|(old, new)| old.featured != new.featured)
        .map(|(_, new)| new)
        .collect()
}
