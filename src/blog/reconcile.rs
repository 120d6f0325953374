use std::collections::HashSet;

use crate::types::Post;

/// Merge the bundled catalogue with stored posts and deletions.
///
/// Stored posts come first, in store order, and fully replace any default
/// with the same id. Any id in `deleted` is dropped from both sides. When an
/// input list repeats an id, only its first occurrence is kept.
pub fn reconcile(defaults: &[Post], stored: &[Post], deleted: &HashSet<String>) -> Vec<Post> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(stored.len() + defaults.len());
    let mut merged = Vec::with_capacity(stored.len() + defaults.len());

    for post in stored.iter().chain(defaults) {
        if deleted.contains(&post.id) {
            continue;
        }
        if seen.insert(post.id.as_str()) {
            merged.push(post.clone());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    fn deleted(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stored_post_shadows_default() {
        let defaults = vec![post("a", "A"), post("b", "B")];
        let stored = vec![post("a", "A2")];

        let merged = reconcile(&defaults, &stored, &HashSet::new());

        assert_eq!(merged, vec![post("a", "A2"), post("b", "B")]);
    }

    #[test]
    fn test_deleted_default_is_suppressed() {
        let merged = reconcile(&[post("a", "A")], &[], &deleted(&["a"]));
        assert!(merged.is_empty());
    }

    #[test]
    fn test_deleted_stored_post_is_suppressed() {
        let stored = vec![post("custom-1", "Mine"), post("custom-2", "Also mine")];
        let merged = reconcile(&[], &stored, &deleted(&["custom-1"]));
        assert_eq!(ids(&merged), vec!["custom-2"]);
    }

    #[test]
    fn test_deleted_shadow_does_not_resurrect_default() {
        let defaults = vec![post("a", "A")];
        let stored = vec![post("a", "A2")];
        let merged = reconcile(&defaults, &stored, &deleted(&["a"]));
        assert!(merged.is_empty());
    }

    #[test]
    fn test_empty_store_returns_defaults_in_order() {
        let defaults = vec![post("c", "C"), post("a", "A"), post("b", "B")];
        let merged = reconcile(&defaults, &[], &HashSet::new());
        assert_eq!(merged, defaults);
    }

    #[test]
    fn test_stored_posts_sort_before_defaults() {
        let defaults = vec![post("d1", "D1"), post("d2", "D2")];
        let stored = vec![post("s2", "S2"), post("s1", "S1")];
        let merged = reconcile(&defaults, &stored, &HashSet::new());
        assert_eq!(ids(&merged), vec!["s2", "s1", "d1", "d2"]);
    }

    #[test]
    fn test_shadow_replaces_whole_record() {
        let mut default = post("a", "A");
        default.author = Some("Default Author".into());
        let stored = post("a", "A2");

        let merged = reconcile(&[default], &[stored], &HashSet::new());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].author, None);
    }

    #[test]
    fn test_repeated_stored_id_keeps_first_row() {
        let defaults = vec![post("a", "A"), post("b", "B")];
        let stored = vec![post("a", "first"), post("c", "C"), post("a", "second")];

        let merged = reconcile(&defaults, &stored, &HashSet::new());

        assert_eq!(merged, vec![post("a", "first"), post("c", "C"), post("b", "B")]);
    }

    fn id_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "d", "e", "f", "g", "h"]).prop_map(String::from)
    }

    proptest! {
        #[test]
        fn prop_result_has_unique_ids(
            default_ids in prop::collection::vec(id_strategy(), 0..10),
            stored_ids in prop::collection::vec(id_strategy(), 0..10),
            deleted_ids in prop::collection::hash_set(id_strategy(), 0..4),
        ) {
            let defaults: Vec<Post> = default_ids.iter().map(|id| post(id, "default")).collect();
            let stored: Vec<Post> = stored_ids.iter().map(|id| post(id, "stored")).collect();

            let merged = reconcile(&defaults, &stored, &deleted_ids);

            let unique: HashSet<&str> = merged.iter().map(|p| p.id.as_str()).collect();
            prop_assert_eq!(unique.len(), merged.len());
        }

        #[test]
        fn prop_deleted_ids_never_appear(
            default_ids in prop::collection::vec(id_strategy(), 0..10),
            stored_ids in prop::collection::vec(id_strategy(), 0..10),
            deleted_ids in prop::collection::hash_set(id_strategy(), 0..4),
        ) {
            let defaults: Vec<Post> = default_ids.iter().map(|id| post(id, "default")).collect();
            let stored: Vec<Post> = stored_ids.iter().map(|id| post(id, "stored")).collect();

            let merged = reconcile(&defaults, &stored, &deleted_ids);

            for p in &merged {
                prop_assert!(!deleted_ids.contains(&p.id));
            }
        }

        #[test]
        fn prop_stored_version_wins(
            shared in id_strategy(),
            extra in prop::collection::vec(id_strategy(), 0..6),
        ) {
            let mut defaults: Vec<Post> = extra.iter().map(|id| post(id, "default")).collect();
            defaults.push(post(&shared, "default"));
            let stored = vec![post(&shared, "stored")];

            let merged = reconcile(&defaults, &stored, &HashSet::new());

            let found = merged.iter().find(|p| p.id == shared).unwrap();
            prop_assert_eq!(found.title.as_str(), "stored");
        }
    }
}
