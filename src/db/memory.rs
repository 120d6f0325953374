use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{PostStore, StoreResult};
use crate::types::Post;

#[derive(Default)]
struct MemoryState {
    posts: Vec<Post>,
    deleted: HashSet<String>,
}

/// Process-local store used when no database is configured, and in tests.
/// Contents are lost on restart.
#[derive(Default)]
pub struct MemoryPostStore {
    state: RwLock<MemoryState>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                posts,
                deleted: HashSet::new(),
            }),
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn fetch_all_stored_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.state.read().await.posts.clone())
    }

    async fn fetch_deleted_ids(&self) -> StoreResult<HashSet<String>> {
        Ok(self.state.read().await.deleted.clone())
    }

    async fn upsert_post(&self, post: &Post) -> StoreResult<()> {
        let mut state = self.state.write().await;
        match state.posts.iter().position(|p| p.id == post.id) {
            Some(index) => state.posts[index] = post.clone(),
            None => state.posts.push(post.clone()),
        }
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        Ok(state.posts.len() != before)
    }

    async fn mark_id_deleted(&self, id: &str) -> StoreResult<()> {
        self.state.write().await.deleted.insert(id.to_string());
        Ok(())
    }

    async fn unmark_id_deleted(&self, id: &str) -> StoreResult<bool> {
        Ok(self.state.write().await.deleted.remove(id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
