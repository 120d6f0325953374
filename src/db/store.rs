use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Post;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Mutable side of the catalogue: posts written by the admin CMS and the set
/// of deleted post ids.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every stored post, full content included.
    async fn fetch_all_stored_posts(&self) -> StoreResult<Vec<Post>>;

    async fn fetch_deleted_ids(&self) -> StoreResult<HashSet<String>>;

    /// Insert or replace the post with `post.id`.
    async fn upsert_post(&self, post: &Post) -> StoreResult<()>;

    /// Remove the stored row. Returns whether a row existed.
    async fn delete_post(&self, id: &str) -> StoreResult<bool>;

    async fn mark_id_deleted(&self, id: &str) -> StoreResult<()>;

    /// Returns whether the id was in the deleted set.
    async fn unmark_id_deleted(&self, id: &str) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}
