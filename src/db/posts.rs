use std::collections::HashSet;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};

use super::store::{PostStore, StoreResult};
use crate::types::Post;

const POSTS_COLLECTION: &str = "posts";
const DELETED_COLLECTION: &str = "deleted_posts";

/// Membership row in the deleted-id collection.
#[derive(Debug, Serialize, Deserialize)]
struct DeletedPostId {
    #[serde(rename = "_id")]
    id: String,
}

/// Posts and deletions kept in MongoDB. Posts are keyed by their own `id`
/// field (unique index); the driver-generated `_id` is ignored on read.
pub struct MongoPostStore {
    database: Database,
}

impl MongoPostStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn posts(&self) -> Collection<Post> {
        self.database.collection(POSTS_COLLECTION)
    }

    fn deleted(&self) -> Collection<DeletedPostId> {
        self.database.collection(DELETED_COLLECTION)
    }

    /// Create the unique index that makes `upsert_post` keyed by id.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.posts().create_index(index).await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn fetch_all_stored_posts(&self) -> StoreResult<Vec<Post>> {
        let cursor = self.posts().find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let posts: Vec<Post> = cursor.try_collect().await?;
        Ok(posts)
    }

    async fn fetch_deleted_ids(&self) -> StoreResult<HashSet<String>> {
        let cursor = self.deleted().find(doc! {}).await?;
        let rows: Vec<DeletedPostId> = cursor.try_collect().await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn upsert_post(&self, post: &Post) -> StoreResult<()> {
        self.posts()
            .replace_one(doc! { "id": post.id.as_str() }, post)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> StoreResult<bool> {
        let result = self.posts().delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn mark_id_deleted(&self, id: &str) -> StoreResult<()> {
        let row = DeletedPostId { id: id.to_string() };
        self.deleted()
            .replace_one(doc! { "_id": id }, &row)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn unmark_id_deleted(&self, id: &str) -> StoreResult<bool> {
        let result = self.deleted().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
