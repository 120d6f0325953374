//! Catalogue operations used by the HTTP layer.
//!
//! Every read fetches the stored posts and deleted ids and merges them with
//! the bundled defaults. Every write validates first, then talks to the store,
//! then publishes a [`PostEvent`]. There is no version check on writes: two
//! admins editing the same post race and the last upsert wins.

pub mod guard;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Utc};
use futures::future::try_join_all;
use log::{info, warn};
use thiserror::Error;

use crate::blog::{self, featured::changed_posts, ids::id_stem};
use crate::db::{PostStore, StoreError};
use crate::events::{PostEvent, PostEvents};
use crate::types::{Post, PostInput, PostUpdate};
use guard::SaveGuard;

const WORDS_PER_MINUTE: usize = 200;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(String),

    #[error("post {0:?} not found")]
    NotFound(String),

    #[error("a save for {0:?} is already in progress")]
    SaveInProgress(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

pub struct PostService {
    store: Arc<dyn PostStore>,
    defaults: Arc<Vec<Post>>,
    events: PostEvents,
    guard: SaveGuard,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        defaults: Vec<Post>,
        events: PostEvents,
        save_cooldown: Duration,
    ) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
            events,
            guard: SaveGuard::new(save_cooldown),
        }
    }

    pub fn events(&self) -> &PostEvents {
        &self.events
    }

    pub async fn ping(&self) -> ServiceResult<()> {
        Ok(self.store.ping().await?)
    }

    /// The reconciled catalogue, optionally narrowed to a display category.
    pub async fn list_posts(&self, category: Option<&str>) -> ServiceResult<Vec<Post>> {
        let merged = self.merged_posts().await?;
        Ok(match category {
            Some(category) => merged
                .into_iter()
                .filter(|post| blog::matches_category(post, category))
                .collect(),
            None => merged,
        })
    }

    pub async fn get_post(&self, id: &str) -> ServiceResult<Post> {
        self.merged_posts()
            .await?
            .into_iter()
            .find(|post| post.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    pub async fn featured_post(&self) -> ServiceResult<Option<Post>> {
        Ok(self.merged_posts().await?.into_iter().find(|post| post.featured))
    }

    /// Other posts in the same display category, in catalogue order.
    pub async fn related_posts(&self, id: &str, limit: usize) -> ServiceResult<Vec<Post>> {
        let merged = self.merged_posts().await?;
        let post = merged
            .iter()
            .find(|post| post.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        let category = blog::normalize_category(&post.category);

        Ok(merged
            .iter()
            .filter(|other| other.id != id && blog::matches_category(other, &category))
            .take(limit)
            .cloned()
            .collect())
    }

    pub async fn categories(&self) -> ServiceResult<Vec<String>> {
        Ok(blog::list_categories(&self.merged_posts().await?))
    }

    pub async fn create_post(&self, input: PostInput) -> ServiceResult<Post> {
        validate(&input.title, &input.excerpt)?;

        let stem = id_stem(&input.title);
        let _ticket = self
            .guard
            .try_acquire(&format!("new:{}", stem))
            .ok_or_else(|| ServiceError::SaveInProgress(stem.clone()))?;

        let merged = self.merged_posts().await?;
        let id = {
            let taken: HashSet<&str> = merged.iter().map(|p| p.id.as_str()).collect();
            let mut id = blog::generate_id(&input.title);
            let mut bump = 1;
            while taken.contains(id.as_str()) {
                id = blog::generate_id_at(&input.title, Utc::now().timestamp_millis() + bump);
                bump += 1;
            }
            id
        };

        let featured = input.featured;
        let mut post = post_from_input(id, input);

        if featured {
            // The new post goes out in the same batch as the posts it
            // un-features, so it is never stored on its own.
            let mut posts = merged;
            posts.insert(0, post.clone());
            if let Err(e) = self.persist_featured_toggle(posts, &post.id).await {
                if let Err(cleanup) = self.store.delete_post(&post.id).await {
                    warn!("could not remove partially created post {}: {}", post.id, cleanup);
                }
                return Err(e);
            }
            post.featured = true;
        } else {
            self.store.upsert_post(&post).await?;
        }
        info!("created post {}", post.id);

        self.events.publish(PostEvent::Created(post.id.clone()));
        Ok(post)
    }

    /// Overwrite the fields present in `update`. Editing a bundled post stores
    /// a full copy that shadows it from then on.
    pub async fn update_post(&self, id: &str, update: PostUpdate) -> ServiceResult<Post> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(ServiceError::Validation("title is required".into()));
            }
        }
        if let Some(excerpt) = &update.excerpt {
            if excerpt.trim().is_empty() {
                return Err(ServiceError::Validation("excerpt is required".into()));
            }
        }

        let _ticket = self
            .guard
            .try_acquire(id)
            .ok_or_else(|| ServiceError::SaveInProgress(id.to_string()))?;

        let mut post = self.get_post(id).await?;
        update.apply_to(&mut post);
        validate(&post.title, &post.excerpt)?;

        self.store.upsert_post(&post).await?;
        info!("updated post {}", post.id);

        self.events.publish(PostEvent::Updated(post.id.clone()));
        Ok(post)
    }

    /// Bundled posts are suppressed through the deleted-id set (and any
    /// stored shadow is removed); admin-created posts are deleted outright.
    pub async fn delete_post(&self, id: &str) -> ServiceResult<()> {
        if self.is_default(id) {
            let already_deleted = self.store.fetch_deleted_ids().await?.contains(id);
            if !already_deleted {
                self.store.mark_id_deleted(id).await?;
            }
            let removed_shadow = self.store.delete_post(id).await?;
            if already_deleted && !removed_shadow {
                return Err(ServiceError::NotFound(id.to_string()));
            }
            info!("suppressed bundled post {}", id);
        } else if self.store.delete_post(id).await? {
            info!("deleted post {}", id);
        } else {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.events.publish(PostEvent::Deleted(id.to_string()));
        Ok(())
    }

    /// Take `id` back out of the deleted set.
    pub async fn restore_post(&self, id: &str) -> ServiceResult<Post> {
        if !self.store.unmark_id_deleted(id).await? {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        info!("restored post {}", id);

        self.events.publish(PostEvent::Restored(id.to_string()));
        self.get_post(id).await
    }

    /// Flip the featured flag on `id`. Returns the featured post afterwards,
    /// if any.
    pub async fn toggle_featured(&self, id: &str) -> ServiceResult<Option<Post>> {
        let merged = self.merged_posts().await?;
        if !merged.iter().any(|post| post.id == id) {
            return Err(ServiceError::NotFound(id.to_string()));
        }

        let featured = self.persist_featured_toggle(merged, id).await?;
        self.events
            .publish(PostEvent::FeaturedChanged(featured.as_ref().map(|p| p.id.clone())));
        Ok(featured)
    }

    /// Write every post whose flag changed. The writes are awaited together but
    /// are not atomic, so a concurrent reader may briefly see zero or two
    /// featured posts.
    async fn persist_featured_toggle(&self, posts: Vec<Post>, id: &str) -> ServiceResult<Option<Post>> {
        let toggled = blog::toggle_featured(posts.clone(), id);
        let changed = changed_posts(&posts, &toggled);

        if let Err(e) = try_join_all(changed.iter().map(|post| self.store.upsert_post(post))).await {
            warn!("featured toggle for {} partially applied: {}", id, e);
            return Err(e.into());
        }
        info!("featured toggle for {} wrote {} posts", id, changed.len());

        Ok(toggled.into_iter().find(|post| post.featured))
    }

    async fn merged_posts(&self) -> ServiceResult<Vec<Post>> {
        let stored = self.store.fetch_all_stored_posts().await?;
        let deleted = self.store.fetch_deleted_ids().await?;
        Ok(blog::reconcile(&self.defaults, &stored, &deleted))
    }

    fn is_default(&self, id: &str) -> bool {
        self.defaults.iter().any(|post| post.id == id)
    }
}

fn validate(title: &str, excerpt: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title is required".into()));
    }
    if excerpt.trim().is_empty() {
        return Err(ServiceError::Validation("excerpt is required".into()));
    }
    Ok(())
}

fn post_from_input(id: String, input: PostInput) -> Post {
    let published_at = input
        .published_at
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Local::now().format("%-d %B %Y").to_string());
    let read_time = input
        .read_time
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| estimate_read_time(&input.content));

    Post {
        id,
        title: input.title.trim().to_string(),
        excerpt: input.excerpt.trim().to_string(),
        content: input.content,
        category: input.category,
        tags: input.tags,
        published_at,
        read_time,
        featured: false,
        image: input.image,
        author: input.author,
        author_role: input.author_role,
        author_bio: input.author_bio,
        author_linkedin: input.author_linkedin,
        seo_keywords: input.seo_keywords,
        meta_description: input.meta_description,
    }
}

/// "N min read" from the visible words of an HTML body. Quoted attribute
/// values may contain `>`.
pub fn estimate_read_time(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    for c in html.chars() {
        if !in_tag {
            if c == '<' {
                in_tag = true;
                text.push(' ');
            } else {
                text.push(c);
            }
            continue;
        }
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => in_tag = false,
                _ => {}
            },
        }
    }

    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}
