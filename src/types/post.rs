use serde::{Deserialize, Serialize};

/// A blog article, either bundled with the binary or persisted by the admin CMS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub published_at: String,
    pub read_time: String,
    pub featured: bool,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Body of a create request. The id is always generated server-side; missing
/// fields are left blank and caught by validation.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PostInput {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub published_at: Option<String>,
    pub read_time: Option<String>,
    pub featured: bool,
    pub image: String,
    pub author: Option<String>,
    pub author_role: Option<String>,
    pub author_bio: Option<String>,
    pub author_linkedin: Option<String>,
    pub seo_keywords: Option<String>,
    pub meta_description: Option<String>,
}

/// Body of an edit request. Present fields overwrite the stored values.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published_at: Option<String>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub author_role: Option<String>,
    pub author_bio: Option<String>,
    pub author_linkedin: Option<String>,
    pub seo_keywords: Option<String>,
    pub meta_description: Option<String>,
}

impl PostUpdate {
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        if let Some(published_at) = self.published_at {
            post.published_at = published_at;
        }
        if let Some(read_time) = self.read_time {
            post.read_time = read_time;
        }
        if let Some(image) = self.image {
            post.image = image;
        }
        if self.author.is_some() {
            post.author = self.author;
        }
        if self.author_role.is_some() {
            post.author_role = self.author_role;
        }
        if self.author_bio.is_some() {
            post.author_bio = self.author_bio;
        }
        if self.author_linkedin.is_some() {
            post.author_linkedin = self.author_linkedin;
        }
        if self.seo_keywords.is_some() {
            post.seo_keywords = self.seo_keywords;
        }
        if self.meta_description.is_some() {
            post.meta_description = self.meta_description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_uses_camel_case_fields() {
        let json = serde_json::json!({
            "id": "pmi-basics",
            "title": "PMI basics",
            "excerpt": "What PMI covers",
            "content": "<p>Body</p>",
            "category": "PMI Insights",
            "publishedAt": "1 March 2024",
            "readTime": "4 min read",
            "authorRole": "Broker"
        });

        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.published_at, "1 March 2024");
        assert_eq!(post.author_role.as_deref(), Some("Broker"));
        assert!(post.tags.is_empty());
        assert!(!post.featured);

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["readTime"], "4 min read");
        assert!(back.get("authorBio").is_none());
    }

    #[test]
    fn test_update_only_overwrites_present_fields() {
        let mut post = Post {
            id: "a".into(),
            title: "Old".into(),
            excerpt: "Keep me".into(),
            author: Some("Jane".into()),
            ..Default::default()
        };

        PostUpdate {
            title: Some("New".into()),
            tags: Some(vec!["pmi".into()]),
            ..Default::default()
        }
        .apply_to(&mut post);

        assert_eq!(post.id, "a");
        assert_eq!(post.title, "New");
        assert_eq!(post.excerpt, "Keep me");
        assert_eq!(post.author.as_deref(), Some("Jane"));
        assert_eq!(post.tags, vec!["pmi".to_string()]);
    }
}
