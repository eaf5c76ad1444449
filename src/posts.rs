//! Blog posts: admin CRUD and the public listing.
//!
//! Every write here is provisional. The client only gates the entry points in
//! the UI; the backend's row-level policies decide whether a write is allowed,
//! and a refusal comes back as `Error::Remote`.

use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::slug::slugify;
use crate::supabase::SupabaseClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::{info, warn};

const POSTS_TABLE: &str = "blogs";
const CATEGORIES_TABLE: &str = "blog_categories";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded `blog_categories(name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// Embedded `blog_authors(display_name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub status: PostStatus,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub category_id: Option<String>,
    pub slug: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, rename = "blog_categories", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default, rename = "blog_authors", skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
}

impl Post {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|a| a.display_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// The editable fields, for pre-filling the editor.
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            cover_image: self.cover_image.clone(),
            status: self.status,
            category_id: self.category_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

/// Editable post fields, used for both create and full-record update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub status: PostStatus,
    pub category_id: Option<String>,
}

impl PostDraft {
    /// Trimmed copy with blank optional fields turned into `None`.
    pub fn normalized(&self) -> PostDraft {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        PostDraft {
            title: self.title.trim().to_string(),
            excerpt: clean(&self.excerpt),
            content: self.content.trim().to_string(),
            cover_image: clean(&self.cover_image),
            status: self.status,
            category_id: clean(&self.category_id),
        }
    }

    /// Title and content are required.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(Error::Validation(
                "Title and content are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of an insert or update on `blogs`.
#[derive(Debug, Serialize)]
struct PostWrite<'a> {
    title: &'a str,
    excerpt: Option<&'a str>,
    content: &'a str,
    cover_image: Option<&'a str>,
    status: PostStatus,
    category_id: Option<&'a str>,
    slug: String,
    is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    author_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl<'a> PostWrite<'a> {
    fn from_draft(draft: &'a PostDraft) -> Self {
        Self {
            title: &draft.title,
            excerpt: draft.excerpt.as_deref(),
            content: &draft.content,
            cover_image: draft.cover_image.as_deref(),
            status: draft.status,
            category_id: draft.category_id.as_deref(),
            slug: slugify(&draft.title),
            is_published: draft.status.is_published(),
            author_id: None,
            published_at: None,
            updated_at: None,
        }
    }
}

/// `published_at` for a write, given what is stored now.
///
/// Set once, the first time the post is published; never moved or cleared.
fn published_at_for(
    status: PostStatus,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status, current) {
        (_, Some(existing)) => Some(existing),
        (PostStatus::Published, None) => Some(now),
        (PostStatus::Draft, None) => None,
    }
}

#[derive(Debug, Clone)]
pub struct PostStore {
    backend: SupabaseClient,
}

impl PostStore {
    pub fn new(backend: SupabaseClient) -> Self {
        Self { backend }
    }

    /// Every post with its category name, newest first.
    pub async fn list_all(&self) -> Result<Vec<Post>> {
        self.backend
            .from(POSTS_TABLE)
            .select("*, blog_categories (name)")
            .order("created_at", false)
            .fetch()
            .await
    }

    /// At most `limit` published posts, most recently published first.
    pub async fn list_published(&self, limit: usize) -> Result<Vec<Post>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = self
            .backend
            .from(POSTS_TABLE)
            .select("*, blog_categories (name), blog_authors (display_name)")
            .eq("status", PostStatus::Published)
            .order("published_at", false)
            .limit(limit)
            .fetch()
            .await?;

        let fetched = posts.len();
        let published: Vec<Post> = posts
            .into_iter()
            .filter(|post| post.status.is_published())
            .take(limit)
            .collect();
        if published.len() < fetched {
            warn!(
                "Dropped {} rows outside the published listing",
                fetched - published.len()
            );
        }

        Ok(published)
    }

    pub async fn get(&self, id: &str) -> Result<Post> {
        self.backend
            .from(POSTS_TABLE)
            .select("*")
            .eq("id", id)
            .fetch_single()
            .await
    }

    /// Categories for the editor select, by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.backend
            .from(CATEGORIES_TABLE)
            .select("*")
            .order("name", true)
            .fetch()
            .await
    }

    /// Create a post authored by `author_id`.
    ///
    /// Blank title or content fails with `Error::Validation` before any request.
    pub async fn create(&self, draft: &PostDraft, author_id: &str) -> Result<Post> {
        let draft = draft.normalized();
        draft.validate()?;

        let mut row = PostWrite::from_draft(&draft);
        row.author_id = Some(author_id);
        row.published_at = published_at_for(draft.status, None, Utc::now());

        let created: Vec<Post> = self
            .backend
            .from(POSTS_TABLE)
            .insert(&[row])
            .await?;

        let post = created
            .into_iter()
            .next()
            .ok_or_else(|| Error::Decode("Insert returned no row".to_string()))?;

        info!("Created post {} ({})", post.id, post.slug);
        Ok(post)
    }

    /// Replace the editable fields of post `id` and recompute its slug.
    pub async fn update(&self, id: &str, draft: &PostDraft) -> Result<Post> {
        let draft = draft.normalized();
        draft.validate()?;

        let current = self.get(id).await?;
        let now = Utc::now();

        let mut row = PostWrite::from_draft(&draft);
        row.updated_at = Some(now);
        row.published_at = published_at_for(draft.status, current.published_at, now);

        let updated: Vec<Post> = self
            .backend
            .from(POSTS_TABLE)
            .eq("id", id)
            .update(&row)
            .await?;

        // PostgREST answers an update that matched nothing (or was filtered
        // out by a policy) with an empty array
        let post = updated.into_iter().next().ok_or_else(|| Error::Remote {
            status: 404,
            code: None,
            message: format!("Post {} was not updated", id),
        })?;

        info!("Updated post {} ({})", post.id, post.slug);
        Ok(post)
    }

    /// Delete post `id` once the user confirms `prompt`. Irreversible.
    pub async fn delete<N: Notifier + ?Sized>(
        &self,
        id: &str,
        notifier: &N,
        prompt: &str,
    ) -> Result<()> {
        if !notifier.confirm(prompt) {
            info!("Delete of post {} cancelled", id);
            return Err(Error::Cancelled);
        }

        self.backend
            .from(POSTS_TABLE)
            .eq("id", id)
            .delete()
            .await?;

        info!("Deleted post {}", id);
        Ok(())
    }
}

/// Accept numeric or string primary keys.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn optional_id_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    }))
}
