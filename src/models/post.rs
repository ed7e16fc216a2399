// src/models/post.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    listing::{DEFAULT_PAGE_SIZE, ListQuery, Listable, Pagination, SortDirection, SortValue},
    utils::text::excerpt,
};

/// A blog post as served by the remote posts API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// Listing card: the post without its body, plus a short excerpt.
#[derive(Debug, Clone, Serialize)]
pub struct PostPreview {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub excerpt: String,
}

impl From<Post> for PostPreview {
    fn from(post: Post) -> Self {
        Self {
            excerpt: excerpt(&post.body, EXCERPT_LENGTH),
            id: post.id,
            user_id: post.user_id,
            title: post.title,
        }
    }
}

const EXCERPT_LENGTH: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PostSortKey {
    #[default]
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "userId", alias = "user_id")]
    UserId,
}

impl Listable for Post {
    type SortKey = PostSortKey;
    /// Author (user id).
    type Filter = i64;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.body.as_str()]
    }

    fn sort_value(&self, key: PostSortKey) -> SortValue<'_> {
        match key {
            PostSortKey::Id => SortValue::Number(self.id as f64),
            PostSortKey::Title => SortValue::Text(&self.title),
            PostSortKey::UserId => SortValue::Number(self.user_id as f64),
        }
    }

    fn matches_filter(&self, user_id: &i64) -> bool {
        self.user_id == *user_id
    }
}

/// Query parameters for listing posts.
#[derive(Debug, Deserialize, Validate)]
pub struct PostListParams {
    /// Free-text search over title and body.
    pub q: Option<String>,

    /// Only posts by this author.
    #[serde(alias = "userId")]
    pub user_id: Option<i64>,

    /// Sort key (default: id).
    pub sort: Option<PostSortKey>,

    /// Sort direction (default: desc, newest ids first).
    pub order: Option<SortDirection>,

    #[validate(range(min = 1))]
    pub page: Option<usize>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<usize>,
}

impl PostListParams {
    pub fn query(&self) -> ListQuery<PostSortKey, i64> {
        ListQuery::new(
            self.sort.unwrap_or_default(),
            self.order.unwrap_or(SortDirection::Desc),
        )
        .with_search(self.q.clone().unwrap_or_default())
        .with_filter(self.user_id)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::at(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}
