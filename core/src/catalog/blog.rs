use serde::{Deserialize, Serialize};

use crate::prelude::{CatalogError, CatalogResult};

const EMBEDDED_POSTS: &str = include_str!("../../data/blog.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub href: String,
    pub date: String,
    pub category: String,
}

/// News feed shown beneath the lineup, newest first.
#[derive(Debug, Clone, Default)]
pub struct BlogFeed {
    posts: Vec<BlogPost>,
}

impl BlogFeed {
    pub fn embedded() -> CatalogResult<Self> {
        Self::from_json(EMBEDDED_POSTS)
    }

    pub fn from_json(contents: &str) -> CatalogResult<Self> {
        let posts = serde_json::from_str(contents).map_err(CatalogError::Malformed)?;
        Ok(Self { posts })
    }

    pub fn all(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn latest(&self, limit: usize) -> &[BlogPost] {
        &self.posts[..limit.min(self.posts.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_respects_limit() {
        let feed = BlogFeed::embedded().unwrap();
        assert_eq!(feed.all().len(), 3);
        assert!(feed.latest(0).is_empty());
        assert_eq!(feed.latest(2).len(), 2);
        assert_eq!(feed.latest(10).len(), 3);
        assert_eq!(feed.latest(1)[0].category, "Technology");
    }

    #[test]
    fn malformed_feed_is_rejected() {
        assert!(matches!(
            BlogFeed::from_json("{not json"),
            Err(CatalogError::Malformed(_))
        ));
    }
}
