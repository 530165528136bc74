//! Post list view model.
//!
//! Pure functions from the list query to a renderable description. Nothing
//! here touches the terminal.

pub use postboard_types::AVATAR_PLACEHOLDER_URL;
use postboard_types::{Author, Post};

use crate::common::{Query, QueryPhase};

/// One post summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCardView {
    pub id: String,
    pub avatar_src: String,
    pub author_name: String,
    pub created: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostListView {
    /// The list query has not resolved yet.
    Loading,
    Failed(String),
    Loaded(Vec<PostCardView>),
}

impl PostListView {
    pub fn from_query(query: &Query<Vec<Post>>, date_format: &str) -> Self {
        match query.phase() {
            QueryPhase::Pending => PostListView::Loading,
            QueryPhase::Failed(error) => PostListView::Failed(error.clone()),
            QueryPhase::Resolved(posts) => PostListView::Loaded(
                posts
                    .iter()
                    .map(|post| PostCardView::from_post(post, date_format))
                    .collect(),
            ),
        }
    }

    pub fn cards(&self) -> &[PostCardView] {
        match self {
            PostListView::Loaded(cards) => cards,
            PostListView::Loading | PostListView::Failed(_) => &[],
        }
    }
}

impl PostCardView {
    pub fn from_post(post: &Post, date_format: &str) -> Self {
        Self {
            id: post.id.clone(),
            avatar_src: avatar_src(&post.author).to_string(),
            author_name: post.author.name.clone(),
            created: post.created_local(date_format),
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

/// The author's image, or the placeholder when none is set.
pub fn avatar_src(author: &Author) -> &str {
    author.avatar_src()
}
