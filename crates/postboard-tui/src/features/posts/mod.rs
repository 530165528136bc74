//! Post list slice: list query handling, view model, grid rendering.

mod render;
mod update;
mod view;

pub use render::{CARD_HEIGHT, render_post_list};
pub use update::{GRID_COLUMNS, handle_invalidated, handle_posts_loaded, request_fetch, scroll};
pub use view::{AVATAR_PLACEHOLDER_URL, PostCardView, PostListView, avatar_src};
