//! Post command handlers.

use anyhow::{Context, Result};
use comfy_table::Table;
use postboard_core::backend::{Services, SignIn};
use postboard_core::config::Config;
use postboard_types::{CreatePostInput, Post};

pub async fn list(config: &Config, json: bool) -> Result<()> {
    let services = Services::from_config(config).context("wire backend")?;
    let posts = services.posts.list_posts().await.context("list posts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else if posts.is_empty() {
        println!("No posts yet.");
    } else {
        println!("{}", posts_table(&posts, &config.display.date_format));
    }
    Ok(())
}

fn posts_table(posts: &[Post], date_format: &str) -> Table {
    let mut table = Table::new();
    table.set_header(["Author", "Avatar", "Created", "Title", "Body"]);
    for post in posts {
        table.add_row([
            post.author.name.clone(),
            post.author.avatar_src().to_string(),
            post.created_local(date_format),
            post.title.clone(),
            post.body.clone(),
        ]);
    }
    table
}

pub async fn create(config: &Config, title: String, body: String) -> Result<()> {
    let services = Services::from_config(config).context("wire backend")?;

    match services.session.sign_in().await.context("sign in")? {
        SignIn::Completed => {}
        SignIn::OpenBrowser { url } => {
            tracing::debug!(%url, "browser sign-in needed; relying on configured session token");
        }
    }

    let post = services
        .posts
        .create_post(CreatePostInput { title, body })
        .await
        .context("create post")?;
    println!("{}", post.id);
    Ok(())
}
