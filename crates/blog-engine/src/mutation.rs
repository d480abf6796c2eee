//! Validated inserts.
//!
//! Each operation holds the store's write guard for its whole body: every
//! check runs before the append, and nothing is written when a check fails.

use crate::error::{BlogError, Result};
use crate::model::{Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Post, User};
use crate::store::{BlogStore, Tables};
use tracing::{debug, info};

fn user_exists(tables: &Tables, id: &str) -> bool {
    tables.users.iter().any(|user| user.id == id)
}

pub fn create_user(store: &BlogStore, input: CreateUserInput) -> Result<User> {
    let mut tables = store.write();

    if tables.users.iter().any(|user| user.email == input.email) {
        debug!(email = %input.email, "rejecting user with duplicate email");
        return Err(BlogError::email_taken());
    }

    let user = User::new(input.name, input.email, input.age);
    tables.users.push(user.clone());
    info!(id = %user.id, "created user");
    Ok(user)
}

pub fn create_post(store: &BlogStore, input: CreatePostInput) -> Result<Post> {
    let mut tables = store.write();

    if !user_exists(&tables, &input.author) {
        debug!(author = %input.author, "rejecting post with unknown author");
        return Err(BlogError::user_missing());
    }

    let post = Post::new(input.title, input.body, input.published, input.author);
    tables.posts.push(post.clone());
    info!(id = %post.id, author = %post.author, "created post");
    Ok(post)
}

/// Comments may only target published posts.
pub fn create_comment(store: &BlogStore, input: CreateCommentInput) -> Result<Comment> {
    let mut tables = store.write();

    if !user_exists(&tables, &input.author) {
        debug!(author = %input.author, "rejecting comment with unknown author");
        return Err(BlogError::user_missing());
    }

    let post_open = tables
        .posts
        .iter()
        .any(|post| post.id == input.post && post.published);
    if !post_open {
        debug!(post = %input.post, "rejecting comment on missing or unpublished post");
        return Err(BlogError::post_missing());
    }

    let comment = Comment::new(input.text, input.author, input.post);
    tables.comments.push(comment.clone());
    info!(id = %comment.id, post = %comment.post, "created comment");
    Ok(comment)
}
