//! Relationship resolution.
//!
//! Each function maps a parent record to its related records by scanning
//! the target collection for an exact foreign-key match. Nothing is joined
//! ahead of time; a caller pays only for the relationships it asks for.

use crate::error::{BlogError, Result};
use crate::model::{Comment, Post, User};
use crate::store::BlogStore;

pub fn user_posts(user: &User, store: &BlogStore) -> Vec<Post> {
    store
        .read()
        .posts
        .iter()
        .filter(|post| post.author == user.id)
        .cloned()
        .collect()
}

pub fn user_comments(user: &User, store: &BlogStore) -> Vec<Comment> {
    store
        .read()
        .comments
        .iter()
        .filter(|comment| comment.author == user.id)
        .cloned()
        .collect()
}

pub fn post_author(post: &Post, store: &BlogStore) -> Result<User> {
    find_user(store, &post.author).ok_or_else(|| {
        BlogError::Integrity(format!(
            "Post {} references missing author {}",
            post.id, post.author
        ))
    })
}

pub fn post_comments(post: &Post, store: &BlogStore) -> Vec<Comment> {
    store
        .read()
        .comments
        .iter()
        .filter(|comment| comment.post == post.id)
        .cloned()
        .collect()
}

pub fn comment_author(comment: &Comment, store: &BlogStore) -> Result<User> {
    find_user(store, &comment.author).ok_or_else(|| {
        BlogError::Integrity(format!(
            "Comment {} references missing author {}",
            comment.id, comment.author
        ))
    })
}

pub fn comment_post(comment: &Comment, store: &BlogStore) -> Result<Post> {
    store
        .read()
        .posts
        .iter()
        .find(|post| post.id == comment.post)
        .cloned()
        .ok_or_else(|| {
            BlogError::Integrity(format!(
                "Comment {} references missing post {}",
                comment.id, comment.post
            ))
        })
}

fn find_user(store: &BlogStore, id: &str) -> Option<User> {
    store.read().users.iter().find(|user| user.id == id).cloned()
}
