use crate::model::{Comment, Post, User};
use crate::store::BlogStore;

/// Lowercased needle, or `None` when there is nothing to filter on.
fn needle(query: Option<&str>) -> Option<String> {
    query.filter(|q| !q.is_empty()).map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// All users, or those whose name contains `query` (case-insensitive).
pub fn list_users(store: &BlogStore, query: Option<&str>) -> Vec<User> {
    let tables = store.read();
    match needle(query) {
        None => tables.users.clone(),
        Some(q) => tables
            .users
            .iter()
            .filter(|user| contains(&user.name, &q))
            .cloned()
            .collect(),
    }
}

/// All posts, or those whose title or body contains `query` (case-insensitive).
pub fn list_posts(store: &BlogStore, query: Option<&str>) -> Vec<Post> {
    let tables = store.read();
    match needle(query) {
        None => tables.posts.clone(),
        Some(q) => tables
            .posts
            .iter()
            .filter(|post| contains(&post.title, &q) || contains(&post.body, &q))
            .cloned()
            .collect(),
    }
}

pub fn list_comments(store: &BlogStore) -> Vec<Comment> {
    store.comments()
}

/// Fixed stand-in for the requesting user. Not backed by the store.
pub fn me() -> User {
    User {
        id: "abcd1234".to_string(),
        name: "Mike Hannigan".to_string(),
        email: "mike@example.com".to_string(),
        age: Some(27),
    }
}

/// Fixed stand-in post. Its author is [`me`], which is not in the store.
pub fn post() -> Post {
    Post {
        id: "abcdef123456".to_string(),
        title: "The Subtle Art of Greatness".to_string(),
        body: "I am the killer who is born to be great".to_string(),
        published: false,
        author: me().id,
    }
}
