use crate::model::{Comment, Post, User};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The three collections, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

/// Process-wide entity store.
///
/// Records are only ever appended. There are no indexes: every lookup is a
/// linear scan, so results always come back in insertion order.
///
/// One lock guards all three collections. Mutations hold the write guard
/// across their validation and append so that check-then-insert is atomic.
#[derive(Debug, Default)]
pub struct BlogStore {
    tables: RwLock<Tables>,
}

impl BlogStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with the fixed demo records.
    pub fn seeded() -> Self {
        Self {
            tables: RwLock::new(seed_tables()),
        }
    }

    // The collections are append-only, so a panic mid-request cannot leave
    // them half-written; recover the guard instead of propagating poison.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.read().posts.clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.read().comments.clone()
    }

    /// (users, posts, comments)
    pub fn counts(&self) -> (usize, usize, usize) {
        let tables = self.read();
        (tables.users.len(), tables.posts.len(), tables.comments.len())
    }
}

fn user(id: &str, name: &str, email: &str, age: Option<i32>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        age,
    }
}

fn post(id: &str, title: &str, body: &str, published: bool, author: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        published,
        author: author.to_string(),
    }
}

fn comment(id: &str, text: &str, author: &str, post: &str) -> Comment {
    Comment {
        id: id.to_string(),
        text: text.to_string(),
        author: author.to_string(),
        post: post.to_string(),
    }
}

fn seed_tables() -> Tables {
    Tables {
        users: vec![
            user("1", "Arya", "arya@example.com", Some(19)),
            user("2", "Andrew", "andrew@example.com", Some(27)),
            user("3", "Sarah", "sarah@example.com", None),
        ],
        posts: vec![
            post("1", "Course1", "This is course 1", false, "1"),
            post("2", "Course2", "This is course 2", true, "1"),
            post("3", "Course3", "This is course 3", false, "2"),
        ],
        comments: vec![
            comment("1", "This is the first comment", "1", "1"),
            comment("2", "This is the second comment", "1", "2"),
            comment("3", "This is the third comment", "2", "3"),
            comment("4", "This is the fourth comment", "3", "1"),
        ],
    }
}
