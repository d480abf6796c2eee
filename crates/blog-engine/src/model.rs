use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a fresh store-assigned id.
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

impl User {
    pub fn new(name: String, email: String, age: Option<i32>) -> Self {
        Self {
            id: new_id(),
            name,
            email,
            age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published: bool,
    /// Id of the authoring `User`.
    pub author: String,
}

impl Post {
    pub fn new(title: String, body: String, published: bool, author: String) -> Self {
        Self {
            id: new_id(),
            title,
            body,
            published,
            author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    /// Id of the authoring `User`.
    pub author: String,
    /// Id of the `Post` being commented on.
    pub post: String,
}

impl Comment {
    pub fn new(text: String, author: String, post: String) -> Self {
        Self {
            id: new_id(),
            text,
            author,
            post,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub body: String,
    pub published: bool,
    pub author: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentInput {
    pub text: String,
    pub author: String,
    pub post: String,
}
