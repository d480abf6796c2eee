use crate::error::ApiError;
use crate::model::{CreateCommentInput, CreatePostInput, CreateUserInput};
use crate::selection::{render, render_list, Selection};
use crate::store::BlogStore;
use crate::{mutation, query};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub kind: OperationKind,
    /// Type of the returned record(s), e.g. `[User]` or `Post`.
    pub returns: &'static str,
}

const OPERATIONS: &[OperationInfo] = &[
    OperationInfo {
        name: "users",
        kind: OperationKind::Query,
        returns: "[User]",
    },
    OperationInfo {
        name: "posts",
        kind: OperationKind::Query,
        returns: "[Post]",
    },
    OperationInfo {
        name: "comments",
        kind: OperationKind::Query,
        returns: "[Comment]",
    },
    OperationInfo {
        name: "me",
        kind: OperationKind::Query,
        returns: "User",
    },
    OperationInfo {
        name: "post",
        kind: OperationKind::Query,
        returns: "Post",
    },
    OperationInfo {
        name: "createUser",
        kind: OperationKind::Mutation,
        returns: "User",
    },
    OperationInfo {
        name: "createPost",
        kind: OperationKind::Mutation,
        returns: "Post",
    },
    OperationInfo {
        name: "createComment",
        kind: OperationKind::Mutation,
        returns: "Comment",
    },
];

/// Arguments of the filterable list queries.
#[derive(Debug, Default, Deserialize)]
struct ListArgs {
    query: Option<String>,
}

/// Mutations take their payload under `data`.
#[derive(Debug, Deserialize)]
struct DataArgs<T> {
    data: T,
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ApiError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ApiError::InvalidArguments(e.to_string()))
}

/// Dispatches named operations to the query and mutation layers and renders
/// the results against a field selection.
#[derive(Clone)]
pub struct BlogApi {
    store: Arc<BlogStore>,
}

impl BlogApi {
    pub fn new(store: Arc<BlogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &BlogStore {
        &self.store
    }

    pub fn list_operations(&self) -> &'static [OperationInfo] {
        OPERATIONS
    }

    pub fn call(
        &self,
        name: &str,
        arguments: Value,
        select: &Selection,
    ) -> Result<Value, ApiError> {
        debug!(operation = name, "dispatching");
        let store = self.store.as_ref();

        match name {
            "users" => {
                let args: ListArgs = parse_args(arguments)?;
                render_list(&query::list_users(store, args.query.as_deref()), select, store)
            }
            "posts" => {
                let args: ListArgs = parse_args(arguments)?;
                render_list(&query::list_posts(store, args.query.as_deref()), select, store)
            }
            "comments" => render_list(&query::list_comments(store), select, store),
            "me" => render(&query::me(), select, store),
            "post" => render(&query::post(), select, store),
            "createUser" => {
                let args: DataArgs<CreateUserInput> = parse_args(arguments)?;
                let user = mutation::create_user(store, args.data)?;
                render(&user, select, store)
            }
            "createPost" => {
                let args: DataArgs<CreatePostInput> = parse_args(arguments)?;
                let post = mutation::create_post(store, args.data)?;
                render(&post, select, store)
            }
            "createComment" => {
                let args: DataArgs<CreateCommentInput> = parse_args(arguments)?;
                let comment = mutation::create_comment(store, args.data)?;
                render(&comment, select, store)
            }
            _ => Err(ApiError::UnknownOperation(name.to_string())),
        }
    }
}
