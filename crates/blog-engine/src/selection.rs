//! Field selection and lazy rendering.
//!
//! A [`Selection`] names the fields a caller wants back. Rendering walks the
//! selection and only invokes a relationship resolver when its field is
//! actually selected.

use crate::error::ApiError;
use crate::model::{Comment, Post, User};
use crate::resolver;
use crate::store::BlogStore;
use serde_json::{json, Map, Value};

static SCALARS_ONLY: Selection = Selection { fields: Vec::new() };

/// Requested fields, in request order. Empty means "scalar fields only".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    fields: Vec<(String, Selection)>,
}

impl Selection {
    pub fn scalars() -> Self {
        Self::default()
    }

    /// Builder helper: adds `name` with a nested selection.
    pub fn with(mut self, name: &str, sub: Selection) -> Self {
        self.fields.push((name.to_string(), sub));
        self
    }

    /// Builder helper: adds a leaf field.
    pub fn field(self, name: &str) -> Self {
        self.with(name, Selection::scalars())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses `{"name": true, "posts": {"title": true}}`.
    ///
    /// `null` (or an absent selection) maps to scalars only. A leaf may be
    /// `true`, `null` or `{}`.
    pub fn from_json(value: &Value) -> Result<Self, ApiError> {
        match value {
            Value::Null => Ok(Self::scalars()),
            Value::Object(map) => {
                let mut selection = Self::scalars();
                for (name, sub) in map {
                    let sub = match sub {
                        Value::Bool(true) | Value::Null => Self::scalars(),
                        Value::Object(_) => Self::from_json(sub)?,
                        other => {
                            return Err(ApiError::InvalidArguments(format!(
                                "selection for '{}' must be true or an object, got {}",
                                name, other
                            )));
                        }
                    };
                    selection.fields.push((name.clone(), sub));
                }
                Ok(selection)
            }
            other => Err(ApiError::InvalidArguments(format!(
                "select must be an object, got {}",
                other
            ))),
        }
    }
}

/// A record type that can be rendered against a [`Selection`].
pub trait Node {
    const TYPE_NAME: &'static str;

    /// Fields returned when nothing is selected explicitly.
    const SCALARS: &'static [&'static str];

    /// Resolves one field. `Ok(None)` means the type has no such field.
    fn field(
        &self,
        name: &str,
        sub: &Selection,
        store: &BlogStore,
    ) -> Result<Option<Value>, ApiError>;
}

pub fn render<N: Node>(
    node: &N,
    selection: &Selection,
    store: &BlogStore,
) -> Result<Value, ApiError> {
    let mut out = Map::new();

    if selection.is_empty() {
        for name in N::SCALARS {
            if let Some(value) = node.field(name, &SCALARS_ONLY, store)? {
                out.insert((*name).to_string(), value);
            }
        }
        return Ok(Value::Object(out));
    }

    for (name, sub) in &selection.fields {
        let value = node
            .field(name, sub, store)?
            .ok_or_else(|| ApiError::UnknownField {
                type_name: N::TYPE_NAME,
                field: name.clone(),
            })?;
        out.insert(name.clone(), value);
    }
    Ok(Value::Object(out))
}

pub fn render_list<N: Node>(
    nodes: &[N],
    selection: &Selection,
    store: &BlogStore,
) -> Result<Value, ApiError> {
    nodes
        .iter()
        .map(|node| render(node, selection, store))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

impl Node for User {
    const TYPE_NAME: &'static str = "User";
    const SCALARS: &'static [&'static str] = &["id", "name", "email", "age"];

    fn field(
        &self,
        name: &str,
        sub: &Selection,
        store: &BlogStore,
    ) -> Result<Option<Value>, ApiError> {
        let value = match name {
            "id" => json!(self.id),
            "name" => json!(self.name),
            "email" => json!(self.email),
            "age" => json!(self.age),
            "posts" => render_list(&resolver::user_posts(self, store), sub, store)?,
            "comments" => render_list(&resolver::user_comments(self, store), sub, store)?,
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}

impl Node for Post {
    const TYPE_NAME: &'static str = "Post";
    const SCALARS: &'static [&'static str] = &["id", "title", "body", "published"];

    fn field(
        &self,
        name: &str,
        sub: &Selection,
        store: &BlogStore,
    ) -> Result<Option<Value>, ApiError> {
        let value = match name {
            "id" => json!(self.id),
            "title" => json!(self.title),
            "body" => json!(self.body),
            "published" => json!(self.published),
            "author" => render(&resolver::post_author(self, store)?, sub, store)?,
            "comments" => render_list(&resolver::post_comments(self, store), sub, store)?,
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}

impl Node for Comment {
    const TYPE_NAME: &'static str = "Comment";
    const SCALARS: &'static [&'static str] = &["id", "text"];

    fn field(
        &self,
        name: &str,
        sub: &Selection,
        store: &BlogStore,
    ) -> Result<Option<Value>, ApiError> {
        let value = match name {
            "id" => json!(self.id),
            "text" => json!(self.text),
            "author" => render(&resolver::comment_author(self, store)?, sub, store)?,
            "post" => render(&resolver::comment_post(self, store)?, sub, store)?,
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}
