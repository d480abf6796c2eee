//! In-memory users/posts/comments store.
//!
//! [`store::BlogStore`] owns the records, [`query`] and [`mutation`] are the
//! read and write operations, and [`resolver`] follows foreign keys between
//! records on demand. [`api`] and [`stdio`] expose all of it as named
//! operations with field selection over line-delimited JSON-RPC.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod mutation;
pub mod query;
pub mod resolver;
pub mod rpc_types;
pub mod selection;
pub mod stdio;
pub mod store;

pub use error::{ApiError, BlogError, ErrorKind};
pub use store::BlogStore;
