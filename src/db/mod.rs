//! Database module: the excuse store.
//!
//! Layout:
//! - `models.rs`: Rust struct mirroring an `excuses` row
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `actor.rs`: the actor owning the connection pool, plus its cloneable handle

pub mod actor;
pub mod models;
pub mod schema;

pub use models::DbExcuse;

pub use actor::{DbActorHandle, spawn};
