pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod utils;
pub mod view;

pub use error::{ApiError, StoreError};
pub use excuse_schema::{Excuse, SortKey, VoteDelta};
