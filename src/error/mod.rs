mod api;
mod store;

pub use api::ApiError;
pub use store::StoreError;
