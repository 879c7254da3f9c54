pub mod excuse;
pub mod request;
pub mod response;

pub use excuse::Excuse;
pub use request::{CreateExcuseRequest, ListQuery, SortKey, VoteDelta, VoteRequest};
pub use response::{ErrorBody, MessageBody};
